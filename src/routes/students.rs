use crate::{
    data::student::{Student, StudentDraft, StudentParams},
    error::StudentsResult,
    routes::{bad_request, json_response, not_found},
    state::StudentsState,
    validation::parse_id,
};
use axum::{
    extract::{Path, State},
    http::{
        StatusCode,
        header::{ACCESS_CONTROL_ALLOW_ORIGIN, ALLOW, LOCATION},
    },
    response::{IntoResponse, Response},
};

pub const ALLOWED_METHODS: &str = "GET, POST, PUT, PATCH, DELETE, OPTIONS";

/// An empty table is still a successful list.
pub async fn list_students(State(state): State<StudentsState>) -> StudentsResult<Response> {
    let students = state.get_all().await?;
    Ok(json_response(StatusCode::OK, &students))
}

#[axum::debug_handler]
pub async fn get_student(
    State(state): State<StudentsState>,
    Path(id): Path<String>,
) -> StudentsResult<Response> {
    let Some(id) = parse_id(&id) else {
        return Ok(not_found());
    };

    Ok(match state.get_by_id(id).await? {
        Some(student) => json_response(StatusCode::OK, &student),
        None => not_found(),
    })
}

pub async fn create_student(
    State(state): State<StudentsState>,
    params: StudentParams,
) -> StudentsResult<Response> {
    let fields = match StudentDraft::default().merge(params).validate() {
        Ok(fields) => fields,
        Err(errors) => return Ok(bad_request(errors)),
    };

    let student = state.insert(fields).await?;
    info!(id = student.id, "Created student");

    let location = format!("/students/{}", student.id);
    Ok((
        [(LOCATION, location)],
        json_response(StatusCode::CREATED, &student),
    )
        .into_response())
}

pub async fn patch_student_status(
    State(state): State<StudentsState>,
    Path((id, status)): Path<(String, String)>,
) -> StudentsResult<Response> {
    let Some(id) = parse_id(&id) else {
        return Ok(not_found());
    };
    let Some(student) = state.get_by_id(id).await? else {
        return Ok(not_found());
    };

    let draft = StudentDraft {
        status: Some(status),
        ..StudentDraft::from(student)
    };
    info!(id, status = ?draft.status, "Changing student status");

    save_draft(&state, id, draft).await
}

/// Finds the student or starts a blank one under the requested id, then applies the params.
pub async fn upsert_student(
    State(state): State<StudentsState>,
    Path(id): Path<String>,
    params: StudentParams,
) -> StudentsResult<Response> {
    let Some(id) = parse_id(&id) else {
        return Ok(not_found());
    };

    let draft = state
        .get_by_id(id)
        .await?
        .map(StudentDraft::from)
        .unwrap_or_default()
        .merge(params);
    info!(id, "Upserting student");

    save_draft(&state, id, draft).await
}

async fn save_draft(state: &StudentsState, id: i32, draft: StudentDraft) -> StudentsResult<Response> {
    match draft.validate() {
        Ok(fields) => {
            let student = state.save(Student::from_fields(id, fields)).await?;
            Ok(json_response(StatusCode::OK, &student))
        }
        Err(errors) => Ok(bad_request(errors)),
    }
}

/// Deleting something already gone is a 404 every time.
pub async fn delete_student(
    State(state): State<StudentsState>,
    Path(id): Path<String>,
) -> StudentsResult<Response> {
    let Some(id) = parse_id(&id) else {
        return Ok(not_found());
    };

    if state.remove(id).await? {
        info!(id, "Deleted student");
        Ok((StatusCode::NO_CONTENT, [(ACCESS_CONTROL_ALLOW_ORIGIN, "*")]).into_response())
    } else {
        Ok(not_found())
    }
}

pub async fn options_students() -> impl IntoResponse {
    (StatusCode::OK, [(ALLOW, ALLOWED_METHODS)])
}
