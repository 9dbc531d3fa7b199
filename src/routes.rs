use crate::{
    error::StudentsError,
    routes::students::{
        create_student, delete_student, get_student, list_students, options_students,
        patch_student_status, upsert_student,
    },
    state::StudentsState,
    validation::FieldErrors,
};
use axum::{
    Json, Router,
    http::{Method, StatusCode, header::ACCESS_CONTROL_ALLOW_ORIGIN},
    response::{IntoResponse, Response},
    routing::{delete, get, patch},
};
use serde::Serialize;
use std::any::Any;
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};

pub mod params;
pub mod students;

#[derive(Serialize)]
struct Envelope<R> {
    status: u16,
    reason: R,
}

pub fn json_response<T: Serialize + ?Sized>(status: StatusCode, body: &T) -> Response {
    (status, [(ACCESS_CONTROL_ALLOW_ORIGIN, "*")], Json(body)).into_response()
}

/// `{status, reason}` with `status` mirrored into the body.
pub fn json_status<R: Serialize>(status: StatusCode, reason: R) -> Response {
    json_response(
        status,
        &Envelope {
            status: status.as_u16(),
            reason,
        },
    )
}

pub fn not_found() -> Response {
    json_status(StatusCode::NOT_FOUND, "Not found")
}

pub fn bad_request(errors: FieldErrors) -> Response {
    json_status(StatusCode::BAD_REQUEST, errors)
}

/// Catch-all verbs get an empty 404, anything else gets the JSON one.
async fn fallback(method: Method) -> Response {
    match method {
        Method::GET | Method::HEAD | Method::PUT | Method::POST | Method::DELETE => {
            StatusCode::NOT_FOUND.into_response()
        }
        _ => not_found(),
    }
}

#[allow(clippy::needless_pass_by_value)]
fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(message) = panic.downcast_ref::<String>() {
        message.clone()
    } else if let Some(message) = panic.downcast_ref::<&str>() {
        (*message).to_string()
    } else {
        "unknown panic".to_string()
    };

    StudentsError::Panicked { message }.into_response()
}

pub fn router(state: StudentsState) -> Router {
    Router::new()
        .route(
            "/students",
            get(list_students)
                .post(create_student)
                .options(options_students),
        )
        .route("/students/", get(list_students).post(create_student))
        .route(
            "/students/{id}",
            get(get_student)
                .put(upsert_student)
                .post(upsert_student)
                .delete(delete_student),
        )
        .route("/students/{id}/", delete(delete_student))
        .route(
            "/students/{id}/status/{status}",
            patch(patch_student_status),
        )
        .fallback(fallback)
        .method_not_allowed_fallback(fallback)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
