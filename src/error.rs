use crate::routes::{json_status, not_found};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use snafu::Snafu;
use std::num::ParseIntError;

pub type StudentsResult<T> = Result<T, StudentsError>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum StudentsError {
    #[snafu(display("Error opening database: {source}"))]
    OpenDatabase { source: sqlx::Error },
    #[snafu(display("Error getting db connection: {source}"))]
    GetDatabaseConnection { source: sqlx::Error },
    #[snafu(display("Error making SQL query: {source}"))]
    MakeQuery { source: sqlx::Error },
    #[snafu(display("Error commiting SQL transaction: {source}"))]
    CommitTransaction { source: sqlx::Error },
    #[snafu(display("Error migrating DB schema: {source}"))]
    MigrateError { source: sqlx::migrate::MigrateError },
    #[snafu(display("Unable to retrieve env var `{}`", name))]
    BadEnvVar {
        source: dotenvy::Error,
        name: &'static str,
    },
    #[snafu(display("Env var `{}` must not be blank", name))]
    BlankEnvVar { name: &'static str },
    #[snafu(display("Unable to parse max connections"))]
    ParseMaxConnections { source: ParseIntError },
    #[snafu(display("Handler panicked: {}", message))]
    Panicked { message: String },
}

impl IntoResponse for StudentsError {
    #[allow(clippy::match_same_arms)]
    fn into_response(self) -> Response {
        const ISE: StatusCode = StatusCode::INTERNAL_SERVER_ERROR; //internal server error
        const NF: StatusCode = StatusCode::NOT_FOUND; //not found

        let status_code = match &self {
            Self::OpenDatabase { .. } | Self::GetDatabaseConnection { .. } => ISE,
            Self::MigrateError { .. } => ISE,
            Self::MakeQuery { source } => match source {
                sqlx::Error::RowNotFound => NF,
                _ => ISE,
            },
            Self::CommitTransaction { .. } => ISE,
            Self::BadEnvVar { .. } | Self::BlankEnvVar { .. } => ISE,
            Self::ParseMaxConnections { .. } => ISE,
            Self::Panicked { .. } => ISE,
        };

        error!(?self, "Error!");
        if status_code == NF {
            not_found()
        } else {
            json_status(status_code, self.to_string())
        }
    }
}
