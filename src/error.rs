use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Appointment not found: {0}")]
    AppointmentNotFound(String),

    #[error("Missing required fields: {0}")]
    Validation(String),

    #[error(transparent)]
    Config(#[from] anyhow::Error),
}

impl Error {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::AppointmentNotFound(_) => 3,
            Error::Validation(_) => 2,
            Error::Io(_) | Error::Json(_) | Error::Config(_) => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
