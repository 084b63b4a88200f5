use std::fmt::{self, Debug, Display};

use actix_web::{http::StatusCode, HttpResponse, ResponseError};

use crate::store::StoreError;

pub type Result<R> = core::result::Result<R, Error>;

pub enum Error {
    /// The requested category does not exist.
    NotFound,

    /// The request was malformed or inconsistent.
    BadRequest(String),

    /// Anything else. Reported to the client as a bare 500.
    Internal(eyre::Report),
}

impl From<eyre::Report> for Error {
    fn from(error: eyre::Report) -> Self {
        Self::Internal(error)
    }
}

impl From<StoreError> for Error {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::Other(error) => Self::Internal(error),
            conflict @ StoreError::Conflict { .. } => Self::Internal(eyre::Report::new(conflict)),
        }
    }
}

impl Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::NotFound => f.write_str("NotFound"),
            Error::BadRequest(msg) => f.debug_tuple("BadRequest").field(msg).finish(),
            Error::Internal(error) => Debug::fmt(error, f),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::NotFound => f.write_str("Not found"),
            Error::BadRequest(msg) => write!(f, "Bad request: {msg}"),
            Error::Internal(error) => Display::fmt(error, f),
        }
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Error::NotFound => StatusCode::NOT_FOUND,
            Error::BadRequest(_) => StatusCode::BAD_REQUEST,
            Error::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            Error::Internal(error) => {
                log::error!("{error:?}");
                HttpResponse::new(self.status_code())
            }
            _ => {
                log::warn!("{self}");
                HttpResponse::build(self.status_code()).body(self.to_string())
            }
        }
    }
}
