use crate::templates::ErrorPage;
use actix::MailboxError;
use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use color_eyre::eyre::Report;
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Not found")]
    NotFound,

    #[error("Store error: {0}")]
    Store(#[from] Report),

    #[error("Database actor unavailable: {0}")]
    Mailbox(#[from] MailboxError),
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Error::NotFound => StatusCode::NOT_FOUND,
            Error::Store(_) | Error::Mailbox(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            error!("Request failed: {:?}", self);
        }
        let page = ErrorPage { status };
        HttpResponse::build(status)
            .content_type("text/html; charset=utf-8")
            .body(page.to_string())
    }
}
