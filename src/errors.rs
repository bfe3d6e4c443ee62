use std::fmt;

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use sqlx::error::ErrorKind;

use crate::JsonResponse;

pub const BAD_REQUEST: &str = "Bad Request";
pub const INVALID_SORT_QUERY: &str = "invalid sort_by query";
pub const MISSING_REFERENCE: &str = "Referenced Row Does Not Exist";

/// The kinds of rows a lookup can come back empty for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Article,
    Comment,
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resource::Article => f.write_str("Article"),
            Resource::Comment => f.write_str("Comment"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0} Does Not Exist")]
    NotFound(Resource),
    #[error("Key ({key})=({value}) is not present in table \"{table}\".")]
    ReferentialIntegrity {
        key: &'static str,
        value: String,
        table: &'static str,
    },
    #[error(transparent)]
    DatabaseError(#[from] sqlx::Error),
    #[error(transparent)]
    ServerError(#[from] anyhow::Error),
}

impl RequestError {
    pub fn bad_request() -> Self {
        Self::BadRequest(BAD_REQUEST.to_owned())
    }
}

/// What a raw store failure means to a caller, judged from the database error kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreFault {
    /// A CHECK constraint rejected the shape of a value.
    InvalidInput,
    /// A NOT NULL column was left empty.
    MissingValue,
    /// A foreign key points at a row that does not exist.
    DanglingReference,
    Unclassified,
}

pub fn classify_store_error(error: &sqlx::Error) -> StoreFault {
    match error {
        sqlx::Error::Database(error) => match error.kind() {
            ErrorKind::CheckViolation => StoreFault::InvalidInput,
            ErrorKind::NotNullViolation => StoreFault::MissingValue,
            ErrorKind::ForeignKeyViolation => StoreFault::DanglingReference,
            _ => StoreFault::Unclassified,
        },
        _ => StoreFault::Unclassified,
    }
}

#[derive(Debug, serde::Serialize, serde::Deserialize)]
pub struct RequestErrorJson {
    pub msg: String,
}

impl RequestErrorJson {
    pub fn new(msg: impl Into<String>) -> RequestErrorJson {
        RequestErrorJson { msg: msg.into() }
    }
}

impl From<JsonRejection> for RequestError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!(%rejection, "rejected request body");
        Self::bad_request()
    }
}

impl From<QueryRejection> for RequestError {
    fn from(rejection: QueryRejection) -> Self {
        tracing::debug!(%rejection, "rejected query string");
        Self::bad_request()
    }
}

impl IntoResponse for RequestError {
    fn into_response(self) -> axum::response::Response {
        self.to_json_response().into_response()
    }
}

impl RequestError {
    /// Domain errors answer for themselves; raw store errors go through
    /// [`classify_store_error`]; whatever is left is a 500.
    pub fn to_json_response(&self) -> JsonResponse<RequestErrorJson> {
        let (status_code, json) = match self {
            RequestError::BadRequest(message) => {
                (StatusCode::BAD_REQUEST, RequestErrorJson::new(message))
            }
            RequestError::NotFound(_) | RequestError::ReferentialIntegrity { .. } => (
                StatusCode::NOT_FOUND,
                RequestErrorJson::new(self.to_string()),
            ),
            RequestError::DatabaseError(e) => match classify_store_error(e) {
                StoreFault::InvalidInput | StoreFault::MissingValue => {
                    (StatusCode::BAD_REQUEST, RequestErrorJson::new(BAD_REQUEST))
                }
                StoreFault::DanglingReference => {
                    tracing::warn!(error = %e, "Unattributed foreign key failure");
                    (
                        StatusCode::NOT_FOUND,
                        RequestErrorJson::new(MISSING_REFERENCE),
                    )
                }
                StoreFault::Unclassified => {
                    tracing::error!(error = %e, "Database error");
                    internal_server_error()
                }
            },
            RequestError::ServerError(e) => {
                tracing::error!(error = ?e, "Server error");
                internal_server_error()
            }
        };
        (status_code, Json(json))
    }
}

fn internal_server_error() -> (StatusCode, RequestErrorJson) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        RequestErrorJson::new("Internal Server Error"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_names_the_resource() {
        let (status, Json(body)) = RequestError::NotFound(Resource::Article).to_json_response();
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body.msg, "Article Does Not Exist");

        let (_, Json(body)) = RequestError::NotFound(Resource::Comment).to_json_response();
        assert_eq!(body.msg, "Comment Does Not Exist");
    }

    #[test]
    fn referential_integrity_keeps_key_and_value() {
        let error = RequestError::ReferentialIntegrity {
            key: "article_id",
            value: "999".to_owned(),
            table: "articles",
        };
        let (status, Json(body)) = error.to_json_response();
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(
            body.msg,
            "Key (article_id)=(999) is not present in table \"articles\"."
        );
    }

    #[test]
    fn bad_request_passes_message_through() {
        let (status, Json(body)) =
            RequestError::BadRequest(INVALID_SORT_QUERY.to_owned()).to_json_response();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.msg, "invalid sort_by query");
    }

    #[test]
    fn non_database_store_errors_are_unclassified() {
        assert_eq!(
            classify_store_error(&sqlx::Error::RowNotFound),
            StoreFault::Unclassified
        );
        assert_eq!(
            classify_store_error(&sqlx::Error::PoolTimedOut),
            StoreFault::Unclassified
        );
    }

    #[test]
    fn unclassified_errors_do_not_leak_details() {
        let (status, Json(body)) =
            RequestError::DatabaseError(sqlx::Error::PoolTimedOut).to_json_response();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.msg, "Internal Server Error");

        let (status, Json(body)) =
            RequestError::ServerError(anyhow::anyhow!("secret path /etc/db")).to_json_response();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.msg, "Internal Server Error");
    }

    #[test]
    fn malformed_query_strings_are_bad_requests() {
        let uri: axum::http::Uri = "/api/articles?sort_by=votes&sort_by=votes".parse().unwrap();
        let Err(rejection) = axum::extract::Query::<crate::ArticleQueryParams>::try_from_uri(&uri)
        else {
            panic!("duplicate keys should not deserialize");
        };
        let (status, Json(body)) = RequestError::from(rejection).to_json_response();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.msg, "Bad Request");
    }
}
