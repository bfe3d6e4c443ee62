use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::RequestError;

// ----------------- Article Request -----------------
#[derive(Deserialize, Serialize, Debug, Default)]
pub struct UpdateArticleRequest {
    #[serde(default)]
    pub inc_votes: Option<Value>,
}

impl UpdateArticleRequest {
    /// Accepts a JSON integer or a string holding one. Surrounding
    /// whitespace in the string is ignored, so `" 7 "` reads as 7.
    pub fn vote_delta(&self) -> Result<i64, RequestError> {
        match &self.inc_votes {
            Some(Value::Number(number)) => number.as_i64(),
            Some(Value::String(raw)) => raw.trim().parse().ok(),
            _ => None,
        }
        .ok_or_else(RequestError::bad_request)
    }
}

// ----------------- Comment Request -----------------
#[derive(Deserialize, Serialize, Debug, Default)]
pub struct CommentRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
}
