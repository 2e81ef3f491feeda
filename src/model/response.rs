//! The value returned to the invoking runtime.

use serde::{Deserialize, Serialize};

/// Message reported for every completed batch.
pub const PROCESSED_MESSAGE: &str = "Processed all messages";

/// HTTP-style invocation result: `{ "statusCode": 200, "body": "<json>" }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvocationResponse {
    pub status_code: u16,
    /// JSON-encoded [`ResponseBody`].
    pub body: String,
}

/// Decoded form of [`InvocationResponse::body`].
///
/// `count` is the number of normalized messages, not the number persisted.
/// `persistedCount` only appears when the deployment opts into it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseBody {
    pub message: String,
    pub count: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub persisted_count: Option<usize>,
}

impl InvocationResponse {
    /// A `200` response carrying `body`.
    pub fn ok(body: &ResponseBody) -> Result<Self, serde_json::Error> {
        Ok(Self {
            status_code: 200,
            body: serde_json::to_string(body)?,
        })
    }

    /// Decodes the body back into a [`ResponseBody`].
    pub fn decode_body(&self) -> Result<ResponseBody, serde_json::Error> {
        serde_json::from_str(&self.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn body_text_matches_the_published_contract() {
        let body = ResponseBody {
            message: PROCESSED_MESSAGE.into(),
            count: 3,
            persisted_count: None,
        };
        let response = InvocationResponse::ok(&body).unwrap();

        assert_eq!(response.body, r#"{"message":"Processed all messages","count":3}"#);
        assert_eq!(
            serde_json::to_string(&response).unwrap(),
            r#"{"statusCode":200,"body":"{\"message\":\"Processed all messages\",\"count\":3}"}"#
        );
    }

    #[test]
    fn persisted_count_is_appended_when_present() {
        let body = ResponseBody {
            message: PROCESSED_MESSAGE.into(),
            count: 3,
            persisted_count: Some(2),
        };
        let response = InvocationResponse::ok(&body).unwrap();

        assert_eq!(
            response.body,
            r#"{"message":"Processed all messages","count":3,"persistedCount":2}"#
        );
        assert_eq!(response.decode_body().unwrap(), body);
    }
}
