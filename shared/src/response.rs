//! Wire types for the remote feed and the local callback API

use serde::{Deserialize, Serialize};

use crate::models::Order;

/// Payload of `GET /print-jobs/pending` on the remote feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PendingJobs {
    pub count: u32,
    #[serde(default)]
    pub orders: Vec<Order>,
}

/// Response shape of the local label endpoints.
///
/// The existing front-end expects `{success, message}` on the happy path
/// and `{success: false, error}` otherwise, so both optional fields are
/// skipped when unset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl LabelResponse {
    /// Create a successful response
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            error: None,
        }
    }

    /// Create an error response
    pub fn error(error: impl Into<String>) -> Self {
        Self {
            success: false,
            message: None,
            error: Some(error.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_response_shape() {
        let ok = serde_json::to_value(LabelResponse::ok("printed")).unwrap();
        assert_eq!(ok["success"], true);
        assert_eq!(ok["message"], "printed");
        assert!(ok.get("error").is_none());

        let err = serde_json::to_value(LabelResponse::error("bad body")).unwrap();
        assert_eq!(err["success"], false);
        assert_eq!(err["error"], "bad body");
        assert!(err.get("message").is_none());
    }

    #[test]
    fn test_pending_jobs_tolerates_missing_orders() {
        let jobs: PendingJobs = serde_json::from_str(r#"{"count": 0}"#).unwrap();
        assert_eq!(jobs.count, 0);
        assert!(jobs.orders.is_empty());
    }
}
