//! Request payloads accepted by the service.
//!
//! Field names are snake_case on the wire; camelCase aliases are accepted for
//! clients that send them.

use serde::{Deserialize, Serialize};

/// Response header listing every registered report key as a JSON array.
pub const REQUEST_IDS_HEADER: &str = "request-ids";

/// Response header carrying the echoed or generated query id.
pub const QUERY_ID_HEADER: &str = "query-id";

/// Body of `POST /run_chat_stream`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatStreamRequest {
    pub query: String,
    pub keywords: Vec<String>,
    #[serde(alias = "authToken")]
    pub auth_token: String,
    #[serde(alias = "dateRange")]
    pub date_range: String,
    #[serde(alias = "sessionId")]
    pub session_id: String,
    /// Generated when absent; see [`ChatStreamRequest::query_id_or_generate`].
    #[serde(default, alias = "queryId", skip_serializing_if = "Option::is_none")]
    pub query_id: Option<String>,
    pub conversations: Vec<String>,
    /// Skip the responder entirely and return an empty body.
    #[serde(default, alias = "returnEmpty")]
    pub return_empty: bool,
}

impl ChatStreamRequest {
    /// The client's query id, or a fresh UUIDv4 if none was sent.
    #[must_use]
    pub fn query_id_or_generate(&self) -> String {
        self.query_id
            .clone()
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string())
    }
}

/// Body of `POST /get_report`.
///
/// Clients usually send the full chat envelope along with the report id; only
/// the id is read and everything else is ignored.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GetReportRequest {
    #[serde(alias = "reportId")]
    pub report_id: String,
}
