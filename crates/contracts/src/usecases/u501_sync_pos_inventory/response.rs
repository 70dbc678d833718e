use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncStartStatus {
    Started,
    Failed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncResponse {
    #[serde(rename = "sessionId")]
    pub session_id: String,
    pub status: SyncStartStatus,
    pub message: String,
}
