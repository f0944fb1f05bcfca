use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One chat thread between a client and a creator. The purchase path only
/// ever creates these; message mutation belongs to the chat domain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conversation {
    pub id: String,
    pub client_id: String,
    pub creator_id: String,
    pub last_message: String,
    pub last_message_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}
