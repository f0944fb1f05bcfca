use async_trait::async_trait;
use chrono::Utc;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use uuid::Uuid;

use crate::errors::StoreError;
use crate::models::conversation::Conversation;

/// First message every bootstrapped conversation carries.
const OPENING_MESSAGE: &str = "Conversa iniciada";

/// Persistence seam for conversations. At most one row exists per
/// (client, creator) pair; uniqueness is the store's job, not the caller's.
#[async_trait]
pub trait ConversationStore: Send + Sync {
    /// Returns the pair's conversation, inserting it on first contact. The
    /// bool reports whether this call created the row.
    async fn find_or_create(
        &self,
        client_id: &str,
        creator_id: &str,
    ) -> Result<(Conversation, bool), StoreError>;
}

pub struct InMemoryConversationStore {
    conversations: DashMap<(String, String), Conversation>,
}

impl InMemoryConversationStore {
    pub fn new() -> Self {
        Self {
            conversations: DashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.conversations.len()
    }
}

impl Default for InMemoryConversationStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ConversationStore for InMemoryConversationStore {
    async fn find_or_create(
        &self,
        client_id: &str,
        creator_id: &str,
    ) -> Result<(Conversation, bool), StoreError> {
        let key = (client_id.to_string(), creator_id.to_string());

        // entry() holds the shard lock, so a lost race observes the
        // winner's row instead of inserting a duplicate
        match self.conversations.entry(key) {
            Entry::Occupied(existing) => Ok((existing.get().clone(), false)),
            Entry::Vacant(slot) => {
                let now = Utc::now();
                let conversation = Conversation {
                    id: Uuid::new_v4().to_string(),
                    client_id: client_id.to_string(),
                    creator_id: creator_id.to_string(),
                    last_message: OPENING_MESSAGE.to_string(),
                    last_message_at: now,
                    created_at: now,
                };
                slot.insert(conversation.clone());
                Ok((conversation, true))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn find_or_create_is_idempotent_per_pair() {
        let store = InMemoryConversationStore::new();

        let (first, created_first) = store.find_or_create("client_1", "creator_1").await.unwrap();
        let (second, created_second) = store.find_or_create("client_1", "creator_1").await.unwrap();

        assert!(created_first);
        assert!(!created_second);
        assert_eq!(first.id, second.id);
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn distinct_pairs_get_distinct_conversations() {
        let store = InMemoryConversationStore::new();

        let (a, _) = store.find_or_create("client_1", "creator_1").await.unwrap();
        let (b, _) = store.find_or_create("client_1", "creator_2").await.unwrap();
        let (c, _) = store.find_or_create("client_2", "creator_1").await.unwrap();

        assert_ne!(a.id, b.id);
        assert_ne!(a.id, c.id);
        assert_eq!(store.len(), 3);
    }

    #[tokio::test]
    async fn new_conversations_carry_the_opening_message() {
        let store = InMemoryConversationStore::new();
        let (conversation, _) = store.find_or_create("client_1", "creator_1").await.unwrap();

        assert_eq!(conversation.last_message, "Conversa iniciada");
        assert_eq!(conversation.client_id, "client_1");
        assert_eq!(conversation.creator_id, "creator_1");
    }

    #[tokio::test]
    async fn concurrent_bootstrap_converges_on_one_row() {
        use std::sync::Arc;

        let store = Arc::new(InMemoryConversationStore::new());
        let mut handles = Vec::new();
        for _ in 0..8 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store.find_or_create("client_1", "creator_1").await.unwrap().0.id
            }));
        }

        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap());
        }
        ids.dedup();
        assert_eq!(ids.len(), 1);
        assert_eq!(store.len(), 1);
    }
}
