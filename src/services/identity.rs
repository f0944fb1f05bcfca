use async_trait::async_trait;
use dashmap::DashMap;

pub type UserId = String;

/// Turns a bearer credential into a caller identity. Resolution is the only
/// piece of authentication this subsystem owns; identity is then threaded
/// explicitly through every operation instead of read ambiently.
#[async_trait]
pub trait IdentityResolver: Send + Sync {
    async fn resolve(&self, bearer_token: &str) -> Option<UserId>;
}

pub struct InMemorySessions {
    sessions: DashMap<String, UserId>,
}

impl InMemorySessions {
    pub fn new() -> Self {
        Self {
            sessions: DashMap::new(),
        }
    }

    pub fn register(&self, token: impl Into<String>, user_id: impl Into<UserId>) {
        self.sessions.insert(token.into(), user_id.into());
    }
}

impl Default for InMemorySessions {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IdentityResolver for InMemorySessions {
    async fn resolve(&self, bearer_token: &str) -> Option<UserId> {
        self.sessions.get(bearer_token).map(|entry| entry.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unknown_tokens_do_not_resolve() {
        let sessions = InMemorySessions::new();
        sessions.register("tok_abc", "user_1");

        assert_eq!(sessions.resolve("tok_abc").await.as_deref(), Some("user_1"));
        assert_eq!(sessions.resolve("tok_other").await, None);
    }
}
