use async_trait::async_trait;
use std::sync::Arc;

use crate::{database::CommentDatabase, error::AppResult};

/// A verified caller identity, as vouched for by the identity provider.
#[derive(Debug, Clone)]
pub struct Principal {
    pub user_id: i64,
    pub username: String,
}

/// Seam toward the identity-provider collaborator: resolve an opaque bearer
/// token into a verified principal, or `None` for an unknown token. Token
/// issuance lives entirely on the provider side.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn verify(&self, token: &str) -> AppResult<Option<Principal>>;
}

/// Identity backed by the provider-owned users and sessions tables.
pub struct StoreIdentity {
    db: Arc<CommentDatabase>,
}

impl StoreIdentity {
    pub fn new(db: Arc<CommentDatabase>) -> Self {
        StoreIdentity { db }
    }
}

#[async_trait]
impl IdentityProvider for StoreIdentity {
    async fn verify(&self, token: &str) -> AppResult<Option<Principal>> {
        let user = self.db.user_for_session(token).await?;
        Ok(user.map(|user| Principal {
            user_id: user.id,
            username: user.username,
        }))
    }
}
