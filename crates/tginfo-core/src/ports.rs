use async_trait::async_trait;

use crate::{
    domain::{ResolvedChat, ResolvedUser},
    errors::LookupError,
};

/// Hexagonal port for the Telegram side.
///
/// Users/bots and chats/channels live in disjoint lookup namespaces upstream, so the
/// port exposes one lookup per namespace. Implementations must be safe to call
/// concurrently from request handlers; connection lifecycle stays with the caller.
#[async_trait]
pub trait EntityLookup: Send + Sync {
    async fn lookup_user_or_bot(&self, handle: &str) -> Result<ResolvedUser, LookupError>;

    async fn lookup_chat(&self, handle: &str) -> Result<ResolvedChat, LookupError>;
}
