use std::sync::Arc;

use crate::{
    domain::Entity,
    errors::{LookupError, ResolveError},
    ports::EntityLookup,
};

pub const NO_CONTROL_OVER_USER: &str = "Looks Like I Don't Have Control Over The User";
pub const NO_CONTROL_OVER_CHAT: &str = "Looks Like I Don't Have Control Over The Channel Or Group";

/// Two-stage resolution: user/bot first, then chat/channel/group.
#[derive(Clone)]
pub struct EntityResolver {
    lookup: Arc<dyn EntityLookup>,
}

impl EntityResolver {
    pub fn new(lookup: Arc<dyn EntityLookup>) -> Self {
        Self { lookup }
    }

    /// Resolve a normalized handle.
    ///
    /// Only "not occupied" and "peer invalid" from the user lookup fall through to
    /// the chat lookup; any other user-lookup failure is a permission error.
    pub async fn resolve(&self, handle: &str) -> Result<Entity, ResolveError> {
        match self.lookup.lookup_user_or_bot(handle).await {
            Ok(user) => {
                tracing::info!(handle, "user/bot found");
                return Ok(Entity::User(user));
            }
            Err(LookupError::NotOccupied | LookupError::PeerOrChannelInvalid) => {
                tracing::info!(handle, "not a user/bot, checking for chat");
            }
            Err(LookupError::Other(e)) => {
                tracing::error!(handle, error = %e, "error fetching user/bot info");
                return Err(ResolveError::PermissionDenied(
                    NO_CONTROL_OVER_USER.to_string(),
                ));
            }
        }

        match self.lookup.lookup_chat(handle).await {
            Ok(chat) => {
                tracing::info!(handle, kind = chat.kind.label(), "chat found");
                Ok(Entity::Chat(chat))
            }
            Err(LookupError::NotOccupied) => Err(ResolveError::NotFound {
                handle: handle.to_string(),
            }),
            Err(LookupError::PeerOrChannelInvalid) => {
                tracing::error!(handle, "permission error: {NO_CONTROL_OVER_CHAT}");
                Err(ResolveError::PermissionDenied(
                    NO_CONTROL_OVER_CHAT.to_string(),
                ))
            }
            Err(LookupError::Other(e)) => {
                tracing::error!(handle, error = %e, "error fetching chat info");
                Err(ResolveError::TransientFailure(e))
            }
        }
    }
}
