//! Telegram adapter (MTProto via layer-client).
//!
//! This crate implements the `tginfo-core` EntityLookup port. The Bot API can only
//! resolve public chat usernames, so lookups go through MTProto
//! `contacts.resolveUsername` with a bot-authorized session instead.

use std::sync::Arc;

use async_trait::async_trait;

use layer_client::{
    session_backend::BinaryFileBackend, AutoSleep, Client, InvocationError, NoRetries,
    RetryPolicy,
};
use layer_tl_types as tl;

use tginfo_core::{
    config::Config,
    domain::{ChatKind, ResolvedChat, ResolvedUser},
    errors::{Error, LookupError},
    ports::EntityLookup,
    Result,
};

/// Bot API style id offset for channels and supergroups (`-100…`).
const CHANNEL_ID_OFFSET: i64 = 1_000_000_000_000;

#[derive(Clone)]
pub struct TelegramLookup {
    client: Client,
}

impl TelegramLookup {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Connect, reusing the session file when present, and sign in with the bot token.
    pub async fn connect(cfg: &Config) -> Result<Self> {
        let client = Client::connect(layer_client::Config {
            api_id: cfg.telegram_api_id,
            api_hash: cfg.telegram_api_hash.clone(),
            retry_policy: retry_policy(cfg.retry_on_flood),
            session_backend: Arc::new(BinaryFileBackend::new(
                cfg.telegram_session_file.as_str(),
            )),
            ..Default::default()
        })
        .await
        .map_err(|e| Error::External(format!("telegram connect failed: {e}")))?;

        let authorized = client
            .is_authorized()
            .await
            .map_err(|e| Error::External(format!("telegram auth check failed: {e}")))?;
        if !authorized {
            let name = client
                .bot_sign_in(&cfg.telegram_bot_token)
                .await
                .map_err(|e| Error::External(format!("telegram bot sign-in failed: {e}")))?;
            tracing::info!("telegram signed in as {name}");
            client
                .save_session()
                .await
                .map_err(|e| Error::External(format!("telegram session save failed: {e}")))?;
        }

        Ok(Self::new(client))
    }

    /// Persist the session; call once on shutdown.
    pub async fn close(&self) -> Result<()> {
        self.client
            .save_session()
            .await
            .map_err(|e| Error::External(format!("telegram session save failed: {e}")))
    }

    async fn resolve(
        &self,
        handle: &str,
    ) -> std::result::Result<tl::types::contacts::ResolvedPeer, LookupError> {
        let req = tl::functions::contacts::ResolveUsername {
            username: handle.to_string(),
            referer: None,
        };
        match self.client.invoke(&req).await {
            Ok(tl::enums::contacts::ResolvedPeer::ResolvedPeer(r)) => Ok(r),
            Err(e) => Err(map_err(e)),
        }
    }

    /// `participants_count` is usually missing from a resolve; ask for the full channel.
    async fn channel_members(&self, channel_id: i64, access_hash: Option<i64>) -> Option<u32> {
        let access_hash = access_hash?;
        let req = tl::functions::channels::GetFullChannel {
            channel: tl::enums::InputChannel::InputChannel(tl::types::InputChannel {
                channel_id,
                access_hash,
            }),
        };
        match self.client.invoke(&req).await {
            Ok(tl::enums::messages::ChatFull::ChatFull(full)) => match full.full_chat {
                tl::enums::ChatFull::ChannelFull(c) => {
                    c.participants_count.and_then(|n| u32::try_from(n).ok())
                }
                _ => None,
            },
            Err(e) => {
                tracing::debug!(channel_id, error = %e, "member count unavailable");
                None
            }
        }
    }
}

fn retry_policy(retry_on_flood: bool) -> Arc<dyn RetryPolicy> {
    if retry_on_flood {
        Arc::new(AutoSleep::default())
    } else {
        Arc::new(NoRetries)
    }
}

const ACCESS_ERRORS: [&str; 4] = [
    "PEER_ID_INVALID",
    "CHANNEL_INVALID",
    "CHANNEL_PRIVATE",
    "CHAT_FORBIDDEN",
];

fn map_err(e: InvocationError) -> LookupError {
    classify(|name| e.is(name))
        .unwrap_or_else(|| LookupError::Other(format!("telegram error: {e}")))
}

/// `is` reports whether the RPC error carries the given name.
fn classify(is: impl Fn(&str) -> bool) -> Option<LookupError> {
    if is("USERNAME_NOT_OCCUPIED") {
        Some(LookupError::NotOccupied)
    } else if ACCESS_ERRORS.iter().any(|name| is(name)) {
        Some(LookupError::PeerOrChannelInvalid)
    } else {
        None
    }
}

/// The resolved user, or `PeerOrChannelInvalid` when the handle names a chat.
fn pick_user<'a>(
    peer: &tl::enums::Peer,
    users: &'a [tl::enums::User],
) -> std::result::Result<&'a tl::types::User, LookupError> {
    let tl::enums::Peer::User(p) = peer else {
        return Err(LookupError::PeerOrChannelInvalid);
    };
    users
        .iter()
        .find_map(|u| match u {
            tl::enums::User::User(u) if u.id == p.user_id => Some(u),
            _ => None,
        })
        .ok_or_else(|| LookupError::Other(format!("user {} missing from response", p.user_id)))
}

fn chat_id_of(peer: &tl::enums::Peer) -> Option<i64> {
    match peer {
        tl::enums::Peer::Channel(c) => Some(c.channel_id),
        tl::enums::Peer::Chat(c) => Some(c.chat_id),
        tl::enums::Peer::User(_) => None,
    }
}

fn channel_chat_id(channel_id: i64) -> i64 {
    -(CHANNEL_ID_OFFSET + channel_id)
}

fn chat_kind(broadcast: bool, megagroup: bool) -> ChatKind {
    if broadcast {
        ChatKind::Channel
    } else if megagroup {
        ChatKind::Supergroup
    } else {
        ChatKind::Group
    }
}

fn status_code(status: Option<&tl::enums::UserStatus>) -> Option<String> {
    let code = match status? {
        tl::enums::UserStatus::Online(_) => "ONLINE",
        tl::enums::UserStatus::Offline(_) => "OFFLINE",
        tl::enums::UserStatus::Recently(_) => "RECENTLY",
        tl::enums::UserStatus::LastWeek(_) => "LAST_WEEK",
        tl::enums::UserStatus::LastMonth(_) => "LAST_MONTH",
        _ => return None,
    };
    Some(format!("UserStatus.{code}"))
}

fn positive_dc(dc_id: i32) -> Option<u32> {
    u32::try_from(dc_id).ok().filter(|dc| *dc > 0)
}

fn to_user(u: &tl::types::User) -> ResolvedUser {
    let dc_id = match &u.photo {
        Some(tl::enums::UserProfilePhoto::UserProfilePhoto(p)) => positive_dc(p.dc_id),
        _ => None,
    };

    ResolvedUser {
        id: u.id,
        first_name: u.first_name.clone().unwrap_or_default(),
        last_name: u.last_name.clone(),
        username: u.username.clone(),
        is_bot: u.bot,
        is_premium: Some(u.premium),
        is_verified: Some(u.verified),
        is_scam: Some(u.scam),
        is_fake: Some(u.fake),
        dc_id,
        status: status_code(u.status.as_ref()),
    }
}

fn chat_photo_dc(photo: &tl::enums::ChatPhoto) -> Option<u32> {
    match photo {
        tl::enums::ChatPhoto::ChatPhoto(p) => positive_dc(p.dc_id),
        _ => None,
    }
}

#[async_trait]
impl EntityLookup for TelegramLookup {
    async fn lookup_user_or_bot(
        &self,
        handle: &str,
    ) -> std::result::Result<ResolvedUser, LookupError> {
        let resolved = self.resolve(handle).await?;
        let user = pick_user(&resolved.peer, &resolved.users)?;
        Ok(to_user(user))
    }

    async fn lookup_chat(
        &self,
        handle: &str,
    ) -> std::result::Result<ResolvedChat, LookupError> {
        let resolved = self.resolve(handle).await?;

        let Some(id) = chat_id_of(&resolved.peer) else {
            // A user handle asked for as a chat.
            let user = pick_user(&resolved.peer, &resolved.users)?;
            return Ok(ResolvedChat {
                id: user.id,
                title: None,
                kind: ChatKind::Other,
                members_count: None,
                dc_id: to_user(user).dc_id,
            });
        };

        let chat = resolved
            .chats
            .iter()
            .find(|c| match c {
                tl::enums::Chat::Channel(c) => c.id == id,
                tl::enums::Chat::ChannelForbidden(c) => c.id == id,
                tl::enums::Chat::Chat(c) => c.id == id,
                tl::enums::Chat::Forbidden(c) => c.id == id,
                tl::enums::Chat::Empty(c) => c.id == id,
            })
            .ok_or_else(|| LookupError::Other(format!("chat {id} missing from response")))?;

        match chat {
            tl::enums::Chat::Channel(c) => {
                let members_count = match c.participants_count {
                    Some(n) => u32::try_from(n).ok(),
                    None => self.channel_members(c.id, c.access_hash).await,
                };
                Ok(ResolvedChat {
                    id: channel_chat_id(c.id),
                    title: Some(c.title.clone()),
                    kind: chat_kind(c.broadcast, c.megagroup),
                    members_count,
                    dc_id: chat_photo_dc(&c.photo),
                })
            }
            tl::enums::Chat::Chat(c) => Ok(ResolvedChat {
                id: -c.id,
                title: Some(c.title.clone()),
                kind: ChatKind::Group,
                members_count: u32::try_from(c.participants_count).ok(),
                dc_id: chat_photo_dc(&c.photo),
            }),
            _ => Err(LookupError::PeerOrChannelInvalid),
        }
    }
}
