/// Snapshot of a user or bot as returned by the lookup collaborator.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResolvedUser {
    pub id: i64,
    pub first_name: String,
    pub last_name: Option<String>,
    pub username: Option<String>,
    pub is_bot: bool,
    pub is_premium: Option<bool>,
    pub is_verified: Option<bool>,
    pub is_scam: Option<bool>,
    pub is_fake: Option<bool>,
    pub dc_id: Option<u32>,
    /// Raw presence code, e.g. `UserStatus.RECENTLY`.
    pub status: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ChatKind {
    Group,
    Supergroup,
    Channel,
    /// Anything else the collaborator reports (private chats, bots, ...).
    Other,
}

impl ChatKind {
    /// Human label; kinds outside group/supergroup/channel are `Unknown`.
    pub fn label(&self) -> &'static str {
        match self {
            ChatKind::Group => "Group",
            ChatKind::Supergroup => "Supergroup",
            ChatKind::Channel => "Channel",
            ChatKind::Other => "Unknown",
        }
    }
}

/// Snapshot of a group, supergroup or channel. `id` is negative for these.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedChat {
    pub id: i64,
    pub title: Option<String>,
    pub kind: ChatKind,
    pub members_count: Option<u32>,
    pub dc_id: Option<u32>,
}

/// Any entity a handle can resolve to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Entity {
    User(ResolvedUser),
    Chat(ResolvedChat),
}
