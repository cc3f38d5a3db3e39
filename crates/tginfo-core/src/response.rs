//! Normalized JSON summaries for resolved entities.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::{
    age, datacenter,
    domain::{Entity, ResolvedChat, ResolvedUser},
};

/// Summary of a user or bot. Field order is the wire order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct UserInfo {
    #[serde(rename = "type")]
    pub kind: String,
    pub full_name: String,
    pub id: i64,
    pub username: String,
    pub context_id: i64,
    pub data_center: String,
    pub premium: String,
    pub verified: String,
    pub flags: String,
    pub status: String,
    pub account_created_on: String,
    pub account_age: String,
}

/// Either a real member count or the literal `"Unknown"`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum MemberCount {
    Known(u32),
    Unknown(&'static str),
}

/// Summary of a group, supergroup or channel.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ChatInfo {
    #[serde(rename = "type")]
    pub kind: String,
    pub title: Option<String>,
    pub id: i64,
    pub type_description: String,
    pub member_count: MemberCount,
    pub data_center: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum EntityInfo {
    User(UserInfo),
    Chat(ChatInfo),
}

pub fn build(entity: &Entity, now: NaiveDateTime) -> EntityInfo {
    match entity {
        Entity::User(u) => EntityInfo::User(build_user(u, now)),
        Entity::Chat(c) => EntityInfo::Chat(build_chat(c)),
    }
}

pub fn build_user(u: &ResolvedUser, now: NaiveDateTime) -> UserInfo {
    let created = age::estimate_creation(u.id);

    UserInfo {
        kind: if u.is_bot { "bot" } else { "user" }.to_string(),
        full_name: format!("{} {}", u.first_name, u.last_name.as_deref().unwrap_or("")),
        id: u.id,
        username: u
            .username
            .as_deref()
            .filter(|s| !s.is_empty())
            .map(|s| format!("@{s}"))
            .unwrap_or_else(|| "None".to_string()),
        context_id: u.id,
        data_center: datacenter::describe(u.dc_id),
        premium: yes_no(u.is_premium),
        verified: yes_no(u.is_verified),
        flags: flags(u).to_string(),
        status: map_user_status(u.status.as_deref()).to_string(),
        account_created_on: age::format_created_on(created),
        account_age: age::format_account_age(created, now),
    }
}

pub fn build_chat(c: &ResolvedChat) -> ChatInfo {
    let label = c.kind.label();

    ChatInfo {
        kind: label.to_lowercase(),
        title: c.title.clone(),
        id: c.id,
        type_description: label.to_string(),
        member_count: match c.members_count {
            Some(n) if n > 0 => MemberCount::Known(n),
            _ => MemberCount::Unknown("Unknown"),
        },
        data_center: datacenter::describe(c.dc_id),
    }
}

fn yes_no(flag: Option<bool>) -> String {
    let label = if flag.unwrap_or(false) { "Yes" } else { "No" };
    label.to_string()
}

/// Scam wins over fake.
pub fn flags(u: &ResolvedUser) -> &'static str {
    if u.is_scam.unwrap_or(false) {
        "Scam"
    } else if u.is_fake.unwrap_or(false) {
        "Fake"
    } else {
        "Clean"
    }
}

// Checked in order; the first substring hit wins.
const STATUS_LABELS: [(&str, &str); 5] = [
    ("ONLINE", "Online"),
    ("OFFLINE", "Offline"),
    ("RECENTLY", "Recently online"),
    ("LAST_WEEK", "Last seen within week"),
    ("LAST_MONTH", "Last seen within month"),
];

/// Map a raw presence code (e.g. `UserStatus.LAST_WEEK`) to a label.
pub fn map_user_status(status: Option<&str>) -> &'static str {
    let Some(raw) = status.filter(|s| !s.is_empty()) else {
        return "Unknown";
    };
    let upper = raw.to_uppercase();

    STATUS_LABELS
        .iter()
        .find(|(code, _)| upper.contains(code))
        .map(|(_, label)| *label)
        .unwrap_or("Unknown")
}
