use axum::extract::{RawQuery, State};
use axum::Json;
use serde_json::{json, Value};

use tginfo_core::{errors::ResolveError, identifier, response::EntityInfo};

use crate::{error::ApiError, AppState};

/// `GET /` usage document.
pub async fn welcome() -> Json<Value> {
    Json(json!({
        "message": "Welcome to the tginfo API!",
        "usage": {
            "endpoint": "/info",
            "query_param": "username",
            "description": "Retrieve information about a Telegram user, bot, group, or channel.",
            "examples": [
                "/info?username=TestUser",
                "/info?username=@TestUser",
                "/info?username=t.me/TestUser",
                "/info?username=https://t.me/TestUser"
            ],
            "response": "JSON object containing entity details (user/bot/channel/group info, account age, data center, etc.)"
        },
        "note": "Ensure TELEGRAM_BOT_TOKEN is set in the environment."
    }))
}

/// `GET /info?username=<handle>`.
pub async fn info(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> Result<Json<EntityInfo>, ApiError> {
    let raw = username_param(query.as_deref())
        .filter(|u| !u.is_empty())
        .ok_or(ResolveError::InvalidInput)?;

    let handle = identifier::normalize(&raw);
    tracing::info!("Fetching info for: {handle}");

    let entity = state.resolver.resolve(&handle).await?;
    Ok(Json(state.build(&entity)))
}

/// First `username` value of the query string; repeats are ignored.
fn username_param(query: Option<&str>) -> Option<String> {
    let pairs: Vec<(String, String)> = serde_urlencoded::from_str(query?).ok()?;
    pairs
        .into_iter()
        .find(|(k, _)| k == "username")
        .map(|(_, v)| v)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_username_wins() {
        assert_eq!(
            username_param(Some("username=a&username=b")),
            Some("a".to_string())
        );
        assert_eq!(
            username_param(Some("x=1&username=%40durov")),
            Some("@durov".to_string())
        );
        assert_eq!(
            username_param(Some("username=https%3A%2F%2Ft.me%2Fx")),
            Some("https://t.me/x".to_string())
        );
        assert_eq!(username_param(Some("user=a")), None);
        assert_eq!(username_param(None), None);
    }
}
