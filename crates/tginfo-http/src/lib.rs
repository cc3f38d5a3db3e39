//! HTTP adapter (axum).
//!
//! Exposes the usage document at `/` and entity lookups at `/info`.

use std::any::Any;
use std::sync::Arc;

use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use chrono::{NaiveDateTime, Utc};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

use tginfo_core::{
    domain::Entity,
    errors::ResolveError,
    ports::EntityLookup,
    resolver::EntityResolver,
    response::{self, EntityInfo},
};

pub mod error;
pub mod routes;

use crate::error::ApiError;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub resolver: EntityResolver,
    /// Source of "now" for account-age calculations.
    pub clock: fn() -> NaiveDateTime,
}

impl AppState {
    pub fn new(lookup: Arc<dyn EntityLookup>) -> Self {
        Self {
            resolver: EntityResolver::new(lookup),
            clock: utc_now,
        }
    }

    pub fn with_clock(mut self, clock: fn() -> NaiveDateTime) -> Self {
        self.clock = clock;
        self
    }

    fn build(&self, entity: &Entity) -> EntityInfo {
        response::build(entity, (self.clock)())
    }
}

fn utc_now() -> NaiveDateTime {
    Utc::now().naive_utc()
}

fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .cloned()
        .or_else(|| err.downcast_ref::<&str>().map(|s| s.to_string()))
        .unwrap_or_else(|| "handler panicked".to_string());
    ApiError(ResolveError::Internal(detail)).into_response()
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(routes::welcome))
        .route("/info", get(routes::info))
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use chrono::NaiveDate;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use tginfo_core::{
        domain::{ChatKind, ResolvedChat, ResolvedUser},
        errors::LookupError,
    };

    use super::*;

    struct FakeLookup {
        user: Result<ResolvedUser, LookupError>,
        chat: Result<ResolvedChat, LookupError>,
        seen: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl EntityLookup for FakeLookup {
        async fn lookup_user_or_bot(&self, handle: &str) -> Result<ResolvedUser, LookupError> {
            self.seen.lock().unwrap().push(handle.to_string());
            self.user.clone()
        }

        async fn lookup_chat(&self, _handle: &str) -> Result<ResolvedChat, LookupError> {
            self.chat.clone()
        }
    }

    fn fixed_now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2015, 10, 3)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    fn app(
        user: Result<ResolvedUser, LookupError>,
        chat: Result<ResolvedChat, LookupError>,
    ) -> (Router, Arc<FakeLookup>) {
        let fake = Arc::new(FakeLookup {
            user,
            chat,
            seen: Mutex::new(Vec::new()),
        });
        let state = AppState::new(fake.clone()).with_clock(fixed_now);
        (router(state), fake)
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
        let resp = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = resp.status();
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn info_bot() -> ResolvedUser {
        ResolvedUser {
            id: 100_000_000,
            first_name: "Info".to_string(),
            username: Some("info_bot".to_string()),
            is_bot: true,
            dc_id: Some(7),
            ..Default::default()
        }
    }

    fn channel() -> ResolvedChat {
        ResolvedChat {
            id: -1001234567890,
            title: Some("News".to_string()),
            kind: ChatKind::Channel,
            members_count: None,
            dc_id: Some(1),
        }
    }

    #[tokio::test]
    async fn welcome_describes_usage() {
        let (router, _) = app(Ok(info_bot()), Ok(channel()));
        let (status, body) = get_json(router, "/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["usage"]["endpoint"], "/info");
        assert_eq!(body["usage"]["query_param"], "username");
        assert_eq!(body["usage"]["examples"].as_array().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn missing_or_empty_username_is_400() {
        for uri in ["/info", "/info?username="] {
            let (router, fake) = app(Ok(info_bot()), Ok(channel()));
            let (status, body) = get_json(router, uri).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
            assert_eq!(body, json!({"error": "Username parameter is required"}));
            assert!(fake.seen.lock().unwrap().is_empty());
        }
    }

    #[tokio::test]
    async fn bot_summary() {
        let (router, fake) = app(Ok(info_bot()), Ok(channel()));
        let (status, body) = get_json(router, "/info?username=https://t.me/info_bot").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({
                "type": "bot",
                "full_name": "Info ",
                "id": 100_000_000,
                "username": "@info_bot",
                "context_id": 100_000_000,
                "data_center": "7 (FRA, Frankfurt, Germany, DE)",
                "premium": "No",
                "verified": "No",
                "flags": "Clean",
                "status": "Unknown",
                "account_created_on": "August 01, 2013",
                "account_age": "2 years, 2 months, 2 days"
            })
        );
        assert_eq!(*fake.seen.lock().unwrap(), vec!["info_bot".to_string()]);
    }

    #[tokio::test]
    async fn unknown_handle_is_404() {
        let (router, _) = app(Err(LookupError::NotOccupied), Err(LookupError::NotOccupied));
        let (status, body) = get_json(router, "/info?username=@ghost").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"error": "Username '@ghost' does not exist"}));
    }

    #[tokio::test]
    async fn channel_fallback_without_member_count() {
        let (router, _) = app(Err(LookupError::PeerOrChannelInvalid), Ok(channel()));
        let (status, body) = get_json(router, "/info?username=t.me/news").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["type"], "channel");
        assert_eq!(body["type_description"], "Channel");
        assert_eq!(body["member_count"], "Unknown");
        assert_eq!(body["title"], "News");
        assert_eq!(body["data_center"], "1 (MIA, Miami, USA, US)");
    }

    #[tokio::test]
    async fn permission_errors_are_403() {
        let (user_denied, _) = app(Err(LookupError::Other("boom".to_string())), Ok(channel()));
        let (status, body) = get_json(user_denied, "/info?username=someone").await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(
            body,
            json!({"error": "Looks Like I Don't Have Control Over The User"})
        );

        let (chat_denied, _) = app(
            Err(LookupError::NotOccupied),
            Err(LookupError::PeerOrChannelInvalid),
        );
        let (status, _) = get_json(chat_denied, "/info?username=hidden").await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn unclassified_chat_failure_is_500() {
        let (router, _) = app(
            Err(LookupError::NotOccupied),
            Err(LookupError::Other("telegram error: timed out".to_string())),
        );
        let (status, body) = get_json(router, "/info?username=slow").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"error": "telegram error: timed out"}));
    }

    #[tokio::test]
    async fn repeated_username_uses_the_first_value() {
        let (router, fake) = app(Ok(info_bot()), Ok(channel()));
        let (status, body) = get_json(router, "/info?username=first&username=second").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["type"], "bot");
        assert_eq!(*fake.seen.lock().unwrap(), vec!["first".to_string()]);
    }

    #[test]
    fn panics_become_generic_500() {
        let resp = panic_response(Box::new("secret detail"));
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
