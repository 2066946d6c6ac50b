use std::time::Duration;

use axum::{Router, routing::get};
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::conversations;
use crate::health;
use crate::state::AppState;

pub fn router(state: AppState, request_timeout: Duration) -> Router {
    let probes = Router::new()
        .route("/healthz", get(health::healthz))
        .route("/readyz", get(health::readyz));

    let conversation_routes = Router::new()
        .route("/conversations", get(conversations::list_conversations))
        .route("/conversations/{conversation_id}", get(conversations::get_conversation));

    Router::new()
        .merge(probes)
        .merge(conversation_routes)
        .layer(TimeoutLayer::new(request_timeout))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::path::PathBuf;
    use std::sync::{Arc, mpsc};
    use std::thread;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use chrono::{DateTime, TimeZone, Utc};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use zyntra_db::Database;
    use zyntra_types::api::{HealthResponse, ReadinessResponse};
    use zyntra_types::models::Conversation;
    use zyntra_types::sample::chat_conversations;

    use crate::state::AppStateInner;

    struct TestDb {
        path: PathBuf,
        db: Arc<Database>,
    }

    impl TestDb {
        fn new() -> Self {
            let path = std::env::temp_dir().join(format!("zyntra-api-{}.db", uuid::Uuid::new_v4()));
            let db = Arc::new(Database::open(&path, 1).unwrap());
            Self { path, db }
        }
    }

    impl Drop for TestDb {
        fn drop(&mut self) {
            for ext in ["", "-wal", "-shm"] {
                let _ = std::fs::remove_file(format!("{}{ext}", self.path.display()));
            }
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap()
    }

    fn app(test_db: &TestDb, ready_timeout: Duration) -> Router {
        let mut inner = AppStateInner::new(test_db.db.clone(), "test".into(), chat_conversations(now()));
        inner.ready_timeout = ready_timeout;
        router(Arc::new(inner), Duration::from_secs(5))
    }

    async fn fetch(app: Router, uri: &str) -> (StatusCode, Vec<u8>) {
        let response = app
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, body.to_vec())
    }

    #[tokio::test]
    async fn healthz_reports_environment() {
        let db = TestDb::new();
        let (status, body) = fetch(app(&db, AppStateInner::DEFAULT_READY_TIMEOUT), "/healthz").await;
        assert_eq!(status, StatusCode::OK);

        let health: HealthResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(health.status, "ok");
        assert_eq!(health.environment, "test");
        assert!(DateTime::parse_from_rfc3339(&health.timestamp).is_ok());
        assert!(health.timestamp.ends_with('Z'));
    }

    #[tokio::test]
    async fn readyz_ok_when_database_answers() {
        let db = TestDb::new();
        let (status, body) = fetch(app(&db, AppStateInner::DEFAULT_READY_TIMEOUT), "/readyz").await;
        assert_eq!(status, StatusCode::OK);

        let ready: ReadinessResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(ready, ReadinessResponse::ready());
        let raw: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert!(raw.get("error").is_none());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn readyz_degraded_when_ping_stalls() {
        let db = TestDb::new();
        let app = app(&db, Duration::from_millis(50));

        // Park the only reader so the ping cannot get a connection in time.
        let (locked_tx, locked_rx) = mpsc::channel();
        let blocker_db = db.db.clone();
        let blocker = thread::spawn(move || {
            blocker_db
                .with_conn(|_| {
                    locked_tx.send(()).unwrap();
                    thread::sleep(Duration::from_millis(500));
                    Ok(())
                })
                .unwrap();
        });
        locked_rx.recv().unwrap();

        let (status, body) = fetch(app, "/readyz").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        let ready: ReadinessResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(ready, ReadinessResponse::degraded("database_unavailable"));

        blocker.join().unwrap();
    }

    #[tokio::test]
    async fn conversations_lists_frozen_snapshot() {
        let db = TestDb::new();
        let (status, body) = fetch(app(&db, AppStateInner::DEFAULT_READY_TIMEOUT), "/conversations").await;
        assert_eq!(status, StatusCode::OK);

        let listed: Vec<Conversation> = serde_json::from_slice(&body).unwrap();
        assert_eq!(listed, chat_conversations(now()));
    }

    #[tokio::test]
    async fn conversation_by_id() {
        let db = TestDb::new();
        let (status, body) = fetch(app(&db, AppStateInner::DEFAULT_READY_TIMEOUT), "/conversations/5").await;
        assert_eq!(status, StatusCode::OK);

        let eva: Conversation = serde_json::from_slice(&body).unwrap();
        assert_eq!(eva.name, "Eva Fernandes");
        assert_eq!(eva.unread_count(), 3);
    }

    #[tokio::test]
    async fn unknown_conversation_is_404() {
        let db = TestDb::new();
        let (status, _) = fetch(app(&db, AppStateInner::DEFAULT_READY_TIMEOUT), "/conversations/42").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn non_numeric_conversation_id_is_rejected() {
        let db = TestDb::new();
        let (status, _) = fetch(app(&db, AppStateInner::DEFAULT_READY_TIMEOUT), "/conversations/abc").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
