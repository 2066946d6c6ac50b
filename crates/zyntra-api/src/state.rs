use std::sync::Arc;
use std::time::Duration;

use zyntra_db::Database;
use zyntra_types::models::Conversation;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub db: Arc<Database>,
    pub environment: String,
    /// Built once at startup and never refreshed.
    pub conversations: Vec<Conversation>,
    /// Upper bound on the readiness database ping.
    pub ready_timeout: Duration,
}

impl AppStateInner {
    pub const DEFAULT_READY_TIMEOUT: Duration = Duration::from_secs(2);

    pub fn new(db: Arc<Database>, environment: String, conversations: Vec<Conversation>) -> Self {
        Self {
            db,
            environment,
            conversations,
            ready_timeout: Self::DEFAULT_READY_TIMEOUT,
        }
    }
}
