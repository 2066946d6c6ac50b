pub mod conversations;
pub mod health;
pub mod router;
pub mod state;

pub use router::router;
pub use state::{AppState, AppStateInner};
