//! Client-side synchronization: the store, the poll scheduler and the
//! per-coin history views.

pub mod history;
pub mod retry;
pub mod scheduler;
pub mod state;
pub mod store;

pub use history::{FailureKind, HistoryView, HistoryViewState};
pub use retry::RetryPolicy;
pub use scheduler::{PollScheduler, PollState, PollStatus};
pub use state::SyncState;
pub use store::SyncStore;
