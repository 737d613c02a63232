//! Plan sync core: pure state machine, query codec and line editors.
pub mod codec;
pub mod editors;
mod effect;
mod fields;
mod msg;
mod state;
mod sync;
mod update;
mod view_model;

pub use codec::{canonical_query, QueryParameters};
pub use effect::Effect;
pub use fields::{FieldName, FieldState};
pub use msg::Msg;
pub use state::AppState;
pub use sync::{Completion, HistoryMode, RequestId, SyncPhase, Synchronizer};
pub use update::update;
pub use view_model::{AppViewModel, SyncStatus};
