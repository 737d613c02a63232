//! Request coalescing: at most one plan fetch in flight, and at most one
//! follow-up queued behind it.

use planner_logging::{planner_debug, planner_info, planner_warn};

use crate::codec::{canonical_query, location_path, plan_path};
use crate::{Effect, FieldState};

/// Identifier of a dispatched plan fetch. Ids increase by one per fetch,
/// starting at 1.
pub type RequestId = u64;

/// How a synchronization writes the address bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HistoryMode {
    /// Overwrite the current history entry (initial load).
    Replace,
    /// Add a new history entry (every later edit).
    #[default]
    Push,
}

/// State of the single fetch slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyncPhase {
    #[default]
    Idle,
    InFlight {
        request_id: RequestId,
        /// Set when a sync was requested while this fetch was running.
        pending: bool,
    },
}

/// Result of applying a fetch completion to the slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// The completion belongs to the running fetch; the slot is free again.
    Settled { follow_up: bool },
    /// The completion does not match the running fetch and was ignored.
    Stale,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Synchronizer {
    phase: SyncPhase,
    next_request_id: RequestId,
}

impl Default for Synchronizer {
    fn default() -> Self {
        Self {
            phase: SyncPhase::Idle,
            next_request_id: 1,
        }
    }
}

impl Synchronizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> SyncPhase {
        self.phase
    }

    pub fn is_idle(&self) -> bool {
        self.phase == SyncPhase::Idle
    }

    /// Requests a synchronization of `fields`.
    ///
    /// When idle, claims the slot and returns the address-bar write and the
    /// plan fetch for the fields as they are right now. While a fetch runs,
    /// only marks a follow-up as pending and returns no effects.
    pub fn request(&mut self, fields: &FieldState, mode: HistoryMode) -> Vec<Effect> {
        if let SyncPhase::InFlight {
            request_id,
            ref mut pending,
        } = self.phase
        {
            planner_debug!("sync coalesced behind request {request_id}");
            *pending = true;
            return Vec::new();
        }

        let request_id = self.next_request_id;
        self.next_request_id += 1;
        self.phase = SyncPhase::InFlight {
            request_id,
            pending: false,
        };

        let query = canonical_query(fields);
        planner_info!(
            "dispatching plan request {request_id} mode={mode:?} query_len={}",
            query.len()
        );
        vec![
            Effect::WriteLocation {
                path: location_path(&query),
                mode,
            },
            Effect::FetchPlan {
                request_id,
                path: plan_path(&query),
            },
        ]
    }

    /// Releases the slot if `request_id` is the running fetch. Success and
    /// failure are treated alike so the slot can never stay occupied.
    pub fn complete(&mut self, request_id: RequestId) -> Completion {
        match self.phase {
            SyncPhase::InFlight {
                request_id: running,
                pending,
            } if running == request_id => {
                self.phase = SyncPhase::Idle;
                Completion::Settled { follow_up: pending }
            }
            phase => {
                planner_warn!("ignoring completion of request {request_id} while {phase:?}");
                Completion::Stale
            }
        }
    }
}
