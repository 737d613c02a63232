use crate::sync::{Completion, Synchronizer};
use crate::view_model::{AppViewModel, SyncStatus};
use crate::{Effect, FieldName, FieldState, HistoryMode, RequestId, SyncPhase};

/// Session state of the page controller.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    fields: FieldState,
    sync: Synchronizer,
    plan_markup: Option<String>,
    last_failure: Option<String>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fields(&self) -> &FieldState {
        &self.fields
    }

    pub fn sync_phase(&self) -> SyncPhase {
        self.sync.phase()
    }

    pub fn is_idle(&self) -> bool {
        self.sync.is_idle()
    }

    pub fn view(&self) -> AppViewModel {
        let status = match self.sync.phase() {
            SyncPhase::Idle => SyncStatus::Idle,
            SyncPhase::InFlight { pending: false, .. } => SyncStatus::Loading,
            SyncPhase::InFlight { pending: true, .. } => SyncStatus::LoadingWithPending,
        };
        AppViewModel {
            targets: self.fields.text(FieldName::Targets).to_owned(),
            recipes: self.fields.text(FieldName::Recipes).to_owned(),
            externals: self.fields.text(FieldName::Externals).to_owned(),
            plan_markup: self.plan_markup.clone(),
            status,
            last_failure: self.last_failure.clone(),
            dirty: self.dirty,
        }
    }

    /// Returns whether the view changed since the last call, and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn replace_fields(&mut self, fields: FieldState) {
        self.fields = fields;
        self.mark_dirty();
    }

    pub(crate) fn set_field_text(&mut self, field: FieldName, text: String) {
        self.fields.set_text(field, text);
        self.mark_dirty();
    }

    /// Rewrites the lines of one field and returns the effect that shows the
    /// new text on the field's surface.
    pub(crate) fn edit_lines<F>(&mut self, field: FieldName, edit: F) -> Effect
    where
        F: FnOnce(&[String]) -> Vec<String>,
    {
        let current = self.fields.lines(field);
        let lines = edit(current.as_slice());
        self.fields.set_lines(field, &lines);
        self.mark_dirty();
        Effect::SetFieldText {
            field,
            text: self.fields.text(field).to_owned(),
        }
    }

    pub(crate) fn request_sync(&mut self, mode: HistoryMode) -> Vec<Effect> {
        let effects = self.sync.request(&self.fields, mode);
        self.mark_dirty();
        effects
    }

    /// Frees the fetch slot for `request_id`. Returns `None` for a stale
    /// completion, otherwise whether a follow-up sync is owed.
    pub(crate) fn settle(&mut self, request_id: RequestId) -> Option<bool> {
        match self.sync.complete(request_id) {
            Completion::Settled { follow_up } => {
                self.mark_dirty();
                Some(follow_up)
            }
            Completion::Stale => None,
        }
    }

    pub(crate) fn show_plan(&mut self, markup: String) {
        self.plan_markup = Some(markup);
        self.last_failure = None;
    }

    pub(crate) fn record_failure(&mut self, reason: String) {
        self.last_failure = Some(reason);
    }
}
