//! In-memory page used by the binary and by tests.

use std::collections::BTreeMap;

use planner_core::{FieldName, FieldState, HistoryMode, SyncStatus};

use super::surface::{FieldChangeNotifier, PageSurface};

#[derive(Debug, Default)]
pub struct HeadlessPage {
    fields: FieldState,
    history: Vec<String>,
    plan_markup: String,
    status: SyncStatus,
    last_failure: Option<String>,
    listeners: BTreeMap<FieldName, FieldChangeNotifier>,
}

impl HeadlessPage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulates the user replacing the content of a field.
    pub fn type_text(&mut self, field: FieldName, text: &str) {
        self.fields.set_text(field, text);
        if let Some(listener) = self.listeners.get(&field) {
            listener.field_changed(field);
        }
    }

    /// Current address, `None` before the first write.
    pub fn location(&self) -> Option<&str> {
        self.history.last().map(String::as_str)
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub fn plan_markup(&self) -> &str {
        &self.plan_markup
    }

    pub fn status(&self) -> SyncStatus {
        self.status
    }

    pub fn last_failure(&self) -> Option<&str> {
        self.last_failure.as_deref()
    }
}

impl PageSurface for HeadlessPage {
    fn field_text(&self, field: FieldName) -> String {
        self.fields.text(field).to_owned()
    }

    fn set_field_text(&mut self, field: FieldName, text: &str) {
        self.fields.set_text(field, text);
    }

    fn on_field_change(&mut self, field: FieldName, notifier: FieldChangeNotifier) {
        self.listeners.insert(field, notifier);
    }

    fn write_location(&mut self, path: &str, mode: HistoryMode) {
        if mode == HistoryMode::Replace {
            if let Some(current) = self.history.last_mut() {
                *current = path.to_owned();
                return;
            }
        }
        self.history.push(path.to_owned());
    }

    fn replace_plan(&mut self, markup: &str) {
        self.plan_markup = markup.to_owned();
    }

    fn show_status(&mut self, status: SyncStatus, last_failure: Option<&str>) {
        self.status = status;
        self.last_failure = last_failure.map(ToOwned::to_owned);
    }
}
