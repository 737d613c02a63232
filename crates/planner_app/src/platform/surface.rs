//! Capabilities the controller needs from the page it runs in.

use std::sync::mpsc;

use planner_core::{FieldName, HistoryMode, Msg, SyncStatus};

/// Work queued for the controller by the page or the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inbound {
    /// The user changed a field; its text is read back from the surface.
    FieldChanged(FieldName),
    Msg(Msg),
}

/// Handed to the page so it can report field changes and UI affordances
/// (rename proposals, machine selection) to the controller.
#[derive(Debug, Clone)]
pub struct FieldChangeNotifier {
    tx: mpsc::Sender<Inbound>,
}

impl FieldChangeNotifier {
    pub(crate) fn new(tx: mpsc::Sender<Inbound>) -> Self {
        Self { tx }
    }

    pub fn field_changed(&self, field: FieldName) {
        let _ = self.tx.send(Inbound::FieldChanged(field));
    }

    pub fn propose(&self, msg: Msg) {
        let _ = self.tx.send(Inbound::Msg(msg));
    }
}

/// The page: three editable fields, the address bar and the plan region.
pub trait PageSurface {
    fn field_text(&self, field: FieldName) -> String;

    /// Programmatic write; must not report a change back to the notifier.
    fn set_field_text(&mut self, field: FieldName, text: &str);

    fn on_field_change(&mut self, field: FieldName, notifier: FieldChangeNotifier);

    fn write_location(&mut self, path: &str, mode: HistoryMode);

    fn replace_plan(&mut self, markup: &str);

    fn show_status(&mut self, _status: SyncStatus, _last_failure: Option<&str>) {}
}
