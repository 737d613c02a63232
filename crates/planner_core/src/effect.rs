use crate::{FieldName, HistoryMode, RequestId};

/// Side effects requested by [`crate::update`]; the host executes them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Overwrite an editable surface with programmatically edited text.
    SetFieldText { field: FieldName, text: String },
    /// Write the address bar, e.g. `/?target=a`.
    WriteLocation { path: String, mode: HistoryMode },
    /// Fetch the plan fragment, e.g. `/plan?target=a`.
    FetchPlan { request_id: RequestId, path: String },
    /// Replace the whole plan region with backend markup, inserted verbatim.
    ReplacePlan { markup: String },
}
