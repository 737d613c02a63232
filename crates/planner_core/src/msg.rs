use crate::{FieldName, RequestId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Page loaded at `location` (absolute URL or path with query).
    Bootstrap { location: String },
    /// User changed the content of an editable surface.
    FieldEdited { field: FieldName, text: String },
    /// Rename an external (whole trimmed line is the key).
    ReplaceExternal { old_name: String, new_name: String },
    /// Rename a target, keeping its amount.
    ReplaceTarget { old_name: String, new_name: String },
    /// Rename a recipe, dropping its machine selection.
    ReplaceRecipe { old_name: String, new_name: String },
    /// Select a machine for a recipe.
    ReplaceRecipeMachine { recipe_name: String, machine: String },
    AppendRecipe { name: String },
    AppendExternal { name: String },
    /// Plan endpoint answered; `markup` is inserted verbatim.
    PlanLoaded { request_id: RequestId, markup: String },
    /// Plan fetch failed before producing a response.
    PlanFailed { request_id: RequestId, reason: String },
}

impl Msg {
    /// Field whose current lines this message rewrites, if any.
    pub fn edited_field(&self) -> Option<FieldName> {
        match self {
            Msg::ReplaceExternal { .. } | Msg::AppendExternal { .. } => Some(FieldName::Externals),
            Msg::ReplaceTarget { .. } => Some(FieldName::Targets),
            Msg::ReplaceRecipe { .. }
            | Msg::ReplaceRecipeMachine { .. }
            | Msg::AppendRecipe { .. } => Some(FieldName::Recipes),
            Msg::Bootstrap { .. }
            | Msg::FieldEdited { .. }
            | Msg::PlanLoaded { .. }
            | Msg::PlanFailed { .. } => None,
        }
    }
}
