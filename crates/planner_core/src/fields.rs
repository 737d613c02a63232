use std::fmt;

use crate::codec::QueryParameters;

/// One of the three editable surfaces of the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FieldName {
    Targets,
    Recipes,
    Externals,
}

impl FieldName {
    /// All fields in canonical encode order.
    pub const ALL: [FieldName; 3] = [FieldName::Targets, FieldName::Recipes, FieldName::Externals];

    /// Repeatable query key carrying this field's lines.
    pub fn query_key(self) -> &'static str {
        match self {
            FieldName::Targets => "target",
            FieldName::Recipes => "recipe",
            FieldName::Externals => "external",
        }
    }

    /// Identifier of the editable surface, as the page names it.
    pub fn surface_id(self) -> &'static str {
        match self {
            FieldName::Targets => "targets",
            FieldName::Recipes => "recipes",
            FieldName::Externals => "externals",
        }
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.surface_id())
    }
}

/// Text content of the three fields.
///
/// Each field is stored as the raw multi-line blob the surface shows; the
/// line view is derived by splitting on `\n`, so an empty field reads as a
/// single empty line.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldState {
    targets: String,
    recipes: String,
    externals: String,
}

impl FieldState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds every field from decoded query parameters. A missing key leaves
    /// the field empty.
    pub fn from_parameters(parameters: &QueryParameters) -> Self {
        let mut fields = Self::new();
        for field in FieldName::ALL {
            fields.set_text(field, parameters.values(field.query_key()).join("\n"));
        }
        fields
    }

    pub fn text(&self, field: FieldName) -> &str {
        match field {
            FieldName::Targets => &self.targets,
            FieldName::Recipes => &self.recipes,
            FieldName::Externals => &self.externals,
        }
    }

    pub fn set_text(&mut self, field: FieldName, text: impl Into<String>) {
        let slot = match field {
            FieldName::Targets => &mut self.targets,
            FieldName::Recipes => &mut self.recipes,
            FieldName::Externals => &mut self.externals,
        };
        *slot = text.into();
    }

    pub fn lines(&self, field: FieldName) -> Vec<String> {
        self.text(field).split('\n').map(ToOwned::to_owned).collect()
    }

    pub fn set_lines(&mut self, field: FieldName, lines: &[String]) {
        self.set_text(field, lines.join("\n"));
    }
}
