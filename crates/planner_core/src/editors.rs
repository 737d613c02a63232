//! Find-and-replace helpers for single logical entries of a field.
//!
//! Each helper matches lines by their identity key (trimmed) and rewrites
//! only those lines. Other lines are returned byte-for-byte, and the line
//! count and order never change.

/// A line of the targets field: `<name>` or `<name>:<amount>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TargetEntry<'a> {
    pub name: &'a str,
    pub amount: Option<&'a str>,
}

impl<'a> TargetEntry<'a> {
    pub fn parse(line: &'a str) -> Self {
        match line.split_once(':') {
            Some((name, amount)) => Self {
                name: name.trim(),
                amount: Some(amount),
            },
            None => Self {
                name: line.trim(),
                amount: None,
            },
        }
    }
}

/// A line of the recipes field: `<name>` or `<name>@<machine>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecipeEntry<'a> {
    pub name: &'a str,
    pub machine: Option<&'a str>,
}

impl<'a> RecipeEntry<'a> {
    pub fn parse(line: &'a str) -> Self {
        match line.split_once('@') {
            Some((name, machine)) => Self {
                name: name.trim(),
                machine: Some(machine),
            },
            None => Self {
                name: line.trim(),
                machine: None,
            },
        }
    }
}

fn rewrite<F>(lines: &[String], mut replacement: F) -> Vec<String>
where
    F: FnMut(&str) -> Option<String>,
{
    lines
        .iter()
        .map(|line| replacement(line.as_str()).unwrap_or_else(|| line.clone()))
        .collect()
}

pub fn replace_external_entry(lines: &[String], old_name: &str, new_name: &str) -> Vec<String> {
    rewrite(lines, |line| (line.trim() == old_name).then(|| new_name.to_owned()))
}

/// Renames a target, keeping its amount (trimmed) when one was given.
pub fn replace_target_entry(lines: &[String], old_name: &str, new_name: &str) -> Vec<String> {
    rewrite(lines, |line| {
        let entry = TargetEntry::parse(line);
        (entry.name == old_name).then(|| match entry.amount {
            Some(amount) => format!("{new_name}:{}", amount.trim()),
            None => new_name.to_owned(),
        })
    })
}

/// Renames a recipe. The machine selection of a renamed line is dropped.
pub fn replace_recipe_entry(lines: &[String], old_name: &str, new_name: &str) -> Vec<String> {
    rewrite(lines, |line| {
        (RecipeEntry::parse(line).name == old_name).then(|| new_name.to_owned())
    })
}

/// Sets the machine selection of a recipe. The rewritten line spells the
/// recipe name as passed in, not as found in the field.
pub fn replace_recipe_machine(lines: &[String], recipe_name: &str, machine: &str) -> Vec<String> {
    rewrite(lines, |line| {
        (RecipeEntry::parse(line).name == recipe_name)
            .then(|| format!("{recipe_name}@{machine}"))
    })
}

/// Appends `name` as a new last line. Duplicates are kept.
pub fn append_entry(lines: &[String], name: &str) -> Vec<String> {
    let mut appended = Vec::with_capacity(lines.len() + 1);
    appended.extend_from_slice(lines);
    appended.push(name.to_owned());
    appended
}
