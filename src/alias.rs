//! Header alias table used for column detection.
//!
//! Each canonical [`Field`] carries a list of alias substrings and a list of
//! exclusion substrings. A header is a candidate for a field when its
//! lowercased text contains any alias and none of the exclusions.

use crate::field::Field;

/// Alias and exclusion substrings for a single field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldRules {
    /// Substrings that identify a header as this field.
    pub aliases: Vec<String>,
    /// Substrings that disqualify a header from this field.
    pub exclusions: Vec<String>,
}

impl FieldRules {
    /// Returns true if the lowercased header is a candidate for this field.
    pub fn matches(&self, header_lower: &str) -> bool {
        if self.is_excluded(header_lower) {
            return false;
        }
        self.aliases.iter().any(|a| header_lower.contains(a.as_str()))
    }

    /// Returns true if the lowercased header contains any exclusion.
    pub fn is_excluded(&self, header_lower: &str) -> bool {
        self.exclusions
            .iter()
            .any(|e| header_lower.contains(e.as_str()))
    }
}

/// Mapping from canonical field to its alias rules.
///
/// `AliasTable::default()` is the built-in table. `AliasTable::new()` is
/// empty and detects nothing until rules are added.
///
/// ```
/// use csv_cleanse::{AliasTable, Field};
///
/// let table = AliasTable::default()
///     .with_aliases(Field::Title, ["title", "designation"])
///     .with_exclusions(Field::Email, ["backup"]);
///
/// assert!(table.rules(Field::Title).matches("job_designation"));
/// assert!(!table.rules(Field::Email).matches("backup_email"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasTable {
    rules: [FieldRules; Field::COUNT],
}

impl Default for AliasTable {
    fn default() -> Self {
        Self::new()
            .with_aliases(
                Field::Name,
                ["name", "username", "fname", "full_name", "cnic", "studentname"],
            )
            .with_exclusions(Field::Name, ["father", "parent", "guardian"])
            .with_aliases(Field::Email, ["email", "mail", "useremail", "normalized_email"])
            .with_aliases(
                Field::Phone,
                [
                    "phone",
                    "cell",
                    "cell_no",
                    "mobile",
                    "mobile_no",
                    "contact",
                    "usermobile",
                ],
            )
            .with_aliases(
                Field::Title,
                ["title", "qualification", "program", "degree", "userprogram", "ftitle"],
            )
            .with_aliases(
                Field::Date,
                ["date", "datetime", "year", "fyear", "created", "registered"],
            )
    }
}

impl AliasTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self {
            rules: Default::default(),
        }
    }

    /// Replace the aliases for a field. Values are lowercased.
    #[must_use]
    pub fn with_aliases<I, S>(mut self, field: Field, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.rules[field.as_index()].aliases = lowercase_all(aliases);
        self
    }

    /// Replace the exclusions for a field. Values are lowercased.
    #[must_use]
    pub fn with_exclusions<I, S>(mut self, field: Field, exclusions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.rules[field.as_index()].exclusions = lowercase_all(exclusions);
        self
    }

    /// Rules for a field.
    pub fn rules(&self, field: Field) -> &FieldRules {
        &self.rules[field.as_index()]
    }
}

// Empty substrings would match every header.
fn lowercase_all<I, S>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    values
        .into_iter()
        .map(|v| v.as_ref().to_lowercase())
        .filter(|v| !v.is_empty())
        .collect()
}
