//! Column detection: binding raw headers to canonical fields.

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::alias::AliasTable;
use crate::field::Field;

/// Mapping from canonical field to the header chosen to supply it.
///
/// Built once per dataset and never modified afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnMap {
    columns: [Option<String>; Field::COUNT],
}

impl ColumnMap {
    /// Header bound to the field, if any.
    pub fn get(&self, field: Field) -> Option<&str> {
        self.columns[field.as_index()].as_deref()
    }

    /// Returns true if no field was bound.
    pub fn is_empty(&self) -> bool {
        self.columns.iter().all(Option::is_none)
    }

    /// Number of bound fields.
    pub fn len(&self) -> usize {
        self.columns.iter().filter(|c| c.is_some()).count()
    }

    /// Iterate bound fields in detection order.
    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        Field::ALL
            .into_iter()
            .filter_map(|f| self.get(f).map(|h| (f, h)))
    }

    fn bind(&mut self, field: Field, header: &str) {
        self.columns[field.as_index()] = Some(header.to_string());
    }
}

impl Serialize for ColumnMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (field, header) in self.iter() {
            map.serialize_entry(field.as_str(), header)?;
        }
        map.end()
    }
}

/// Detect which headers supply each canonical field.
///
/// Fields are resolved one at a time in [`Field::ALL`] order. For each field
/// the headers are scanned in their original order and the first header whose
/// lowercased text contains an alias (and no exclusion) wins. Empty headers are
/// never bound. A header already chosen for one field may still be chosen for
/// a later one.
pub fn detect_columns<S: AsRef<str>>(headers: &[S], aliases: &AliasTable) -> ColumnMap {
    let lowered: Vec<(&str, String)> = headers
        .iter()
        .map(|h| h.as_ref())
        .filter(|h| !h.is_empty())
        .map(|h| (h, h.to_lowercase()))
        .collect();

    let mut map = ColumnMap::default();
    for field in Field::ALL {
        let rules = aliases.rules(field);
        if let Some((header, _)) = lowered.iter().find(|(_, lower)| rules.matches(lower)) {
            tracing::debug!(field = %field, header = %header, "bound column");
            map.bind(field, header);
        }
    }
    map
}
