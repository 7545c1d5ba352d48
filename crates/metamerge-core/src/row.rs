use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::fields;

/// A single cell of a canonical row.
///
/// Serialized untagged so a persisted row is a flat JSON object of scalars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(f64),
    Text(String),
    Null,
}

impl FieldValue {
    /// `Null`, or text that is empty after trimming.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        match self {
            FieldValue::Null => true,
            FieldValue::Text(s) => s.trim().is_empty(),
            FieldValue::Number(_) => false,
        }
    }

    /// Text rendering of the value. Integral numbers render without a
    /// fractional part, so `123.0` becomes `"123"`.
    #[must_use]
    pub fn to_text(&self) -> Option<String> {
        match self {
            FieldValue::Null => None,
            FieldValue::Text(s) => Some(s.clone()),
            FieldValue::Number(n) => Some(n.to_string()),
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(FieldValue::Null, Into::into)
    }
}

impl std::fmt::Display for FieldValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldValue::Null => Ok(()),
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Number(n) => write!(f, "{n}"),
        }
    }
}

/// One post, keyed by canonical field name. Unknown columns are kept under
/// their source header.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CanonicalRow(BTreeMap<String, FieldValue>);

impl CanonicalRow {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, returning the one it replaced.
    pub fn insert(
        &mut self,
        field: impl Into<String>,
        value: impl Into<FieldValue>,
    ) -> Option<FieldValue> {
        self.0.insert(field.into(), value.into())
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.0.get(field)
    }

    pub fn remove(&mut self, field: &str) -> Option<FieldValue> {
        self.0.remove(field)
    }

    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Non-blank text of a field, numbers rendered as text.
    #[must_use]
    pub fn text(&self, field: &str) -> Option<String> {
        self.0
            .get(field)
            .filter(|v| !v.is_blank())
            .and_then(FieldValue::to_text)
    }

    /// True when the field is absent or blank.
    #[must_use]
    pub fn is_blank(&self, field: &str) -> bool {
        self.0.get(field).is_none_or(FieldValue::is_blank)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FieldValue)> {
        self.0.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&String, &mut FieldValue)> {
        self.0.iter_mut()
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<FieldValue>> FromIterator<(K, V)> for CanonicalRow {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl IntoIterator for CanonicalRow {
    type Item = (String, FieldValue);
    type IntoIter = std::collections::btree_map::IntoIter<String, FieldValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Look up a canonical field, falling back to the legacy names older
/// datasets were stored under. Blank values are skipped.
#[must_use]
pub fn lookup<'a>(row: &'a CanonicalRow, canonical: &str) -> Option<&'a FieldValue> {
    std::iter::once(canonical)
        .chain(fields::legacy_aliases_for(canonical).map(|alias| -> &str { alias }))
        .filter_map(|key| row.get(key))
        .find(|v| !v.is_blank())
}

#[cfg(test)]
#[path = "row_test.rs"]
mod tests;
