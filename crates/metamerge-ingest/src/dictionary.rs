use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::defaults::DEFAULT_MAPPINGS;
use crate::error::IngestError;
use crate::normalize::normalize;

/// One user-defined header mapping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingOverride {
    pub raw: String,
    pub canonical: String,
}

/// The user's changes on top of the built-in mappings, as persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingOverrides {
    #[serde(default)]
    pub set: Vec<MappingOverride>,
    #[serde(default)]
    pub removed: Vec<String>,
}

impl MappingOverrides {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.set.is_empty() && self.removed.is_empty()
    }
}

/// Mapping from raw source headers to canonical field names.
///
/// Headers are matched on their [`normalize`]d form. The normalized index and
/// the reverse index are rebuilt on every mutation and [`generation`] is
/// bumped, so anything derived from an earlier state can detect staleness.
///
/// [`generation`]: FieldDictionary::generation
#[derive(Debug, Clone)]
pub struct FieldDictionary {
    entries: Vec<(String, String)>,
    overrides: MappingOverrides,
    index: HashMap<String, usize>,
    reverse: HashMap<String, usize>,
    generation: u64,
}

impl Default for FieldDictionary {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl FieldDictionary {
    /// Dictionary seeded with the built-in mappings only.
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut dictionary = Self {
            entries: default_entries(),
            overrides: MappingOverrides::default(),
            index: HashMap::new(),
            reverse: HashMap::new(),
            generation: 0,
        };
        dictionary.rebuild();
        dictionary
    }

    /// Built-in mappings with a persisted override document applied.
    ///
    /// # Errors
    ///
    /// Returns [`IngestError::Validation`] or [`IngestError::MappingConflict`]
    /// if an override no longer applies cleanly to the built-in mappings.
    pub fn with_overrides(overrides: &MappingOverrides) -> Result<Self, IngestError> {
        let mut dictionary = Self::with_defaults();
        for raw in &overrides.removed {
            dictionary.remove(raw);
        }
        for entry in &overrides.set {
            dictionary.set_override(&entry.raw, &entry.canonical)?;
        }
        dictionary.generation = 0;
        Ok(dictionary)
    }

    /// Canonical field for a raw header, or `None` when the header is unknown.
    #[must_use]
    pub fn resolve(&self, raw_header: &str) -> Option<&str> {
        self.index
            .get(&normalize(raw_header))
            .map(|&i| self.entries[i].1.as_str())
    }

    /// One raw header that maps to `canonical`: the first in precedence order.
    #[must_use]
    pub fn reverse_lookup(&self, canonical: &str) -> Option<&str> {
        self.reverse
            .get(canonical)
            .map(|&i| self.entries[i].0.as_str())
    }

    /// Map `raw_header` to `canonical`.
    ///
    /// The same literal header may be reassigned freely. A different literal
    /// that normalizes to an existing header is rejected unless it points at
    /// the same canonical field.
    ///
    /// # Errors
    ///
    /// Returns [`IngestError::Validation`] for an empty header or field name,
    /// and [`IngestError::MappingConflict`] when the header collides with a
    /// differently mapped existing entry.
    pub fn set_override(&mut self, raw_header: &str, canonical: &str) -> Result<(), IngestError> {
        let raw = raw_header.trim();
        let canonical = canonical.trim();
        let key = normalize(raw);
        if key.is_empty() {
            return Err(IngestError::Validation(
                "raw header must not be empty".to_string(),
            ));
        }
        if canonical.is_empty() {
            return Err(IngestError::Validation(format!(
                "canonical field for \"{raw}\" must not be empty"
            )));
        }

        match self.index.get(&key).copied() {
            Some(i) if self.entries[i].0 == raw => {
                self.entries[i].1 = canonical.to_string();
            }
            Some(i) if self.entries[i].1 == canonical => {}
            Some(i) => {
                return Err(IngestError::MappingConflict {
                    raw: raw.to_string(),
                    existing_raw: self.entries[i].0.clone(),
                    existing_canonical: self.entries[i].1.clone(),
                });
            }
            None => self.entries.push((raw.to_string(), canonical.to_string())),
        }

        self.overrides.set.retain(|o| normalize(&o.raw) != key);
        self.overrides.removed.retain(|r| normalize(r) != key);
        self.overrides.set.push(MappingOverride {
            raw: raw.to_string(),
            canonical: canonical.to_string(),
        });

        self.rebuild();
        self.generation += 1;
        tracing::debug!(raw, canonical, generation = self.generation, "mapping set");
        Ok(())
    }

    /// Drop the mapping for `raw_header`. Returns `false` if nothing matched.
    pub fn remove(&mut self, raw_header: &str) -> bool {
        let key = normalize(raw_header);
        let Some(i) = self.index.get(&key).copied() else {
            return false;
        };
        let (raw, _) = self.entries.remove(i);

        self.overrides.set.retain(|o| normalize(&o.raw) != key);
        let is_default = DEFAULT_MAPPINGS.iter().any(|(d, _)| normalize(d) == key);
        if is_default && !self.overrides.removed.iter().any(|r| normalize(r) == key) {
            self.overrides.removed.push(raw.clone());
        }

        self.rebuild();
        self.generation += 1;
        tracing::debug!(raw = %raw, generation = self.generation, "mapping removed");
        true
    }

    /// Discard all overrides and restore the built-in mappings.
    pub fn reset(&mut self) {
        self.entries = default_entries();
        self.overrides = MappingOverrides::default();
        self.rebuild();
        self.generation += 1;
        tracing::debug!(generation = self.generation, "mappings reset to defaults");
    }

    /// Live `(raw, canonical)` pairs in precedence order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(r, c)| (r.as_str(), c.as_str()))
    }

    /// Distinct canonical field names, in first-seen order.
    #[must_use]
    pub fn canonical_fields(&self) -> Vec<&str> {
        let mut fields: Vec<&str> = Vec::new();
        for (_, canonical) in &self.entries {
            if !fields.contains(&canonical.as_str()) {
                fields.push(canonical);
            }
        }
        fields
    }

    /// Every name a user might know `canonical` by: the reverse lookup
    /// followed by the catalogue's examples, without repeats.
    #[must_use]
    pub fn known_names(&self, canonical: &str) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        let candidates = self
            .reverse_lookup(canonical)
            .into_iter()
            .chain(metamerge_core::fields::examples(canonical).iter().copied());
        for name in candidates {
            if !names.iter().any(|n| n == name) {
                names.push(name.to_string());
            }
        }
        names
    }

    /// The override document to persist.
    #[must_use]
    pub fn overrides(&self) -> &MappingOverrides {
        &self.overrides
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn rebuild(&mut self) {
        self.index.clear();
        self.reverse.clear();
        for (i, (raw, canonical)) in self.entries.iter().enumerate() {
            self.index.entry(normalize(raw)).or_insert(i);
            self.reverse.entry(canonical.clone()).or_insert(i);
        }
    }
}

fn default_entries() -> Vec<(String, String)> {
    DEFAULT_MAPPINGS
        .iter()
        .map(|(raw, canonical)| ((*raw).to_string(), (*canonical).to_string()))
        .collect()
}

#[cfg(test)]
#[path = "dictionary_test.rs"]
mod tests;
