// src/scheme/mod.rs

// --- Imports ---
use std::collections::HashMap;

use scraper::Selector;
use serde::Serialize;

use crate::utils::error::SchemeError;

/// Reserved label for the career-aggregate bucket.
pub const CAREER: &str = "Career";

/// Name of the field every scheme must declare; its selector locates the
/// season label cell inside a stats row.
pub const SEASON_FIELD: &str = "season";

/// How a raw cell value degrades when it is absent or unparsable.
///
/// Counting stats are genuinely unrecorded in some eras, so they degrade to
/// `Missing`. Percentage-of-time-at-position fields are always present with
/// an implicit zero and degrade to `0` instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CoercePolicy {
    Int,
    Float,
    IntZeroDefault,
    Text,
}

/// One declared field: a logical name, a CSS selector resolved against a
/// season fragment, an element index for disambiguation when several cells
/// share a selector (e.g. pitching vs. batting home runs), and the coercion
/// policy applied at read time.
#[derive(Debug, Clone)]
pub struct FieldSpec {
    name: String,
    selector: String,
    compiled: Selector,
    element_index: usize,
    policy: CoercePolicy,
}

impl FieldSpec {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn selector(&self) -> &str {
        &self.selector
    }

    pub(crate) fn compiled(&self) -> &Selector {
        &self.compiled
    }

    pub fn element_index(&self) -> usize {
        self.element_index
    }

    pub fn policy(&self) -> CoercePolicy {
        self.policy
    }
}

/// Static mapping from logical field name to markup selector, supplied once
/// per sport. Validated up front so that every downstream lookup of a
/// declared field is infallible: unknown names are a programmer error, not a
/// runtime "not found".
#[derive(Debug, Clone)]
pub struct Scheme {
    fields: Vec<FieldSpec>,
    by_name: HashMap<String, usize>,
}

impl Scheme {
    pub fn builder() -> SchemeBuilder {
        SchemeBuilder { entries: Vec::new() }
    }

    /// Declared fields in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = &FieldSpec> {
        self.fields.iter()
    }

    /// Look up a declared field. An unknown name indicates a contract
    /// violation between the caller and its scheme and is surfaced loudly.
    pub fn field(&self, name: &str) -> Result<&FieldSpec, SchemeError> {
        self.by_name
            .get(name)
            .map(|&i| &self.fields[i])
            .ok_or_else(|| SchemeError::UnknownField(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

struct Entry {
    name: String,
    selector: String,
    element_index: usize,
    policy: CoercePolicy,
}

/// Builds and validates a [`Scheme`].
///
/// Validation happens in `build()`: selectors must compile, field names must
/// be unique (so every exported field name maps to a distinct backing value),
/// and the `season` field must be declared.
pub struct SchemeBuilder {
    entries: Vec<Entry>,
}

impl SchemeBuilder {
    /// Declare a field matched by the first element the selector yields.
    pub fn field(self, name: &str, selector: &str, policy: CoercePolicy) -> Self {
        self.indexed_field(name, selector, 0, policy)
    }

    /// Declare a field read from the element at `element_index` among the
    /// selector's matches.
    pub fn indexed_field(
        mut self,
        name: &str,
        selector: &str,
        element_index: usize,
        policy: CoercePolicy,
    ) -> Self {
        self.entries.push(Entry {
            name: name.to_string(),
            selector: selector.to_string(),
            element_index,
            policy,
        });
        self
    }

    pub fn build(self) -> Result<Scheme, SchemeError> {
        let mut fields = Vec::with_capacity(self.entries.len());
        let mut by_name = HashMap::with_capacity(self.entries.len());

        for entry in self.entries {
            if by_name.contains_key(&entry.name) {
                return Err(SchemeError::DuplicateField(entry.name));
            }
            let compiled =
                Selector::parse(&entry.selector).map_err(|e| SchemeError::BadSelector {
                    context: format!("field '{}'", entry.name),
                    selector: entry.selector.clone(),
                    message: e.to_string(),
                })?;
            by_name.insert(entry.name.clone(), fields.len());
            fields.push(FieldSpec {
                name: entry.name,
                selector: entry.selector,
                compiled,
                element_index: entry.element_index,
                policy: entry.policy,
            });
        }

        if !by_name.contains_key(SEASON_FIELD) {
            return Err(SchemeError::MissingSeasonField(SEASON_FIELD.to_string()));
        }

        tracing::debug!("Built scheme with {} fields", fields.len());
        Ok(Scheme { fields, by_name })
    }
}
