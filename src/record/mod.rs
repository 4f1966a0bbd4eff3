// src/record/mod.rs
pub mod aggregate;
pub mod coerce;
pub mod export;

// --- Imports ---
use std::collections::HashMap;

use crate::extract::SourceTable;
use crate::scheme::{FieldSpec, Scheme, CAREER, SEASON_FIELD};
use crate::utils::error::{ExtractError, SchemeError, SelectError};

pub use coerce::StatValue;
pub use export::SeasonRow;

/// Policy for `select()` on a season label with no matching entry.
///
/// `Lenient` keeps the historical behavior: the current season pointer is
/// left unchanged and the call reports success, so callers silently keep
/// reading the previously selected season. `Strict` surfaces the miss as an
/// explicit error instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strictness {
    #[default]
    Lenient,
    Strict,
}

/// Typed, season-addressable stats for one entity (player, goalkeeper,
/// team), built once from a batch of markup fragments.
///
/// Seasons are kept in the order they were encountered while scanning the
/// source tables, with `Career` last. Every field holds a value vector
/// positionally aligned to that season list; a field never printed for a
/// season holds an explicit absent entry, never a shorter vector. The only
/// mutable state after construction is the current-season pointer, which is
/// not safe for concurrent mutation; confine a record to one logical owner
/// or synchronize externally.
#[derive(Debug, Clone)]
pub struct EntityRecord {
    id: String,
    name: String,
    scheme: Scheme,
    seasons: Vec<String>,
    // Per field: one entry per season holding all element texts matched by
    // the field's selector; the element index is applied at read time.
    values: HashMap<String, Vec<Option<Vec<String>>>>,
    most_recent_season: Option<String>,
    current_index: usize,
    strictness: Strictness,
}

impl EntityRecord {
    /// Build a record from source tables in their declared order.
    ///
    /// Rows are merged into per-season fragments, then every declared field
    /// (other than the season field itself) is extracted once per season.
    /// The season pointer defaults to `Career` when present, else to the
    /// first season.
    pub fn build(
        scheme: &Scheme,
        tables: &[SourceTable],
        id: &str,
        name: &str,
    ) -> Result<Self, ExtractError> {
        let combined = aggregate::combine_tables(scheme, tables)?;
        if combined.seasons.is_empty() {
            return Err(ExtractError::NoSeasons);
        }

        let mut values: HashMap<String, Vec<Option<Vec<String>>>> =
            HashMap::with_capacity(scheme.len());
        for spec in scheme.fields() {
            if spec.name() == SEASON_FIELD {
                continue;
            }
            let mut column = Vec::with_capacity(combined.seasons.len());
            for season in &combined.seasons {
                let fragment = &combined.fragments[season];
                column.push(crate::extract::extract_field(scheme, fragment, spec.name())?);
            }
            values.insert(spec.name().to_string(), column);
        }

        let current_index = combined
            .seasons
            .iter()
            .position(|s| s == CAREER)
            .unwrap_or(0);

        tracing::info!(
            "Built record for '{}' ({}): {} seasons, {} fields",
            name,
            id,
            combined.seasons.len(),
            values.len()
        );

        Ok(Self {
            id: id.to_string(),
            name: name.to_string(),
            scheme: scheme.clone(),
            seasons: combined.seasons,
            values,
            most_recent_season: combined.most_recent,
            current_index,
            strictness: Strictness::default(),
        })
    }

    /// Set the unknown-season policy for `select()`.
    pub fn with_strictness(mut self, strictness: Strictness) -> Self {
        self.strictness = strictness;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Season labels in table-scan order, `Career` last when present.
    pub fn seasons(&self) -> &[String] {
        &self.seasons
    }

    /// The last non-career season label seen while scanning the tables.
    pub fn most_recent_season(&self) -> Option<&str> {
        self.most_recent_season.as_deref()
    }

    /// Label of the currently selected season.
    pub fn season(&self) -> &str {
        &self.seasons[self.current_index]
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// Re-point the record at another season.
    ///
    /// An empty label or any casing of `career` resolves to the `Career`
    /// aggregate. When the label matches no season, the outcome depends on
    /// the record's [`Strictness`]: `Lenient` leaves the pointer unchanged
    /// and returns `Ok` (a documented no-op), `Strict` returns
    /// [`SelectError::UnknownSeason`].
    pub fn select(&mut self, label: &str) -> Result<(), SelectError> {
        let resolved = resolve_label(label);
        if let Some(position) = self.seasons.iter().position(|s| s == resolved) {
            self.current_index = position;
            return Ok(());
        }
        match self.strictness {
            Strictness::Lenient => {
                tracing::debug!(
                    "Season '{}' not found; keeping '{}' selected",
                    label,
                    self.season()
                );
                Ok(())
            }
            Strictness::Strict => Err(SelectError::UnknownSeason(label.to_string())),
        }
    }

    /// Immutable view bound to one season, without touching the pointer.
    /// Resolves the career synonyms the same way `select()` does.
    pub fn with_season(&self, label: &str) -> Option<SeasonView<'_>> {
        let resolved = resolve_label(label);
        self.seasons
            .iter()
            .position(|s| s == resolved)
            .map(|index| SeasonView { record: self, index })
    }

    /// View for the currently selected season.
    pub fn view(&self) -> SeasonView<'_> {
        SeasonView {
            record: self,
            index: self.current_index,
        }
    }

    pub(crate) fn view_at(&self, index: usize) -> SeasonView<'_> {
        SeasonView { record: self, index }
    }

    /// Coerced value of a declared field for the currently selected season.
    pub fn get(&self, field: &str) -> Result<StatValue, SchemeError> {
        self.view().get(field)
    }

    /// Raw (uncoerced) value of a declared field for the currently selected
    /// season; `None` means the field was not printed for this season.
    pub fn get_raw(&self, field: &str) -> Result<Option<&str>, SchemeError> {
        let spec = self.scheme.field(field)?;
        Ok(self.view().raw_for(spec))
    }

    pub(crate) fn scheme(&self) -> &Scheme {
        &self.scheme
    }
}

fn resolve_label(label: &str) -> &str {
    if label.is_empty() || label.eq_ignore_ascii_case(CAREER) {
        CAREER
    } else {
        label
    }
}

/// Immutable snapshot of an [`EntityRecord`] bound to one season.
#[derive(Debug, Clone, Copy)]
pub struct SeasonView<'a> {
    record: &'a EntityRecord,
    index: usize,
}

impl<'a> SeasonView<'a> {
    pub fn season(&self) -> &'a str {
        &self.record.seasons[self.index]
    }

    /// Coerced value of a declared field. Unknown field names are a
    /// programmer error and surface loudly.
    pub fn get(&self, field: &str) -> Result<StatValue, SchemeError> {
        let spec = self.record.scheme.field(field)?;
        Ok(self.value_for(spec))
    }

    pub fn get_raw(&self, field: &str) -> Result<Option<&'a str>, SchemeError> {
        let spec = self.record.scheme.field(field)?;
        Ok(self.raw_for(spec))
    }

    pub(crate) fn value_for(&self, spec: &FieldSpec) -> StatValue {
        if spec.name() == SEASON_FIELD {
            return StatValue::Text(self.season().to_string());
        }
        coerce::coerce(self.raw_for(spec), spec.policy())
    }

    pub(crate) fn raw_for(&self, spec: &FieldSpec) -> Option<&'a str> {
        if spec.name() == SEASON_FIELD {
            return Some(self.season());
        }
        let column = self.record.values.get(spec.name())?;
        column[self.index]
            .as_ref()
            .and_then(|texts| texts.get(spec.element_index()))
            .map(String::as_str)
    }
}
