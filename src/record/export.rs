// src/record/export.rs

// --- Imports ---
use serde::Serialize;

use crate::record::{EntityRecord, StatValue};
use crate::scheme::SEASON_FIELD;

/// One exported row: every declared field coerced for a single season, in
/// scheme declaration order.
#[derive(Debug, Clone, Serialize)]
pub struct SeasonRow {
    pub season: String,
    pub values: Vec<(String, StatValue)>,
}

impl SeasonRow {
    pub fn get(&self, field: &str) -> Option<&StatValue> {
        self.values
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, value)| value)
    }
}

impl EntityRecord {
    /// Snapshot every season (in order) into a row of coerced field values.
    ///
    /// Rows are built from per-season views, so the record's current-season
    /// pointer is observably untouched and the call is re-entrant.
    pub fn export_table(&self) -> Vec<SeasonRow> {
        let season_count = self.seasons().len();
        let mut rows = Vec::with_capacity(season_count);
        for index in 0..season_count {
            let view = self.view_at(index);
            let values = self
                .scheme()
                .fields()
                .filter(|spec| spec.name() != SEASON_FIELD)
                .map(|spec| (spec.name().to_string(), view.value_for(spec)))
                .collect();
            rows.push(SeasonRow {
                season: view.season().to_string(),
                values,
            });
        }
        tracing::debug!("Exported {} season rows for '{}'", rows.len(), self.id());
        rows
    }
}
