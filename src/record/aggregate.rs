// src/record/aggregate.rs

// --- Imports ---
use std::collections::HashMap;

use crate::extract::{extract_field, SourceTable};
use crate::scheme::{Scheme, CAREER, SEASON_FIELD};
use crate::utils::error::SchemeError;

/// Per-season markup fragments merged from every source table.
///
/// `seasons` preserves the order rows were encountered while scanning the
/// tables, with `Career` appended last when any footer contributed to it.
/// Each fragment is the concatenation of every row seen for that season, so
/// one single-pass extraction reaches fields from all tables.
#[derive(Debug, Default)]
pub(crate) struct SeasonFragments {
    pub(crate) seasons: Vec<String>,
    pub(crate) fragments: HashMap<String, String>,
    pub(crate) most_recent: Option<String>,
}

impl SeasonFragments {
    fn append(&mut self, season: &str, row_html: &str) {
        match self.fragments.get_mut(season) {
            Some(fragment) => fragment.push_str(row_html),
            None => {
                self.seasons.push(season.to_string());
                self.fragments.insert(season.to_string(), row_html.to_string());
            }
        }
    }
}

/// Merge rows from every source table into one fragment per season.
///
/// Tables are processed in their declared order; later tables' rows are
/// appended after earlier ones, so same-selector cells from later tables
/// never shadow earlier data. Footer rows (career totals) from all tables
/// fold into a single reserved `Career` bucket. A season appearing in only
/// some tables still gets an entry.
pub(crate) fn combine_tables(
    scheme: &Scheme,
    tables: &[SourceTable],
) -> Result<SeasonFragments, SchemeError> {
    let mut combined = SeasonFragments::default();
    let mut career_fragment = String::new();

    for table in tables {
        for row in &table.rows {
            let season = match extract_field(scheme, row, SEASON_FIELD)? {
                Some(texts) => texts.into_iter().next().unwrap_or_default(),
                None => String::new(),
            };
            let season = season.trim().to_string();
            if season.is_empty() {
                tracing::debug!("Skipping row without season label in table '{}'", table.name);
                continue;
            }
            if season == CAREER {
                career_fragment.push_str(row);
                continue;
            }
            combined.append(&season, row);
            combined.most_recent = Some(season);
        }

        for footer in &table.footer_rows {
            career_fragment.push_str(footer);
        }
    }

    // The career aggregate always sits at the end of the season order.
    if !career_fragment.is_empty() {
        combined.seasons.push(CAREER.to_string());
        combined.fragments.insert(CAREER.to_string(), career_fragment);
    }

    tracing::debug!(
        "Combined {} tables into {} season fragments (most recent: {:?})",
        tables.len(),
        combined.seasons.len(),
        combined.most_recent
    );
    Ok(combined)
}
