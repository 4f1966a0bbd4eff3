// src/contract/mod.rs

// --- Imports ---
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use serde::Serialize;

use crate::extract::normalize;

// --- CSS Selectors (Lazy Static) ---
static HEADER_CELL_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("th").expect("Failed to compile HEADER_CELL_SELECTOR"));

static DATA_CELL_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("td").expect("Failed to compile DATA_CELL_SELECTOR"));

/// The non-season header column conventionally present in contract tables.
const TEAM_HEADER: &str = "Team";

/// A player's contract: wages by season, in table order.
///
/// An empty table parses to "no contract" (`None` from [`parse_contract`]),
/// which is a distinct state from a contract with a $0 wage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Contract {
    terms: Vec<(String, String)>,
}

impl Contract {
    pub fn seasons(&self) -> impl Iterator<Item = &str> {
        self.terms.iter().map(|(season, _)| season.as_str())
    }

    /// Normalized wage for a season, such as `"40000000"`.
    pub fn wage(&self, season: &str) -> Option<&str> {
        self.terms
            .iter()
            .find(|(s, _)| s == season)
            .map(|(_, wage)| wage.as_str())
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn terms(&self) -> &[(String, String)] {
        &self.terms
    }
}

/// Parse a contract-shaped table: header cells minus the `Team` column give
/// the season labels, data cells that look like currency (leading `$`) give
/// the wages, zipped by position. Cells failing the currency check are
/// dropped; if nothing survives, the player is not under contract and the
/// result is `None` rather than an empty mapping.
pub fn parse_contract(table_html: &str) -> Option<Contract> {
    let table = Html::parse_fragment(table_html);

    let mut seasons: Vec<String> = table
        .select(&HEADER_CELL_SELECTOR)
        .map(|el| el.text().collect::<String>().trim().to_string())
        .collect();
    if let Some(position) = seasons.iter().position(|h| h == TEAM_HEADER) {
        seasons.remove(position);
    } else {
        tracing::debug!("Contract table has no '{}' header column", TEAM_HEADER);
    }

    let wages: Vec<String> = table
        .select(&DATA_CELL_SELECTOR)
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|text| text.starts_with('$'))
        .map(|text| normalize(Some(&text)))
        .collect();

    let terms: Vec<(String, String)> = seasons.into_iter().zip(wages).collect();
    if terms.is_empty() {
        tracing::debug!("Contract table produced no terms; treating as no contract");
        return None;
    }
    Some(Contract { terms })
}

// --- Tests ---
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_header_and_wage_rows() {
        let table = r#"
            <table id="contracts_hou">
              <tr><th>Team</th><th>2018-19</th><th>2019-20</th></tr>
              <tr><td>HOU</td><td>$1,000,000</td><td>$2,000,000</td></tr>
            </table>
        "#;
        let contract = parse_contract(table).unwrap();
        assert_eq!(contract.len(), 2);
        assert_eq!(contract.wage("2018-19"), Some("1000000"));
        assert_eq!(contract.wage("2019-20"), Some("2000000"));
        assert!(contract.seasons().all(|s| s != "Team"));
    }

    #[test]
    fn non_currency_cells_are_dropped() {
        let table = r#"
            <table>
              <tr><th>Team</th><th>2018-19</th><th>2019-20</th></tr>
              <tr><td></td><td>$1,000,000</td><td>$2,000,000</td></tr>
            </table>
        "#;
        let contract = parse_contract(table).unwrap();
        assert_eq!(contract.wage("2018-19"), Some("1000000"));
        assert_eq!(contract.wage("2019-20"), Some("2000000"));
    }

    #[test]
    fn all_invalid_wages_is_no_contract() {
        let table = r#"
            <table>
              <tr><th>Team</th><th>2018-19</th></tr>
              <tr><td>HOU</td><td>TBD</td></tr>
            </table>
        "#;
        assert_eq!(parse_contract(table), None);
    }

    #[test]
    fn empty_table_is_no_contract() {
        assert_eq!(parse_contract("<table></table>"), None);
    }
}
