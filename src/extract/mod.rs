// src/extract/mod.rs

// --- Imports ---
use once_cell::sync::Lazy;
use scraper::{Html, Selector};

use crate::scheme::Scheme;
use crate::utils::error::SchemeError;

// --- CSS Selectors (Lazy Static) ---
static BODY_ROW_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("tbody tr").expect("Failed to compile BODY_ROW_SELECTOR"));

static FOOTER_ROW_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("tfoot tr").expect("Failed to compile FOOTER_ROW_SELECTOR"));

/// Strip decoration characters (`%`, `$`, `,`, `+`) from a raw cell value.
///
/// An absent value yields the empty string rather than `None`, so downstream
/// coercion fails closed to "no value" without a separate null check.
pub fn normalize(raw: Option<&str>) -> String {
    match raw {
        Some(value) => value
            .chars()
            .filter(|c| !matches!(c, '%' | '$' | ',' | '+'))
            .collect(),
        None => String::new(),
    }
}

/// Query a season fragment for every element matching the field's selector
/// and return their text content in document order.
///
/// Zero matches returns `None` ("this season never recorded this stat"),
/// which is distinct from a matched-but-blank cell. The field must be
/// declared in the scheme; an unknown name is a loud `SchemeError`.
pub fn extract_field(
    scheme: &Scheme,
    fragment: &str,
    field: &str,
) -> Result<Option<Vec<String>>, SchemeError> {
    let spec = scheme.field(field)?;
    let dom = parse_row_fragment(fragment);
    let texts: Vec<String> = dom
        .select(spec.compiled())
        .map(|el| el.text().collect::<String>())
        .collect();
    if texts.is_empty() {
        tracing::trace!("Field '{}' absent from fragment", field);
        Ok(None)
    } else {
        Ok(Some(texts))
    }
}

/// Parse a fragment made of concatenated `<tr>` rows.
///
/// Bare `<tr>`/`<td>` tags get unwrapped by the fragment parser unless they
/// sit inside a table context, so the rows are wrapped first.
pub(crate) fn parse_row_fragment(fragment: &str) -> Html {
    Html::parse_fragment(&format!("<table>{}</table>", fragment))
}

/// Some pages embed whole stats tables inside HTML comments. The commented
/// markup is valid, so removing the comment tags (but not the code within
/// them) exposes the desired contents.
pub fn strip_comment_tags(html: &str) -> String {
    html.replace("<!--", "").replace("-->", "")
}

/// One source stats table, reduced to owned row markup. Tables are handed to
/// the aggregator in a fixed declared order (totals, advanced, shooting,
/// salary, or the sport's equivalent).
#[derive(Debug, Clone)]
pub struct SourceTable {
    pub name: String,
    /// Per-season data rows (`tbody tr`), as raw HTML.
    pub rows: Vec<String>,
    /// Footer rows (`tfoot tr`) carrying career totals, as raw HTML.
    pub footer_rows: Vec<String>,
}

/// Lift a stats table out of a full page: select the table (or a wrapper
/// around it), strip any comment tags hiding it, and collect its body and
/// footer rows as owned HTML strings.
pub fn collect_table(
    page_html: &str,
    table_selector: &str,
    name: &str,
) -> Result<SourceTable, SchemeError> {
    let selector = Selector::parse(table_selector).map_err(|e| SchemeError::BadSelector {
        context: format!("table '{}'", name),
        selector: table_selector.to_string(),
        message: e.to_string(),
    })?;

    let document = Html::parse_document(page_html);
    let mut region = String::new();
    for element in document.select(&selector) {
        region.push_str(&element.html());
    }

    // Re-parse with comment tags removed so hidden tables become queryable.
    let table = Html::parse_fragment(&strip_comment_tags(&region));
    let rows: Vec<String> = table.select(&BODY_ROW_SELECTOR).map(|el| el.html()).collect();
    let footer_rows: Vec<String> = table
        .select(&FOOTER_ROW_SELECTOR)
        .map(|el| el.html())
        .collect();

    tracing::debug!(
        "Collected table '{}': {} rows, {} footer rows",
        name,
        rows.len(),
        footer_rows.len()
    );

    Ok(SourceTable {
        name: name.to_string(),
        rows,
        footer_rows,
    })
}

// --- Tests ---
#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheme::{CoercePolicy, Scheme, SEASON_FIELD};

    fn scheme() -> Scheme {
        Scheme::builder()
            .field(SEASON_FIELD, "th[data-stat=\"season\"]", CoercePolicy::Text)
            .field("points", "td[data-stat=\"pts\"]", CoercePolicy::Int)
            .field("salary", "td[data-stat=\"salary\"]", CoercePolicy::Int)
            .build()
            .unwrap()
    }

    #[test]
    fn normalize_strips_decoration() {
        assert_eq!(normalize(Some("$1,000,000")), "1000000");
        assert_eq!(normalize(Some("52.3%")), "52.3");
        assert_eq!(normalize(Some("+7")), "7");
    }

    #[test]
    fn normalize_absent_is_empty_string() {
        assert_eq!(normalize(None), "");
    }

    #[test]
    fn normalize_is_idempotent() {
        let once = normalize(Some("$1,234+5%"));
        let twice = normalize(Some(&once));
        assert_eq!(once, twice);
    }

    #[test]
    fn extract_field_returns_matches_in_document_order() {
        let row = r#"<tr><th data-stat="season">2019-20</th><td data-stat="pts">1500</td><td data-stat="pts">30</td></tr>"#;
        let values = extract_field(&scheme(), row, "points").unwrap().unwrap();
        assert_eq!(values, vec!["1500", "30"]);
    }

    #[test]
    fn extract_field_absent_is_none_not_empty() {
        let row = r#"<tr><th data-stat="season">2019-20</th><td data-stat="pts">1500</td></tr>"#;
        let result = extract_field(&scheme(), row, "salary").unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn extract_field_blank_cell_is_present() {
        let row = r#"<tr><th data-stat="season">2019-20</th><td data-stat="pts"></td></tr>"#;
        let values = extract_field(&scheme(), row, "points").unwrap().unwrap();
        assert_eq!(values, vec![""]);
    }

    #[test]
    fn extract_field_unknown_name_errors() {
        let row = r#"<tr><td data-stat="pts">1500</td></tr>"#;
        assert!(extract_field(&scheme(), row, "bogus").is_err());
    }

    #[test]
    fn strip_comment_tags_keeps_contents() {
        let html = "<div><!--<table><tr><td>1</td></tr></table>--></div>";
        let stripped = strip_comment_tags(html);
        assert!(stripped.contains("<table>"));
        assert!(!stripped.contains("<!--"));
    }

    #[test]
    fn collect_table_reads_body_and_footer_rows() {
        let page = r#"
            <html><body>
            <table id="totals">
              <tbody>
                <tr><th data-stat="season">2018-19</th><td data-stat="pts">100</td></tr>
                <tr><th data-stat="season">2019-20</th><td data-stat="pts">200</td></tr>
              </tbody>
              <tfoot>
                <tr><th data-stat="season">Career</th><td data-stat="pts">300</td></tr>
              </tfoot>
            </table>
            </body></html>
        "#;
        let table = collect_table(page, "table#totals", "totals").unwrap();
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.footer_rows.len(), 1);
        assert!(table.rows[0].contains("2018-19"));
        assert!(table.footer_rows[0].contains("Career"));
    }

    #[test]
    fn collect_table_uncovers_commented_tables() {
        let page = r#"
            <html><body>
            <div id="all_advanced">
            <!--
            <table id="advanced">
              <tbody>
                <tr><th data-stat="season">2019-20</th><td data-stat="per">25.1</td></tr>
              </tbody>
            </table>
            -->
            </div>
            </body></html>
        "#;
        let table = collect_table(page, "div#all_advanced", "advanced").unwrap();
        assert_eq!(table.rows.len(), 1);
        assert!(table.rows[0].contains("25.1"));
    }

    #[test]
    fn collect_table_bad_selector_is_loud() {
        assert!(collect_table("<html></html>", "table[", "broken").is_err());
    }
}
