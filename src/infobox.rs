//! Infobox extraction from rendered article HTML

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};

/// Infobox rows keyed by their header cell, in page order
pub type Infobox = IndexMap<String, String>;

static INFOBOX_SEL: Lazy<Selector> = Lazy::new(|| Selector::parse(r#"table[class*="infobox"]"#).unwrap());
static ROW_SEL: Lazy<Selector> = Lazy::new(|| Selector::parse("tr").unwrap());
static HEADER_SEL: Lazy<Selector> = Lazy::new(|| Selector::parse("th").unwrap());
static DATA_SEL: Lazy<Selector> = Lazy::new(|| Selector::parse("td").unwrap());

/// Parse the first infobox table in `html`.
///
/// Rows need both a header and a data cell; a repeated header keeps the last row's value.
/// Malformed markup is parsed leniently. Returns an empty map when there is no infobox.
pub fn parse_infobox(html: &str) -> Infobox {
    let mut data = Infobox::new();
    if html.trim().is_empty() {
        return data;
    }

    let document = Html::parse_fragment(html);
    let Some(table) = document.select(&INFOBOX_SEL).next() else {
        tracing::debug!("No infobox table found");
        return data;
    };

    for row in table.select(&ROW_SEL) {
        if let (Some(th), Some(td)) = (row.select(&HEADER_SEL).next(), row.select(&DATA_SEL).next()) {
            data.insert(cell_text(th), cell_text(td));
        }
    }

    data
}

fn cell_text(cell: ElementRef<'_>) -> String {
    cell.text().collect::<String>().trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_row() {
        let html = r#"<table class="infobox"><tr><th>Born</th><td>June 28</td></tr></table>"#;
        let infobox = parse_infobox(html);
        assert_eq!(infobox.len(), 1);
        assert_eq!(infobox["Born"], "June 28");
    }

    #[test]
    fn test_class_substring_and_first_table_only() {
        let html = r#"
            <table class="wikitable"><tr><th>Ignored</th><td>x</td></tr></table>
            <table class="infobox vcard biography">
              <tr><th colspan="2">Elon Musk</th></tr>
              <tr><th scope="row">Born</th><td>  June 28, 1971 <br>Pretoria</td></tr>
              <tr><th>Citizenship</th><td><a href="/wiki/South_Africa">South Africa</a></td></tr>
            </table>
            <table class="infobox"><tr><th>Second</th><td>y</td></tr></table>"#;
        let infobox = parse_infobox(html);
        assert_eq!(infobox.len(), 2);
        assert_eq!(infobox["Born"], "June 28, 1971 Pretoria");
        assert_eq!(infobox["Citizenship"], "South Africa");
        assert!(!infobox.contains_key("Ignored"));
        assert!(!infobox.contains_key("Second"));
    }

    #[test]
    fn test_duplicate_header_keeps_last() {
        let html = r#"<table class="infobox">
            <tr><th>Website</th><td>old</td></tr>
            <tr><th>Website</th><td>new</td></tr></table>"#;
        assert_eq!(parse_infobox(html)["Website"], "new");
    }

    #[test]
    fn test_rows_keep_page_order() {
        let html = r#"<table class="infobox">
            <tr><th>Country</th><td>Iran</td></tr>
            <tr><th>Area</th><td>730 km2</td></tr>
            <tr><th>Country</th><td>Islamic Republic of Iran</td></tr>
            <tr><th>Elevation</th><td>1189 m</td></tr></table>"#;
        let infobox = parse_infobox(html);
        let keys: Vec<&str> = infobox.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["Country", "Area", "Elevation"]);
        assert_eq!(infobox["Country"], "Islamic Republic of Iran");
    }

    #[test]
    fn test_malformed_markup_and_entities() {
        let html = r#"<div><table class="infobox"><tr><th>Capital &amp; largest city<td>Tehran &#8211; 35°41′N"#;
        let infobox = parse_infobox(html);
        assert_eq!(infobox["Capital & largest city"], "Tehran \u{2013} 35°41′N");
    }

    #[test]
    fn test_no_infobox() {
        assert!(parse_infobox("<p>Tehran is the capital of Iran.</p>").is_empty());
        assert!(parse_infobox("").is_empty());
    }
}
