//! CSV rendering of aggregated shopping lists.
//!
//! Presentation concern owned by the HTTP boundary: a semicolon-delimited
//! table with a fixed three-column header, one row per aggregated
//! ingredient group.

use crate::domain::entities::ShoppingListItem;

const DELIMITER: char = ';';
const HEADER: &str = "Name;Measurement unit;Amount";

/// Renders the aggregate as a downloadable CSV body.
///
/// An empty list still produces the header line, so the downloaded file is
/// well-formed for an empty cart.
pub fn render_shopping_list_csv(items: &[ShoppingListItem]) -> String {
    let mut out = String::with_capacity(HEADER.len() + 1 + items.len() * 24);
    out.push_str(HEADER);
    out.push('\n');

    for item in items {
        out.push_str(&escape_field(&item.name));
        out.push(DELIMITER);
        out.push_str(&escape_field(&item.measurement_unit));
        out.push(DELIMITER);
        out.push_str(&item.amount.to_string());
        out.push('\n');
    }

    out
}

/// Quotes a field if it contains the delimiter, a quote, or a line break.
fn escape_field(field: &str) -> String {
    if field.contains([DELIMITER, '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str, unit: &str, amount: i64) -> ShoppingListItem {
        ShoppingListItem {
            name: name.to_string(),
            measurement_unit: unit.to_string(),
            amount,
        }
    }

    #[test]
    fn test_empty_list_renders_header_only() {
        assert_eq!(render_shopping_list_csv(&[]), "Name;Measurement unit;Amount\n");
    }

    #[test]
    fn test_one_row_per_item() {
        let csv = render_shopping_list_csv(&[item("salt", "g", 5), item("sugar", "g", 2)]);
        assert_eq!(
            csv,
            "Name;Measurement unit;Amount\nsalt;g;5\nsugar;g;2\n"
        );
    }

    #[test]
    fn test_field_containing_delimiter_is_quoted() {
        let csv = render_shopping_list_csv(&[item("salt; coarse", "g", 5)]);
        assert!(csv.contains("\"salt; coarse\";g;5"));
    }

    #[test]
    fn test_quotes_are_doubled() {
        let csv = render_shopping_list_csv(&[item("\"sea\" salt", "g", 1)]);
        assert!(csv.contains("\"\"\"sea\"\" salt\";g;1"));
    }
}
