//! Sorting and searching for the transactions table.
//!
//! Rows are compared by the text shown in their cells, the same text the
//! user searches in, so both operations agree on what a row "says".

use std::cmp::Ordering;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    pub fn indicator(self) -> &'static str {
        match self {
            SortDirection::Ascending => "▲",
            SortDirection::Descending => "▼",
        }
    }
}

/// Which header is active and in which direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortState {
    pub column: Option<usize>,
    pub direction: SortDirection,
}

impl SortState {
    /// Register a click on `column`'s header and return the direction to sort in.
    ///
    /// A newly selected column always starts ascending; clicking the active
    /// column again flips it. Selecting a column clears every other header.
    pub fn toggle(&mut self, column: usize) -> SortDirection {
        self.direction = match self.column {
            Some(active) if active == column => self.direction.flipped(),
            _ => SortDirection::Ascending,
        };
        self.column = Some(column);
        self.direction
    }

    /// Indicator to draw on `column`'s header, if it is the active one
    pub fn indicator_for(&self, column: usize) -> Option<&'static str> {
        match self.column {
            Some(active) if active == column => Some(self.direction.indicator()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub id: String,
    pub cells: Vec<String>,
}

impl TableRow {
    fn cell(&self, column: usize) -> &str {
        self.cells.get(column).map(String::as_str).unwrap_or("")
    }
}

/// What a cell turns out to hold, most specific reading first
#[derive(Debug, Clone, Copy, PartialEq)]
enum CellValue<'a> {
    Date(NaiveDateTime),
    Number(f64),
    Text(&'a str),
}

impl<'a> CellValue<'a> {
    fn read(text: &'a str) -> Self {
        if let Some(date) = parse_cell_date(text) {
            CellValue::Date(date)
        } else if let Some(number) = parse_cell_number(text) {
            CellValue::Number(number)
        } else {
            CellValue::Text(text)
        }
    }

    /// Cells of different kinds order dates, then numbers, then text
    fn rank(&self) -> u8 {
        match self {
            CellValue::Date(_) => 0,
            CellValue::Number(_) => 1,
            CellValue::Text(_) => 2,
        }
    }
}

const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%b %d, %Y", "%B %d, %Y", "%d.%m.%Y"];
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];

/// Interpret a cell as a point in time
pub fn parse_cell_date(text: &str) -> Option<NaiveDateTime> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.naive_utc());
    }
    for format in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, format) {
            return Some(dt);
        }
    }
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

/// Interpret a cell as a number the way a lenient float parser does.
///
/// The first `,` is read as a decimal point and only the leading numeric part
/// counts, so `"12,5 kg"` is 12.5 while `"kg 12"` is not a number.
pub fn parse_cell_number(text: &str) -> Option<f64> {
    let normalized = text.trim_start().replacen(',', ".", 1);
    let bytes = normalized.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }
    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut digits = end - int_start;
    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        end = frac_end;
    }
    if digits == 0 {
        return None;
    }
    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+') | Some(b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    normalized[..end].parse::<f64>().ok()
}

fn fold(text: &str) -> String {
    text.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Case-insensitive text order that files accented letters next to their
/// base letter ("Ćma" between "Bar" and "Dom").
///
/// Used where no locale collator is available; the browser table passes
/// `String.prototype.localeCompare` to [`sort_rows_by`] instead.
pub fn collate_text(a: &str, b: &str) -> Ordering {
    fold(a)
        .cmp(&fold(b))
        .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
        .then_with(|| a.cmp(b))
}

/// Compare two cells: chronologically when both are dates, numerically when
/// both are numbers, with `collate` when both are text. Cells of different
/// kinds fall back to kind order so the result stays a total order.
pub fn compare_cells<F>(a: &str, b: &str, collate: F) -> Ordering
where
    F: Fn(&str, &str) -> Ordering,
{
    match (CellValue::read(a), CellValue::read(b)) {
        (CellValue::Date(a), CellValue::Date(b)) => a.cmp(&b),
        (CellValue::Number(a), CellValue::Number(b)) => a.total_cmp(&b),
        (CellValue::Text(a), CellValue::Text(b)) => collate(a, b),
        (a, b) => a.rank().cmp(&b.rank()),
    }
}

/// Reorder `rows` in place by `column`. Equal rows keep their relative order.
pub fn sort_rows(rows: &mut [TableRow], column: usize, direction: SortDirection) {
    sort_rows_by(rows, column, direction, collate_text);
}

/// [`sort_rows`] with a caller-supplied text collation
pub fn sort_rows_by<F>(rows: &mut [TableRow], column: usize, direction: SortDirection, collate: F)
where
    F: Fn(&str, &str) -> Ordering,
{
    rows.sort_by(|a, b| {
        let ordering = compare_cells(a.cell(column), b.cell(column), &collate);
        match direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });
}

/// Case-insensitive substring match against each of a row's cell texts
pub fn row_matches(cells: &[String], term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    let term = term.to_lowercase();
    cells.iter().any(|cell| cell.to_lowercase().contains(&term))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows() -> Vec<TableRow> {
        vec![
            TableRow {
                id: "a".to_string(),
                cells: vec!["2024-01-01".to_string(), "5".to_string(), "apple".to_string()],
            },
            TableRow {
                id: "b".to_string(),
                cells: vec!["2023-05-05".to_string(), "10".to_string(), "banana".to_string()],
            },
        ]
    }

    fn ids(rows: &[TableRow]) -> Vec<&str> {
        rows.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn test_sort_by_date_column() {
        let mut rows = rows();
        sort_rows(&mut rows, 0, SortDirection::Ascending);
        assert_eq!(ids(&rows), vec!["b", "a"]);
    }

    #[test]
    fn test_sort_numbers_numerically_not_lexically() {
        let mut rows = rows();
        sort_rows(&mut rows, 1, SortDirection::Ascending);
        assert_eq!(ids(&rows), vec!["a", "b"]);

        sort_rows(&mut rows, 1, SortDirection::Descending);
        assert_eq!(ids(&rows), vec!["b", "a"]);
    }

    #[test]
    fn test_sort_text_case_insensitively() {
        let mut rows = rows();
        rows[0].cells[2] = "Banana".to_string();
        rows[1].cells[2] = "apple".to_string();
        sort_rows(&mut rows, 2, SortDirection::Ascending);
        assert_eq!(ids(&rows), vec!["b", "a"]);
    }

    #[test]
    fn test_sort_is_stable() {
        let mut rows: Vec<TableRow> = ["x", "y", "z"]
            .iter()
            .map(|id| TableRow { id: id.to_string(), cells: vec!["same".to_string()] })
            .collect();
        sort_rows(&mut rows, 0, SortDirection::Descending);
        assert_eq!(ids(&rows), vec!["x", "y", "z"]);
    }

    fn column(values: &[(&str, &str)]) -> Vec<TableRow> {
        values
            .iter()
            .map(|(id, text)| TableRow { id: id.to_string(), cells: vec![text.to_string()] })
            .collect()
    }

    #[test]
    fn test_blank_cells_do_not_turn_numbers_into_text() {
        let mut rows = column(&[("ten", "10"), ("five", "5"), ("blank", "")]);
        sort_rows(&mut rows, 0, SortDirection::Ascending);
        assert_eq!(ids(&rows), vec!["five", "ten", "blank"]);

        sort_rows(&mut rows, 0, SortDirection::Descending);
        assert_eq!(ids(&rows), vec!["blank", "ten", "five"]);
    }

    #[test]
    fn test_mixed_kinds_order_dates_numbers_then_text() {
        let mut rows = column(&[
            ("note", "rent"),
            ("three", "3"),
            ("date", "2024-01-01"),
            ("twenty", "20"),
            ("blank", ""),
        ]);
        sort_rows(&mut rows, 0, SortDirection::Ascending);
        assert_eq!(ids(&rows), vec!["date", "three", "twenty", "blank", "note"]);
    }

    #[test]
    fn test_accented_text_sorts_with_its_base_letter() {
        let mut rows = column(&[("dom", "Dom"), ("cma", "Ćma"), ("arzte", "Ärzte"), ("zoo", "Zoo"), ("zabka", "Żabka")]);
        sort_rows(&mut rows, 0, SortDirection::Ascending);
        assert_eq!(ids(&rows), vec!["arzte", "cma", "dom", "zabka", "zoo"]);
    }

    #[test]
    fn test_sort_rows_by_uses_given_collation() {
        let mut rows = column(&[("a", "apple"), ("b", "banana"), ("c", "cherry")]);
        sort_rows_by(&mut rows, 0, SortDirection::Ascending, |a: &str, b: &str| b.cmp(a));
        assert_eq!(ids(&rows), vec!["c", "b", "a"]);
    }

    #[test]
    fn test_toggle_flips_and_clears_other_headers() {
        let mut state = SortState::default();
        assert_eq!(state.toggle(0), SortDirection::Ascending);
        assert_eq!(state.toggle(0), SortDirection::Descending);
        assert_eq!(state.indicator_for(0), Some("▼"));

        assert_eq!(state.toggle(2), SortDirection::Ascending);
        assert_eq!(state.indicator_for(0), None);
        assert_eq!(state.indicator_for(2), Some("▲"));
    }

    #[test]
    fn test_toggling_twice_reverses_ascending_order() {
        let mut rows = rows();
        let mut state = SortState::default();
        let direction = state.toggle(1);
        sort_rows(&mut rows, 1, direction);
        let ascending = ids(&rows).iter().map(|s| s.to_string()).collect::<Vec<_>>();

        let direction = state.toggle(1);
        sort_rows(&mut rows, 1, direction);
        let mut descending = ids(&rows).iter().map(|s| s.to_string()).collect::<Vec<_>>();
        descending.reverse();
        assert_eq!(ascending, descending);
    }

    #[test]
    fn test_parse_cell_number() {
        assert_eq!(parse_cell_number("10"), Some(10.0));
        assert_eq!(parse_cell_number("12,5"), Some(12.5));
        assert_eq!(parse_cell_number(" -3.25 EUR"), Some(-3.25));
        assert_eq!(parse_cell_number("1e3"), Some(1000.0));
        assert_eq!(parse_cell_number("2e"), Some(2.0));
        assert_eq!(parse_cell_number(".5"), Some(0.5));
        assert_eq!(parse_cell_number("apple"), None);
        assert_eq!(parse_cell_number("-"), None);
        assert_eq!(parse_cell_number(""), None);
    }

    #[test]
    fn test_parse_cell_date() {
        assert!(parse_cell_date("2024-01-01").is_some());
        assert!(parse_cell_date("2024-01-01T10:00:00+02:00").is_some());
        assert!(parse_cell_date("jan 15, 2025").is_some());
        assert!(parse_cell_date("15.01.2025").is_some());
        assert!(parse_cell_date("5").is_none());
        assert!(parse_cell_date("12.50").is_none());
        assert!(parse_cell_date("apple").is_none());
    }

    #[test]
    fn test_search_matches_case_insensitively() {
        let rows = rows();
        let visible: Vec<bool> = rows.iter().map(|r| row_matches(&r.cells, "BAN")).collect();
        assert_eq!(visible, vec![false, true]);
    }

    #[test]
    fn test_search_does_not_match_across_cells() {
        let cells = vec!["Checking".to_string(), "Landlord".to_string()];
        assert!(row_matches(&cells, "landl"));
        assert!(!row_matches(&cells, "ng la"));
    }

    #[test]
    fn test_clearing_search_shows_every_row() {
        let rows = rows();
        assert!(!row_matches(&rows[0].cells, "ban"));
        assert!(rows.iter().all(|r| row_matches(&r.cells, "")));
    }
}
