//! Extraction of the ranked country/area table from an HTML page.
//!
//! The source page carries rank, country, area and a "date of information"
//! column. Only the country and area columns are kept. Rows must already be
//! ranked largest first; the parser checks that instead of re-sorting.

use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use crate::models::{CountryArea, CountryAreaTable};

use super::AcquisitionError;

/// Column name reported when no table has a country column
const COUNTRY_COLUMN: &str = "Country";

/// Column name reported when the country table has no area column
const AREA_COLUMN: &str = "sq km";

fn selector(css: &str) -> Result<Selector, AcquisitionError> {
    Selector::parse(css)
        .map_err(|e| AcquisitionError::Parse(format!("invalid selector {:?}: {}", css, e)))
}

/// Positions of the columns we keep, within a row's cells
#[derive(Debug, Clone, Copy, PartialEq)]
struct ColumnLayout {
    country: usize,
    area: usize,
}

impl ColumnLayout {
    fn is_country_header(header: &str) -> bool {
        let h = header.to_lowercase();
        h == "name" || h.starts_with("country")
    }

    fn is_area_header(header: &str) -> bool {
        let h = header.to_lowercase();
        h.contains("sq km") || h.contains("km²") || h.contains("km2")
    }

    /// `None` when the header has no country column at all, so the table is
    /// not the one we are looking for.
    fn detect(header: &[String]) -> Option<Result<Self, AcquisitionError>> {
        let country = header.iter().position(|h| Self::is_country_header(h))?;
        let layout = match header.iter().position(|h| Self::is_area_header(h)) {
            Some(area) => Ok(Self { country, area }),
            None => Err(AcquisitionError::MissingColumn(AREA_COLUMN.to_string())),
        };
        Some(layout)
    }

    fn width(&self) -> usize {
        self.country.max(self.area) + 1
    }
}

/// True when `row` sits directly in `table` rather than in a table nested
/// inside one of its cells.
fn belongs_to(row: ElementRef<'_>, table: ElementRef<'_>) -> bool {
    row.ancestors()
        .find(|node| node.value().as_element().is_some_and(|e| e.name() == "table"))
        .is_some_and(|node| node.id() == table.id())
}

/// The row's own `th`/`td` cells, ignoring cells of nested tables
fn row_cells(row: ElementRef<'_>) -> impl Iterator<Item = ElementRef<'_>> {
    row.children()
        .filter_map(ElementRef::wrap)
        .filter(|cell| matches!(cell.value().name(), "th" | "td"))
}

fn is_header_row(row: ElementRef<'_>) -> bool {
    row_cells(row).any(|cell| cell.value().name() == "th")
}

/// Footnote and source rows span the table with a single `colspan` cell
fn is_spanning_row(cells: &[ElementRef<'_>]) -> bool {
    cells.iter().any(|cell| cell.value().attr("colspan").is_some())
}

fn cell_text(cell: ElementRef<'_>) -> String {
    cell.text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Coerce an area cell to a number.
///
/// Takes the first numeric run, dropping thousands separators and anything
/// after it such as a unit or a footnote marker.
pub(crate) fn parse_area(text: &str) -> Option<f64> {
    let start = text.find(|c: char| c.is_ascii_digit())?;
    if text[..start].trim_end().ends_with('-') {
        return None;
    }

    let mut number = String::new();
    let mut chars = text[start..].chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '0'..='9' | '.' => number.push(c),
            ',' => {}
            ' ' | '\u{a0}' | '\u{202f}'
                if chars.peek().is_some_and(|next| next.is_ascii_digit()) => {}
            _ => break,
        }
    }

    number.parse().ok()
}

/// Parse the first country/area table found in `html`.
pub fn parse_table(html: &str) -> Result<CountryAreaTable, AcquisitionError> {
    let document = Html::parse_document(html);
    let table_selector = selector("table")?;
    let row_selector = selector("tr")?;

    let mut saw_table = false;

    for table in document.select(&table_selector) {
        saw_table = true;

        let rows: Vec<ElementRef<'_>> = table
            .select(&row_selector)
            .filter(|row| belongs_to(*row, table))
            .collect();
        let header_index = rows.iter().position(|row| is_header_row(*row)).unwrap_or(0);

        let Some(header_row) = rows.get(header_index) else {
            continue;
        };
        let header: Vec<String> = row_cells(*header_row).map(cell_text).collect();

        let layout = match ColumnLayout::detect(&header) {
            Some(layout) => layout?,
            None => {
                debug!(?header, "Skipping table without a country column");
                continue;
            }
        };
        debug!(?header, ?layout, "Found country table");

        let mut entries = Vec::new();
        for (offset, row) in rows[header_index + 1..].iter().enumerate() {
            let row_number = offset + 1;
            let elements: Vec<ElementRef<'_>> = row_cells(*row).collect();
            let cells: Vec<String> = elements.iter().map(|cell| cell_text(*cell)).collect();
            if cells.iter().all(|c| c.is_empty()) {
                continue;
            }
            if cells.len() < layout.width() {
                if is_spanning_row(&elements) {
                    debug!(row = row_number, text = %cells.join(" "), "Skipping spanning row");
                    continue;
                }
                return Err(AcquisitionError::MalformedRow { row: row_number });
            }

            let name = cells[layout.country].trim();
            if name.is_empty() {
                return Err(AcquisitionError::MalformedRow { row: row_number });
            }

            let raw_area = &cells[layout.area];
            let area = parse_area(raw_area).ok_or_else(|| AcquisitionError::InvalidArea {
                row: row_number,
                value: raw_area.clone(),
            })?;

            entries.push(CountryArea::new(name, area));
        }

        if entries.is_empty() {
            return Err(AcquisitionError::Empty);
        }

        debug!(rows = entries.len(), "Parsed country table");
        return Ok(CountryAreaTable::new(entries)?);
    }

    if saw_table {
        Err(AcquisitionError::MissingColumn(COUNTRY_COLUMN.to_string()))
    } else {
        Err(AcquisitionError::NoTable)
    }
}
