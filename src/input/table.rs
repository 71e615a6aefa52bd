//! Tabular input reading.
//!
//! Supports CSV (via `csv`) and spreadsheet workbooks (`.xlsx`, `.xls`,
//! `.ods` via `calamine`). The first row is always the header row and only
//! the first worksheet of a workbook is read.

use std::fs::File;
use std::path::Path;

use calamine::{Data, DataType, Reader, open_workbook_auto};
use csv::ReaderBuilder;
use tracing::debug;

use crate::error::{PlannerError, PlannerResult};

/// An in-memory table of trimmed string cells.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Builds a table from headers and rows. Fully blank rows are dropped.
    ///
    /// # Example
    ///
    /// ```
    /// use maintenance_planner::input::Table;
    ///
    /// let table = Table::new(
    ///     vec!["Site".into(), "Equipements".into()],
    ///     vec![vec!["A".into(), "3".into()], vec!["".into(), "".into()]],
    /// );
    /// assert_eq!(table.rows().len(), 1);
    /// assert_eq!(table.column_index("Equipements"), Some(1));
    /// assert_eq!(table.cell(0, 0), "A");
    /// ```
    pub fn new(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        let rows = rows
            .into_iter()
            .filter(|row| row.iter().any(|cell| !cell.is_empty()))
            .collect();
        Self { headers, rows }
    }

    /// Column headers in file order.
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Data rows, excluding the header row.
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Position of the column whose header is exactly `name`.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// The cell at `row`, `col`; empty if the row is short.
    pub fn cell(&self, row: usize, col: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map(String::as_str)
            .unwrap_or("")
    }
}

/// Reads the table at `path`, choosing the reader by file extension.
///
/// # Errors
///
/// `UnsupportedFormat` for unknown extensions, `InputRead` if the file
/// cannot be opened or parsed.
pub fn read_table<P: AsRef<Path>>(path: P) -> PlannerResult<Table> {
    let path = path.as_ref();
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    let table = match ext.as_str() {
        "csv" => read_csv(path)?,
        "xlsx" | "xlsm" | "xls" | "ods" => read_workbook(path)?,
        _ => {
            return Err(PlannerError::UnsupportedFormat {
                path: path.display().to_string(),
            });
        }
    };

    debug!(
        path = %path.display(),
        columns = table.headers.len(),
        rows = table.rows.len(),
        "Read input table"
    );
    Ok(table)
}

fn input_error(path: &Path, message: impl ToString) -> PlannerError {
    PlannerError::InputRead {
        path: path.display().to_string(),
        message: message.to_string(),
    }
}

fn read_csv(path: &Path) -> PlannerResult<Table> {
    let file = File::open(path).map_err(|e| input_error(path, e))?;
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(file);

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| input_error(path, e))?
        .iter()
        .map(|h| h.trim().trim_start_matches('\u{feff}').to_string())
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| input_error(path, e))?;
        rows.push(record.iter().map(|v| v.trim().to_string()).collect());
    }

    Ok(Table::new(headers, rows))
}

fn read_workbook(path: &Path) -> PlannerResult<Table> {
    let mut workbook = open_workbook_auto(path).map_err(|e| input_error(path, e))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| input_error(path, "workbook has no worksheet"))?
        .map_err(|e| input_error(path, e))?;

    let mut cells = range.rows();
    let headers: Vec<String> = match cells.next() {
        Some(header) => header.iter().map(cell_text).collect(),
        None => return Ok(Table::default()),
    };
    let rows = cells.map(|row| row.iter().map(cell_text).collect()).collect();

    Ok(Table::new(headers, rows))
}

/// Date-typed cells otherwise display as their Excel serial number.
fn cell_text(cell: &Data) -> String {
    match cell {
        Data::DateTime(_) | Data::DateTimeIso(_) => match cell.as_date() {
            Some(date) => date.format("%Y-%m-%d").to_string(),
            None => cell.to_string(),
        },
        other => other.to_string().trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    fn csv_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_read_csv_with_headers() {
        let file = csv_file("Description site,Nb équipements\nGare A,3\nGare B, 20 \n");
        let table = read_table(file.path()).unwrap();

        assert_eq!(table.headers(), &["Description site", "Nb équipements"]);
        assert_eq!(table.rows().len(), 2);
        assert_eq!(table.cell(1, 1), "20");
    }

    #[test]
    fn test_read_csv_skips_blank_rows_and_tolerates_short_rows() {
        let file = csv_file("Site,Equip,Mois\nA,1,2025-03\n,,\nB,2\n");
        let table = read_table(file.path()).unwrap();

        assert_eq!(table.rows().len(), 2);
        assert_eq!(table.cell(1, 2), "");
    }

    #[test]
    fn test_utf8_bom_stripped_from_first_header() {
        let file = csv_file("\u{feff}Site,Equip\nA,1\n");
        let table = read_table(file.path()).unwrap();
        assert_eq!(table.column_index("Site"), Some(0));
    }

    #[test]
    fn test_unsupported_extension() {
        let result = read_table("sites.json");
        assert!(matches!(result, Err(PlannerError::UnsupportedFormat { .. })));
    }

    #[test]
    fn test_missing_file_is_input_error() {
        let result = read_table("/definitely/not/here.csv");
        assert!(matches!(result, Err(PlannerError::InputRead { .. })));
    }

    #[test]
    fn test_date_typed_cell_renders_as_iso_date() {
        use crate::input::parse_period;
        use calamine::{ExcelDateTime, ExcelDateTimeType};
        use chrono::NaiveDate;

        // Serial 45717 is 2025-03-01
        let cell = Data::DateTime(ExcelDateTime::new(45717.0, ExcelDateTimeType::DateTime, false));
        let text = cell_text(&cell);
        assert_eq!(text, "2025-03-01");
        assert_eq!(parse_period(&text), NaiveDate::from_ymd_opt(2025, 3, 1));

        let iso = Data::DateTimeIso("2025-04-15T00:00:00".into());
        assert_eq!(cell_text(&iso), "2025-04-15");
    }

    #[test]
    fn test_non_date_cells_render_as_text() {
        assert_eq!(cell_text(&Data::String(" Gare A ".into())), "Gare A");
        assert_eq!(cell_text(&Data::Float(12.0)), "12");
        assert_eq!(cell_text(&Data::Empty), "");
    }

    #[test]
    fn test_corrupt_workbook_is_input_error() {
        let mut file = Builder::new().suffix(".xlsx").tempfile().unwrap();
        file.write_all(b"not a zip archive").unwrap();
        let result = read_table(file.path());
        assert!(matches!(result, Err(PlannerError::InputRead { .. })));
    }
}
