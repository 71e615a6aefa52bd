//! Input ingestion.
//!
//! Reads a CSV or spreadsheet table, locates the site, equipment and period
//! columns, and turns each line into a [`SiteRow`].

mod coerce;
mod columns;
mod table;

pub use coerce::{coerce_count, parse_period};
pub use columns::{
    ColumnSelection, PREFERRED_SITE_HEADER, SiteRow, detect_equipment_column,
    detect_period_column, detect_site_column, extract_rows, resolve_columns,
};
pub use table::{Table, read_table};
