//! Column detection and row extraction.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{PlannerError, PlannerResult};

use super::coerce::coerce_count;
use super::table::Table;

/// Preferred header for the site column.
pub const PREFERRED_SITE_HEADER: &str = "Description site";

const PERIOD_MARKERS: &[&str] = &["mois", "month", "période", "periode", "period"];

/// One input line: a site, its equipment count and optionally its month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteRow {
    /// Site identifier.
    pub site: String,
    /// Equipment count after coercion.
    pub equipment_count: f64,
    /// Raw month text; parsed later, `None` when no period column is used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period: Option<String>,
}

/// Which columns hold the site, equipment count and period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSelection {
    /// Site column index.
    pub site: usize,
    /// Equipment count column index.
    pub equipment: usize,
    /// Period column index, if any.
    pub period: Option<usize>,
}

/// Index of the site column: `Description site`, else the first header
/// mentioning "site", else the first column.
pub fn detect_site_column(headers: &[String]) -> usize {
    headers
        .iter()
        .position(|h| h == PREFERRED_SITE_HEADER)
        .or_else(|| headers.iter().position(|h| h.to_lowercase().contains("site")))
        .unwrap_or(0)
}

/// Index of the first header mentioning equipment, else the first column.
pub fn detect_equipment_column(headers: &[String]) -> usize {
    headers
        .iter()
        .position(|h| {
            let lower = h.to_lowercase();
            lower.contains("equip") || lower.contains("équip")
        })
        .unwrap_or(0)
}

/// Index of the first header naming a month or period, if any.
///
/// Markers must appear as whole words: `Mois prévu` matches, while a
/// maintenance-frequency header such as `Périodicité` does not.
pub fn detect_period_column(headers: &[String]) -> Option<usize> {
    headers.iter().position(|h| {
        h.to_lowercase()
            .split(|c: char| !c.is_alphanumeric())
            .any(|word| PERIOD_MARKERS.contains(&word))
    })
}

/// Resolves the three columns, honouring explicit names when given.
///
/// # Errors
///
/// `MissingColumn` if an explicitly named column is not a header.
///
/// # Example
///
/// ```
/// use maintenance_planner::input::{Table, resolve_columns};
///
/// let table = Table::new(
///     vec!["Client".into(), "Description site".into(), "Nb équipements".into(), "Mois".into()],
///     vec![],
/// );
/// let columns = resolve_columns(&table, None, None, None)?;
/// assert_eq!((columns.site, columns.equipment, columns.period), (1, 2, Some(3)));
/// # Ok::<(), maintenance_planner::error::PlannerError>(())
/// ```
pub fn resolve_columns(
    table: &Table,
    site: Option<&str>,
    equipment: Option<&str>,
    period: Option<&str>,
) -> PlannerResult<ColumnSelection> {
    let headers = table.headers();
    let explicit = |name: &str| {
        table.column_index(name).ok_or_else(|| PlannerError::MissingColumn {
            column: name.to_string(),
        })
    };

    let selection = ColumnSelection {
        site: match site {
            Some(name) => explicit(name)?,
            None => detect_site_column(headers),
        },
        equipment: match equipment {
            Some(name) => explicit(name)?,
            None => detect_equipment_column(headers),
        },
        period: match period {
            Some(name) => Some(explicit(name)?),
            None => detect_period_column(headers),
        },
    };

    debug!(
        site = headers.get(selection.site).map(String::as_str).unwrap_or(""),
        equipment = headers.get(selection.equipment).map(String::as_str).unwrap_or(""),
        period = ?selection.period.and_then(|i| headers.get(i)),
        "Resolved input columns"
    );
    Ok(selection)
}

/// Extracts one [`SiteRow`] per table row.
pub fn extract_rows(table: &Table, columns: &ColumnSelection) -> Vec<SiteRow> {
    (0..table.rows().len())
        .map(|i| SiteRow {
            site: table.cell(i, columns.site).to_string(),
            equipment_count: coerce_count(table.cell(i, columns.equipment)),
            period: columns.period.map(|p| table.cell(i, p).to_string()),
        })
        .collect()
}
