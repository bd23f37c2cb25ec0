// File: src/export.rs
use crate::core::engine::DocumentReport;

/// One output cell.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(untagged)]
pub enum Cell {
    Text(String),
    Count(usize),
    Ratio(f64),
}

/// A document's statistics flattened into ordered `(column, value)` pairs:
/// `file`, `<LEVEL>_count` / `<LEVEL>_sequence` per selected level, then the
/// leftover columns and the whole-document totals.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryRow {
    columns: Vec<(String, Cell)>,
}

impl SummaryRow {
    pub fn from_report(report: &DocumentReport, separator: &str) -> Self {
        let result = &report.result;
        let mut columns = Vec::with_capacity(2 * result.levels.len() + 6);

        columns.push(("file".to_string(), Cell::Text(report.name.clone())));
        for tally in &result.levels {
            columns.push((format!("{}_count", tally.level), Cell::Count(tally.count)));
            columns.push((
                format!("{}_sequence", tally.level),
                Cell::Text(tally.sequence.join(separator)),
            ));
        }
        columns.push(("leftover_count".to_string(), Cell::Count(result.leftover_count)));
        columns.push((
            "leftover_sequence".to_string(),
            Cell::Text(result.leftover_sequence.join(separator)),
        ));
        columns.push(("total_tokens".to_string(), Cell::Count(result.total_tokens)));
        columns.push(("distinct_types".to_string(), Cell::Count(result.distinct_types)));
        columns.push(("diversity".to_string(), Cell::Ratio(result.diversity)));

        Self { columns }
    }

    pub fn columns(&self) -> &[(String, Cell)] {
        &self.columns
    }

    pub fn get(&self, column: &str) -> Option<&Cell> {
        self.columns.iter().find(|(name, _)| name == column).map(|(_, cell)| cell)
    }
}

// Serialized as a map so column order survives into JSON.
impl serde::Serialize for SummaryRow {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(self.columns.len()))?;
        for (name, cell) in &self.columns {
            map.serialize_entry(name, cell)?;
        }
        map.end()
    }
}
