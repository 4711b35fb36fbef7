//! `termline table`

use anyhow::{Context, Result};
use serde_json::{Map, Value};
use std::path::Path;
use termline::{Console, Row};
use tracing::debug;

type Record = Map<String, Value>;

/// Print the objects in `file` as a table.
///
/// Without `columns`, the keys of the first object are used.
pub async fn table(console: &mut Console, file: &Path, columns: Option<&[String]>) -> Result<()> {
    let text = tokio::fs::read_to_string(file)
        .await
        .with_context(|| format!("failed to read {}", file.display()))?;
    let records: Vec<Record> = serde_json::from_str(&text)
        .with_context(|| format!("{} is not a JSON array of objects", file.display()))?;

    let columns: Vec<String> = match columns {
        Some(columns) => columns.to_vec(),
        None => records
            .first()
            .map(|first| first.keys().cloned().collect())
            .unwrap_or_default(),
    };
    if columns.is_empty() {
        console.logger.warn("nothing to show");
        return Ok(());
    }
    debug!(rows = records.len(), ?columns, "printing table");

    let rows: Vec<Row> = records.iter().map(to_row).collect();
    let columns: Vec<&str> = columns.iter().map(String::as_str).collect();
    console.table.print(&columns, &rows);
    Ok(())
}

fn to_row(record: &Record) -> Row {
    record
        .iter()
        .map(|(key, value)| (key.clone(), cell(value)))
        .collect()
}

fn cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_cell_text() {
        assert_eq!(cell(&json!(null)), "");
        assert_eq!(cell(&json!("plain")), "plain");
        assert_eq!(cell(&json!(42)), "42");
        assert_eq!(cell(&json!(true)), "true");
        assert_eq!(cell(&json!([1, 2])), "[1,2]");
    }

    #[test]
    fn test_to_row() {
        let Value::Object(record) = json!({"name": "jq", "size": 12}) else {
            panic!("expected object");
        };

        let row = to_row(&record);

        assert_eq!(row.get("name").map(String::as_str), Some("jq"));
        assert_eq!(row.get("size").map(String::as_str), Some("12"));
    }
}
