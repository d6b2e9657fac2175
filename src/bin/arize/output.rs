//! table, json and csv rendering

use crate::cli::ListArgs;
use anyhow::{bail, Context, Result};
use serde::Serialize;
use serde_json::{Map, Value};
use std::path::Path;

/// print or write a list of records
pub fn emit_rows<T: Serialize>(
    rows: &[T],
    default_columns: &[&str],
    list: &ListArgs,
    json: bool,
) -> Result<()> {
    let rows = to_objects(rows)?;

    if let Some(path) = &list.csv {
        let columns = if list.columns.is_empty() {
            record_columns(&rows, default_columns)
        } else {
            select_columns(&rows, default_columns, &list.columns)?
        };
        write_csv(path, &columns, &rows)?;
        tracing::info!(rows = rows.len(), path = %path.display(), "wrote csv");
        return Ok(());
    }

    let columns = select_columns(&rows, default_columns, &list.columns)?;
    if json {
        let projected: Vec<Value> = if list.columns.is_empty() {
            rows.into_iter().map(Value::Object).collect()
        } else {
            rows.iter()
                .map(|row| Value::Object(project(row, &columns)))
                .collect()
        };
        println!("{}", serde_json::to_string_pretty(&projected)?);
    } else {
        print!("{}", render_table(&columns, &rows));
    }
    Ok(())
}

/// print one record as json or `key: value` lines
pub fn emit_one<T: Serialize>(item: &T, json: bool) -> Result<()> {
    let value = serde_json::to_value(item)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }
    match value {
        Value::Object(map) => {
            let width = map.keys().map(String::len).max().unwrap_or(0);
            for (key, value) in &map {
                println!("{key:<width$}  {}", cell(value));
            }
        }
        other => println!("{}", cell(&other)),
    }
    Ok(())
}

/// print a bare message, or `{"key": value}` in json mode
pub fn emit_value(key: &str, value: Value, json: bool) -> Result<()> {
    if json {
        let mut map = Map::new();
        map.insert(key.to_string(), value);
        println!("{}", serde_json::to_string_pretty(&Value::Object(map))?);
    } else {
        println!("{}", cell(&value));
    }
    Ok(())
}

fn to_objects<T: Serialize>(rows: &[T]) -> Result<Vec<Map<String, Value>>> {
    rows.iter()
        .map(|row| -> Result<Map<String, Value>> {
            match serde_json::to_value(row)? {
                Value::Object(map) => Ok(map),
                other => bail!("expected an object row, got {other}"),
            }
        })
        .collect()
}

/// `--columns` names, matched to record keys ignoring case and underscores
fn select_columns(
    rows: &[Map<String, Value>],
    default_columns: &[&str],
    requested: &[String],
) -> Result<Vec<String>> {
    if requested.is_empty() {
        return Ok(default_columns.iter().map(|c| c.to_string()).collect());
    }
    let known: Vec<&String> = match rows.first() {
        Some(row) => row.keys().collect(),
        None => return Ok(requested.to_vec()),
    };
    requested
        .iter()
        .map(|wanted| {
            known
                .iter()
                .find(|key| normalize(key) == normalize(wanted))
                .map(|key| key.to_string())
                .with_context(|| {
                    let names: Vec<&str> = known.iter().map(|k| k.as_str()).collect();
                    format!("unknown column '{wanted}'; available: {}", names.join(", "))
                })
        })
        .collect()
}

/// every field of the records: the default columns first, then the rest in
/// first-seen order
fn record_columns(rows: &[Map<String, Value>], default_columns: &[&str]) -> Vec<String> {
    let mut columns: Vec<String> = default_columns.iter().map(|c| c.to_string()).collect();
    for key in rows.iter().flat_map(|row| row.keys()) {
        if !columns.contains(key) {
            columns.push(key.clone());
        }
    }
    columns
}

fn normalize(name: &str) -> String {
    name.replace('_', "").to_ascii_lowercase()
}

fn project(row: &Map<String, Value>, columns: &[String]) -> Map<String, Value> {
    columns
        .iter()
        .map(|column| {
            let value = row.get(column).cloned().unwrap_or(Value::Null);
            (column.clone(), value)
        })
        .collect()
}

fn cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn render_table(columns: &[String], rows: &[Map<String, Value>]) -> String {
    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|row| {
            columns
                .iter()
                .map(|c| row.get(c).map(cell).unwrap_or_default())
                .collect()
        })
        .collect();
    let widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(i, column)| {
            cells
                .iter()
                .map(|row| row[i].chars().count())
                .chain(std::iter::once(column.len()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    let line = |values: &[String]| -> String {
        let padded: Vec<String> = values
            .iter()
            .zip(&widths)
            .map(|(value, &width)| format!("{value:<width$}"))
            .collect();
        format!("{}\n", padded.join("  ").trim_end())
    };
    out.push_str(&line(columns));
    for row in &cells {
        out.push_str(&line(row));
    }
    out
}

fn write_csv(path: &Path, columns: &[String], rows: &[Map<String, Value>]) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)
        .with_context(|| format!("cannot write csv to {}", path.display()))?;
    wtr.write_record(columns)?;
    for row in rows {
        wtr.write_record(
            columns
                .iter()
                .map(|c| row.get(c).map(cell).unwrap_or_default()),
        )?;
    }
    wtr.flush()?;
    Ok(())
}
