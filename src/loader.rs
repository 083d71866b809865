//! Paraphrase corpus loader.
//!
//! Reads JSON Lines where every line carries `paraphrase_set_id`,
//! `sentence_id` and `paraphrase`. Other columns (`lists`, `tags`,
//! `language`, ...) are ignored. Sentences are NFC-normalized and lower-cased.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use serde_json::{Map, Value};
use unicode_normalization::UnicodeNormalization;

use crate::core::Row;
use crate::error::{PipelineError, Result};

/// Load rows from a JSON Lines file
pub fn load_rows(path: impl AsRef<Path>) -> Result<Vec<Row>> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let rows = parse_rows(BufReader::new(file))?;

    tracing::info!("📥 Loaded {} rows from {}", rows.len(), path.display());

    Ok(rows)
}

/// Parse rows from any line reader; blank lines are skipped
pub fn parse_rows<R: BufRead>(reader: R) -> Result<Vec<Row>> {
    let mut rows = Vec::new();
    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        rows.push(parse_line(index + 1, &line)?);
    }
    Ok(rows)
}

fn parse_line(line_no: usize, line: &str) -> Result<Row> {
    let value: Value = serde_json::from_str(line)
        .map_err(|e| PipelineError::validation(line_no, format!("invalid JSON: {}", e)))?;

    let Value::Object(fields) = value else {
        return Err(PipelineError::validation(line_no, "expected a JSON object"));
    };

    let group_id = integer_column(line_no, &fields, "paraphrase_set_id")?;
    let member_id = integer_column(line_no, &fields, "sentence_id")?;
    let text = match fields.get("paraphrase") {
        Some(Value::String(s)) => normalize_text(s),
        Some(other) => {
            return Err(PipelineError::validation(
                line_no,
                format!("column 'paraphrase' must be a string, got {}", other),
            ))
        }
        None => return Err(PipelineError::validation(line_no, "missing column 'paraphrase'")),
    };

    Ok(Row::new(group_id, member_id, text))
}

fn integer_column(line_no: usize, fields: &Map<String, Value>, name: &str) -> Result<i64> {
    match fields.get(name) {
        Some(value) => value.as_i64().ok_or_else(|| {
            PipelineError::validation(
                line_no,
                format!("column '{}' must be an integer, got {}", name, value),
            )
        }),
        None => Err(PipelineError::validation(
            line_no,
            format!("missing column '{}'", name),
        )),
    }
}

fn normalize_text(text: &str) -> String {
    text.nfc().collect::<String>().to_lowercase()
}
