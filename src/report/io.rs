use std::{
    collections::HashSet,
    fs,
    path::{Path, PathBuf},
};

use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::Value;

use crate::{
    error::{ImportError, IoError, JournalError, JournalResult},
    trade::Trade,
};

// ================================================================================================
// Export
// ================================================================================================

/// Serializes trades to a JSON array, pretty-printed with 2-space indentation.
pub fn export_json(trades: &[Trade]) -> JournalResult<String> {
    serde_json::to_string_pretty(trades).map_err(|e| IoError::Json(e).into())
}

/// `<prefix>-<YYYY-MM-DD>.json`
pub fn export_filename(prefix: &str, date: NaiveDate) -> String {
    format!("{prefix}-{}.json", date.format("%Y-%m-%d"))
}

/// Writes the export document into `dir` and returns the file path.
///
/// # Side Effects
/// - Creates the directory if missing.
/// - Overwrites the file if it exists.
pub fn write_export(
    trades: &[Trade],
    dir: impl AsRef<Path>,
    filename: &str,
) -> JournalResult<PathBuf> {
    let dir = dir.as_ref();
    if !dir.exists() {
        fs::create_dir_all(dir).map_err(|source| IoError::FileSystem {
            action: "create directory",
            path: dir.to_path_buf(),
            source,
        })?;
    }

    let path = dir.join(filename);
    fs::write(&path, export_json(trades)?).map_err(IoError::Io)?;
    Ok(path)
}

// ================================================================================================
// Import
// ================================================================================================

/// Parses and validates a journal document.
///
/// The top-level value must be an array, every element must decode into a
/// valid [`Trade`], and identifiers must be unique. The first violation aborts
/// the whole import.
pub fn parse_document(document: &str) -> JournalResult<Vec<Trade>> {
    let value: Value = serde_json::from_str(document).map_err(ImportError::InvalidJson)?;

    let elements = match value {
        Value::Array(elements) => elements,
        other => return Err(ImportError::NotAnArray(json_type_name(&other)).into()),
    };

    let mut seen = HashSet::with_capacity(elements.len());
    elements
        .into_iter()
        .enumerate()
        .map(|(index, element)| {
            let trade = Trade::deserialize(element)
                .map_err(|source| ImportError::MalformedRecord { index, source })?;
            if !seen.insert(trade.id().clone()) {
                return Err(ImportError::DuplicateId(trade.id().to_string()).into());
            }
            Ok(trade)
        })
        .collect::<Result<Vec<_>, JournalError>>()
}

/// Reads a user-selected import file.
///
/// This is the only suspending step of an import. Applying the content is
/// synchronous (see [`Journal::import_json`](crate::journal::Journal::import_json)).
pub async fn read_import_file(path: impl AsRef<Path>) -> JournalResult<String> {
    let path = path.as_ref();
    tokio::fs::read_to_string(path).await.map_err(|source| {
        IoError::FileSystem {
            action: "read",
            path: path.to_path_buf(),
            source,
        }
        .into()
    })
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_TRADES: &str = r#"[
        {"id": "1", "symbol": "AAPL", "action": "buy", "quantity": 100,
         "entryPrice": 150.25, "exitPrice": 155.50, "entryDate": "2024-01-15",
         "exitDate": "2024-01-18", "pnl": 525, "status": "closed"},
        {"id": "3", "symbol": "MSFT", "action": "buy", "quantity": 75,
         "entryPrice": 380.50, "entryDate": "2024-01-25", "status": "open"}
    ]"#;

    #[test]
    fn parses_valid_document() {
        let trades = parse_document(TWO_TRADES).expect("valid document");
        assert_eq!(trades.len(), 2);
        assert!(trades[0].is_closed());
        assert!(!trades[1].is_closed());
    }

    #[test]
    fn rejects_non_array_documents() {
        for doc in [r#""not an array""#, r#"{"a":1}"#, "42", "null"] {
            assert!(
                matches!(
                    parse_document(doc),
                    Err(JournalError::Import(ImportError::NotAnArray(_)))
                ),
                "{doc} should be rejected"
            );
        }
    }

    #[test]
    fn rejects_invalid_json() {
        assert!(matches!(
            parse_document("[{"),
            Err(JournalError::Import(ImportError::InvalidJson(_)))
        ));
    }

    #[test]
    fn reports_index_of_bad_record() {
        let doc = r#"[
            {"id": "1", "symbol": "AAPL", "action": "buy", "quantity": 1,
             "entryPrice": 1, "entryDate": "2024-01-15", "status": "open"},
            {"id": "2", "symbol": "AAPL", "action": "hold", "quantity": 1,
             "entryPrice": 1, "entryDate": "2024-01-15", "status": "open"}
        ]"#;
        assert!(matches!(
            parse_document(doc),
            Err(JournalError::Import(ImportError::MalformedRecord { index: 1, .. }))
        ));
    }

    #[test]
    fn rejects_duplicate_ids() {
        let doc = r#"[
            {"id": "1", "symbol": "A", "action": "buy", "quantity": 1,
             "entryPrice": 1, "entryDate": "2024-01-15", "status": "open"},
            {"id": "1", "symbol": "B", "action": "sell", "quantity": 1,
             "entryPrice": 1, "entryDate": "2024-01-15", "status": "open"}
        ]"#;
        assert!(matches!(
            parse_document(doc),
            Err(JournalError::Import(ImportError::DuplicateId(id))) if id == "1"
        ));
    }

    #[test]
    fn export_is_pretty_printed_with_two_spaces() {
        let trades = parse_document(TWO_TRADES).unwrap();
        let json = export_json(&trades).unwrap();
        assert!(json.starts_with("[\n  {\n    \"id\": \"1\""), "{json}");
        assert_eq!(parse_document(&json).unwrap(), trades);
    }

    #[test]
    fn export_writes_money_as_json_numbers() {
        let trades = parse_document(TWO_TRADES).unwrap();
        let json = export_json(&trades).unwrap();
        assert!(json.contains(r#""entryPrice": 150.25"#), "{json}");
        assert!(json.contains(r#""pnl": 525.00"#), "{json}");

        let value: Value = serde_json::from_str(&json).unwrap();
        for key in ["entryPrice", "exitPrice", "pnl"] {
            assert!(value[0][key].is_number(), "{key} is {}", value[0][key]);
        }
        assert!(value[1]["entryPrice"].is_number());
    }

    #[test]
    fn filename_carries_the_date() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(
            export_filename("trading-journal", date),
            "trading-journal-2024-03-09.json"
        );
    }
}
