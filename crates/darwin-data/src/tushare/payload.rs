//! Wire types for the Tushare Pro HTTP API.
//!
//! Requests are a JSON object naming the API, the token, query parameters and a comma
//! separated field list. Responses carry a status code and a column-oriented table:
//!
//! ```json
//! {"code": 0, "msg": "", "data": {"fields": ["ts_code", "close"], "items": [["600000.SH", 7.1]]}}
//! ```

use crate::error::{DataError, Result};
use crate::source::Endpoint;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Request body posted to the API.
#[derive(Debug, Serialize)]
pub struct TushareRequest<'a> {
    /// API name, e.g. `daily_basic`
    pub api_name: &'a str,
    /// Access token
    pub token: &'a str,
    /// Query parameters
    pub params: BTreeMap<&'a str, &'a str>,
    /// Comma separated field list
    pub fields: String,
}

/// Response envelope.
#[derive(Debug, Deserialize)]
pub struct TushareResponse {
    /// Zero on success
    pub code: i64,
    /// Error message when `code` is non-zero
    #[serde(default)]
    pub msg: Option<String>,
    /// Result table
    #[serde(default)]
    pub data: Option<TusharePayload>,
}

/// Column-oriented result table.
#[derive(Debug, Default, Deserialize)]
pub struct TusharePayload {
    /// Column names
    pub fields: Vec<String>,
    /// Rows, one value per field
    #[serde(default)]
    pub items: Vec<Vec<Value>>,
}

impl TushareResponse {
    /// Unwrap the payload, mapping a non-zero status to [`DataError::Api`].
    pub fn into_payload(self, api: &str) -> Result<TusharePayload> {
        if self.code != 0 {
            return Err(DataError::Api {
                api: api.to_string(),
                code: self.code,
                msg: self.msg.unwrap_or_default(),
            });
        }
        Ok(self.data.unwrap_or_default())
    }
}

impl TusharePayload {
    /// Convert the table into a frame.
    ///
    /// Known text fields (codes, dates, names) become string columns; every other column
    /// becomes nullable `f64`, with numeric strings parsed and anything else as null.
    pub fn into_frame(self) -> Result<DataFrame> {
        let width = self.fields.len();
        if let Some(row) = self.items.iter().find(|row| row.len() != width) {
            return Err(DataError::Parse(format!(
                "row has {} values but {} fields were returned",
                row.len(),
                width
            )));
        }

        let columns: Vec<Column> = self
            .fields
            .iter()
            .enumerate()
            .map(|(idx, field)| {
                let cells = self.items.iter().map(|row| &row[idx]);
                if Endpoint::is_text_field(field) {
                    let values: Vec<Option<String>> = cells.map(text_cell).collect();
                    Series::new(field.as_str().into(), values).into()
                } else {
                    let values: Vec<Option<f64>> = cells.map(numeric_cell).collect();
                    Series::new(field.as_str().into(), values).into()
                }
            })
            .collect();

        Ok(DataFrame::new(columns)?)
    }
}

fn text_cell(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn numeric_cell(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
