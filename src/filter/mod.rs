//! Equality-filter to query-string translation.

use crate::error::{ConnectorError, Result};

/// Fields the remote API can filter collections by.
const RECOGNIZED_FIELDS: [&str; 4] = ["uuid", "id", "name", "email"];

/// Single equality filter on a named field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    pub field: String,
    pub value: String,
}

impl Filter {
    pub fn eq(field: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }
}

/// Translate a filter into the query string of a collection GET.
///
/// No filter means list-all (empty string). A filter on a field the API
/// cannot filter by is rejected, never silently degraded to list-all.
pub fn translate(filter: Option<&Filter>) -> Result<String> {
    let Some(filter) = filter else {
        return Ok(String::new());
    };
    if !RECOGNIZED_FIELDS.contains(&filter.field.as_str()) {
        return Err(ConnectorError::Validation {
            message: format!("unsupported filter field '{}'", filter.field),
            status: None,
        });
    }
    Ok(format!(
        "?{}={}",
        filter.field,
        urlencoding::encode(&filter.value)
    ))
}
