use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::Header;
use crate::utils::error::Result;

/// Response model: status code, headers and the raw body text.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Response {
    pub status_code: u16,
    pub headers: Vec<Header>,
    pub body: Option<String>,
}

impl Response {
    /// First header value with the given name, case-insensitive.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|h| h.name.eq_ignore_ascii_case(name))
            .map(|h| h.value.as_str())
    }

    /// Parses the body as a JSON value.
    pub fn to_json(&self) -> Result<serde_json::Value> {
        Ok(serde_json::from_str(self.body.as_deref().unwrap_or(""))?)
    }

    /// Parses the body as a JSON array.
    pub fn to_json_array(&self) -> Result<Vec<serde_json::Value>> {
        Ok(serde_json::from_str(self.body.as_deref().unwrap_or(""))?)
    }

    /// Deserializes the body into a typed value.
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_str(self.body.as_deref().unwrap_or(""))?)
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.body.as_deref().unwrap_or("null"))
    }
}
