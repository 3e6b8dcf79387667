use serde::{Deserialize, Serialize};
use std::fmt;

use crate::utils::error::{HttpRequestError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Patch => "PATCH",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Patch => reqwest::Method::PATCH,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

/// A single HTTP header. Order matters and duplicates are allowed, so
/// headers travel as a list rather than a map.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    pub name: String,
    pub value: String,
}

impl Header {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

impl fmt::Display for Header {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.value)
    }
}

/// Fully assembled configuration for one request: the result of merging
/// YAML defaults, an optional per-request override and the builder values.
///
/// `request_timeout` is in milliseconds. `max_response_length` limits the
/// response body embedded in failure messages, 0 means unlimited.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RequestConfig {
    pub method: Option<Method>,
    pub url: Option<String>,
    pub data: Option<serde_json::Value>,
    pub headers: Vec<Header>,
    pub expected_status_codes: Vec<u16>,
    pub path_params: Vec<String>,
    pub max_response_length: usize,
    pub request_timeout: Option<u64>,
    pub debug: bool,
    pub check_no_errors: bool,
}

impl RequestConfig {
    pub fn to_json(&self) -> Result<serde_json::Value> {
        serde_json::to_value(self).map_err(HttpRequestError::from)
    }
}

impl fmt::Display for RequestConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string(self).map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_display_is_uppercase() {
        assert_eq!(Method::Get.to_string(), "GET");
        assert_eq!(Method::Patch.to_string(), "PATCH");
    }

    #[test]
    fn test_config_display_renders_json() {
        let config = RequestConfig {
            method: Some(Method::Post),
            url: Some("http://localhost/items".to_string()),
            ..Default::default()
        };

        let rendered = config.to_string();
        assert!(rendered.contains("\"method\":\"POST\""));
        assert!(rendered.contains("\"url\":\"http://localhost/items\""));
    }
}
