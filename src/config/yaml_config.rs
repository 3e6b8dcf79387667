use crate::utils::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// Optional defaults loaded from `http-request.yml`. Keys are camelCase to
/// stay compatible with existing configuration files:
///
/// ```yaml
/// connectionTimeout: 600000
/// maxResponseLength: 100
/// headers:
///   Accept: application/json
///   Content-Type: application/json; charset=UTF-8
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct YamlConfig {
    /// Request timeout in milliseconds, applied to the whole request.
    pub connection_timeout: Option<u64>,

    /// Default headers applied to every request before any builder headers.
    pub headers: Option<BTreeMap<String, String>>,

    /// Max response body length embedded in failure messages. 0 = unlimited.
    pub max_response_length: Option<usize>,
}

impl YamlConfig {
    /// Loads the configuration file. A missing file behaves exactly like an
    /// empty one; a present but unparsable file is an error.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        if !path.as_ref().exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(&path)?;
        Self::from_yaml_str(&content)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let processed = Self::substitute_env_vars(content);
        if processed.trim().is_empty() {
            return Ok(Self::default());
        }

        Ok(serde_yaml::from_str(&processed)?)
    }

    /// Replaces `${VAR_NAME}` occurrences with environment values before
    /// parsing. Unset variables are left verbatim.
    fn substitute_env_vars(content: &str) -> String {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").unwrap();

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .to_string()
    }
}
