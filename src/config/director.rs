use std::path::PathBuf;

use crate::config::{Header, RequestConfig, YamlConfig};
use crate::request::builder::RequestBuilder;
use crate::utils::error::Result;

pub const DEFAULT_CONFIG_FILE: &str = "http-request.yml";

/// Assembles a [`RequestConfig`] from up to three layers, later layers
/// winning:
///
/// 1. the YAML defaults file (headers, timeout, max response length),
/// 2. the per-request config object set via `set_config` (any present
///    field replaces the layer below, its headers replace the defaults),
/// 3. the builder values (headers are appended, the token is appended as
///    an `Authorization` header last).
pub struct RequestDirector {
    config_file: PathBuf,
}

impl RequestDirector {
    pub fn new() -> Self {
        Self::with_config_file(DEFAULT_CONFIG_FILE)
    }

    pub fn with_config_file(path: impl Into<PathBuf>) -> Self {
        Self {
            config_file: path.into(),
        }
    }

    pub fn construct(&self, builder: &RequestBuilder) -> Result<RequestConfig> {
        let yaml = YamlConfig::load(&self.config_file)?;

        let mut config = RequestConfig::default();
        self.apply_yaml_defaults(&mut config, &yaml);
        self.apply_config_override(&mut config, builder.config());
        self.apply_builder(&mut config, builder);

        Ok(config)
    }

    fn apply_yaml_defaults(&self, config: &mut RequestConfig, yaml: &YamlConfig) {
        if let Some(headers) = &yaml.headers {
            config.headers = headers
                .iter()
                .map(|(name, value)| Header::new(name, value))
                .collect();
        }
        config.request_timeout = yaml.connection_timeout;
        config.max_response_length = yaml.max_response_length.unwrap_or(0);
    }

    fn apply_config_override(&self, config: &mut RequestConfig, overrides: Option<&RequestConfig>) {
        let Some(overrides) = overrides else {
            return;
        };

        if overrides.method.is_some() {
            config.method = overrides.method;
        }
        if overrides.url.is_some() {
            config.url = overrides.url.clone();
        }
        if overrides.data.is_some() {
            config.data = overrides.data.clone();
        }
        if !overrides.headers.is_empty() {
            config.headers = overrides.headers.clone();
        }
        if !overrides.expected_status_codes.is_empty() {
            config.expected_status_codes = overrides.expected_status_codes.clone();
        }
        if !overrides.path_params.is_empty() {
            config.path_params = overrides.path_params.clone();
        }
        if overrides.max_response_length != 0 {
            config.max_response_length = overrides.max_response_length;
        }
        if overrides.request_timeout.is_some() {
            config.request_timeout = overrides.request_timeout;
        }
        if overrides.debug {
            config.debug = true;
        }
        if overrides.check_no_errors {
            config.check_no_errors = true;
        }
    }

    fn apply_builder(&self, config: &mut RequestConfig, builder: &RequestBuilder) {
        if builder.method().is_some() {
            config.method = builder.method();
        }
        if let Some(url) = builder.url() {
            config.url = Some(url.to_string());
        }
        if let Some(data) = builder.data() {
            config.data = Some(data.clone());
        }

        config.headers.extend(builder.headers().iter().cloned());
        if let Some(token) = builder.token() {
            config.headers.push(Header::new("Authorization", token));
        }

        if !builder.expected_status_codes().is_empty() {
            config.expected_status_codes = builder.expected_status_codes().to_vec();
        }
        if !builder.path_params().is_empty() {
            config.path_params = builder.path_params().to_vec();
        }
        if builder.debug() {
            config.debug = true;
        }
        if builder.check_no_errors() {
            config.check_no_errors = true;
        }
    }
}

impl Default for RequestDirector {
    fn default() -> Self {
        Self::new()
    }
}
