use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use url::Url;

use crate::config::{Header, RequestConfig};
use crate::request::listener::{LoggingListener, RequestListener};
use crate::response::Response;
use crate::utils::curl::CurlGenerator;
use crate::utils::error::{HttpRequestError, Result};
use crate::utils::message::MessageComposer;
use crate::utils::path_params::expand_path_params;

#[async_trait]
pub trait Perform: Send + Sync {
    async fn request(&self, config: &RequestConfig) -> Result<Response>;
}

/// Executes an assembled [`RequestConfig`], captures the response and runs
/// the post-conditions (expected status codes, error-free body).
///
/// Listeners are notified after every attempt, including transport
/// failures, so logging sees failed requests too.
pub struct HttpRequestPerformer {
    client: Client,
    listeners: Vec<Box<dyn RequestListener>>,
}

impl HttpRequestPerformer {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            listeners: vec![Box::new(LoggingListener)],
        }
    }

    pub fn add_request_listener(&mut self, listener: Box<dyn RequestListener>) {
        self.listeners.push(listener);
    }

    /// Performs the request on behalf of a caller at `call_site`, which is
    /// forwarded to listeners for log attribution.
    pub async fn request_from(&self, config: &RequestConfig, call_site: &str) -> Result<Response> {
        let config = effective_config(config)?;
        let result = self.perform(&config).await;
        for listener in &self.listeners {
            listener.on_request_performed(&config, result.as_ref().ok(), call_site);
        }

        result
    }

    async fn perform(&self, config: &RequestConfig) -> Result<Response> {
        let method = config.method.ok_or_else(|| HttpRequestError::ConfigError {
            message: "request method is not set".to_string(),
        })?;
        let url_str = config.url.as_deref().ok_or_else(|| HttpRequestError::ConfigError {
            message: "request url is not set".to_string(),
        })?;
        let url = Url::parse(url_str)?;

        if config.debug {
            tracing::debug!("Performing request:\n{}", CurlGenerator::new(config).render());
        }

        let mut request = self.client.request(method.into(), url);
        if let Some(timeout) = config.request_timeout {
            request = request.timeout(Duration::from_millis(timeout));
        }
        for header in &config.headers {
            request = request.header(&header.name, &header.value);
        }
        if let Some(data) = &config.data {
            request = request.body(body_text(data));
        }

        let http_response = request.send().await?;
        let status_code = http_response.status().as_u16();
        let headers = http_response
            .headers()
            .iter()
            .map(|(name, value)| {
                Header::new(name.as_str(), String::from_utf8_lossy(value.as_bytes()))
            })
            .collect();
        let text = http_response.text().await?;

        let response = Response {
            status_code,
            headers,
            body: if text.is_empty() { None } else { Some(text) },
        };

        if config.debug {
            tracing::debug!("Response status: {}\nResponse body: {}", status_code, response);
        }

        check_status_code(config, &response)?;
        check_no_errors(config, &response)?;

        Ok(response)
    }
}

impl Default for HttpRequestPerformer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Perform for HttpRequestPerformer {
    async fn request(&self, config: &RequestConfig) -> Result<Response> {
        self.request_from(config, "<unknown>").await
    }
}

/// Expands path parameters into the URL so every downstream consumer
/// (transport, curl rendering, failure messages) sees the real URL.
fn effective_config(config: &RequestConfig) -> Result<RequestConfig> {
    let mut effective = config.clone();
    if let Some(url) = &config.url {
        effective.url = Some(expand_path_params(url, &config.path_params)?);
    }

    Ok(effective)
}

/// A JSON object body is sent as its JSON text, a string body is sent raw.
fn body_text(data: &serde_json::Value) -> String {
    match data {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

fn check_status_code(config: &RequestConfig, response: &Response) -> Result<()> {
    if config.expected_status_codes.is_empty()
        || config.expected_status_codes.contains(&response.status_code)
    {
        return Ok(());
    }

    let expected = match config.expected_status_codes.as_slice() {
        [single] => single.to_string(),
        many => format!("one of {:?}", many),
    };
    let error = format!(
        "Expected status code {} but was {}.",
        expected, response.status_code
    );

    Err(HttpRequestError::UnexpectedStatusCode {
        message: MessageComposer::new(&error, config, response).compose(),
    })
}

fn check_no_errors(config: &RequestConfig, response: &Response) -> Result<()> {
    if !config.check_no_errors {
        return Ok(());
    }
    let Some(body) = &response.body else {
        return Ok(());
    };
    let Ok(serde_json::Value::Object(object)) = serde_json::from_str::<serde_json::Value>(body)
    else {
        return Ok(());
    };
    let Some(errors) = object.get("errors") else {
        return Ok(());
    };

    let has_errors = match errors {
        serde_json::Value::Null => false,
        serde_json::Value::Array(items) => !items.is_empty(),
        serde_json::Value::Object(map) => !map.is_empty(),
        _ => true,
    };

    if has_errors {
        return Err(HttpRequestError::ErrorsInResponse {
            message: MessageComposer::new("Response contains errors.", config, response).compose(),
        });
    }

    Ok(())
}
