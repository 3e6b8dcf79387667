use crate::config::RequestConfig;
use crate::response::Response;

/// Hook invoked after every performed request, success or failure.
/// `response` is `None` when the request failed before a response was
/// received (connect error, timeout).
pub trait RequestListener: Send + Sync {
    fn on_request_performed(
        &self,
        config: &RequestConfig,
        response: Option<&Response>,
        call_site: &str,
    );
}

/// Default listener: logs the performed request and its response, tagged
/// with the source location that issued the call.
pub struct LoggingListener;

impl RequestListener for LoggingListener {
    fn on_request_performed(
        &self,
        config: &RequestConfig,
        response: Option<&Response>,
        call_site: &str,
    ) {
        let body = response
            .map(|r| r.to_string())
            .unwrap_or_else(|| "null".to_string());

        tracing::info!(caller = call_site, "Request: {}\nResponse: {}", config, body);
    }
}
