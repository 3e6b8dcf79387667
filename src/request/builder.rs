use std::future::Future;
use std::panic::Location;
use std::path::PathBuf;

use crate::config::{Header, Method, RequestConfig, RequestDirector, DEFAULT_CONFIG_FILE};
use crate::request::listener::RequestListener;
use crate::request::performer::HttpRequestPerformer;
use crate::response::Response;
use crate::utils::error::Result;

/// Fluent request builder. Accumulated state lives until a terminal method
/// (`get`, `post`, `put`, `patch`, `delete`) runs and is reset afterwards,
/// success or failure, so one long-lived builder can serve many calls:
///
/// ```no_run
/// # async fn example() -> http_request::Result<()> {
/// use http_request::RequestBuilder;
///
/// let mut http = RequestBuilder::new();
/// let response = http
///     .set_header("Accept", "application/json")
///     .set_token("Bearer abc")
///     .set_expected_status_code(200)
///     .get("https://api.example.com/accounts/{accountId}")
///     .await?;
/// # Ok(())
/// # }
/// ```
///
/// The builder is single-owner; use one builder per task.
pub struct RequestBuilder {
    url: Option<String>,
    method: Option<Method>,
    data: Option<serde_json::Value>,
    token: Option<String>,
    headers: Vec<Header>,
    expected_status_codes: Vec<u16>,
    config: Option<RequestConfig>,
    path_params: Vec<String>,
    debug: bool,
    check_no_errors: bool,
    config_file: PathBuf,
    performer: HttpRequestPerformer,
}

impl RequestBuilder {
    pub fn new() -> Self {
        Self {
            url: None,
            method: None,
            data: None,
            token: None,
            headers: Vec::new(),
            expected_status_codes: Vec::new(),
            config: None,
            path_params: Vec::new(),
            debug: false,
            check_no_errors: false,
            config_file: PathBuf::from(DEFAULT_CONFIG_FILE),
            performer: HttpRequestPerformer::new(),
        }
    }

    /// Appends one header to the request.
    pub fn set_header(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.headers.push(Header::new(name, value));
        self
    }

    /// Replaces the builder's header list.
    pub fn set_headers(&mut self, headers: Vec<Header>) -> &mut Self {
        self.headers = headers;
        self
    }

    /// Sets the request body. A JSON value is sent as its JSON text, a
    /// plain string is sent raw.
    pub fn set_data(&mut self, data: impl Into<serde_json::Value>) -> &mut Self {
        self.data = Some(data.into());
        self
    }

    /// Sets the `Authorization` header value, verbatim.
    pub fn set_token(&mut self, token: impl Into<String>) -> &mut Self {
        self.token = Some(token.into());
        self
    }

    pub fn set_expected_status_code(&mut self, status_code: u16) -> &mut Self {
        self.expected_status_codes = vec![status_code];
        self
    }

    /// Accepts any of the given status codes.
    pub fn set_expected_status_codes(&mut self, status_codes: Vec<u16>) -> &mut Self {
        self.expected_status_codes = status_codes;
        self
    }

    /// Per-request configuration layer: present fields override the YAML
    /// defaults and are in turn overridden by the builder's own values.
    pub fn set_config(&mut self, config: RequestConfig) -> &mut Self {
        self.config = Some(config);
        self
    }

    /// Positional values for `{name}` placeholders in the URL.
    pub fn set_path_params<I, T>(&mut self, params: I) -> &mut Self
    where
        I: IntoIterator<Item = T>,
        T: ToString,
    {
        self.path_params = params.into_iter().map(|p| p.to_string()).collect();
        self
    }

    /// Logs the full request and response for this call at debug level.
    pub fn set_debug(&mut self, debug: bool) -> &mut Self {
        self.debug = debug;
        self
    }

    /// Fails the request when the response body is a JSON object carrying
    /// a non-empty `errors` member.
    pub fn set_check_no_errors(&mut self, check: bool) -> &mut Self {
        self.check_no_errors = check;
        self
    }

    /// Overrides the YAML defaults file, `http-request.yml` by default.
    /// Survives builder resets.
    pub fn set_config_file(&mut self, path: impl Into<PathBuf>) -> &mut Self {
        self.config_file = path.into();
        self
    }

    pub fn add_request_listener(&mut self, listener: Box<dyn RequestListener>) -> &mut Self {
        self.performer.add_request_listener(listener);
        self
    }

    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    pub fn method(&self) -> Option<Method> {
        self.method
    }

    pub fn data(&self) -> Option<&serde_json::Value> {
        self.data.as_ref()
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn headers(&self) -> &[Header] {
        &self.headers
    }

    pub fn expected_status_codes(&self) -> &[u16] {
        &self.expected_status_codes
    }

    pub fn config(&self) -> Option<&RequestConfig> {
        self.config.as_ref()
    }

    pub fn path_params(&self) -> &[String] {
        &self.path_params
    }

    pub fn debug(&self) -> bool {
        self.debug
    }

    pub fn check_no_errors(&self) -> bool {
        self.check_no_errors
    }

    #[track_caller]
    pub fn get<'a>(&'a mut self, url: &str) -> impl Future<Output = Result<Response>> + Send + 'a {
        self.do_request(Method::Get, url)
    }

    #[track_caller]
    pub fn post<'a>(&'a mut self, url: &str) -> impl Future<Output = Result<Response>> + Send + 'a {
        self.do_request(Method::Post, url)
    }

    #[track_caller]
    pub fn put<'a>(&'a mut self, url: &str) -> impl Future<Output = Result<Response>> + Send + 'a {
        self.do_request(Method::Put, url)
    }

    #[track_caller]
    pub fn patch<'a>(&'a mut self, url: &str) -> impl Future<Output = Result<Response>> + Send + 'a {
        self.do_request(Method::Patch, url)
    }

    #[track_caller]
    pub fn delete<'a>(&'a mut self, url: &str) -> impl Future<Output = Result<Response>> + Send + 'a {
        self.do_request(Method::Delete, url)
    }

    /// Sends the request. The caller's source location is captured here,
    /// before the future is built, so listeners can attribute the call to
    /// the test that issued it.
    #[track_caller]
    fn do_request<'a>(
        &'a mut self,
        method: Method,
        url: &str,
    ) -> impl Future<Output = Result<Response>> + Send + 'a {
        let caller = Location::caller();
        let call_site = format!("{}:{}", caller.file(), caller.line());
        let url = url.to_string();

        async move {
            self.method = Some(method);
            self.url = Some(url);

            let director = RequestDirector::with_config_file(&self.config_file);
            let result = match director.construct(self) {
                Ok(config) => self.performer.request_from(&config, &call_site).await,
                Err(e) => Err(e),
            };

            self.reset();
            result
        }
    }

    /// Resets accumulated request state. The config file location and the
    /// registered listeners survive.
    fn reset(&mut self) {
        self.url = None;
        self.method = None;
        self.data = None;
        self.token = None;
        self.headers.clear();
        self.expected_status_codes.clear();
        self.config = None;
        self.path_params.clear();
        self.debug = false;
        self.check_no_errors = false;
    }
}

impl Default for RequestBuilder {
    fn default() -> Self {
        Self::new()
    }
}
