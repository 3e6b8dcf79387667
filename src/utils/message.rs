use crate::config::RequestConfig;
use crate::response::Response;
use crate::utils::curl::CurlGenerator;

/// Composes the failure message for a request whose response did not match
/// expectations: the error summary, the URL, the (possibly truncated)
/// response body and the request rendered as curl.
pub struct MessageComposer<'a> {
    error: &'a str,
    config: &'a RequestConfig,
    response: &'a Response,
}

impl<'a> MessageComposer<'a> {
    pub fn new(error: &'a str, config: &'a RequestConfig, response: &'a Response) -> Self {
        Self {
            error,
            config,
            response,
        }
    }

    pub fn compose(&self) -> String {
        let url = self.config.url.as_deref().unwrap_or("<unknown>");
        let body = self.response.body.as_deref().unwrap_or("null");
        let curl = CurlGenerator::new(self.config).render();

        format!(
            "{}\nUrl: {}\n\nResponse: {}\n\n\nRequest: {}\n\n",
            self.error,
            url,
            cut_response(body, self.config.max_response_length),
            curl
        )
    }
}

fn cut_response(body: &str, max_length: usize) -> &str {
    if max_length == 0 || body.len() <= max_length {
        return body;
    }

    // Cut on a char boundary at or below the limit.
    let mut end = max_length;
    while end > 0 && !body.is_char_boundary(end) {
        end -= 1;
    }

    &body[..end]
}
