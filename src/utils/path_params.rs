use regex::Regex;

use crate::utils::error::{HttpRequestError, Result};

/// Expands `{name}` placeholders in a URL template with positional values.
///
/// Values are applied in order of appearance. A template without
/// placeholders (or an empty value list) passes through unchanged; a
/// non-empty value list that is too short is an error. Extra values are
/// ignored.
pub fn expand_path_params(url: &str, params: &[String]) -> Result<String> {
    let re = Regex::new(r"\{([^{}]+)\}").unwrap();

    let placeholders: Vec<String> = re
        .captures_iter(url)
        .map(|caps| caps[1].to_string())
        .collect();

    if placeholders.is_empty() || params.is_empty() {
        return Ok(url.to_string());
    }

    let mut expanded = url.to_string();
    for (i, name) in placeholders.iter().enumerate() {
        let value = params.get(i).ok_or_else(|| HttpRequestError::PathParamsError {
            message: format!("no value for path parameter '{{{}}}' in {}", name, url),
        })?;
        expanded = expanded.replacen(&format!("{{{}}}", name), value, 1);
    }

    Ok(expanded)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_expands_placeholders_positionally() {
        let url = "http://localhost/accounts/{accountId}/personas/{personaId}";
        let expanded = expand_path_params(url, &params(&["42", "7"])).unwrap();
        assert_eq!(expanded, "http://localhost/accounts/42/personas/7");
    }

    #[test]
    fn test_url_without_placeholders_passes_through() {
        let url = "http://localhost/accounts";
        let expanded = expand_path_params(url, &params(&["unused"])).unwrap();
        assert_eq!(expanded, url);
    }

    #[test]
    fn test_empty_params_leave_template_unchanged() {
        let url = "http://localhost/accounts/{accountId}";
        let expanded = expand_path_params(url, &[]).unwrap();
        assert_eq!(expanded, url);
    }

    #[test]
    fn test_too_few_params_is_an_error() {
        let url = "http://localhost/accounts/{accountId}/personas/{personaId}";
        let result = expand_path_params(url, &params(&["42"]));
        assert!(matches!(
            result,
            Err(HttpRequestError::PathParamsError { .. })
        ));
    }

    #[test]
    fn test_extra_params_are_ignored() {
        let url = "http://localhost/accounts/{accountId}";
        let expanded = expand_path_params(url, &params(&["42", "extra"])).unwrap();
        assert_eq!(expanded, "http://localhost/accounts/42");
    }
}
