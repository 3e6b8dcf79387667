use crate::config::RequestConfig;

/// Renders a request configuration as a curl command, ready to paste into
/// a terminal to reproduce the call.
pub struct CurlGenerator<'a> {
    config: &'a RequestConfig,
}

impl<'a> CurlGenerator<'a> {
    pub fn new(config: &'a RequestConfig) -> Self {
        Self { config }
    }

    pub fn render(&self) -> String {
        let curl = format!(
            "curl{}{}{}{}",
            self.method(),
            self.url(),
            self.headers(),
            self.data()
        );

        // The data block is the only segment without a line continuation,
        // so a command without data ends with a dangling backslash.
        if curl.contains("--data") {
            curl
        } else {
            curl.strip_suffix(" \\\n")
                .map(str::to_string)
                .unwrap_or(curl)
        }
    }

    fn method(&self) -> String {
        match self.config.method {
            Some(method) => format!(" --request {} \\\n", method),
            None => String::new(),
        }
    }

    fn url(&self) -> String {
        match &self.config.url {
            Some(url) => format!("  --url '{}' \\\n", url),
            None => String::new(),
        }
    }

    fn headers(&self) -> String {
        let mut rendered = String::new();
        for header in &self.config.headers {
            rendered.push_str(&format!(
                "  --header '{}: {}' \\\n",
                header.name, header.value
            ));
        }

        rendered
    }

    fn data(&self) -> String {
        let Some(data) = &self.config.data else {
            return String::new();
        };

        let pretty = pretty_print_json(data);
        format!("  --data '\n{}'", indent_block(&pretty))
    }
}

/// Pretty prints the body when it is (or contains) valid JSON, otherwise
/// returns the raw text.
fn pretty_print_json(data: &serde_json::Value) -> String {
    let raw = match data {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    };

    match serde_json::from_str::<serde_json::Value>(&raw) {
        Ok(value) => serde_json::to_string_pretty(&value).unwrap_or(raw),
        Err(_) => raw,
    }
}

fn indent_block(text: &str) -> String {
    text.lines()
        .map(|line| format!("    {}", line))
        .collect::<Vec<_>>()
        .join("\n")
}
