//! Endpoint URL helpers.

/// Strip trailing slashes so endpoint paths can be appended safely.
///
/// # Examples
///
/// ```
/// use cutie::utils::url::normalize_base_url;
///
/// assert_eq!(normalize_base_url("https://api.example.com/v1///"), "https://api.example.com/v1");
/// ```
pub fn normalize_base_url(base_url: &str) -> String {
    base_url.trim().trim_end_matches('/').to_string()
}

/// Join a base URL and an endpoint path with exactly one slash between them.
///
/// # Examples
///
/// ```
/// use cutie::utils::url::construct_api_url;
///
/// assert_eq!(
///     construct_api_url("https://api.example.com/v1/", "/chat/completions"),
///     "https://api.example.com/v1/chat/completions"
/// );
/// ```
pub fn construct_api_url(base_url: &str, endpoint: &str) -> String {
    let endpoint = endpoint.trim_start_matches('/');
    format!("{}/{}", normalize_base_url(base_url), endpoint)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_without_double_slashes() {
        assert_eq!(
            construct_api_url("http://127.0.0.1:8080", "chat/completions"),
            "http://127.0.0.1:8080/chat/completions"
        );
        assert_eq!(
            construct_api_url(" https://api.openai.com/v1/ ", "chat/completions"),
            "https://api.openai.com/v1/chat/completions"
        );
    }
}
