use thiserror::Error;

#[derive(Debug, Error)]
pub enum PulseError {
    #[error("Config error: {0}")]
    Config(String),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("Activity fetch error: {0}")]
    Fetch(String),
    #[error("Summary error: {0}")]
    Summary(String),
    #[error("README error: {0}")]
    Readme(String),
}

/// Cap response bodies quoted in error messages.
pub(crate) fn truncate_body(body: &str) -> &str {
    const LIMIT: usize = 500;
    if body.len() <= LIMIT {
        return body;
    }
    let mut end = LIMIT;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    &body[..end]
}
