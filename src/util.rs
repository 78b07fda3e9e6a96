use crate::errors::SettingsError;
use url::Url;

/// Validate a user-supplied base URL and strip any trailing slashes so
/// endpoint concatenation never produces a double slash.
pub(crate) fn normalize_base_url(raw: &str) -> Result<String, SettingsError> {
  let trimmed = raw.trim();
  if trimmed.is_empty() {
    return Err(SettingsError::Configuration(
      "No base URL configured".to_string(),
    ));
  }
  let parsed = Url::parse(trimmed).map_err(|e| {
    SettingsError::Configuration(format!("Invalid base URL '{}': {}", trimmed, e))
  })?;
  if parsed.scheme() != "http" && parsed.scheme() != "https" {
    return Err(SettingsError::Configuration(format!(
      "Unsupported URL scheme '{}'",
      parsed.scheme()
    )));
  }
  Ok(trimmed.trim_end_matches('/').to_string())
}

/// Join an already-normalized base URL with an endpoint suffix.
pub(crate) fn join_endpoint(base: &str, suffix: &str) -> String {
  format!("{}{}", base.trim_end_matches('/'), suffix)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn normalize_strips_trailing_slashes() {
    let base = normalize_base_url("http://localhost:8000///").unwrap();
    assert_eq!(base, "http://localhost:8000");
  }

  #[test]
  fn normalize_rejects_empty_input() {
    assert!(matches!(
      normalize_base_url("   "),
      Err(SettingsError::Configuration(_))
    ));
  }

  #[test]
  fn normalize_rejects_non_http_schemes() {
    assert!(matches!(
      normalize_base_url("ftp://example.test"),
      Err(SettingsError::Configuration(_))
    ));
    // Scheme-less host:port parses with the host as scheme
    assert!(matches!(
      normalize_base_url("localhost:8000"),
      Err(SettingsError::Configuration(_))
    ));
  }

  #[test]
  fn join_never_doubles_the_slash() {
    assert_eq!(
      join_endpoint("http://localhost:8000", "/v1/models"),
      "http://localhost:8000/v1/models"
    );
    assert_eq!(
      join_endpoint("http://localhost:8000/", "/v1/models"),
      "http://localhost:8000/v1/models"
    );
  }
}
