use url::Url;

use super::error::FetchError;

/// Syntactic check that a string is an absolute http(s) URL with a host.
/// No DNS or reachability lookups happen here.
pub fn validate_url(raw: &str) -> Result<Url, FetchError> {
    if !raw.starts_with("http://") && !raw.starts_with("https://") {
        return Err(FetchError::InvalidUrl(
            "URL must start with http:// or https://".to_string(),
        ));
    }

    let url = Url::parse(raw).map_err(|e| FetchError::InvalidUrl(e.to_string()))?;

    match url.host_str() {
        Some(host) if !host.is_empty() => Ok(url),
        _ => Err(FetchError::InvalidUrl("URL has no host".to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::validate_url;
    use crate::fetch::error::FetchError;

    #[test]
    fn accepts_http_and_https() {
        assert!(validate_url("http://example.com/a.png").is_ok());
        assert!(validate_url("https://example.com").is_ok());
    }

    #[test]
    fn rejects_other_schemes() {
        let err = validate_url("ftp://example.com/img.png").unwrap_err();
        assert!(matches!(err, FetchError::InvalidUrl(_)));
    }

    #[test]
    fn rejects_missing_host() {
        assert!(validate_url("http://").is_err());
        assert!(validate_url("https:///path/only").is_err());
    }

    #[test]
    fn keeps_parsed_host() {
        let url = validate_url("https://www.example.com/photos/cat.jpg").unwrap();
        assert_eq!(url.host_str(), Some("www.example.com"));
    }
}
