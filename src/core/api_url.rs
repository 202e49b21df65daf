use crate::core::errors::{Error, Result};
use reqwest::Url;

/*-------------------------------------------------------------------------------------------------
  API URL Construction
-------------------------------------------------------------------------------------------------*/

/// Path prefix of every API endpoint.
pub const API_PREFIX: &str = "/api/v1";

/// Parse and validate a service base address.
pub fn parse_address(address: &str) -> Result<Url> {
    let invalid = |reason: String| Error::InvalidAddress {
        address: address.to_string(),
        reason,
    };

    if address.trim().is_empty() {
        return Err(invalid("address is not set".to_string()));
    }

    let url = Url::parse(address).map_err(|error| invalid(error.to_string()))?;
    if url.cannot_be_a_base() {
        return Err(invalid("address cannot be a base URL".to_string()));
    }

    Ok(url)
}

/// Join `base_address`, [API_PREFIX] and `sub_path` into an absolute URL.
///
/// Separators are normalized the way a path join does (one slash between segments, `.` and
/// `..` resolved, no trailing slash); the scheme, host, port and query of the base address are
/// kept. An empty `sub_path` returns `base_address` unchanged.
///
/// ```
/// let url = foxip::build_api_url("http://fox.local:8080/", "/ip-envs/prod").unwrap();
/// assert_eq!(url, "http://fox.local:8080/api/v1/ip-envs/prod");
///
/// assert_eq!(foxip::build_api_url("http://fox.local", "").unwrap(), "http://fox.local");
/// ```
pub fn build_api_url(base_address: &str, sub_path: &str) -> Result<String> {
    if sub_path.is_empty() {
        return Ok(base_address.to_string());
    }

    let mut url = parse_address(base_address)?;
    let path = join_path(&[url.path(), API_PREFIX, sub_path]);
    url.set_path(&path);

    Ok(url.to_string())
}

/// Join path parts into one rooted, cleaned path.
fn join_path(parts: &[&str]) -> String {
    let mut segments: Vec<&str> = Vec::new();
    for segment in parts.iter().flat_map(|part| part.split('/')) {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            segment => segments.push(segment),
        }
    }
    format!("/{}", segments.join("/"))
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/
