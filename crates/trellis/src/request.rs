//! Request assembly for the remote rendering service.
//!
//! The core performs no network I/O: it only concatenates the configured
//! service base path with the encoded token to form a fetchable resource
//! locator. The fetch, response validation, and handling of the returned
//! image bytes belong to the caller.

/// Default base path of the public PlantUML PNG rendering endpoint.
pub const DEFAULT_BASE_URL: &str = "http://www.plantuml.com/plantuml/png/";

/// Assemble the request URL for an encoded token.
///
/// Plain concatenation: the base path is expected to carry its own trailing
/// separator, as [`DEFAULT_BASE_URL`] does.
pub fn assemble_url(base_url: &str, token: &str) -> String {
    format!("{base_url}{token}")
}
