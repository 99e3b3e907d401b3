/// Parse a URL-encoded query string, keeping duplicate keys (multi-selects).
/// A bare key with no `=` is kept with an empty value.
pub fn parse_query(query: &str) -> Vec<(String, String)> {
    serde_urlencoded::from_str::<Vec<(String, String)>>(query).unwrap_or_else(|e| {
        log::warn!("Ignoring unparseable query string: {e}");
        Vec::new()
    })
}

pub fn has_key(params: &[(String, String)], key: &str) -> bool {
    params.iter().any(|(k, _)| k == key)
}
