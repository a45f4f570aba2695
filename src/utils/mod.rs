pub fn extract_domain(url: &str) -> String {
    // Best-effort substring extraction, not URL parsing: take whatever sits
    // between the scheme separator and the next '/'. Malformed input falls
    // back to the text before the first '/'.
    let rest = match url.split_once("//") {
        Some((_, rest)) => rest,
        None => url,
    };
    rest.split('/').next().unwrap_or_default().to_string()
}
