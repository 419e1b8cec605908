//! Text normalization rules applied to article fields.

/// Trim and collapse internal whitespace runs to a single space.
pub fn safe_trim(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Normalize multi-paragraph text: CRLF to LF, trailing whitespace stripped
/// per line, leading/trailing document whitespace trimmed.
pub fn normalize_multiline(value: &str) -> String {
    let unix = value.replace("\r\n", "\n");
    let stripped = unix
        .split('\n')
        .map(str::trim_end)
        .collect::<Vec<_>>()
        .join("\n");
    stripped.trim().to_string()
}

/// Deduplicate tags, preserving first-occurrence order. Each tag is trimmed
/// and has inner whitespace collapsed; blank tags are dropped.
pub fn normalize_tags(tags: &[String]) -> Vec<String> {
    let mut unique: Vec<String> = Vec::new();
    for tag in tags {
        let cleaned = safe_trim(tag);
        if !cleaned.is_empty() && !unique.contains(&cleaned) {
            unique.push(cleaned);
        }
    }
    unique
}

/// Estimated reading time at 180 words per minute, at least one minute.
pub fn estimate_read_time_minutes(body: &str) -> u32 {
    let words = body.split_whitespace().count() as u32;
    words.div_ceil(180).max(1)
}
