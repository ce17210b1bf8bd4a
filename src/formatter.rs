use html_escape::decode_html_entities;

/// Formats a millisecond duration as `m:ss`. Minutes are not wrapped into hours.
pub fn format_duration(total_ms: u64) -> String {
    let total_secs = total_ms / 1000;
    format!("{}:{:02}", total_secs / 60, total_secs % 60)
}

/// Caption text arrives HTML-escaped, sometimes twice for apostrophes.
pub fn clean_caption_text(raw: &str) -> String {
    decode_html_entities(raw).replace("&#39;", "'")
}

/// Converts fractional seconds to whole milliseconds. Anything that isn't a
/// finite, non-negative number counts as zero.
pub fn secs_to_ms(secs: f64) -> u64 {
    if secs.is_finite() && secs > 0.0 {
        (secs * 1000.0).round() as u64
    } else {
        0
    }
}
