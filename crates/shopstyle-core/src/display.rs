/// Shortens `s` to at most `max_chars` characters, marking the cut with `...`.
#[must_use]
pub fn clip(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &s[..cut]),
        None => s.to_owned(),
    }
}
