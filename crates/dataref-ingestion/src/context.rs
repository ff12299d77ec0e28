//! Fixed-size token windows around a match.

/// Join tokens `[t - w, t + w]`, clamped to the token range, with single spaces.
///
/// The token at `t` is always included as long as `t` is in range; only a
/// text with no tokens yields an empty context.
pub fn window(token_index: usize, tokens: &[&str], w: usize) -> String {
    if tokens.is_empty() {
        return String::new();
    }
    let start = token_index.saturating_sub(w);
    let end = token_index.saturating_add(w).saturating_add(1).min(tokens.len());
    if start >= end {
        return String::new();
    }
    tokens[start..end].join(" ")
}
