//! Cleans and trims the raw LLM response.

pub fn clean(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}').trim();
    // Remove code-fence markers if the LLM wrapped the whole answer.
    let unfenced = match trimmed.strip_prefix("```") {
        Some(rest) => {
            let rest = rest.trim_end_matches("```");
            // Drop the info string (```text, ```markdown) on the opening fence.
            match rest.split_once('\n') {
                Some((info, body)) if !info.trim().contains(' ') => body,
                _ => rest,
            }
        }
        None => trimmed,
    };
    unfenced.trim().to_string()
}

/// Keeps at most `max_chars` characters, marking the cut with an ellipsis.
pub fn truncate(text: &str, max_chars: usize) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(max_chars).collect();
    if chars.next().is_some() {
        format!("{}...", head.trim_end())
    } else {
        head
    }
}
