/// Default per-chunk character budget for one API call.
pub const MAX_CHUNK_CHARS: usize = 15000;

/// Splits `text` into ordered chunks of at most `budget` characters,
/// breaking only on line boundaries. A single line longer than the budget
/// is kept whole in its own chunk, so the budget is a soft bound.
///
/// Joining the returned chunks with `\n` preserves the input's line
/// sequence exactly.
pub fn split_chunks(text: &str, budget: usize) -> Vec<String> {
    if text.chars().count() <= budget {
        return vec![text.to_string()];
    }
    let mut parts: Vec<String> = Vec::new();
    let mut buf: Vec<&str> = Vec::new();
    let mut buf_len = 0usize;
    for line in text.split('\n') {
        // +1 accounts for the newline the join re-inserts.
        let len = line.chars().count() + 1;
        if buf_len + len > budget && !buf.is_empty() {
            parts.push(buf.join("\n"));
            buf.clear();
            buf.push(line);
            buf_len = len;
        } else {
            buf.push(line);
            buf_len += len;
        }
    }
    if !buf.is_empty() {
        parts.push(buf.join("\n"));
    }
    parts
}
