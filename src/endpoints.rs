/// Builds the ordered candidate URL list for one base URL. Different
/// OpenAI-compatible deployments expose the chat endpoint under different
/// path prefixes; trying a fixed priority list spares the user from knowing
/// the exact deployment shape.
pub fn resolve_candidates(base_url: &str) -> Vec<String> {
    let mut base = base_url.trim().trim_end_matches('/');
    if let Some(stripped) = base.strip_suffix("/v1") {
        base = stripped;
    }
    let suffixes = [
        "/v1/chat/completions",
        "/chat/completions",
        "/v1/responses",
        "/responses",
    ];
    let mut out: Vec<String> = Vec::with_capacity(suffixes.len());
    for suffix in suffixes {
        let url = format!("{base}{suffix}");
        if !out.contains(&url) {
            out.push(url);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::resolve_candidates;

    #[test]
    fn strips_trailing_slash_and_v1() {
        assert_eq!(
            resolve_candidates("https://api.example.com/v1/"),
            vec![
                "https://api.example.com/v1/chat/completions",
                "https://api.example.com/chat/completions",
                "https://api.example.com/v1/responses",
                "https://api.example.com/responses",
            ]
        );
    }

    #[test]
    fn bare_host_gets_all_four_candidates() {
        let got = resolve_candidates("http://localhost:8000");
        assert_eq!(got.len(), 4);
        assert_eq!(got[0], "http://localhost:8000/v1/chat/completions");
        assert_eq!(got[3], "http://localhost:8000/responses");
    }

    #[test]
    fn v1_with_and_without_slash_normalize_alike() {
        assert_eq!(
            resolve_candidates("https://h/v1"),
            resolve_candidates("https://h/")
        );
    }
}
