use serde_json::Value;

/// Pulls the translated text out of a response body, probing the known
/// shapes in priority order:
///
/// 1. chat-completion: `choices[0].message.content`
/// 2. legacy completion: `choices[0].text`
/// 3. responses API: top-level `output_text`
/// 4. compatibility fallback: top-level `content` or `translation`
///
/// `None` means no shape matched; callers must treat that as an
/// unparseable response, never as an empty-but-valid translation.
pub fn extract_translation(body: &Value) -> Option<String> {
    if let Some(s) = body
        .pointer("/choices/0/message/content")
        .and_then(Value::as_str)
    {
        return Some(s.to_string());
    }
    if let Some(s) = body.pointer("/choices/0/text").and_then(Value::as_str) {
        return Some(s.to_string());
    }
    if let Some(s) = body.get("output_text").and_then(Value::as_str) {
        return Some(s.to_string());
    }
    for key in ["content", "translation"] {
        if let Some(s) = body.get(key).and_then(Value::as_str) {
            return Some(s.to_string());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::extract_translation;
    use serde_json::json;

    #[test]
    fn chat_completion_shape() {
        let body = json!({"choices": [{"message": {"content": "你好"}}]});
        assert_eq!(extract_translation(&body).as_deref(), Some("你好"));
    }

    #[test]
    fn legacy_completion_shape() {
        let body = json!({"choices": [{"text": "hi"}]});
        assert_eq!(extract_translation(&body).as_deref(), Some("hi"));
    }

    #[test]
    fn output_text_shape() {
        let body = json!({"output_text": "ok"});
        assert_eq!(extract_translation(&body).as_deref(), Some("ok"));
    }

    #[test]
    fn bare_translation_field() {
        let body = json!({"translation": "bonjour"});
        assert_eq!(extract_translation(&body).as_deref(), Some("bonjour"));
    }

    #[test]
    fn chat_shape_wins_over_fallbacks() {
        let body = json!({
            "choices": [{"message": {"content": "first"}}],
            "output_text": "second",
        });
        assert_eq!(extract_translation(&body).as_deref(), Some("first"));
    }

    #[test]
    fn unknown_shape_is_none() {
        assert_eq!(extract_translation(&json!({"foo": 1})), None);
        assert_eq!(extract_translation(&json!({"choices": []})), None);
    }
}
