use std::thread;
use std::time::Duration;

use serde::Serialize;
use serde_json::Value;

use crate::endpoints::resolve_candidates;
use crate::error::PipelineError;
use crate::response::extract_translation;

/// Attempts per endpoint candidate before failing over to the next one.
pub const RETRY_COUNT: usize = 3;
/// Pause after a failed attempt.
pub const RETRY_DELAY: Duration = Duration::from_secs(2);
/// Upper bound on one HTTP round trip; a hung request counts as a failed
/// attempt rather than stalling the pipeline.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

const DETAIL_MAX_CHARS: usize = 300;

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

/// System message carrying the user's language and style directives.
pub fn directive_prompt(target_lang: &str, style: &str) -> String {
    format!(
        "你是一名专业的翻译人员。\n目标语言：{target_lang}\n翻译风格：{style}\n必须忠实原文，不增删信息。保持段落结构一致。"
    )
}

/// The full ordered (candidate, attempt) schedule the client walks before
/// giving up. Kept as a pure function so exhaustion is testable without a
/// transport.
pub fn attempt_schedule(candidates: usize, retries: usize) -> Vec<(usize, usize)> {
    (0..candidates)
        .flat_map(|c| (0..retries).map(move |a| (c, a)))
        .collect()
}

/// Seam between the retry/failover policy and the actual HTTP stack.
/// `Err` covers transport-level failures (connect, timeout); `Ok` returns
/// the status code and raw body for any completed exchange.
pub trait HttpTransport {
    fn post_json(
        &self,
        url: &str,
        api_key: Option<&str>,
        body: &Value,
    ) -> Result<(u16, String), String>;
}

pub struct ReqwestTransport {
    client: reqwest::blocking::Client,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self, PipelineError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| PipelineError::Translation(e.to_string()))?;
        Ok(Self { client })
    }
}

impl HttpTransport for ReqwestTransport {
    fn post_json(
        &self,
        url: &str,
        api_key: Option<&str>,
        body: &Value,
    ) -> Result<(u16, String), String> {
        let mut req = self.client.post(url).json(body);
        if let Some(key) = api_key {
            req = req.bearer_auth(key);
        }
        let resp = req.send().map_err(|e| e.to_string())?;
        let status = resp.status().as_u16();
        let text = resp.text().map_err(|e| e.to_string())?;
        Ok((status, text))
    }
}

/// One translation call per chunk: candidate endpoints in resolver order,
/// `RETRY_COUNT` tries each, first HTTP 200 wins.
pub struct TranslationClient<T: HttpTransport> {
    transport: T,
    candidates: Vec<String>,
    model: String,
    api_key: Option<String>,
    retry_delay: Duration,
}

impl<T: HttpTransport> TranslationClient<T> {
    pub fn new(transport: T, base_url: &str, model: String, api_key: Option<String>) -> Self {
        Self {
            transport,
            candidates: resolve_candidates(base_url),
            model,
            api_key,
            retry_delay: RETRY_DELAY,
        }
    }

    /// Test hook; production keeps `RETRY_DELAY`.
    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    pub fn translate(
        &self,
        chunk_text: &str,
        system_prompt: &str,
    ) -> Result<String, PipelineError> {
        let body = serde_json::to_value(ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: chunk_text,
                },
            ],
        })
        .map_err(|e| PipelineError::Translation(format!("encode request: {e}")))?;

        let mut last_detail = String::from("no endpoint candidates");
        for (cand, _attempt) in attempt_schedule(self.candidates.len(), RETRY_COUNT) {
            let url = &self.candidates[cand];
            match self.transport.post_json(url, self.api_key.as_deref(), &body) {
                Ok((200, text)) => {
                    // A 200 whose body matches no known shape is a
                    // response-shape failure, not a transport one: the
                    // remaining schedule is abandoned.
                    let parsed: Value = serde_json::from_str(&text).map_err(|_| {
                        PipelineError::Translation("unparseable response".to_string())
                    })?;
                    return match extract_translation(&parsed) {
                        Some(t) if !t.is_empty() => Ok(t),
                        _ => Err(PipelineError::Translation(
                            "unparseable response".to_string(),
                        )),
                    };
                }
                Ok((status, text)) => {
                    last_detail = format!("{url}: HTTP {status}: {}", truncate(&text));
                }
                Err(e) => {
                    last_detail = format!("{url}: {e}");
                }
            }
            thread::sleep(self.retry_delay);
        }
        Err(PipelineError::Translation(last_detail))
    }
}

fn truncate(s: &str) -> String {
    if s.chars().count() <= DETAIL_MAX_CHARS {
        return s.to_string();
    }
    let cut: String = s.chars().take(DETAIL_MAX_CHARS).collect();
    format!("{cut}…")
}
