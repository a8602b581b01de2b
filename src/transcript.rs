//! Video transcript retrieval.
//!
//! A video URL is reduced to its 11-character id, then transcripts are
//! requested per language in preference order from the timedtext
//! endpoint, which answers with timed `<text>` segments (or an empty
//! body when the video has no transcript in that language). The fetcher
//! sits behind a trait so request handlers and tests can inject fakes.

use async_trait::async_trait;
use regex::Regex;
use std::sync::OnceLock;
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum TranscriptError {
    #[error("invalid video URL: expected an 11-character video id")]
    InvalidUrl,
    #[error("transcript request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("transcript payload is not valid XML: {0}")]
    Xml(String),
}

fn video_id_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?:v=|youtu\.be/)([A-Za-z0-9_-]{11})").expect("static video id regex")
    })
}

/// Pull the 11-character video id out of a `watch?v=` or `youtu.be/` URL.
pub fn extract_video_id(url: &str) -> Result<String, TranscriptError> {
    video_id_regex()
        .captures(url)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .ok_or(TranscriptError::InvalidUrl)
}

/// One transcript lookup for one language. `Ok(None)` means the video
/// has no transcript in that language.
#[async_trait]
pub trait TranscriptFetcher: Send + Sync {
    async fn fetch(
        &self,
        video_id: &str,
        language: &str,
    ) -> Result<Option<String>, TranscriptError>;
}

/// Fetcher backed by the public timedtext endpoint.
pub struct TimedTextFetcher {
    http: reqwest::Client,
    base_url: String,
}

impl TimedTextFetcher {
    pub fn new(timeout_secs: u64) -> Result<Self, TranscriptError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;
        Ok(Self {
            http,
            base_url: "https://video.google.com/timedtext".to_string(),
        })
    }

    #[cfg(test)]
    fn with_base_url(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.to_string(),
        }
    }
}

#[async_trait]
impl TranscriptFetcher for TimedTextFetcher {
    async fn fetch(
        &self,
        video_id: &str,
        language: &str,
    ) -> Result<Option<String>, TranscriptError> {
        let response = self
            .http
            .get(&self.base_url)
            .query(&[("v", video_id), ("lang", language)])
            .send()
            .await?;

        if !response.status().is_success() {
            tracing::debug!(video_id, language, status = %response.status(), "no transcript");
            return Ok(None);
        }

        let body = response.text().await?;
        if body.trim().is_empty() {
            return Ok(None);
        }

        let text = parse_timedtext(&body)?;
        Ok(if text.is_empty() { None } else { Some(text) })
    }
}

/// Join the non-empty timed `<text>` segments of a timedtext document.
fn parse_timedtext(xml: &str) -> Result<String, TranscriptError> {
    let mut reader = quick_xml::Reader::from_str(xml);
    reader.config_mut().trim_text(true);
    let mut segments: Vec<String> = Vec::new();
    let mut in_text = false;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(quick_xml::events::Event::Start(e)) if e.local_name().as_ref() == b"text" => {
                in_text = true;
            }
            Ok(quick_xml::events::Event::End(e)) if e.local_name().as_ref() == b"text" => {
                in_text = false;
            }
            Ok(quick_xml::events::Event::Text(t)) if in_text => {
                let segment = t
                    .unescape()
                    .map_err(|e| TranscriptError::Xml(e.to_string()))?
                    .trim()
                    .to_string();
                if !segment.is_empty() {
                    segments.push(segment);
                }
            }
            Ok(quick_xml::events::Event::Eof) => break,
            Err(e) => return Err(TranscriptError::Xml(e.to_string())),
            _ => {}
        }
        buf.clear();
    }

    Ok(segments.join(" "))
}

/// Resolve a video URL to a transcript, trying languages in preference
/// order. Per-language failures are logged and skipped; `Ok(None)` means
/// no language produced a transcript.
pub async fn fetch_transcript(
    fetcher: &dyn TranscriptFetcher,
    url: &str,
    languages: &[String],
) -> Result<Option<String>, TranscriptError> {
    let video_id = extract_video_id(url)?;

    for language in languages {
        match fetcher.fetch(&video_id, language).await {
            Ok(Some(text)) => {
                tracing::debug!(video_id, language, "transcript found");
                return Ok(Some(text));
            }
            Ok(None) => tracing::debug!(video_id, language, "no transcript in language"),
            Err(e) => {
                tracing::warn!(video_id, language, error = %e, "transcript fetch failed")
            }
        }
    }

    tracing::warn!(video_id, "no transcript available in any preferred language");
    Ok(None)
}
