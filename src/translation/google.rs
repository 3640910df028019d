//! Google Cloud Translation (v2 REST) client.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::language::LanguageTag;
use super::provider::{RemoteError, Translation, Translator};

/// Default Google Cloud Translation endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://translation.googleapis.com";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Serialize)]
struct TranslateRequest<'a> {
    q: &'a [String],
    target: &'a str,
    format: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    model: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    data: TranslateData,
}

#[derive(Debug, Deserialize)]
struct TranslateData {
    #[serde(default)]
    translations: Vec<TranslatedText>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TranslatedText {
    translated_text: String,
    detected_source_language: Option<String>,
    model: Option<String>,
}

pub struct GoogleTranslator {
    client: Client,
    name: String,
    endpoint: String,
    api_key: String,
    model: Option<String>,
}

impl GoogleTranslator {
    pub fn new(name: String, endpoint: String, api_key: String, model: Option<String>) -> Self {
        Self {
            client: Client::new(),
            name,
            endpoint,
            api_key,
            model,
        }
    }

    fn url(&self) -> String {
        format!(
            "{}/language/translate/v2",
            self.endpoint.trim_end_matches('/')
        )
    }
}

#[async_trait]
impl Translator for GoogleTranslator {
    fn name(&self) -> &str {
        &self.name
    }

    async fn translate(
        &self,
        lines: &[String],
        target: &LanguageTag,
    ) -> Result<Vec<Translation>, RemoteError> {
        let body = TranslateRequest {
            q: lines,
            target: target.as_str(),
            format: "text",
            model: self.model.as_deref(),
        };

        let response = self
            .client
            .post(self.url())
            .timeout(REQUEST_TIMEOUT)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| RemoteError::Transport(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| RemoteError::Transport(e.to_string()))?;

        if !status.is_success() {
            return Err(RemoteError::Status {
                status: status.as_u16(),
                body: text,
            });
        }

        parse_response(&text, lines.len())
    }
}

/// Decodes a successful response body and checks it answers every line.
fn parse_response(body: &str, expected: usize) -> Result<Vec<Translation>, RemoteError> {
    let response: TranslateResponse =
        serde_json::from_str(body).map_err(|e| RemoteError::Decode(e.to_string()))?;

    let translations: Vec<Translation> = response
        .data
        .translations
        .into_iter()
        .map(|t| Translation {
            text: t.translated_text,
            source_language: t.detected_source_language,
            model: t.model,
        })
        .collect();

    if translations.len() != expected {
        return Err(RemoteError::CountMismatch {
            expected,
            received: translations.len(),
        });
    }

    Ok(translations)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};
    use tokio::task::JoinHandle;

    /// Answers one HTTP request with `status` and `body`, yielding the raw
    /// request it received.
    async fn respond_once(
        status: &'static str,
        body: &'static str,
    ) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let endpoint = format!("http://{}", listener.local_addr().unwrap());

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let request = read_request(&mut socket).await;
            let response = format!(
                "HTTP/1.1 {status}\r\n\
                 Content-Type: application/json\r\n\
                 Content-Length: {}\r\n\
                 Connection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
            request
        });

        (endpoint, handle)
    }

    async fn read_request(socket: &mut TcpStream) -> String {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];
        loop {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);

            if let Some(head_end) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                let head = String::from_utf8_lossy(&buf[..head_end]).to_lowercase();
                let content_length = head
                    .lines()
                    .find_map(|line| line.strip_prefix("content-length:"))
                    .and_then(|v| v.trim().parse::<usize>().ok())
                    .unwrap_or(0);
                if buf.len() >= head_end + 4 + content_length {
                    break;
                }
            }
        }
        String::from_utf8(buf).unwrap()
    }

    fn translator(endpoint: String) -> GoogleTranslator {
        GoogleTranslator::new(
            "google".to_string(),
            endpoint,
            "secret-key".to_string(),
            None,
        )
    }

    #[test]
    fn test_request_body_shape() {
        let lines = vec!["Hello".to_string(), String::new()];
        let body = TranslateRequest {
            q: &lines,
            target: "zh-TW",
            format: "text",
            model: None,
        };

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["q"], serde_json::json!(["Hello", ""]));
        assert_eq!(json["target"], "zh-TW");
        assert_eq!(json["format"], "text");
        assert!(json.get("model").is_none());
    }

    #[test]
    fn test_request_body_with_model() {
        let lines = vec!["Hello".to_string()];
        let body = TranslateRequest {
            q: &lines,
            target: "ja",
            format: "text",
            model: Some("nmt"),
        };

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["model"], "nmt");
    }

    #[test]
    fn test_parse_response() {
        let body = r#"{
            "data": {
                "translations": [
                    {"translatedText": "你好", "detectedSourceLanguage": "en", "model": "nmt"},
                    {"translatedText": "世界"}
                ]
            }
        }"#;

        let translations = parse_response(body, 2).unwrap();

        assert_eq!(translations[0].text, "你好");
        assert_eq!(translations[0].source_language.as_deref(), Some("en"));
        assert_eq!(translations[0].model.as_deref(), Some("nmt"));
        assert_eq!(translations[1].text, "世界");
        assert!(translations[1].source_language.is_none());
    }

    #[test]
    fn test_parse_response_count_mismatch() {
        let body = r#"{"data": {"translations": [{"translatedText": "a"}]}}"#;

        let err = parse_response(body, 2).unwrap_err();
        assert!(matches!(
            err,
            RemoteError::CountMismatch {
                expected: 2,
                received: 1
            }
        ));
    }

    #[test]
    fn test_parse_response_malformed() {
        let err = parse_response("<html>quota</html>", 1).unwrap_err();
        assert!(matches!(err, RemoteError::Decode(_)));
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_url_trims_trailing_slash() {
        let translator = GoogleTranslator::new(
            "google".to_string(),
            "https://translation.googleapis.com/".to_string(),
            "key".to_string(),
            None,
        );
        assert_eq!(
            translator.url(),
            "https://translation.googleapis.com/language/translate/v2"
        );
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_retryable_transport_error() {
        let translator = GoogleTranslator::new(
            "google".to_string(),
            "http://127.0.0.1:9".to_string(),
            "key".to_string(),
            None,
        );
        let target = LanguageTag::parse("ja").unwrap();

        let err = translator
            .translate(&["hello".to_string()], &target)
            .await
            .unwrap_err();

        assert!(matches!(err, RemoteError::Transport(_)));
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn test_translate_round_trip() {
        let (endpoint, server) = respond_once(
            "200 OK",
            r#"{"data":{"translations":[{"translatedText":"こんにちは","detectedSourceLanguage":"en"}]}}"#,
        )
        .await;
        let target = LanguageTag::parse("ja").unwrap();

        let translations = translator(endpoint)
            .translate(&["hello".to_string()], &target)
            .await
            .unwrap();
        let request = server.await.unwrap();

        assert_eq!(translations.len(), 1);
        assert_eq!(translations[0].text, "こんにちは");
        assert_eq!(translations[0].source_language.as_deref(), Some("en"));

        assert!(request.starts_with("POST /language/translate/v2 HTTP/1.1"));
        assert!(request.to_lowercase().contains("x-goog-api-key: secret-key"));
        assert!(request.contains(r#""q":["hello"]"#));
        assert!(request.contains(r#""target":"ja""#));
        assert!(request.contains(r#""format":"text""#));
    }

    #[tokio::test]
    async fn test_rate_limited_response_is_retryable_status() {
        let (endpoint, server) = respond_once(
            "429 Too Many Requests",
            r#"{"error":{"code":429,"message":"rate limited"}}"#,
        )
        .await;
        let target = LanguageTag::parse("ja").unwrap();

        let err = translator(endpoint)
            .translate(&["hello".to_string()], &target)
            .await
            .unwrap_err();
        server.await.unwrap();

        assert!(matches!(err, RemoteError::Status { status: 429, .. }));
        assert!(err.is_retryable());
    }

    #[tokio::test]
    async fn test_forbidden_response_is_not_retryable() {
        let (endpoint, server) = respond_once(
            "403 Forbidden",
            r#"{"error":{"code":403,"message":"API key not valid"}}"#,
        )
        .await;
        let target = LanguageTag::parse("ja").unwrap();

        let err = translator(endpoint)
            .translate(&["hello".to_string()], &target)
            .await
            .unwrap_err();
        server.await.unwrap();

        let RemoteError::Status { status, body } = &err else {
            panic!("expected a status error, got {err:?}");
        };
        assert_eq!(*status, 403);
        assert!(body.contains("API key not valid"));
        assert!(!err.is_retryable());
    }
}
