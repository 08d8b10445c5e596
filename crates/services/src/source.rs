use std::path::PathBuf;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use url::Url;

use crate::error::LoadError;

/// Where the raw question bank comes from.
///
/// A source performs exactly one read per `fetch` and hands back untyped
/// JSON; validation happens afterwards.
#[async_trait]
pub trait QuestionSource: Send + Sync {
    /// Fetch the raw question bank.
    ///
    /// # Errors
    ///
    /// Returns `LoadError` if the resource cannot be read or is not JSON.
    async fn fetch(&self) -> Result<Value, LoadError>;

    /// Human-readable location, for logs.
    fn describe(&self) -> String;
}

/// Default file name of the question bank.
pub const QUESTIONS_FILE: &str = "questions.json";

//
// ─── HTTP ──────────────────────────────────────────────────────────────────────
//

/// Static JSON resource served over HTTP.
#[derive(Clone, Debug)]
pub struct HttpQuestionSource {
    client: Client,
    url: Url,
}

impl HttpQuestionSource {
    #[must_use]
    pub fn new(url: Url) -> Self {
        Self {
            client: Client::new(),
            url,
        }
    }

    /// `questions.json` next to `base`.
    ///
    /// # Errors
    ///
    /// Returns `url::ParseError` if the joined URL is invalid.
    pub fn from_base(base: &Url) -> Result<Self, url::ParseError> {
        Ok(Self::new(base.join(QUESTIONS_FILE)?))
    }

    /// Use a preconfigured client (timeouts, proxies).
    #[must_use]
    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    #[must_use]
    pub fn url(&self) -> &Url {
        &self.url
    }
}

#[async_trait]
impl QuestionSource for HttpQuestionSource {
    async fn fetch(&self) -> Result<Value, LoadError> {
        let response = self.client.get(self.url.clone()).send().await?;

        if !response.status().is_success() {
            return Err(LoadError::HttpStatus(response.status()));
        }

        Ok(response.json::<Value>().await?)
    }

    fn describe(&self) -> String {
        self.url.to_string()
    }
}

//
// ─── FILE ──────────────────────────────────────────────────────────────────────
//

/// JSON file on the local filesystem.
#[derive(Clone, Debug)]
pub struct FileQuestionSource {
    path: PathBuf,
}

impl FileQuestionSource {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl QuestionSource for FileQuestionSource {
    async fn fetch(&self) -> Result<Value, LoadError> {
        let body = tokio::fs::read_to_string(&self.path).await?;
        Ok(serde_json::from_str(&body)?)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

//
// ─── STATIC ────────────────────────────────────────────────────────────────────
//

/// Question bank already held in memory.
#[derive(Clone, Debug)]
pub struct StaticQuestionSource {
    raw: Value,
}

impl StaticQuestionSource {
    #[must_use]
    pub fn new(raw: Value) -> Self {
        Self { raw }
    }

    /// # Errors
    ///
    /// Returns `LoadError::Json` if `json` does not parse.
    pub fn from_json_str(json: &str) -> Result<Self, LoadError> {
        Ok(Self::new(serde_json::from_str(json)?))
    }
}

#[async_trait]
impl QuestionSource for StaticQuestionSource {
    async fn fetch(&self) -> Result<Value, LoadError> {
        Ok(self.raw.clone())
    }

    fn describe(&self) -> String {
        "in-memory question bank".into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Serves one canned response on a local port and returns a source for it.
    async fn serve_once(status_line: &'static str, body: &'static str) -> HttpQuestionSource {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let (mut stream, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = stream.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            let response = format!(
                "HTTP/1.1 {status_line}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            stream.write_all(response.as_bytes()).await.unwrap();
            stream.shutdown().await.unwrap();
        });

        let base = Url::parse(&format!("http://{addr}/")).unwrap();
        let client = Client::builder().no_proxy().build().unwrap();
        HttpQuestionSource::from_base(&base).unwrap().with_client(client)
    }

    #[tokio::test]
    async fn http_source_reports_error_status() {
        let source = serve_once("404 Not Found", "").await;
        let err = source.fetch().await.unwrap_err();
        assert!(matches!(err, LoadError::HttpStatus(StatusCode::NOT_FOUND)));
        assert_eq!(err.to_string(), "HTTP error! Status: 404 Not Found");
    }

    #[tokio::test]
    async fn http_source_returns_json_body() {
        let source = serve_once(
            "200 OK",
            r#"[{"question":"Capital?","section":"Geography","options":["A","B","C","D"],"answer":2}]"#,
        )
        .await;
        let raw = source.fetch().await.unwrap();
        assert_eq!(raw[0]["question"], "Capital?");
        assert_eq!(raw[0]["answer"], 2);
    }

    #[tokio::test]
    async fn http_source_rejects_non_json_body() {
        let source = serve_once("200 OK", "not json").await;
        let err = source.fetch().await.unwrap_err();
        assert!(matches!(err, LoadError::Http(_)));
    }

    #[test]
    fn http_source_joins_base_url() {
        let base = Url::parse("https://quiz.example.com/app/").unwrap();
        let source = HttpQuestionSource::from_base(&base).unwrap();
        assert_eq!(
            source.url().as_str(),
            "https://quiz.example.com/app/questions.json"
        );
        assert_eq!(source.describe(), "https://quiz.example.com/app/questions.json");
    }

    #[test]
    fn static_source_rejects_bad_json() {
        let err = StaticQuestionSource::from_json_str("{").unwrap_err();
        assert!(matches!(err, LoadError::Json(_)));
    }
}
