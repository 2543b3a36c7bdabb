//! `reqwest`-backed transport.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use tracing::debug;
use url::Url;

use super::{AskPayload, AskRequest, AskResponse, AskTransport, TransportError};

/// Fixed path of the ask endpoint.
pub const ASK_PATH: &str = "/ask";

/// HTTP transport posting to `<base_url>/ask`.
#[derive(Debug, Clone)]
pub struct HttpAskTransport {
    endpoint: Url,
    http: reqwest::Client,
}

impl HttpAskTransport {
    /// Create a transport for the backend at `base_url`.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Origin of the backend (e.g., "http://127.0.0.1:5000")
    pub fn new(base_url: impl AsRef<str>) -> Result<Self, TransportError> {
        Self::with_client(base_url, reqwest::Client::new())
    }

    /// Create a transport with a custom reqwest client.
    pub fn with_client(
        base_url: impl AsRef<str>,
        http: reqwest::Client,
    ) -> Result<Self, TransportError> {
        let endpoint = Url::parse(base_url.as_ref())?.join(ASK_PATH)?;
        Ok(Self { endpoint, http })
    }

    /// Full URL requests are posted to.
    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl AskTransport for HttpAskTransport {
    async fn ask(&self, request: AskRequest) -> Result<AskResponse, TransportError> {
        let builder = self.http.post(self.endpoint.clone());

        let builder = match request {
            AskRequest::Json { question } => {
                debug!(endpoint = %self.endpoint, "Posting JSON question");
                builder.json(&AskPayload {
                    question: &question,
                })
            }
            AskRequest::Multipart { question, file } => {
                debug!(
                    endpoint = %self.endpoint,
                    file = %file.name,
                    size = file.content.len(),
                    "Posting multipart question"
                );
                // The boundary, and with it the content type, is left to reqwest.
                let part = Part::bytes(file.content)
                    .file_name(file.name)
                    .mime_str(&file.content_type)?;
                let form = Form::new().text("question", question).part("file", part);
                builder.multipart(form)
            }
        };

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();

        Ok(AskResponse { status, body })
    }
}
