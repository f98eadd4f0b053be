//! `OrphanageApi` trait and its `reqwest` implementation.

use std::future::Future;
use std::time::Duration;

use reqwest::multipart::{Form, Part as FormPart};
use reqwest::{Client, Response};

use happy_core::payload::{MultipartPayload, Part};
use happy_core::Orphanage;

use crate::error::ApiError;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// The external orphanage API.
pub trait OrphanageApi: Send + Sync {
    /// `POST /orphanages`. Any 2xx counts as success.
    fn create(&self, payload: MultipartPayload)
        -> impl Future<Output = Result<(), ApiError>> + Send;

    /// `GET /orphanages`.
    fn list(&self) -> impl Future<Output = Result<Vec<Orphanage>, ApiError>> + Send;

    /// `GET /orphanages/:id`.
    fn get(&self, id: u64) -> impl Future<Output = Result<Orphanage, ApiError>> + Send;
}

/// HTTP client bound to one API base URL.
#[derive(Debug, Clone)]
pub struct HttpApi {
    client: Client,
    base_url: String,
}

impl HttpApi {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let client = Client::builder()
            .user_agent(concat!("happy/", env!("CARGO_PKG_VERSION")))
            .connect_timeout(CONNECT_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `base_url` joined with `path`, with exactly one slash between them.
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

impl OrphanageApi for HttpApi {
    async fn create(&self, payload: MultipartPayload) -> Result<(), ApiError> {
        let url = self.endpoint("orphanages");
        let files = payload.file_count();
        let form = to_form(payload)?;

        tracing::debug!(%url, files, "POST orphanage");
        let response = self.client.post(&url).multipart(form).send().await?;
        ensure_success(response).await?;
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Orphanage>, ApiError> {
        let url = self.endpoint("orphanages");
        tracing::debug!(%url, "GET orphanages");
        let response = ensure_success(self.client.get(&url).send().await?).await?;
        Ok(response.json().await?)
    }

    async fn get(&self, id: u64) -> Result<Orphanage, ApiError> {
        let url = self.endpoint(&format!("orphanages/{id}"));
        tracing::debug!(%url, "GET orphanage");
        let response = ensure_success(self.client.get(&url).send().await?).await?;
        Ok(response.json().await?)
    }
}

/// Map payload parts 1:1 onto a multipart form, preserving order.
fn to_form(payload: MultipartPayload) -> Result<Form, ApiError> {
    let mut form = Form::new();
    for part in payload.into_parts() {
        form = match part {
            Part::Text { name, value } => form.text(name, value),
            Part::File { name, image } => {
                let file = FormPart::bytes(image.bytes().to_vec())
                    .file_name(image.file_name().to_owned())
                    .mime_str(image.content_type())?;
                form.part(name, file)
            }
        };
    }
    Ok(form)
}

async fn ensure_success(response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(ApiError::rejected(status.as_u16(), body))
}
