//! HTTP client for the Azure Blob service REST API.
//!
//! Covers the two operations a batch upload needs: Create Container and Put
//! Blob (block blob, single request). Every request carries `x-ms-date` and
//! `x-ms-version` and is authorized according to the account's
//! [`Credential`].

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::{Client, Response, StatusCode, Url};

use crate::connection::{Credential, StorageAccount};
use crate::error::StorageError;
use crate::error_body::parse_error_body;
use crate::signing::{authorization_header, format_ms_date, string_to_sign, SignableRequest, API_VERSION};
use crate::sink::ResultSink;

const CONTAINER_EXISTS_CODE: &str = "ContainerAlreadyExists";
const JSON_CONTENT_TYPE: &str = "application/json";

/// Client for one storage account's Blob service.
pub struct BlobClient {
    client: Client,
    account: StorageAccount,
}

impl BlobClient {
    /// Creates a client for an already-parsed account.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        account: StorageAccount,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, StorageError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client, account })
    }

    /// Parses `connection_string` and creates a client for it.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::InvalidConnectionString`] if the string cannot
    /// be parsed, or [`StorageError::Http`] if the HTTP client cannot be built.
    pub fn from_connection_string(
        connection_string: &str,
        timeout_secs: u64,
        user_agent: &str,
    ) -> Result<Self, StorageError> {
        let account = StorageAccount::from_connection_string(connection_string)?;
        Self::new(account, timeout_secs, user_agent)
    }

    /// Creates `container` with private access.
    ///
    /// # Errors
    ///
    /// - [`StorageError::ContainerAlreadyExists`] if the container is already there.
    /// - [`StorageError::Service`] for any other non-2xx answer (auth, bad name, ...).
    /// - [`StorageError::Http`] on network failure.
    pub async fn create_container(&self, container: &str) -> Result<(), StorageError> {
        let mut url = self.join(container)?;
        url.query_pairs_mut().append_pair("restype", "container");

        let response = self.put(url.clone(), Vec::new(), None, Vec::new()).await?;
        if response.status().is_success() {
            return Ok(());
        }

        match Self::service_error(response, &url).await {
            StorageError::Service { status, ref code, .. }
                if status == StatusCode::CONFLICT.as_u16() && code == CONTAINER_EXISTS_CODE =>
            {
                Err(StorageError::ContainerAlreadyExists {
                    container: container.to_string(),
                })
            }
            other => Err(other),
        }
    }

    /// Uploads `payload` as a block blob, overwriting any existing blob.
    ///
    /// # Errors
    ///
    /// - [`StorageError::Service`] on a non-2xx answer.
    /// - [`StorageError::Http`] on network failure.
    pub async fn put_blob(
        &self,
        container: &str,
        blob: &str,
        payload: Vec<u8>,
        content_type: &str,
    ) -> Result<(), StorageError> {
        let url = self.join(&format!("{container}/{blob}"))?;
        let response = self
            .put(
                url.clone(),
                payload,
                Some(content_type),
                vec![("x-ms-blob-type", "BlockBlob".to_string())],
            )
            .await?;

        if response.status().is_success() {
            return Ok(());
        }
        Err(Self::service_error(response, &url).await)
    }

    fn join(&self, path: &str) -> Result<Url, StorageError> {
        self.account
            .blob_endpoint
            .join(path)
            .map_err(|e| StorageError::InvalidUrl(format!("{path}: {e}")))
    }

    /// Sends an authorized `PUT`.
    async fn put(
        &self,
        url: Url,
        body: Vec<u8>,
        content_type: Option<&str>,
        extra_ms_headers: Vec<(&str, String)>,
    ) -> Result<Response, StorageError> {
        let mut ms_headers = vec![
            ("x-ms-date", format_ms_date(Utc::now())),
            ("x-ms-version", API_VERSION.to_string()),
        ];
        ms_headers.extend(extra_ms_headers);

        let (url, authorization) = match &self.account.credential {
            Credential::SharedKey { account_name, key } => {
                let to_sign = string_to_sign(
                    &SignableRequest {
                        method: "PUT",
                        url: &url,
                        content_length: body.len(),
                        content_type,
                        ms_headers: &ms_headers,
                    },
                    account_name,
                );
                let header = authorization_header(account_name, key, &to_sign);
                (url, Some(header))
            }
            Credential::SharedAccessSignature(token) => (with_sas(url, token), None),
        };

        let mut request = self.client.put(url).body(body);
        for (name, value) in &ms_headers {
            request = request.header(*name, value);
        }
        if let Some(content_type) = content_type {
            request = request.header(reqwest::header::CONTENT_TYPE, content_type);
        }
        if let Some(authorization) = authorization {
            request = request.header(reqwest::header::AUTHORIZATION, authorization);
        }

        Ok(request.send().await?)
    }

    /// Turn a non-2xx response into [`StorageError::Service`].
    ///
    /// The error code comes from `x-ms-error-code`, falling back to the XML
    /// body; the URL is reported without its query so SAS tokens stay out of
    /// logs.
    async fn service_error(response: Response, url: &Url) -> StorageError {
        let status = response.status();
        let header_code = response
            .headers()
            .get("x-ms-error-code")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response.text().await.unwrap_or_default();
        let parsed = parse_error_body(&body);

        let mut reported = url.clone();
        reported.set_query(None);

        StorageError::Service {
            status: status.as_u16(),
            code: header_code
                .or(parsed.code)
                .unwrap_or_else(|| "Unknown".to_string()),
            message: parsed.message.unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("unexpected status")
                    .to_string()
            }),
            url: reported.to_string(),
        }
    }
}

/// Append a SAS token to whatever query `url` already carries.
fn with_sas(mut url: Url, token: &str) -> Url {
    let query = match url.query() {
        Some(existing) if !existing.is_empty() => format!("{existing}&{token}"),
        _ => token.to_string(),
    };
    url.set_query(Some(&query));
    url
}

#[async_trait]
impl ResultSink for BlobClient {
    async fn ensure_container(&self, container: &str) {
        match self.create_container(container).await {
            Ok(()) => tracing::info!(container, "created storage container"),
            Err(StorageError::ContainerAlreadyExists { .. }) => {
                tracing::debug!(container, "storage container already exists");
            }
            Err(e) => {
                tracing::warn!(
                    container,
                    error = %e,
                    "could not create storage container, continuing with upload"
                );
            }
        }
    }

    async fn put_object(
        &self,
        container: &str,
        object: &str,
        payload: Vec<u8>,
    ) -> Result<(), StorageError> {
        self.put_blob(container, object, payload, JSON_CONTENT_TYPE)
            .await
    }
}
