//! Azure Storage connection-string parsing.
//!
//! Accepts the forms the Azure portal and Azurite hand out:
//!
//! - `DefaultEndpointsProtocol=https;AccountName=..;AccountKey=..;EndpointSuffix=core.windows.net`
//! - any of the above with an explicit `BlobEndpoint=..`
//! - `BlobEndpoint=..;SharedAccessSignature=..` (SAS, no account key)
//! - `UseDevelopmentStorage=true` (local Azurite emulator)

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use reqwest::Url;

use crate::error::StorageError;

const DEV_ACCOUNT_NAME: &str = "devstoreaccount1";
/// Azurite's published, fixed development key.
const DEV_ACCOUNT_KEY: &str =
    "Eby8vdM02xNOcqFlqUwJPLlmEtlCDXJ1OUzFT50uSRZ6IFsuFq2UVErCz4I6tq/K1SZFPTOtr/KBHBeksoGMGw==";
const DEV_BLOB_ENDPOINT: &str = "http://127.0.0.1:10000/devstoreaccount1";

/// How requests to the account are authorized.
#[derive(Clone)]
pub enum Credential {
    /// Shared Key: HMAC-SHA256 with the decoded account key.
    SharedKey { account_name: String, key: Vec<u8> },
    /// SAS token appended to every request URL (no leading `?`).
    SharedAccessSignature(String),
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Credential::SharedKey { account_name, .. } => f
                .debug_struct("SharedKey")
                .field("account_name", account_name)
                .field("key", &"[redacted]")
                .finish(),
            Credential::SharedAccessSignature(_) => f
                .debug_tuple("SharedAccessSignature")
                .field(&"[redacted]")
                .finish(),
        }
    }
}

/// A parsed storage account: where to send blob requests and how to sign them.
#[derive(Debug, Clone)]
pub struct StorageAccount {
    /// Blob service root, always ending in `/`.
    pub blob_endpoint: Url,
    pub credential: Credential,
}

impl StorageAccount {
    /// Parse an Azure Storage connection string.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::InvalidConnectionString`] if a segment is not
    /// `key=value`, the account key is not valid base64, no endpoint can be
    /// derived, or no credential is present.
    pub fn from_connection_string(raw: &str) -> Result<Self, StorageError> {
        let mut account_name = None;
        let mut account_key = None;
        let mut sas = None;
        let mut blob_endpoint = None;
        let mut protocol = None;
        let mut suffix = None;
        let mut development = false;

        for segment in raw.split(';').map(str::trim).filter(|s| !s.is_empty()) {
            let (key, value) = segment.split_once('=').ok_or_else(|| {
                StorageError::InvalidConnectionString(format!(
                    "segment without '=': {}",
                    redact_segment(segment)
                ))
            })?;
            let value = value.trim();
            match key.trim().to_ascii_lowercase().as_str() {
                "accountname" => account_name = Some(value.to_string()),
                "accountkey" => account_key = Some(value.to_string()),
                "sharedaccesssignature" => sas = Some(value.trim_start_matches('?').to_string()),
                "blobendpoint" => blob_endpoint = Some(value.to_string()),
                "defaultendpointsprotocol" => protocol = Some(value.to_string()),
                "endpointsuffix" => suffix = Some(value.to_string()),
                "usedevelopmentstorage" => development = value.eq_ignore_ascii_case("true"),
                other => tracing::debug!(key = other, "ignoring connection string segment"),
            }
        }

        if development {
            account_name.get_or_insert_with(|| DEV_ACCOUNT_NAME.to_string());
            account_key.get_or_insert_with(|| DEV_ACCOUNT_KEY.to_string());
            blob_endpoint.get_or_insert_with(|| DEV_BLOB_ENDPOINT.to_string());
        }

        let endpoint = match (blob_endpoint, account_name.as_deref()) {
            (Some(endpoint), _) => endpoint,
            (None, Some(name)) => format!(
                "{}://{name}.blob.{}",
                protocol.as_deref().unwrap_or("https"),
                suffix.as_deref().unwrap_or("core.windows.net"),
            ),
            (None, None) => {
                return Err(StorageError::InvalidConnectionString(
                    "neither BlobEndpoint nor AccountName is set".to_string(),
                ));
            }
        };
        let blob_endpoint = parse_endpoint(&endpoint)?;

        let credential = match (account_key, account_name, sas) {
            (Some(key), Some(account_name), _) => {
                let key = BASE64.decode(key.as_bytes()).map_err(|e| {
                    StorageError::InvalidConnectionString(format!(
                        "AccountKey is not valid base64: {e}"
                    ))
                })?;
                Credential::SharedKey { account_name, key }
            }
            (Some(_), None, _) => {
                return Err(StorageError::InvalidConnectionString(
                    "AccountKey requires AccountName".to_string(),
                ));
            }
            (None, _, Some(token)) => Credential::SharedAccessSignature(token),
            (None, _, None) => {
                return Err(StorageError::InvalidConnectionString(
                    "no AccountKey or SharedAccessSignature".to_string(),
                ));
            }
        };

        Ok(Self {
            blob_endpoint,
            credential,
        })
    }
}

fn parse_endpoint(endpoint: &str) -> Result<Url, StorageError> {
    let normalised = format!("{}/", endpoint.trim_end_matches('/'));
    Url::parse(&normalised).map_err(|e| {
        StorageError::InvalidConnectionString(format!("invalid blob endpoint '{endpoint}': {e}"))
    })
}

/// Keep only the part before any secret when echoing a bad segment back.
fn redact_segment(segment: &str) -> String {
    segment.chars().take(16).collect::<String>() + "…"
}
