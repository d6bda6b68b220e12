//! Shared Key request signing for the Blob service.
//!
//! Builds the canonical string-to-sign (service version 2009-09-19 and later)
//! and signs it with HMAC-SHA256 keyed by the decoded account key.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use hmac::{Hmac, Mac};
use reqwest::Url;
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Service version sent as `x-ms-version` on every request.
pub const API_VERSION: &str = "2021-08-06";

/// The parts of a request that take part in the Shared Key signature.
pub struct SignableRequest<'a> {
    pub method: &'a str,
    pub url: &'a Url,
    pub content_length: usize,
    pub content_type: Option<&'a str>,
    /// All `x-ms-*` headers that will be sent.
    pub ms_headers: &'a [(&'a str, String)],
}

/// Format a timestamp as the RFC 1123 `x-ms-date` value.
#[must_use]
pub fn format_ms_date(at: chrono::DateTime<chrono::Utc>) -> String {
    at.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

/// Build the canonical string-to-sign for `request` against `account_name`.
#[must_use]
pub fn string_to_sign(request: &SignableRequest<'_>, account_name: &str) -> String {
    // Zero length is signed as an empty field.
    let content_length = if request.content_length == 0 {
        String::new()
    } else {
        request.content_length.to_string()
    };

    let mut out = String::new();
    out.push_str(request.method);
    out.push('\n');
    out.push('\n'); // Content-Encoding
    out.push('\n'); // Content-Language
    out.push_str(&content_length);
    out.push('\n');
    out.push('\n'); // Content-MD5
    out.push_str(request.content_type.unwrap_or_default());
    out.push('\n');
    // Date, If-Modified-Since, If-Match, If-None-Match, If-Unmodified-Since, Range
    out.push_str("\n\n\n\n\n\n");
    out.push_str(&canonicalized_headers(request.ms_headers));
    out.push_str(&canonicalized_resource(request.url, account_name));
    out
}

/// Sign `string_to_sign` and return the full `Authorization` header value.
#[must_use]
pub fn authorization_header(account_name: &str, key: &[u8], string_to_sign: &str) -> String {
    let mut mac = HmacSha256::new_from_slice(key).expect("HMAC accepts any key length");
    mac.update(string_to_sign.as_bytes());
    let signature = BASE64.encode(mac.finalize().into_bytes());
    format!("SharedKey {account_name}:{signature}")
}

fn canonicalized_headers(headers: &[(&str, String)]) -> String {
    let mut normalized: Vec<(String, &str)> = headers
        .iter()
        .map(|(name, value)| (name.trim().to_ascii_lowercase(), value.trim()))
        .filter(|(name, _)| name.starts_with("x-ms-"))
        .collect();
    normalized.sort_by(|a, b| a.0.cmp(&b.0));

    normalized
        .into_iter()
        .map(|(name, value)| format!("{name}:{value}\n"))
        .collect()
}

fn canonicalized_resource(url: &Url, account_name: &str) -> String {
    let mut resource = format!("/{account_name}{}", url.path());

    let mut params: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| (k.to_ascii_lowercase(), v.into_owned()))
        .collect();
    params.sort();

    let mut grouped: Vec<(String, Vec<String>)> = Vec::new();
    for (name, value) in params {
        match grouped.last_mut() {
            Some((last, values)) if *last == name => values.push(value),
            _ => grouped.push((name, vec![value])),
        }
    }
    for (name, values) in grouped {
        resource.push('\n');
        resource.push_str(&name);
        resource.push(':');
        resource.push_str(&values.join(","));
    }
    resource
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    const ACCOUNT: &str = "acct";
    const KEY: &[u8] = b"finsent-test-key";

    fn date() -> String {
        format_ms_date(Utc.with_ymd_and_hms(2025, 3, 14, 9, 26, 53).unwrap())
    }

    #[test]
    fn ms_date_is_rfc1123() {
        assert_eq!(date(), "Fri, 14 Mar 2025 09:26:53 GMT");
    }

    #[test]
    fn create_container_string_to_sign() {
        let url =
            Url::parse("https://acct.blob.core.windows.net/sentiment-results?restype=container")
                .unwrap();
        let headers = [
            ("x-ms-version", API_VERSION.to_string()),
            ("x-ms-date", date()),
        ];
        let request = SignableRequest {
            method: "PUT",
            url: &url,
            content_length: 0,
            content_type: None,
            ms_headers: &headers,
        };

        let signed = string_to_sign(&request, ACCOUNT);
        assert_eq!(
            signed,
            "PUT\n\n\n\n\n\n\n\n\n\n\n\n\
             x-ms-date:Fri, 14 Mar 2025 09:26:53 GMT\n\
             x-ms-version:2021-08-06\n\
             /acct/sentiment-results\n\
             restype:container"
        );
        assert_eq!(
            authorization_header(ACCOUNT, KEY, &signed),
            "SharedKey acct:e3NMbix3dgku5pvyOnf01JrS0nNCmP9aihwDvr+H2J4="
        );
    }

    #[test]
    fn put_blob_string_to_sign() {
        let url = Url::parse(
            "https://acct.blob.core.windows.net/sentiment-results/results_20250314_092653.json",
        )
        .unwrap();
        let headers = [
            ("x-ms-date", date()),
            ("x-ms-version", API_VERSION.to_string()),
            ("x-ms-blob-type", "BlockBlob".to_string()),
        ];
        let request = SignableRequest {
            method: "PUT",
            url: &url,
            content_length: 2,
            content_type: Some("application/json"),
            ms_headers: &headers,
        };

        let signed = string_to_sign(&request, ACCOUNT);
        assert_eq!(
            signed,
            "PUT\n\n\n2\n\napplication/json\n\n\n\n\n\n\n\
             x-ms-blob-type:BlockBlob\n\
             x-ms-date:Fri, 14 Mar 2025 09:26:53 GMT\n\
             x-ms-version:2021-08-06\n\
             /acct/sentiment-results/results_20250314_092653.json"
        );
        assert_eq!(
            authorization_header(ACCOUNT, KEY, &signed),
            "SharedKey acct:c7DsTX/k6Kln/vbH2ZghudAF0TiAy4MEFvX8qPCf448="
        );
    }

    #[test]
    fn query_parameters_are_sorted_and_grouped() {
        let url = Url::parse("https://acct.blob.core.windows.net/c?restype=container&comp=list&Include=b&include=a")
            .unwrap();
        assert_eq!(
            canonicalized_resource(&url, ACCOUNT),
            "/acct/c\ncomp:list\ninclude:a,b\nrestype:container"
        );
    }

    #[test]
    fn path_style_endpoint_keeps_account_segment() {
        let url = Url::parse("http://127.0.0.1:10000/devstoreaccount1/c?restype=container").unwrap();
        assert_eq!(
            canonicalized_resource(&url, "devstoreaccount1"),
            "/devstoreaccount1/devstoreaccount1/c\nrestype:container"
        );
    }

    #[test]
    fn non_ms_headers_are_not_canonicalized() {
        let headers = [
            ("Content-Type", "application/json".to_string()),
            ("X-MS-Version", API_VERSION.to_string()),
        ];
        assert_eq!(
            canonicalized_headers(&headers),
            "x-ms-version:2021-08-06\n"
        );
    }
}
