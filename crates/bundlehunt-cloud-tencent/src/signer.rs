//! TC3-HMAC-SHA256 request signing for Tencent Cloud API 3.0
//!
//! Only the two headers `content-type` and `host` are signed, which is the
//! minimal set the API accepts.

use crate::error::{Result, TencentError};
use chrono::DateTime;
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};

type HmacSha256 = Hmac<Sha256>;

pub const ALGORITHM: &str = "TC3-HMAC-SHA256";
pub const CONTENT_TYPE: &str = "application/json; charset=utf-8";
const SIGNED_HEADERS: &str = "content-type;host";

/// Signing inputs for a single POST request
#[derive(Debug, Clone)]
pub struct SigningRequest<'a> {
    pub secret_id: &'a str,
    pub secret_key: &'a str,
    pub service: &'a str,
    pub host: &'a str,
    pub payload: &'a str,
    /// Unix timestamp in seconds
    pub timestamp: i64,
}

/// Build the `Authorization` header value
pub fn authorization(req: &SigningRequest<'_>) -> Result<String> {
    let date = DateTime::from_timestamp(req.timestamp, 0)
        .ok_or_else(|| TencentError::Signing(format!("invalid timestamp {}", req.timestamp)))?
        .format("%Y-%m-%d")
        .to_string();

    let canonical_request = format!(
        "POST\n/\n\ncontent-type:{}\nhost:{}\n\n{}\n{}",
        CONTENT_TYPE,
        req.host,
        SIGNED_HEADERS,
        sha256_hex(req.payload)
    );

    let credential_scope = format!("{}/{}/tc3_request", date, req.service);
    let string_to_sign = format!(
        "{}\n{}\n{}\n{}",
        ALGORITHM,
        req.timestamp,
        credential_scope,
        sha256_hex(&canonical_request)
    );

    let secret_date = hmac_sha256(format!("TC3{}", req.secret_key).as_bytes(), &date)?;
    let secret_service = hmac_sha256(&secret_date, req.service)?;
    let secret_signing = hmac_sha256(&secret_service, "tc3_request")?;
    let signature = hex::encode(hmac_sha256(&secret_signing, &string_to_sign)?);

    Ok(format!(
        "{} Credential={}/{}, SignedHeaders={}, Signature={}",
        ALGORITHM, req.secret_id, credential_scope, SIGNED_HEADERS, signature
    ))
}

fn sha256_hex(data: &str) -> String {
    hex::encode(Sha256::digest(data.as_bytes()))
}

fn hmac_sha256(key: &[u8], msg: &str) -> Result<Vec<u8>> {
    let mut mac =
        HmacSha256::new_from_slice(key).map_err(|e| TencentError::Signing(e.to_string()))?;
    mac.update(msg.as_bytes());
    Ok(mac.finalize().into_bytes().to_vec())
}
