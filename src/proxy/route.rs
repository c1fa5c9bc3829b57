//! Request routing and validation.
//!
//! The legacy client addresses two resources. Every request is matched
//! against this closed set, then checked for method and content type in
//! that order, so the failure status is always the most basic one.

use axum::http::{header, HeaderMap, Method};
use mime::Mime;
use serde::Deserialize;

use crate::core::constants::{ARMOR_SUFFIX, INDEX_FILE, JSON_MEDIA_TYPE};
use crate::error::ProxyError;

/// A resource the proxy serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// `/secret`, `/secret/*`: one armored secret.
    Secret,
    /// `/secrets`, `/secrets/*`: the encrypted index.
    Index,
}

/// Body of a secret request.
#[derive(Debug, Deserialize)]
pub struct SecretRequest {
    pub path: String,
    pub username: String,
}

impl Route {
    /// Match a request path; `None` means not found.
    pub fn from_path(path: &str) -> Option<Self> {
        match path {
            "/secret" => Some(Self::Secret),
            "/secrets" => Some(Self::Index),
            p if p.starts_with("/secret/") => Some(Self::Secret),
            p if p.starts_with("/secrets/") => Some(Self::Index),
            _ => None,
        }
    }

    /// Upstream location, relative to the target base.
    ///
    /// # Errors
    ///
    /// Returns `ProxyError::InvalidBody` if a secret request body is not a
    /// JSON object with string `path` and `username` fields.
    pub fn location(self, body: &[u8]) -> Result<String, ProxyError> {
        match self {
            Self::Index => Ok(INDEX_FILE.to_string()),
            Self::Secret => {
                let request: SecretRequest = serde_json::from_slice(body)
                    .map_err(|e| ProxyError::InvalidBody(e.to_string()))?;
                Ok(format!("{}/{}{}", request.path, request.username, ARMOR_SUFFIX))
            }
        }
    }
}

/// Only POST is accepted.
pub fn check_method(method: &Method) -> Result<(), ProxyError> {
    if method == Method::POST {
        Ok(())
    } else {
        Err(ProxyError::MethodNotAllowed)
    }
}

/// The declared media type must be `application/json`. Well-formed
/// parameters such as `charset` are accepted; a malformed declaration is
/// rejected.
pub fn check_content_type(headers: &HeaderMap) -> Result<(), ProxyError> {
    let value = headers
        .get(header::CONTENT_TYPE)
        .map(|v| v.to_str())
        .transpose()
        .map_err(|_| ProxyError::BadContentType("mime: invalid media parameter".to_string()))?
        .unwrap_or_default();

    let media: Mime = value
        .parse()
        .map_err(|e| ProxyError::BadContentType(format!("mime: {}", e)))?;

    if !media.essence_str().eq_ignore_ascii_case(JSON_MEDIA_TYPE) {
        return Err(ProxyError::BadContentType("bad content type".to_string()));
    }
    Ok(())
}
