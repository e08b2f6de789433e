// crates/films-contract/src/client.rs
// ============================================================================
// Module: Films HTTP Client
// Description: Blocking HTTP client for contract checks against the films API.
// Purpose: Issue one request, capture status, headers, bounded body, and timing.
// Dependencies: reqwest, serde_json, thiserror
// ============================================================================

//! ## Overview
//! [`FilmsClient`] wraps a blocking `reqwest` client configured for smoke
//! testing a public demo service: TLS certificate validation is disabled,
//! redirects are not followed, and every body is read under a byte cap.
//! Each call yields an [`Exchange`] snapshot that checks assert against.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Read;
use std::time::Duration;
use std::time::Instant;

use reqwest::Method;
use reqwest::StatusCode;
use reqwest::Url;
use reqwest::blocking::Client;
use reqwest::blocking::Response;
use reqwest::header::HeaderMap;
use reqwest::redirect::Policy;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::config::ContractConfig;

/// Number of body characters kept when quoting a response in a failure.
const BODY_PREVIEW_CHARS: usize = 160;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Transport-level failures surfaced by [`FilmsClient`].
#[derive(Debug, Error)]
pub enum ClientError {
    /// The underlying HTTP client could not be constructed.
    #[error("http client build failed: {0}")]
    Build(String),
    /// The request could not be sent or no response arrived.
    #[error("{method} {url} failed: {message}")]
    Request {
        /// HTTP method of the failed request.
        method: Method,
        /// Target URL of the failed request.
        url: Url,
        /// Underlying transport error.
        message: String,
    },
    /// The response body exceeded the configured size limit.
    #[error("response body exceeds {limit} bytes")]
    BodyTooLarge {
        /// Configured limit in bytes.
        limit: usize,
    },
    /// The response body could not be read to completion.
    #[error("failed to read response body: {0}")]
    Read(String),
}

// ============================================================================
// SECTION: Exchange Snapshot
// ============================================================================

/// One completed request/response pair.
#[derive(Debug, Clone)]
pub struct Exchange {
    /// Request method.
    pub method: Method,
    /// Request URL.
    pub url: Url,
    /// Response status code.
    pub status: StatusCode,
    /// Response headers.
    pub headers: HeaderMap,
    /// Response body bytes (empty for `HEAD`).
    pub body: Vec<u8>,
    /// Time from sending the request until response headers arrived.
    pub elapsed: Duration,
}

impl Exchange {
    /// Returns the status code as an integer.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        self.status.as_u16()
    }

    /// Returns true when a header with the given name is present.
    ///
    /// Header names are matched case-insensitively.
    #[must_use]
    pub fn has_header(&self, name: &str) -> bool {
        self.headers.contains_key(name)
    }

    /// Decodes the body as JSON into `T`.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error when the body is not valid for `T`.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }

    /// Returns a short, lossy UTF-8 preview of the body for diagnostics.
    #[must_use]
    pub fn body_preview(&self) -> String {
        let text = String::from_utf8_lossy(&self.body);
        let mut preview: String = text.chars().take(BODY_PREVIEW_CHARS).collect();
        if text.chars().count() > BODY_PREVIEW_CHARS {
            preview.push_str("...");
        }
        preview
    }
}

// ============================================================================
// SECTION: Client
// ============================================================================

/// Blocking HTTP client used by every contract check.
#[derive(Debug, Clone)]
pub struct FilmsClient {
    /// Underlying reqwest client.
    client: Client,
    /// Maximum response size allowed, in bytes.
    max_response_bytes: usize,
}

impl FilmsClient {
    /// Builds a client from the contract configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Build`] when the TLS backend cannot initialize.
    pub fn new(config: &ContractConfig) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .user_agent(config.user_agent.clone())
            .redirect(Policy::none())
            .danger_accept_invalid_certs(true)
            .build()
            .map_err(|err| ClientError::Build(err.to_string()))?;
        Ok(Self {
            client,
            max_response_bytes: config.max_response_bytes,
        })
    }

    /// Sends a request without a body and captures the full exchange.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport failure or an oversized body.
    pub fn send(&self, method: Method, url: &Url) -> Result<Exchange, ClientError> {
        let started = Instant::now();
        let mut response =
            self.client.request(method.clone(), url.clone()).send().map_err(|err| {
                ClientError::Request {
                    method: method.clone(),
                    url: url.clone(),
                    message: err.to_string(),
                }
            })?;
        let elapsed = started.elapsed();
        let status = response.status();
        let headers = response.headers().clone();
        let body = if method == Method::HEAD {
            Vec::new()
        } else {
            read_response_limited(&mut response, self.max_response_bytes)?
        };
        Ok(Exchange {
            method,
            url: url.clone(),
            status,
            headers,
            body,
            elapsed,
        })
    }

    /// Sends a `GET` request.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport failure or an oversized body.
    pub fn get(&self, url: &Url) -> Result<Exchange, ClientError> {
        self.send(Method::GET, url)
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Reads the response body while enforcing a byte limit.
fn read_response_limited(response: &mut Response, max_bytes: usize) -> Result<Vec<u8>, ClientError> {
    let max_bytes_u64 = u64::try_from(max_bytes).map_err(|_| ClientError::BodyTooLarge {
        limit: max_bytes,
    })?;
    if let Some(expected) = response.content_length()
        && expected > max_bytes_u64
    {
        return Err(ClientError::BodyTooLarge {
            limit: max_bytes,
        });
    }
    let mut buf = Vec::new();
    let mut handle = response.take(max_bytes_u64.saturating_add(1));
    handle.read_to_end(&mut buf).map_err(|err| ClientError::Read(err.to_string()))?;
    if buf.len() > max_bytes {
        return Err(ClientError::BodyTooLarge {
            limit: max_bytes,
        });
    }
    Ok(buf)
}
