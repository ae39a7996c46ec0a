/*
[INPUT]:  Domain, address, chain id, nonce and optional EIP-4361 fields
[OUTPUT]: Validated SIWE message, its signable text and JSON form
[POS]:    Auth layer - Sign-In with Ethereum message model
[UPDATE]: When EIP-4361 fields or rendering rules change
*/

use alloy_primitives::Address;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Serialize, Serializer};
use thiserror::Error;
use url::Url;

const SIWE_VERSION: &str = "1";
const MIN_NONCE_LEN: usize = 8;
const HEADER_SUFFIX: &str = " wants you to sign in with your Ethereum account:";

/// Errors while building a SIWE message
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MessageError {
    #[error("domain must not be empty")]
    EmptyDomain,
    #[error("domain contains whitespace: {0}")]
    InvalidDomain(String),
    #[error("uri is not an absolute URL: {0}")]
    InvalidUri(String),
    #[error("nonce must be at least 8 alphanumeric characters, got {0:?}")]
    InvalidNonce(String),
    #[error("statement must be a single line")]
    MultilineStatement,
    #[error("resource is not an absolute URL: {0}")]
    InvalidResource(String),
}

/// Required inputs for a new message
#[derive(Debug, Clone)]
pub struct MessageParams {
    pub domain: String,
    pub address: Address,
    pub statement: Option<String>,
    pub uri: String,
    pub chain_id: u64,
    pub nonce: String,
}

/// A Sign-In with Ethereum message.
///
/// Serializes with camelCase keys; that JSON object is what the backend
/// receives as `message` on `/verify`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SiweMessage {
    domain: String,
    #[serde(serialize_with = "serialize_checksum")]
    address: Address,
    #[serde(skip_serializing_if = "Option::is_none")]
    statement: Option<String>,
    uri: String,
    version: String,
    chain_id: u64,
    nonce: String,
    #[serde(serialize_with = "serialize_timestamp")]
    issued_at: DateTime<Utc>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_opt_timestamp"
    )]
    expiration_time: Option<DateTime<Utc>>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_opt_timestamp"
    )]
    not_before: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    request_id: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    resources: Vec<String>,
}

impl SiweMessage {
    /// Build a message issued now
    pub fn new(params: MessageParams) -> Result<Self, MessageError> {
        let domain = params.domain.trim().to_string();
        if domain.is_empty() {
            return Err(MessageError::EmptyDomain);
        }
        if domain.chars().any(char::is_whitespace) {
            return Err(MessageError::InvalidDomain(domain));
        }

        Url::parse(&params.uri).map_err(|_| MessageError::InvalidUri(params.uri.clone()))?;

        if params.nonce.len() < MIN_NONCE_LEN
            || !params.nonce.chars().all(|c| c.is_ascii_alphanumeric())
        {
            return Err(MessageError::InvalidNonce(params.nonce));
        }

        if params
            .statement
            .as_deref()
            .is_some_and(|statement| statement.contains('\n'))
        {
            return Err(MessageError::MultilineStatement);
        }

        Ok(Self {
            domain,
            address: params.address,
            statement: params.statement,
            uri: params.uri,
            version: SIWE_VERSION.to_string(),
            chain_id: params.chain_id,
            nonce: params.nonce,
            issued_at: Utc::now(),
            expiration_time: None,
            not_before: None,
            request_id: None,
            resources: Vec::new(),
        })
    }

    pub fn with_issued_at(mut self, issued_at: DateTime<Utc>) -> Self {
        self.issued_at = issued_at;
        self
    }

    pub fn with_expiration_time(mut self, expiration_time: DateTime<Utc>) -> Self {
        self.expiration_time = Some(expiration_time);
        self
    }

    pub fn with_not_before(mut self, not_before: DateTime<Utc>) -> Self {
        self.not_before = Some(not_before);
        self
    }

    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }

    pub fn with_resources(mut self, resources: Vec<String>) -> Result<Self, MessageError> {
        if let Some(bad) = resources.iter().find(|r| Url::parse(r).is_err()) {
            return Err(MessageError::InvalidResource(bad.clone()));
        }
        self.resources = resources;
        Ok(self)
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn statement(&self) -> Option<&str> {
        self.statement.as_deref()
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn chain_id(&self) -> u64 {
        self.chain_id
    }

    pub fn nonce(&self) -> &str {
        &self.nonce
    }

    pub fn issued_at(&self) -> DateTime<Utc> {
        self.issued_at
    }

    /// Render the EIP-4361 text the wallet signs
    pub fn prepare_message(&self) -> String {
        let mut out = format!("{}{HEADER_SUFFIX}\n", self.domain);
        out.push_str(&self.address.to_checksum(None));
        out.push_str("\n\n");
        if let Some(statement) = &self.statement {
            out.push_str(statement);
            out.push('\n');
        }
        out.push('\n');

        let mut fields = vec![
            format!("URI: {}", self.uri),
            format!("Version: {}", self.version),
            format!("Chain ID: {}", self.chain_id),
            format!("Nonce: {}", self.nonce),
            format!("Issued At: {}", format_timestamp(&self.issued_at)),
        ];
        if let Some(exp) = &self.expiration_time {
            fields.push(format!("Expiration Time: {}", format_timestamp(exp)));
        }
        if let Some(nbf) = &self.not_before {
            fields.push(format!("Not Before: {}", format_timestamp(nbf)));
        }
        if let Some(request_id) = &self.request_id {
            fields.push(format!("Request ID: {request_id}"));
        }
        if !self.resources.is_empty() {
            let mut block = String::from("Resources:");
            for resource in &self.resources {
                block.push_str("\n- ");
                block.push_str(resource);
            }
            fields.push(block);
        }

        out.push_str(&fields.join("\n"));
        out
    }
}

impl std::fmt::Display for SiweMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.prepare_message())
    }
}

fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn serialize_checksum<S: Serializer>(address: &Address, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&address.to_checksum(None))
}

fn serialize_timestamp<S: Serializer>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&format_timestamp(ts))
}

fn serialize_opt_timestamp<S: Serializer>(
    ts: &Option<DateTime<Utc>>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match ts {
        Some(ts) => serialize_timestamp(ts, serializer),
        None => serializer.serialize_none(),
    }
}
