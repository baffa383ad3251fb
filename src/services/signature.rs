// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Stripe webhook signature verification.
//!
//! The `stripe-signature` header looks like `t=1700000000,v1=<hex>,v1=<hex>`.
//! Each `v1` value is HMAC-SHA256 over `"{t}.{raw body}"` keyed with the
//! endpoint's signing secret. Verification must run on the exact bytes
//! received.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// Header carrying the processor signature.
pub const SIGNATURE_HEADER: &str = "stripe-signature";

/// Maximum age (and clock skew) accepted for a signed timestamp.
pub const DEFAULT_TOLERANCE_SECS: i64 = 300;

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum SignatureError {
    #[error("Unable to extract timestamp and signatures from header")]
    MalformedHeader,

    #[error("No signatures found with expected scheme")]
    NoSignatures,

    #[error("Timestamp outside the tolerance zone")]
    TimestampOutsideTolerance,

    #[error("No signatures found matching the expected signature for payload")]
    Mismatch,

    #[error("Signing secret cannot be used as an HMAC key")]
    InvalidSecret,
}

/// Parsed signature header.
struct SignatureHeader {
    timestamp: i64,
    signatures: Vec<Vec<u8>>,
}

fn parse_header(header: &str) -> Result<SignatureHeader, SignatureError> {
    let mut timestamp = None;
    let mut signatures = Vec::new();

    for item in header.split(',') {
        let Some((key, value)) = item.trim().split_once('=') else {
            continue;
        };
        match key {
            "t" => {
                timestamp = Some(
                    value
                        .parse::<i64>()
                        .map_err(|_| SignatureError::MalformedHeader)?,
                )
            }
            // Undecodable entries can never match, skip them
            "v1" => {
                if let Ok(sig) = hex::decode(value) {
                    signatures.push(sig);
                }
            }
            _ => {}
        }
    }

    let timestamp = timestamp.ok_or(SignatureError::MalformedHeader)?;
    if signatures.is_empty() {
        return Err(SignatureError::NoSignatures);
    }

    Ok(SignatureHeader {
        timestamp,
        signatures,
    })
}

fn mac_for(payload: &[u8], timestamp: i64, secret: &str) -> Result<HmacSha256, SignatureError> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|_| SignatureError::InvalidSecret)?;
    mac.update(timestamp.to_string().as_bytes());
    mac.update(b".");
    mac.update(payload);
    Ok(mac)
}

/// Hex signature for `payload` signed at `timestamp`.
pub fn compute_signature(
    payload: &[u8],
    timestamp: i64,
    secret: &str,
) -> Result<String, SignatureError> {
    let mac = mac_for(payload, timestamp, secret)?;
    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// Build a header value the way Stripe does. Used for local testing.
pub fn signature_header(
    payload: &[u8],
    timestamp: i64,
    secret: &str,
) -> Result<String, SignatureError> {
    Ok(format!(
        "t={},v1={}",
        timestamp,
        compute_signature(payload, timestamp, secret)?
    ))
}

/// Verify `header` against the raw `payload`.
///
/// `now` is the current unix time; a timestamp further than `tolerance`
/// seconds from it is rejected.
pub fn verify_signature(
    payload: &[u8],
    header: &str,
    secret: &str,
    now: i64,
    tolerance: i64,
) -> Result<(), SignatureError> {
    let parsed = parse_header(header)?;

    let expected = mac_for(payload, parsed.timestamp, secret)?
        .finalize()
        .into_bytes();

    let matched = parsed
        .signatures
        .iter()
        .any(|sig| sig.len() == expected.len() && bool::from(sig.as_slice().ct_eq(&expected)));

    if !matched {
        return Err(SignatureError::Mismatch);
    }

    if (now - parsed.timestamp).abs() > tolerance {
        return Err(SignatureError::TimestampOutsideTolerance);
    }

    Ok(())
}
