// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Subscription checkout models.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Free trial granted on every new subscription.
pub const TRIAL_PERIOD_DAYS: u32 = 7;

/// Placeholder Stripe substitutes with the real session id on redirect.
pub const CHECKOUT_SESSION_ID_PLACEHOLDER: &str = "{CHECKOUT_SESSION_ID}";

/// Body of a checkout request from the paywall.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    #[serde(default)]
    pub price_id: Option<String>,
    /// Supplied by the client and not authenticated.
    #[serde(default)]
    pub user_id: Option<String>,
}

/// Everything needed to open a checkout session with the processor.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutSessionParams {
    pub price_id: String,
    pub user_id: Option<String>,
    pub success_url: String,
    pub cancel_url: String,
    pub trial_period_days: u32,
}

impl CheckoutSessionParams {
    /// Build session parameters with redirect URLs rooted at `origin`.
    pub fn new(price_id: String, user_id: Option<String>, origin: &str) -> Self {
        let origin = origin.trim_end_matches('/');
        Self {
            price_id,
            user_id,
            success_url: format!(
                "{}/success?session_id={}",
                origin, CHECKOUT_SESSION_ID_PLACEHOLDER
            ),
            cancel_url: format!("{}/", origin),
            trial_period_days: TRIAL_PERIOD_DAYS,
        }
    }
}

/// Session created by the processor.
#[derive(Debug, Clone, PartialEq)]
pub struct CheckoutSession {
    /// Opaque processor token
    pub session_id: String,
}

/// Response to the paywall.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct CheckoutSessionResponse {
    pub session_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redirect_urls_from_origin() {
        let params = CheckoutSessionParams::new(
            "price_123".to_string(),
            Some("u123".to_string()),
            "https://app.example.com/",
        );

        assert_eq!(
            params.success_url,
            "https://app.example.com/success?session_id={CHECKOUT_SESSION_ID}"
        );
        assert_eq!(params.cancel_url, "https://app.example.com/");
        assert_eq!(params.trial_period_days, 7);
    }

    #[test]
    fn test_request_fields_are_optional() {
        let req: CheckoutRequest = serde_json::from_str("{}").unwrap();
        assert!(req.price_id.is_none());
        assert!(req.user_id.is_none());

        let req: CheckoutRequest =
            serde_json::from_str(r#"{"priceId":"price_1","userId":"u1"}"#).unwrap();
        assert_eq!(req.price_id.as_deref(), Some("price_1"));
        assert_eq!(req.user_id.as_deref(), Some("u1"));
    }
}
