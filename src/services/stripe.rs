// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Stripe API client for subscription checkout.

use crate::error::AppError;
use crate::models::checkout::{CheckoutSession, CheckoutSessionParams};
use crate::models::event::USER_ID_METADATA_KEY;
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

const STRIPE_API_BASE: &str = "https://api.stripe.com/v1";

/// API version pinned for every request.
pub const STRIPE_API_VERSION: &str = "2024-12-18.acacia";

/// Payment processor able to open hosted checkout sessions.
#[async_trait]
pub trait PaymentProcessor: Send + Sync {
    async fn create_checkout_session(
        &self,
        params: &CheckoutSessionParams,
    ) -> Result<CheckoutSession, AppError>;
}

/// Stripe REST client.
#[derive(Clone)]
pub struct StripeClient {
    http: reqwest::Client,
    base_url: String,
    secret_key: String,
}

impl StripeClient {
    pub fn new(secret_key: String, timeout: Duration) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Internal(anyhow::anyhow!("HTTP client init failed: {}", e)))?;

        Ok(Self {
            http,
            base_url: STRIPE_API_BASE.to_string(),
            secret_key,
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }
}

#[async_trait]
impl PaymentProcessor for StripeClient {
    async fn create_checkout_session(
        &self,
        params: &CheckoutSessionParams,
    ) -> Result<CheckoutSession, AppError> {
        let url = format!("{}/checkout/sessions", self.base_url);

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.secret_key)
            .header("Stripe-Version", STRIPE_API_VERSION)
            .form(&checkout_form(params))
            .send()
            .await
            .map_err(|e| AppError::UpstreamProcessor(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::UpstreamProcessor(processor_message(status, &body)));
        }

        let session: StripeSession = response
            .json()
            .await
            .map_err(|e| AppError::UpstreamProcessor(format!("JSON parse error: {}", e)))?;

        tracing::info!(session_id = %session.id, "Checkout session created");

        Ok(CheckoutSession {
            session_id: session.id,
        })
    }
}

/// Form-encoded body for `POST /v1/checkout/sessions`.
///
/// The user id goes on both the session and the subscription so that later
/// subscription events carry it too.
pub fn checkout_form(params: &CheckoutSessionParams) -> Vec<(String, String)> {
    let mut form = vec![
        ("mode".to_string(), "subscription".to_string()),
        ("payment_method_types[0]".to_string(), "card".to_string()),
        ("line_items[0][price]".to_string(), params.price_id.clone()),
        ("line_items[0][quantity]".to_string(), "1".to_string()),
        ("success_url".to_string(), params.success_url.clone()),
        ("cancel_url".to_string(), params.cancel_url.clone()),
        (
            "subscription_data[trial_period_days]".to_string(),
            params.trial_period_days.to_string(),
        ),
    ];

    if let Some(user_id) = &params.user_id {
        form.push((format!("metadata[{}]", USER_ID_METADATA_KEY), user_id.clone()));
        form.push((
            format!("subscription_data[metadata][{}]", USER_ID_METADATA_KEY),
            user_id.clone(),
        ));
    }

    form
}

#[derive(Debug, Deserialize)]
struct StripeSession {
    id: String,
}

#[derive(Debug, Deserialize)]
struct StripeErrorBody {
    error: StripeErrorDetail,
}

#[derive(Debug, Deserialize)]
struct StripeErrorDetail {
    message: Option<String>,
}

/// Prefer Stripe's own error message; fall back to status and raw body.
fn processor_message(status: reqwest::StatusCode, body: &str) -> String {
    serde_json::from_str::<StripeErrorBody>(body)
        .ok()
        .and_then(|b| b.error.message)
        .unwrap_or_else(|| format!("HTTP {}: {}", status, body))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field<'a>(form: &'a [(String, String)], key: &str) -> Option<&'a str> {
        form.iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    #[test]
    fn test_checkout_form_fields() {
        let params = CheckoutSessionParams::new(
            "price_123".to_string(),
            Some("u123".to_string()),
            "https://app.example.com",
        );
        let form = checkout_form(&params);

        assert_eq!(field(&form, "mode"), Some("subscription"));
        assert_eq!(field(&form, "line_items[0][price]"), Some("price_123"));
        assert_eq!(field(&form, "line_items[0][quantity]"), Some("1"));
        assert_eq!(field(&form, "subscription_data[trial_period_days]"), Some("7"));
        assert_eq!(field(&form, "metadata[userId]"), Some("u123"));
        assert_eq!(
            field(&form, "subscription_data[metadata][userId]"),
            Some("u123")
        );
        assert_eq!(
            field(&form, "success_url"),
            Some("https://app.example.com/success?session_id={CHECKOUT_SESSION_ID}")
        );
    }

    #[test]
    fn test_checkout_form_without_user() {
        let params = CheckoutSessionParams::new("price_123".to_string(), None, "http://localhost");
        let form = checkout_form(&params);
        assert!(field(&form, "metadata[userId]").is_none());
    }

    #[test]
    fn test_processor_message_from_error_body() {
        let body = r#"{"error":{"type":"invalid_request_error","message":"No such price: 'price_x'"}}"#;
        assert_eq!(
            processor_message(reqwest::StatusCode::BAD_REQUEST, body),
            "No such price: 'price_x'"
        );
        assert_eq!(
            processor_message(reqwest::StatusCode::BAD_GATEWAY, "upstream down"),
            "HTTP 502 Bad Gateway: upstream down"
        );
    }
}
