// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Webhook route for Stripe events.

use crate::error::{AppError, Result};
use crate::models::WebhookEvent;
use crate::services::signature::{verify_signature, DEFAULT_TOLERANCE_SECS, SIGNATURE_HEADER};
use crate::services::subscriptions;
use crate::AppState;
use axum::{body::Bytes, extract::State, http::HeaderMap, routing::post, Json, Router};
use serde::Serialize;
use std::sync::Arc;

/// Mount the webhook handler on every path in `paths`.
pub fn routes<S: AsRef<str>>(paths: &[S]) -> Router<Arc<AppState>> {
    paths.iter().fold(Router::new(), |router, path| {
        router.route(path.as_ref(), post(handle_event))
    })
}

/// Acknowledgment body.
#[derive(Serialize)]
struct WebhookAck {
    received: bool,
}

/// Handle incoming webhook events (POST).
///
/// The body is taken as raw bytes: the signature covers the exact payload.
async fn handle_event(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<WebhookAck>> {
    let secret = state
        .config
        .stripe_webhook_secret
        .as_deref()
        .ok_or_else(|| AppError::Configuration("webhook signing secret is not set".to_string()))?;

    let signature = headers
        .get(SIGNATURE_HEADER)
        .map(|h| h.to_str())
        .transpose()
        .map_err(|_| AppError::SignatureVerification("signature header is not ASCII".to_string()))?
        .filter(|s| !s.is_empty())
        .ok_or(AppError::MissingSignature)?;

    verify_signature(
        &body,
        signature,
        secret,
        chrono::Utc::now().timestamp(),
        DEFAULT_TOLERANCE_SECS,
    )
    .map_err(|e| AppError::SignatureVerification(e.to_string()))?;

    match WebhookEvent::parse(&body) {
        Ok(event) => {
            tracing::info!(
                event_id = %event.id,
                event_type = %event.event_type,
                object_id = ?event.event.object_id(),
                "Webhook event verified"
            );
            let outcome = subscriptions::dispatch(&event);
            tracing::debug!(outcome = ?outcome, "Webhook event dispatched");
        }
        Err(e) => {
            // Signed by Stripe but not an event envelope; redelivery won't fix it
            tracing::error!(error = %e, "Failed to parse verified webhook payload");
        }
    }

    // Always acknowledge once verified, otherwise Stripe redelivers
    Ok(Json(WebhookAck { received: true }))
}
