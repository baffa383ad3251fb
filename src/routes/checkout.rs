// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Subscription checkout route.

use crate::error::{AppError, Result};
use crate::models::checkout::CheckoutSessionResponse;
use crate::models::{CheckoutRequest, CheckoutSessionParams};
use crate::AppState;
use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderMap},
    routing::post,
    Json, Router,
};
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/create-checkout-session", post(create_checkout_session))
}

/// Origin for redirect URLs: the caller's `Origin` header, else the frontend.
fn redirect_origin<'a>(headers: &'a HeaderMap, fallback: &'a str) -> &'a str {
    headers
        .get(header::ORIGIN)
        .and_then(|h| h.to_str().ok())
        .filter(|origin| !origin.is_empty() && *origin != "null")
        .unwrap_or(fallback)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Open a hosted checkout session for the premium subscription.
///
/// `userId` comes from the client and is not authenticated.
async fn create_checkout_session(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<CheckoutSessionResponse>> {
    let payments = state.payments.as_ref().ok_or_else(|| {
        AppError::Configuration(
            "Stripe is not configured. Set STRIPE_SECRET_KEY in the environment.".to_string(),
        )
    })?;

    let request: CheckoutRequest = if body.is_empty() {
        CheckoutRequest::default()
    } else {
        serde_json::from_slice(&body)
            .map_err(|e| AppError::Validation(format!("invalid JSON body: {}", e)))?
    };

    let price_id = non_empty(request.price_id)
        .or_else(|| state.config.stripe_price_id.clone())
        .ok_or_else(|| AppError::Validation("priceId is required".to_string()))?;
    let user_id = non_empty(request.user_id);

    let origin = redirect_origin(&headers, &state.config.frontend_url);
    let params = CheckoutSessionParams::new(price_id, user_id, origin);

    tracing::info!(
        price_id = %params.price_id,
        user_id = ?params.user_id,
        "Creating checkout session"
    );

    let session = payments.create_checkout_session(&params).await?;

    Ok(Json(CheckoutSessionResponse {
        session_id: session.session_id,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_redirect_origin_prefers_header() {
        let mut headers = HeaderMap::new();
        headers.insert(header::ORIGIN, HeaderValue::from_static("https://app.example.com"));
        assert_eq!(
            redirect_origin(&headers, "http://localhost:3000"),
            "https://app.example.com"
        );
    }

    #[test]
    fn test_redirect_origin_fallback() {
        let mut headers = HeaderMap::new();
        assert_eq!(
            redirect_origin(&headers, "http://localhost:3000"),
            "http://localhost:3000"
        );

        headers.insert(header::ORIGIN, HeaderValue::from_static("null"));
        assert_eq!(
            redirect_origin(&headers, "http://localhost:3000"),
            "http://localhost:3000"
        );
    }
}
