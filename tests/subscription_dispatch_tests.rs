// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Verified payload -> parsed event -> dispatched transition.

use serde_json::json;
use wellness_api::models::{SubscriptionEvent, WebhookEvent};
use wellness_api::services::signature::{signature_header, verify_signature, DEFAULT_TOLERANCE_SECS};
use wellness_api::services::subscriptions::dispatch;
use wellness_api::services::DispatchOutcome;

const SECRET: &str = "whsec_test_secret";

#[test]
fn test_checkout_completed_user_id_round_trip() {
    let payload = json!({
        "id": "evt_1",
        "type": "checkout.session.completed",
        "data": {"object": {
            "id": "cs_test_a1",
            "customer": "cus_1",
            "subscription": "sub_1",
            "metadata": {"userId": "u123"}
        }}
    })
    .to_string();

    let now = 1_700_000_000;
    let header = signature_header(payload.as_bytes(), now, SECRET).unwrap();
    verify_signature(payload.as_bytes(), &header, SECRET, now, DEFAULT_TOLERANCE_SECS).unwrap();

    let event = WebhookEvent::parse(payload.as_bytes()).unwrap();
    match &event.event {
        SubscriptionEvent::CheckoutCompleted(session) => {
            assert_eq!(session.metadata.get("userId").map(String::as_str), Some("u123"));
            assert_eq!(session.subscription.as_deref(), Some("sub_1"));
        }
        other => panic!("unexpected event: {:?}", other),
    }

    assert_eq!(
        dispatch(&event),
        DispatchOutcome::PremiumActivated {
            user_id: Some("u123".to_string()),
            session_id: "cs_test_a1".to_string(),
        }
    );
}

#[test]
fn test_payment_failed_outcome() {
    let payload = json!({
        "id": "evt_2",
        "type": "invoice.payment_failed",
        "data": {"object": {
            "id": "in_1",
            "customer": "cus_1",
            "subscription_details": {"metadata": {"userId": "u55"}}
        }}
    })
    .to_string();

    let event = WebhookEvent::parse(payload.as_bytes()).unwrap();

    assert_eq!(
        dispatch(&event),
        DispatchOutcome::PaymentFailed {
            user_id: Some("u55".to_string()),
            invoice_id: "in_1".to_string(),
        }
    );
}

#[test]
fn test_payment_failed_with_null_metadata_still_dispatches() {
    let payload = json!({
        "id": "evt_3",
        "type": "invoice.payment_failed",
        "data": {"object": {
            "id": "in_9",
            "customer": "cus_1",
            "subscription_details": {"metadata": null}
        }}
    })
    .to_string();

    let event = WebhookEvent::parse(payload.as_bytes()).unwrap();

    assert_eq!(
        dispatch(&event),
        DispatchOutcome::PaymentFailed {
            user_id: None,
            invoice_id: "in_9".to_string(),
        }
    );
}
