// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Subscription state transitions driven by verified webhook events.
//!
//! Nothing is persisted yet; each branch logs the transition it would
//! apply and reports it as a `DispatchOutcome`.

use crate::models::event::{SubscriptionEvent, WebhookEvent};

/// What a dispatched event means for the user's premium status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    PremiumActivated {
        user_id: Option<String>,
        session_id: String,
    },
    PremiumRevoked {
        user_id: Option<String>,
        subscription_id: String,
    },
    SubscriptionChanged {
        user_id: Option<String>,
        subscription_id: String,
        status: Option<String>,
    },
    PaymentFailed {
        user_id: Option<String>,
        invoice_id: String,
    },
    Ignored {
        event_type: String,
    },
}

/// Apply a verified event. Never fails: every event gets acknowledged.
pub fn dispatch(event: &WebhookEvent) -> DispatchOutcome {
    let user_id = event.event.user_id().map(str::to_string);

    match &event.event {
        SubscriptionEvent::CheckoutCompleted(session) => {
            tracing::info!(
                event_id = %event.id,
                session_id = %session.id,
                customer = ?session.customer,
                "Checkout completed"
            );
            match &user_id {
                // TODO: mark the user premium once profiles are stored server-side
                Some(uid) => tracing::info!(user_id = %uid, "User is now premium"),
                None => tracing::warn!(
                    session_id = %session.id,
                    "Checkout completed without a userId in metadata"
                ),
            }
            DispatchOutcome::PremiumActivated {
                user_id,
                session_id: session.id.clone(),
            }
        }
        SubscriptionEvent::SubscriptionDeleted(sub) => {
            tracing::info!(
                event_id = %event.id,
                subscription_id = %sub.id,
                user_id = ?user_id,
                "Subscription cancelled, premium revoked"
            );
            DispatchOutcome::PremiumRevoked {
                user_id,
                subscription_id: sub.id.clone(),
            }
        }
        SubscriptionEvent::SubscriptionUpdated(sub) => {
            tracing::info!(
                event_id = %event.id,
                subscription_id = %sub.id,
                status = ?sub.status,
                user_id = ?user_id,
                "Subscription updated"
            );
            DispatchOutcome::SubscriptionChanged {
                user_id,
                subscription_id: sub.id.clone(),
                status: sub.status.clone(),
            }
        }
        SubscriptionEvent::PaymentFailed(invoice) => {
            tracing::warn!(
                event_id = %event.id,
                invoice_id = %invoice.id,
                customer = ?invoice.customer,
                user_id = ?user_id,
                "Invoice payment failed"
            );
            DispatchOutcome::PaymentFailed {
                user_id,
                invoice_id: invoice.id.clone(),
            }
        }
        SubscriptionEvent::Unhandled { event_type } => {
            tracing::debug!(
                event_id = %event.id,
                event_type = %event_type,
                "Ignoring unhandled event type"
            );
            DispatchOutcome::Ignored {
                event_type: event_type.clone(),
            }
        }
    }
}
