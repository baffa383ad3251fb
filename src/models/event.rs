// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Stripe webhook events that drive subscription status.

use serde::{Deserialize, Deserializer};
use std::collections::HashMap;

/// Metadata key linking processor objects back to an app user.
pub const USER_ID_METADATA_KEY: &str = "userId";

/// Event envelope as delivered by Stripe.
#[derive(Debug, Deserialize)]
struct RawEvent {
    id: String,
    #[serde(rename = "type")]
    event_type: String,
    data: RawEventData,
}

#[derive(Debug, Deserialize)]
struct RawEventData {
    object: serde_json::Value,
}

/// Stripe sends `null` for unset nullable fields; read those as empty.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Completed checkout session.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CheckoutSessionObject {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default)]
    pub customer: Option<String>,
    #[serde(default)]
    pub subscription: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub metadata: HashMap<String, String>,
}

/// Subscription created, changed or cancelled.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubscriptionObject {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub customer: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub metadata: HashMap<String, String>,
}

/// Invoice whose payment failed.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InvoiceObject {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(default)]
    pub customer: Option<String>,
    #[serde(default)]
    pub subscription_details: Option<SubscriptionDetails>,
}

/// Copy of the subscription metadata embedded in invoices.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubscriptionDetails {
    #[serde(default, deserialize_with = "null_as_default")]
    pub metadata: HashMap<String, String>,
}

/// Subscription lifecycle event.
#[derive(Debug, Clone)]
pub enum SubscriptionEvent {
    CheckoutCompleted(CheckoutSessionObject),
    SubscriptionDeleted(SubscriptionObject),
    SubscriptionUpdated(SubscriptionObject),
    PaymentFailed(InvoiceObject),
    /// Any event type we do not act on.
    Unhandled { event_type: String },
}

/// A verified webhook event.
#[derive(Debug, Clone)]
pub struct WebhookEvent {
    pub id: String,
    pub event_type: String,
    pub event: SubscriptionEvent,
}

fn user_id_from(metadata: &HashMap<String, String>) -> Option<&str> {
    metadata
        .get(USER_ID_METADATA_KEY)
        .map(String::as_str)
        .filter(|id| !id.is_empty())
}

impl SubscriptionEvent {
    /// Correlated application user, if the processor echoed one back.
    pub fn user_id(&self) -> Option<&str> {
        match self {
            SubscriptionEvent::CheckoutCompleted(session) => user_id_from(&session.metadata),
            SubscriptionEvent::SubscriptionDeleted(sub)
            | SubscriptionEvent::SubscriptionUpdated(sub) => user_id_from(&sub.metadata),
            SubscriptionEvent::PaymentFailed(invoice) => invoice
                .subscription_details
                .as_ref()
                .and_then(|d| user_id_from(&d.metadata)),
            SubscriptionEvent::Unhandled { .. } => None,
        }
    }

    /// Id of the processor object the event is about.
    pub fn object_id(&self) -> Option<&str> {
        match self {
            SubscriptionEvent::CheckoutCompleted(session) => Some(&session.id),
            SubscriptionEvent::SubscriptionDeleted(sub)
            | SubscriptionEvent::SubscriptionUpdated(sub) => Some(&sub.id),
            SubscriptionEvent::PaymentFailed(invoice) => Some(&invoice.id),
            SubscriptionEvent::Unhandled { .. } => None,
        }
    }
}

impl WebhookEvent {
    /// Parse an already verified payload.
    ///
    /// Known event types whose object cannot be decoded become `Unhandled`
    /// so the delivery is still acknowledged.
    pub fn parse(payload: &[u8]) -> Result<Self, serde_json::Error> {
        let raw: RawEvent = serde_json::from_slice(payload)?;
        let object = raw.data.object;

        let decoded = match raw.event_type.as_str() {
            "checkout.session.completed" => {
                serde_json::from_value(object).map(SubscriptionEvent::CheckoutCompleted)
            }
            "customer.subscription.deleted" => {
                serde_json::from_value(object).map(SubscriptionEvent::SubscriptionDeleted)
            }
            "customer.subscription.updated" => {
                serde_json::from_value(object).map(SubscriptionEvent::SubscriptionUpdated)
            }
            "invoice.payment_failed" => {
                serde_json::from_value(object).map(SubscriptionEvent::PaymentFailed)
            }
            other => Ok(SubscriptionEvent::Unhandled {
                event_type: other.to_string(),
            }),
        };

        let event = decoded.unwrap_or_else(|e| {
            tracing::warn!(
                event_id = %raw.id,
                event_type = %raw.event_type,
                error = %e,
                "Could not decode event object, treating as unhandled"
            );
            SubscriptionEvent::Unhandled {
                event_type: raw.event_type.clone(),
            }
        });

        Ok(Self {
            id: raw.id,
            event_type: raw.event_type,
            event,
        })
    }
}
