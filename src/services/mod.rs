// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod analysis;
pub mod content;
pub mod signature;
pub mod stripe;
pub mod subscriptions;
pub mod vision;

pub use content::{ContentProvider, StaticContentProvider};
pub use stripe::{PaymentProcessor, StripeClient};
pub use subscriptions::DispatchOutcome;
pub use vision::{OpenAiVisionClient, VisionModel};
