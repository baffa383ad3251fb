// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Wellness API: backend for the meal-planning and nutrition app
//!
//! This crate analyzes meal photos with a vision model, opens subscription
//! checkout sessions and processes payment webhooks.

pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use config::Config;
use services::{ContentProvider, PaymentProcessor, VisionModel};
use std::sync::Arc;

/// Shared application state.
///
/// Clients are `None` when their credentials are not configured; handlers
/// that need them answer with a configuration error.
pub struct AppState {
    pub config: Config,
    pub vision: Option<Arc<dyn VisionModel>>,
    pub payments: Option<Arc<dyn PaymentProcessor>>,
    pub content: Arc<dyn ContentProvider>,
}
