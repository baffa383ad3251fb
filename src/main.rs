// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Wellness API Server
//!
//! Analyzes meal photos and handles the premium subscription checkout and
//! its payment webhooks.

use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use wellness_api::{
    config::Config,
    services::{
        ContentProvider, OpenAiVisionClient, PaymentProcessor, StaticContentProvider,
        StripeClient, VisionModel,
    },
    AppState,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging();

    // Load configuration from environment
    let config = Config::from_env()?;
    tracing::info!(port = config.port, "Starting Wellness API");

    let vision: Option<Arc<dyn VisionModel>> = match &config.openai_api_key {
        Some(key) => {
            let mut client = OpenAiVisionClient::new(
                key.clone(),
                config.vision_model.clone(),
                config.upstream_timeout,
            )?;
            if let Some(base) = &config.vision_api_base {
                client = client.with_base_url(base.as_str());
            }
            tracing::info!(model = %config.vision_model, "Vision model client initialized");
            Some(Arc::new(client) as Arc<dyn VisionModel>)
        }
        None => {
            tracing::warn!("OPENAI_API_KEY not set, food analysis disabled");
            None
        }
    };

    let payments: Option<Arc<dyn PaymentProcessor>> = match &config.stripe_secret_key {
        Some(key) => {
            let mut client = StripeClient::new(key.clone(), config.upstream_timeout)?;
            if let Some(base) = &config.stripe_api_base {
                client = client.with_base_url(base.as_str());
            }
            tracing::info!("Stripe client initialized");
            Some(Arc::new(client) as Arc<dyn PaymentProcessor>)
        }
        None => {
            tracing::warn!("STRIPE_SECRET_KEY not set, checkout disabled");
            None
        }
    };

    if config.stripe_webhook_secret.is_none() {
        tracing::warn!("STRIPE_WEBHOOK_SECRET not set, webhooks will be rejected");
    }

    let content: Arc<dyn ContentProvider> = Arc::new(StaticContentProvider::default());

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        vision,
        payments,
        content,
    });

    // Build router
    let app = wellness_api::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(
        address = %addr,
        webhook_paths = ?config.webhook_paths,
        "Server listening"
    );

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,wellness_api=debug"));

    tracing_subscriber::registry().with(filter).with(format).init();
}
