// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.
//!
//! Every third-party credential is optional at startup. Handlers that need a
//! missing credential fail with a configuration error instead of crashing the
//! process.

use std::env;
use std::time::Duration;

/// Default vision-capable model.
pub const DEFAULT_VISION_MODEL: &str = "gpt-4o";

/// Default timeout for calls to the vision model and the payment processor.
pub const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 60;

/// Paths the payment webhook is registered on.
pub const DEFAULT_WEBHOOK_PATHS: &[&str] = &["/api/webhook", "/api/webhooks/stripe"];

/// Paths already served by other routes; a webhook mounted on one of them
/// would collide when the router is built.
pub const RESERVED_PATHS: &[&str] = &[
    "/health",
    "/api/analyze-food",
    "/api/create-checkout-session",
    "/api/recipes",
    "/api/challenges",
    "/api/modules",
    "/api/diary/totals",
];

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    // --- Environment Variables (non-sensitive) ---
    /// Frontend URL, used for CORS and as the checkout redirect fallback
    pub frontend_url: String,
    /// Server port
    pub port: u16,
    /// Vision model name
    pub vision_model: String,
    /// Public Stripe price id for the premium plan
    pub stripe_price_id: Option<String>,
    /// Timeout applied to every outbound call
    pub upstream_timeout: Duration,
    /// Routes the webhook handler is mounted on
    pub webhook_paths: Vec<String>,
    /// Override for the vision API host (gateways, proxies)
    pub vision_api_base: Option<String>,
    /// Override for the Stripe API host (e.g. stripe-mock)
    pub stripe_api_base: Option<String>,

    // --- Secrets ---
    /// Vision model API key
    pub openai_api_key: Option<String>,
    /// Stripe secret API key
    pub stripe_secret_key: Option<String>,
    /// Stripe webhook signing secret
    pub stripe_webhook_secret: Option<String>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let port = match env::var("PORT") {
            Ok(v) => v
                .parse()
                .map_err(|_| ConfigError::Invalid("PORT", v.clone()))?,
            Err(_) => 8080,
        };

        let upstream_timeout = match env::var("UPSTREAM_TIMEOUT_SECS") {
            Ok(v) => Duration::from_secs(
                v.parse()
                    .map_err(|_| ConfigError::Invalid("UPSTREAM_TIMEOUT_SECS", v.clone()))?,
            ),
            Err(_) => Duration::from_secs(DEFAULT_UPSTREAM_TIMEOUT_SECS),
        };

        let webhook_paths = match env::var("WEBHOOK_PATHS") {
            Ok(v) => Some(parse_paths(&v)?),
            Err(_) => None,
        }
        .filter(|paths| !paths.is_empty())
        .unwrap_or_else(default_webhook_paths);

        Ok(Self {
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            port,
            vision_model: env::var("OPENAI_MODEL")
                .unwrap_or_else(|_| DEFAULT_VISION_MODEL.to_string()),
            stripe_price_id: optional_var("STRIPE_PRICE_ID"),
            upstream_timeout,
            webhook_paths,
            vision_api_base: optional_var("OPENAI_BASE_URL"),
            stripe_api_base: optional_var("STRIPE_API_BASE"),

            openai_api_key: optional_var("OPENAI_API_KEY"),
            stripe_secret_key: optional_var("STRIPE_SECRET_KEY"),
            stripe_webhook_secret: optional_var("STRIPE_WEBHOOK_SECRET"),
        })
    }

    /// Config for tests with every credential populated.
    pub fn test_default() -> Self {
        Self {
            frontend_url: "http://localhost:3000".to_string(),
            port: 8080,
            vision_model: DEFAULT_VISION_MODEL.to_string(),
            stripe_price_id: Some("price_test_premium".to_string()),
            upstream_timeout: Duration::from_secs(5),
            webhook_paths: default_webhook_paths(),
            vision_api_base: None,
            stripe_api_base: None,
            openai_api_key: Some("sk-test-vision".to_string()),
            stripe_secret_key: Some("sk_test_stripe".to_string()),
            stripe_webhook_secret: Some("whsec_test_secret".to_string()),
        }
    }
}

/// Read a variable, treating unset and blank the same way.
fn optional_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Comma-separated absolute paths, duplicates dropped.
///
/// A path that another route already serves is an error.
fn parse_paths(raw: &str) -> Result<Vec<String>, ConfigError> {
    let mut paths: Vec<String> = Vec::new();
    for path in raw.split(',').map(str::trim).filter(|p| p.starts_with('/')) {
        if RESERVED_PATHS.contains(&path) {
            return Err(ConfigError::Invalid("WEBHOOK_PATHS", path.to_string()));
        }
        if !paths.iter().any(|p| p == path) {
            paths.push(path.to_string());
        }
    }
    Ok(paths)
}

fn default_webhook_paths() -> Vec<String> {
    DEFAULT_WEBHOOK_PATHS.iter().map(|p| p.to_string()).collect()
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    Invalid(&'static str, String),
}
