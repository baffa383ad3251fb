// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tower::ServiceExt;
use wellness_api::config::Config;
use wellness_api::error::AppError;
use wellness_api::models::{CheckoutSession, CheckoutSessionParams};
use wellness_api::routes::create_router;
use wellness_api::services::signature::{signature_header, SIGNATURE_HEADER};
use wellness_api::services::{PaymentProcessor, StaticContentProvider, VisionModel};
use wellness_api::AppState;

/// Model output used when a test does not care about the content.
#[allow(dead_code)]
pub const RICE_JSON: &str = r#"{"foods":[{"name":"Rice","quantity":"1 cup","calories":200,"protein":4,"carbs":45,"fat":0}],"totalCalories":200,"totalProtein":4,"totalCarbs":45,"totalFat":0,"confidence":0.8}"#;

/// Small valid data URI.
#[allow(dead_code)]
pub const TEST_IMAGE: &str = "data:image/png;base64,iVBORw0KGgo=";

/// What the fake vision model answers.
#[allow(dead_code)]
#[derive(Clone)]
pub enum FakeReply {
    Text(String),
    Empty,
    Fail(String),
}

/// Vision model that records calls instead of hitting the network.
pub struct FakeVision {
    reply: FakeReply,
    calls: AtomicUsize,
    last_image: Mutex<Option<String>>,
}

#[allow(dead_code)]
impl FakeVision {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_image(&self) -> Option<String> {
        self.last_image.lock().unwrap().clone()
    }
}

#[async_trait]
impl VisionModel for FakeVision {
    async fn describe_image(
        &self,
        _instruction: &str,
        image_url: &str,
    ) -> Result<Option<String>, AppError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_image.lock().unwrap() = Some(image_url.to_string());

        match &self.reply {
            FakeReply::Text(text) => Ok(Some(text.clone())),
            FakeReply::Empty => Ok(None),
            FakeReply::Fail(msg) => Err(AppError::UpstreamModel(msg.clone())),
        }
    }
}

/// Payment processor that records requested sessions.
pub struct FakePayments {
    error: Option<String>,
    requests: Mutex<Vec<CheckoutSessionParams>>,
}

#[allow(dead_code)]
impl FakePayments {
    pub fn requests(&self) -> Vec<CheckoutSessionParams> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl PaymentProcessor for FakePayments {
    async fn create_checkout_session(
        &self,
        params: &CheckoutSessionParams,
    ) -> Result<CheckoutSession, AppError> {
        self.requests.lock().unwrap().push(params.clone());

        if let Some(msg) = &self.error {
            return Err(AppError::UpstreamProcessor(msg.clone()));
        }

        Ok(CheckoutSession {
            session_id: "cs_test_fake".to_string(),
        })
    }
}

/// Router wired to fakes, plus handles to inspect them.
pub struct TestApp {
    pub router: Router,
    pub state: Arc<AppState>,
    pub vision: Arc<FakeVision>,
    pub payments: Arc<FakePayments>,
}

/// Builder for `TestApp`.
pub struct TestAppBuilder {
    config: Config,
    reply: FakeReply,
    payment_error: Option<String>,
    vision_configured: bool,
    payments_configured: bool,
    vision_client: Option<Arc<dyn VisionModel>>,
    payments_client: Option<Arc<dyn PaymentProcessor>>,
}

#[allow(dead_code)]
impl TestAppBuilder {
    pub fn reply(mut self, reply: FakeReply) -> Self {
        self.reply = reply;
        self
    }

    pub fn payment_error(mut self, msg: &str) -> Self {
        self.payment_error = Some(msg.to_string());
        self
    }

    pub fn without_vision(mut self) -> Self {
        self.vision_configured = false;
        self.config.openai_api_key = None;
        self
    }

    pub fn without_payments(mut self) -> Self {
        self.payments_configured = false;
        self.config.stripe_secret_key = None;
        self
    }

    /// Serve analysis through `client` instead of the fake.
    pub fn vision_client(mut self, client: Arc<dyn VisionModel>) -> Self {
        self.vision_client = Some(client);
        self
    }

    /// Serve checkout through `client` instead of the fake.
    pub fn payments_client(mut self, client: Arc<dyn PaymentProcessor>) -> Self {
        self.payments_client = Some(client);
        self
    }

    pub fn config(mut self, f: impl FnOnce(&mut Config)) -> Self {
        f(&mut self.config);
        self
    }

    pub fn build(self) -> TestApp {
        let vision = Arc::new(FakeVision {
            reply: self.reply,
            calls: AtomicUsize::new(0),
            last_image: Mutex::new(None),
        });
        let payments = Arc::new(FakePayments {
            error: self.payment_error,
            requests: Mutex::new(Vec::new()),
        });

        let state = Arc::new(AppState {
            config: self.config,
            vision: self.vision_client.or_else(|| {
                self.vision_configured
                    .then(|| vision.clone() as Arc<dyn VisionModel>)
            }),
            payments: self.payments_client.or_else(|| {
                self.payments_configured
                    .then(|| payments.clone() as Arc<dyn PaymentProcessor>)
            }),
            content: Arc::new(StaticContentProvider::default()),
        });

        TestApp {
            router: create_router(state.clone()),
            state,
            vision,
            payments,
        }
    }
}

#[allow(dead_code)]
impl TestApp {
    pub fn builder() -> TestAppBuilder {
        TestAppBuilder {
            config: Config::test_default(),
            reply: FakeReply::Text(RICE_JSON.to_string()),
            payment_error: None,
            vision_configured: true,
            payments_configured: true,
            vision_client: None,
            payments_client: None,
        }
    }

    /// App with every dependency configured and well-behaved fakes.
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Send a request and decode the JSON body (`Null` if empty).
    pub async fn send(&self, request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();

        let json = if body.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&body).unwrap()
        };
        (status, json)
    }
}

/// POST a JSON body.
#[allow(dead_code)]
pub fn post_json(uri: &str, body: &serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// POST a webhook payload signed with `secret` at the current time.
#[allow(dead_code)]
pub fn signed_webhook(uri: &str, payload: &str, secret: &str) -> Request<Body> {
    let now = chrono::Utc::now().timestamp();
    signed_webhook_at(uri, payload, secret, now)
}

/// POST a webhook payload signed at an explicit timestamp.
#[allow(dead_code)]
pub fn signed_webhook_at(uri: &str, payload: &str, secret: &str, timestamp: i64) -> Request<Body> {
    let header = signature_header(payload.as_bytes(), timestamp, secret).unwrap();
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .header(SIGNATURE_HEADER, header)
        .body(Body::from(payload.to_string()))
        .unwrap()
}
