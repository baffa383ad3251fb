// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Food-photo analysis: prompt the vision model and parse its estimate.

use crate::error::{AppError, Result};
use crate::models::FoodAnalysisResult;
use crate::services::vision::VisionModel;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use serde_json::Value;

/// Instruction sent with every photo.
pub const ANALYSIS_INSTRUCTION: &str = r#"Analyze this meal photo and identify every visible food. For each food, estimate:
- Food name
- Approximate quantity (in grams or portions)
- Calories
- Protein (g)
- Carbohydrates (g)
- Fat (g)

Return ONLY valid JSON in the following format (no markdown, no explanations):
{
  "foods": [
    {
      "name": "Food name",
      "quantity": "estimated quantity",
      "calories": number,
      "protein": number,
      "carbs": number,
      "fat": number
    }
  ],
  "totalCalories": number,
  "totalProtein": number,
  "totalCarbs": number,
  "totalFat": number,
  "confidence": number between 0 and 1
}"#;

/// Check that `image` is something the vision model can fetch or decode.
pub fn validate_image(image: &str) -> Result<()> {
    if image.starts_with("https://") || image.starts_with("http://") {
        return Ok(());
    }

    let Some(rest) = image.strip_prefix("data:image/") else {
        return Err(AppError::Validation(
            "image must be a data URI or an http(s) URL".to_string(),
        ));
    };

    let Some((_, payload)) = rest.split_once(";base64,") else {
        return Err(AppError::Validation(
            "image data URI must be base64 encoded".to_string(),
        ));
    };

    if payload.is_empty() || BASE64.decode(payload).is_err() {
        return Err(AppError::Validation(
            "image data URI payload is not valid base64".to_string(),
        ));
    }

    Ok(())
}

/// Remove a Markdown code fence around the model output, if present.
///
/// Accepts ```` ```json ```` or a bare ```` ``` ```` opener, on its own line
/// or directly followed by the payload.
pub fn strip_code_fences(text: &str) -> &str {
    let mut body = text.trim();

    if let Some(rest) = body.strip_prefix("```") {
        let rest = rest.trim_start_matches([' ', '\t']);
        let tag_len = rest
            .find(|c: char| !c.is_ascii_alphanumeric())
            .unwrap_or(rest.len());
        body = &rest[tag_len..];
    }

    let trimmed = body.trim_end();
    body = trimmed.strip_suffix("```").unwrap_or(trimmed);

    body.trim()
}

/// Parse model output as JSON.
///
/// Only the syntax is checked; the object is passed on as the model wrote it.
pub fn parse_analysis(text: &str) -> Result<Value> {
    let cleaned = strip_code_fences(text);
    serde_json::from_str(cleaned).map_err(|e| AppError::MalformedUpstreamResponse(e.to_string()))
}

/// Run a full analysis of one image.
pub async fn analyze_image(model: &dyn VisionModel, image: &str) -> Result<Value> {
    let content = model
        .describe_image(ANALYSIS_INSTRUCTION, image)
        .await?
        .filter(|text| !text.trim().is_empty())
        .ok_or(AppError::UpstreamEmptyResponse)?;

    let reply = parse_analysis(&content).inspect_err(|_| {
        tracing::warn!(
            content_len = content.len(),
            "Vision model output is not valid JSON"
        );
    })?;

    match FoodAnalysisResult::from_reply(&reply) {
        Some(result) => {
            let inconsistent = result.inconsistent_totals();
            if !inconsistent.is_empty() {
                tracing::warn!(
                    fields = ?inconsistent,
                    "Reported totals do not match per-food sums"
                );
            }
            tracing::info!(
                foods = result.foods.len(),
                total_calories = result.total_calories,
                confidence = result.confidence,
                "Food analysis complete"
            );
        }
        None => tracing::warn!("Vision model reply is not a JSON object, returning it as is"),
    }

    Ok(reply)
}
