//! Best-effort extraction of a [`Recipe`] from raw generated text
//!
//! Models frequently wrap the requested JSON in commentary, markdown fences or
//! a leading reasoning block. Extraction scans for the earliest `{` whose
//! balanced closing `}` yields a decodable JSON object, skipping braces that
//! appear inside string literals. The decoded object must then carry the three
//! recipe fields with the expected types.
//!
//! Failure modes:
//! - [`ParseError::NoJsonFound`]: no balanced, decodable object exists
//! - [`ParseError::InvalidShape`]: an object exists but is not a recipe

use serde::Deserialize;
use serde_json::Value;

use super::entity::{Recipe, MAX_SUGGESTIONS};
use crate::domain::error::ParseError;

const REASONING_START_TAG: &str = "<think>";
const REASONING_END_TAG: &str = "</think>";

/// Wire shape requested from the model
#[derive(Debug, Deserialize)]
struct GeneratedRecipe {
    cuisine_name: String,
    steps: Vec<String>,
    suggested_ingredients: Vec<String>,
}

/// Parse raw generated text into a validated recipe
pub fn parse_recipe(raw: &str) -> Result<Recipe, ParseError> {
    let json = extract_json_object(strip_reasoning(raw))
        .ok_or_else(|| ParseError::no_json_found(raw))?;

    let generated: GeneratedRecipe = serde_json::from_str(json)
        .map_err(|e| ParseError::invalid_shape(e.to_string(), raw))?;

    validate(generated).map_err(|reason| ParseError::invalid_shape(reason, raw))
}

/// Locate the first balanced `{...}` in `text` that decodes as a JSON object
pub fn extract_json_object(text: &str) -> Option<&str> {
    let mut search_from = 0;

    while let Some(offset) = text[search_from..].find('{') {
        let start = search_from + offset;

        if let Some(end) = matching_brace(&text[start..]) {
            let candidate = &text[start..=start + end];

            if matches!(serde_json::from_str::<Value>(candidate), Ok(Value::Object(_))) {
                return Some(candidate);
            }
        }

        search_from = start + 1;
    }

    None
}

/// Drop a leading `<think>...</think>` block emitted by reasoning models
///
/// Only a block opening the text is removed, up to its first closing tag.
/// Tags anywhere else are ordinary text.
fn strip_reasoning(raw: &str) -> &str {
    let Some(body) = raw.trim_start().strip_prefix(REASONING_START_TAG) else {
        return raw;
    };

    match body.find(REASONING_END_TAG) {
        Some(idx) => &body[idx + REASONING_END_TAG.len()..],
        None => raw,
    }
}

/// Byte offset of the `}` closing the `{` at the start of `text`
fn matching_brace(text: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (idx, ch) in text.char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }

            continue;
        }

        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;

                if depth == 0 {
                    return Some(idx);
                }
            }
            _ => {}
        }
    }

    None
}

fn validate(generated: GeneratedRecipe) -> Result<Recipe, String> {
    let cuisine_name = generated.cuisine_name.trim();

    if cuisine_name.is_empty() {
        return Err("cuisine_name must not be empty".to_string());
    }

    if generated.steps.is_empty() {
        return Err("steps must contain at least one step".to_string());
    }

    let mut steps = Vec::with_capacity(generated.steps.len());

    for (idx, step) in generated.steps.iter().enumerate() {
        let step = step.trim();

        if step.is_empty() {
            return Err(format!("step {} is empty", idx + 1));
        }

        steps.push(step.to_string());
    }

    let suggestions = generated
        .suggested_ingredients
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .take(MAX_SUGGESTIONS)
        .map(str::to_string)
        .collect();

    Ok(Recipe::new(cuisine_name, steps).with_suggestions(suggestions))
}
