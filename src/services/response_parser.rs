use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;

use crate::errors::{AppError, AppResult};

/// First substring shaped like a JSON array of objects. The model usually
/// wraps its JSON in prose or a markdown fence, so plain `from_str` on the
/// whole response is hopeless.
static JSON_ARRAY_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\[\s*\{[\s\S]*?\}\s*\]").expect("JSON_ARRAY_REGEX is a valid regex pattern")
});

/// Individual `{...}` blocks for the lenient fallback pass.
static JSON_OBJECT_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{[\s\S]*?\}").expect("JSON_OBJECT_REGEX is a valid regex pattern"));

const DEFAULT_EXPLANATION: &str = "No explanation provided";

/// A question extracted from model output, validated at the parse boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedQuestion {
    pub content: String,
    pub options: Option<Vec<String>>,
    pub correct_answer: String,
    pub explanation: String,
}

/// Raw shape as the model emits it; every field optional so the fallback can
/// salvage partially formed objects.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawQuestion {
    content: Option<String>,
    options: Option<Vec<String>>,
    correct_answer: Option<String>,
    explanation: Option<String>,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

/// Extracts questions from unstructured model text.
///
/// Primary strategy: parse the first array-of-objects substring strictly,
/// requiring content, correctAnswer and explanation on every element. Any
/// JSON or validation failure falls through to the fallback, which parses
/// each `{...}` block independently and keeps whatever has at least content
/// and correctAnswer, defaulting the explanation. Order of appearance is
/// preserved. No valid record from either strategy is a `ParseError`.
pub fn parse_questions(text: &str) -> AppResult<Vec<ParsedQuestion>> {
    match parse_array(text) {
        Ok(questions) => Ok(questions),
        Err(primary_err) => {
            log::warn!(
                "Primary question parse failed ({}), trying per-object fallback",
                primary_err
            );

            let fallback = extract_individual_objects(text);
            if fallback.is_empty() {
                Err(AppError::ParseError(
                    "no valid question objects found in model response".to_string(),
                ))
            } else {
                Ok(fallback)
            }
        }
    }
}

fn parse_array(text: &str) -> Result<Vec<ParsedQuestion>, String> {
    let array_match = JSON_ARRAY_REGEX
        .find(text)
        .ok_or_else(|| "no JSON array found".to_string())?;

    let raw: Vec<RawQuestion> =
        serde_json::from_str(array_match.as_str()).map_err(|e| e.to_string())?;

    raw.into_iter()
        .map(|q| {
            let content =
                non_empty(q.content).ok_or_else(|| "question is missing content".to_string())?;
            let correct_answer = non_empty(q.correct_answer)
                .ok_or_else(|| "question is missing correctAnswer".to_string())?;
            let explanation = non_empty(q.explanation)
                .ok_or_else(|| "question is missing explanation".to_string())?;

            Ok(ParsedQuestion {
                content,
                options: q.options,
                correct_answer,
                explanation,
            })
        })
        .collect()
}

fn extract_individual_objects(text: &str) -> Vec<ParsedQuestion> {
    JSON_OBJECT_REGEX
        .find_iter(text)
        .filter_map(|m| serde_json::from_str::<RawQuestion>(m.as_str()).ok())
        .filter_map(|q| {
            let content = non_empty(q.content)?;
            let correct_answer = non_empty(q.correct_answer)?;

            Some(ParsedQuestion {
                content,
                options: q.options,
                correct_answer,
                explanation: non_empty(q.explanation)
                    .unwrap_or_else(|| DEFAULT_EXPLANATION.to_string()),
            })
        })
        .collect()
}
