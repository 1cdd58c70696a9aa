//! Extraction of a calorie count from a model reply.
//!
//! A bare integer is the expected reply. Anything else is accepted only when
//! it contains exactly one number; replies with several different numbers
//! are rejected instead of guessing. Negative numbers are rejected rather
//! than read without their sign.

use regex::Regex;
use std::collections::BTreeSet;
use std::sync::OnceLock;

use super::error::EstimationError;

const NUMBER: &str = r"-?(?:\d{1,3}(?:,\d{3})+|\d+)";

fn bare_reply() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(&format!(
            r"(?i)^({NUMBER})(?:\s*(?:kcal|calories|cal))?\.?$"
        ))
        .expect("static regex")
    })
}

fn any_number() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(NUMBER).expect("static regex"))
}

/// Parse the calorie count out of a model reply.
pub fn parse_calorie_reply(text: &str) -> Result<u32, EstimationError> {
    let trimmed = text.trim();

    if let Some(caps) = bare_reply().captures(trimmed) {
        return to_calories(&caps[1]);
    }

    let numbers: BTreeSet<&str> = any_number()
        .find_iter(trimmed)
        .map(|m| m.as_str())
        .collect();

    match numbers.len() {
        0 => Err(EstimationError::NoNumber(trimmed.to_string())),
        1 => {
            let only = numbers.into_iter().next().unwrap_or_default();
            tracing::debug!(reply = trimmed, "accepted single number from prose reply");
            to_calories(only)
        }
        _ => Err(EstimationError::Ambiguous(trimmed.to_string())),
    }
}

fn to_calories(digits: &str) -> Result<u32, EstimationError> {
    if digits.starts_with('-') {
        return Err(EstimationError::OutOfRange(digits.to_string()));
    }
    let cleaned: String = digits.chars().filter(|c| *c != ',').collect();
    cleaned
        .parse::<u32>()
        .map_err(|_| EstimationError::OutOfRange(digits.to_string()))
}
