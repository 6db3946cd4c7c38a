//! Shared helpers for provider implementations

/// Minimum key length to display partial key
const MIN_KEY_LENGTH_FOR_PARTIAL_DISPLAY: usize = 8;

/// Number of characters to show at start/end of masked key
const KEY_MASK_VISIBLE_CHARS: usize = 4;

/// Mask API key for safe display in logs
///
/// Shows first 4 and last 4 characters for keys longer than 8 characters,
/// otherwise shows "****" to prevent exposure of short keys.
#[must_use]
pub fn mask_api_key(key: &str) -> String {
    if key.len() <= MIN_KEY_LENGTH_FOR_PARTIAL_DISPLAY {
        return "****".to_string();
    }
    format!(
        "{}...{}",
        &key[..KEY_MASK_VISIBLE_CHARS],
        &key[key.len() - KEY_MASK_VISIBLE_CHARS..]
    )
}

/// Sanitize an API error message before it reaches logs or callers.
///
/// Raw provider error bodies can echo request URLs or credentials; collapse
/// well-known categories to generic text and pass through anything else with
/// sensitive fragments removed.
#[must_use]
pub fn sanitize_api_error(message: &str) -> String {
    let lower = message.to_lowercase();
    if lower.contains("api key") || lower.contains("permission") || lower.contains("unauthenticated")
    {
        return "authentication failed".to_string();
    }
    if lower.contains("resource_exhausted") || lower.contains("quota") {
        return "rate limit exceeded".to_string();
    }
    if lower.contains("key=") {
        return "API request failed".to_string();
    }
    message.to_string()
}
