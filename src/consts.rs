//! Project-wide constants.

use std::time::Duration;

/// Default Gemini model when none is specified.
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-preview-09-2025";

/// Default base URL of the text-generation endpoint.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Environment variable consulted when `--api-key` is not given.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Total attempts per call, the first one included.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 5;

/// Sleep before the second attempt. Doubles after every failure.
pub const DEFAULT_INITIAL_DELAY: Duration = Duration::from_millis(1000);

/// What the user sees once every attempt has failed.
pub const FAILURE_MESSAGE: &str = "Failed to connect to AI consultant.";

/// Format revenue in USD millions (e.g. 2,470 or 822.5).
pub fn format_revenue(millions: f64) -> String {
    let tenths = (millions * 10.0).round() as u64;
    let (whole, frac) = (tenths / 10, tenths % 10);
    let grouped = format_number(whole);
    if frac == 0 {
        format!("${grouped}M")
    } else {
        format!("${grouped}.{frac}M")
    }
}

/// Format a number with comma separators (e.g. 1,234,567).
pub fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::with_capacity(s.len() + s.len() / 3);
    for (i, c) in s.chars().enumerate() {
        if i > 0 && (s.len() - i).is_multiple_of(3) {
            result.push(',');
        }
        result.push(c);
    }
    result
}
