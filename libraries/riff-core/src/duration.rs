//! Duration tokens and display formatting
//!
//! Remote results describe length with an ISO-8601-like token (`PT#H#M#S`,
//! every component optional). The time part is found anywhere in the token,
//! so day components before it are ignored. Anything without `PT` is treated
//! as zero rather than an error.

use once_cell::sync::Lazy;
use regex::Regex;

static DURATION_TOKEN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"PT(?:(\d+)H)?(?:(\d+)M)?(?:(\d+)S)?").expect("static duration pattern")
});

/// Convert a `PT#H#M#S` token to total seconds.
///
/// ```rust
/// use riff_core::parse_duration;
///
/// assert_eq!(parse_duration("PT4M13S"), 253);
/// assert_eq!(parse_duration("PT1H"), 3600);
/// assert_eq!(parse_duration("PT"), 0);
/// assert_eq!(parse_duration("P1DT2H"), 7200);
/// ```
pub fn parse_duration(token: &str) -> u32 {
    let Some(caps) = DURATION_TOKEN.captures(token.trim()) else {
        return 0;
    };

    // Components are all digits, so a parse failure can only be overflow
    let component = |i: usize| -> u64 {
        caps.get(i)
            .map_or(0, |m| m.as_str().parse::<u64>().unwrap_or(u64::MAX))
    };

    let total = component(1)
        .saturating_mul(3600)
        .saturating_add(component(2).saturating_mul(60))
        .saturating_add(component(3));

    u32::try_from(total).unwrap_or(u32::MAX)
}

/// Format seconds as `M:SS` (minutes are not wrapped into hours).
pub fn format_duration(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.floor() as u64
    } else {
        0
    };
    format!("{}:{:02}", total / 60, total % 60)
}
