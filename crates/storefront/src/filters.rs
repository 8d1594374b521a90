//! Custom Askama template filters.
//!
//! Templates that use these must have `crate::filters` in scope as `filters`.

#![allow(clippy::unnecessary_wraps)]

use std::fmt::Display;

/// Returns the current year, for the footer.
///
/// Usage in templates: `{{ ""|current_year }}`
#[askama::filter_fn]
pub fn current_year(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<i32> {
    use chrono::Datelike;
    Ok(chrono::Utc::now().year())
}

/// Returns the content hash for main.css.
///
/// Usage in templates: `{{ ""|css_hash }}`
#[askama::filter_fn]
pub fn css_hash(_value: impl Display, _env: &dyn askama::Values) -> askama::Result<&'static str> {
    Ok(env!("CSS_HASH"))
}

/// Render a 0-5 rating as filled and empty stars.
///
/// Usage in templates: `{{ product.rating|stars }}`
#[askama::filter_fn]
pub fn stars(rating: impl Display, _env: &dyn askama::Values) -> askama::Result<String> {
    Ok(star_string(&rating.to_string()))
}

fn star_string(rating: &str) -> String {
    let value = rating.trim().parse::<f32>().unwrap_or(0.0).clamp(0.0, 5.0);
    // Clamped to 0..=5 above, so the cast cannot truncate meaningfully
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let filled = value.round() as usize;
    format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_star_string() {
        assert_eq!(star_string("4.6"), "★★★★★");
        assert_eq!(star_string("3.2"), "★★★☆☆");
        assert_eq!(star_string("oops"), "☆☆☆☆☆");
        assert_eq!(star_string("9"), "★★★★★");
    }
}
