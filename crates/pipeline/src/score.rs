//! Turning the provider's rating string into a rankable number.

use omdb_client::UNAVAILABLE_SCORE;

use crate::error::Rejection;

/// Parse a rating like `"7.4"`.
///
/// The unavailable marker and anything that is not a finite number are
/// rejections, never a default value.
pub fn parse_score(id: &str, raw: &str) -> Result<f64, Rejection> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == UNAVAILABLE_SCORE {
        return Err(Rejection::UnavailableScore(id.to_string()));
    }
    match trimmed.parse::<f64>() {
        Ok(score) if score.is_finite() => Ok(score),
        _ => Err(Rejection::MalformedScore {
            id: id.to_string(),
            raw: raw.to_string(),
        }),
    }
}
