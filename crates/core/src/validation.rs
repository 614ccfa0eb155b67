//! Input validation shared by the cellar and bottle endpoints.

use crate::error::CoreError;
use crate::types::Year;

/// Longest accepted bottle or cellar name.
pub const MAX_NAME_LENGTH: usize = 120;
/// Oldest vintage accepted on input.
pub const MIN_VINTAGE: Year = 1800;
/// Latest vintage accepted on input.
pub const MAX_VINTAGE: Year = 2200;
/// Largest page or report size a caller may request.
pub const MAX_LIST_LIMIT: i64 = 500;

/// Reject blank or overly long names. Returns the trimmed name.
pub fn validate_name<'a>(name: &'a str, entity: &str) -> Result<&'a str, CoreError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(format!("{entity} name must not be empty")));
    }
    if trimmed.chars().count() > MAX_NAME_LENGTH {
        return Err(CoreError::Validation(format!(
            "{entity} name must be at most {MAX_NAME_LENGTH} characters"
        )));
    }
    Ok(trimmed)
}

pub fn validate_vintage(vintage: Option<Year>) -> Result<(), CoreError> {
    match vintage {
        Some(v) if !(MIN_VINTAGE..=MAX_VINTAGE).contains(&v) => Err(CoreError::Validation(
            format!("Vintage must be between {MIN_VINTAGE} and {MAX_VINTAGE}, got {v}"),
        )),
        _ => Ok(()),
    }
}

/// A floor level is 1-based and only meaningful inside a cellar.
pub fn validate_floor_placement(
    cellar_id: Option<i64>,
    floor_level: Option<i32>,
) -> Result<(), CoreError> {
    match (cellar_id, floor_level) {
        (None, Some(_)) => Err(CoreError::Validation(
            "floor_level requires a cellar_id".to_string(),
        )),
        (_, Some(level)) if level < 1 => Err(CoreError::Validation(format!(
            "floor_level must be >= 1, got {level}"
        ))),
        _ => Ok(()),
    }
}

/// Validate an optional `limit` query value, falling back to `default`.
pub fn validate_limit(limit: Option<i64>, default: i64) -> Result<i64, CoreError> {
    match limit {
        None => Ok(default),
        Some(l) if (1..=MAX_LIST_LIMIT).contains(&l) => Ok(l),
        Some(l) => Err(CoreError::Validation(format!(
            "limit must be between 1 and {MAX_LIST_LIMIT}, got {l}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn name_is_trimmed() {
        assert_eq!(validate_name("  Margaux ", "Bottle").unwrap(), "Margaux");
    }

    #[test]
    fn blank_name_rejected() {
        assert_matches!(validate_name("   ", "Cellar"), Err(CoreError::Validation(_)));
    }

    #[test]
    fn long_name_rejected() {
        let name = "é".repeat(MAX_NAME_LENGTH + 1);
        assert_matches!(validate_name(&name, "Bottle"), Err(CoreError::Validation(_)));
        assert!(validate_name(&"é".repeat(MAX_NAME_LENGTH), "Bottle").is_ok());
    }

    #[test]
    fn vintage_bounds() {
        assert!(validate_vintage(None).is_ok());
        assert!(validate_vintage(Some(MIN_VINTAGE)).is_ok());
        assert!(validate_vintage(Some(MAX_VINTAGE)).is_ok());
        assert_matches!(validate_vintage(Some(1799)), Err(CoreError::Validation(_)));
        assert_matches!(validate_vintage(Some(2201)), Err(CoreError::Validation(_)));
    }

    #[test]
    fn floor_without_cellar_rejected() {
        assert_matches!(
            validate_floor_placement(None, Some(1)),
            Err(CoreError::Validation(_))
        );
        assert_matches!(
            validate_floor_placement(Some(3), Some(0)),
            Err(CoreError::Validation(_))
        );
        assert!(validate_floor_placement(Some(3), Some(2)).is_ok());
        assert!(validate_floor_placement(Some(3), None).is_ok());
        assert!(validate_floor_placement(None, None).is_ok());
    }

    #[test]
    fn limit_defaults_and_bounds() {
        assert_eq!(validate_limit(None, 25).unwrap(), 25);
        assert_eq!(validate_limit(Some(MAX_LIST_LIMIT), 25).unwrap(), MAX_LIST_LIMIT);
        assert_matches!(validate_limit(Some(0), 25), Err(CoreError::Validation(_)));
        assert_matches!(
            validate_limit(Some(MAX_LIST_LIMIT + 1), 25),
            Err(CoreError::Validation(_))
        );
    }
}
