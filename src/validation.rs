//! Field validators for the board schema.
//!
//! Every validator is a pure function: it takes a value and returns `Ok(())`
//! or a [`ValidationError`] whose `Display` is the message shown to the
//! caller. The service layer runs them before touching the database.

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use crate::constants::STORY_POINTS_STEP;

/// Hex colour with a leading `#`, three or six digits.
static COLOUR_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^#([A-Fa-f0-9]{6}|[A-Fa-f0-9]{3})$").expect("colour pattern is a valid regex")
});

/// Explicit slugs: ASCII letters, digits, hyphens and underscores.
static SLUG_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[-a-zA-Z0-9_]+$").expect("slug pattern is a valid regex"));

/// Validation errors raised before a write is attempted.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{field} cannot be blank")]
    Blank { field: &'static str },

    #[error("{field} must be at most {max} characters, got {actual}")]
    TooLong {
        field: &'static str,
        max: usize,
        actual: usize,
    },

    #[error("{field} must be zero or greater, got {value}")]
    Negative { field: &'static str, value: i32 },

    #[error("{0} is not divisible by 5")]
    NotDivisibleByFive(i32),

    #[error("{field} must be at most {max}, got {value}")]
    AboveMaximum {
        field: &'static str,
        value: i32,
        max: i32,
    },

    #[error("'{0}' is not a valid colour, expected #RGB or #RRGGBB")]
    InvalidColour(String),

    #[error("'{0}' is not a valid slug, use letters, numbers, underscores or hyphens")]
    InvalidSlug(String),

    #[error("{entity} with {key} already exists")]
    Duplicate { entity: &'static str, key: String },

    #[error("label {label_id} belongs to project {label_project}, but task {task_no} is in project {task_project}")]
    LabelOutOfScope {
        label_id: i32,
        label_project: i32,
        task_no: i32,
        task_project: i32,
    },
}

/// Reject values that are not a multiple of five.
pub fn divisible_by_five(value: i32) -> Result<(), ValidationError> {
    if value % STORY_POINTS_STEP != 0 {
        return Err(ValidationError::NotDivisibleByFive(value));
    }
    Ok(())
}

/// Validate a story point estimate.
///
/// Accepted iff `value >= 0`, `value % 5 == 0` and, when a cap is given,
/// `value <= cap`.
///
/// # Examples
/// ```
/// use taskboard::validation::validate_story_points;
///
/// assert!(validate_story_points(15, Some(100)).is_ok());
/// assert!(validate_story_points(12, Some(100)).is_err());
/// assert!(validate_story_points(105, Some(100)).is_err());
/// assert!(validate_story_points(105, None).is_ok());
/// ```
pub fn validate_story_points(value: i32, cap: Option<i32>) -> Result<(), ValidationError> {
    if value < 0 {
        return Err(ValidationError::Negative {
            field: "story_points",
            value,
        });
    }
    if let Some(max) = cap {
        if value > max {
            return Err(ValidationError::AboveMaximum {
                field: "story_points",
                value,
                max,
            });
        }
    }
    divisible_by_five(value)
}

/// Validate a label colour such as `#A1B2C3` or `#fff`.
pub fn validate_colour(colour: &str) -> Result<(), ValidationError> {
    if COLOUR_PATTERN.is_match(colour) {
        Ok(())
    } else {
        Err(ValidationError::InvalidColour(colour.to_string()))
    }
}

/// Validate a slug supplied by the caller.
///
/// Derived slugs are not checked, the naive derivation may keep punctuation.
pub fn validate_slug(slug: &str) -> Result<(), ValidationError> {
    if SLUG_PATTERN.is_match(slug) {
        Ok(())
    } else {
        Err(ValidationError::InvalidSlug(slug.to_string()))
    }
}

/// Validate a required title: not blank, at most `max` characters.
pub fn validate_title(field: &'static str, value: &str, max: usize) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Blank { field });
    }
    validate_max_len(field, value, max)
}

/// Validate an optional text field that may be blank.
pub fn validate_max_len(field: &'static str, value: &str, max: usize) -> Result<(), ValidationError> {
    let actual = value.chars().count();
    if actual > max {
        return Err(ValidationError::TooLong { field, max, actual });
    }
    Ok(())
}

/// Validate a list position.
pub fn validate_position(value: i32) -> Result<(), ValidationError> {
    if value < 0 {
        return Err(ValidationError::Negative {
            field: "position",
            value,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_story_points_multiples_of_five() {
        for value in [0, 5, 15, 50, 100] {
            assert!(validate_story_points(value, Some(100)).is_ok(), "{value} should pass");
        }
        for value in [1, 12, 99] {
            assert_eq!(
                validate_story_points(value, Some(100)),
                Err(ValidationError::NotDivisibleByFive(value))
            );
        }
    }

    #[test]
    fn test_story_points_cap() {
        assert!(matches!(
            validate_story_points(105, Some(100)),
            Err(ValidationError::AboveMaximum { max: 100, .. })
        ));
        assert!(validate_story_points(105, None).is_ok());
        assert!(validate_story_points(1000, None).is_ok());
    }

    #[test]
    fn test_story_points_negative() {
        assert!(matches!(
            validate_story_points(-5, None),
            Err(ValidationError::Negative { value: -5, .. })
        ));
    }

    #[test]
    fn test_divisible_by_five_message() {
        let err = divisible_by_five(12).unwrap_err();
        assert_eq!(err.to_string(), "12 is not divisible by 5");
    }

    #[test]
    fn test_colour_pattern() {
        for colour in ["#A1B2C3", "#fff", "#000000", "#aBc"] {
            assert!(validate_colour(colour).is_ok(), "{colour} should pass");
        }
        for colour in ["A1B2C3", "#12345", "#GGGGGG", "#ffff", "", "#fff "] {
            assert!(validate_colour(colour).is_err(), "{colour} should fail");
        }
    }

    #[test]
    fn test_slug_pattern() {
        assert!(validate_slug("my-project_2").is_ok());
        assert!(validate_slug("my project").is_err());
        assert!(validate_slug("").is_err());
    }

    #[test]
    fn test_title_rules() {
        assert!(validate_title("title", "Roadmap", 64).is_ok());
        assert_eq!(
            validate_title("title", "   ", 64),
            Err(ValidationError::Blank { field: "title" })
        );

        let long = "x".repeat(65);
        assert_eq!(
            validate_title("title", &long, 64),
            Err(ValidationError::TooLong {
                field: "title",
                max: 64,
                actual: 65
            })
        );

        // Limits count characters, not bytes
        let accented = "é".repeat(32);
        assert!(validate_title("title", &accented, 32).is_ok());
    }

    #[test]
    fn test_max_len_allows_blank() {
        assert!(validate_max_len("description", "", 256).is_ok());
        assert!(validate_max_len("description", &"d".repeat(257), 256).is_err());
    }

    #[test]
    fn test_position() {
        assert!(validate_position(0).is_ok());
        assert!(validate_position(7).is_ok());
        assert!(validate_position(-1).is_err());
    }
}
