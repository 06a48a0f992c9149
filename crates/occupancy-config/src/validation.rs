//! Custom validation functions for configuration fields

use occupancy_common::{DateRange, LOG_LEVELS};
use validator::ValidationError;

/// Validate that a date range does not end before it starts
pub fn validate_date_range(range: &DateRange) -> Result<(), ValidationError> {
    if range.end < range.start {
        return Err(ValidationError::new("inverted_date_range"));
    }
    Ok(())
}

/// Validate a log level name
pub fn validate_log_level(level: &str) -> Result<(), ValidationError> {
    if LOG_LEVELS.contains(&level) {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_log_level"))
    }
}

/// Validate file path (basic check for valid path characters)
pub fn validate_file_path(path: &str) -> Result<(), ValidationError> {
    if path.is_empty() {
        return Err(ValidationError::new("empty_file_path"));
    }

    // Colon stays allowed for Windows drive letters
    let invalid_chars = ['<', '>', '"', '|', '?', '*'];
    if path.chars().any(|c| invalid_chars.contains(&c)) {
        return Err(ValidationError::new("invalid_file_path_characters"));
    }

    Ok(())
}
