//! Input checks applied before any storage call.

use crate::error::CoreError;

/// Reject empty or whitespace-only values for a required text field.
pub fn require_text(field: &str, value: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!("{field} must not be empty")));
    }
    Ok(())
}

/// Accept a client-supplied file name only if it names a single entry
/// directly inside the upload directory.
pub fn plain_file_name(name: &str) -> Result<&str, CoreError> {
    let trimmed = name.trim();
    let invalid = trimmed.is_empty()
        || trimmed == "."
        || trimmed == ".."
        || trimmed.contains(['/', '\\', '\0']);
    if invalid {
        return Err(CoreError::Validation(format!("Invalid file name: {name:?}")));
    }
    Ok(trimmed)
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn blank_required_text_is_rejected() {
        assert_matches!(require_text("name", "   "), Err(CoreError::Validation(msg)) if msg == "name must not be empty");
        assert!(require_text("name", "Kobe").is_ok());
    }

    #[test]
    fn file_names_must_stay_in_one_directory() {
        assert_eq!(plain_file_name("manifest.pdf").unwrap(), "manifest.pdf");
        assert_eq!(plain_file_name(" june.pdf ").unwrap(), "june.pdf");

        for bad in ["", "  ", ".", "..", "../etc/passwd", "a/b.pdf", "a\\b.pdf", "nul\0.pdf"] {
            assert_matches!(plain_file_name(bad), Err(CoreError::Validation(_)), "{bad:?}");
        }
    }
}
