use thiserror::Error;

#[derive(Debug, Error)]
pub enum NameError {
    #[error("project name cannot be empty")]
    Empty,
    #[error("project name needs at least one letter or digit")]
    OnlySeparators,
    #[error("project name contains invalid character '{character}' (letters, numbers, - and _ only)")]
    InvalidCharacter { character: char },
}

/// A project name must be non-empty and, with `-` and `_` stripped,
/// alphanumeric only.
pub fn validate_project_name(name: &str) -> Result<(), NameError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(NameError::Empty);
    }

    let mut has_alphanumeric = false;
    for character in trimmed.chars() {
        if character == '-' || character == '_' {
            continue;
        }
        if character.is_alphanumeric() {
            has_alphanumeric = true;
            continue;
        }
        return Err(NameError::InvalidCharacter { character });
    }

    if !has_alphanumeric {
        return Err(NameError::OnlySeparators);
    }

    Ok(())
}
