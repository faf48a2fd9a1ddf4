use crate::errors::ApiError;

/// Validates a single decoded path segment to prevent path traversal attacks
pub fn validate_path_component(component: &str) -> Result<(), ApiError> {
    if component == ".." {
        return Err(ApiError::InvalidPath(
            "Path contains '..' (path traversal attempt)".to_string()
        ));
    }

    if component.contains('\0') {
        return Err(ApiError::InvalidPath(
            "Path contains null byte".to_string()
        ));
    }

    if component.contains('\\') {
        return Err(ApiError::InvalidPath(
            "Backslashes are not allowed".to_string()
        ));
    }

    // Windows drive letters (C:, D:, etc.)
    if component.len() >= 2 && component.chars().nth(1) == Some(':') {
        return Err(ApiError::InvalidPath(
            "Drive letters are not allowed".to_string()
        ));
    }

    Ok(())
}

/// Dotfiles and dot-directories are never served.
pub fn is_hidden_component(component: &str) -> bool {
    component.starts_with('.') && component != "."
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_traversal() {
        assert!(validate_path_component("..").is_err());
        assert!(validate_path_component("a\\b").is_err());
        assert!(validate_path_component("C:").is_err());
        assert!(validate_path_component("bad\0name").is_err());
    }

    #[test]
    fn test_accepts_regular_names() {
        assert!(validate_path_component("1.1.0").is_ok());
        assert!(validate_path_component("App Setup.msi").is_ok());
        assert!(validate_path_component("v1..2").is_ok());
    }

    #[test]
    fn test_hidden() {
        assert!(is_hidden_component(".env"));
        assert!(is_hidden_component(".git"));
        assert!(!is_hidden_component("app.exe"));
    }
}
