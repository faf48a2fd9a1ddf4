use crate::UtilsError;
use std::path::{Component, Path};

pub fn normalize_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Converts `path` into a URL path relative to `root`: forward slashes and a
/// single leading slash, e.g. `/1.1.0/App.msi`.
pub fn to_url_path(root: &Path, path: &Path) -> Result<String, UtilsError> {
    let relative = path.strip_prefix(root).map_err(|_| UtilsError::OutsideRoot {
        path: normalize_path(path),
        root: normalize_path(root),
    })?;

    let mut url_path = String::new();
    for component in relative.components() {
        match component {
            Component::Normal(name) => {
                let name = name.to_str().ok_or_else(|| {
                    UtilsError::PathConversionError(normalize_path(relative))
                })?;
                url_path.push('/');
                url_path.push_str(name);
            }
            Component::CurDir => {}
            _ => return Err(UtilsError::PathConversionError(normalize_path(relative))),
        }
    }

    if url_path.is_empty() {
        url_path.push('/');
    }
    Ok(url_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_to_url_path() {
        let root = PathBuf::from("/srv/files");

        assert_eq!(
            to_url_path(&root, &root.join("1.1.0").join("App.msi")).unwrap(),
            "/1.1.0/App.msi"
        );
        assert_eq!(to_url_path(&root, &root).unwrap(), "/");
        assert!(to_url_path(&root, Path::new("/elsewhere/App.msi")).is_err());
    }
}
