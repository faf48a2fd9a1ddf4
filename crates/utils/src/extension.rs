/// Case-insensitive suffix match. Extensions are given with their leading dot
/// and may span several dots (`.tar.gz`).
pub fn has_extension(file_name: &str, extension: &str) -> bool {
    let name = file_name.as_bytes();
    let ext = extension.as_bytes();
    name.len() >= ext.len() && name[name.len() - ext.len()..].eq_ignore_ascii_case(ext)
}

pub fn has_any_extension<S: AsRef<str>>(file_name: &str, extensions: &[S]) -> bool {
    extensions
        .iter()
        .any(|ext| has_extension(file_name, ext.as_ref()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_extension() {
        assert!(has_extension("App.msi", ".msi"));
        assert!(has_extension("APP.MSI", ".msi"));
        assert!(has_extension("app-1.0.TAR.GZ", ".tar.gz"));
        assert!(!has_extension("App.zip.sig", ".zip"));
        assert!(!has_extension("msi", ".msi"));
    }

    #[test]
    fn test_has_any_extension() {
        let extensions = [".deb", ".rpm"];
        assert!(has_any_extension("pkg_1.0_amd64.deb", &extensions));
        assert!(!has_any_extension("notes.txt", &extensions));
    }
}
