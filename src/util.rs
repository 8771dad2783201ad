use std::path::Path;

/// Render `path` relative to `base` when it lives underneath it.
pub fn display_path(path: &Path, base: Option<&Path>) -> String {
    if let Some(base) = base {
        if let Ok(relative) = path.strip_prefix(base) {
            return relative.display().to_string();
        }
    }
    path.display().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_path_strips_base() {
        let base = Path::new("/srv/dist");
        assert_eq!(
            display_path(Path::new("/srv/dist/site/data/siteroot.json"), Some(base)),
            "site/data/siteroot.json"
        );
        assert_eq!(
            display_path(Path::new("/tmp/data.json"), Some(base)),
            "/tmp/data.json"
        );
        assert_eq!(display_path(Path::new("/tmp/data.json"), None), "/tmp/data.json");
    }
}
