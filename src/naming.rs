//! Output filename derivation.

use std::path::{Path, PathBuf};

/// Suffix appended to the input file stem when no other is configured.
pub const DEFAULT_SUFFIX: &str = "_encoded";

/// Turn `dir/photo.png` into `dir/photo<suffix>.png`.
pub fn make_output_filename<P: AsRef<Path>>(path: P, suffix: &str) -> PathBuf {
    let path = path.as_ref();
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    let file_name = match path.extension() {
        Some(ext) => format!("{}{}.{}", stem, suffix, ext.to_string_lossy()),
        None => format!("{}{}", stem, suffix),
    };
    path.with_file_name(file_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_make_output_filename() {
        assert_eq!(
            make_output_filename("photo.png", DEFAULT_SUFFIX),
            PathBuf::from("photo_encoded.png")
        );
        assert_eq!(
            make_output_filename("images/cat.PNG", "_secret"),
            PathBuf::from("images/cat_secret.PNG")
        );
        assert_eq!(
            make_output_filename("noext", DEFAULT_SUFFIX),
            PathBuf::from("noext_encoded")
        );
    }
}
