//! Load `.tera` override files from a template directory.

use std::path::{Path, PathBuf};

use tera::Tera;

/// Load every `.tera` file in `template_dir`, registered by file name.
///
/// A missing directory is an error rather than an empty set, so a mistyped
/// `template-dir` does not silently fall back to the built-in templates.
pub(crate) fn load_templates_from_dir(template_dir: &Path) -> Result<Tera, LoaderError> {
    if !template_dir.is_dir() {
        return Err(LoaderError::NotADirectory(template_dir.to_path_buf()));
    }

    let glob_pattern = template_dir.join("*.tera").to_string_lossy().to_string();
    Tera::new(&glob_pattern).map_err(|e| LoaderError::Tera {
        dir: template_dir.to_path_buf(),
        source: e,
    })
}

#[derive(Debug, thiserror::Error)]
pub enum LoaderError {
    #[error("template directory {} does not exist", .0.display())]
    NotADirectory(PathBuf),
    #[error("failed to load templates from {}: {source}", dir.display())]
    Tera { dir: PathBuf, source: tera::Error },
}
