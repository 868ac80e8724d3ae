//! Reference-to-URL resolution with a deterministic fallback chain.
//!
//! Read-only: the only filesystem access is an existence check, so repeated
//! calls with unchanged disk state always return the same URL.

use std::path::PathBuf;

use super::AssetCategory;

#[derive(Clone)]
pub struct UrlResolver {
    root: PathBuf,
    public_base: String,
}

impl UrlResolver {
    pub fn new(root: impl Into<PathBuf>, public_base: impl Into<String>) -> Self {
        Self { root: root.into(), public_base: public_base.into() }
    }

    /// Fallback chain, in order: no reference -> placeholder; absolute
    /// external URL -> passed through; local filename -> local-service URL
    /// only if the file exists, placeholder otherwise. A resolved local URL
    /// is therefore always currently servable.
    pub async fn resolve(&self, reference: Option<&str>, category: AssetCategory) -> String {
        let Some(name) = reference.map(str::trim).filter(|r| !r.is_empty()) else {
            return category.placeholder_url().to_string();
        };
        if name.starts_with("http://") || name.starts_with("https://") {
            return name.to_string();
        }
        // References are flat filenames; anything path-like never resolves.
        if name.contains('/') || name.contains('\\') || name.contains("..") {
            return category.placeholder_url().to_string();
        }
        let local = self.root.join(category.dir_name()).join(name);
        let servable = tokio::fs::metadata(&local).await.map(|m| m.is_file()).unwrap_or(false);
        if servable {
            format!("{}/static/{}/{}", self.public_base, category.dir_name(), name)
        } else {
            category.placeholder_url().to_string()
        }
    }
}
