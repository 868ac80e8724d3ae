//! Environment/runtime helpers
//!
//! Sanity checks to ensure expected directories exist at startup.

use std::path::Path;

use tracing::info;

/// Ensure the asset root and each category subdirectory exist.
///
/// Every subdirectory is a flat namespace; nothing below it is created.
pub async fn ensure_asset_layout(root: &Path, subdirs: &[&str]) -> anyhow::Result<()> {
    tokio::fs::create_dir_all(root)
        .await
        .map_err(|e| anyhow::anyhow!("cannot create {}: {e}", root.display()))?;
    for sub in subdirs {
        let dir = root.join(sub);
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| anyhow::anyhow!("cannot create {}: {e}", dir.display()))?;
    }
    info!(root = %root.display(), "asset directories ready");
    Ok(())
}
