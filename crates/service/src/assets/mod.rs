//! Asset pipeline: validate and normalize uploaded images, persist them under
//! collision-resistant names, and resolve stored references into servable
//! URLs.

pub mod normalize;
pub mod resolve;

use std::path::{Path, PathBuf};

use tracing::{debug, info};
use uuid::Uuid;

use crate::errors::ServiceError;

pub use resolve::UrlResolver;

/// Upload cap, enforced here and as the HTTP body limit.
pub const MAX_UPLOAD_BYTES: usize = 32 * 1024 * 1024;

const ALLOWED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp", "bmp"];

/// Fixed asset namespaces. Each category is one flat directory.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AssetCategory {
    Profiles,
    Food,
    Images,
}

impl AssetCategory {
    pub const ALL: [AssetCategory; 3] = [Self::Profiles, Self::Food, Self::Images];

    pub fn dir_name(self) -> &'static str {
        match self {
            Self::Profiles => "profiles",
            Self::Food => "food",
            Self::Images => "images",
        }
    }

    /// Leading segment of generated filenames.
    pub fn file_prefix(self) -> &'static str {
        match self {
            Self::Profiles => "profile",
            Self::Food => "food",
            Self::Images => "image",
        }
    }

    pub fn placeholder_url(self) -> &'static str {
        match self {
            Self::Profiles => "https://via.placeholder.com/300x300/ff6347/white?text=Cook",
            Self::Food | Self::Images => {
                "https://via.placeholder.com/400x300/ff6347/white?text=Delicious+Food"
            }
        }
    }
}

/// A received file, as handed over by the upload layer.
#[derive(Clone, Debug)]
pub struct Upload {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Outcome of one item in a bulk upload.
#[derive(Clone, Debug)]
pub struct StoredAsset {
    pub name_hint: String,
    pub filename: String,
}

/// Writes validated uploads into the category directories.
#[derive(Clone)]
pub struct AssetStore {
    root: PathBuf,
}

impl AssetStore {
    /// Open the store, creating the category directories if missing.
    pub async fn open(root: impl Into<PathBuf>) -> Result<Self, ServiceError> {
        let root = root.into();
        let subdirs: Vec<&str> = AssetCategory::ALL.iter().map(|c| c.dir_name()).collect();
        common::env::ensure_asset_layout(&root, &subdirs)
            .await
            .map_err(|e| ServiceError::Storage(e.to_string()))?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Validate, normalize and persist one upload. Returns the generated
    /// filename; on any error no referenced file is left behind.
    pub async fn store(
        &self,
        category: AssetCategory,
        upload: &Upload,
        owner_key: &str,
    ) -> Result<String, ServiceError> {
        let ext = allowed_extension(&upload.filename)?;
        if upload.bytes.len() > MAX_UPLOAD_BYTES {
            return Err(ServiceError::UnsupportedMedia(format!(
                "file exceeds {} byte limit",
                MAX_UPLOAD_BYTES
            )));
        }

        // Random token keeps concurrent uploads for the same owner from ever
        // contending for one destination path.
        let token = &Uuid::new_v4().simple().to_string()[..8];
        let filename = format!("{}_{}_{}.{}", category.file_prefix(), owner_key, token, ext);

        // Normalize succeeds, or the original bytes are stored unmodified.
        let payload = match normalize::normalize(&upload.bytes) {
            Ok(jpeg) => jpeg,
            Err(e) => {
                debug!(file = %upload.filename, error = %e, "normalization failed; storing original bytes");
                upload.bytes.clone()
            }
        };

        self.persist(category, &filename, &payload).await?;
        info!(category = category.dir_name(), %filename, bytes = payload.len(), "asset stored");
        Ok(filename)
    }

    /// Bulk variant: per-item validation, invalid items are skipped rather
    /// than failing the batch.
    pub async fn store_many(
        &self,
        category: AssetCategory,
        items: &[(String, Upload)],
        owner_key: &str,
    ) -> Vec<StoredAsset> {
        let mut stored = Vec::new();
        for (hint, upload) in items {
            let item_key = format!("{}_{}", owner_key, slug(hint));
            match self.store(category, upload, &item_key).await {
                Ok(filename) => stored.push(StoredAsset { name_hint: hint.clone(), filename }),
                Err(e) => {
                    debug!(file = %upload.filename, error = %e, "skipping invalid bulk item");
                }
            }
        }
        stored
    }

    /// All-or-nothing write: stage into a temp file in the same directory,
    /// then rename onto the final name.
    async fn persist(
        &self,
        category: AssetCategory,
        filename: &str,
        payload: &[u8],
    ) -> Result<(), ServiceError> {
        let dir = self.root.join(category.dir_name());
        let staged = dir.join(format!(".{filename}.tmp"));
        let target = dir.join(filename);

        if let Err(e) = tokio::fs::write(&staged, payload).await {
            return Err(ServiceError::Storage(format!("write {}: {e}", staged.display())));
        }
        if let Err(e) = tokio::fs::rename(&staged, &target).await {
            let _ = tokio::fs::remove_file(&staged).await;
            return Err(ServiceError::Storage(format!("rename {}: {e}", target.display())));
        }
        Ok(())
    }
}

fn allowed_extension(filename: &str) -> Result<String, ServiceError> {
    let ext = filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .filter(|ext| !ext.is_empty())
        .ok_or_else(|| {
            ServiceError::UnsupportedMedia(format!("{filename}: missing file extension"))
        })?;
    if !ALLOWED_EXTENSIONS.contains(&ext.as_str()) {
        return Err(ServiceError::UnsupportedMedia(format!("{filename}: .{ext} is not an image")));
    }
    Ok(ext)
}

/// Owner segment of generated filenames: the local part of the email, reduced
/// to filesystem-safe characters.
pub fn owner_key(email: &str) -> String {
    let local = email.split('@').next().unwrap_or(email);
    sanitize(local)
}

/// Filesystem-safe slug of a display name.
pub fn slug(name: &str) -> String {
    sanitize(&name.split_whitespace().collect::<Vec<_>>().join("_"))
}

fn sanitize(raw: &str) -> String {
    let cleaned: String = raw
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();
    if cleaned.is_empty() {
        "unknown".to_string()
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn upload(name: &str, bytes: &[u8]) -> Upload {
        Upload { filename: name.to_string(), bytes: bytes.to_vec() }
    }

    async fn open_store() -> (tempfile::TempDir, AssetStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = AssetStore::open(dir.path()).await.unwrap();
        (dir, store)
    }

    fn dir_entries(path: &Path) -> Vec<String> {
        std::fs::read_dir(path)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect()
    }

    #[tokio::test]
    async fn open_creates_all_category_directories() {
        let (dir, _store) = open_store().await;
        for category in AssetCategory::ALL {
            assert!(dir.path().join(category.dir_name()).is_dir());
        }
    }

    #[tokio::test]
    async fn extension_check_is_case_insensitive() {
        let (dir, store) = open_store().await;
        let name = store
            .store(AssetCategory::Food, &upload("photo.JPG", b"raw bytes"), "kavya")
            .await
            .unwrap();
        assert!(name.starts_with("food_kavya_"));
        assert!(name.ends_with(".jpg"));
        assert!(dir.path().join("food").join(&name).is_file());
    }

    #[tokio::test]
    async fn rejected_uploads_write_nothing() {
        let (dir, store) = open_store().await;

        let err = store
            .store(AssetCategory::Food, &upload("menu.pdf", b"%PDF-1.4"), "kavya")
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::UnsupportedMedia(_)));

        let err = store
            .store(AssetCategory::Food, &upload("noextension", b"bytes"), "kavya")
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::UnsupportedMedia(_)));

        assert!(dir_entries(&dir.path().join("food")).is_empty());
    }

    #[tokio::test]
    async fn oversized_uploads_are_rejected() {
        let (_dir, store) = open_store().await;
        let big = vec![0u8; MAX_UPLOAD_BYTES + 1];
        let err = store
            .store(AssetCategory::Food, &upload("big.jpg", &big), "kavya")
            .await
            .unwrap_err();
        assert!(matches!(err, ServiceError::UnsupportedMedia(_)));
    }

    #[tokio::test]
    async fn identical_inputs_never_reuse_a_filename() {
        let (_dir, store) = open_store().await;
        let up = upload("photo.jpg", b"same bytes");
        let mut seen = HashSet::new();
        for _ in 0..20 {
            let name = store.store(AssetCategory::Food, &up, "kavya").await.unwrap();
            assert!(seen.insert(name), "generated filename repeated");
        }
    }

    #[tokio::test]
    async fn unparseable_image_is_stored_as_original_bytes() {
        let (dir, store) = open_store().await;
        let raw = b"not really a jpeg";
        let name = store
            .store(AssetCategory::Images, &upload("broken.jpg", raw), "amit")
            .await
            .unwrap();
        let written = std::fs::read(dir.path().join("images").join(&name)).unwrap();
        assert_eq!(written, raw);
    }

    #[tokio::test]
    async fn bulk_store_skips_invalid_items() {
        let (dir, store) = open_store().await;
        let items = vec![
            ("Masala Dosa".to_string(), upload("dosa.jpg", b"a")),
            ("Bad File".to_string(), upload("notes.txt", b"b")),
            ("Idli Sambar".to_string(), upload("idli.png", b"c")),
        ];
        let stored = store.store_many(AssetCategory::Food, &items, "sneha").await;
        assert_eq!(stored.len(), 2);
        assert!(stored[0].filename.starts_with("food_sneha_masala_dosa_"));
        assert!(stored[1].filename.starts_with("food_sneha_idli_sambar_"));
        assert_eq!(dir_entries(&dir.path().join("food")).len(), 2);
    }

    #[test]
    fn owner_key_uses_sanitized_email_local_part() {
        assert_eq!(owner_key("kavya@x.com"), "kavya");
        assert_eq!(owner_key("A.B+c@x.com"), "a_b_c");
        assert_eq!(owner_key(""), "unknown");
    }

    #[test]
    fn slug_compacts_whitespace() {
        assert_eq!(slug("Masala  Dosa"), "masala_dosa");
        assert_eq!(slug("Appam with Stew!"), "appam_with_stew_");
    }
}
