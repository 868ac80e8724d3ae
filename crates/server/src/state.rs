use std::sync::Arc;

use service::assets::{AssetStore, UrlResolver};
use service::store::backend::Store;

/// Shared handles for all request handlers. Everything inside is cheap to
/// clone; the backend behind `store` was fixed at startup.
#[derive(Clone)]
pub struct AppState {
    pub store: Store,
    pub assets: Arc<AssetStore>,
    pub resolver: Arc<UrlResolver>,
}

impl AppState {
    pub fn new(store: Store, assets: AssetStore, resolver: UrlResolver) -> Self {
        Self { store, assets: Arc::new(assets), resolver: Arc::new(resolver) }
    }
}
