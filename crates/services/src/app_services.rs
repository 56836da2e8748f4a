use std::sync::Arc;

use storage::repository::Storage;

use crate::Clock;
use crate::auth::{AuthProvider, LocalAuthProvider, PasswordHashing};
use crate::catalog::CatalogService;
use crate::error::AppServicesError;
use crate::progress::ProgressService;

/// Assembles the app-facing services over one storage backend.
#[derive(Clone)]
pub struct AppServices {
    auth: Arc<dyn AuthProvider>,
    catalog: Arc<CatalogService>,
    progress: Arc<ProgressService>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if connecting or migrating the database fails.
    pub async fn new_sqlite(db_url: &str, clock: Clock) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Ok(Self::from_storage(clock, &storage, PasswordHashing::default()))
    }

    /// Build services over in-memory storage with cheap password hashing.
    #[must_use]
    pub fn in_memory(clock: Clock) -> Self {
        Self::from_storage(clock, &Storage::in_memory(), PasswordHashing::low_cost())
    }

    #[must_use]
    pub fn from_storage(clock: Clock, storage: &Storage, hashing: PasswordHashing) -> Self {
        let auth = LocalAuthProvider::new(clock, Arc::clone(&storage.users)).with_hashing(hashing);
        Self {
            auth: Arc::new(auth),
            catalog: Arc::new(CatalogService::new(Arc::clone(&storage.courses))),
            progress: Arc::new(ProgressService::new(
                Arc::clone(&storage.courses),
                Arc::clone(&storage.progress),
            )),
        }
    }

    #[must_use]
    pub fn auth(&self) -> Arc<dyn AuthProvider> {
        Arc::clone(&self.auth)
    }

    #[must_use]
    pub fn catalog(&self) -> Arc<CatalogService> {
        Arc::clone(&self.catalog)
    }

    #[must_use]
    pub fn progress(&self) -> Arc<ProgressService> {
        Arc::clone(&self.progress)
    }
}
