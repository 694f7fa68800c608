use crate::framework::{FrameworkError, RemoteEntity, StoreClient};
use async_trait::async_trait;

/// Trait for entity-specific store clients to inherit the non-mutating operations.
///
/// Implementors provide access to the inner [`StoreClient`] and a mapping from
/// [`FrameworkError`] to their own error type; `refresh`, `cached` and `evict` come for free.
/// Mutations stay on the typed client, where each action gets a named method.
#[async_trait]
pub trait StoreHandle<T: RemoteEntity>: Send + Sync {
    /// The entity-specific error type.
    type Error: From<String> + Send + Sync;

    /// Access the inner generic StoreClient.
    fn inner(&self) -> &StoreClient<T>;

    /// Map framework errors to the specific entity error type.
    fn map_error(e: FrameworkError) -> Self::Error;

    /// Fetch the latest snapshot from the backend.
    #[tracing::instrument(skip(self))]
    async fn refresh(&self, key: T::Key) -> Result<T, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().refresh(key).await.map_err(Self::map_error)
    }

    /// Last snapshot held by the store, if any.
    #[tracing::instrument(skip(self))]
    async fn cached(&self, key: T::Key) -> Result<Option<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().cached(key).await.map_err(Self::map_error)
    }

    #[tracing::instrument(skip(self))]
    async fn evict(&self, key: T::Key) -> Result<(), Self::Error> {
        tracing::debug!("Sending request");
        self.inner().evict(key).await.map_err(Self::map_error)
    }
}
