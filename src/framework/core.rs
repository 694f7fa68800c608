//! # Entity Store
//!
//! Generic building blocks for holding snapshots of entities that live on the backend.
//!
//! ## Key Types
//!
//! - [`RemoteEntity`]: The trait every store-managed resource implements.
//! - [`EntityStore`]: The sequential actor that owns the snapshots.
//! - [`StoreClient`]: The cloneable handle used to talk to a store.
//! - [`FrameworkError`]: Plumbing failures, plus the entity's own error in boxed form.
//!
//! The backend is the only source of truth. A store never patches a snapshot locally: every
//! successful mutation is followed by a fresh `fetch` of the same key, and the fetched value
//! is what the caller gets back. When that fetch fails the mutation still happened, and the
//! caller gets [`FrameworkError::Stale`] carrying the action's result rather than a plain
//! entity error.

use async_trait::async_trait;
use std::any::Any;
use std::collections::HashMap;
use std::fmt::{Debug, Display};
use std::hash::Hash;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

// =============================================================================
// 1. THE ABSTRACTION
// =============================================================================

/// A resource whose state is owned by the backend and mirrored by an [`EntityStore`].
///
/// # Context
/// `Context` carries the services the entity needs to reach the backend. It is handed to
/// [`EntityStore::run`], so the store can be created before its dependencies exist.
///
/// # Example
///
/// ```rust
/// use async_trait::async_trait;
/// use golflow_storefront::framework::{EntityStore, RemoteEntity};
///
/// #[derive(Clone, Debug)]
/// struct Greeting(String);
///
/// #[derive(Debug, thiserror::Error)]
/// #[error("greeting error")]
/// struct GreetingError;
///
/// #[async_trait]
/// impl RemoteEntity for Greeting {
///     type Key = String;
///     type Action = ();
///     type ActionResult = ();
///     type Context = ();
///     type Error = GreetingError;
///
///     async fn fetch(key: &String, _: &()) -> Result<Self, GreetingError> {
///         Ok(Greeting(format!("hello {key}")))
///     }
///     async fn apply(_: &String, _: (), _: &()) -> Result<(), GreetingError> {
///         Ok(())
///     }
/// }
///
/// #[tokio::main]
/// async fn main() {
///     let (store, client) = EntityStore::<Greeting>::new(8);
///     tokio::spawn(store.run(()));
///
///     let greeting = client.refresh("ana".to_string()).await.unwrap();
///     assert_eq!(greeting.0, "hello ana");
/// }
/// ```
#[async_trait]
pub trait RemoteEntity: Clone + Debug + Send + Sync + 'static {
    /// Identifies one snapshot (a username, a listing filter, ...).
    type Key: Eq + Hash + Clone + Send + Sync + Display + Debug;

    /// Mutations the backend can perform on this entity.
    type Action: Send + Sync + Debug;

    /// What a successful mutation reports besides the refreshed snapshot.
    type ActionResult: Send + Sync + Debug + 'static;

    /// Dependencies injected at `run()`. Use `()` if none are needed.
    type Context: Send + Sync;

    /// One error enum per entity, covering every operation.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Reads the current state for `key` from the backend.
    async fn fetch(key: &Self::Key, ctx: &Self::Context) -> Result<Self, Self::Error>;

    /// Performs `action` on the backend. The store re-fetches `key` afterwards.
    async fn apply(
        key: &Self::Key,
        action: Self::Action,
        ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;

    /// When true, a successful mutation also drops every other cached key, since the
    /// change may show up under them too.
    fn invalidates_siblings() -> bool {
        false
    }
}

// =============================================================================
// 2. MESSAGES & ERRORS
// =============================================================================

/// Errors that can occur within the store plumbing.
#[derive(Debug, thiserror::Error)]
pub enum FrameworkError {
    #[error("Store closed")]
    ActorClosed,
    #[error("Store dropped response channel")]
    ActorDropped,
    #[error("Entity error: {0}")]
    Entity(Box<dyn std::error::Error + Send + Sync>),
    /// The action was applied but re-fetching the key failed. `result` is the boxed
    /// `ActionResult`; see [`FrameworkError::into_stale`].
    #[error("Action applied but refresh failed: {error}")]
    Stale {
        result: Box<dyn Any + Send + Sync>,
        error: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl FrameworkError {
    /// Recovers the entity's own error type from the boxed form.
    ///
    /// Returns the original `FrameworkError` when it is a plumbing failure or wraps a
    /// different error type.
    pub fn downcast_entity<E>(self) -> Result<E, FrameworkError>
    where
        E: std::error::Error + 'static,
    {
        match self {
            FrameworkError::Entity(inner) => inner
                .downcast::<E>()
                .map(|e| *e)
                .map_err(FrameworkError::Entity),
            other => Err(other),
        }
    }

    /// Splits a `Stale` error into the action's result and the refresh failure, the latter
    /// as `Entity`.
    ///
    /// Any other error, or a `Stale` whose result is not an `R`, comes back unchanged.
    pub fn into_stale<R: 'static>(self) -> Result<(R, FrameworkError), FrameworkError> {
        match self {
            FrameworkError::Stale { result, error } => match result.downcast::<R>() {
                Ok(result) => Ok((*result, FrameworkError::Entity(error))),
                Err(result) => Err(FrameworkError::Stale { result, error }),
            },
            other => Err(other),
        }
    }
}

/// Type alias for the one-shot response channel used by stores.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

/// Outcome of a successful mutation: the action's own result and the snapshot re-fetched
/// right after it.
#[derive(Debug, Clone)]
pub struct Performed<T: RemoteEntity> {
    pub result: T::ActionResult,
    pub snapshot: T,
}

/// Requests understood by an [`EntityStore`].
#[derive(Debug)]
pub enum StoreRequest<T: RemoteEntity> {
    /// Fetch from the backend, cache, return.
    Refresh { key: T::Key, respond_to: Response<T> },
    /// Last cached snapshot, without touching the network.
    Cached {
        key: T::Key,
        respond_to: Response<Option<T>>,
    },
    /// Apply an action, then re-fetch `key`.
    Perform {
        key: T::Key,
        action: T::Action,
        respond_to: Response<Performed<T>>,
    },
    /// Forget the cached snapshot for `key`.
    Evict { key: T::Key, respond_to: Response<()> },
}

// =============================================================================
// 3. THE STORE (SERVER)
// =============================================================================

/// The actor that owns every snapshot of one entity type.
///
/// Requests are processed one at a time in arrival order, so two mutations can never
/// interleave: the second is applied only after the first has been applied and re-fetched.
/// A caller that goes away while its request is in flight simply never receives the
/// response.
pub struct EntityStore<T: RemoteEntity> {
    receiver: mpsc::Receiver<StoreRequest<T>>,
    snapshots: HashMap<T::Key, T>,
}

impl<T: RemoteEntity> EntityStore<T> {
    /// Creates a store and its client. `buffer_size` is the mailbox capacity.
    pub fn new(buffer_size: usize) -> (Self, StoreClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let store = Self {
            receiver,
            snapshots: HashMap::new(),
        };
        (store, StoreClient::new(sender))
    }

    /// Runs the event loop until every client has been dropped.
    pub async fn run(mut self, context: T::Context) {
        let entity_type = std::any::type_name::<T>()
            .split("::")
            .last()
            .unwrap_or("Unknown");
        info!(entity_type, "Actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                StoreRequest::Refresh { key, respond_to } => {
                    debug!(entity_type, %key, "Refresh");
                    let result = match T::fetch(&key, &context).await {
                        Ok(snapshot) => {
                            self.snapshots.insert(key.clone(), snapshot.clone());
                            info!(entity_type, %key, size = self.snapshots.len(), "Refreshed");
                            Ok(snapshot)
                        }
                        Err(e) => {
                            warn!(entity_type, %key, error = %e, "Refresh failed");
                            Err(FrameworkError::Entity(Box::new(e)))
                        }
                    };
                    let _ = respond_to.send(result);
                }
                StoreRequest::Cached { key, respond_to } => {
                    let snapshot = self.snapshots.get(&key).cloned();
                    let found = snapshot.is_some();
                    debug!(entity_type, %key, found, "Cached");
                    let _ = respond_to.send(Ok(snapshot));
                }
                StoreRequest::Perform {
                    key,
                    action,
                    respond_to,
                } => {
                    debug!(entity_type, %key, ?action, "Perform");
                    let result = match T::apply(&key, action, &context).await {
                        Ok(result) => result,
                        Err(e) => {
                            warn!(entity_type, %key, error = %e, "Action failed");
                            let _ = respond_to.send(Err(FrameworkError::Entity(Box::new(e))));
                            continue;
                        }
                    };

                    if T::invalidates_siblings() {
                        self.snapshots.retain(|cached, _| *cached == key);
                    }

                    match T::fetch(&key, &context).await {
                        Ok(snapshot) => {
                            self.snapshots.insert(key.clone(), snapshot.clone());
                            info!(entity_type, %key, "Action ok");
                            let _ = respond_to.send(Ok(Performed { result, snapshot }));
                        }
                        Err(e) => {
                            // The mutation went through but the old snapshot is stale now.
                            self.snapshots.remove(&key);
                            warn!(entity_type, %key, error = %e, "Refresh after action failed");
                            let _ = respond_to.send(Err(FrameworkError::Stale {
                                result: Box::new(result),
                                error: Box::new(e),
                            }));
                        }
                    }
                }
                StoreRequest::Evict { key, respond_to } => {
                    let removed = self.snapshots.remove(&key).is_some();
                    debug!(entity_type, %key, removed, "Evict");
                    let _ = respond_to.send(Ok(()));
                }
            }
        }

        info!(entity_type, size = self.snapshots.len(), "Shutdown");
    }
}

// =============================================================================
// 4. THE CLIENT
// =============================================================================

/// A type-safe handle to an [`EntityStore`]. Holds only a sender, so cloning is cheap.
pub struct StoreClient<T: RemoteEntity> {
    sender: mpsc::Sender<StoreRequest<T>>,
}

impl<T: RemoteEntity> Clone for StoreClient<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<T: RemoteEntity> StoreClient<T> {
    pub fn new(sender: mpsc::Sender<StoreRequest<T>>) -> Self {
        Self { sender }
    }

    pub async fn refresh(&self, key: T::Key) -> Result<T, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StoreRequest::Refresh { key, respond_to })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn cached(&self, key: T::Key) -> Result<Option<T>, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StoreRequest::Cached { key, respond_to })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn perform(
        &self,
        key: T::Key,
        action: T::Action,
    ) -> Result<Performed<T>, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StoreRequest::Perform {
                key,
                action,
                respond_to,
            })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn evict(&self, key: T::Key) -> Result<(), FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(StoreRequest::Evict { key, respond_to })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }
}

// =============================================================================
// 5. TESTS
// =============================================================================
