//! # Mock Store
//!
//! Utilities for testing code that talks to a store, without a backend or a running
//! [`EntityStore`](crate::framework::EntityStore).
//!
//! | | MockStore | Real store |
//! |---|---|---|
//! | **Backend** | none | the services in `Context` |
//! | **Determinism** | scripted responses | depends on the backend |
//! | **Use case** | page state machines, typed clients | the entity's fetch/apply logic |
//!
//! Two styles are available:
//!
//! - The fluent [`MockStore`]: queue expectations, hand out `client()`, call `verify()`.
//! - The low-level [`create_mock_store`] plus [`expect_refresh`] / [`expect_perform`], which
//!   give the test the raw request and its responder.
//!
//! ```rust
//! use golflow_storefront::clients::CartStoreClient;
//! use golflow_storefront::framework::mock::MockStore;
//! use golflow_storefront::model::{Cart, Username};
//!
//! #[tokio::main]
//! async fn main() {
//!     let alice = Username::from("alice");
//!     let mut mock = MockStore::<Cart>::new();
//!     mock.expect_refresh(alice.clone()).return_ok(Cart {
//!         id: None,
//!         username: alice.clone(),
//!         items: vec![],
//!         total_price: 0.0,
//!         total_items: 0,
//!     });
//!
//!     let carts = CartStoreClient::new(mock.client());
//!     assert!(carts.load(&alice).await.unwrap().is_empty());
//!     mock.verify();
//! }
//! ```

use crate::framework::{FrameworkError, Performed, RemoteEntity, StoreClient, StoreRequest};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::{mpsc, oneshot};

// =============================================================================
// EXPECTATION BUILDER API
// =============================================================================

/// An expected request and the response to give it.
enum Expectation<T: RemoteEntity> {
    Refresh {
        key: T::Key,
        response: Result<T, FrameworkError>,
    },
    Cached {
        key: T::Key,
        response: Result<Option<T>, FrameworkError>,
    },
    Perform {
        key: T::Key,
        response: Result<Performed<T>, FrameworkError>,
    },
    Evict {
        key: T::Key,
    },
}

impl<T: RemoteEntity> Expectation<T> {
    fn describe(&self) -> String {
        match self {
            Expectation::Refresh { key, .. } => format!("refresh for key {key}"),
            Expectation::Cached { key, .. } => format!("cached for key {key}"),
            Expectation::Perform { key, .. } => format!("perform for key {key}"),
            Expectation::Evict { key } => format!("evict for key {key}"),
        }
    }
}

type Queue<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;
type Mismatches = Arc<Mutex<Vec<String>>>;

/// A scripted stand-in for an [`EntityStore`](crate::framework::EntityStore).
///
/// Requests must arrive in the order the expectations were queued and with the same key.
/// Anything else is answered with `ActorDropped` and recorded, and `verify()` fails on it.
pub struct MockStore<T: RemoteEntity> {
    client: StoreClient<T>,
    expectations: Queue<T>,
    mismatches: Mismatches,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: RemoteEntity> Default for MockStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: RemoteEntity> MockStore<T> {
    /// Creates a mock with no expectations. Must be called inside a Tokio runtime.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<StoreRequest<T>>(100);
        let expectations: Queue<T> = Arc::new(Mutex::new(VecDeque::new()));
        let queue = expectations.clone();

        let mismatches: Mismatches = Arc::new(Mutex::new(Vec::new()));
        let seen = mismatches.clone();

        let handle = tokio::spawn(async move {
            // Pushed before the responder drops, so the caller sees it once `ActorDropped` arrives.
            let record = |mismatch: String| seen.lock().unwrap().push(mismatch);

            while let Some(request) = receiver.recv().await {
                let expectation = queue.lock().unwrap().pop_front();

                match (request, expectation) {
                    (
                        StoreRequest::Refresh { key, respond_to },
                        Some(Expectation::Refresh {
                            key: expected,
                            response,
                        }),
                    ) => {
                        if key == expected {
                            let _ = respond_to.send(response);
                        } else {
                            record(format!("refresh for key {key}, expected {expected}"));
                        }
                    }
                    (
                        StoreRequest::Cached { key, respond_to },
                        Some(Expectation::Cached {
                            key: expected,
                            response,
                        }),
                    ) => {
                        if key == expected {
                            let _ = respond_to.send(response);
                        } else {
                            record(format!("cached for key {key}, expected {expected}"));
                        }
                    }
                    (
                        StoreRequest::Perform {
                            key, respond_to, ..
                        },
                        Some(Expectation::Perform {
                            key: expected,
                            response,
                        }),
                    ) => {
                        if key == expected {
                            let _ = respond_to.send(response);
                        } else {
                            record(format!("perform for key {key}, expected {expected}"));
                        }
                    }
                    (
                        StoreRequest::Evict { key, respond_to },
                        Some(Expectation::Evict { key: expected }),
                    ) => {
                        if key == expected {
                            let _ = respond_to.send(Ok(()));
                        } else {
                            record(format!("evict for key {key}, expected {expected}"));
                        }
                    }
                    (request, Some(expectation)) => {
                        record(format!("{request:?} while expecting {}", expectation.describe()));
                    }
                    (request, None) => record(format!("{request:?} with no expectation left")),
                }
            }
        });

        Self {
            client: StoreClient::new(sender),
            expectations,
            mismatches,
            _handle: handle,
        }
    }

    /// Returns the client for use in tests.
    pub fn client(&self) -> StoreClient<T> {
        self.client.clone()
    }

    pub fn expect_refresh(&mut self, key: T::Key) -> RefreshExpectationBuilder<T> {
        RefreshExpectationBuilder {
            key,
            expectations: self.expectations.clone(),
        }
    }

    pub fn expect_cached(&mut self, key: T::Key) -> CachedExpectationBuilder<T> {
        CachedExpectationBuilder {
            key,
            expectations: self.expectations.clone(),
        }
    }

    pub fn expect_perform(&mut self, key: T::Key) -> PerformExpectationBuilder<T> {
        PerformExpectationBuilder {
            key,
            expectations: self.expectations.clone(),
        }
    }

    pub fn expect_evict(&mut self, key: T::Key) {
        self.expectations
            .lock()
            .unwrap()
            .push_back(Expectation::Evict { key });
    }

    /// Verifies that every request matched its expectation and that all expectations were met.
    pub fn verify(&self) {
        let mismatches = self.mismatches.lock().unwrap();
        if !mismatches.is_empty() {
            panic!("Unexpected requests: {}", mismatches.join("; "));
        }
        let remaining = self.expectations.lock().unwrap().len();
        if remaining != 0 {
            panic!("Not all expectations were met. {remaining} remaining");
        }
    }
}

/// Builder for `refresh` expectations.
pub struct RefreshExpectationBuilder<T: RemoteEntity> {
    key: T::Key,
    expectations: Queue<T>,
}

impl<T: RemoteEntity> RefreshExpectationBuilder<T> {
    pub fn return_ok(self, snapshot: T) {
        self.push(Ok(snapshot));
    }

    pub fn return_err(self, error: FrameworkError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<T, FrameworkError>) {
        self.expectations
            .lock()
            .unwrap()
            .push_back(Expectation::Refresh {
                key: self.key,
                response,
            });
    }
}

/// Builder for `cached` expectations.
pub struct CachedExpectationBuilder<T: RemoteEntity> {
    key: T::Key,
    expectations: Queue<T>,
}

impl<T: RemoteEntity> CachedExpectationBuilder<T> {
    pub fn return_ok(self, snapshot: Option<T>) {
        self.expectations
            .lock()
            .unwrap()
            .push_back(Expectation::Cached {
                key: self.key,
                response: Ok(snapshot),
            });
    }
}

/// Builder for `perform` expectations.
pub struct PerformExpectationBuilder<T: RemoteEntity> {
    key: T::Key,
    expectations: Queue<T>,
}

impl<T: RemoteEntity> PerformExpectationBuilder<T> {
    /// Responds with the action's result and the snapshot a real store would re-fetch.
    pub fn return_ok(self, result: T::ActionResult, snapshot: T) {
        self.push(Ok(Performed { result, snapshot }));
    }

    pub fn return_err(self, error: FrameworkError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<Performed<T>, FrameworkError>) {
        self.expectations
            .lock()
            .unwrap()
            .push_back(Expectation::Perform {
                key: self.key,
                response,
            });
    }
}

// =============================================================================
// LOW-LEVEL HELPERS
// =============================================================================

/// Creates a client wired to a receiver the test controls.
///
/// Useful when a test needs to inspect the action a client sent, or to hold a response back.
pub fn create_mock_store<T: RemoteEntity>(
    buffer_size: usize,
) -> (StoreClient<T>, mpsc::Receiver<StoreRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (StoreClient::new(sender), receiver)
}

/// Helper to verify that the next message is a Refresh request
pub async fn expect_refresh<T: RemoteEntity>(
    receiver: &mut mpsc::Receiver<StoreRequest<T>>,
) -> Option<(T::Key, oneshot::Sender<Result<T, FrameworkError>>)> {
    match receiver.recv().await {
        Some(StoreRequest::Refresh { key, respond_to }) => Some((key, respond_to)),
        _ => None,
    }
}

/// Helper to verify that the next message is a Perform request
pub async fn expect_perform<T: RemoteEntity>(
    receiver: &mut mpsc::Receiver<StoreRequest<T>>,
) -> Option<(
    T::Key,
    T::Action,
    oneshot::Sender<Result<Performed<T>, FrameworkError>>,
)> {
    match receiver.recv().await {
        Some(StoreRequest::Perform {
            key,
            action,
            respond_to,
        }) => Some((key, action, respond_to)),
        _ => None,
    }
}
