//! Observer contract and a fail-fast dispatcher.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::repository::BoxError;

/// Failure reported by an observer.
#[derive(Debug, Error)]
#[error("Observer {observer} failed: {source}")]
pub struct ObserverError {
    observer: &'static str,
    #[source]
    source: BoxError,
}

impl ObserverError {
    /// Creates an error for the named observer.
    pub fn new(observer: &'static str, source: impl Into<BoxError>) -> Self {
        Self {
            observer,
            source: source.into(),
        }
    }

    /// Returns the name of the failing observer.
    pub fn observer(&self) -> &'static str {
        self.observer
    }
}

/// Receives a subject after a successful state change.
#[async_trait]
pub trait Observer<T: Sync>: Send + Sync {
    /// Name used in logs and errors.
    fn name(&self) -> &'static str;

    async fn notify(&self, subject: &T) -> Result<(), ObserverError>;
}

/// An ordered list of observers notified one after another.
///
/// Dispatch stops at the first failure; observers after it are not called.
pub struct Observers<T: Sync> {
    observers: Vec<Arc<dyn Observer<T>>>,
}

impl<T: Sync> Observers<T> {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self {
            observers: Vec::new(),
        }
    }

    /// Appends an observer.
    pub fn register(&mut self, observer: Arc<dyn Observer<T>>) {
        self.observers.push(observer);
    }

    pub fn len(&self) -> usize {
        self.observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observers.is_empty()
    }

    /// Notifies every observer in registration order.
    pub async fn notify_all(&self, subject: &T) -> Result<(), ObserverError> {
        for observer in &self.observers {
            if let Err(e) = observer.notify(subject).await {
                metrics::counter!("observer_failures_total").increment(1);
                tracing::warn!(
                    observer = observer.name(),
                    error = %e,
                    "observer failed, skipping the remaining observers"
                );
                return Err(e);
            }

            tracing::debug!(observer = observer.name(), "observer notified");
        }

        Ok(())
    }
}

impl<T: Sync> Default for Observers<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Sync> Clone for Observers<T> {
    fn clone(&self) -> Self {
        Self {
            observers: self.observers.clone(),
        }
    }
}

impl<T: Sync> From<Vec<Arc<dyn Observer<T>>>> for Observers<T> {
    fn from(observers: Vec<Arc<dyn Observer<T>>>) -> Self {
        Self { observers }
    }
}
