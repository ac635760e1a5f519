//! Shared, replaceable authorizer.

use crate::authorizer::Authorizer;
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::info;

/// Holds the authorizer in use and lets it be replaced as a whole.
///
/// Readers take a snapshot with [`current`](Self::current) and evaluate
/// against it without holding the lock, so a replacement never blocks an
/// in-flight check and no check observes a half-built matrix.
#[derive(Debug)]
pub struct AuthorizerHandle {
    inner: RwLock<Arc<Authorizer>>,
}

impl AuthorizerHandle {
    pub fn new(authorizer: Authorizer) -> Self {
        Self {
            inner: RwLock::new(Arc::new(authorizer)),
        }
    }

    pub fn current(&self) -> Arc<Authorizer> {
        Arc::clone(&self.inner.read())
    }

    /// Install `authorizer`, returning the one it replaces.
    pub fn replace(&self, authorizer: Authorizer) -> Arc<Authorizer> {
        let entries = authorizer.matrix().len();
        let previous = std::mem::replace(&mut *self.inner.write(), Arc::new(authorizer));
        info!(entries, "Authorizer replaced");
        previous
    }
}

impl From<Authorizer> for AuthorizerHandle {
    fn from(authorizer: Authorizer) -> Self {
        Self::new(authorizer)
    }
}
