//! RAII guard closing a profiled call on every exit path.

use super::store::ClassProfileStore;
use crate::utils::error::ProfileError;
use log::{error, warn};
use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Instant;

/// Open call on a [`ClassProfileStore`]; pops its frame when dropped
///
/// The guard stays on the thread that pushed the frame, because stacks are
/// per thread. Dropping it during a panic still records the call.
///
/// Closing a guard while frames opened after it are still open is a protocol
/// violation. The error is still reported, but those later frames are
/// discarded and this guard's own frame is recorded, so the thread's stack
/// stays balanced.
#[must_use = "dropping the guard immediately records ~0s; bind it with `let _guard = ...`"]
pub struct CallGuard {
    store: Option<Arc<ClassProfileStore>>,
    name: String,
    start: Instant,
    _not_send: PhantomData<*const ()>,
}

impl CallGuard {
    pub(crate) fn new(store: Arc<ClassProfileStore>, name: String) -> Self {
        let start = Instant::now();
        store.push(name.as_str());
        Self {
            store: Some(store),
            name,
            start,
            _not_send: PhantomData,
        }
    }

    /// Method name this guard will close
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Close the call now and surface any protocol error
    ///
    /// Returns the self time recorded for the call.
    pub fn finish(mut self) -> Result<f64, ProfileError> {
        self.close().unwrap_or(Ok(0.0))
    }

    fn close(&mut self) -> Option<Result<f64, ProfileError>> {
        let store = self.store.take()?;
        let elapsed = self.start.elapsed().as_secs_f64();
        let result = store.pop(&self.name, elapsed);

        if let Err(ProfileError::ProtocolViolation { .. }) = result {
            let dropped = store.abandon_above(&self.name);
            if dropped > 0 {
                warn!("Discarded {} unclosed frame(s) above '{}'", dropped, self.name);
                if let Err(e) = store.pop(&self.name, elapsed) {
                    error!("Failed to close '{}' after discarding frames: {}", self.name, e);
                }
            }
        }

        Some(result)
    }
}

impl Drop for CallGuard {
    fn drop(&mut self) {
        if let Some(Err(e)) = self.close() {
            error!("Profiling stack out of balance: {}", e);
        }
    }
}

impl std::fmt::Debug for CallGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CallGuard")
            .field("name", &self.name)
            .field("open", &self.store.is_some())
            .finish()
    }
}
