//! Runtime holder for snapped-in delegates.
//!
//! [`SnapinCell`] is the Rust counterpart of the holder field and monitor in
//! a generated snap-in class. A wrapper call installs a delegate for the
//! duration of one callback; forwarding calls made during that callback
//! reach the installed delegate.
//!
//! # Contract
//!
//! - One delegate at most: a nested [`call_with`](SnapinCell::call_with) on
//!   the same cell fails with [`SnapinError::Reentrancy`] and leaves the
//!   outer delegate installed.
//! - Calls from other threads block until the active callback finishes.
//! - The slot is cleared on every exit from the callback, including panics.
//! - [`forward`](SnapinCell::forward) outside a callback fails with
//!   [`SnapinError::NotActive`].
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use snapin::SnapinCell;
//!
//! trait Greeter: Send + Sync {
//!     fn greet(&self, name: &str) -> String;
//! }
//!
//! struct English;
//! impl Greeter for English {
//!     fn greet(&self, name: &str) -> String {
//!         format!("hello {name}")
//!     }
//! }
//!
//! let cell: SnapinCell<dyn Greeter> = SnapinCell::new();
//! let greeting = cell
//!     .call_with(Some(Arc::new(English) as Arc<dyn Greeter>), |cell| {
//!         cell.forward(|g| g.greet("world"))
//!     })
//!     .unwrap()
//!     .unwrap();
//!
//! assert_eq!(greeting, "hello world");
//! assert!(!cell.is_active());
//! ```

use std::cell::RefCell;
use std::fmt;
use std::sync::Arc;

use parking_lot::ReentrantMutex;
use tracing::trace;

use snapin_core::SnapinError;

type Slot<D> = RefCell<Option<Arc<D>>>;

/// Holder slot guarded by a reentrant monitor.
pub struct SnapinCell<D: ?Sized> {
    slot: ReentrantMutex<Slot<D>>,
}

impl<D: ?Sized> Default for SnapinCell<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: ?Sized> SnapinCell<D> {
    /// Create an empty cell.
    pub fn new() -> Self {
        Self {
            slot: ReentrantMutex::new(RefCell::new(None)),
        }
    }

    /// Run `op` with `delegate` installed.
    ///
    /// # Errors
    ///
    /// - [`SnapinError::Reentrancy`] if a delegate is already installed
    /// - [`SnapinError::NullArgument`] if `delegate` is `None`
    ///
    /// Reentrancy is checked first.
    pub fn call_with<R>(
        &self,
        delegate: Option<Arc<D>>,
        op: impl FnOnce(&Self) -> R,
    ) -> Result<R, SnapinError> {
        let guard = self.slot.lock();
        if guard.borrow().is_some() {
            return Err(SnapinError::Reentrancy);
        }
        let delegate = delegate.ok_or(SnapinError::NullArgument)?;

        *guard.borrow_mut() = Some(delegate);
        trace!("delegate installed");
        let _clear = ClearOnExit(&*guard);
        Ok(op(self))
    }

    /// Call `f` on the installed delegate.
    ///
    /// # Errors
    ///
    /// [`SnapinError::NotActive`] when no delegate is installed.
    pub fn forward<R>(&self, f: impl FnOnce(&D) -> R) -> Result<R, SnapinError> {
        let guard = self.slot.lock();
        let delegate = guard.borrow().clone().ok_or(SnapinError::NotActive)?;
        Ok(f(delegate.as_ref()))
    }

    /// Whether a delegate is installed.
    ///
    /// Blocks while another thread is inside a callback.
    pub fn is_active(&self) -> bool {
        self.slot.lock().borrow().is_some()
    }
}

impl<D: ?Sized> fmt::Debug for SnapinCell<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.slot.try_lock() {
            Some(guard) => f
                .debug_struct("SnapinCell")
                .field("active", &guard.borrow().is_some())
                .finish(),
            None => f.debug_struct("SnapinCell").field("active", &"<locked>").finish(),
        }
    }
}

/// Empties the slot when dropped.
struct ClearOnExit<'a, D: ?Sized>(&'a Slot<D>);

impl<D: ?Sized> Drop for ClearOnExit<'_, D> {
    fn drop(&mut self) {
        self.0.borrow_mut().take();
        trace!("delegate cleared");
    }
}
