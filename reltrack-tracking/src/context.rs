//! Scoped suspension of relation tracking.

use std::cell::Cell;

/// Tracking switch for one logical execution context (a thread, a task, a
/// request).
///
/// The context is `Send` but not `Sync`: it can be handed to whichever unit of
/// work owns it, but two concurrent executions cannot share one, so each sees
/// only its own disablement.
///
/// # Nesting
///
/// Leaving a disabled scope always re-enables tracking; it does not restore the
/// previous state. An inner scope ending inside an outer one therefore turns
/// tracking back on while the outer scope is still running. Do not nest
/// disabled scopes.
#[derive(Debug, Default)]
pub struct TrackingContext {
    disabled: Cell<bool>,
}

impl TrackingContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether shadow capture and diffing currently run.
    #[must_use]
    pub fn enabled(&self) -> bool {
        !self.disabled.get()
    }

    /// Runs `action` with tracking disabled and returns its result.
    ///
    /// Tracking is re-enabled on every exit path, including unwinding.
    pub fn disable<R>(&self, action: impl FnOnce() -> R) -> R {
        let _scope = self.disabled_scope();
        action()
    }

    /// Disables tracking until the returned guard is dropped.
    #[must_use = "tracking is re-enabled as soon as the scope is dropped"]
    pub fn disabled_scope(&self) -> DisabledScope<'_> {
        self.disabled.set(true);
        DisabledScope { context: self }
    }
}

/// Guard returned by [`TrackingContext::disabled_scope`].
#[derive(Debug)]
pub struct DisabledScope<'a> {
    context: &'a TrackingContext,
}

impl Drop for DisabledScope<'_> {
    fn drop(&mut self) {
        self.context.disabled.set(false);
    }
}
