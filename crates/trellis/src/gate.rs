//! Notification gate between the element model and the renderer.
//!
//! Bulk operations mutate many elements but should surface as one renderer
//! event. They open a suppression scope, do their element-level work (whose
//! individual notifications are dropped), close the scope and then emit their
//! own batched event. Scopes nest: notifications resume only when the
//! outermost scope closes, so a listener that runs a bulk operation while
//! another one is in progress cannot re-enable notifications early.

use std::{cell::Cell, rc::Rc};

use log::trace;

use crate::{event::Event, extension::Renderer};

/// Forwards events to the renderer unless a suppression scope is open.
pub(crate) struct NotificationGate {
    depth: Cell<usize>,
    renderer: Rc<dyn Renderer>,
}

impl NotificationGate {
    pub(crate) fn new(renderer: Rc<dyn Renderer>) -> Self {
        Self {
            depth: Cell::new(0),
            renderer,
        }
    }

    pub(crate) fn renderer(&self) -> &Rc<dyn Renderer> {
        &self.renderer
    }

    /// Returns `true` when no suppression scope is open.
    pub(crate) fn is_enabled(&self) -> bool {
        self.depth.get() == 0
    }

    /// Opens a suppression scope that closes when the guard is dropped.
    pub(crate) fn suppress(&self) -> SuppressGuard<'_> {
        self.depth.set(self.depth.get() + 1);
        SuppressGuard { gate: self }
    }

    /// Runs `f` with notifications suppressed.
    ///
    /// The scope closes even if `f` unwinds. Nothing is flushed afterwards;
    /// the caller emits its own batched event.
    pub(crate) fn suppressed<R>(&self, f: impl FnOnce() -> R) -> R {
        let _guard = self.suppress();
        f()
    }

    /// Delivers `event` to the renderer, or drops it while suppressed.
    pub(crate) fn notify(&self, event: Event) {
        if !self.is_enabled() {
            trace!(kind:% = event.kind(), depth = self.depth.get(); "Notification suppressed");
            return;
        }
        trace!(kind:% = event.kind(), elements = event.elements().len(); "Notifying renderer");
        self.renderer.notify(&event);
    }
}

/// Scope guard returned by [`NotificationGate::suppress`].
#[must_use]
pub(crate) struct SuppressGuard<'a> {
    gate: &'a NotificationGate,
}

impl Drop for SuppressGuard<'_> {
    fn drop(&mut self) {
        let depth = self.gate.depth.get();
        self.gate.depth.set(depth.saturating_sub(1));
    }
}
