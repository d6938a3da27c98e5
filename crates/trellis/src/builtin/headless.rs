//! Renderer that draws nothing.

use std::cell::Cell;

use log::{debug, trace};

use trellis_core::value::Attributes;

use crate::{event::Event, extension::Renderer};

pub(super) const NAME: &str = "headless";

/// Renderer for graphs that are only built and queried.
///
/// It logs and counts the events it receives and resolves styles with the
/// default [`cascade_style`](crate::extension::cascade_style).
#[derive(Debug, Default)]
pub struct HeadlessRenderer {
    events: Cell<usize>,
}

impl HeadlessRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of events received so far.
    pub fn events_received(&self) -> usize {
        self.events.get()
    }
}

impl Renderer for HeadlessRenderer {
    fn notify(&self, event: &Event) {
        self.events.set(self.events.get() + 1);
        trace!(
            kind:% = event.kind(),
            elements = event.elements().len(),
            style = event.style().is_some(),
            bypass = event.bypass().is_some();
            "Headless renderer received event"
        );
    }

    fn pan(&self, params: &Attributes) {
        debug!(params:?; "Headless renderer ignoring pan");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{collection::Collection, event::EventKind};

    #[test]
    fn test_counts_events() {
        let renderer = HeadlessRenderer::new();
        renderer.notify(&Event::new(EventKind::Add, Collection::default()));
        renderer.notify(&Event::new(EventKind::Position, Collection::default()));
        renderer.pan(&Attributes::new());

        assert_eq!(renderer.events_received(), 2);
    }
}
