use std::fmt;
use std::rc::Rc;

use tracing::trace;

use crate::extensions::ChartApi;
use crate::interaction::{MouseEventHandler, PointerEventKind, SubscriptionId};

/// Scoped registration of one pointer handler with a host chart.
///
/// The handler is registered on construction and unregistered exactly once,
/// either through `release` or when the guard is dropped.
pub struct SubscriptionGuard {
    chart: Rc<dyn ChartApi>,
    kind: PointerEventKind,
    id: Option<SubscriptionId>,
}

impl SubscriptionGuard {
    #[must_use]
    pub fn subscribe(
        chart: Rc<dyn ChartApi>,
        kind: PointerEventKind,
        handler: MouseEventHandler,
    ) -> Self {
        let id = match kind {
            PointerEventKind::Click => chart.subscribe_click(handler),
            PointerEventKind::CrosshairMove => chart.subscribe_crosshair_move(handler),
        };
        trace!(?kind, %id, "pointer subscription acquired");
        Self {
            chart,
            kind,
            id: Some(id),
        }
    }

    #[must_use]
    pub fn kind(&self) -> PointerEventKind {
        self.kind
    }

    #[must_use]
    pub fn id(&self) -> Option<SubscriptionId> {
        self.id
    }

    /// Unregisters the handler now instead of at drop.
    pub fn release(mut self) {
        self.unsubscribe();
    }

    fn unsubscribe(&mut self) {
        let Some(id) = self.id.take() else {
            return;
        };
        match self.kind {
            PointerEventKind::Click => self.chart.unsubscribe_click(id),
            PointerEventKind::CrosshairMove => self.chart.unsubscribe_crosshair_move(id),
        }
        trace!(kind = ?self.kind, %id, "pointer subscription released");
    }
}

impl Drop for SubscriptionGuard {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

impl fmt::Debug for SubscriptionGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubscriptionGuard")
            .field("kind", &self.kind)
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}
