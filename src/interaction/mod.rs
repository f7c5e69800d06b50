mod subscription;

use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::core::{PixelPoint, TimeValue};

pub use subscription::SubscriptionGuard;

/// Activation state of a drawing tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DrawingState {
    /// Pointer notifications are not subscribed and never mutate the tool.
    #[default]
    Inactive,
    /// Clicks commit points and pointer moves drive the preview point.
    Active,
}

impl DrawingState {
    #[must_use]
    pub fn is_active(self) -> bool {
        matches!(self, Self::Active)
    }
}

/// Pointer notification payload delivered by the host chart.
///
/// `point` is `None` when the pointer is outside the plot area and `time` is
/// `None` when the pointer x does not map onto loaded data.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MouseEventParams {
    pub point: Option<PixelPoint>,
    pub time: Option<TimeValue>,
}

impl MouseEventParams {
    #[must_use]
    pub fn new(point: Option<PixelPoint>, time: Option<TimeValue>) -> Self {
        Self { point, time }
    }

    /// Notification for a pointer that left the plot area.
    #[must_use]
    pub fn outside() -> Self {
        Self::default()
    }
}

/// Which host notification stream a subscription belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PointerEventKind {
    Click,
    CrosshairMove,
}

/// Opaque handle returned by the host when registering a handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Handler invoked synchronously on the host's event dispatch.
pub type MouseEventHandler = Rc<dyn Fn(&MouseEventParams)>;
