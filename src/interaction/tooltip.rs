use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// One `(dimension label, value)` line of a tooltip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TooltipEntry {
    pub label: String,
    pub value: String,
}

impl TooltipEntry {
    #[must_use]
    pub fn new(label: impl Into<String>, value: impl ToString) -> Self {
        Self {
            label: label.into(),
            value: value.to_string(),
        }
    }
}

/// Tooltip content for one hovered bar of the active view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tooltip {
    pub bar_index: usize,
    pub entries: SmallVec<[TooltipEntry; 3]>,
}

/// Tooltip surface state. Hidden until a bar is hovered, hidden again on
/// pointer-out and on every scene render.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TooltipState {
    current: Option<Tooltip>,
}

impl TooltipState {
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.current.is_some()
    }

    #[must_use]
    pub fn current(&self) -> Option<&Tooltip> {
        self.current.as_ref()
    }

    pub fn show(&mut self, tooltip: Tooltip) {
        self.current = Some(tooltip);
    }

    /// Returns `true` when a visible tooltip was hidden.
    pub fn hide(&mut self) -> bool {
        self.current.take().is_some()
    }
}
