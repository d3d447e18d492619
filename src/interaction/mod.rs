mod navigation;
mod tooltip;

pub use navigation::{NavigationControls, NavigationState, Navigator};
pub use tooltip::{Tooltip, TooltipEntry, TooltipState};
