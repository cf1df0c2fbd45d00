mod breaking;
mod placement;
mod selection;
mod systems;
mod targeting;

pub use breaking::{BreakOutcome, BreakState, BreakTracker, HIT_INTERVAL_SECS};
pub use placement::{Placement, PlacementRejection, place, validate};
pub use selection::SelectedBlock;
pub use systems::{break_system, place_system, selection_system, targeting_system};
pub use targeting::{BlockTarget, EDGE_MARGIN, RAY_STEP, TargetState, cast_target, edge_redirect};
