use bevy::prelude::*;

use crate::SEA_LEVEL;
use crate::interaction::targeting::BlockTarget;
use crate::voxel::{BlockKind, Face, VoxelGrid};

/// Seconds between consecutive hits while attack is held.
pub const HIT_INTERVAL_SECS: f32 = 0.25;

/// Progress on the block under the crosshair.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum BreakState {
    /// Nothing is being broken.
    #[default]
    Idle,
    /// Hits are accumulating on `cell`.
    Tracking {
        /// Cell receiving hits.
        cell: IVec3,
        /// Hits landed so far.
        hits_delivered: u32,
        /// Hits that break the block.
        hits_required: u32,
        /// Seconds until the next hit may land; zero or below once due.
        cooldown: f32,
    },
}

/// What one tracker update did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BreakOutcome {
    /// Attack released or nothing targeted.
    Idle,
    /// Still inside the cooldown window.
    Waiting,
    /// A hit landed without finishing the block.
    Hit {
        /// Cell hit.
        cell: IVec3,
        /// Hits landed so far.
        hits_delivered: u32,
        /// Hits that break the block.
        hits_required: u32,
    },
    /// The target can never be broken; nothing changed.
    Unbreakable {
        /// Targeted cell.
        cell: IVec3,
        /// Its kind.
        kind: BlockKind,
    },
    /// The final hit landed and the grid was rewritten.
    Broken {
        /// Cell cleared.
        cell: IVec3,
        /// Kind removed.
        kind: BlockKind,
        /// Kind written in its place.
        replaced_with: BlockKind,
    },
}

#[derive(Resource, Debug)]
/// Hit accumulator for attack input, driven once per tick.
pub struct BreakTracker {
    state: BreakState,
    /// Highest layer where a broken block can be flooded by a liquid neighbour.
    pub sea_level: i32,
}

impl Default for BreakTracker {
    fn default() -> Self {
        Self::new(SEA_LEVEL)
    }
}

impl BreakTracker {
    /// Build an idle tracker flooding at or below `sea_level`.
    pub fn new(sea_level: i32) -> Self {
        Self {
            state: BreakState::Idle,
            sea_level,
        }
    }

    /// Current state machine value.
    pub fn state(&self) -> BreakState {
        self.state
    }

    /// Advance the tracker by one tick.
    ///
    /// `target` is the live crosshair result. Progress survives only while
    /// attack stays held on the same cell.
    pub fn update<G: VoxelGrid + ?Sized>(
        &mut self,
        target: Option<&BlockTarget>,
        attack_held: bool,
        dt: f32,
        grid: &mut G,
    ) -> BreakOutcome {
        let Some(target) = target.filter(|_| attack_held) else {
            self.state = BreakState::Idle;
            return BreakOutcome::Idle;
        };
        let cell = target.cell;
        let kind = grid.get(cell);
        if !kind.is_breakable() {
            self.state = BreakState::Idle;
            return BreakOutcome::Unbreakable { cell, kind };
        }

        let (hits_delivered, hits_required, cooldown) = match self.state {
            BreakState::Tracking {
                cell: tracked,
                hits_delivered,
                hits_required,
                cooldown,
            } if tracked == cell => (hits_delivered, hits_required, cooldown - dt),
            _ => (0, kind.hardness().max(1), 0.0),
        };

        if cooldown > 0.0 {
            self.state = BreakState::Tracking {
                cell,
                hits_delivered,
                hits_required,
                cooldown,
            };
            return BreakOutcome::Waiting;
        }

        let hits_delivered = hits_delivered + 1;
        if hits_delivered < hits_required {
            // Overshoot past the due time counts toward the next interval,
            // capped so one tick never owes more than one extra hit.
            let overshoot = cooldown.max(-HIT_INTERVAL_SECS);
            self.state = BreakState::Tracking {
                cell,
                hits_delivered,
                hits_required,
                cooldown: HIT_INTERVAL_SECS + overshoot,
            };
            return BreakOutcome::Hit {
                cell,
                hits_delivered,
                hits_required,
            };
        }

        self.state = BreakState::Idle;
        let replaced_with = self.replacement_for(cell, grid);
        grid.set(cell, replaced_with);
        BreakOutcome::Broken {
            cell,
            kind,
            replaced_with,
        }
    }

    /// Kind left behind when the block at `cell` is removed.
    fn replacement_for<G: VoxelGrid + ?Sized>(&self, cell: IVec3, grid: &G) -> BlockKind {
        let floods = cell.y <= self.sea_level
            && Face::ALL
                .iter()
                .any(|face| grid.is_liquid(face.neighbor(cell)));
        if floods {
            BlockKind::LIQUID
        } else {
            BlockKind::Air
        }
    }
}
