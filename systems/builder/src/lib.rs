#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure builder system responsible for emitting tower placement, removal and
//! upgrade commands.
//!
//! The builder owns the player's action-point budget. Every emitted command
//! costs one point, and once the budget is spent no further commands leave the
//! system.

use energy_grid_core::{CellCoord, Command, TowerCell, TowerKind};

/// Action points granted at the start of a session.
pub const DEFAULT_ACTION_POINTS: u32 = 20;

/// Remaining budget of player actions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ActionPoints(u32);

impl ActionPoints {
    /// Creates a budget holding `value` points.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Points still available.
    #[must_use]
    pub const fn remaining(&self) -> u32 {
        self.0
    }

    /// Reports whether the budget is exhausted.
    #[must_use]
    pub const fn is_exhausted(&self) -> bool {
        self.0 == 0
    }

    fn spend(&mut self) -> bool {
        match self.0.checked_sub(1) {
            Some(remaining) => {
                self.0 = remaining;
                true
            }
            None => false,
        }
    }
}

impl Default for ActionPoints {
    fn default() -> Self {
        Self::new(DEFAULT_ACTION_POINTS)
    }
}

/// Input snapshot distilled from adapter-provided frame input data.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BuilderInput {
    /// Tower kind the player selected on this frame, if any.
    pub select: Option<TowerKind>,
    /// Indicates whether the player requested a placement on this frame.
    pub place_action: bool,
    /// Indicates whether the player requested tower removal on this frame.
    pub remove_action: bool,
    /// Indicates whether the player requested an upgrade on this frame.
    pub upgrade_action: bool,
    /// Cell currently hovered by the cursor.
    pub cursor_cell: Option<CellCoord>,
}

/// Builder system that translates player input into board commands.
#[derive(Clone, Debug, Default)]
pub struct Builder {
    selected: SelectedTower,
    action_points: ActionPoints,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct SelectedTower(TowerKind);

impl Default for SelectedTower {
    fn default() -> Self {
        Self(TowerKind::Generator)
    }
}

impl Builder {
    /// Creates a builder with the provided action-point budget and the
    /// generator selected.
    #[must_use]
    pub fn new(action_points: ActionPoints) -> Self {
        Self {
            selected: SelectedTower::default(),
            action_points,
        }
    }

    /// Tower kind that the next placement will construct.
    #[must_use]
    pub const fn selected(&self) -> TowerKind {
        self.selected.0
    }

    /// Remaining action-point budget.
    #[must_use]
    pub const fn action_points(&self) -> ActionPoints {
        self.action_points
    }

    /// Consumes adapter-derived input to emit builder commands.
    ///
    /// The `cell_at` closure should mirror the semantics of the world's
    /// `query::cell` helper so the system can inspect the hovered cell.
    /// Placement only targets empty cells, while removal and upgrades only
    /// target towers; upgrades of towers at the level ceiling are skipped.
    pub fn handle<F>(&mut self, input: BuilderInput, mut cell_at: F, out: &mut Vec<Command>)
    where
        F: FnMut(CellCoord) -> Option<TowerCell>,
    {
        if let Some(kind) = input.select {
            self.selected = SelectedTower(kind);
        }

        let Some(cell) = input.cursor_cell else {
            return;
        };
        let Some(target) = cell_at(cell) else {
            return;
        };

        if input.place_action && target.is_empty() {
            self.emit(
                Command::PlaceTower {
                    kind: self.selected.0,
                    cell,
                },
                out,
            );
        }

        if input.remove_action && target.tower().is_some() {
            self.emit(Command::RemoveTower { cell }, out);
        }

        if input.upgrade_action && target.tower().is_some() && target.level().next().is_some() {
            self.emit(Command::UpgradeTower { cell }, out);
        }
    }

    fn emit(&mut self, command: Command, out: &mut Vec<Command>) {
        if self.action_points.spend() {
            out.push(command);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ActionPoints;

    #[test]
    fn spending_stops_at_zero() {
        let mut points = ActionPoints::new(2);
        assert!(points.spend());
        assert!(points.spend());
        assert!(!points.spend());
        assert!(points.is_exhausted());
        assert_eq!(points.remaining(), 0);
    }

    #[test]
    fn default_budget_matches_session_start() {
        assert_eq!(ActionPoints::default().remaining(), 20);
    }
}
