//! Energy accounting and beam trace types produced by propagation.

use serde::{Deserialize, Serialize};

use crate::{CellCoord, Direction};

/// Aggregate energy accounting for a single propagation run.
///
/// The four fields form the canonical contract of the propagation engine;
/// callers destructure them by name.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EnergyReport {
    /// Energy harvested by collectors.
    pub collected: f64,
    /// Energy lost against obstacles or the board boundary.
    pub wasted: f64,
    /// Largest amount of energy lost in a single obstacle hit or boundary exit.
    pub max_single_waste: f64,
    /// Theoretical output: four times the base energy of every generator.
    pub total_output: f64,
}

/// Point along a beam trace expressed in cell units.
///
/// Cell centres use whole numbers; obstacle faces and board edges sit on the
/// half step between two cells.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Waypoint {
    x: f64,
    y: f64,
}

impl Waypoint {
    /// Creates a waypoint from raw coordinates.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Waypoint at the centre of `cell`.
    #[must_use]
    pub fn at_cell(cell: CellCoord) -> Self {
        Self::new(f64::from(cell.column()), f64::from(cell.row()))
    }

    /// Waypoint on the face of `cell` that points along `direction`.
    #[must_use]
    pub fn edge(cell: CellCoord, direction: Direction) -> Self {
        let (dx, dy) = direction.offset();
        Self::new(
            f64::from(cell.column()) + f64::from(dx) * 0.5,
            f64::from(cell.row()) + f64::from(dy) * 0.5,
        )
    }

    /// Horizontal coordinate in cell units.
    #[must_use]
    pub const fn x(&self) -> f64 {
        self.x
    }

    /// Vertical coordinate in cell units.
    #[must_use]
    pub const fn y(&self) -> f64 {
        self.y
    }

    /// Reports whether the waypoint sits on a cell centre rather than an edge.
    #[must_use]
    pub fn is_cell_centre(&self) -> bool {
        self.x.fract() == 0.0 && self.y.fract() == 0.0
    }
}

/// Contiguous run of a beam carrying a constant energy magnitude.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EnergySegment {
    waypoints: Vec<Waypoint>,
    energy: f64,
}

impl EnergySegment {
    /// Creates a segment from its ordered waypoints and carried energy.
    #[must_use]
    pub fn new(waypoints: Vec<Waypoint>, energy: f64) -> Self {
        Self { waypoints, energy }
    }

    /// Ordered waypoints that the segment visits.
    #[must_use]
    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    /// Energy carried along the segment.
    #[must_use]
    pub const fn energy(&self) -> f64 {
        self.energy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edges_sit_half_a_step_from_the_cell() {
        let cell = CellCoord::new(2, 5);
        assert_eq!(Waypoint::edge(cell, Direction::North), Waypoint::new(2.0, 4.5));
        assert_eq!(Waypoint::edge(cell, Direction::East), Waypoint::new(2.5, 5.0));
        assert!(!Waypoint::edge(cell, Direction::West).is_cell_centre());
        assert!(Waypoint::at_cell(cell).is_cell_centre());
    }

    #[test]
    fn report_round_trips_through_bincode() {
        let report = EnergyReport {
            collected: 60.0,
            wasted: 340.0,
            max_single_waste: 100.0,
            total_output: 400.0,
        };
        let bytes = bincode::serialize(&report).expect("serialize");
        let restored: EnergyReport = bincode::deserialize(&bytes).expect("deserialize");
        assert_eq!(restored, report);
    }
}
