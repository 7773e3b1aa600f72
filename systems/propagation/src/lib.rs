#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that walks generator beams across a board snapshot.
//!
//! Every generator emits one beam per cardinal direction. A beam walks cell by
//! cell until it is stopped by an obstacle, a foreign generator, a fully
//! absorbing collector, or the board edge. Amplifiers scale the carried
//! energy, collectors harvest a fraction of it, and whatever reaches an
//! obstacle or the edge counts as wasted.
//!
//! Aggregate accounting never depends on trace emission: the engine drives a
//! tracer alongside the walk, and callers that only need the numbers use a
//! tracer that records nothing.

mod tracer;

use energy_grid_core::{
    BoardView, CellCoord, CellKind, Direction, EnergyReport, EnergySegment, TowerKind, Waypoint,
};
use tracing::{debug, trace};

use self::tracer::{NoTrace, SegmentTracer, Tracer};

/// Destination for beam segments produced while propagating.
pub trait SegmentSink {
    /// Receives a completed segment.
    fn push_segment(&mut self, segment: EnergySegment);
}

impl SegmentSink for Vec<EnergySegment> {
    fn push_segment(&mut self, segment: EnergySegment) {
        self.push(segment);
    }
}

/// Aggregate report together with the renderable beam trace.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Propagation {
    /// Energy accounting for the run.
    pub report: EnergyReport,
    /// Segments in emission order.
    pub segments: Vec<EnergySegment>,
}

/// Stateless engine that resolves every generator beam on a board.
#[derive(Clone, Copy, Debug, Default)]
pub struct PropagationEngine;

impl PropagationEngine {
    /// Creates a new propagation engine.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Resolves every beam and collects both the report and the trace.
    #[must_use]
    pub fn simulate(&self, board: &BoardView<'_>) -> Propagation {
        let mut segments = Vec::new();
        let report = self.simulate_into(board, &mut segments);
        Propagation { report, segments }
    }

    /// Resolves every beam, streaming segments into `sink`.
    pub fn simulate_into<S>(&self, board: &BoardView<'_>, sink: &mut S) -> EnergyReport
    where
        S: SegmentSink + ?Sized,
    {
        let mut tracer = SegmentTracer::new(sink);
        run(board, &mut tracer)
    }

    /// Resolves every beam without producing a trace.
    #[must_use]
    pub fn totals(&self, board: &BoardView<'_>) -> EnergyReport {
        run(board, &mut NoTrace)
    }
}

/// Energy accounting for a single beam.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct BeamOutcome {
    collected: f64,
    wasted: f64,
    max_single_waste: f64,
}

impl BeamOutcome {
    fn waste(&mut self, energy: f64) {
        self.wasted += energy;
        self.max_single_waste = self.max_single_waste.max(energy);
    }
}

fn run<T>(board: &BoardView<'_>, tracer: &mut T) -> EnergyReport
where
    T: Tracer,
{
    let mut report = EnergyReport::default();

    for generator in board.generators() {
        let origin = generator.cell();
        let base = generator.base_energy();
        report.total_output += base * 4.0;

        for direction in Direction::EMISSION_ORDER {
            let beam = walk_beam(board, origin, direction, base, tracer);
            trace!(
                %origin,
                ?direction,
                collected = beam.collected,
                wasted = beam.wasted,
                "beam resolved"
            );
            report.collected += beam.collected;
            report.wasted += beam.wasted;
            report.max_single_waste = report.max_single_waste.max(beam.max_single_waste);
        }
    }

    debug!(
        collected = report.collected,
        wasted = report.wasted,
        max_single_waste = report.max_single_waste,
        total_output = report.total_output,
        "propagation complete"
    );
    report
}

fn walk_beam<T>(
    board: &BoardView<'_>,
    origin: CellCoord,
    direction: Direction,
    mut energy: f64,
    tracer: &mut T,
) -> BeamOutcome
where
    T: Tracer,
{
    let mut outcome = BeamOutcome::default();
    let size = board.size();
    let mut previous = origin;
    tracer.begin(Waypoint::at_cell(origin));

    loop {
        let Some(slot) = previous
            .step(direction, size)
            .and_then(|cell| board.cell(cell))
        else {
            tracer.close(Waypoint::edge(previous, direction), energy);
            outcome.waste(energy);
            return outcome;
        };

        let cell = slot.cell();
        let here = Waypoint::at_cell(cell);
        match slot.kind() {
            CellKind::Obstacle => {
                tracer.close(Waypoint::edge(previous, direction), energy);
                outcome.waste(energy);
                return outcome;
            }
            CellKind::Empty => tracer.pass(here),
            CellKind::Tower(TowerKind::Amplifier) => {
                tracer.split(here, energy);
                energy *= slot.amplifier_multiplier();
            }
            CellKind::Tower(TowerKind::Collector) => {
                let efficiency = slot.collector_efficiency();
                outcome.collected += energy * efficiency;
                if efficiency >= 1.0 {
                    tracer.close(here, energy);
                    return outcome;
                }
                tracer.split(here, energy);
                energy *= 1.0 - efficiency;
            }
            CellKind::Tower(TowerKind::Generator) => {
                tracer.close(here, energy);
                return outcome;
            }
        }

        previous = cell;
    }
}
