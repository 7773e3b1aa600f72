//! Observers that turn beam walks into renderable segments.

use energy_grid_core::{EnergySegment, Waypoint};

use crate::SegmentSink;

/// Receives the waypoints a beam visits while it is walked.
pub(crate) trait Tracer {
    /// Starts a new beam at its generator.
    fn begin(&mut self, origin: Waypoint);

    /// Records a waypoint without changing the carried energy.
    fn pass(&mut self, at: Waypoint);

    /// Records `at`, closes the open segment with the energy carried so far and
    /// opens a new segment starting at `at`.
    fn split(&mut self, at: Waypoint, energy: f64);

    /// Records the final waypoint and closes the beam.
    fn close(&mut self, at: Waypoint, energy: f64);
}

/// Tracer used when only aggregate numbers are needed.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct NoTrace;

impl Tracer for NoTrace {
    fn begin(&mut self, _origin: Waypoint) {}

    fn pass(&mut self, _at: Waypoint) {}

    fn split(&mut self, _at: Waypoint, _energy: f64) {}

    fn close(&mut self, _at: Waypoint, _energy: f64) {}
}

/// Tracer that emits an [`EnergySegment`] whenever the carried energy changes.
pub(crate) struct SegmentTracer<'s, S: ?Sized> {
    sink: &'s mut S,
    open: Vec<Waypoint>,
}

impl<'s, S> SegmentTracer<'s, S>
where
    S: SegmentSink + ?Sized,
{
    pub(crate) fn new(sink: &'s mut S) -> Self {
        Self {
            sink,
            open: Vec::new(),
        }
    }

    fn emit(&mut self, energy: f64) {
        let waypoints = std::mem::take(&mut self.open);
        self.sink.push_segment(EnergySegment::new(waypoints, energy));
    }
}

impl<S> Tracer for SegmentTracer<'_, S>
where
    S: SegmentSink + ?Sized,
{
    fn begin(&mut self, origin: Waypoint) {
        self.open.clear();
        self.open.push(origin);
    }

    fn pass(&mut self, at: Waypoint) {
        self.open.push(at);
    }

    fn split(&mut self, at: Waypoint, energy: f64) {
        self.open.push(at);
        self.emit(energy);
        self.open.push(at);
    }

    fn close(&mut self, at: Waypoint, energy: f64) {
        self.open.push(at);
        self.emit(energy);
    }
}
