//! Plain-text presentation of the board and the energy accounting.

use std::fmt::Write as _;

use energy_grid_core::{BoardView, CellCoord, CellKind, EnergySegment};
use energy_grid_system_scoring::ScoreBreakdown;

/// Draws the board one row per line: `.` empty, `#` obstacle, and towers as
/// their symbol followed by the level.
pub(crate) fn draw_board(view: &BoardView<'_>) -> String {
    let mut out = String::new();
    for row in 0..view.size() {
        let line: Vec<String> = (0..view.size())
            .map(|column| {
                view.cell(CellCoord::new(column, row))
                    .map_or_else(String::new, |slot| match slot.kind() {
                        CellKind::Empty => String::from(". "),
                        CellKind::Obstacle => String::from("# "),
                        CellKind::Tower(kind) => format!("{}{}", kind.symbol(), slot.level()),
                    })
            })
            .collect();
        out.push_str(line.join(" ").trim_end());
        out.push('\n');
    }
    out
}

/// Summarises the accounting and score of a run.
pub(crate) fn summary(
    breakdown: &ScoreBreakdown,
    max_single_waste: f64,
    total_output: f64,
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "total output     {total_output:>10.1}");
    let _ = writeln!(out, "collected        {:>10.1}", breakdown.collected);
    let _ = writeln!(out, "wasted           {:>10.1}", breakdown.wasted);
    let _ = writeln!(out, "max single waste {max_single_waste:>10.1}");
    let _ = writeln!(out, "waste penalty    {:>10.1}", breakdown.penalty);
    let _ = writeln!(out, "score            {:>10.1}", breakdown.final_score);
    out
}

/// Lists beam segments as waypoint paths with their carried energy.
pub(crate) fn segments(segments: &[EnergySegment]) -> String {
    let mut out = String::new();
    for segment in segments {
        let path: Vec<String> = segment
            .waypoints()
            .iter()
            .map(|point| format!("({}, {})", point.x(), point.y()))
            .collect();
        let _ = writeln!(out, "{:>8.1}  {}", segment.energy(), path.join(" -> "));
    }
    out
}
