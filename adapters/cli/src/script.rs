//! Parsing of the player actions supplied on the command line.

use anyhow::{anyhow, Context, Result};
use energy_grid_core::{CellCoord, TowerKind};
use energy_grid_system_builder::BuilderInput;

/// Single scripted player action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Action {
    Place { kind: TowerKind, cell: CellCoord },
    Upgrade { cell: CellCoord },
    Remove { cell: CellCoord },
}

impl Action {
    /// Cell targeted by the action.
    pub(crate) const fn cell(self) -> CellCoord {
        match self {
            Self::Place { cell, .. } | Self::Upgrade { cell } | Self::Remove { cell } => cell,
        }
    }

    /// Builder input that reproduces the action as a single frame.
    pub(crate) fn input(self) -> BuilderInput {
        let mut input = BuilderInput {
            cursor_cell: Some(self.cell()),
            ..BuilderInput::default()
        };
        match self {
            Self::Place { kind, .. } => {
                input.select = Some(kind);
                input.place_action = true;
            }
            Self::Upgrade { .. } => input.upgrade_action = true,
            Self::Remove { .. } => input.remove_action = true,
        }
        input
    }
}

/// Parses `KIND@X,Y`, where the kind is a tower symbol or name.
pub(crate) fn parse_placement(value: &str) -> Result<Action> {
    let (kind, cell) = value
        .split_once('@')
        .ok_or_else(|| anyhow!("expected KIND@X,Y, got `{value}`"))?;
    let kind = kind
        .parse::<TowerKind>()
        .with_context(|| format!("invalid tower in `{value}`"))?;
    let cell = parse_cell(cell)?;
    Ok(Action::Place { kind, cell })
}

/// Parses an upgrade target written as `X,Y`.
pub(crate) fn parse_upgrade(value: &str) -> Result<Action> {
    parse_cell(value).map(|cell| Action::Upgrade { cell })
}

/// Parses a removal target written as `X,Y`.
pub(crate) fn parse_removal(value: &str) -> Result<Action> {
    parse_cell(value).map(|cell| Action::Remove { cell })
}

fn parse_cell(value: &str) -> Result<CellCoord> {
    let (column, row) = value
        .split_once(',')
        .ok_or_else(|| anyhow!("expected X,Y, got `{value}`"))?;
    let column = column
        .trim()
        .parse::<u32>()
        .with_context(|| format!("invalid column in `{value}`"))?;
    let row = row
        .trim()
        .parse::<u32>()
        .with_context(|| format!("invalid row in `{value}`"))?;
    Ok(CellCoord::new(column, row))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placement_accepts_symbols_and_names() {
        assert_eq!(
            parse_placement("G@3,4").expect("valid placement"),
            Action::Place {
                kind: TowerKind::Generator,
                cell: CellCoord::new(3, 4),
            }
        );
        assert_eq!(
            parse_placement("collector@0, 7").expect("valid placement"),
            Action::Place {
                kind: TowerKind::Collector,
                cell: CellCoord::new(0, 7),
            }
        );
    }

    #[test]
    fn placement_rejects_unknown_towers() {
        let error = parse_placement("X@1,1").expect_err("unknown symbol");
        assert!(format!("{error:#}").contains("invalid tower type"));
        assert!(parse_placement("G1,1").is_err());
    }

    #[test]
    fn cells_need_two_unsigned_coordinates() {
        assert!(parse_upgrade("3").is_err());
        assert!(parse_upgrade("-1,2").is_err());
        assert_eq!(
            parse_removal("2,5").expect("valid cell"),
            Action::Remove {
                cell: CellCoord::new(2, 5),
            }
        );
    }

    #[test]
    fn actions_become_single_frame_inputs() {
        let input = Action::Place {
            kind: TowerKind::Amplifier,
            cell: CellCoord::new(1, 2),
        }
        .input();
        assert_eq!(input.select, Some(TowerKind::Amplifier));
        assert!(input.place_action && !input.remove_action && !input.upgrade_action);
        assert_eq!(input.cursor_cell, Some(CellCoord::new(1, 2)));

        let input = Action::Upgrade {
            cell: CellCoord::new(0, 0),
        }
        .input();
        assert!(input.upgrade_action);
        assert_eq!(input.select, None);
    }
}
