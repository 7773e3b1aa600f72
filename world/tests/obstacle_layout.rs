use energy_grid_core::{CellCoord, Command, Event, PlacementError, TowerKind};
use energy_grid_world::{self as world, query, Board, BoardConfig};
use proptest::prelude::*;

fn assert_independent(board: &Board) -> Result<(), TestCaseError> {
    let obstacles = query::obstacles(board);
    for &cell in &obstacles {
        for neighbor in cell.neighbors(board.size()) {
            let touching = board
                .get_cell(neighbor)
                .is_some_and(|slot| slot.is_obstacle());
            prop_assert!(
                !touching,
                "obstacles {} and {} share an edge",
                cell,
                neighbor
            );
        }
    }
    Ok(())
}

proptest! {
    #[test]
    fn generated_obstacles_never_touch(
        seed in any::<u64>(),
        size in 1u32..12,
        requested in 0usize..40,
    ) {
        let config = BoardConfig::new(size, requested).expect("positive size");
        let board = Board::seeded(config, seed);
        assert_independent(&board)?;

        let placed = query::obstacles(&board).len();
        prop_assert!(placed <= requested);
        prop_assert!(query::towers(&board).is_empty());
    }

    #[test]
    fn layouts_are_reproducible_per_seed(seed in any::<u64>()) {
        let config = BoardConfig::default();
        let first = Board::seeded(config, seed);
        let second = Board::seeded(config, seed);
        prop_assert_eq!(query::obstacles(&first), query::obstacles(&second));
    }
}

#[test]
fn reference_board_reaches_ten_obstacles() {
    for seed in 0..32 {
        let board = Board::seeded(BoardConfig::default(), seed);
        assert_eq!(
            query::obstacles(&board).len(),
            10,
            "seed {seed} should fit ten obstacles on an 8x8 board"
        );
    }
}

#[test]
fn obstacle_cells_survive_commands() {
    let board = Board::seeded(BoardConfig::default(), 99);
    let obstacle = query::obstacles(&board)[0];
    let mut board = board;
    let mut events = Vec::new();

    world::apply(
        &mut board,
        Command::PlaceTower {
            kind: TowerKind::Generator,
            cell: obstacle,
        },
        &mut events,
    );
    world::apply(&mut board, Command::RemoveTower { cell: obstacle }, &mut events);
    world::apply(&mut board, Command::UpgradeTower { cell: obstacle }, &mut events);

    assert_eq!(
        events,
        vec![Event::TowerPlacementRejected {
            cell: obstacle,
            kind: TowerKind::Generator,
            reason: PlacementError::Obstacle,
        }]
    );
    assert_eq!(board.remove_tower(obstacle), None);
    assert_eq!(board.upgrade(obstacle), None);
    assert!(board
        .get_cell(obstacle)
        .is_some_and(|slot| slot.is_obstacle()));
    assert!(board.get_cell(CellCoord::new(8, 0)).is_none());
}
