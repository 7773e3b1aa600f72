use energy_grid_core::{CellCoord, Command, TowerCell, TowerKind};
use energy_grid_system_builder::{ActionPoints, Builder, BuilderInput};
use energy_grid_world::{self as world, query, Board};

fn board_with_obstacle(obstacle: CellCoord) -> Board {
    Board::with_obstacles(4, [obstacle]).expect("valid board")
}

fn run(builder: &mut Builder, board: &mut Board, input: BuilderInput) -> Vec<Command> {
    let mut commands = Vec::new();
    builder.handle(input, |cell| query::cell(board, cell), &mut commands);
    let mut events = Vec::new();
    for command in &commands {
        world::apply(board, *command, &mut events);
    }
    commands
}

fn place_at(cell: CellCoord) -> BuilderInput {
    BuilderInput {
        place_action: true,
        cursor_cell: Some(cell),
        ..BuilderInput::default()
    }
}

#[test]
fn place_emits_command_for_selected_kind() {
    let mut builder = Builder::default();
    let mut board = board_with_obstacle(CellCoord::new(3, 3));

    let commands = run(
        &mut builder,
        &mut board,
        BuilderInput {
            select: Some(TowerKind::Amplifier),
            ..place_at(CellCoord::new(1, 1))
        },
    );

    assert_eq!(
        commands,
        vec![Command::PlaceTower {
            kind: TowerKind::Amplifier,
            cell: CellCoord::new(1, 1),
        }],
        "builder should place the freshly selected tower kind",
    );
    assert_eq!(builder.selected(), TowerKind::Amplifier);
    assert_eq!(builder.action_points().remaining(), 19);
}

#[test]
fn place_ignored_on_obstacles_and_occupied_cells() {
    let obstacle = CellCoord::new(0, 0);
    let mut builder = Builder::default();
    let mut board = board_with_obstacle(obstacle);

    assert!(run(&mut builder, &mut board, place_at(obstacle)).is_empty());

    let occupied = CellCoord::new(2, 2);
    assert_eq!(run(&mut builder, &mut board, place_at(occupied)).len(), 1);
    assert!(
        run(&mut builder, &mut board, place_at(occupied)).is_empty(),
        "placement only targets empty cells",
    );
    assert_eq!(builder.action_points().remaining(), 19);
}

#[test]
fn place_ignored_outside_the_board() {
    let mut builder = Builder::default();
    let mut board = board_with_obstacle(CellCoord::new(0, 0));
    assert!(run(&mut builder, &mut board, place_at(CellCoord::new(9, 9))).is_empty());
}

#[test]
fn remove_targets_towers_only() {
    let mut builder = Builder::default();
    let obstacle = CellCoord::new(0, 0);
    let mut board = board_with_obstacle(obstacle);
    let tower = CellCoord::new(2, 1);
    let _ = run(&mut builder, &mut board, place_at(tower));

    let remove = |cell| BuilderInput {
        remove_action: true,
        cursor_cell: Some(cell),
        ..BuilderInput::default()
    };

    assert!(run(&mut builder, &mut board, remove(obstacle)).is_empty());
    assert!(run(&mut builder, &mut board, remove(CellCoord::new(3, 3))).is_empty());
    assert_eq!(
        run(&mut builder, &mut board, remove(tower)),
        vec![Command::RemoveTower { cell: tower }],
    );
    assert!(query::cell(&board, tower).is_some_and(|slot| slot.is_empty()));
}

#[test]
fn upgrade_skips_towers_at_the_level_ceiling() {
    let mut builder = Builder::default();
    let mut board = board_with_obstacle(CellCoord::new(0, 0));
    let tower = CellCoord::new(1, 2);
    let _ = run(&mut builder, &mut board, place_at(tower));

    let upgrade = BuilderInput {
        upgrade_action: true,
        cursor_cell: Some(tower),
        ..BuilderInput::default()
    };
    let mut emitted = 0;
    for _ in 0..8 {
        emitted += run(&mut builder, &mut board, upgrade).len();
    }

    assert_eq!(emitted, 4, "levels one through five need four upgrades");
    let level = query::cell(&board, tower).map(|slot| slot.level().get());
    assert_eq!(level, Some(5));
    assert_eq!(builder.action_points().remaining(), 15);
}

#[test]
fn exhausted_budget_blocks_every_action() {
    let mut builder = Builder::new(ActionPoints::new(1));
    let mut board = board_with_obstacle(CellCoord::new(0, 0));

    let placed = run(&mut builder, &mut board, place_at(CellCoord::new(1, 1)));
    assert_eq!(placed.len(), 1);
    assert!(builder.action_points().is_exhausted());
    assert!(run(&mut builder, &mut board, place_at(CellCoord::new(2, 2))).is_empty());

    let remove = BuilderInput {
        remove_action: true,
        cursor_cell: Some(CellCoord::new(1, 1)),
        ..BuilderInput::default()
    };
    assert!(run(&mut builder, &mut board, remove).is_empty());
}

#[test]
fn selection_without_cursor_only_changes_the_kind() {
    let mut builder = Builder::default();
    let mut commands = Vec::new();
    builder.handle(
        BuilderInput {
            select: Some(TowerKind::Collector),
            place_action: true,
            ..BuilderInput::default()
        },
        |_| -> Option<TowerCell> { None },
        &mut commands,
    );

    assert!(commands.is_empty());
    assert_eq!(builder.selected(), TowerKind::Collector);
    assert_eq!(builder.action_points().remaining(), 20);
}
