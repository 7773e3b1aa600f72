//! One-time obstacle layout performed while a board is constructed.

use energy_grid_core::CellCoord;
use rand::{seq::SliceRandom, Rng};

use crate::Board;

/// Scatters up to `target` obstacles across `board`, returning how many were
/// placed.
///
/// Every coordinate is visited once in shuffled order. A candidate becomes an
/// obstacle only when it is empty and none of its orthogonal neighbours is
/// already an obstacle, so the layout never contains two touching obstacles.
/// Dense targets on small boards may therefore end short of `target`.
pub(crate) fn scatter<R>(board: &mut Board, target: usize, rng: &mut R) -> usize
where
    R: Rng + ?Sized,
{
    let size = board.size;
    let mut candidates: Vec<CellCoord> = (0..size)
        .flat_map(|column| (0..size).map(move |row| CellCoord::new(column, row)))
        .collect();
    candidates.shuffle(rng);

    let mut placed = 0;
    for cell in candidates {
        if placed >= target {
            break;
        }

        if board.touches_obstacle(cell) {
            continue;
        }

        let Some(slot) = board.cell_mut(cell) else {
            continue;
        };
        if !slot.is_empty() {
            continue;
        }

        slot.set_obstacle();
        placed += 1;
    }

    placed
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn open_board(size: u32) -> Board {
        Board::with_obstacles(size, std::iter::empty()).expect("valid board")
    }

    #[test]
    fn places_requested_count_when_space_allows() {
        let mut board = open_board(8);
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        assert_eq!(scatter(&mut board, 10, &mut rng), 10);
    }

    #[test]
    fn stops_short_when_adjacency_exhausts_candidates() {
        let mut board = open_board(3);
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let placed = scatter(&mut board, 9, &mut rng);

        // A 3x3 grid holds at most five mutually non-adjacent cells.
        assert!(placed < 9);
        assert!(placed <= 5);
        assert!(placed >= 2);
    }

    #[test]
    fn single_cell_board_holds_one_obstacle() {
        let mut board = open_board(1);
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert_eq!(scatter(&mut board, 4, &mut rng), 1);
        assert!(board
            .get_cell(CellCoord::new(0, 0))
            .is_some_and(|slot| slot.is_obstacle()));
    }

    #[test]
    fn zero_target_leaves_board_untouched() {
        let mut board = open_board(4);
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        assert_eq!(scatter(&mut board, 0, &mut rng), 0);
        assert!(board.view().iter().all(|slot| slot.is_empty()));
    }
}
