use std::collections::HashSet;

use itertools::Itertools;
use rand::Rng;

use crate::grid::{Arrangement, CellPosition};

// both reveal modes share one invariant: a cell that already matches its
// target is never chosen as a destination or as a donor, so hints can only
// add correct cells, never remove them

fn incorrect_positions(current: &Arrangement, target: &Arrangement) -> Vec<CellPosition> {
    target
        .positions()
        .filter(|&position| !current.matches_at(target, position))
        .sorted()
        .collect_vec()
}

/// Find another not-yet-correct cell currently holding the value `position`
/// wants, searching the whole board in reading order.
///
/// Returns [`None`] when the needed value only sits in cells that are already
/// correct, which legitimately happens after earlier hints consumed it.
fn donor_for(
    current: &Arrangement,
    target: &Arrangement,
    position: CellPosition,
) -> Option<CellPosition> {
    let wanted = target.values_at(position)?;
    current
        .positions()
        .sorted()
        .find(|&other| {
            other != position
                && !current.matches_at(target, other)
                && current.values_at(other) == Some(wanted)
        })
}

/// Auto-correct one cell of `current` as a paid hint.
///
/// Picks a not-yet-correct position uniformly at random, finds another
/// not-yet-correct cell holding the value it needs, and swaps the two in
/// place. Returns the positions that newly became correct as a result —
/// usually one, two when the displaced value happens to land on its own
/// target, and none when the board is already solved or no donor cell exists.
///
/// Cells already matching the target are never disturbed.
pub fn reveal_random_cell<R: Rng + ?Sized>(
    current: &mut Arrangement,
    target: &Arrangement,
    rng: &mut R,
) -> Vec<CellPosition> {
    let wrong = incorrect_positions(current, target);
    if wrong.is_empty() {
        return Vec::new();
    }

    let chosen = wrong[rng.random_range(0..wrong.len())];
    let Some(donor) = donor_for(current, target, chosen) else {
        tracing::debug!(%chosen, "no donor cell holds the revealed value");
        return Vec::new();
    };

    current.swap(chosen, donor);
    [chosen, donor]
        .into_iter()
        .filter(|&position| current.matches_at(target, position))
        .collect()
}

/// Auto-correct one category of cells of `current` as a paid hint.
///
/// `categories` is the layout's fixed partition of positions into logical
/// groups (grid columns, sub-rows and the like). One category still
/// containing an incorrect position is picked uniformly at random, then
/// corrected in passes over its positions in reading order: each still-wrong
/// cell is swapped with a donor found anywhere on the board, and passes
/// repeat until the category is fully correct or a pass makes no progress —
/// cells whose value is locked inside already-correct cells are skipped
/// without error, so the call always terminates.
///
/// Returns every position that became correct during the call, excluding any
/// that were correct before it; cells already matching the target are never
/// disturbed.
pub fn reveal_random_category<R: Rng + ?Sized>(
    current: &mut Arrangement,
    target: &Arrangement,
    categories: &[Vec<CellPosition>],
    rng: &mut R,
) -> Vec<CellPosition> {
    let correct_before: HashSet<CellPosition> = target
        .positions()
        .filter(|&position| current.matches_at(target, position))
        .collect();

    let unsolved = categories
        .iter()
        .enumerate()
        .filter(|(_, positions)| {
            positions
                .iter()
                .any(|&position| !current.matches_at(target, position))
        })
        .map(|(at, _)| at)
        .collect_vec();
    if unsolved.is_empty() {
        return Vec::new();
    }

    let chosen = unsolved[rng.random_range(0..unsolved.len())];
    let ordered = categories[chosen].iter().copied().sorted().collect_vec();

    loop {
        let mut progressed = false;
        for &position in &ordered {
            if current.matches_at(target, position) {
                continue;
            }
            if let Some(donor) = donor_for(current, target, position) {
                current.swap(position, donor);
                progressed = true;
            }
        }
        if !progressed {
            break;
        }
        if ordered
            .iter()
            .all(|&position| current.matches_at(target, position))
        {
            break;
        }
    }

    let revealed = target
        .positions()
        .filter(|&position| {
            current.matches_at(target, position) && !correct_before.contains(&position)
        })
        .sorted()
        .collect_vec();
    tracing::debug!(category = chosen, revealed = revealed.len(), "category reveal finished");
    revealed
}
