use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};

use itertools::Itertools;
use thiserror::Error;

/// Reasons a [`SwapSolver`] may reject its input.
///
/// Both variants indicate a contract violation by the caller: the solver is
/// defined only for sequences that are permutations of each other as
/// multisets, which well-formed level content guarantees. Failing fast here
/// surfaces a data-authoring bug instead of returning a misleading count.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum SolveError {
    /// The two sequences differ in length.
    #[error("sequences differ in length ({shuffled} shuffled vs {target} target)")]
    LengthMismatch {
        /// Length of the shuffled sequence.
        shuffled: usize,
        /// Length of the target sequence.
        target: usize,
    },
    /// The two sequences do not contain the same multiset of values.
    #[error("shuffled and target sequences are not permutations of the same multiset")]
    MultisetMismatch,
}

// values are interned to small ids before searching; equal fragments share an
// id, so duplicate tolerance falls out of plain id equality
type ValueId = u16;

/// A node in the swap search space: a candidate sequence reached after some
/// number of swaps, with the path cost so far and the heuristic estimate of
/// swaps remaining.
#[derive(Clone, Eq, PartialEq)]
struct SearchState {
    cells: Vec<ValueId>,
    cost: usize,
    estimate: usize,
    seq: u64,
}

impl SearchState {
    #[inline]
    fn priority(&self) -> usize {
        self.cost + self.estimate
    }
}

impl Ord for SearchState {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap; invert so the lowest cost + estimate pops
        // first, with ties broken FIFO by insertion order for determinism
        other
            .priority()
            .cmp(&self.priority())
            .then(other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for SearchState {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Computes the minimum number of pairwise swaps (of any two positions, not
/// just adjacent ones) transforming a shuffled value sequence into a target
/// sequence, tolerating duplicate values.
///
/// Use [`SwapSolver::new`] to validate the pair and [`SwapSolver::solve`] to
/// run the search, or the [`minimum_swaps`] shorthand for both.
///
/// # Search setup
/// The problem is shortest-path search over a graph whose nodes are reachable
/// value sequences and whose edges are single pairwise swaps of cost 1,
/// explored with A*:
///
/// - the heuristic is the count of mismatched positions divided by two,
///   rounded up — one swap fixes at most two positions at once, so this never
///   overestimates and A*'s optimality argument holds;
/// - successors swap two positions that are both mismatched and hold
///   different values; swapping correct positions or equal values never
///   reduces the remaining cost and is pruned to keep the branching factor
///   tractable;
/// - sequences already expanded are never expanded again via a different swap
///   order.
///
/// Duplicate values make several permutations satisfy the goal test at once,
/// which the heuristic exploits by collapsing equivalent paths; this is what
/// keeps the search fast on the 12–20 movable cells a stage actually has.
pub struct SwapSolver {
    start: Vec<ValueId>,
    goal: Vec<ValueId>,
}

impl SwapSolver {
    /// Validate `shuffled` against `target` and build a solver for the pair.
    ///
    /// Returns a [`SolveError`] if the sequences differ in length or are not
    /// permutations of the same multiset; a solution cannot exist for such
    /// input and the solver treats it as a level-content bug.
    pub fn new(shuffled: &[String], target: &[String]) -> Result<Self, SolveError> {
        if shuffled.len() != target.len() {
            return Err(SolveError::LengthMismatch {
                shuffled: shuffled.len(),
                target: target.len(),
            });
        }

        let mut ids: HashMap<&str, ValueId> = HashMap::with_capacity(target.len());
        let mut start = Vec::with_capacity(shuffled.len());
        for value in shuffled {
            let next = ids.len() as ValueId;
            start.push(*ids.entry(value.as_str()).or_insert(next));
        }
        let mut goal = Vec::with_capacity(target.len());
        for value in target {
            let next = ids.len() as ValueId;
            goal.push(*ids.entry(value.as_str()).or_insert(next));
        }

        let mut counts: HashMap<ValueId, isize> = HashMap::with_capacity(ids.len());
        for id in &start {
            *counts.entry(*id).or_default() += 1;
        }
        for id in &goal {
            *counts.entry(*id).or_default() -= 1;
        }
        if counts.values().any(|count| *count != 0) {
            return Err(SolveError::MultisetMismatch);
        }

        Ok(Self { start, goal })
    }

    #[inline]
    fn mismatches(&self, cells: &[ValueId]) -> usize {
        cells.iter().zip(&self.goal).filter(|(c, g)| c != g).count()
    }

    // admissible: a single swap fixes at most two mismatched positions
    #[inline]
    fn estimate(&self, cells: &[ValueId]) -> usize {
        self.mismatches(cells).div_ceil(2)
    }

    /// Run the search and return the minimum swap count.
    ///
    /// A valid permutation pair always has a solution, bounded by one less
    /// than the sequence length, so this never fails; callers needing a
    /// wall-clock bound impose it externally via
    /// [`SolveCache::solve_cached`](crate::SolveCache::solve_cached).
    pub fn solve(&self) -> usize {
        let mut open = BinaryHeap::new();
        let mut closed: HashSet<Vec<ValueId>> = HashSet::new();
        let mut seq = 0u64;
        let mut expanded = 0usize;

        open.push(SearchState {
            cells: self.start.clone(),
            cost: 0,
            estimate: self.estimate(&self.start),
            seq,
        });

        while let Some(state) = open.pop() {
            if state.cells == self.goal {
                tracing::debug!(swaps = state.cost, expanded, "swap search reached target");
                return state.cost;
            }
            if !closed.insert(state.cells.clone()) {
                continue;
            }
            expanded += 1;

            let wrong = (0..state.cells.len())
                .filter(|&at| state.cells[at] != self.goal[at])
                .collect_vec();
            for pair in wrong.iter().copied().combinations(2) {
                let (i, j) = (pair[0], pair[1]);
                if state.cells[i] == state.cells[j] {
                    continue;
                }
                let mut cells = state.cells.clone();
                cells.swap(i, j);
                if closed.contains(&cells) {
                    continue;
                }
                seq += 1;
                let estimate = self.estimate(&cells);
                open.push(SearchState {
                    cells,
                    cost: state.cost + 1,
                    estimate,
                    seq,
                });
            }
        }

        // every validated pair reaches the goal; the open set cannot drain first
        unreachable!("exhausted swap search on a validated permutation pair")
    }
}

/// Validate and solve in one call; see [`SwapSolver`].
pub fn minimum_swaps(shuffled: &[String], target: &[String]) -> Result<usize, SolveError> {
    Ok(SwapSolver::new(shuffled, target)?.solve())
}
