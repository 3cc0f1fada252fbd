#![warn(missing_docs)]

//! # `tarteeb`
//!
//! The arrangement engine behind a grid word-matching puzzle: players
//! rearrange shuffled word fragments on a grid until they match a hidden
//! target layout.
//!
//! Begin by describing a stage with a [`StageBuilder`] and converting it to a
//! [`Stage`]; its [`shuffled_start`](Stage::shuffled_start) produces a
//! shuffled-but-solvable starting [`Arrangement`] the player then swaps cells
//! of. To score a finished stage, ask a [`SolveCache`] (backed by
//! [`SwapSolver`]) for the provably minimal number of swaps between the
//! starting and target sequences. When the player spends a hint, the
//! [`reveal_random_cell`] and [`reveal_random_category`] operations
//! auto-correct part of the board without ever disturbing cells that are
//! already right.
//!
//! This crate renders nothing, persists nothing and knows nothing about
//! screens; it operates purely on position → value mappings supplied by the
//! surrounding game.
//!
//! # Internals
//! Starting arrangements come from a Sattolo-style shuffle re-checked for
//! positional fixed points, so duplicated fragments still never start on
//! their own cell. The minimal swap count is found with A* over the graph of
//! value sequences connected by single swaps, using the admissible
//! "mismatches divided by two" heuristic; results are memoized in a bounded
//! LRU cache guarded by a single lock, with a per-call deadline so a cold
//! solve never blocks the caller indefinitely. Hints swap needed values in
//! from elsewhere on the board, skipping cells whose value has already been
//! consumed by earlier correct placements.
//!
//! Every random choice draws from a caller-supplied [`rand::Rng`], so a
//! seeded generator reproduces a whole session.

pub use builder::{LayoutInvalidReason, StageBuilder};
pub use cache::{SolveCache, DEFAULT_CACHE_CAPACITY};
pub use grid::{Arrangement, CellPosition, Dimension, FixedPositions, ValueSequence};
pub use reveal::{reveal_random_cell, reveal_random_category};
pub use shuffle::derange;
pub use solver::{minimum_swaps, SolveError, SwapSolver};
pub use stage::Stage;

pub(crate) mod builder;
pub(crate) mod cache;
pub(crate) mod grid;
pub(crate) mod reveal;
pub(crate) mod shuffle;
pub(crate) mod solver;
pub(crate) mod stage;
