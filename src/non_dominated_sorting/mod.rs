mod dominator;

pub use dominator::{Ranking, constrained_dominates, dominates, fast_non_dominated_sorting};
