//! NSGA-II engine for search-based generation of test suites.
//!
//! Candidate test suites are evolved toward several competing objectives (for
//! instance coverage and length) through non-dominated ranking, crowding-distance
//! diversity preservation, optional periodic local search and fitness inheritance.
//! Runs are reproducible for a fixed seed.

pub mod algorithms;
pub mod callback;
pub mod genetic;
pub mod helpers;
pub mod non_dominated_sorting;
pub mod operators;
pub mod problem;
pub mod random;
pub mod termination;
