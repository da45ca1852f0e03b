//! Settlement planning: greedy largest-magnitude matching with an exact
//! partition search for small groups.

mod exact;
mod greedy;
pub mod optimizer;
pub mod plan;
