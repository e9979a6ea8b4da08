//! CLI command implementations.
//!
//! - `regions` - list the named regions of a drawing
//! - `lookup`  - locate a single point
//! - `map`     - locate a whole file of points
//! - `center`  - print a region's center
//! - `inspect` - structural report of the source SVG

pub mod common;
pub mod inspect;
pub mod queries;

pub use inspect::cmd_inspect;
pub use queries::{cmd_center, cmd_lookup, cmd_map, cmd_regions};
