//! Track pieces and the rules for joining them.
//!
//! - [`Segment`]: a catalog entry (entry/exit angle and banking, heading
//!   change, height change)
//! - [`Catalog`]: the immutable piece table with precomputed successors
//! - [`Element`]: a placed piece with an optional chain lift
//! - [`compatible`]: the single adjacency rule used everywhere
//! - [`Track`]: an element sequence, with the closed-circuit check

mod catalog;
mod element;
mod segment;
mod track;

pub use catalog::{Catalog, STANDARD_SEGMENTS};
pub use element::{compatible, Element};
pub use segment::{Bank, Degree, DirectionDelta, Grid, Segment, SegmentKind};
pub use track::Track;
