//! Placed pieces and the adjacency rule.

use super::segment::{Segment, SegmentKind};
use crate::error::{EvolveError, Result};

/// One placement of a [`Segment`] in a track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Element {
    /// The piece type.
    pub segment: Segment,
    /// Whether this placement carries a chain lift.
    pub chain_lift: bool,
}

impl Element {
    /// Places a piece without a chain lift.
    pub fn new(segment: Segment) -> Self {
        Self {
            segment,
            chain_lift: false,
        }
    }

    /// Places a piece with a chain lift.
    ///
    /// # Errors
    /// [`EvolveError::IneligibleChainLift`] if the piece cannot carry one.
    pub fn with_chain_lift(segment: Segment) -> Result<Self> {
        if !segment.is_chain_lift_eligible() {
            return Err(EvolveError::IneligibleChainLift(segment.kind));
        }
        Ok(Self {
            segment,
            chain_lift: true,
        })
    }

    /// Catalog key of the underlying piece.
    pub fn kind(&self) -> SegmentKind {
        self.segment.kind
    }

    /// Diagonal pieces do not generate successors.
    pub fn is_diagonal(&self) -> bool {
        self.segment.is_diagonal()
    }
}

/// Whether `second` may directly follow `first`.
///
/// Only the exit angle/bank of `first` and the entry angle/bank of `second`
/// take part; chain lifts and piece identity are irrelevant.
pub fn compatible(first: &Element, second: &Element) -> bool {
    first.segment.output_degree == second.segment.input_degree
        && first.segment.ending_bank == second.segment.starting_bank
}
