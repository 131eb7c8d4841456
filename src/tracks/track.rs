//! Ordered piece sequences and the closed-circuit check.

use super::catalog::Catalog;
use super::element::{compatible, Element};
use super::segment::SegmentKind;
use crate::error::{EvolveError, Result};

/// A ride layout: elements in travel order, starting at the station.
///
/// A track is *well formed* when every adjacent pair is [`compatible`]
/// and every chain lift sits on a piece that can carry one.
/// Operations in this crate only ever produce well-formed tracks; use
/// [`Track::try_from_elements`] to bring outside data in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Track {
    elements: Vec<Element>,
}

impl Track {
    /// An empty track.
    pub fn new() -> Self {
        Self::default()
    }

    /// A bare station of `length` pieces.
    ///
    /// The first piece is the end station the train departs from; longer
    /// stations are padded with middle pieces and closed by a begin piece.
    pub fn station(catalog: &Catalog, length: usize) -> Result<Self> {
        let mut elements = Vec::with_capacity(length);
        if length >= 1 {
            elements.push(catalog.element(SegmentKind::EndStation)?);
        }
        if length >= 2 {
            let middle = catalog.element(SegmentKind::MiddleStation)?;
            elements.extend(std::iter::repeat(middle).take(length - 2));
            elements.push(catalog.element(SegmentKind::BeginStation)?);
        }
        Ok(Self { elements })
    }

    /// Wraps elements without checking adjacency.
    pub fn from_elements(elements: Vec<Element>) -> Self {
        Self { elements }
    }

    /// Wraps elements, rejecting anything [`Track::validate`] rejects.
    ///
    /// # Errors
    /// See [`Track::validate`].
    pub fn try_from_elements(elements: Vec<Element>) -> Result<Self> {
        let track = Self { elements };
        track.validate()?;
        Ok(track)
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Whether the track has no elements.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Elements in travel order.
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Consumes the track, returning its elements.
    pub fn into_elements(self) -> Vec<Element> {
        self.elements
    }

    /// Element 0, the piece riders board at.
    pub fn first(&self) -> Option<&Element> {
        self.elements.first()
    }

    /// The final element.
    pub fn last(&self) -> Option<&Element> {
        self.elements.last()
    }

    /// Appends an element without checking the new seam.
    pub fn push(&mut self, element: Element) {
        self.elements.push(element);
    }

    /// Removes and returns the final element.
    pub fn pop(&mut self) -> Option<Element> {
        self.elements.pop()
    }

    pub(crate) fn insert(&mut self, index: usize, element: Element) {
        self.elements.insert(index, element);
    }

    /// Index `i` of the first pair `(i, i + 1)` that does not connect.
    pub fn first_incompatible(&self) -> Option<usize> {
        self.elements
            .windows(2)
            .position(|pair| !compatible(&pair[0], &pair[1]))
    }

    /// Index of the first element carrying a chain lift its piece cannot hold.
    pub fn first_invalid_lift(&self) -> Option<usize> {
        self.elements
            .iter()
            .position(|e| e.chain_lift && !e.segment.is_chain_lift_eligible())
    }

    /// Checks every seam and every chain lift.
    ///
    /// # Errors
    /// - [`EvolveError::IncompatibleSeam`] naming the first bad pair
    /// - [`EvolveError::IneligibleChainLift`] for the first illegal lift
    pub fn validate(&self) -> Result<()> {
        if let Some(index) = self.first_incompatible() {
            return Err(EvolveError::IncompatibleSeam { index });
        }
        if let Some(index) = self.first_invalid_lift() {
            return Err(EvolveError::IneligibleChainLift(self.elements[index].kind()));
        }
        Ok(())
    }

    /// Whether every adjacent pair connects and every chain lift is legal.
    pub fn is_well_formed(&self) -> bool {
        self.validate().is_ok()
    }

    /// Length of the boarding station at the front of the track.
    ///
    /// Matches the scaffold [`Track::station`] lays down: an end station,
    /// any middle pieces, then at most one begin station. Station pieces
    /// placed after that are ordinary track. A one-piece scaffold followed
    /// by middle or begin pieces cannot be told apart from a longer one.
    pub fn station_len(&self) -> usize {
        let mut kinds = self.elements.iter().map(Element::kind).peekable();
        if kinds.next_if_eq(&SegmentKind::EndStation).is_none() {
            return 0;
        }
        let mut len = 1;
        while kinds.next_if_eq(&SegmentKind::MiddleStation).is_some() {
            len += 1;
        }
        if kinds.next_if_eq(&SegmentKind::BeginStation).is_some() {
            len += 1;
        }
        len
    }

    /// Whether the track closes back onto its station.
    ///
    /// Needs at least two pieces past the station; the final piece must
    /// then hand over to element 0 in a compatible state.
    pub fn is_circuit(&self) -> bool {
        let (Some(station), Some(last)) = (self.elements.first(), self.elements.last()) else {
            return false;
        };
        if self.elements.len() < self.station_len() + 2 {
            return false;
        }
        compatible(last, station)
    }

    /// Running height after each element, starting from zero.
    pub fn elevation_profile(&self) -> Vec<i32> {
        self.elements
            .iter()
            .scan(0i32, |height, e| {
                *height += i32::from(e.segment.elevation_delta);
                Some(*height)
            })
            .collect()
    }

    /// Number of elements carrying a chain lift.
    pub fn chain_lift_count(&self) -> usize {
        self.elements.iter().filter(|e| e.chain_lift).count()
    }
}
