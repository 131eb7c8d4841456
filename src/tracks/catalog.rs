//! The immutable table of known pieces.
//!
//! A [`Catalog`] is built once and then shared by reference. Besides key
//! lookup it precomputes, for every exit state (angle × bank), the list of
//! elements that may follow, so [`Catalog::possibilities`] is a slice
//! lookup instead of a scan.

use std::collections::HashMap;

use super::element::Element;
use super::segment::{Bank, Degree, DirectionDelta, Grid, Segment, SegmentKind};
use crate::error::{EvolveError, Result};

use Bank::{Left as L, None as N, Right as R};
use Degree::{Down25 as D25, Down60 as D60, Flat as F, Up25 as U25, Up60 as U60};
use DirectionDelta::{
    DiagonalLeft as DL, DiagonalRight as DR, Left90 as TL, Right90 as TR, Straight as S,
};
use Grid::{Diagonal as Dg, Orthogonal as Or};

#[allow(clippy::too_many_arguments)]
const fn seg(
    kind: SegmentKind,
    type_code: u8,
    input_degree: Degree,
    output_degree: Degree,
    starting_bank: Bank,
    ending_bank: Bank,
    direction_delta: DirectionDelta,
    elevation_delta: i8,
    grid: Grid,
) -> Segment {
    Segment {
        kind,
        type_code,
        input_degree,
        output_degree,
        starting_bank,
        ending_bank,
        direction_delta,
        elevation_delta,
        grid,
    }
}

/// The standard piece set, in definition order.
#[rustfmt::skip]
pub const STANDARD_SEGMENTS: &[Segment] = &[
    seg(SegmentKind::Flat,                         0x00, F,   F,   N, N, S,  0,  Or),
    seg(SegmentKind::EndStation,                   0x01, F,   F,   N, N, S,  0,  Or),
    seg(SegmentKind::BeginStation,                 0x02, F,   F,   N, N, S,  0,  Or),
    seg(SegmentKind::MiddleStation,                0x03, F,   F,   N, N, S,  0,  Or),
    seg(SegmentKind::Up25,                         0x04, U25, U25, N, N, S,  2,  Or),
    seg(SegmentKind::Up60,                         0x05, U60, U60, N, N, S,  8,  Or),
    seg(SegmentKind::FlatToUp25,                   0x06, F,   U25, N, N, S,  1,  Or),
    seg(SegmentKind::Up25ToUp60,                   0x07, U25, U60, N, N, S,  4,  Or),
    seg(SegmentKind::Up60ToUp25,                   0x08, U60, U25, N, N, S,  4,  Or),
    seg(SegmentKind::Up25ToFlat,                   0x09, U25, F,   N, N, S,  1,  Or),
    seg(SegmentKind::Down25,                       0x0A, D25, D25, N, N, S,  -2, Or),
    seg(SegmentKind::Down60,                       0x0B, D60, D60, N, N, S,  -8, Or),
    seg(SegmentKind::FlatToDown25,                 0x0C, F,   D25, N, N, S,  -1, Or),
    seg(SegmentKind::Down25ToDown60,               0x0D, D25, D60, N, N, S,  -4, Or),
    seg(SegmentKind::Down60ToDown25,               0x0E, D60, D25, N, N, S,  -4, Or),
    seg(SegmentKind::Down25ToFlat,                 0x0F, D25, F,   N, N, S,  -1, Or),
    seg(SegmentKind::LeftQuarterTurn5Tiles,        0x10, F,   F,   N, N, TL, 0,  Or),
    seg(SegmentKind::RightQuarterTurn5Tiles,       0x11, F,   F,   N, N, TR, 0,  Or),
    seg(SegmentKind::FlatToLeftBank,               0x12, F,   F,   N, L, S,  0,  Or),
    seg(SegmentKind::FlatToRightBank,              0x13, F,   F,   N, R, S,  0,  Or),
    seg(SegmentKind::LeftBankToFlat,               0x14, F,   F,   L, N, S,  0,  Or),
    seg(SegmentKind::RightBankToFlat,              0x15, F,   F,   R, N, S,  0,  Or),
    seg(SegmentKind::BankedLeftQuarterTurn5Tiles,  0x16, F,   F,   L, L, TL, 0,  Or),
    seg(SegmentKind::BankedRightQuarterTurn5Tiles, 0x17, F,   F,   R, R, TR, 0,  Or),
    seg(SegmentKind::LeftBankToUp25,               0x18, F,   U25, L, N, S,  1,  Or),
    seg(SegmentKind::RightBankToUp25,              0x19, F,   U25, R, N, S,  1,  Or),
    seg(SegmentKind::Up25ToLeftBank,               0x1A, U25, F,   N, L, S,  1,  Or),
    seg(SegmentKind::Up25ToRightBank,              0x1B, U25, F,   N, R, S,  1,  Or),
    seg(SegmentKind::LeftBankToDown25,             0x1C, F,   D25, L, N, S,  -1, Or),
    seg(SegmentKind::RightBankToDown25,            0x1D, F,   D25, R, N, S,  -1, Or),
    seg(SegmentKind::Down25ToLeftBank,             0x1E, D25, F,   N, L, S,  -1, Or),
    seg(SegmentKind::Down25ToRightBank,            0x1F, D25, F,   N, R, S,  -1, Or),
    seg(SegmentKind::LeftBank,                     0x20, F,   F,   L, L, S,  0,  Or),
    seg(SegmentKind::RightBank,                    0x21, F,   F,   R, R, S,  0,  Or),
    seg(SegmentKind::LeftQuarterTurn5TilesUp25,    0x22, U25, U25, N, N, TL, 8,  Or),
    seg(SegmentKind::RightQuarterTurn5TilesUp25,   0x23, U25, U25, N, N, TR, 8,  Or),
    seg(SegmentKind::LeftQuarterTurn5TilesDown25,  0x24, D25, D25, N, N, TL, -8, Or),
    seg(SegmentKind::RightQuarterTurn5TilesDown25, 0x25, D25, D25, N, N, TR, -8, Or),
    seg(SegmentKind::SBendLeft,                    0x26, F,   F,   N, N, S,  0,  Or),
    seg(SegmentKind::SBendRight,                   0x27, F,   F,   N, N, S,  0,  Or),
    seg(SegmentKind::LeftQuarterTurn3Tiles,        0x2A, F,   F,   N, N, TL, 0,  Or),
    seg(SegmentKind::RightQuarterTurn3Tiles,       0x2B, F,   F,   N, N, TR, 0,  Or),
    seg(SegmentKind::LeftBankedQuarterTurn3Tiles,  0x2C, F,   F,   L, L, TL, 0,  Or),
    seg(SegmentKind::RightBankedQuarterTurn3Tiles, 0x2D, F,   F,   R, R, TR, 0,  Or),
    seg(SegmentKind::LeftQuarterTurn3TilesUp25,    0x2E, U25, U25, N, N, TL, 4,  Or),
    seg(SegmentKind::RightQuarterTurn3TilesUp25,   0x2F, U25, U25, N, N, TR, 4,  Or),
    seg(SegmentKind::LeftQuarterTurn3TilesDown25,  0x30, D25, D25, N, N, TL, -4, Or),
    seg(SegmentKind::RightQuarterTurn3TilesDown25, 0x31, D25, D25, N, N, TR, -4, Or),
    seg(SegmentKind::LeftQuarterTurn1Tile,         0x32, F,   F,   N, N, TL, 0,  Or),
    seg(SegmentKind::RightQuarterTurn1Tile,        0x33, F,   F,   N, N, TR, 0,  Or),
    seg(SegmentKind::LeftEighthToDiag,             0x85, F,   F,   N, N, DL, 0,  Or),
    seg(SegmentKind::RightEighthToDiag,            0x86, F,   F,   N, N, DR, 0,  Or),
    seg(SegmentKind::LeftEighthToOrthogonal,       0x87, F,   F,   N, N, DL, 0,  Dg),
    seg(SegmentKind::RightEighthToOrthogonal,      0x88, F,   F,   N, N, DR, 0,  Dg),
    seg(SegmentKind::LeftEighthBankToDiag,         0x89, F,   F,   L, L, DL, 0,  Or),
    seg(SegmentKind::RightEighthBankToDiag,        0x8A, F,   F,   R, R, DR, 0,  Or),
    seg(SegmentKind::LeftEighthBankToOrthogonal,   0x8B, F,   F,   L, L, DL, 0,  Dg),
    seg(SegmentKind::RightEighthBankToOrthogonal,  0x8C, F,   F,   R, R, DR, 0,  Dg),
    seg(SegmentKind::DiagFlat,                     0x8D, F,   F,   N, N, S,  0,  Dg),
    seg(SegmentKind::DiagUp25,                     0x8E, U25, U25, N, N, S,  2,  Dg),
    seg(SegmentKind::DiagFlatToUp25,               0x90, F,   U25, N, N, S,  1,  Dg),
    seg(SegmentKind::DiagUp25ToFlat,               0x93, U25, F,   N, N, S,  1,  Dg),
    seg(SegmentKind::DiagDown25,                   0x94, D25, D25, N, N, S,  -2, Dg),
    seg(SegmentKind::DiagFlatToDown25,             0x96, F,   D25, N, N, S,  -1, Dg),
    seg(SegmentKind::DiagDown25ToFlat,             0x99, D25, F,   N, N, S,  -1, Dg),
];

const STATES: usize = Degree::ALL.len() * Bank::ALL.len();

fn state_index(degree: Degree, bank: Bank) -> usize {
    degree.index() * Bank::ALL.len() + bank.index()
}

/// Immutable piece table addressed by [`SegmentKind`].
#[derive(Debug, Clone)]
pub struct Catalog {
    segments: Vec<Segment>,
    by_kind: HashMap<SegmentKind, usize>,
    successors: Vec<Vec<Element>>,
}

impl Catalog {
    /// Builds a catalog from segments in definition order.
    ///
    /// # Errors
    /// [`EvolveError::DuplicateSegment`] if a key appears twice.
    pub fn new(segments: Vec<Segment>) -> Result<Self> {
        let mut by_kind = HashMap::with_capacity(segments.len());
        for (i, s) in segments.iter().enumerate() {
            if by_kind.insert(s.kind, i).is_some() {
                return Err(EvolveError::DuplicateSegment(s.kind));
            }
        }

        let successors = Self::successor_table(&segments);
        Ok(Self {
            segments,
            by_kind,
            successors,
        })
    }

    /// The standard piece set.
    pub fn standard() -> Self {
        let segments = STANDARD_SEGMENTS.to_vec();
        let by_kind = segments.iter().enumerate().map(|(i, s)| (s.kind, i)).collect();
        let successors = Self::successor_table(&segments);
        Self {
            segments,
            by_kind,
            successors,
        }
    }

    fn successor_table(segments: &[Segment]) -> Vec<Vec<Element>> {
        let mut successors = vec![Vec::new(); STATES];
        for s in segments {
            let list = &mut successors[state_index(s.input_degree, s.starting_bank)];
            list.push(Element::new(*s));
            if s.is_chain_lift_eligible() {
                list.push(Element {
                    segment: *s,
                    chain_lift: true,
                });
            }
        }
        successors
    }

    /// Number of piece types.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Whether the catalog has no pieces.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// All pieces in definition order.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Looks up a piece by key.
    ///
    /// # Errors
    /// [`EvolveError::UnknownSegment`] if the key is not in the catalog.
    pub fn segment(&self, kind: SegmentKind) -> Result<&Segment> {
        self.by_kind
            .get(&kind)
            .map(|&i| &self.segments[i])
            .ok_or(EvolveError::UnknownSegment(kind))
    }

    /// A chain-free placement of the piece with the given key.
    pub fn element(&self, kind: SegmentKind) -> Result<Element> {
        self.segment(kind).map(|s| Element::new(*s))
    }

    /// Every element that may legally follow `element`.
    ///
    /// Each matching piece appears once without a chain lift and, when
    /// eligible, once more with one. Diagonal pieces have no successors.
    /// Order follows catalog definition order.
    pub fn possibilities(&self, element: &Element) -> &[Element] {
        if element.is_diagonal() {
            return &[];
        }
        let s = &element.segment;
        &self.successors[state_index(s.output_degree, s.ending_bank)]
    }
}
