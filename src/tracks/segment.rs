//! Track-piece types and their connection attributes.

/// Vertical angle of the rails where a piece begins or ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Degree {
    /// Level track.
    Flat,
    /// Climbing at 25°.
    Up25,
    /// Climbing at 60°.
    Up60,
    /// Descending at 25°.
    Down25,
    /// Descending at 60°.
    Down60,
}

impl Degree {
    /// All variants, in index order.
    pub const ALL: [Degree; 5] = [
        Degree::Flat,
        Degree::Up25,
        Degree::Up60,
        Degree::Down25,
        Degree::Down60,
    ];

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

/// Roll of the rails where a piece begins or ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Bank {
    /// No banking.
    None,
    /// Banked to the left.
    Left,
    /// Banked to the right.
    Right,
}

impl Bank {
    /// All variants, in index order.
    pub const ALL: [Bank; 3] = [Bank::None, Bank::Left, Bank::Right];

    pub(crate) fn index(self) -> usize {
        self as usize
    }
}

/// How a piece changes the heading of the train.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DirectionDelta {
    /// Heading unchanged (includes S-bends, which shift sideways).
    Straight,
    /// Quarter turn to the left.
    Left90,
    /// Quarter turn to the right.
    Right90,
    /// Eighth turn to the left, between the orthogonal and diagonal grids.
    DiagonalLeft,
    /// Eighth turn to the right, between the orthogonal and diagonal grids.
    DiagonalRight,
}

impl DirectionDelta {
    /// Whether this is one of the eighth-turn variants.
    pub fn is_diagonal(self) -> bool {
        matches!(self, DirectionDelta::DiagonalLeft | DirectionDelta::DiagonalRight)
    }
}

/// Which grid a piece is laid on.
///
/// Straight diagonal pieces have a [`DirectionDelta::Straight`] heading but
/// still only connect to other diagonal pieces, so the grid is carried as
/// its own attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Grid {
    /// Aligned with the map axes.
    Orthogonal,
    /// Laid at 45° to the map axes.
    Diagonal,
}

/// Stable catalog key for every known piece type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[allow(missing_docs)]
pub enum SegmentKind {
    Flat,
    EndStation,
    BeginStation,
    MiddleStation,
    Up25,
    Up60,
    FlatToUp25,
    Up25ToUp60,
    Up60ToUp25,
    Up25ToFlat,
    Down25,
    Down60,
    FlatToDown25,
    Down25ToDown60,
    Down60ToDown25,
    Down25ToFlat,
    LeftQuarterTurn5Tiles,
    RightQuarterTurn5Tiles,
    FlatToLeftBank,
    FlatToRightBank,
    LeftBankToFlat,
    RightBankToFlat,
    BankedLeftQuarterTurn5Tiles,
    BankedRightQuarterTurn5Tiles,
    LeftBankToUp25,
    RightBankToUp25,
    Up25ToLeftBank,
    Up25ToRightBank,
    LeftBankToDown25,
    RightBankToDown25,
    Down25ToLeftBank,
    Down25ToRightBank,
    LeftBank,
    RightBank,
    LeftQuarterTurn5TilesUp25,
    RightQuarterTurn5TilesUp25,
    LeftQuarterTurn5TilesDown25,
    RightQuarterTurn5TilesDown25,
    SBendLeft,
    SBendRight,
    LeftQuarterTurn3Tiles,
    RightQuarterTurn3Tiles,
    LeftBankedQuarterTurn3Tiles,
    RightBankedQuarterTurn3Tiles,
    LeftQuarterTurn3TilesUp25,
    RightQuarterTurn3TilesUp25,
    LeftQuarterTurn3TilesDown25,
    RightQuarterTurn3TilesDown25,
    LeftQuarterTurn1Tile,
    RightQuarterTurn1Tile,
    LeftEighthToDiag,
    RightEighthToDiag,
    LeftEighthToOrthogonal,
    RightEighthToOrthogonal,
    LeftEighthBankToDiag,
    RightEighthBankToDiag,
    LeftEighthBankToOrthogonal,
    RightEighthBankToOrthogonal,
    DiagFlat,
    DiagUp25,
    DiagFlatToUp25,
    DiagUp25ToFlat,
    DiagDown25,
    DiagFlatToDown25,
    DiagDown25ToFlat,
}

/// A catalog entry: one piece type and how it connects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Segment {
    /// Catalog key.
    pub kind: SegmentKind,
    /// Element code used by the ride file format.
    pub type_code: u8,
    /// Rail angle on entry.
    pub input_degree: Degree,
    /// Rail angle on exit.
    pub output_degree: Degree,
    /// Banking on entry.
    pub starting_bank: Bank,
    /// Banking on exit.
    pub ending_bank: Bank,
    /// Heading change.
    pub direction_delta: DirectionDelta,
    /// Height gained (negative when descending) across the piece.
    pub elevation_delta: i8,
    /// Grid the piece is laid on.
    pub grid: Grid,
}

impl Segment {
    /// Whether a chain lift can be mounted on this piece.
    ///
    /// Only unbanked pieces that enter climbing at 25° and leave climbing at
    /// 25° or level qualify.
    pub fn is_chain_lift_eligible(&self) -> bool {
        self.input_degree == Degree::Up25
            && matches!(self.output_degree, Degree::Up25 | Degree::Flat)
            && self.starting_bank == Bank::None
            && self.ending_bank == Bank::None
    }

    /// Whether the piece only lives on, or leads onto, the diagonal grid.
    pub fn is_diagonal(&self) -> bool {
        self.direction_delta.is_diagonal() || self.grid == Grid::Diagonal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain(kind: SegmentKind, input: Degree, output: Degree) -> Segment {
        Segment {
            kind,
            type_code: 0,
            input_degree: input,
            output_degree: output,
            starting_bank: Bank::None,
            ending_bank: Bank::None,
            direction_delta: DirectionDelta::Straight,
            elevation_delta: 0,
            grid: Grid::Orthogonal,
        }
    }

    #[test]
    fn test_chain_lift_eligibility() {
        assert!(plain(SegmentKind::Up25, Degree::Up25, Degree::Up25).is_chain_lift_eligible());
        assert!(
            plain(SegmentKind::Up25ToFlat, Degree::Up25, Degree::Flat).is_chain_lift_eligible()
        );
        assert!(
            !plain(SegmentKind::Up25ToUp60, Degree::Up25, Degree::Up60).is_chain_lift_eligible()
        );
        assert!(
            !plain(SegmentKind::FlatToUp25, Degree::Flat, Degree::Up25).is_chain_lift_eligible()
        );

        let mut banked = plain(SegmentKind::Up25ToLeftBank, Degree::Up25, Degree::Flat);
        banked.ending_bank = Bank::Left;
        assert!(!banked.is_chain_lift_eligible());
    }

    #[test]
    fn test_diagonal_by_heading_or_grid() {
        let mut s = plain(SegmentKind::LeftEighthToDiag, Degree::Flat, Degree::Flat);
        s.direction_delta = DirectionDelta::DiagonalLeft;
        assert!(s.is_diagonal());

        let mut d = plain(SegmentKind::DiagFlat, Degree::Flat, Degree::Flat);
        d.grid = Grid::Diagonal;
        assert!(d.is_diagonal());

        assert!(!plain(SegmentKind::Flat, Degree::Flat, Degree::Flat).is_diagonal());
    }

    #[test]
    fn test_index_matches_all_order() {
        for (i, d) in Degree::ALL.iter().enumerate() {
            assert_eq!(d.index(), i);
        }
        for (i, b) in Bank::ALL.iter().enumerate() {
            assert_eq!(b.index(), i);
        }
    }
}
