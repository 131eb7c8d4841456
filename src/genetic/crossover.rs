//! Constraint-aware one-point crossover for tracks.
//!
//! Two parents are cut at a random common index, then the cut is pushed
//! forward until a pair of pieces that connect is found:
//!
//! 1. Start with `c1 = c2 = start`
//! 2. Test `compatible(p1[c1], p2[c2])`; stop on a match
//! 3. Advance `c1`, test again; advance `c2`, test again; repeat
//! 4. Give up as soon as either index runs off its track
//!
//! Child 1 takes `p1[..c1]` followed by `p2[c1..]`; child 2 takes
//! `p2[..c2]` followed by `p1[c2..]`. A child is only produced when its
//! own join connects, so every child is as well formed as its parents.

use crate::tracks::{compatible, Track};
use rand::Rng;

/// Probes forward from `start` for a compatible pair across the parents.
///
/// Returns `(c1, c2)` with `compatible(p1[c1], p2[c2])`, or `None` when
/// either index runs off the end first.
///
/// # Complexity
/// O(n) in the shorter remaining tail
pub fn probe_splice(parent1: &Track, parent2: &Track, start: usize) -> Option<(usize, usize)> {
    let (a, b) = (parent1.elements(), parent2.elements());
    let (mut c1, mut c2) = (start, start);
    if c1 >= a.len() || c2 >= b.len() {
        return None;
    }

    loop {
        if compatible(&a[c1], &b[c2]) {
            return Some((c1, c2));
        }
        c1 += 1;
        if c1 >= a.len() {
            return None;
        }
        if compatible(&a[c1], &b[c2]) {
            return Some((c1, c2));
        }
        c2 += 1;
        if c2 >= b.len() {
            return None;
        }
    }
}

/// `head[..at]` followed by `tail[at..]`, if that join connects.
///
/// Returns `None` when `at` is past the end of either track or the two
/// pieces meeting at the join are incompatible.
pub fn splice(head: &Track, tail: &Track, at: usize) -> Option<Track> {
    if at > head.len() || at > tail.len() {
        return None;
    }

    let mut elements = Vec::with_capacity(tail.len());
    elements.extend_from_slice(&head.elements()[..at]);
    elements.extend_from_slice(&tail.elements()[at..]);

    if at > 0 && at < elements.len() && !compatible(&elements[at - 1], &elements[at]) {
        return None;
    }
    Some(Track::from_elements(elements))
}

/// Recombines two parents into zero, one or two children.
///
/// No children come back when either parent is empty or the probe finds no
/// compatible pair; a single child when only one join connects.
pub fn crossover<R: Rng>(parent1: &Track, parent2: &Track, rng: &mut R) -> Vec<Track> {
    let shorter = parent1.len().min(parent2.len());
    if shorter == 0 {
        return Vec::new();
    }

    let start = rng.random_range(0..shorter);
    let Some((c1, c2)) = probe_splice(parent1, parent2, start) else {
        return Vec::new();
    };

    [splice(parent1, parent2, c1), splice(parent2, parent1, c2)]
        .into_iter()
        .flatten()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::genetic::TrackBuilder;
    use crate::random::create_rng;
    use crate::tracks::{Catalog, SegmentKind};

    fn track_of(catalog: &Catalog, kinds: &[SegmentKind]) -> Track {
        Track::from_elements(kinds.iter().map(|&k| catalog.element(k).unwrap()).collect())
    }

    #[test]
    fn test_probe_immediate_match() {
        let catalog = Catalog::standard();
        let t = track_of(&catalog, &[SegmentKind::EndStation, SegmentKind::Flat]);
        assert_eq!(probe_splice(&t, &t, 0), Some((0, 0)));
    }

    #[test]
    fn test_probe_advances_first_then_second() {
        let catalog = Catalog::standard();
        // p1: climb, climb, level-off  |  p2: level, level
        let p1 = track_of(
            &catalog,
            &[SegmentKind::FlatToUp25, SegmentKind::Up25, SegmentKind::Up25ToFlat],
        );
        let p2 = track_of(&catalog, &[SegmentKind::Flat, SegmentKind::Flat]);

        // (0,0) climb->flat no; (1,0) climb->flat no; (1,1) no; (2,1) flat->flat yes
        assert_eq!(probe_splice(&p1, &p2, 0), Some((2, 1)));
    }

    #[test]
    fn test_probe_runs_off_end() {
        let catalog = Catalog::standard();
        let p1 = track_of(&catalog, &[SegmentKind::Up25, SegmentKind::Up25]);
        let p2 = track_of(&catalog, &[SegmentKind::Flat, SegmentKind::Flat]);
        assert_eq!(probe_splice(&p1, &p2, 0), None);
        assert_eq!(probe_splice(&p1, &p2, 5), None);
    }

    #[test]
    fn test_splice_positional() {
        let catalog = Catalog::standard();
        let p1 = track_of(
            &catalog,
            &[SegmentKind::EndStation, SegmentKind::Flat, SegmentKind::Flat],
        );
        let p2 = track_of(
            &catalog,
            &[
                SegmentKind::EndStation,
                SegmentKind::LeftQuarterTurn1Tile,
                SegmentKind::RightQuarterTurn1Tile,
                SegmentKind::SBendLeft,
            ],
        );

        let child = splice(&p1, &p2, 2).unwrap();
        let kinds: Vec<SegmentKind> = child.elements().iter().map(|e| e.kind()).collect();
        assert_eq!(
            kinds,
            vec![
                SegmentKind::EndStation,
                SegmentKind::Flat,
                SegmentKind::RightQuarterTurn1Tile,
                SegmentKind::SBendLeft,
            ]
        );

        // past the end of the head
        assert!(splice(&p1, &p2, 4).is_none());
    }

    #[test]
    fn test_splice_rejects_broken_join() {
        let catalog = Catalog::standard();
        let head = track_of(&catalog, &[SegmentKind::Flat, SegmentKind::Flat]);
        let tail = track_of(
            &catalog,
            &[SegmentKind::FlatToUp25, SegmentKind::Up25, SegmentKind::Up25ToFlat],
        );
        // head[0] = Flat then tail[1] = Up25: flat exit into a climbing entry
        assert!(splice(&head, &tail, 1).is_none());
        // head[..2] then tail[2..]: Flat into Up25ToFlat, also broken
        assert!(splice(&head, &tail, 2).is_none());
        // whole tail
        assert_eq!(splice(&head, &tail, 0), Some(tail.clone()));
    }

    #[test]
    fn test_children_are_well_formed() {
        let catalog = Catalog::standard();
        let builder = TrackBuilder::new(&catalog, 4, 40);
        let mut rng = create_rng(42);

        let mut produced = 0;
        for _ in 0..300 {
            let p1 = builder.build(&mut rng).unwrap();
            let p2 = builder.build(&mut rng).unwrap();
            for child in crossover(&p1, &p2, &mut rng) {
                produced += 1;
                assert!(
                    child.is_well_formed(),
                    "bad seam at {:?}",
                    child.first_incompatible()
                );
            }
        }
        assert!(produced > 0, "expected at least one child over 300 pairs");
    }

    #[test]
    fn test_empty_parent_yields_nothing() {
        let catalog = Catalog::standard();
        let t = Track::station(&catalog, 3).unwrap();
        let mut rng = create_rng(1);
        assert!(crossover(&Track::new(), &t, &mut rng).is_empty());
    }
}
