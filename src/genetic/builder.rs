//! Random construction of initial tracks.

use crate::error::{EvolveError, Result};
use crate::tracks::{Catalog, Track};
use log::debug;
use rand::Rng;

/// Grows tracks from a station by repeated random legal extension.
///
/// Each step draws uniformly from [`Catalog::possibilities`] of the last
/// piece. On a dead end (no legal successor) the builder removes the last
/// non-station piece and tries again; after `backtrack_limit` such steps it
/// abandons the attempt and starts over from a bare station, up to
/// `attempts` times.
#[derive(Debug, Clone)]
pub struct TrackBuilder<'a> {
    catalog: &'a Catalog,
    station_length: usize,
    track_length: usize,
    attempts: usize,
    backtrack_limit: usize,
}

impl<'a> TrackBuilder<'a> {
    /// A builder for tracks of `track_length` pieces, the first
    /// `station_length` of which form the station.
    pub fn new(catalog: &'a Catalog, station_length: usize, track_length: usize) -> Self {
        Self {
            catalog,
            station_length,
            track_length,
            attempts: 100,
            backtrack_limit: 32,
        }
    }

    /// Sets the attempt and backtrack budgets.
    pub fn with_limits(mut self, attempts: usize, backtrack_limit: usize) -> Self {
        self.attempts = attempts;
        self.backtrack_limit = backtrack_limit;
        self
    }

    /// Builds one well-formed track.
    ///
    /// # Errors
    /// [`EvolveError::BuildExhausted`] if every attempt hit a dead end it
    /// could not back out of.
    pub fn build<R: Rng>(&self, rng: &mut R) -> Result<Track> {
        for attempt in 0..self.attempts {
            if let Some(track) = self.try_build(rng)? {
                return Ok(track);
            }
            debug!("track build attempt {} abandoned", attempt + 1);
        }
        Err(EvolveError::BuildExhausted {
            attempts: self.attempts,
        })
    }

    fn try_build<R: Rng>(&self, rng: &mut R) -> Result<Option<Track>> {
        let mut track = Track::station(self.catalog, self.station_length)?;
        let mut backtracks = 0;

        while track.len() < self.track_length {
            let options = match track.last() {
                Some(last) => self.catalog.possibilities(last),
                None => return Ok(None),
            };

            if options.is_empty() {
                if track.len() <= self.station_length || backtracks >= self.backtrack_limit {
                    return Ok(None);
                }
                track.pop();
                backtracks += 1;
                continue;
            }

            track.push(options[rng.random_range(0..options.len())]);
        }

        Ok(Some(track))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;
    use crate::tracks::{Bank, Degree, DirectionDelta, Grid, Segment, SegmentKind};

    #[test]
    fn test_builds_well_formed_tracks() {
        let catalog = Catalog::standard();
        let builder = TrackBuilder::new(&catalog, 10, 50);
        let mut rng = create_rng(42);

        for _ in 0..50 {
            let track = builder.build(&mut rng).unwrap();
            assert_eq!(track.len(), 50);
            assert!(track.station_len() >= 10);
            assert!(track.is_well_formed(), "bad seam at {:?}", track.first_incompatible());
        }
    }

    #[test]
    fn test_station_only() {
        let catalog = Catalog::standard();
        let builder = TrackBuilder::new(&catalog, 5, 5);
        let track = builder.build(&mut create_rng(1)).unwrap();
        assert_eq!(track, Track::station(&catalog, 5).unwrap());
    }

    #[test]
    fn test_same_seed_same_track() {
        let catalog = Catalog::standard();
        let builder = TrackBuilder::new(&catalog, 3, 30);
        let a = builder.build(&mut create_rng(9)).unwrap();
        let b = builder.build(&mut create_rng(9)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_dead_end_catalog_exhausts() {
        // Every step has an even chance of landing on a piece with no
        // successors, far more often than two backtracks can repair.
        let station = |kind| Segment {
            kind,
            type_code: 1,
            input_degree: Degree::Flat,
            output_degree: Degree::Flat,
            starting_bank: Bank::None,
            ending_bank: Bank::None,
            direction_delta: DirectionDelta::Straight,
            elevation_delta: 0,
            grid: Grid::Orthogonal,
        };
        let mut to_diag = station(SegmentKind::LeftEighthToDiag);
        to_diag.direction_delta = DirectionDelta::DiagonalLeft;
        let catalog = Catalog::new(vec![
            station(SegmentKind::EndStation),
            to_diag,
        ])
        .unwrap();

        let builder = TrackBuilder::new(&catalog, 1, 400).with_limits(3, 2);
        let result = builder.build(&mut create_rng(5));
        assert_eq!(result, Err(EvolveError::BuildExhausted { attempts: 3 }));
    }
}
