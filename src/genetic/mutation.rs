//! Insertion mutation for tracks.

use crate::tracks::{compatible, Catalog, Element, Track};
use rand::Rng;

/// Inserts new pieces between existing neighbours.
///
/// Walks the seams after the station. At each seam an insertion is
/// triggered with probability `rate`; a triggered insertion places a piece
/// `x` between `e[i]` and `e[i + 1]` only when both `compatible(e[i], x)`
/// and `compatible(x, e[i + 1])` hold, choosing uniformly among such
/// pieces. If the current seam admits none, the insertion carries over to
/// the next seam. Inserted pieces are stepped over, and the station is
/// never touched.
///
/// Returns the number of pieces inserted.
///
/// # Complexity
/// O(n · k) for a track of n pieces with at most k successors per state
pub fn insertion_mutation<R: Rng>(
    track: &mut Track,
    catalog: &Catalog,
    rate: f64,
    rng: &mut R,
) -> usize {
    let mut inserted = 0;
    let mut pending = false;
    let mut i = track.station_len().saturating_sub(1);

    while i + 1 < track.len() {
        if !pending && rng.random::<f64>() < rate {
            pending = true;
        }

        if pending {
            let before = track.elements()[i];
            let after = track.elements()[i + 1];
            let fits = |x: &&Element| compatible(x, &after);

            let options = catalog.possibilities(&before);
            let count = options.iter().filter(fits).count();
            if count > 0 {
                let pick = rng.random_range(0..count);
                if let Some(&piece) = options.iter().filter(fits).nth(pick) {
                    track.insert(i + 1, piece);
                    inserted += 1;
                    pending = false;
                    i += 2;
                    continue;
                }
            }
        }

        i += 1;
    }

    inserted
}
