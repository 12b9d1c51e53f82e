//! Detail routing: turn a coarse node path into concrete track points.
//!
//! Each interior node stands for a triangle edge (its provenance). That edge
//! is divided into `n` evenly spaced candidates, and the walk from the path
//! head greedily takes the candidate nearest the previous point. This is a
//! nearest-neighbour chain, not a global optimum over all candidate choices.

use cr_core::{Point, Real};
use cr_graph::MidpointProvenance;

use crate::error::{RouteError, RouteResult};

/// The `n` interior points splitting `a`-`b` into `n + 1` equal parts.
///
/// `n = 1` reproduces `Point::midpoint` exactly.
pub fn division_points(a: Point, b: Point, n: usize) -> impl Iterator<Item = Point> {
    let parts = (n + 1) as Real;
    (1..=n).map(move |k| a.lerp(b, k as Real / parts))
}

/// Refine a coarse path with `n` candidates per interior node.
///
/// The first and last points are kept as-is and the result has the same
/// length as `path`.
pub fn refine(provenance: &MidpointProvenance, path: &[Point], n: usize) -> RouteResult<Vec<Point>> {
    if n == 0 {
        return Err(RouteError::InvalidArg {
            what: "divisions must be at least 1",
        });
    }
    let [first, interior @ .., last] = path else {
        return Ok(path.to_vec());
    };

    let mut refined = Vec::with_capacity(path.len());
    refined.push(*first);
    let mut head = *first;
    for &node in interior {
        let (a, b) = provenance
            .get(node)
            .ok_or(RouteError::ProvenanceMissing { point: node })?;
        let next = division_points(a, b, n)
            .min_by(|p, q| head.distance(*p).total_cmp(&head.distance(*q)))
            .ok_or(RouteError::InvalidArg {
                what: "empty candidate set",
            })?;
        refined.push(next);
        head = next;
    }
    refined.push(*last);
    Ok(refined)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn refine_preserves_length_and_endpoints(
            segs in prop::collection::vec((-50i16..50, -50i16..50, -50i16..50, -50i16..50), 0..10),
            n in 1usize..6,
        ) {
            let mut prov = MidpointProvenance::new();
            let mut path = vec![Point::new(-100.0, -100.0)];
            for &(ax, ay, bx, by) in &segs {
                let a = Point::new(f64::from(ax), f64::from(ay));
                let b = Point::new(f64::from(bx), f64::from(by));
                prov.record(a.midpoint(b), a, b);
                path.push(a.midpoint(b));
            }
            path.push(Point::new(100.0, 100.0));

            let refined = refine(&prov, &path, n).unwrap();
            prop_assert_eq!(refined.len(), path.len());
            prop_assert_eq!(refined.first(), path.first());
            prop_assert_eq!(refined.last(), path.last());
        }
    }
}
