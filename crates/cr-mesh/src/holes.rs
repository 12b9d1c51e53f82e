//! Outer-triangle and hole erasure by constraint-crossing depth.
//!
//! Depth of a triangle = the minimum number of constraint edges crossed on a
//! walk from outside the convex hull. Depth 1 is inside the outer boundary
//! and outside every inner loop; only those triangles are kept. Deeper
//! triangles lie inside an obstacle, including where obstacles overlap or
//! nest (depth 3 and up).

use std::collections::{HashMap, HashSet, VecDeque};

type EdgeKey = (usize, usize);

fn key(a: usize, b: usize) -> EdgeKey {
    if a < b { (a, b) } else { (b, a) }
}

fn tri_edges(tri: &[usize; 3]) -> [EdgeKey; 3] {
    [key(tri[0], tri[1]), key(tri[1], tri[2]), key(tri[2], tri[0])]
}

/// Keep the triangles at constraint depth 1, preserving input order.
pub(crate) fn erase_outer_and_holes(
    triangles: &[[usize; 3]],
    constraints: &[[usize; 2]],
) -> Vec<[usize; 3]> {
    let constraint_set: HashSet<EdgeKey> = constraints.iter().map(|&[a, b]| key(a, b)).collect();

    let mut edge_tris: HashMap<EdgeKey, Vec<usize>> = HashMap::new();
    for (t, tri) in triangles.iter().enumerate() {
        for edge in tri_edges(tri) {
            edge_tris.entry(edge).or_default().push(t);
        }
    }

    // 0-1 BFS: crossing a constraint costs 1, any other shared edge costs 0.
    let mut depth: Vec<u32> = vec![u32::MAX; triangles.len()];
    let mut queue: VecDeque<usize> = VecDeque::new();

    for (edge, tris) in &edge_tris {
        if let [t] = tris.as_slice() {
            let d = u32::from(constraint_set.contains(edge));
            if d < depth[*t] {
                depth[*t] = d;
                if d == 0 {
                    queue.push_front(*t);
                } else {
                    queue.push_back(*t);
                }
            }
        }
    }

    while let Some(t) = queue.pop_front() {
        let d = depth[t];
        for edge in tri_edges(&triangles[t]) {
            let step = u32::from(constraint_set.contains(&edge));
            let Some(neighbors) = edge_tris.get(&edge) else {
                continue;
            };
            for &n in neighbors {
                if n == t {
                    continue;
                }
                let nd = d + step;
                if nd < depth[n] {
                    depth[n] = nd;
                    if step == 0 {
                        queue.push_front(n);
                    } else {
                        queue.push_back(n);
                    }
                }
            }
        }
    }

    triangles
        .iter()
        .zip(&depth)
        .filter(|&(_, &d)| d == 1)
        .map(|(tri, _)| *tri)
        .collect()
}
