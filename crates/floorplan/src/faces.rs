//! Bounded faces of a planar straight-line graph.
//!
//! Input is a coordinate array plus undirected edges as index pairs; output is
//! one counterclockwise vertex-index cycle per bounded face.
//!
//! Method
//! - Drop self-loops, duplicate and out-of-range edges.
//! - Prune filaments: repeatedly remove edges at degree-1 vertices (a dead-end
//!   wall bounds no room).
//! - Build twin half-edges, sort each vertex's outgoing half-edges by angle,
//!   and link `next(u→v)` to the outgoing edge at `v` that comes clockwise
//!   right after `v→u`. Walking `next` keeps the face on the left, so bounded
//!   faces come out counterclockwise (positive area) and the outer boundary of
//!   every component clockwise.
//! - A face walk that revisits a vertex (bridges between components) is cut
//!   into simple loops; only positive-area loops are reported.
//!
//! The graph is assumed planar: crossings are expected to be real vertices,
//! which the intersection resolver guarantees for wall graphs.

use std::collections::{BTreeSet, HashMap};

use crate::geometry::cfg::AREA_EPS;
use crate::geometry::{polygon_signed_area, Point};

/// Minimal inner cycles (bounded faces) of the graph `(points, edges)`.
pub fn inner_cycles(points: &[Point], edges: &[(usize, usize)]) -> Vec<Vec<usize>> {
    let edges = prune_filaments(points.len(), unique_edges(points.len(), edges));
    if edges.len() < 3 {
        return Vec::new();
    }

    // half-edge 2k is u→v of edge k, 2k+1 is v→u; twin(h) = h ^ 1
    let origin = |h: usize| {
        let (u, v) = edges[h / 2];
        if h % 2 == 0 {
            u
        } else {
            v
        }
    };
    let target = |h: usize| origin(h ^ 1);
    let m = edges.len() * 2;

    let mut outgoing: Vec<Vec<usize>> = vec![Vec::new(); points.len()];
    for h in 0..m {
        outgoing[origin(h)].push(h);
    }
    let angle = |h: usize| {
        let d = points[target(h)] - points[origin(h)];
        d.y.atan2(d.x)
    };
    for list in &mut outgoing {
        list.sort_by(|&a, &b| {
            angle(a)
                .partial_cmp(&angle(b))
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(target(a).cmp(&target(b)))
        });
    }
    let mut slot: HashMap<usize, usize> = HashMap::with_capacity(m);
    for list in &outgoing {
        for (i, &h) in list.iter().enumerate() {
            slot.insert(h, i);
        }
    }
    let next = |h: usize| -> usize {
        let twin = h ^ 1;
        let list = &outgoing[target(h)];
        let i = slot[&twin];
        list[(i + list.len() - 1) % list.len()]
    };

    let mut used = vec![false; m];
    let mut faces = Vec::new();
    for start in 0..m {
        if used[start] {
            continue;
        }
        let mut walk = Vec::new();
        let mut h = start;
        let mut guard = 0usize;
        loop {
            used[h] = true;
            walk.push(origin(h));
            h = next(h);
            guard += 1;
            if h == start || used[h] || guard > m {
                break;
            }
        }
        for ring in simple_loops(&walk) {
            let pts: Vec<Point> = ring.iter().map(|&i| points[i]).collect();
            if polygon_signed_area(&pts) > AREA_EPS {
                faces.push(ring);
            }
        }
    }
    faces
}

fn unique_edges(n: usize, edges: &[(usize, usize)]) -> Vec<(usize, usize)> {
    let set: BTreeSet<(usize, usize)> = edges
        .iter()
        .filter(|&&(u, v)| u != v && u < n && v < n)
        .map(|&(u, v)| (u.min(v), u.max(v)))
        .collect();
    set.into_iter().collect()
}

/// Remove dead-end chains; returns the surviving edges.
fn prune_filaments(n: usize, edges: Vec<(usize, usize)>) -> Vec<(usize, usize)> {
    let mut incident: Vec<Vec<usize>> = vec![Vec::new(); n];
    for (k, &(u, v)) in edges.iter().enumerate() {
        incident[u].push(k);
        incident[v].push(k);
    }
    let mut degree: Vec<usize> = incident.iter().map(|l| l.len()).collect();
    let mut alive = vec![true; edges.len()];
    let mut queue: Vec<usize> = (0..n).filter(|&v| degree[v] == 1).collect();
    while let Some(v) = queue.pop() {
        if degree[v] != 1 {
            continue;
        }
        let Some(&k) = incident[v].iter().find(|&&k| alive[k]) else {
            continue;
        };
        alive[k] = false;
        let (a, b) = edges[k];
        for w in [a, b] {
            degree[w] -= 1;
            if degree[w] == 1 {
                queue.push(w);
            }
        }
    }
    edges
        .into_iter()
        .zip(alive)
        .filter_map(|(e, keep)| keep.then_some(e))
        .collect()
}

/// Cut a closed walk at repeated vertices into simple loops (length ≥ 3).
fn simple_loops(walk: &[usize]) -> Vec<Vec<usize>> {
    let mut loops = Vec::new();
    let mut path: Vec<usize> = Vec::with_capacity(walk.len());
    let mut pos: HashMap<usize, usize> = HashMap::new();
    for &v in walk {
        if let Some(&j) = pos.get(&v) {
            let ring: Vec<usize> = path.drain(j + 1..).collect();
            for w in &ring {
                pos.remove(w);
            }
            let mut closed = vec![v];
            closed.extend(ring);
            if closed.len() >= 3 {
                loops.push(closed);
            }
        } else {
            pos.insert(v, path.len());
            path.push(v);
        }
    }
    if path.len() >= 3 {
        loops.push(path);
    }
    loops
}
