// SPDX-License-Identifier: MIT
//
// Copyright (c) 2026 the robust2d developers
//
// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to deal
// in the Software without restriction, including without limitation the rights
// to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
// copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in
// all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
// IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
// FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
// AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
// LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
// OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
// SOFTWARE.

//! Manifold triangle graph.
//!
//! Triangles are stored counterclockwise in a slab with a free list, with
//! edge-to-triangle and vertex-to-triangle adjacency maps kept in sync.
//! Mutation happens only through [`TriangleGraph::insert_triangle`] and
//! [`TriangleGraph::remove_triangle`]; every edge borders at most two
//! triangles at all times.

use ahash::AHashMap;
use smallvec::SmallVec;

/// Counterclockwise vertex-index triple.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Triangle(pub usize, pub usize, pub usize);

impl Triangle {
    pub fn vertices(&self) -> [usize; 3] {
        [self.0, self.1, self.2]
    }

    pub fn sorted(&self) -> (usize, usize, usize) {
        let mut v = [self.0, self.1, self.2];
        v.sort_unstable();
        (v[0], v[1], v[2])
    }

    /// The vertex not on edge `(a, b)`; `None` when the edge is not part of
    /// this triangle.
    pub fn opposite(&self, a: usize, b: usize) -> Option<usize> {
        let v = self.vertices();
        if !v.contains(&a) || !v.contains(&b) {
            return None;
        }
        v.into_iter().find(|&w| w != a && w != b)
    }

    /// Cyclic rotation placing `v` first, preserving winding.
    pub fn rotated_to(&self, v: usize) -> Option<Triangle> {
        if self.0 == v {
            Some(*self)
        } else if self.1 == v {
            Some(Triangle(self.1, self.2, self.0))
        } else if self.2 == v {
            Some(Triangle(self.2, self.0, self.1))
        } else {
            None
        }
    }
}

/// Undirected edge key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeKey(pub usize, pub usize);

impl EdgeKey {
    pub fn new(a: usize, b: usize) -> Self {
        if a < b { EdgeKey(a, b) } else { EdgeKey(b, a) }
    }
}

#[derive(Clone, Debug, Default)]
pub struct TriangleGraph {
    tris: Vec<Option<Triangle>>,
    free: Vec<usize>,
    edge_to_tris: AHashMap<EdgeKey, SmallVec<[usize; 2]>>,
    vert_to_tris: Vec<SmallVec<[usize; 8]>>,
}

impl TriangleGraph {
    pub fn new(num_vertices: usize) -> Self {
        TriangleGraph {
            tris: Vec::new(),
            free: Vec::new(),
            edge_to_tris: AHashMap::default(),
            vert_to_tris: vec![SmallVec::new(); num_vertices],
        }
    }

    pub fn num_vertices(&self) -> usize {
        self.vert_to_tris.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.tris.len() - self.free.len()
    }

    pub fn triangles(&self) -> impl Iterator<Item = Triangle> + '_ {
        self.tris.iter().filter_map(|t| *t)
    }

    pub fn triangle(&self, id: usize) -> Option<Triangle> {
        self.tris.get(id).copied().flatten()
    }

    /// Insert the counterclockwise triangle `(v0, v1, v2)` and return its
    /// slot id. Inserting a triangle onto an edge that already borders two
    /// triangles breaks the manifold invariant and fails loudly.
    pub fn insert_triangle(&mut self, v0: usize, v1: usize, v2: usize) -> usize {
        assert!(
            v0 != v1 && v1 != v2 && v0 != v2,
            "degenerate triangle ({v0}, {v1}, {v2})"
        );
        let n = self.vert_to_tris.len();
        assert!(v0 < n && v1 < n && v2 < n, "triangle vertex out of range");
        let t = Triangle(v0, v1, v2);
        let id = match self.free.pop() {
            Some(id) => {
                self.tris[id] = Some(t);
                id
            }
            None => {
                self.tris.push(Some(t));
                self.tris.len() - 1
            }
        };
        for e in [
            EdgeKey::new(v0, v1),
            EdgeKey::new(v1, v2),
            EdgeKey::new(v2, v0),
        ] {
            let list = self.edge_to_tris.entry(e).or_default();
            assert!(list.len() < 2, "edge ({}, {}) already manifold-full", e.0, e.1);
            list.push(id);
        }
        for v in [v0, v1, v2] {
            self.vert_to_tris[v].push(id);
        }
        id
    }

    /// Remove the triangle with vertex set `{v0, v1, v2}` (any order);
    /// returns whether it existed.
    pub fn remove_triangle(&mut self, v0: usize, v1: usize, v2: usize) -> bool {
        let Some(id) = self.find_triangle(v0, v1, v2) else {
            return false;
        };
        self.remove_by_id(id);
        true
    }

    pub fn remove_by_id(&mut self, id: usize) {
        let t = self.tris[id].take().expect("removing vacant triangle slot");
        for e in [
            EdgeKey::new(t.0, t.1),
            EdgeKey::new(t.1, t.2),
            EdgeKey::new(t.2, t.0),
        ] {
            if let Some(list) = self.edge_to_tris.get_mut(&e) {
                if let Some(pos) = list.iter().position(|&x| x == id) {
                    list.swap_remove(pos);
                }
                if list.is_empty() {
                    self.edge_to_tris.remove(&e);
                }
            }
        }
        for v in t.vertices() {
            let list = &mut self.vert_to_tris[v];
            if let Some(pos) = list.iter().position(|&x| x == id) {
                list.swap_remove(pos);
            }
        }
        self.free.push(id);
    }

    /// Slot id of the triangle with vertex set `{v0, v1, v2}`, any order.
    pub fn find_triangle(&self, v0: usize, v1: usize, v2: usize) -> Option<usize> {
        let key = {
            let mut v = [v0, v1, v2];
            v.sort_unstable();
            (v[0], v[1], v[2])
        };
        self.vert_to_tris
            .get(v0)?
            .iter()
            .copied()
            .find(|&id| self.tris[id].map(|t| t.sorted()) == Some(key))
    }

    pub fn edge_exists(&self, a: usize, b: usize) -> bool {
        self.edge_to_tris.contains_key(&EdgeKey::new(a, b))
    }

    /// The triangle sharing edge `(a, b)` with `id`, if any.
    pub fn adjacent_across_edge(&self, id: usize, a: usize, b: usize) -> Option<usize> {
        self.edge_to_tris
            .get(&EdgeKey::new(a, b))?
            .iter()
            .copied()
            .find(|&other| other != id)
    }

    /// The vertex of triangle `id` opposite edge `(a, b)`.
    pub fn opposite_vertex(&self, id: usize, a: usize, b: usize) -> Option<usize> {
        self.triangle(id)?.opposite(a, b)
    }

    /// Link edges of `v`: for each incident triangle, the edge opposite
    /// `v`, ordered so that `(v, e.0, e.1)` is counterclockwise. Paired
    /// with the incident triangle's slot id. Fan order is not guaranteed.
    pub fn link_edges(&self, v: usize) -> Vec<(usize, (usize, usize))> {
        let mut out = Vec::new();
        if let Some(list) = self.vert_to_tris.get(v) {
            for &id in list {
                if let Some(t) = self.tris[id].and_then(|t| t.rotated_to(v)) {
                    out.push((id, (t.1, t.2)));
                }
            }
        }
        out
    }

    pub fn incident_triangles(&self, v: usize) -> &[usize] {
        self.vert_to_tris
            .get(v)
            .map(|l| l.as_slice())
            .unwrap_or(&[])
    }

    /// All undirected edges currently present.
    pub fn edges(&self) -> impl Iterator<Item = EdgeKey> + '_ {
        self.edge_to_tris.keys().copied()
    }

    /// Number of triangles bordering edge `(a, b)`.
    pub fn edge_degree(&self, a: usize, b: usize) -> usize {
        self.edge_to_tris
            .get(&EdgeKey::new(a, b))
            .map(|l| l.len())
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_find_remove() {
        let mut g = TriangleGraph::new(4);
        let id = g.insert_triangle(0, 1, 2);
        assert_eq!(g.find_triangle(2, 0, 1), Some(id));
        assert!(g.edge_exists(0, 1));
        assert!(g.remove_triangle(1, 2, 0));
        assert_eq!(g.triangle_count(), 0);
        assert!(!g.edge_exists(0, 1));
    }

    #[test]
    fn adjacency_across_shared_edge() {
        let mut g = TriangleGraph::new(4);
        let a = g.insert_triangle(0, 1, 2);
        let b = g.insert_triangle(0, 2, 3);
        assert_eq!(g.adjacent_across_edge(a, 0, 2), Some(b));
        assert_eq!(g.adjacent_across_edge(b, 2, 0), Some(a));
        assert_eq!(g.adjacent_across_edge(a, 0, 1), None);
        assert_eq!(g.opposite_vertex(a, 0, 2), Some(1));
        assert_eq!(g.opposite_vertex(b, 0, 2), Some(3));
    }

    #[test]
    fn link_edges_preserve_winding() {
        let mut g = TriangleGraph::new(4);
        g.insert_triangle(0, 1, 2);
        g.insert_triangle(0, 2, 3);
        let link = g.link_edges(0);
        assert_eq!(link.len(), 2);
        for (_, (a, b)) in link {
            // rotating back must reproduce a stored triangle
            assert!(g.find_triangle(0, a, b).is_some());
        }
    }

    #[test]
    #[should_panic(expected = "manifold-full")]
    fn third_triangle_on_edge_is_rejected() {
        let mut g = TriangleGraph::new(5);
        g.insert_triangle(0, 1, 2);
        g.insert_triangle(1, 0, 3);
        g.insert_triangle(0, 1, 4);
    }

    #[test]
    fn slots_are_reused() {
        let mut g = TriangleGraph::new(5);
        let id = g.insert_triangle(0, 1, 2);
        g.remove_triangle(0, 1, 2);
        let id2 = g.insert_triangle(2, 3, 4);
        assert_eq!(id, id2);
    }
}
