//! Undirected weighted graph with labeled vertices
//!
//! Vertices are addressed by a dense index. Each vertex owns a label of type
//! `V` and an edge list; each edge carries a weight of type `E`. Indices are
//! an internal invariant, so out-of-range access panics instead of returning
//! an error.

use std::fmt;

/// Dense vertex index
pub type VertId = usize;

// ============================================================================
// EDGE / VERTEX
// ============================================================================

/// One half of an undirected edge, stored in the edge list of its owner
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Edge<E> {
    pub neigh: VertId,
    pub val: E,
}

/// A labeled vertex and its adjacency list
#[derive(Clone, Debug)]
pub struct Vertex<V, E> {
    key: V,
    edges: Vec<Edge<E>>,
}

impl<V, E: Copy> Vertex<V, E> {
    fn new(key: V) -> Self {
        Self {
            key,
            edges: Vec::new(),
        }
    }

    fn find(&self, neigh: VertId) -> Option<usize> {
        self.edges.iter().position(|e| e.neigh == neigh)
    }

    fn weight(&self, neigh: VertId) -> E {
        let i = self
            .find(neigh)
            .unwrap_or_else(|| panic!("no edge to vertex {}", neigh));
        self.edges[i].val
    }

    fn set_weight(&mut self, neigh: VertId, weight: E) {
        let i = self
            .find(neigh)
            .unwrap_or_else(|| panic!("no edge to vertex {}", neigh));
        self.edges[i].val = weight;
    }

    fn remove(&mut self, neigh: VertId) -> bool {
        match self.find(neigh) {
            Some(i) => {
                self.edges.remove(i);
                true
            }
            None => false,
        }
    }
}

// ============================================================================
// GRAPH
// ============================================================================

/// Undirected graph without loops or parallel edges
#[derive(Clone, Debug)]
pub struct Graph<V, E> {
    vertices: Vec<Vertex<V, E>>,
    edge_count: usize,
}

impl<V, E> Default for Graph<V, E> {
    fn default() -> Self {
        Self {
            vertices: Vec::new(),
            edge_count: 0,
        }
    }
}

impl<V: Copy, E: Copy> Graph<V, E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a graph with capacity for `n` vertices
    pub fn with_capacity(n: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(n),
            edge_count: 0,
        }
    }

    // ========================================================================
    // ACCESSORS
    // ========================================================================

    pub fn node_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn is_vertex(&self, x: VertId) -> bool {
        x < self.node_count()
    }

    fn validate_vertex(&self, x: VertId) {
        assert!(
            self.is_vertex(x),
            "vertex {} out of range ({} vertices)",
            x,
            self.node_count()
        );
    }

    /// Check if there is an edge between x and y
    pub fn is_adjacent(&self, x: VertId, y: VertId) -> bool {
        self.validate_vertex(x);
        self.validate_vertex(y);
        self.vertices[x].find(y).is_some()
    }

    /// Weight of the edge between x and y. The edge must exist.
    pub fn edge_weight(&self, x: VertId, y: VertId) -> E {
        self.validate_vertex(x);
        self.validate_vertex(y);
        self.vertices[x].weight(y)
    }

    pub fn vertex_key(&self, x: VertId) -> V {
        self.validate_vertex(x);
        self.vertices[x].key
    }

    /// Iterate the neighbors of v (unordered)
    pub fn neighbors(&self, v: VertId) -> impl Iterator<Item = VertId> + '_ {
        self.validate_vertex(v);
        self.vertices[v].edges.iter().map(|e| e.neigh)
    }

    /// Fill `out` with the neighbors of v
    pub fn get_neighbors(&self, v: VertId, out: &mut Vec<VertId>) {
        out.clear();
        out.extend(self.neighbors(v));
    }

    // ========================================================================
    // MUTATORS
    // ========================================================================

    /// Append a vertex, returning its index
    pub fn add_vertex(&mut self, key: V) -> VertId {
        self.vertices.push(Vertex::new(key));
        self.vertices.len() - 1
    }

    /// Add an edge between x and y, or update its weight if it exists
    pub fn add_edge(&mut self, x: VertId, y: VertId, weight: E) {
        if self.is_adjacent(x, y) {
            self.set_edge_weight(x, y, weight);
            return;
        }

        self.vertices[x].edges.push(Edge { neigh: y, val: weight });
        self.vertices[y].edges.push(Edge { neigh: x, val: weight });
        self.edge_count += 1;
    }

    /// Change the weight of an existing edge
    pub fn set_edge_weight(&mut self, x: VertId, y: VertId, weight: E) {
        self.validate_vertex(x);
        self.validate_vertex(y);
        self.vertices[x].set_weight(y, weight);
        self.vertices[y].set_weight(x, weight);
    }

    /// Remove the edge between x and y, returning whether it existed
    pub fn remove_edge(&mut self, x: VertId, y: VertId) -> bool {
        self.validate_vertex(x);
        self.validate_vertex(y);
        let removed = self.vertices[x].remove(y);
        if removed {
            self.vertices[y].remove(x);
            self.edge_count -= 1;
        }
        removed
    }

    pub fn set_vertex_key(&mut self, x: VertId, key: V) {
        self.validate_vertex(x);
        self.vertices[x].key = key;
    }

    /// Drop all vertices and edges
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.edge_count = 0;
    }

    /// Replace this graph with a deep copy of `other`
    ///
    /// Edges are rebuilt from the lower triangle of the adjacency relation,
    /// so `other` must be undirected and loop-free.
    pub fn clone_from_graph(&mut self, other: &Graph<V, E>) {
        self.clear();

        for x in 0..other.node_count() {
            self.add_vertex(other.vertex_key(x));
        }

        for x in 0..other.node_count() {
            for y in other.neighbors(x).filter(|&y| y < x) {
                self.add_edge(x, y, other.edge_weight(x, y));
            }
        }
    }
}

impl<V: Copy, E: Copy + fmt::Display> fmt::Display for Graph<V, E> {
    /// One line per edge: `x y weight`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for x in 0..self.node_count() {
            let mut lower: Vec<VertId> = self.neighbors(x).filter(|&y| y < x).collect();
            lower.sort_unstable();
            for y in lower {
                writeln!(f, "{} {} {}", x, y, self.edge_weight(x, y))?;
            }
        }
        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// Ring of `n` vertices labeled with their index
    fn ring(n: usize) -> Graph<usize, f64> {
        let mut g = Graph::new();
        for i in 0..n {
            g.add_vertex(i);
        }
        for i in 0..n {
            g.add_edge(i, (i + 1) % n, 1.0);
        }
        g
    }

    #[test]
    fn test_add_edge_is_symmetric() {
        let g = ring(6);
        assert_eq!(g.edge_count(), 6);
        for x in 0..6 {
            for y in 0..6 {
                assert_eq!(g.is_adjacent(x, y), g.is_adjacent(y, x));
            }
        }
        assert!(g.is_adjacent(0, 5));
        assert!(!g.is_adjacent(0, 3));
    }

    #[test]
    fn test_duplicate_edge_updates_weight() {
        let mut g = ring(4);
        g.add_edge(1, 0, 7.5);
        assert_eq!(g.edge_count(), 4);
        assert_eq!(g.edge_weight(0, 1), 7.5);
        assert_eq!(g.neighbors(0).count(), 2);
    }

    #[test]
    fn test_set_edge_weight_both_directions() {
        let mut g = ring(4);
        g.set_edge_weight(2, 3, 9.99);
        assert_eq!(g.edge_weight(3, 2), 9.99);
    }

    #[test]
    fn test_vertex_keys() {
        let mut g = ring(10);
        g.set_vertex_key(5, 777);
        assert_eq!(g.vertex_key(5), 777);
        assert_eq!(g.vertex_key(4), 4);
    }

    #[test]
    fn test_get_neighbors_clears_buffer() {
        let g = ring(5);
        let mut out = vec![42, 43, 44];
        g.get_neighbors(0, &mut out);
        out.sort_unstable();
        assert_eq!(out, vec![1, 4]);
    }

    #[test]
    fn test_remove_edge() {
        let mut g = ring(5);
        assert!(g.remove_edge(0, 1));
        assert!(!g.remove_edge(1, 0));
        assert!(!g.is_adjacent(1, 0));
        assert_eq!(g.edge_count(), 4);
    }

    #[test]
    fn test_clone_is_independent() {
        let original = ring(8);
        let mut copy = Graph::new();
        copy.clone_from_graph(&original);

        assert_eq!(copy.node_count(), 8);
        assert_eq!(copy.edge_count(), 8);
        assert!(copy.is_adjacent(7, 0));

        copy.set_vertex_key(3, 99);
        copy.add_edge(0, 4, 2.0);
        copy.set_edge_weight(1, 2, 5.0);

        assert_eq!(original.vertex_key(3), 3);
        assert!(!original.is_adjacent(0, 4));
        assert_eq!(original.edge_weight(1, 2), 1.0);
        assert_eq!(original.edge_count(), 8);
    }

    #[test]
    fn test_display_lists_each_edge_once() {
        let g = ring(3);
        assert_eq!(g.to_string(), "1 0 1\n2 0 1\n2 1 1\n");
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_out_of_range_vertex_panics() {
        let g = ring(3);
        g.is_adjacent(0, 3);
    }

    #[test]
    #[should_panic(expected = "no edge")]
    fn test_missing_edge_weight_panics() {
        let g = ring(4);
        g.edge_weight(0, 2);
    }
}
