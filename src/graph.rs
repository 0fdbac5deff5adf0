//! The undirected multigraph over hash-function output vertices.
//!
//! Vertices live in a flat arena (`Vec<Vertex>`) indexed by `usize`; edges
//! carry the destination's index rather than a reference, so growth by
//! reallocation never invalidates anything and there are no owning cycles.

use crate::stats::BuildStats;

pub(crate) const NULL_PARENT: usize = usize::MAX;

#[derive(Debug, Clone, Copy)]
pub(crate) struct Edge {
    pub to: usize,
    pub label: usize,
}

#[derive(Debug, Clone, Default)]
pub(crate) struct Vertex {
    pub value: i64, // -1 means unassigned
    pub visited: bool,
    pub edges: Vec<Edge>,
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct StackFrame {
    pub vertex: usize,
    pub parent: usize, // NULL_PARENT for roots
}

/// The graph arena plus its reusable DFS traversal stack, kept together so
/// the stack's monotonic growth is amortised across build iterations.
#[derive(Debug, Default)]
pub(crate) struct Graph {
    vertices: Vec<Vertex>,
    stack: Vec<StackFrame>,
    /// Per-vertex adjacency pre-allocation.
    adjacency_prealloc: usize,
}

impl Graph {
    pub fn new(adjacency_prealloc: usize) -> Self {
        Self {
            vertices: Vec::new(),
            stack: Vec::with_capacity(1),
            adjacency_prealloc,
        }
    }

    pub fn order(&self) -> usize {
        self.vertices.len()
    }

    /// Grow the vertex array to exactly `n` vertices. Never shrinks.
    /// Pre-existing vertices (and their adjacency buffers) are untouched.
    pub fn ensure_order(&mut self, n: usize) {
        assert!(n >= self.vertices.len());
        self.vertices.reserve(n - self.vertices.len());
        while self.vertices.len() < n {
            let mut v = Vertex { value: -1, ..Vertex::default() };
            if self.adjacency_prealloc > 0 {
                v.edges.reserve(self.adjacency_prealloc);
            }
            self.vertices.push(v);
        }
    }

    /// Reset every vertex to its rest state (`value = -1`, unvisited, no
    /// edges) while keeping allocated adjacency capacity.
    pub fn wipe(&mut self) {
        for v in &mut self.vertices {
            v.value = -1;
            v.visited = false;
            v.edges.clear();
        }
    }

    pub fn connect(&mut self, from: usize, to: usize, label: usize, stats: &mut BuildStats) {
        let edges = &mut self.vertices[from].edges;
        let before_cap = edges.capacity();
        edges.push(Edge { to, label });
        let after_cap = edges.capacity();
        if after_cap > before_cap {
            stats.record_edge_realloc((after_cap - before_cap) as u64);
        }
    }

    /// `connect(u, v, label)` then `connect(v, u, label)`. Self-loops
    /// (`u == v`) are permitted at this level; the resolver treats them as
    /// cycles.
    pub fn biconnect(&mut self, u: usize, v: usize, label: usize, stats: &mut BuildStats) {
        self.connect(u, v, label, stats);
        self.connect(v, u, label, stats);
    }

    pub fn vertex(&self, i: usize) -> &Vertex {
        &self.vertices[i]
    }

    pub fn vertex_mut(&mut self, i: usize) -> &mut Vertex {
        &mut self.vertices[i]
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub(crate) fn stack_push(&mut self, frame: StackFrame) {
        self.stack.push(frame);
    }

    pub(crate) fn stack_pop(&mut self) -> Option<StackFrame> {
        self.stack.pop()
    }

    pub(crate) fn stack_capacity(&self) -> usize {
        self.stack.capacity()
    }
}
