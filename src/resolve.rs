//! The acyclicity resolver, spec.md §4.3: an iterative DFS that either
//! proves the graph is a forest and computes a consistent vertex labeling,
//! or detects a cycle and bails out immediately.
//!
//! Recursion is deliberately avoided — key sets in the hundreds of
//! thousands can produce DFS chains deep enough to blow a call stack — in
//! favor of the explicit frame stack carried by [`Graph`].

use crate::graph::{Graph, StackFrame, NULL_PARENT};
use crate::stats::BuildStats;

/// Attempt to resolve `graph`. Returns `true` and leaves every reachable
/// vertex's `value` set to a consistent labeling if the graph is acyclic;
/// returns `false` (with a partially-written labeling that the caller must
/// discard via `wipe()`) if a cycle is detected.
///
/// Root order (ascending vertex index) and edge order (adjacency
/// insertion order) are both significant: they determine which of the
/// many valid labelings a given graph produces, and a build seeded with a
/// fixed PRNG depends on this order for reproducibility (spec.md §4.3).
pub(crate) fn resolve(graph: &mut Graph, stats: &mut BuildStats) -> bool {
    let n = graph.order() as i64;

    for root in 0..graph.order() {
        if graph.vertex(root).visited {
            continue;
        }

        graph.vertex_mut(root).value = 0;
        graph.stack_push(StackFrame {
            vertex: root,
            parent: NULL_PARENT,
        });

        while let Some(frame) = graph.stack_pop() {
            let vertex = frame.vertex;
            let parent = frame.parent;

            graph.vertex_mut(vertex).visited = true;
            stats.record_vertex_explored();

            let edges: Vec<_> = graph.vertex(vertex).edges.clone();
            let mut skip = true;

            for edge in edges {
                let to = edge.to;

                if skip && to == parent {
                    skip = false;
                    continue;
                }

                if graph.vertex(to).visited {
                    return false; // cyclic
                }

                graph.stack_push(StackFrame {
                    vertex: to,
                    parent: vertex,
                });

                let parent_value = graph.vertex(vertex).value;
                let mut v = (edge.label as i64 - parent_value) % n;
                if v < 0 {
                    v += n;
                }
                graph.vertex_mut(to).value = v;
            }
        }
    }

    debug_assert!(graph.vertices().iter().all(|v| v.value >= 0));
    true
}
