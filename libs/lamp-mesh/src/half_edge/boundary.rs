//! Boundary-loop extraction.
//!
//! Loops are traced backward: from a naked half-edge, the previous boundary
//! edge is the naked half-edge ending at its start vertex, found by rotating
//! through the vertex fan. Every walk is bounded so malformed input ends in
//! a diagnostic rather than a hang.

use std::collections::HashSet;

use config::constants::{BOUNDARY_MAX_FAN_STEPS, BOUNDARY_MAX_LOOPS};

use super::{HalfEdgeId, HalfEdgeMesh, VertexId};

impl HalfEdgeMesh {
    /// Boundary loops as vertex ids, each in half-edge direction.
    ///
    /// For a counter-clockwise footprint the outer loop runs
    /// counter-clockwise and holes run clockwise. Loops that fail to close
    /// are dropped with a diagnostic.
    pub fn boundaries(&self) -> Vec<Vec<VertexId>> {
        let naked = self.naked_half_edges();
        let mut visited: HashSet<HalfEdgeId> = HashSet::with_capacity(naked.len());
        let mut loops = Vec::new();

        for seed in &naked {
            if visited.contains(seed) {
                continue;
            }
            if loops.len() >= BOUNDARY_MAX_LOOPS {
                tracing::warn!(max = BOUNDARY_MAX_LOOPS, "boundary loop cap reached");
                break;
            }

            let mut loop_ = Vec::new();
            let mut current = *seed;
            let mut closed = false;
            for _ in 0..naked.len() {
                visited.insert(current);
                loop_.push(self.half_edge(current).vertex);

                let Some(previous) = self.previous_naked(current) else {
                    tracing::warn!(edge = current.0, "no naked edge found around vertex fan");
                    break;
                };
                if previous == *seed {
                    closed = true;
                    break;
                }
                if visited.contains(&previous) {
                    tracing::warn!(edge = previous.0, "boundary walk re-entered a visited edge");
                    break;
                }
                current = previous;
            }

            if closed {
                loop_.reverse();
                loops.push(loop_);
            } else {
                tracing::warn!(seed = seed.0, "boundary loop did not close");
            }
        }
        loops
    }

    /// The naked half-edge ending at the start vertex of `edge`.
    fn previous_naked(&self, edge: HalfEdgeId) -> Option<HalfEdgeId> {
        let mut candidate = self.half_edge(edge).previous;
        for _ in 0..=BOUNDARY_MAX_FAN_STEPS {
            match self.half_edge(candidate).neighbour {
                None => return Some(candidate),
                Some(opposite) => candidate = self.half_edge(opposite).previous,
            }
        }
        None
    }
}
