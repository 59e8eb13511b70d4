use log::debug;
use num_traits::One;

use super::flow_network::FlowNetwork;
use crate::error::{GraphError, Result};

/// Maximum bipartite matching solved as a unit-capacity flow problem.
///
/// The network is `source -> left -> right -> sink` with capacity 1 on every arc, so
/// each unit of flow picks one left/right pair and integrality of the flow makes it a
/// matching.
#[derive(Debug, Clone)]
pub struct FlowMatching {
    left: usize,
    right: usize,
    edges: Vec<(usize, usize)>,
}

impl FlowMatching {
    /// Creates a bipartite graph with `left` vertices on one side and `right` on the other.
    pub fn new(left: usize, right: usize) -> Self {
        FlowMatching {
            left,
            right,
            edges: Vec::new(),
        }
    }

    /// Allows left vertex `u` to be matched with right vertex `v`.
    pub fn add_edge(&mut self, u: usize, v: usize) -> Result<()> {
        if u >= self.left {
            return Err(GraphError::InvalidVertex {
                vertex: u,
                vertex_count: self.left,
            });
        }
        if v >= self.right {
            return Err(GraphError::InvalidVertex {
                vertex: v,
                vertex_count: self.right,
            });
        }
        self.edges.push((u, v));
        Ok(())
    }

    /// Returns a maximum matching as `(left, right)` pairs, ordered by left vertex.
    pub fn max_matching(&self) -> Result<Vec<(usize, usize)>> {
        let source = self.left + self.right;
        let sink = source + 1;
        let mut network = FlowNetwork::new(sink + 1, source, sink)?;

        for u in 0..self.left {
            network.add_edge(source, u, 1)?;
        }
        let mut candidates = Vec::with_capacity(self.edges.len());
        for &(u, v) in &self.edges {
            let id = network.add_edge(u, self.left + v, 1)?;
            candidates.push((id, u, v));
        }
        for v in 0..self.right {
            network.add_edge(self.left + v, sink, 1)?;
        }

        let size = network.max_flow();
        let mut matching = Vec::new();
        for (id, u, v) in candidates {
            if network.flow_of(id)?.is_one() {
                matching.push((u, v));
            }
        }
        matching.sort_unstable();
        debug!("bipartite matching of size {size} over {} edges", self.edges.len());
        Ok(matching)
    }
}
