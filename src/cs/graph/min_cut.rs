use log::debug;
use num_bigint::BigInt;
use std::collections::BTreeSet;

use super::flow_network::FlowNetwork;
use super::residual_edge::EdgeId;

/// A minimum s-t cut read off a converged residual graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MinCut {
    /// Vertices still reachable from the source through arcs with positive residual.
    pub source_side: BTreeSet<usize>,
    /// Inserted edges leaving `source_side`, in insertion order.
    pub cut_edges: Vec<EdgeId>,
    /// Sum of the capacities of `cut_edges`.
    pub capacity: BigInt,
}

impl MinCut {
    pub fn separates(&self, vertex: usize) -> bool {
        !self.source_side.contains(&vertex)
    }
}

impl FlowNetwork {
    /// Vertices reachable from the source in the current residual graph.
    pub fn reachable_from_source(&self) -> BTreeSet<usize> {
        self.residual_search(false).visited.iter_ones().collect()
    }

    /// Extracts the cut induced by [`reachable_from_source`](FlowNetwork::reachable_from_source).
    ///
    /// Only a minimum cut once [`max_flow`](FlowNetwork::max_flow) has converged; its
    /// capacity then equals the flow value. On a partial flow this still returns a valid
    /// partition, but `capacity` is the capacity of that particular cut.
    ///
    /// # Examples
    /// ```
    /// use flowcut::cs::graph::FlowNetwork;
    ///
    /// let mut network = FlowNetwork::from_edges(3, 0, 2, [(0, 1, 4), (1, 2, 1)]).unwrap();
    /// let flow = network.max_flow();
    /// let cut = network.min_cut();
    ///
    /// assert_eq!(cut.capacity, flow);
    /// assert_eq!(cut.source_side.into_iter().collect::<Vec<_>>(), vec![0, 1]);
    /// ```
    pub fn min_cut(&self) -> MinCut {
        let source_side = self.reachable_from_source();
        let cut_edges: Vec<EdgeId> = self
            .forward_edges()
            .filter(|(_, edge)| {
                source_side.contains(&edge.from()) && !source_side.contains(&edge.to())
            })
            .map(|(id, _)| id)
            .collect();
        let capacity: BigInt = cut_edges
            .iter()
            .map(|&id| self.arc(id).capacity())
            .sum();

        debug!(
            "min cut: {} vertices on the source side, {} crossing edges, capacity {}",
            source_side.len(),
            cut_edges.len(),
            capacity
        );
        MinCut {
            source_side,
            cut_edges,
            capacity,
        }
    }
}
