use bitvec::prelude::*;
use log::{debug, trace, warn};
use num_bigint::BigInt;
use num_traits::{Signed, Zero};
use std::collections::VecDeque;
use std::time::{Duration, Instant};

use super::flow_network::FlowNetwork;
use super::residual_edge::EdgeId;
use crate::error::{GraphError, Result};

/// Limits applied between augmentations by [`FlowNetwork::max_flow_with_config`].
///
/// Every augmentation leaves the network consistent, so hitting a limit never
/// loses work: calling again resumes from the current flow.
#[derive(Debug, Clone, Default)]
pub struct MaxFlowConfig {
    /// Stop after this many augmenting paths.
    pub max_augmentations: Option<usize>,
    /// Stop once this much wall-clock time has passed since the call started.
    pub time_limit: Option<Duration>,
}

/// Outcome of one driver run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowSummary {
    /// Flow added by this run.
    pub flow: BigInt,
    pub augmentations: usize,
}

/// A shortest source-to-sink path in the residual graph, as edge ids in path order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AugmentingPath {
    edges: Vec<EdgeId>,
}

impl AugmentingPath {
    pub fn edges(&self) -> &[EdgeId] {
        &self.edges
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Vertices visited by the path, source first and sink last.
    pub fn vertices(&self, network: &FlowNetwork) -> Vec<usize> {
        let mut vertices = Vec::with_capacity(self.edges.len() + 1);
        if let Some(&first) = self.edges.first() {
            vertices.push(network.arc(first).from());
        }
        vertices.extend(self.edges.iter().map(|&id| network.arc(id).to()));
        vertices
    }
}

/// Per-call BFS state over the residual graph.
pub(crate) struct ResidualSearch {
    pub(crate) visited: BitVec,
    parent: Vec<Option<EdgeId>>,
}

impl FlowNetwork {
    /// Breadth-first search from the source over non-saturated arcs.
    ///
    /// Each vertex keeps the first arc that reached it. With `stop_at_sink` the search
    /// ends as soon as the sink is discovered; otherwise it exhausts the reachable set.
    pub(crate) fn residual_search(&self, stop_at_sink: bool) -> ResidualSearch {
        let n = self.vertex_count();
        let mut visited = bitvec![0; n];
        let mut parent = vec![None; n];
        let mut queue = VecDeque::new();

        visited.set(self.source(), true);
        queue.push_back(self.source());

        while let Some(u) = queue.pop_front() {
            for &id in self.arcs(u) {
                let edge = self.arc(id);
                let v = edge.to();
                if visited[v] || edge.is_saturated() {
                    continue;
                }
                visited.set(v, true);
                parent[v] = Some(id);
                if stop_at_sink && v == self.sink() {
                    return ResidualSearch { visited, parent };
                }
                queue.push_back(v);
            }
        }
        ResidualSearch { visited, parent }
    }

    /// Finds a shortest (fewest-edges) augmenting path, or `None` once the flow is maximum.
    ///
    /// Arcs are explored in adjacency insertion order, so the result is deterministic.
    pub fn find_augmenting_path(&self) -> Option<AugmentingPath> {
        let search = self.residual_search(true);
        if !search.visited[self.sink()] {
            return None;
        }

        let mut edges = Vec::new();
        let mut v = self.sink();
        while let Some(id) = search.parent[v] {
            edges.push(id);
            v = self.arc(id).from();
        }
        edges.reverse();
        Some(AugmentingPath { edges })
    }

    /// Pushes the bottleneck residual capacity along every edge of `path` and returns it.
    ///
    /// # Panics
    /// If the bottleneck is not positive or the path no longer fits the residual graph,
    /// both of which mean `path` did not come from the current network state.
    pub fn augment(&mut self, path: &AugmentingPath) -> BigInt {
        let delta = path
            .edges
            .iter()
            .map(|&id| self.arc(id).residual())
            .min()
            .unwrap_or_else(BigInt::zero);
        assert!(
            delta.is_positive(),
            "augmenting path bottleneck must be positive, got {delta}"
        );

        for &id in &path.edges {
            self.push(id, &delta);
        }
        trace!("augmented {} units along {} edges", delta, path.len());
        delta
    }

    /// Computes a maximum flow with Edmonds-Karp and returns the flow added by this call.
    ///
    /// A second call on a converged network adds nothing and changes nothing.
    ///
    /// # Complexity
    /// * Time: O(V * E^2) arithmetic operations on the capacities
    /// * Space: O(V + E)
    pub fn max_flow(&mut self) -> BigInt {
        let mut total = BigInt::zero();
        let mut augmentations = 0usize;

        while let Some(path) = self.find_augmenting_path() {
            total += self.augment(&path);
            augmentations += 1;
        }

        debug!(
            "max flow {} -> {} converged: {} after {} augmentations",
            self.source(),
            self.sink(),
            total,
            augmentations
        );
        total
    }

    /// Like [`max_flow`](FlowNetwork::max_flow), but stops early when a limit in `config`
    /// is reached while an augmenting path still exists.
    ///
    /// # Errors
    /// * `AugmentationLimit` or `TimeLimit`, carrying the work done so far
    pub fn max_flow_with_config(&mut self, config: &MaxFlowConfig) -> Result<FlowSummary> {
        let started = Instant::now();
        let mut flow = BigInt::zero();
        let mut augmentations = 0usize;

        while let Some(path) = self.find_augmenting_path() {
            if config
                .max_augmentations
                .is_some_and(|limit| augmentations >= limit)
            {
                warn!("augmentation limit hit after {augmentations} paths");
                return Err(GraphError::AugmentationLimit {
                    augmentations,
                    flow,
                });
            }
            if config
                .time_limit
                .is_some_and(|limit| started.elapsed() >= limit)
            {
                warn!("time limit hit after {augmentations} paths");
                return Err(GraphError::TimeLimit {
                    augmentations,
                    flow,
                });
            }

            flow += self.augment(&path);
            augmentations += 1;
        }

        debug!("bounded max flow converged: {flow} after {augmentations} augmentations");
        Ok(FlowSummary {
            flow,
            augmentations,
        })
    }
}

/// Maximum flow on a dense capacity matrix, where `capacity[u][v]` is the capacity of `u -> v`.
///
/// Zero entries add no edge. An empty matrix has flow zero.
///
/// # Errors
/// * `InvalidVertex` if `source` or `sink` is out of range
/// * `InvalidInput` if the matrix is not square or `source == sink`
/// * `NegativeCapacity` for any negative entry
pub fn edmond_karp<C>(capacity: &[Vec<C>], source: usize, sink: usize) -> Result<BigInt>
where
    C: Clone + Into<BigInt>,
{
    let n = capacity.len();
    if n == 0 {
        return Ok(BigInt::zero());
    }
    if capacity.iter().any(|row| row.len() != n) {
        return Err(GraphError::invalid_input("capacity matrix must be square"));
    }

    let mut network = FlowNetwork::new(n, source, sink)?;
    for (u, row) in capacity.iter().enumerate() {
        for (v, cap) in row.iter().enumerate() {
            let cap: BigInt = cap.clone().into();
            if !cap.is_zero() {
                network.add_edge(u, v, cap)?;
            }
        }
    }
    Ok(network.max_flow())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn googol() -> BigInt {
        BigInt::from(10).pow(100u32)
    }

    fn classic() -> FlowNetwork {
        FlowNetwork::from_edges(
            6,
            0,
            5,
            [
                (0, 1, 16),
                (0, 2, 13),
                (1, 2, 10),
                (1, 3, 12),
                (2, 1, 4),
                (2, 4, 14),
                (3, 2, 9),
                (3, 5, 20),
                (4, 3, 7),
                (4, 5, 4),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_edmond_karp_empty_graph() {
        let capacity: Vec<Vec<u32>> = vec![];
        let result = edmond_karp(&capacity, 0, 0);
        assert_eq!(result, Ok(BigInt::zero()));
    }

    #[test]
    fn test_edmond_karp_simple_graph() {
        let capacity = vec![
            vec![0, 16, 13, 0, 0, 0],
            vec![0, 0, 10, 12, 0, 0],
            vec![0, 4, 0, 0, 14, 0],
            vec![0, 0, 9, 0, 0, 20],
            vec![0, 0, 0, 7, 0, 4],
            vec![0, 0, 0, 0, 0, 0],
        ];
        assert_eq!(edmond_karp(&capacity, 0, 5), Ok(BigInt::from(23)));
    }

    #[test]
    fn test_edmond_karp_multiple_paths() {
        let capacity = vec![
            vec![0, 10, 10, 0, 0],
            vec![0, 0, 4, 8, 0],
            vec![0, 0, 0, 9, 0],
            vec![0, 0, 0, 0, 10],
            vec![0, 0, 0, 0, 0],
        ];
        assert_eq!(edmond_karp(&capacity, 0, 4), Ok(BigInt::from(10)));
    }

    #[test]
    fn test_edmond_karp_no_path() {
        let capacity = vec![
            vec![0, 10, 0, 0],
            vec![0, 0, 0, 0],
            vec![0, 0, 0, 10],
            vec![0, 0, 0, 0],
        ];
        assert_eq!(edmond_karp(&capacity, 0, 3), Ok(BigInt::zero()));
    }

    #[test]
    fn test_edmond_karp_invalid_vertex() {
        let capacity = vec![vec![0, 10], vec![0, 0]];
        assert!(matches!(
            edmond_karp(&capacity, 0, 2),
            Err(GraphError::InvalidVertex { vertex: 2, .. })
        ));
    }

    #[test]
    fn test_edmond_karp_ragged_matrix() {
        let capacity = vec![vec![0, 1], vec![0]];
        assert!(matches!(
            edmond_karp(&capacity, 0, 1),
            Err(GraphError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_classic_network() {
        let mut network = classic();
        assert_eq!(network.max_flow(), BigInt::from(23));
        assert_eq!(network.total_flow(), BigInt::from(23));
        assert!(network.check_invariants().is_ok());
    }

    #[test]
    fn test_googol_capacities() {
        let mut network = FlowNetwork::new(4, 0, 3).unwrap();
        network.add_edge(0, 1, googol()).unwrap();
        network.add_edge(0, 2, googol()).unwrap();
        network.add_edge(1, 2, 1).unwrap();
        network.add_edge(1, 3, googol()).unwrap();
        network.add_edge(2, 3, googol()).unwrap();

        assert_eq!(network.max_flow(), googol() * 2u32);
        assert!(network.check_invariants().is_ok());
    }

    #[test]
    fn test_single_edge_then_idempotent() {
        let mut network = FlowNetwork::new(2, 0, 1).unwrap();
        let id = network.add_edge(0, 1, 5).unwrap();
        assert_eq!(network.max_flow(), BigInt::from(5));
        assert!(network.edge(id).unwrap().is_saturated());
        assert_eq!(network.max_flow(), BigInt::zero());
        assert_eq!(network.flow_of(id).unwrap(), BigInt::from(5));
    }

    #[test]
    fn test_disconnected_terminals() {
        let mut network =
            FlowNetwork::from_edges(4, 0, 3, [(0, 1, 10), (2, 3, 5)]).unwrap();
        assert_eq!(network.max_flow(), BigInt::zero());
        assert!(network.find_augmenting_path().is_none());
    }

    #[test]
    fn test_first_path_is_shortest() {
        // The long route is inserted first but the direct edge wins on length.
        let mut network = FlowNetwork::new(4, 0, 3).unwrap();
        network.add_edge(0, 1, 1).unwrap();
        network.add_edge(1, 2, 1).unwrap();
        network.add_edge(2, 3, 1).unwrap();
        let direct = network.add_edge(0, 3, 1).unwrap();

        let path = network.find_augmenting_path().unwrap();
        assert_eq!(path.edges(), &[direct]);
        assert_eq!(path.vertices(&network), vec![0, 3]);

        assert_eq!(network.augment(&path), BigInt::from(1));
        let path = network.find_augmenting_path().unwrap();
        assert_eq!(path.vertices(&network), vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_path_uses_reverse_edge() {
        // After 0-1-2-3 is saturated, the second path must cancel flow on 1->2.
        let mut network = FlowNetwork::new(4, 0, 3).unwrap();
        network.add_edge(0, 1, 1).unwrap();
        let middle = network.add_edge(1, 2, 1).unwrap();
        network.add_edge(2, 3, 1).unwrap();
        let path = network.find_augmenting_path().unwrap();
        network.augment(&path);

        network.add_edge(0, 2, 1).unwrap();
        network.add_edge(1, 3, 1).unwrap();
        let path = network.find_augmenting_path().unwrap();
        assert_eq!(path.vertices(&network), vec![0, 2, 1, 3]);
        assert!(path.edges().contains(&middle.pair()));

        network.augment(&path);
        assert_eq!(network.flow_of(middle).unwrap(), BigInt::zero());
        assert_eq!(network.total_flow(), BigInt::from(2));
    }

    #[test]
    #[should_panic(expected = "bottleneck must be positive")]
    fn test_augment_stale_path_panics() {
        let mut network = FlowNetwork::new(2, 0, 1).unwrap();
        network.add_edge(0, 1, 1).unwrap();
        let path = network.find_augmenting_path().unwrap();
        network.augment(&path);
        network.augment(&path);
    }

    #[test]
    fn test_augmentation_limit_resumes() {
        let mut network = classic();
        let config = MaxFlowConfig {
            max_augmentations: Some(1),
            ..Default::default()
        };

        let err = network.max_flow_with_config(&config).unwrap_err();
        let first = match err {
            GraphError::AugmentationLimit {
                augmentations,
                flow,
            } => {
                assert_eq!(augmentations, 1);
                flow
            }
            other => panic!("unexpected error {other:?}"),
        };
        assert!(first.is_positive());
        assert!(network.check_invariants().is_ok());

        let rest = network.max_flow_with_config(&MaxFlowConfig::default()).unwrap();
        assert_eq!(first + rest.flow, BigInt::from(23));
    }

    #[test]
    fn test_zero_time_limit() {
        let mut network = classic();
        let config = MaxFlowConfig {
            time_limit: Some(Duration::ZERO),
            ..Default::default()
        };
        assert!(matches!(
            network.max_flow_with_config(&config),
            Err(GraphError::TimeLimit { augmentations: 0, .. })
        ));
        assert!(network.total_flow().is_zero());
    }

    #[test]
    fn test_limit_not_reported_when_converged() {
        let mut network = FlowNetwork::from_edges(2, 0, 1, [(0, 1, 5)]).unwrap();
        let config = MaxFlowConfig {
            max_augmentations: Some(1),
            time_limit: None,
        };
        let summary = network.max_flow_with_config(&config).unwrap();
        assert_eq!(
            summary,
            FlowSummary {
                flow: BigInt::from(5),
                augmentations: 1
            }
        );
    }
}
