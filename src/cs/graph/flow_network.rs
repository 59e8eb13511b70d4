use num_bigint::BigInt;
use num_traits::{Signed, Zero};

use super::residual_edge::{EdgeId, ResidualEdge};
use crate::error::{GraphError, Result};

/// A single-commodity flow network over vertices `0..n`.
///
/// Edges live in one arena; every [`add_edge`](FlowNetwork::add_edge) appends a forward
/// edge and its zero-capacity reverse edge back to back, and each vertex keeps the ids of
/// its outgoing arcs in insertion order. That order drives breadth-first exploration, so
/// identical insertion sequences always produce identical flows.
///
/// # Examples
/// ```
/// use flowcut::cs::graph::FlowNetwork;
/// use num_bigint::BigInt;
///
/// let mut network = FlowNetwork::new(4, 0, 3).unwrap();
/// network.add_edge(0, 1, 3).unwrap();
/// network.add_edge(1, 3, 2).unwrap();
/// network.add_edge(0, 2, 1).unwrap();
/// network.add_edge(2, 3, 5).unwrap();
///
/// assert_eq!(network.max_flow(), BigInt::from(3));
/// ```
#[derive(Debug, Clone)]
pub struct FlowNetwork {
    source: usize,
    sink: usize,
    edges: Vec<ResidualEdge>,
    adjacency: Vec<Vec<EdgeId>>,
}

impl FlowNetwork {
    /// Creates an edgeless network with `n` vertices.
    ///
    /// # Errors
    /// * `InvalidVertex` if `source` or `sink` is not below `n`
    /// * `InvalidInput` if `source == sink`
    pub fn new(n: usize, source: usize, sink: usize) -> Result<Self> {
        for vertex in [source, sink] {
            if vertex >= n {
                return Err(GraphError::InvalidVertex {
                    vertex,
                    vertex_count: n,
                });
            }
        }
        if source == sink {
            return Err(GraphError::invalid_input(
                "source and sink must be distinct vertices",
            ));
        }

        Ok(FlowNetwork {
            source,
            sink,
            edges: Vec::new(),
            adjacency: vec![Vec::new(); n],
        })
    }

    /// Builds a network from `(from, to, capacity)` triples, inserted in iteration order.
    pub fn from_edges<I, C>(n: usize, source: usize, sink: usize, edges: I) -> Result<Self>
    where
        I: IntoIterator<Item = (usize, usize, C)>,
        C: Into<BigInt>,
    {
        let mut network = FlowNetwork::new(n, source, sink)?;
        for (from, to, capacity) in edges {
            network.add_edge(from, to, capacity)?;
        }
        Ok(network)
    }

    /// Inserts the arc `from -> to` with the given capacity, plus its residual twin `to -> from`.
    ///
    /// Self-loops and parallel arcs are accepted; each insertion is an independent edge.
    ///
    /// # Errors
    /// * `InvalidVertex` if either endpoint is out of range
    /// * `NegativeCapacity` if `capacity < 0`
    pub fn add_edge(
        &mut self,
        from: usize,
        to: usize,
        capacity: impl Into<BigInt>,
    ) -> Result<EdgeId> {
        self.check_vertex(from)?;
        self.check_vertex(to)?;
        let capacity = capacity.into();
        if capacity.is_negative() {
            return Err(GraphError::NegativeCapacity(capacity));
        }

        let forward = EdgeId(self.edges.len());
        self.edges.push(ResidualEdge::new(from, to, capacity));
        self.edges.push(ResidualEdge::new(to, from, BigInt::zero()));
        self.adjacency[from].push(forward);
        self.adjacency[to].push(forward.pair());
        Ok(forward)
    }

    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of caller-inserted edges (reverse edges are not counted).
    pub fn edge_count(&self) -> usize {
        self.edges.len() / 2
    }

    pub fn source(&self) -> usize {
        self.source
    }

    pub fn sink(&self) -> usize {
        self.sink
    }

    pub fn edge(&self, id: EdgeId) -> Result<&ResidualEdge> {
        self.edges.get(id.0).ok_or(GraphError::EdgeNotFound(id.0))
    }

    pub fn flow_of(&self, id: EdgeId) -> Result<BigInt> {
        self.edge(id).map(|edge| edge.flow().clone())
    }

    pub fn residual_of(&self, id: EdgeId) -> Result<BigInt> {
        self.edge(id).map(ResidualEdge::residual)
    }

    /// Ids of the arcs leaving `vertex`, forward and reverse interleaved in insertion order.
    pub fn out_edges(&self, vertex: usize) -> Result<&[EdgeId]> {
        self.check_vertex(vertex)?;
        Ok(&self.adjacency[vertex])
    }

    /// The caller-inserted edges, in insertion order.
    pub fn forward_edges(&self) -> impl Iterator<Item = (EdgeId, &ResidualEdge)> + '_ {
        self.edges
            .iter()
            .enumerate()
            .step_by(2)
            .map(|(index, edge)| (EdgeId(index), edge))
    }

    /// Sum of flow over every arc leaving `vertex`.
    ///
    /// Reverse arcs carry negated flow, so this is outflow minus inflow: zero for every
    /// internal vertex, the current flow value at the source.
    pub fn net_flow(&self, vertex: usize) -> Result<BigInt> {
        Ok(self
            .out_edges(vertex)?
            .iter()
            .map(|&id| self.edges[id.0].flow())
            .sum())
    }

    /// Flow currently leaving the source.
    pub fn total_flow(&self) -> BigInt {
        self.adjacency[self.source]
            .iter()
            .map(|&id| self.edges[id.0].flow())
            .sum()
    }

    /// Audits capacity bounds, skew symmetry and conservation over the whole network.
    pub fn check_invariants(&self) -> Result<()> {
        for (id, edge) in self.forward_edges() {
            let reverse = &self.edges[id.pair().0];
            if edge.flow().is_negative() || edge.flow() > edge.capacity() {
                return Err(GraphError::invariant(format!(
                    "edge {id} ({}->{}) has flow {} outside [0, {}]",
                    edge.from(),
                    edge.to(),
                    edge.flow(),
                    edge.capacity()
                )));
            }
            if !reverse.capacity().is_zero() {
                return Err(GraphError::invariant(format!(
                    "reverse edge {} has capacity {}",
                    id.pair(),
                    reverse.capacity()
                )));
            }
            if *reverse.flow() != -edge.flow() {
                return Err(GraphError::invariant(format!(
                    "edge {id} has flow {} but its pair carries {}",
                    edge.flow(),
                    reverse.flow()
                )));
            }
        }

        for vertex in 0..self.vertex_count() {
            if vertex == self.source || vertex == self.sink {
                continue;
            }
            let net = self.net_flow(vertex)?;
            if !net.is_zero() {
                return Err(GraphError::invariant(format!(
                    "vertex {vertex} has net outflow {net}"
                )));
            }
        }
        Ok(())
    }

    /// Pushes `delta` units along `id` and withdraws them from its pair in one step.
    ///
    /// # Panics
    /// Unless `0 < delta <= residual(id)`.
    pub(crate) fn push(&mut self, id: EdgeId, delta: &BigInt) {
        assert!(delta.is_positive(), "pushed flow must be positive, got {delta}");
        assert!(
            *delta <= self.edges[id.0].residual(),
            "pushing {delta} through edge {id} exceeds its residual capacity"
        );
        self.edges[id.0].shift_flow(delta);
        self.edges[id.pair().0].shift_flow(&-delta);
    }

    pub(crate) fn arcs(&self, vertex: usize) -> &[EdgeId] {
        &self.adjacency[vertex]
    }

    pub(crate) fn arc(&self, id: EdgeId) -> &ResidualEdge {
        &self.edges[id.0]
    }

    fn check_vertex(&self, vertex: usize) -> Result<()> {
        if vertex < self.vertex_count() {
            Ok(())
        } else {
            Err(GraphError::InvalidVertex {
                vertex,
                vertex_count: self.vertex_count(),
            })
        }
    }
}
