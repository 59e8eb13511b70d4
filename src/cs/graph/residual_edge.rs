use num_bigint::BigInt;
use num_traits::{Signed, Zero};
use std::fmt;

/// Handle to an edge stored in a [`FlowNetwork`](super::FlowNetwork).
///
/// Edges are allocated in consecutive forward/reverse pairs, so a forward edge
/// always has an even id and its pair is `id ^ 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EdgeId(pub(crate) usize);

impl EdgeId {
    pub fn index(self) -> usize {
        self.0
    }

    /// The other half of this edge's forward/reverse couple.
    pub fn pair(self) -> EdgeId {
        EdgeId(self.0 ^ 1)
    }

    /// Whether this is the edge a caller inserted, rather than its residual twin.
    pub fn is_forward(self) -> bool {
        self.0 & 1 == 0
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "e{}", self.0)
    }
}

/// A directed arc of the residual graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResidualEdge {
    from: usize,
    to: usize,
    capacity: BigInt,
    flow: BigInt,
}

impl ResidualEdge {
    pub(crate) fn new(from: usize, to: usize, capacity: BigInt) -> Self {
        ResidualEdge {
            from,
            to,
            capacity,
            flow: BigInt::zero(),
        }
    }

    pub fn from(&self) -> usize {
        self.from
    }

    pub fn to(&self) -> usize {
        self.to
    }

    pub fn capacity(&self) -> &BigInt {
        &self.capacity
    }

    pub fn flow(&self) -> &BigInt {
        &self.flow
    }

    /// Remaining capacity, `capacity - flow`.
    ///
    /// # Panics
    /// If the flow exceeds the capacity, which can only follow a broken augmentation.
    pub fn residual(&self) -> BigInt {
        let residual = &self.capacity - &self.flow;
        assert!(
            !residual.is_negative(),
            "edge {}->{} carries flow {} above capacity {}",
            self.from,
            self.to,
            self.flow,
            self.capacity
        );
        residual
    }

    pub fn is_saturated(&self) -> bool {
        self.residual().is_zero()
    }

    /// Shifts this edge's flow by `delta`, which may be negative when the pair is pushed.
    pub(crate) fn shift_flow(&mut self, delta: &BigInt) {
        let flow = &self.flow + delta;
        assert!(
            flow <= self.capacity,
            "flow on edge {}->{} would exceed capacity {}",
            self.from,
            self.to,
            self.capacity
        );
        self.flow = flow;
    }
}
