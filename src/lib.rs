//! Exact maximum flow and minimum cut on residual flow networks.
//!
//! Capacities are arbitrary-precision integers, so networks with capacities such as
//! `10^100` are solved without overflow or rounding.

pub mod cs;
pub mod error;

pub use cs::graph;
pub use error::{GraphError, Result};
