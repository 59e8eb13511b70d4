//! Edge version of Menger's theorem on undirected graphs.
//!
//! The maximum number of edge-disjoint `s`-`t` paths equals the minimum number of edges
//! whose removal disconnects `t` from `s`. Both are read off a unit-capacity max flow in
//! which every undirected edge becomes two opposite arcs.

use num_bigint::BigInt;
use num_traits::{One, ToPrimitive};

use super::flow_network::FlowNetwork;
use super::residual_edge::EdgeId;
use crate::error::{GraphError, Result};

fn unit_network(
    n: usize,
    edges: &[(usize, usize)],
    s: usize,
    t: usize,
) -> Result<(FlowNetwork, Vec<(EdgeId, EdgeId)>)> {
    let mut network = FlowNetwork::new(n, s, t)?;
    let mut arcs = Vec::with_capacity(edges.len());
    for &(u, v) in edges {
        let forward = network.add_edge(u, v, 1)?;
        let backward = network.add_edge(v, u, 1)?;
        arcs.push((forward, backward));
    }
    Ok((network, arcs))
}

fn flow_units(flow: &BigInt) -> Result<usize> {
    flow.to_usize()
        .ok_or_else(|| GraphError::invariant(format!("unit flow {flow} does not fit in usize")))
}

/// Minimum number of edges separating `s` from `t` in an undirected graph.
///
/// # Errors
/// * `InvalidVertex` if any endpoint is not below `n`
/// * `InvalidInput` if `s == t`
pub fn edge_connectivity(n: usize, edges: &[(usize, usize)], s: usize, t: usize) -> Result<usize> {
    let (mut network, _) = unit_network(n, edges, s, t)?;
    flow_units(&network.max_flow())
}

/// A maximum family of pairwise edge-disjoint simple `s`-`t` paths, as vertex sequences.
///
/// # Errors
/// Same as [`edge_connectivity`].
pub fn edge_disjoint_paths(
    n: usize,
    edges: &[(usize, usize)],
    s: usize,
    t: usize,
) -> Result<Vec<Vec<usize>>> {
    let (mut network, arcs) = unit_network(n, edges, s, t)?;
    let count = flow_units(&network.max_flow())?;

    // An undirected edge used in both directions carries no net flow.
    let mut out: Vec<Vec<usize>> = vec![Vec::new(); n];
    for (forward, backward) in arcs {
        let there = network.flow_of(forward)?.is_one();
        let back = network.flow_of(backward)?.is_one();
        if there != back {
            let used = if there { forward } else { backward };
            let edge = network.edge(used)?;
            out[edge.from()].push(edge.to());
        }
    }
    for targets in &mut out {
        targets.reverse();
    }

    let mut paths = Vec::with_capacity(count);
    let mut position = vec![None; n];
    for _ in 0..count {
        let mut path = vec![s];
        position[s] = Some(0);
        let mut current = s;
        while current != t {
            let next = out[current].pop().ok_or_else(|| {
                GraphError::invariant(format!("flow decomposition stuck at vertex {current}"))
            })?;
            match position[next] {
                Some(index) => {
                    // Erase the cycle closed by this arc.
                    for &vertex in &path[index + 1..] {
                        position[vertex] = None;
                    }
                    path.truncate(index + 1);
                }
                None => {
                    position[next] = Some(path.len());
                    path.push(next);
                }
            }
            current = next;
        }
        for &vertex in &path {
            position[vertex] = None;
        }
        paths.push(path);
    }
    Ok(paths)
}
