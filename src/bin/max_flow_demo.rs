//! Runs a max-flow computation and prints the flow value and a minimum cut.
//!
//! With no argument, solves the four-vertex network whose edges carry `10^100` units
//! except for a single unit-capacity cross edge. Otherwise reads a network from the
//! given file: a header line `n source sink`, then one `from to capacity` line per edge.
//! Set `RUST_LOG=debug` to see solver progress.

use flowcut::cs::graph::FlowNetwork;
use flowcut::GraphError;
use log::info;
use num_bigint::BigInt;
use std::error::Error;
use std::{env, fs};

fn parse_network(text: &str) -> Result<FlowNetwork, Box<dyn Error>> {
    let mut lines = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'));

    let header = lines
        .next()
        .ok_or_else(|| GraphError::invalid_input("missing `n source sink` header"))?;
    let fields: Vec<usize> = header
        .split_whitespace()
        .map(str::parse)
        .collect::<Result<_, _>>()?;
    let [n, source, sink] = fields[..] else {
        return Err(GraphError::invalid_input(format!("bad header: {header}")).into());
    };

    let mut network = FlowNetwork::new(n, source, sink)?;
    for line in lines {
        let parts: Vec<&str> = line.split_whitespace().collect();
        let [from, to, capacity] = parts[..] else {
            return Err(GraphError::invalid_input(format!("bad edge line: {line}")).into());
        };
        network.add_edge(from.parse()?, to.parse()?, capacity.parse::<BigInt>()?)?;
    }
    Ok(network)
}

fn googol_network() -> Result<FlowNetwork, GraphError> {
    let big = BigInt::from(10).pow(100);
    FlowNetwork::from_edges(
        4,
        0,
        3,
        [
            (0, 1, big.clone()),
            (0, 2, big.clone()),
            (1, 2, BigInt::from(1)),
            (1, 3, big.clone()),
            (2, 3, big),
        ],
    )
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let mut network = match env::args().nth(1) {
        Some(path) => {
            info!("reading network from {path}");
            parse_network(&fs::read_to_string(path)?)?
        }
        None => googol_network()?,
    };
    info!(
        "solving {} vertices, {} edges",
        network.vertex_count(),
        network.edge_count()
    );

    let flow = network.max_flow();
    println!("The maximum flow is: {flow}");

    let cut = network.min_cut();
    println!("Source side of a minimum cut: {:?}", cut.source_side);
    for &id in &cut.cut_edges {
        let edge = network.edge(id)?;
        println!("  cut edge {} -> {} (capacity {})", edge.from(), edge.to(), edge.capacity());
    }
    Ok(())
}
