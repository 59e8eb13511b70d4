pub mod connectivity;
pub mod edmond_karp;
pub mod flow_network;
pub mod matching;
pub mod min_cut;
pub mod residual_edge;


pub use connectivity::{edge_connectivity, edge_disjoint_paths};
pub use edmond_karp::{edmond_karp, AugmentingPath, FlowSummary, MaxFlowConfig};
pub use flow_network::FlowNetwork;
pub use matching::FlowMatching;
pub use min_cut::MinCut;
pub use residual_edge::{EdgeId, ResidualEdge};
