mod graph;
mod grid;
mod weights;

pub use graph::Graph;
pub use grid::grid_graph;
pub use weights::WeightMatrix;
