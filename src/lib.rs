#![doc = "OpenMander flow construction API"]
pub mod cli;
pub mod commands;
mod config;
mod error;
mod flow;
mod graph;
mod io;
mod partition;
mod types;

#[doc(inline)]
pub use config::{DEFAULT_BALANCE_THRESHOLD, FlowConfig, SpanningTreeMethod};

#[doc(inline)]
pub use error::{FlowError, Result};

#[doc(inline)]
pub use flow::{FlowBuilder, FlowEntry, Flows, FlowsOutput, RootOutput, Tree, TreeLabels, label_descendants};

#[doc(inline)]
pub use graph::{Graph, WeightMatrix, grid_graph};

#[doc(inline)]
pub use io::{PartitionDocument, write_json};

#[doc(inline)]
pub use partition::Partition;

#[doc(inline)]
pub use types::NodeId;
