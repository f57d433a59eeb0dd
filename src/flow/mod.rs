mod builder;
mod flows;
mod spanning;
mod tree;
mod union_find;

pub use builder::FlowBuilder;
pub use flows::{FlowEntry, Flows, FlowsOutput, RootOutput};
pub use tree::{Tree, TreeLabels, label_descendants};
pub(self) use union_find::UnionFind;
