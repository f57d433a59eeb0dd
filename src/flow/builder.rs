use ndarray::Array2;
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::{
    config::{FlowConfig, SpanningTreeMethod},
    error::Result,
    flow::{Flows, label_descendants, spanning::PartTree},
    partition::Partition,
};

/// Flow entries of one district: all go in row `root`.
#[derive(Debug)]
struct DistrictFlows {
    district: u32,
    root: usize,
    entries: Vec<(usize, f64)>, // (directed column, value)
}

/// Builds feasible Shirabe flows for a partition, one rooted spanning tree
/// per district.
#[derive(Clone, Debug, Default)]
pub struct FlowBuilder {
    config: FlowConfig,
}

impl FlowBuilder {
    pub fn new(config: FlowConfig) -> Self { Self { config } }

    #[inline] pub fn config(&self) -> &FlowConfig { &self.config }

    /// Build the `n x 2m` flow matrix for `partition`.
    ///
    /// Each district is rooted at its smallest node id. Every edge of the
    /// district's spanning tree carries, in the root's row and in the
    /// parent-to-child orientation, the size of the child's subtree. Any
    /// failing district fails the whole build.
    pub fn build(&self, partition: &Partition) -> Result<Flows> {
        self.check_balance(partition)?;

        let parts = partition.parts().collect::<Vec<_>>();
        let districts = if self.config.parallel {
            parts.par_iter()
                .map(|&(district, nodes)| self.district_flows(partition, district, nodes))
                .collect::<Result<Vec<_>>>()?
        } else {
            parts.iter()
                .map(|&(district, nodes)| self.district_flows(partition, district, nodes))
                .collect::<Result<Vec<_>>>()?
        };

        let graph = partition.graph();
        let mut matrix = Array2::zeros((graph.node_count(), 2 * graph.edge_count()));
        for flows in &districts {
            for &(column, value) in &flows.entries { matrix[[flows.root, column]] = value }
        }

        info!(
            districts = districts.len(),
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            entries = districts.iter().map(|d| d.entries.len()).sum::<usize>(),
            "built feasible flows"
        );

        Ok(Flows {
            matrix,
            roots: districts.iter().map(|d| (d.district, d.root)).collect(),
        })
    }

    /// Reject (or warn about) plans outside the population tolerance.
    fn check_balance(&self, partition: &Partition) -> Result<()> {
        let series = &self.config.population_series;
        let threshold = self.config.balance_threshold;

        if self.config.enforce_balance { return partition.check_balance(series, threshold) }

        match partition.population_deviation(series) {
            Ok(deviation) if deviation > threshold => {
                warn!(deviation, threshold, series = series.as_str(), "plan is outside population tolerance");
            }
            Ok(_) => {}
            Err(err) => debug!(%err, "skipping population balance check"),
        }
        Ok(())
    }

    fn district_flows(&self, partition: &Partition, district: u32, nodes: &[usize]) -> Result<DistrictFlows> {
        let graph = partition.graph();
        let root = partition.root(district)
            .unwrap_or_else(|| unreachable!("every listed district has a root"));

        let part = match self.config.spanning_tree {
            SpanningTreeMethod::Minimum => PartTree::minimum(graph, district, nodes, root)?,
            SpanningTreeMethod::Random { seed } => PartTree::random(graph, district, nodes, root, seed)?,
        };
        let labels = label_descendants(&part.tree, part.root);

        // Walk the tree from the root, writing the child's subtree size on
        // each parent -> child edge.
        let mut entries = Vec::with_capacity(nodes.len().saturating_sub(1));
        let mut stack = vec![part.root];
        while let Some(u) = stack.pop() {
            for &child in &labels.children[u] {
                stack.push(child);
                let Some(column) = graph.directed_column(part.nodes[u], part.nodes[child]) else {
                    unreachable!("tree edges are graph edges")
                };
                entries.push((column, labels.descendants[child] as f64));
            }
        }

        debug!(district, root = %graph.node_id(root), size = nodes.len(), "labeled district tree");

        Ok(DistrictFlows { district, root, entries })
    }
}
