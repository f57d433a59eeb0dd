use std::{collections::HashMap, sync::Arc};

use tracing::debug;

use crate::{
    error::{FlowError, Result},
    graph::Graph,
    partition::PartitionSet,
    types::NodeId,
};

/// A total assignment of the nodes of a graph to positive district ids.
#[derive(Clone, Debug)]
pub struct Partition {
    graph: Arc<Graph>,
    districts: Vec<u32>,      // districts[p] = district id of part p, ascending
    parts: PartitionSet,      // node -> part p
    roots: Vec<usize>,        // roots[p] = node with the smallest id in part p
}

impl Partition {
    /// Construct a partition from one district id per node (by node index).
    pub fn new(graph: impl Into<Arc<Graph>>, assignment: &[u32]) -> Result<Self> {
        let graph: Arc<Graph> = graph.into();
        if assignment.len() != graph.node_count() {
            return Err(FlowError::AssignmentLength { expected: graph.node_count(), found: assignment.len() })
        }
        if let Some(node) = assignment.iter().position(|&d| d == 0) {
            return Err(FlowError::InvalidDistrict { node: graph.node_id(node), district: 0 })
        }

        let mut districts = assignment.to_vec();
        districts.sort_unstable();
        districts.dedup();

        let parts = PartitionSet::from_assignments(
            districts.len(),
            &assignment.iter()
                .map(|d| districts.binary_search(d).unwrap_or_else(|_| unreachable!()))
                .collect::<Vec<_>>(),
        );

        let roots = parts.iter_sets()
            .map(|nodes| *nodes.iter().min_by_key(|&&u| graph.node_id(u)).unwrap_or_else(|| unreachable!("parts are never empty")))
            .collect();

        Ok(Self { graph, districts, parts, roots })
    }

    /// Construct a partition from a (possibly partial) map of node ids to
    /// districts. Missing nodes inherit the district of an assigned neighbor.
    ///
    /// Unassigned nodes are visited in reverse index order. Each takes the
    /// district of its last assigned neighbor in adjacency order, and the new
    /// assignment is visible to the nodes visited after it. Passes repeat over
    /// the nodes still unassigned until a pass makes no progress.
    pub fn from_map(graph: impl Into<Arc<Graph>>, assignment: &HashMap<NodeId, u32>) -> Result<Self> {
        let graph: Arc<Graph> = graph.into();

        let mut resolved = vec![0u32; graph.node_count()];
        for (&id, &district) in assignment {
            let node = graph.index_of(id).ok_or(FlowError::UnknownNode(id))?;
            if district == 0 { return Err(FlowError::InvalidDistrict { node: id, district }) }
            resolved[node] = district;
        }

        let mut pending = (0..graph.node_count()).rev().filter(|&u| resolved[u] == 0).collect::<Vec<_>>();
        let mut pass = 0;
        while !pending.is_empty() {
            let mut inherited = 0;
            for &u in &pending {
                let last = graph.edges(u).map(|v| resolved[v]).filter(|&d| d != 0).last();
                if let Some(district) = last {
                    resolved[u] = district;
                    inherited += 1;
                }
            }

            if inherited == 0 {
                let node = pending.iter().copied().min().unwrap_or_else(|| unreachable!());
                return Err(FlowError::InvalidAssignment { node: graph.node_id(node) })
            }

            pass += 1;
            debug!(pass, inherited, remaining = pending.len() - inherited, "resolving unassigned nodes");
            pending.retain(|&u| resolved[u] == 0);
        }

        Self::new(graph, &resolved)
    }

    /// Get a reference to the underlying graph.
    #[inline] pub fn graph(&self) -> &Graph { &self.graph }

    /// Get the number of nodes in the underlying graph.
    #[inline] pub fn num_nodes(&self) -> usize { self.graph.node_count() }

    /// Get the number of districts.
    #[inline] pub fn num_districts(&self) -> usize { self.parts.num_sets() }

    /// District ids in ascending order.
    #[inline] pub fn districts(&self) -> &[u32] { &self.districts }

    /// Get the district of a given node.
    #[inline] pub fn assignment(&self, node: usize) -> u32 { self.districts[self.parts.find(node)] }

    /// Get a complete vector of district ids for each node.
    pub fn assignments(&self) -> Vec<u32> {
        self.parts.assignments().iter().map(|&p| self.districts[p]).collect()
    }

    /// Position of `district` in `districts()`.
    #[inline]
    fn part_index(&self, district: u32) -> Option<usize> {
        self.districts.binary_search(&district).ok()
    }

    /// Nodes of `district` in ascending index order, or None if it has none.
    #[inline]
    pub fn part(&self, district: u32) -> Option<&[usize]> {
        self.part_index(district).map(|p| self.parts.get(p))
    }

    /// Iterator over `(district, nodes)` in ascending district order.
    pub fn parts(&self) -> impl Iterator<Item = (u32, &[usize])> + '_ {
        self.districts.iter().copied().zip(self.parts.iter_sets())
    }

    /// Node with the smallest id in `district`.
    #[inline]
    pub fn root(&self, district: u32) -> Option<usize> {
        self.part_index(district).map(|p| self.roots[p])
    }

    /// Sum of a given series over the nodes of `district`.
    pub fn part_total(&self, series: &str, district: u32) -> Result<f64> {
        self.graph.node_weights().sum_over(series, self.part(district).unwrap_or(&[]))
    }

    /// Sum of a given series for each district, in `districts()` order.
    pub fn part_totals(&self, series: &str) -> Result<Vec<f64>> {
        self.parts().map(|(_, nodes)| self.graph.node_weights().sum_over(series, nodes)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::grid_graph;

    fn map(pairs: &[(u64, u32)]) -> HashMap<NodeId, u32> {
        pairs.iter().map(|&(id, d)| (NodeId(id), d)).collect()
    }

    #[test]
    fn districts_are_sorted_and_distinct() {
        // 1 2 3
        // 4 5 6
        let partition = Partition::new(grid_graph(2, 3), &[7, 7, 3, 7, 3, 3]).unwrap();
        assert_eq!(partition.districts(), &[3, 7]);
        assert_eq!(partition.num_districts(), 2);
        assert_eq!(partition.part(7), Some(&[0, 1, 3][..]));
        assert_eq!(partition.part(3), Some(&[2, 4, 5][..]));
        assert_eq!(partition.part(5), None);
        assert_eq!(partition.assignment(4), 3);
        assert_eq!(partition.assignments(), vec![7, 7, 3, 7, 3, 3]);
    }

    #[test]
    fn root_is_smallest_node_id() {
        let partition = Partition::new(grid_graph(2, 3), &[1, 2, 2, 1, 1, 2]).unwrap();
        assert_eq!(partition.root(1).map(|u| partition.graph().node_id(u)), Some(NodeId(1)));
        assert_eq!(partition.root(2).map(|u| partition.graph().node_id(u)), Some(NodeId(2)));
    }

    #[test]
    fn root_ignores_node_position() {
        let ids = [NodeId(30), NodeId(10), NodeId(20)];
        let edges = [(NodeId(30), NodeId(10)), (NodeId(10), NodeId(20))];
        let graph = Graph::from_edges(&ids, &edges, None, crate::graph::WeightMatrix::empty(3)).unwrap();
        let partition = Partition::new(graph, &[1, 1, 1]).unwrap();
        assert_eq!(partition.root(1), Some(1));
    }

    #[test]
    fn part_totals_sum_population() {
        let partition = Partition::new(grid_graph(2, 2), &[1, 1, 1, 2]).unwrap();
        assert_eq!(partition.part_total("population", 1).unwrap(), 3.0);
        assert_eq!(partition.part_totals("population").unwrap(), vec![3.0, 1.0]);
    }

    #[test]
    fn rejects_bad_assignments() {
        assert!(matches!(
            Partition::new(grid_graph(2, 2), &[1, 1, 1]),
            Err(FlowError::AssignmentLength { expected: 4, found: 3 })
        ));
        assert!(matches!(
            Partition::new(grid_graph(2, 2), &[1, 0, 1, 1]),
            Err(FlowError::InvalidDistrict { node: NodeId(2), district: 0 })
        ));
    }

    #[test]
    fn unassigned_nodes_inherit_from_neighbors() {
        // 1 2 3
        // 4 5 6   with only 1 -> 1 and 3 -> 2 given.
        let partition = Partition::from_map(grid_graph(2, 3), &map(&[(1, 1), (3, 2)])).unwrap();

        // Visited 6, 5, 4, 2: 6 takes 3's district, 5 takes 6's, 4 sees 1 then 5
        // and keeps the later, 2 sees 1, 5, 3 and keeps 3's.
        assert_eq!(partition.assignments(), vec![1, 2, 2, 2, 2, 2]);
    }

    #[test]
    fn last_assigned_neighbor_wins() {
        // 1 - 2 - 3 path with both ends given different districts.
        let ids = [NodeId(1), NodeId(2), NodeId(3)];
        let edges = [(NodeId(1), NodeId(2)), (NodeId(2), NodeId(3))];
        let graph = Graph::from_edges(&ids, &edges, None, crate::graph::WeightMatrix::empty(3)).unwrap();
        let partition = Partition::from_map(graph, &map(&[(1, 4), (3, 9)])).unwrap();
        assert_eq!(partition.assignments(), vec![4, 9, 9]);
    }

    #[test]
    fn later_passes_reach_distant_nodes() {
        // 1 - 2 - 3 - 4 with only 4 given: the reverse sweep chains 3, 2, 1 in one pass.
        let ids = (1..=4).map(NodeId).collect::<Vec<_>>();
        let edges = [(NodeId(1), NodeId(2)), (NodeId(2), NodeId(3)), (NodeId(3), NodeId(4))];
        let graph = Graph::from_edges(&ids, &edges, None, crate::graph::WeightMatrix::empty(4)).unwrap();
        assert_eq!(Partition::from_map(graph, &map(&[(4, 2)])).unwrap().assignments(), vec![2, 2, 2, 2]);

        // With only 1 given, the first pass assigns just 2; later passes finish the path.
        let graph = Graph::from_edges(&ids, &edges, None, crate::graph::WeightMatrix::empty(4)).unwrap();
        assert_eq!(Partition::from_map(graph, &map(&[(1, 5)])).unwrap().assignments(), vec![5, 5, 5, 5]);
    }

    #[test]
    fn isolated_unassigned_node_is_an_error() {
        let ids = [NodeId(1), NodeId(2), NodeId(3)];
        let graph = Graph::from_edges(&ids, &[(NodeId(1), NodeId(2))], None, crate::graph::WeightMatrix::empty(3)).unwrap();
        let result = Partition::from_map(graph, &map(&[(1, 1), (2, 1)]));
        assert!(matches!(result, Err(FlowError::InvalidAssignment { node: NodeId(3) })));
    }

    #[test]
    fn map_with_unknown_node_is_an_error() {
        let result = Partition::from_map(grid_graph(1, 2), &map(&[(1, 1), (9, 1)]));
        assert!(matches!(result, Err(FlowError::UnknownNode(NodeId(9)))));
    }
}
