use ahash::AHashMap;
use rand::{SeedableRng, rngs::StdRng, seq::{IndexedRandom, SliceRandom}};

use crate::{
    error::{FlowError, Result},
    flow::{Tree, UnionFind},
    graph::Graph,
};

/// A spanning tree of one district, over local indices into `nodes`.
#[derive(Debug)]
pub(crate) struct PartTree {
    pub(crate) nodes: Vec<usize>,  // nodes[i] = graph index of local node i
    pub(crate) root: usize,        // local index of the district root
    pub(crate) tree: Tree,
}

/// Induced subgraph of a district: local index map plus `(edge, u, v)` triples.
struct Induced {
    nodes: Vec<usize>,
    edges: Vec<(usize, usize, usize)>,
}

impl Induced {
    fn new(graph: &Graph, nodes: &[usize]) -> Self {
        let local = nodes.iter().enumerate().map(|(i, &u)| (u, i)).collect::<AHashMap<_, _>>();

        let mut edges = Vec::new();
        for (i, &u) in nodes.iter().enumerate() {
            for (v, e) in graph.edges_with_ids(u) {
                // Each undirected edge once, from its lower-indexed endpoint.
                if u > v { continue }
                if let Some(&j) = local.get(&v) { edges.push((e, i, j)) }
            }
        }

        Self { nodes: nodes.to_vec(), edges }
    }

    fn local_root(&self, root: usize) -> usize {
        self.nodes.iter().position(|&u| u == root)
            .unwrap_or_else(|| unreachable!("district root belongs to its district"))
    }

    /// Number of connected components of the induced subgraph.
    fn components(&self) -> usize {
        let mut forest = UnionFind::new(self.nodes.len());
        for &(_, u, v) in &self.edges { forest.union(u, v); }
        forest.component_count()
    }
}

impl PartTree {
    /// Minimum spanning tree of the district (Kruskal). Ties on weight are
    /// broken by edge index, so the result is deterministic.
    pub(crate) fn minimum(graph: &Graph, district: u32, nodes: &[usize], root: usize) -> Result<Self> {
        let mut induced = Induced::new(graph, nodes);
        induced.edges.sort_by(|a, b| graph.edge_weight(a.0).total_cmp(&graph.edge_weight(b.0)).then(a.0.cmp(&b.0)));

        let mut forest = UnionFind::new(induced.nodes.len());
        let mut edges = Vec::with_capacity(induced.nodes.len().saturating_sub(1));
        for &(_, u, v) in &induced.edges {
            if forest.union(u, v) { edges.push((u, v)) }
        }

        if forest.component_count() > 1 {
            return Err(FlowError::DisconnectedPart { district, components: forest.component_count() })
        }

        Ok(Self {
            root: induced.local_root(root),
            tree: Tree::from_edges(induced.nodes.len(), &edges),
            nodes: induced.nodes,
        })
    }

    /// Uniformly random spanning tree of the district, using Wilson's algorithm.
    pub(crate) fn random(graph: &Graph, district: u32, nodes: &[usize], root: usize, seed: u64) -> Result<Self> {
        let induced = Induced::new(graph, nodes);

        // Random walks only terminate on a connected subgraph.
        let components = induced.components();
        if components > 1 { return Err(FlowError::DisconnectedPart { district, components }) }

        let size = induced.nodes.len();
        let mut adjacency = vec![Vec::new(); size];
        for &(_, u, v) in &induced.edges {
            adjacency[u].push(v);
            adjacency[v].push(u);
        }

        let rng = &mut StdRng::seed_from_u64(seed ^ (district as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15));

        // Randomize the order in which walks start; the first node seeds the tree.
        let mut order = (0..size).collect::<Vec<_>>();
        order.shuffle(rng);

        let mut parent = vec![None; size];
        if let Some(&first) = order.first() { parent[first] = Some(first) }

        // Loop-erased random walks (Wilson)
        let mut walk_start = vec![usize::MAX; size];
        let mut walk_position = vec![0; size];

        for &start in order.iter().skip(1) {
            if parent[start].is_some() { continue } // already in the tree

            let mut walk = vec![start];
            walk_start[start] = start;
            walk_position[start] = 0;

            // Walk until we hit the tree
            let mut current = start;
            while parent[current].is_none() {
                current = *adjacency[current].choose(rng)
                    .unwrap_or_else(|| unreachable!("connected part with several nodes has no isolated node"));

                if walk_start[current] == start && walk.get(walk_position[current]) == Some(&current) {
                    walk.truncate(walk_position[current] + 1);
                } else {
                    walk_start[current] = start;
                    walk_position[current] = walk.len();
                    walk.push(current);
                }
            }

            // Stitch loop-erased path into the tree (reverse)
            while let Some(node) = walk.pop() {
                if parent[node].is_some() { continue }
                parent[node] = Some(current);
                current = node;
            }
        }

        let edges = parent.iter().enumerate()
            .filter_map(|(u, &p)| p.filter(|&p| p != u).map(|p| (p, u)))
            .collect::<Vec<_>>();

        Ok(Self {
            root: induced.local_root(root),
            tree: Tree::from_edges(size, &edges),
            nodes: induced.nodes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{flow::label_descendants, graph::{WeightMatrix, grid_graph}, types::NodeId};

    fn all_nodes(graph: &Graph) -> Vec<usize> { (0..graph.node_count()).collect() }

    fn tree_edges_as_ids(graph: &Graph, part: &PartTree) -> Vec<(u64, u64)> {
        let mut edges = (0..part.tree.len())
            .flat_map(|u| part.tree.neighbors(u).iter().map(move |&v| (u, v)))
            .filter(|&(u, v)| u < v)
            .map(|(u, v)| {
                let (a, b) = (graph.node_id(part.nodes[u]).0, graph.node_id(part.nodes[v]).0);
                (a.min(b), a.max(b))
            })
            .collect::<Vec<_>>();
        edges.sort_unstable();
        edges
    }

    #[test]
    fn uniform_weights_take_edges_in_index_order() {
        // 2x2 grid: edges 1-3, 1-2, 2-4, 3-4; Kruskal keeps the first three.
        let graph = grid_graph(2, 2);
        let part = PartTree::minimum(&graph, 1, &all_nodes(&graph), 0).unwrap();

        assert_eq!(part.tree.edge_count(), 3);
        assert_eq!(tree_edges_as_ids(&graph, &part), vec![(1, 2), (1, 3), (2, 4)]);

        let labels = label_descendants(&part.tree, part.root);
        assert_eq!(labels.descendants, vec![4, 2, 1, 1]);
    }

    #[test]
    fn weights_steer_the_minimum_tree() {
        // Square 1-2-4-3-1 where edge 1-2 is the heaviest.
        let ids = [NodeId(1), NodeId(2), NodeId(3), NodeId(4)];
        let edges = [(NodeId(1), NodeId(2)), (NodeId(1), NodeId(3)), (NodeId(2), NodeId(4)), (NodeId(3), NodeId(4))];
        let graph = Graph::from_edges(&ids, &edges, Some(&[5.0, 1.0, 1.0, 1.0]), WeightMatrix::empty(4)).unwrap();

        let part = PartTree::minimum(&graph, 1, &all_nodes(&graph), 0).unwrap();
        assert_eq!(tree_edges_as_ids(&graph, &part), vec![(1, 3), (2, 4), (3, 4)]);
    }

    #[test]
    fn subgraph_is_restricted_to_the_part() {
        // 1 2 3
        // 4 5 6   district {2, 3, 5, 6}
        let graph = grid_graph(2, 3);
        let part = PartTree::minimum(&graph, 2, &[1, 2, 4, 5], 1).unwrap();

        assert_eq!(part.nodes, vec![1, 2, 4, 5]);
        assert_eq!(part.root, 0);
        assert_eq!(part.tree.edge_count(), 3);
        assert!(tree_edges_as_ids(&graph, &part).iter().all(|&(a, b)| ![1, 4].contains(&a) && ![1, 4].contains(&b)));
    }

    #[test]
    fn disconnected_part_is_reported() {
        // Opposite corners of a 2x2 grid.
        let graph = grid_graph(2, 2);
        assert!(matches!(
            PartTree::minimum(&graph, 7, &[0, 3], 0),
            Err(FlowError::DisconnectedPart { district: 7, components: 2 })
        ));
        assert!(matches!(
            PartTree::random(&graph, 7, &[0, 3], 0, 1),
            Err(FlowError::DisconnectedPart { district: 7, components: 2 })
        ));
    }

    #[test]
    fn singleton_part_has_no_edges() {
        let graph = grid_graph(2, 2);
        let part = PartTree::minimum(&graph, 1, &[2], 2).unwrap();
        assert_eq!(part.tree.len(), 1);
        assert_eq!(part.tree.edge_count(), 0);

        let part = PartTree::random(&graph, 1, &[2], 2, 99).unwrap();
        assert_eq!(part.tree.edge_count(), 0);
    }

    #[test]
    fn random_trees_span_the_part() {
        let graph = grid_graph(5, 5);
        let nodes = all_nodes(&graph);

        for seed in 0..20 {
            let part = PartTree::random(&graph, 1, &nodes, 0, seed).unwrap();
            assert_eq!(part.tree.edge_count(), nodes.len() - 1);

            // Spanning: every node reached from the root.
            let labels = label_descendants(&part.tree, part.root);
            assert_eq!(labels.order.len(), nodes.len());
            assert_eq!(labels.descendants[part.root], nodes.len());

            // Every tree edge is a grid edge.
            for (a, b) in tree_edges_as_ids(&graph, &part) {
                let (u, v) = (graph.index_of(NodeId(a)).unwrap(), graph.index_of(NodeId(b)).unwrap());
                assert!(graph.find_edge(u, v).is_some());
            }
        }
    }

    #[test]
    fn random_trees_are_reproducible() {
        let graph = grid_graph(4, 4);
        let nodes = all_nodes(&graph);
        let a = PartTree::random(&graph, 3, &nodes, 0, 42).unwrap();
        let b = PartTree::random(&graph, 3, &nodes, 0, 42).unwrap();
        assert_eq!(tree_edges_as_ids(&graph, &a), tree_edges_as_ids(&graph, &b));
    }
}
