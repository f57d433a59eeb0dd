/// An undirected tree over local node indices `0..len`.
#[derive(Clone, Debug, Default)]
pub struct Tree {
    adjacency: Vec<Vec<usize>>,
}

impl Tree {
    /// Build a tree from its edge list. The caller guarantees the edges form a tree.
    pub fn from_edges(num_nodes: usize, edges: &[(usize, usize)]) -> Self {
        let mut adjacency = vec![Vec::new(); num_nodes];
        for &(u, v) in edges {
            assert!(u < num_nodes && v < num_nodes, "edge ({u}, {v}) out of range for {num_nodes} nodes");
            adjacency[u].push(v);
            adjacency[v].push(u);
        }
        Self { adjacency }
    }

    #[inline] pub fn len(&self) -> usize { self.adjacency.len() }

    #[inline] pub fn is_empty(&self) -> bool { self.adjacency.is_empty() }

    #[inline] pub fn edge_count(&self) -> usize { self.adjacency.iter().map(Vec::len).sum::<usize>() / 2 }

    #[inline] pub fn neighbors(&self, node: usize) -> &[usize] { &self.adjacency[node] }
}

/// Parent/child structure and subtree sizes of a tree rooted at `root`.
#[derive(Clone, Debug)]
pub struct TreeLabels {
    pub root: usize,
    pub parent: Vec<Option<usize>>,  // None for the root (and unreached nodes)
    pub children: Vec<Vec<usize>>,
    pub descendants: Vec<usize>,     // subtree size including the node, 0 if unreached
    pub order: Vec<usize>,           // first-visit order, root first
}

/// Root `tree` at `root` and count each node's descendants (itself included).
///
/// The first pass is an explicit-stack depth-first search that marks nodes as
/// visited when popped; unvisited neighbors become children, and childless
/// nodes get a count of 1. The second pass walks the first-visit order in
/// reverse, so every child is finalized before its parent.
pub fn label_descendants(tree: &Tree, root: usize) -> TreeLabels {
    assert!(root < tree.len(), "root {root} out of range for {} nodes", tree.len());

    let n = tree.len();
    let mut visited = vec![false; n];
    let mut parent = vec![None; n];
    let mut children = vec![Vec::new(); n];
    let mut descendants = vec![0usize; n];
    let mut order = Vec::with_capacity(n);

    let mut stack = vec![root];
    while let Some(u) = stack.pop() {
        visited[u] = true;
        order.push(u);

        for &v in tree.neighbors(u) {
            if !visited[v] {
                parent[v] = Some(u);
                children[u].push(v);
                stack.push(v);
            }
        }

        if children[u].is_empty() { descendants[u] = 1 }
    }

    for &u in order.iter().rev() {
        if descendants[u] == 0 {
            descendants[u] = 1 + children[u].iter().map(|&c| descendants[c]).sum::<usize>();
        }
    }

    TreeLabels { root, parent, children, descendants, order }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_counts_consistent(labels: &TreeLabels) {
        for &u in &labels.order {
            let sum = labels.children[u].iter().map(|&c| labels.descendants[c]).sum::<usize>();
            assert_eq!(labels.descendants[u], 1 + sum, "node {u}");
            assert!(labels.descendants[u] >= 1);
        }
    }

    #[test]
    fn path_counts_down_from_root() {
        // 0 - 1 - 2 - 3 - 4
        let tree = Tree::from_edges(5, &[(0, 1), (1, 2), (2, 3), (3, 4)]);
        let labels = label_descendants(&tree, 0);

        assert_eq!(labels.descendants, vec![5, 4, 3, 2, 1]);
        assert_eq!(labels.parent, vec![None, Some(0), Some(1), Some(2), Some(3)]);
        assert_eq!(labels.order, vec![0, 1, 2, 3, 4]);
        assert_counts_consistent(&labels);
    }

    #[test]
    fn path_rooted_in_the_middle() {
        let tree = Tree::from_edges(5, &[(0, 1), (1, 2), (2, 3), (3, 4)]);
        let labels = label_descendants(&tree, 2);

        assert_eq!(labels.descendants, vec![1, 2, 5, 2, 1]);
        assert_eq!(labels.children[2], vec![1, 3]);
        assert_counts_consistent(&labels);
    }

    #[test]
    fn star_has_unit_leaves() {
        let tree = Tree::from_edges(6, &[(0, 1), (0, 2), (0, 3), (0, 4), (0, 5)]);
        let labels = label_descendants(&tree, 0);

        assert_eq!(labels.descendants, vec![6, 1, 1, 1, 1, 1]);
        assert_eq!(labels.children[0], vec![1, 2, 3, 4, 5]);
        assert!((1..6).all(|u| labels.children[u].is_empty()));
    }

    #[test]
    fn star_rooted_at_a_leaf() {
        let tree = Tree::from_edges(4, &[(0, 1), (0, 2), (0, 3)]);
        let labels = label_descendants(&tree, 3);

        assert_eq!(labels.descendants, vec![3, 1, 1, 4]);
        assert_eq!(labels.parent[0], Some(3));
        assert_counts_consistent(&labels);
    }

    #[test]
    fn balanced_binary_tree() {
        //        0
        //      /   \
        //     1     2
        //    / \   / \
        //   3   4 5   6
        let tree = Tree::from_edges(7, &[(0, 1), (0, 2), (1, 3), (1, 4), (2, 5), (2, 6)]);
        let labels = label_descendants(&tree, 0);

        assert_eq!(labels.descendants, vec![7, 3, 3, 1, 1, 1, 1]);
        assert_eq!(labels.descendants[labels.root], tree.len());
        assert_counts_consistent(&labels);

        // Every child is discovered after its parent.
        let position = |u: usize| labels.order.iter().position(|&v| v == u).unwrap();
        for u in 1..7 {
            assert!(position(labels.parent[u].unwrap()) < position(u));
        }
    }

    #[test]
    fn single_node_tree() {
        let tree = Tree::from_edges(1, &[]);
        let labels = label_descendants(&tree, 0);

        assert_eq!(labels.descendants, vec![1]);
        assert_eq!(labels.parent, vec![None]);
        assert_eq!(tree.edge_count(), 0);
    }

    #[test]
    fn two_by_two_grid_tree() {
        // Grid nodes 1..4 as local 0..3, tree edges 1-2, 1-3, 2-4.
        let tree = Tree::from_edges(4, &[(0, 1), (0, 2), (1, 3)]);
        let labels = label_descendants(&tree, 0);
        assert_eq!(labels.descendants, vec![4, 2, 1, 1]);
    }

    #[test]
    #[should_panic(expected = "root 3 out of range")]
    fn root_out_of_range_panics() {
        label_descendants(&Tree::from_edges(3, &[(0, 1), (1, 2)]), 3);
    }

    #[test]
    #[should_panic(expected = "out of range for 2 nodes")]
    fn edge_out_of_range_panics() {
        Tree::from_edges(2, &[(0, 2)]);
    }
}
