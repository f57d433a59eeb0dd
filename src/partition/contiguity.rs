use std::collections::VecDeque;

use crate::{
    error::{FlowError, Result},
    partition::Partition,
};

impl Partition {
    /// Find all connected components (as node lists) inside `district`.
    pub fn find_components(&self, district: u32) -> Vec<Vec<usize>> {
        self.components_with(district, &mut vec![false; self.num_nodes()])
    }

    /// Breadth-first components of `district`, marking nodes in a shared
    /// `visited` table. Parts are disjoint, so one table serves every district.
    fn components_with(&self, district: u32, visited: &mut [bool]) -> Vec<Vec<usize>> {
        assert!(visited.len() == self.num_nodes(), "visited must have length equal to number of nodes");
        let Some(nodes) = self.part(district) else { return Vec::new() };
        let mut components = Vec::new();

        for &u in nodes {
            if visited[u] { continue }
            visited[u] = true;

            let mut component = Vec::new();
            let mut queue = VecDeque::from([u]);
            while let Some(v) = queue.pop_front() {
                component.push(v);
                for w in self.graph().edges(v) {
                    if !visited[w] && self.assignment(w) == district {
                        visited[w] = true;
                        queue.push_back(w);
                    }
                }
            }
            components.push(component);
        }
        components
    }

    /// Check if `district` induces a connected subgraph.
    pub fn is_contiguous(&self, district: u32) -> bool {
        self.find_components(district).len() <= 1
    }

    /// Check that every district is contiguous, reporting the first that is not.
    pub fn check_contiguity(&self) -> Result<()> {
        let mut visited = vec![false; self.num_nodes()];
        for &district in self.districts() {
            let components = self.components_with(district, &mut visited).len();
            if components > 1 { return Err(FlowError::DisconnectedPart { district, components }) }
        }
        Ok(())
    }
}
