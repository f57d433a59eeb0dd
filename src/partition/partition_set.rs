/// PartitionSet maintains a total assignment of elements to sets.
#[derive(Debug, Clone)]
pub(crate) struct PartitionSet {
    sets: Vec<Vec<usize>>,  // sets[s] = elements in set s, ascending
    index: Vec<usize>,      // index[e] = s when e is in sets[s]
}

impl PartitionSet {
    /// Build a partition of `assignments.len()` elements into `num_sets` sets.
    pub(crate) fn from_assignments(num_sets: usize, assignments: &[usize]) -> Self {
        assert!(num_sets > 0 || assignments.is_empty(), "must have at least one set");

        let mut sets = vec![Vec::new(); num_sets];
        for (elem, &set) in assignments.iter().enumerate() {
            assert!(set < num_sets, "set out of range");
            sets[set].push(elem);
        }

        Self { sets, index: assignments.to_vec() }
    }

    /// Number of sets.
    #[inline] pub(crate) fn num_sets(&self) -> usize { self.sets.len() }

    /// Return the set that `elem` is in.
    #[inline]
    pub(crate) fn find(&self, elem: usize) -> usize {
        debug_assert!(elem < self.index.len(), "element out of range");
        self.index[elem]
    }

    /// Returns a reference to the elements in `set`.
    #[inline]
    pub(crate) fn get(&self, set: usize) -> &[usize] {
        debug_assert!(set < self.sets.len(), "set out of range");
        &self.sets[set]
    }

    /// Get a complete vector of assignments for each element.
    #[inline] pub(crate) fn assignments(&self) -> &[usize] { &self.index }

    /// Iterator over each set as a slice.
    #[inline]
    pub(crate) fn iter_sets(&self) -> impl Iterator<Item = &[usize]> + '_ {
        self.sets.iter().map(|v| v.as_slice())
    }
}
