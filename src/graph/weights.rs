use ahash::AHashMap;
use ndarray::{Array2, ArrayView1, Axis};

use crate::error::{FlowError, Result};

/// Named per-node numeric series stored column-wise in an `(n, k)` matrix.
#[derive(Clone, Debug, Default)]
pub struct WeightMatrix {
    series: AHashMap<String, usize>, // series name -> column
    names: Vec<String>,              // column -> series name
    values: Array2<f64>,             // (n, k)
}

impl WeightMatrix {
    /// Build a matrix for `num_nodes` nodes. Columns are ordered by series name.
    pub fn new(num_nodes: usize, series: impl IntoIterator<Item = (String, Vec<f64>)>) -> Result<Self> {
        let mut columns = series.into_iter().collect::<Vec<_>>();
        columns.sort_by(|(a, _), (b, _)| a.cmp(b));

        let mut values = Array2::zeros((num_nodes, columns.len()));
        let mut index = AHashMap::with_capacity(columns.len());
        let mut names = Vec::with_capacity(columns.len());

        for (k, (name, column)) in columns.into_iter().enumerate() {
            if column.len() != num_nodes {
                return Err(FlowError::SeriesLength { series: name, expected: num_nodes, found: column.len() })
            }
            values.column_mut(k).iter_mut().zip(column).for_each(|(dst, src)| *dst = src);
            index.insert(name.clone(), k);
            names.push(name);
        }

        Ok(Self { series: index, names, values })
    }

    /// An empty matrix (no series) for `num_nodes` nodes.
    pub fn empty(num_nodes: usize) -> Self {
        Self { series: AHashMap::new(), names: Vec::new(), values: Array2::zeros((num_nodes, 0)) }
    }

    #[inline] pub fn num_nodes(&self) -> usize { self.values.nrows() }

    #[inline] pub fn contains(&self, series: &str) -> bool { self.series.contains_key(series) }

    /// Series names in column order.
    #[inline] pub fn names(&self) -> &[String] { &self.names }

    /// Value of `series` at `node`, or None if the series does not exist.
    #[inline]
    pub fn get(&self, series: &str, node: usize) -> Option<f64> {
        self.series.get(series).map(|&k| self.values[[node, k]])
    }

    /// Column view of a whole series.
    pub fn series(&self, series: &str) -> Result<ArrayView1<'_, f64>> {
        let &k = self.series.get(series).ok_or_else(|| FlowError::UnknownSeries(series.to_string()))?;
        Ok(self.values.index_axis(Axis(1), k))
    }

    /// Sum of `series` over a set of nodes.
    pub fn sum_over(&self, series: &str, nodes: &[usize]) -> Result<f64> {
        let column = self.series(series)?;
        Ok(nodes.iter().map(|&u| column[u]).sum())
    }
}
