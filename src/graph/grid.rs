use crate::{graph::{Graph, WeightMatrix}, types::NodeId};

/// Build a `rows x cols` grid graph with ids `1..=rows*cols` numbered
/// row-major and a `population` of 1 on every cell.
///
/// Edges are listed cell by cell: the edge to the cell below first, then the
/// edge to the cell on the right.
pub fn grid_graph(rows: usize, cols: usize) -> Graph {
    let n = rows * cols;
    let id = |row: usize, col: usize| NodeId((row * cols + col + 1) as u64);

    let ids = (0..n as u64).map(|i| NodeId(i + 1)).collect::<Vec<_>>();

    let mut edges = Vec::with_capacity(2 * n);
    for row in 0..rows {
        for col in 0..cols {
            if row + 1 < rows { edges.push((id(row, col), id(row + 1, col))) }
            if col + 1 < cols { edges.push((id(row, col), id(row, col + 1))) }
        }
    }

    let weights = WeightMatrix::new(n, [("population".to_string(), vec![1.0; n])])
        .unwrap_or_else(|_| unreachable!("population series has one value per cell"));

    Graph::from_edges(&ids, &edges, None, weights)
        .unwrap_or_else(|_| unreachable!("grid edges are simple and reference existing cells"))
}
