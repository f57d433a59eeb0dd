use std::sync::Arc;

use anyhow::{Result, bail};
use tracing::info;

use crate::{PartitionDocument, Partition, grid_graph};

pub fn run(_cli: &crate::cli::Cli, args: &crate::cli::GridArgs) -> Result<()> {
    let out_path = &args.output.clone().unwrap_or("./grid.json".into());

    let partition = banded_grid(args.rows, args.cols, args.districts)?;

    info!("[grid] writing {}x{} grid in {} bands to {}", args.rows, args.cols, args.districts, out_path.display());
    PartitionDocument::from_partition(&partition).write_to_json_file(out_path)?;

    Ok(())
}

/// A `rows x cols` grid split into `districts` horizontal bands of whole rows.
pub fn banded_grid(rows: usize, cols: usize, districts: usize) -> Result<Partition> {
    if rows == 0 || cols == 0 { bail!("grid must have at least one row and one column") }
    if districts == 0 || districts > rows { bail!("districts must be in range [1, {rows}]") }

    let assignment = (0..rows * cols)
        .map(|i| (i / cols * districts / rows + 1) as u32)
        .collect::<Vec<_>>();

    Ok(Partition::new(Arc::new(grid_graph(rows, cols)), &assignment)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bands_cover_whole_rows() {
        let partition = banded_grid(4, 3, 2).unwrap();
        assert_eq!(partition.assignments(), vec![1, 1, 1, 1, 1, 1, 2, 2, 2, 2, 2, 2]);
        assert!(partition.check_contiguity().is_ok());
    }

    #[test]
    fn uneven_bands_are_contiguous() {
        let partition = banded_grid(5, 2, 3).unwrap();
        assert_eq!(partition.districts(), &[1, 2, 3]);
        assert!(partition.check_contiguity().is_ok());
    }

    #[test]
    fn rejects_too_many_districts() {
        assert!(banded_grid(2, 5, 3).is_err());
        assert!(banded_grid(2, 5, 0).is_err());
        assert!(banded_grid(0, 5, 1).is_err());
    }
}
