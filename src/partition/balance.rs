use tracing::warn;

use crate::{
    error::{FlowError, Result},
    partition::Partition,
};

impl Partition {
    /// Relative deviation `|total - ideal| / ideal` of each district's `series`
    /// total, where `ideal` is the region total divided evenly.
    pub fn population_deviations(&self, series: &str) -> Result<Vec<(u32, f64)>> {
        let totals = self.part_totals(series)?;
        let ideal = totals.iter().sum::<f64>() / totals.len().max(1) as f64;

        Ok(self.districts().iter().copied().zip(totals)
            .map(|(district, total)| {
                let deviation = if ideal > 0.0 { (total - ideal).abs() / ideal } else { 0.0 };
                (district, deviation)
            })
            .collect())
    }

    /// The largest relative deviation over all districts.
    pub fn population_deviation(&self, series: &str) -> Result<f64> {
        Ok(self.population_deviations(series)?.into_iter().map(|(_, d)| d).fold(0.0, f64::max))
    }

    /// Check that every district is within `threshold` of the ideal total.
    pub fn check_balance(&self, series: &str, threshold: f64) -> Result<()> {
        let deviations = self.population_deviations(series)?;
        let worst = deviations.iter().filter(|&&(_, d)| d > threshold).max_by(|a, b| a.1.total_cmp(&b.1));

        match worst {
            Some(&(district, deviation)) => {
                warn!(district, deviation, threshold, series, "district outside population tolerance");
                Err(FlowError::PopulationImbalance { district, deviation, threshold })
            }
            None => Ok(()),
        }
    }
}
