mod balance;
mod contiguity;
mod partition;
mod partition_set;

pub(self) use partition_set::PartitionSet;
pub use partition::Partition;
