pub mod error;
pub mod math;
pub mod loss;
pub mod batch;

// Convenience re-exports
pub use error::{LossError, Result};
pub use math::partition::Partition;
pub use loss::wmw::{approximate_wmw_statistic, wmw_loss, WmwLoss};
pub use batch::Batch;
