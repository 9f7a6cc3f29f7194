pub mod partition;

pub use partition::{class_indices, is_positive, Partition, LABEL_THRESHOLD};
