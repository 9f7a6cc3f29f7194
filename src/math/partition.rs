use crate::error::{LossError, Result};

/// Labels at or above this value mark a positive example.
pub const LABEL_THRESHOLD: f64 = 0.5;

/// Predictions split by class, each side keeping the batch's relative order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Partition {
    pub positives: Vec<f64>,
    pub negatives: Vec<f64>,
}

impl Partition {
    /// Gathers `predictions` into positive and negative score lists.
    ///
    /// Fails with `ShapeMismatch` before touching any value when the two
    /// slices differ in length.
    pub fn split(labels: &[f64], predictions: &[f64]) -> Result<Partition> {
        check_shape(labels, predictions)?;

        let mut partition = Partition::default();
        for (&label, &score) in labels.iter().zip(predictions.iter()) {
            if is_positive(label) {
                partition.positives.push(score);
            } else {
                partition.negatives.push(score);
            }
        }
        Ok(partition)
    }

    /// Number of cells in the positive x negative comparison grid.
    pub fn pair_count(&self) -> usize {
        self.positives.len() * self.negatives.len()
    }

    /// True when one side is empty, so there is nothing to compare.
    pub fn is_single_class(&self) -> bool {
        self.positives.is_empty() || self.negatives.is_empty()
    }
}

/// Batch indices of the positive and negative examples, in batch order.
///
/// The gradient needs positions rather than scores, so this mirrors
/// `Partition::split` without gathering.
pub fn class_indices(labels: &[f64]) -> (Vec<usize>, Vec<usize>) {
    (0..labels.len()).partition(|&i| is_positive(labels[i]))
}

/// NaN labels are negative, since the comparison is false.
pub fn is_positive(label: f64) -> bool {
    label >= LABEL_THRESHOLD
}

pub(crate) fn check_shape(labels: &[f64], predictions: &[f64]) -> Result<()> {
    if labels.len() != predictions.len() {
        return Err(LossError::ShapeMismatch {
            labels: labels.len(),
            predictions: predictions.len(),
        });
    }
    Ok(())
}
