use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::{LossError, Result};
use crate::math::partition::{self, Partition};

/// Margin used by the fixed-parameter form.
pub const DEFAULT_GAMMA: f64 = 0.7;
/// Exponent used by the fixed-parameter form.
pub const DEFAULT_P: u32 = 2;

/// Smooth approximation of the Wilcoxon-Mann-Whitney statistic, usable as an
/// AUC-ROC training loss.
///
/// For every (positive, negative) pair whose scores are not separated by at
/// least `gamma`, the loss adds `(neg - pos + gamma)^p`:
///
///   L = sum_{i,j} [pos_i - neg_j < gamma] * (neg_j - pos_i + gamma)^p
///
/// The sum is not divided by the number of pairs. Pairs outside the margin
/// have their margin term zeroed before the power is taken, so an odd `p`
/// never turns a well-separated pair into a reward.
///
/// Recommended ranges: `gamma` in 0.1..=0.7, `p` of 2 or 3.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawWmwLoss")]
pub struct WmwLoss {
    gamma: f64,
    p: u32,
}

impl Default for WmwLoss {
    fn default() -> Self {
        WmwLoss { gamma: DEFAULT_GAMMA, p: DEFAULT_P }
    }
}

impl WmwLoss {
    /// Binds `gamma` and `p` into a reusable loss.
    pub fn new(gamma: f64, p: u32) -> Result<WmwLoss> {
        if !gamma.is_finite() || gamma <= 0.0 {
            return Err(LossError::InvalidMargin(gamma));
        }
        if p == 0 || i32::try_from(p).is_err() {
            return Err(LossError::InvalidExponent(p));
        }
        Ok(WmwLoss { gamma, p })
    }

    pub fn gamma(&self) -> f64 {
        self.gamma
    }

    pub fn p(&self) -> u32 {
        self.p
    }

    /// Scalar loss over one batch.
    ///
    /// Single-class and empty batches return `0.0`. NaN or infinite scores
    /// propagate into the result.
    pub fn compute(&self, labels: &[f64], predictions: &[f64]) -> Result<f64> {
        let partition = self.partition(labels, predictions)?;
        Ok(partition.positives.iter()
            .map(|&pos| self.row_sum(pos, &partition.negatives))
            .sum())
    }

    /// Same value as `compute`, with rows of the pair grid summed on the
    /// rayon pool. May differ from `compute` in the last bits.
    pub fn compute_par(&self, labels: &[f64], predictions: &[f64]) -> Result<f64> {
        let partition = self.partition(labels, predictions)?;
        let negatives = &partition.negatives;
        Ok(partition.positives.par_iter()
            .map(|&pos| self.row_sum(pos, negatives))
            .sum())
    }

    /// Gradient of `compute` with respect to each prediction, in batch order.
    ///
    /// The inclusion test is treated as a constant, so for an included pair
    /// with margin term `m` the positive score receives `-p·m^(p-1)` and the
    /// negative score `+p·m^(p-1)`.
    pub fn derivative(&self, labels: &[f64], predictions: &[f64]) -> Result<Vec<f64>> {
        partition::check_shape(labels, predictions)?;
        let (positives, negatives) = partition::class_indices(labels);

        let scale = self.p as f64;
        let lowered = self.exponent() - 1;
        let mut grad = vec![0.0; predictions.len()];

        for &i in &positives {
            for &j in &negatives {
                let (pos, neg) = (predictions[i], predictions[j]);
                let d = self.indicator(pos, neg) * scale * self.margin(pos, neg).powi(lowered);
                grad[i] -= d;
                grad[j] += d;
            }
        }
        Ok(grad)
    }

    /// How many (positive, negative) pairs fall inside the margin.
    pub fn included_pairs(&self, labels: &[f64], predictions: &[f64]) -> Result<usize> {
        let partition = Partition::split(labels, predictions)?;
        Ok(partition.positives.iter()
            .map(|&pos| {
                partition.negatives.iter()
                    .filter(|&&neg| pos - neg < self.gamma)
                    .count()
            })
            .sum())
    }

    fn partition(&self, labels: &[f64], predictions: &[f64]) -> Result<Partition> {
        let partition = Partition::split(labels, predictions)?;
        trace!(
            batch = labels.len(),
            positives = partition.positives.len(),
            negatives = partition.negatives.len(),
            gamma = self.gamma,
            p = self.p,
            "evaluating wmw loss"
        );
        if partition.is_single_class() && !labels.is_empty() {
            debug!(batch = labels.len(), "single-class batch, wmw loss is zero");
        }
        Ok(partition)
    }

    fn row_sum(&self, pos: f64, negatives: &[f64]) -> f64 {
        negatives.iter()
            .map(|&neg| self.pair_term(pos, neg))
            .sum()
    }

    /// Excluded pairs are zeroed by multiplication rather than skipped, so a
    /// non-finite score still poisons the sum.
    fn pair_term(&self, pos: f64, neg: f64) -> f64 {
        (self.indicator(pos, neg) * self.margin(pos, neg)).powi(self.exponent())
    }

    fn margin(&self, pos: f64, neg: f64) -> f64 {
        (neg - pos) + self.gamma
    }

    fn indicator(&self, pos: f64, neg: f64) -> f64 {
        if pos - neg < self.gamma { 1.0 } else { 0.0 }
    }

    // `new` already rejected anything above i32::MAX.
    fn exponent(&self) -> i32 {
        i32::try_from(self.p).unwrap_or(i32::MAX)
    }
}

/// Unvalidated on-disk shape; missing fields take the defaults.
#[derive(Deserialize)]
struct RawWmwLoss {
    #[serde(default = "default_gamma")]
    gamma: f64,
    #[serde(default = "default_p")]
    p: u32,
}

fn default_gamma() -> f64 {
    DEFAULT_GAMMA
}

fn default_p() -> u32 {
    DEFAULT_P
}

impl TryFrom<RawWmwLoss> for WmwLoss {
    type Error = LossError;

    fn try_from(raw: RawWmwLoss) -> Result<Self> {
        WmwLoss::new(raw.gamma, raw.p)
    }
}

/// Factory form: binds `gamma` and `p` and returns the loss as a closure a
/// training harness can call once per batch.
pub fn wmw_loss(gamma: f64, p: u32) -> Result<impl Fn(&[f64], &[f64]) -> Result<f64>> {
    let loss = WmwLoss::new(gamma, p)?;
    Ok(move |labels: &[f64], predictions: &[f64]| loss.compute(labels, predictions))
}

/// Fixed-parameter form with `gamma = 0.7`, `p = 2`.
pub fn approximate_wmw_statistic(labels: &[f64], predictions: &[f64]) -> Result<f64> {
    WmwLoss::default().compute(labels, predictions)
}
