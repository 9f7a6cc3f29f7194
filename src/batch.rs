use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{LossError, Result};
use crate::math::partition::check_shape;

/// One batch as handed over by a training harness: ground-truth labels and
/// the model's scores, aligned by position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawBatch")]
pub struct Batch {
    pub labels: Vec<f64>,
    pub predictions: Vec<f64>,
}

impl Batch {
    pub fn new(labels: Vec<f64>, predictions: Vec<f64>) -> Result<Batch> {
        check_shape(&labels, &predictions)?;
        Ok(Batch { labels, predictions })
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Reorders examples with one shared permutation so each label stays
    /// with its score.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let mut indices: Vec<usize> = (0..self.len()).collect();
        indices.shuffle(rng);
        self.labels = indices.iter().map(|&i| self.labels[i]).collect();
        self.predictions = indices.iter().map(|&i| self.predictions[i]).collect();
    }

    /// Reads `{"labels": [...], "predictions": [...]}` from a JSON file.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Batch> {
        let reader = BufReader::new(File::open(path)?);
        let raw: RawBatch = serde_json::from_reader(reader)?;
        Batch::new(raw.labels, raw.predictions)
    }
}

/// Unchecked on-disk shape; `Batch` only exists once the lengths agree.
#[derive(Deserialize)]
struct RawBatch {
    labels: Vec<f64>,
    predictions: Vec<f64>,
}

impl TryFrom<RawBatch> for Batch {
    type Error = LossError;

    fn try_from(raw: RawBatch) -> Result<Self> {
        Batch::new(raw.labels, raw.predictions)
    }
}
