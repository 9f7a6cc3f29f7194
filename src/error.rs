use thiserror::Error;

/// Errors surfaced by the loss and its configuration layer.
#[derive(Debug, Error)]
pub enum LossError {
    /// `labels` and `predictions` must describe the same batch.
    #[error("shape mismatch: {labels} labels vs {predictions} predictions")]
    ShapeMismatch { labels: usize, predictions: usize },

    #[error("margin gamma must be finite and positive, got {0}")]
    InvalidMargin(f64),

    #[error("exponent p must be a positive integer no larger than i32::MAX, got {0}")]
    InvalidExponent(u32),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed json: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, LossError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shape_mismatch_message_names_both_lengths() {
        let err = LossError::ShapeMismatch { labels: 3, predictions: 2 };
        assert_eq!(err.to_string(), "shape mismatch: 3 labels vs 2 predictions");
    }

    #[test]
    fn io_errors_convert_with_question_mark() {
        fn open_missing() -> Result<std::fs::File> {
            Ok(std::fs::File::open("/definitely/not/here.json")?)
        }
        assert!(matches!(open_missing(), Err(LossError::Io(_))));
    }
}
