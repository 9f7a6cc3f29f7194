use approx::assert_relative_eq;
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use wmw_loss::{Batch, WmwLoss};

fn batch(max: usize) -> impl Strategy<Value = (Vec<f64>, Vec<f64>)> {
    (0..=max).prop_flat_map(|len| {
        (
            prop::collection::vec(prop::sample::select(vec![0.0, 1.0]), len),
            prop::collection::vec(-2.0f64..2.0, len),
        )
    })
}

proptest! {
    #[test]
    fn prop_even_exponent_is_non_negative(
        (labels, preds) in batch(24),
        gamma in 0.05f64..1.0,
    ) {
        let loss = WmwLoss::new(gamma, 2).unwrap();
        prop_assert!(loss.compute(&labels, &preds).unwrap() >= 0.0);
    }

    #[test]
    fn prop_permutation_invariant(
        (labels, preds) in batch(24),
        gamma in 0.05f64..1.0,
        p in 1u32..4,
        seed in any::<u64>(),
    ) {
        let loss = WmwLoss::new(gamma, p).unwrap();
        let mut batch = Batch::new(labels, preds).unwrap();
        let before = loss.compute(&batch.labels, &batch.predictions).unwrap();

        batch.shuffle(&mut StdRng::seed_from_u64(seed));
        let after = loss.compute(&batch.labels, &batch.predictions).unwrap();
        prop_assert!((before - after).abs() <= 1e-9 * (1.0 + before.abs()));
    }

    #[test]
    fn prop_single_class_is_zero(
        preds in prop::collection::vec(-2.0f64..2.0, 0..24),
        label in prop::sample::select(vec![0.0, 1.0]),
        gamma in 0.05f64..1.0,
        p in 1u32..4,
    ) {
        let labels = vec![label; preds.len()];
        let loss = WmwLoss::new(gamma, p).unwrap();
        prop_assert_eq!(loss.compute(&labels, &preds).unwrap(), 0.0);
        prop_assert!(loss.derivative(&labels, &preds).unwrap().iter().all(|g| *g == 0.0));
    }

    #[test]
    fn prop_wider_margin_includes_more_pairs(
        (labels, preds) in batch(24),
        gamma in 0.05f64..1.0,
        widen in 0.0f64..1.0,
    ) {
        let narrow = WmwLoss::new(gamma, 2).unwrap();
        let wide = WmwLoss::new(gamma + widen, 2).unwrap();
        prop_assert!(
            wide.included_pairs(&labels, &preds).unwrap()
                >= narrow.included_pairs(&labels, &preds).unwrap()
        );
    }

    #[test]
    fn prop_parallel_matches_sequential(
        (labels, preds) in batch(64),
        gamma in 0.05f64..1.0,
        p in 1u32..4,
    ) {
        let loss = WmwLoss::new(gamma, p).unwrap();
        let seq = loss.compute(&labels, &preds).unwrap();
        let par = loss.compute_par(&labels, &preds).unwrap();
        prop_assert!((seq - par).abs() <= 1e-9 * (1.0 + seq.abs()));
    }

    #[test]
    fn prop_gradient_sums_to_zero(
        (labels, preds) in batch(24),
        gamma in 0.05f64..1.0,
        p in 1u32..4,
    ) {
        // Each pair adds -d and +d, so shifting every score together is free.
        let loss = WmwLoss::new(gamma, p).unwrap();
        let grad = loss.derivative(&labels, &preds).unwrap();
        let total: f64 = grad.iter().sum();
        let scale: f64 = grad.iter().map(|g| g.abs()).sum();
        prop_assert!(total.abs() <= 1e-9 * (1.0 + scale));
    }
}

#[test]
fn gradient_matches_finite_difference() {
    let loss = WmwLoss::new(0.5, 3).unwrap();
    let labels = [1.0, 0.0, 1.0, 0.0, 1.0];
    let preds = [0.3, 0.45, 0.9, 0.1, 0.52];
    let grad = loss.derivative(&labels, &preds).unwrap();

    // Step small enough that no pair crosses the margin boundary.
    let h = 1e-6;
    for i in 0..preds.len() {
        let mut up = preds;
        let mut down = preds;
        up[i] += h;
        down[i] -= h;
        let numeric = (loss.compute(&labels, &up).unwrap()
            - loss.compute(&labels, &down).unwrap())
            / (2.0 * h);
        assert_relative_eq!(grad[i], numeric, epsilon = 1e-6, max_relative = 1e-4);
    }
}
