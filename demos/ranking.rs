use rand::Rng;
use wmw_loss::{Batch, WmwLoss};

/// Fraction of (positive, negative) pairs ranked in the right order.
fn empirical_auc(labels: &[f64], scores: &[f64]) -> f64 {
    let partition = wmw_loss::Partition::split(labels, scores).unwrap();
    let correct = partition.positives.iter()
        .flat_map(|p| partition.negatives.iter().map(move |n| (p, n)))
        .filter(|(p, n)| p > n)
        .count();
    correct as f64 / partition.pair_count().max(1) as f64
}

fn main() {
    let mut rng = rand::thread_rng();

    // Two noisy features; positives sit above the line x0 + x1 = 1.
    let inputs: Vec<[f64; 2]> = (0..200)
        .map(|_| [rng.gen::<f64>(), rng.gen::<f64>()])
        .collect();
    let labels: Vec<f64> = inputs.iter()
        .map(|x| if x[0] + x[1] + rng.gen_range(-0.2..0.2) > 1.0 { 1.0 } else { 0.0 })
        .collect();

    let loss = WmwLoss::new(0.3, 2).unwrap();
    let mut weights = [rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0)];
    let learning_rate = 1e-4;
    let epochs = 500;

    for epoch in 0..epochs {
        let scores: Vec<f64> = inputs.iter()
            .map(|x| weights[0] * x[0] + weights[1] * x[1])
            .collect();
        let batch = Batch::new(labels.clone(), scores).unwrap();

        let value = loss.compute(&batch.labels, &batch.predictions).unwrap();
        let grad = loss.derivative(&batch.labels, &batch.predictions).unwrap();

        // Chain rule through the linear scorer.
        for (x, g) in inputs.iter().zip(grad.iter()) {
            weights[0] -= learning_rate * g * x[0];
            weights[1] -= learning_rate * g * x[1];
        }

        if epoch % 50 == 0 {
            println!(
                "Epoch {epoch}: loss = {value:.4}, auc = {:.4}",
                empirical_auc(&batch.labels, &batch.predictions)
            );
        }
    }

    let scores: Vec<f64> = inputs.iter()
        .map(|x| weights[0] * x[0] + weights[1] * x[1])
        .collect();
    println!("Weights: [{:.4}, {:.4}]", weights[0], weights[1]);
    println!("Final AUC: {:.4}", empirical_auc(&labels, &scores));
}
