use crate::config::KMeansConfig;
use crate::distance::{
    compute_centroid_shift, compute_squared_norms, find_nearest_centroids, squared_euclidean,
};
use crate::error::{Error, Result};
use log::debug;
use ndarray::{Array1, Array2, ArrayView1, ArrayView2};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::time::Instant;

/// Result of the k-means algorithm
#[derive(Debug, Clone)]
pub struct KMeansResult {
    pub centroids: Array2<f32>,
    pub labels: Vec<usize>,
    /// Sum of squared distances from each point to its assigned centroid
    pub inertia: f64,
    pub n_iterations: usize,
}

/// Run Lloyd's k-means `n_init` times from greedy k-means++ seeds and keep
/// the run with the lowest inertia.
///
/// Restart `r` draws from a `ChaCha8Rng` seeded with `seed + r`, so the same
/// data and configuration always produce the same result.
pub fn kmeans_lloyd(data: &ArrayView2<f32>, config: &KMeansConfig) -> Result<KMeansResult> {
    let n_samples = data.nrows();
    let k = config.k;

    if k == 0 {
        return Err(Error::InvalidClusterCount(
            "k must be greater than 0".to_string(),
        ));
    }

    if n_samples < k {
        return Err(Error::InvalidClusterCount(format!(
            "Number of samples ({}) is less than k ({})",
            n_samples, k
        )));
    }

    debug!(
        "Training k-means: {} samples, {} features, {} clusters, {} restarts",
        n_samples,
        data.ncols(),
        k,
        config.n_init.max(1)
    );

    // Pre-compute data norms
    let data_norms = compute_squared_norms(data);

    let mut best: Option<KMeansResult> = None;
    for restart in 0..config.n_init.max(1) {
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed.wrapping_add(restart as u64));
        let result = single_run(data, &data_norms.view(), config, &mut rng);

        debug!(
            "  Restart {}: inertia = {:.6}, iterations = {}",
            restart + 1,
            result.inertia,
            result.n_iterations
        );

        // Strict comparison keeps the earliest restart on ties
        if best.as_ref().map_or(true, |b| result.inertia < b.inertia) {
            best = Some(result);
        }
    }

    best.ok_or_else(|| Error::InvalidClusterCount("no k-means restart was run".to_string()))
}

fn single_run(
    data: &ArrayView2<f32>,
    data_norms: &ArrayView1<f32>,
    config: &KMeansConfig,
    rng: &mut ChaCha8Rng,
) -> KMeansResult {
    let centroids = init_kmeans_plusplus(data, config.k, rng);
    lloyd_from(data, data_norms, centroids, config)
}

/// Lloyd iterations starting from the given centroids
fn lloyd_from(
    data: &ArrayView2<f32>,
    data_norms: &ArrayView1<f32>,
    mut centroids: Array2<f32>,
    config: &KMeansConfig,
) -> KMeansResult {
    let n_samples = data.nrows();
    let n_features = data.ncols();
    let k = centroids.nrows();

    let mut labels: Option<Vec<usize>> = None;
    let mut n_iterations = 0;

    for iteration in 0..config.max_iters {
        let iter_start = Instant::now();
        n_iterations = iteration + 1;

        let centroid_norms = compute_squared_norms(&centroids.view());
        let (new_labels, dists) =
            find_nearest_centroids(data, data_norms, &centroids.view(), &centroid_norms.view());

        // Assignments are stable: the current centroids are already their means
        if labels.as_ref() == Some(&new_labels) {
            debug!("  Converged after {} iterations (assignments unchanged)", iteration);
            break;
        }

        // Accumulators for new centroids
        let mut cluster_sums: Array2<f32> = Array2::zeros((k, n_features));
        let mut cluster_counts: Array1<f32> = Array1::zeros(k);
        for (i, &label) in new_labels.iter().enumerate() {
            cluster_counts[label] += 1.0;
            let mut sum = cluster_sums.row_mut(label);
            sum += &data.row(i);
        }

        let prev_centroids = centroids.clone();
        let mut empty_clusters = Vec::new();

        for cluster_idx in 0..k {
            let count = cluster_counts[cluster_idx];
            if count > 0.0 {
                let mean = &cluster_sums.row(cluster_idx) / count;
                centroids.row_mut(cluster_idx).assign(&mean);
            } else {
                empty_clusters.push(cluster_idx);
            }
        }

        // Move empty clusters onto the points worst served by their centroid
        if !empty_clusters.is_empty() {
            let mut farthest: Vec<usize> = (0..n_samples).collect();
            farthest.sort_by(|&a, &b| dists[b].total_cmp(&dists[a]).then(a.cmp(&b)));

            for (&cluster_idx, &data_idx) in empty_clusters.iter().zip(farthest.iter()) {
                centroids.row_mut(cluster_idx).assign(&data.row(data_idx));
            }

            debug!("  Reinitialized {} empty clusters", empty_clusters.len());
        }

        labels = Some(new_labels);

        let shift = compute_centroid_shift(&prev_centroids.view(), &centroids.view());
        debug!(
            "  Iteration {}/{}: shift = {:.6}, time = {:.4}s",
            iteration + 1,
            config.max_iters,
            shift,
            iter_start.elapsed().as_secs_f64()
        );

        if config.tol >= 0.0 && shift < config.tol {
            debug!(
                "  Converged after {} iterations (shift {:.6} < tol {:.6})",
                iteration + 1,
                shift,
                config.tol
            );
            break;
        }
    }

    // Final assignment against the centroids being returned
    let centroid_norms = compute_squared_norms(&centroids.view());
    let (labels, dists) =
        find_nearest_centroids(data, data_norms, &centroids.view(), &centroid_norms.view());
    let inertia = dists.iter().map(|&d| d as f64).sum();

    KMeansResult {
        centroids,
        labels,
        inertia,
        n_iterations,
    }
}

/// Greedy k-means++ seeding.
///
/// Each new centroid is the best of `2 + ln(k)` candidates drawn with
/// probability proportional to their squared distance from the centroids
/// chosen so far, "best" meaning the one that leaves the smallest total
/// squared distance.
fn init_kmeans_plusplus(data: &ArrayView2<f32>, k: usize, rng: &mut ChaCha8Rng) -> Array2<f32> {
    let n_samples = data.nrows();
    let n_features = data.ncols();
    let n_local_trials = 2 + (k as f64).ln() as usize;

    let mut centroids = Array2::zeros((k, n_features));
    let mut chosen = Vec::with_capacity(k);

    let first = rng.gen_range(0..n_samples);
    centroids.row_mut(0).assign(&data.row(first));
    chosen.push(first);

    let mut closest: Vec<f32> = (0..n_samples)
        .map(|i| squared_euclidean(&data.row(i), &data.row(first)))
        .collect();

    for centroid_idx in 1..k {
        let potential: f64 = closest.iter().map(|&d| d as f64).sum();

        let candidates: Vec<usize> = if potential > 0.0 {
            (0..n_local_trials)
                .map(|_| sample_by_weight(&closest, potential, rng))
                .collect()
        } else {
            // Every point sits on a chosen centroid, fall back to a uniform pick
            let remaining: Vec<usize> = (0..n_samples).filter(|i| !chosen.contains(i)).collect();
            vec![remaining.choose(rng).copied().unwrap_or(first)]
        };

        let mut best: Option<(usize, f64, Vec<f32>)> = None;
        for candidate in candidates {
            let candidate_closest: Vec<f32> = closest
                .iter()
                .enumerate()
                .map(|(i, &d)| d.min(squared_euclidean(&data.row(i), &data.row(candidate))))
                .collect();
            let candidate_potential: f64 = candidate_closest.iter().map(|&d| d as f64).sum();

            if best
                .as_ref()
                .map_or(true, |(_, p, _)| candidate_potential < *p)
            {
                best = Some((candidate, candidate_potential, candidate_closest));
            }
        }

        if let Some((idx, _, new_closest)) = best {
            centroids.row_mut(centroid_idx).assign(&data.row(idx));
            chosen.push(idx);
            closest = new_closest;
        }
    }

    centroids
}

/// Draw an index with probability proportional to `weights[i]`
fn sample_by_weight(weights: &[f32], total: f64, rng: &mut ChaCha8Rng) -> usize {
    let threshold = rng.gen::<f64>() * total;
    let mut cumsum = 0.0f64;
    let mut last_positive = 0;

    for (i, &w) in weights.iter().enumerate() {
        if w > 0.0 {
            cumsum += w as f64;
            last_positive = i;
            if cumsum > threshold {
                return i;
            }
        }
    }

    last_positive
}

/// Predict cluster assignments for new data using trained centroids
pub fn predict_labels(data: &ArrayView2<f32>, centroids: &ArrayView2<f32>) -> Vec<usize> {
    let data_norms = compute_squared_norms(data);
    let centroid_norms = compute_squared_norms(centroids);

    let (labels, _) =
        find_nearest_centroids(data, &data_norms.view(), centroids, &centroid_norms.view());
    labels
}
