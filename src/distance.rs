use ndarray::{Array1, ArrayView1, ArrayView2};
use rayon::prelude::*;

/// Compute squared L2 norms for each row of a 2D array
/// Returns a 1D array where each element is the squared norm of the corresponding row
#[inline]
pub fn compute_squared_norms(data: &ArrayView2<f32>) -> Array1<f32> {
    let norms: Vec<f32> = (0..data.nrows())
        .into_par_iter()
        .map(|i| {
            let row = data.row(i);
            row.dot(&row)
        })
        .collect();

    Array1::from_vec(norms)
}

/// Find the nearest centroid for each data point
///
/// Uses the identity: ||x - c||^2 = ||x||^2 + ||c||^2 - 2*x.c
///
/// # Arguments
/// * `data` - Data points (n_data, n_features)
/// * `data_norms` - Squared norms of data points (n_data,)
/// * `centroids` - All centroids (k, n_features)
/// * `centroid_norms` - Squared norms of centroids (k,)
///
/// # Returns
/// * `labels` - Cluster assignment for each data point (n_data,)
/// * `dists` - Squared distance to the assigned centroid (n_data,)
///
/// Equal distances resolve to the lowest centroid index.
pub fn find_nearest_centroids(
    data: &ArrayView2<f32>,
    data_norms: &ArrayView1<f32>,
    centroids: &ArrayView2<f32>,
    centroid_norms: &ArrayView1<f32>,
) -> (Vec<usize>, Vec<f32>) {
    let k = centroids.nrows();

    // data: (n_data, n_features), centroids.t(): (n_features, k)
    let dot_products = data.dot(&centroids.t());

    (0..data.nrows())
        .into_par_iter()
        .map(|i| {
            let x_norm = data_norms[i];
            let mut best_label = 0;
            let mut best_dist = f32::INFINITY;

            for j in 0..k {
                // Rounding can push the identity slightly below zero
                let dist = (x_norm + centroid_norms[j] - 2.0 * dot_products[[i, j]]).max(0.0);
                if dist < best_dist {
                    best_dist = dist;
                    best_label = j;
                }
            }

            (best_label, best_dist)
        })
        .unzip()
}

/// Squared Euclidean distance between two rows
#[inline]
pub fn squared_euclidean(a: &ArrayView1<f32>, b: &ArrayView1<f32>) -> f32 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| {
            let d = x - y;
            d * d
        })
        .sum()
}

/// Compute centroid shift (sum of L2 norms of centroid movements)
pub fn compute_centroid_shift(
    old_centroids: &ArrayView2<f32>,
    new_centroids: &ArrayView2<f32>,
) -> f64 {
    old_centroids
        .outer_iter()
        .zip(new_centroids.outer_iter())
        .map(|(old_c, new_c)| {
            let mut diff_sq = 0.0f64;
            for (o, n) in old_c.iter().zip(new_c.iter()) {
                let d = (*n - *o) as f64;
                diff_sq += d * d;
            }
            diff_sq.sqrt()
        })
        .sum()
}
