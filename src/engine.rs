use crate::config::PipelineConfig;
use crate::error::{Error, Result};
use crate::kmeans::KMeans;
use crate::vectorizer::FeatureMatrix;
use log::info;
use ndarray::ArrayView1;

/// Cluster assignment of every feature row plus the label terms of every cluster
#[derive(Debug, Clone, PartialEq)]
pub struct Clustering {
    /// `labels[i]` is the cluster of row `i`, always in `0..k`
    pub labels: Vec<usize>,

    /// `terms[c]` holds the highest-weighted vocabulary terms of centroid `c`
    pub terms: Vec<Vec<String>>,
}

impl Clustering {
    /// Effective number of clusters
    pub fn k(&self) -> usize {
        self.terms.len()
    }
}

/// Partitions TF-IDF vectors with k-means and names each group after its
/// strongest centroid terms.
#[derive(Debug, Clone, Default)]
pub struct ClusterEngine {
    config: PipelineConfig,
}

impl ClusterEngine {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    /// Cluster `matrix` into `min(k_requested, n_rows)` groups.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidClusterCount`] if `k_requested` is zero or the
    /// matrix has no rows, and [`Error::InvalidDimensions`] if the vocabulary
    /// does not match the matrix width.
    pub fn cluster(&self, matrix: &FeatureMatrix, k_requested: usize) -> Result<Clustering> {
        let n_rows = matrix.features.nrows();

        if k_requested < 1 {
            return Err(Error::InvalidClusterCount(
                "at least one cluster must be requested".to_string(),
            ));
        }
        if n_rows == 0 {
            return Err(Error::InvalidClusterCount(
                "cannot cluster an empty batch".to_string(),
            ));
        }
        if matrix.vocabulary.len() != matrix.features.ncols() {
            return Err(Error::InvalidDimensions(format!(
                "vocabulary has {} terms but vectors have {} components",
                matrix.vocabulary.len(),
                matrix.features.ncols()
            )));
        }

        let k = k_requested.min(n_rows);
        let mut kmeans = KMeans::with_config(self.config.kmeans_config(k));
        let labels = kmeans.fit_predict(&matrix.features.view())?;
        let centroids = kmeans.centroids().ok_or(Error::NotFitted)?;

        let terms = centroids
            .outer_iter()
            .map(|centroid| top_terms(&centroid, &matrix.vocabulary, self.config.top_terms))
            .collect();

        info!(
            "Clustered {} vectors into {} groups (requested {}), inertia = {:.4}",
            n_rows,
            k,
            k_requested,
            kmeans.inertia().unwrap_or_default()
        );

        Ok(Clustering { labels, terms })
    }
}

/// The `n` terms with the largest centroid weight, heaviest first.
///
/// Equal weights keep vocabulary order.
pub fn top_terms(centroid: &ArrayView1<f32>, vocabulary: &[String], n: usize) -> Vec<String> {
    let mut order: Vec<usize> = (0..centroid.len().min(vocabulary.len())).collect();
    // sort_by is stable, so ties stay in ascending index order
    order.sort_by(|&a, &b| centroid[b].total_cmp(&centroid[a]));

    order
        .into_iter()
        .take(n)
        .map(|j| vocabulary[j].clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vectorizer::TfidfVectorizer;
    use ndarray::{array, Array2};

    fn vocab(terms: &[&str]) -> Vec<String> {
        terms.iter().map(|t| t.to_string()).collect()
    }

    #[test]
    fn test_top_terms_order_and_ties() {
        let centroid = array![0.2f32, 0.5, 0.2, 0.0, 0.9];
        let terms = top_terms(&centroid.view(), &vocab(&["a", "b", "c", "d", "e"]), 4);
        assert_eq!(terms, vec!["e", "b", "a", "c"]);
    }

    #[test]
    fn test_top_terms_smaller_vocabulary() {
        let centroid = array![0.1f32, 0.3];
        let terms = top_terms(&centroid.view(), &vocab(&["x", "y"]), 10);
        assert_eq!(terms, vec!["y", "x"]);
    }

    #[test]
    fn test_cluster_reduces_k_to_row_count() {
        let matrix = TfidfVectorizer::new()
            .fit_transform(&["Election results", "Football final", "Weather warning"])
            .unwrap();
        let clustering = ClusterEngine::default().cluster(&matrix, 5).unwrap();

        assert_eq!(clustering.k(), 3);
        let mut labels = clustering.labels.clone();
        labels.sort_unstable();
        assert_eq!(labels, vec![0, 1, 2]);
    }

    #[test]
    fn test_cluster_label_length() {
        let matrix = TfidfVectorizer::new()
            .fit_transform(&["Election results", "Football final"])
            .unwrap();
        let clustering = ClusterEngine::default().cluster(&matrix, 2).unwrap();
        for terms in &clustering.terms {
            assert_eq!(terms.len(), 4);
        }
    }

    #[test]
    fn test_cluster_rejects_zero_k() {
        let matrix = TfidfVectorizer::new().fit_transform(&["Election"]).unwrap();
        assert!(matches!(
            ClusterEngine::default().cluster(&matrix, 0),
            Err(Error::InvalidClusterCount(_))
        ));
    }

    #[test]
    fn test_cluster_rejects_empty_matrix() {
        let matrix = FeatureMatrix {
            vocabulary: Vec::new(),
            features: Array2::zeros((0, 0)),
        };
        assert!(matches!(
            ClusterEngine::default().cluster(&matrix, 2),
            Err(Error::InvalidClusterCount(_))
        ));
    }

    #[test]
    fn test_cluster_rejects_mismatched_vocabulary() {
        let matrix = FeatureMatrix {
            vocabulary: vocab(&["only"]),
            features: Array2::zeros((2, 3)),
        };
        assert!(matches!(
            ClusterEngine::default().cluster(&matrix, 2),
            Err(Error::InvalidDimensions(_))
        ));
    }

    #[test]
    fn test_cluster_all_zero_vectors() {
        let matrix = TfidfVectorizer::new()
            .fit_transform(&["The one", "And the other"])
            .unwrap();
        assert!(matrix.vocabulary.is_empty());

        let clustering = ClusterEngine::default().cluster(&matrix, 2).unwrap();
        assert_eq!(clustering.labels, vec![0, 0]);
        assert!(clustering.terms.iter().all(|t| t.is_empty()));
    }
}
