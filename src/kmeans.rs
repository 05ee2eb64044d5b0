use crate::algorithm::{kmeans_lloyd, predict_labels, KMeansResult};
use crate::config::KMeansConfig;
use crate::error::{Error, Result};
use ndarray::{Array2, ArrayView2};

/// Seeded k-means clustering over ndarray matrices.
///
/// Provides an API similar to scikit-learn's `KMeans`: `fit()`, `predict()`
/// and `fit_predict()`.
///
/// # Example
///
/// ```
/// use headline_clusters::KMeans;
/// use ndarray::array;
///
/// let data = array![[0.0f32, 0.0], [0.1, 0.0], [9.0, 9.0], [9.1, 9.0]];
///
/// let mut kmeans = KMeans::new(2);
/// let labels = kmeans.fit_predict(&data.view()).unwrap();
/// assert_eq!(labels[0], labels[1]);
/// assert_ne!(labels[0], labels[2]);
/// ```
pub struct KMeans {
    /// Model configuration
    config: KMeansConfig,

    /// Number of features (dimensions), 0 until fitted
    d: usize,

    /// Outcome of the last fit (None if not yet fitted)
    fitted: Option<KMeansResult>,
}

impl KMeans {
    /// Create a new KMeans instance with default configuration.
    pub fn new(k: usize) -> Self {
        Self::with_config(KMeansConfig::new(k))
    }

    /// Create a new KMeans instance with custom configuration.
    pub fn with_config(config: KMeansConfig) -> Self {
        Self {
            config,
            d: 0,
            fitted: None,
        }
    }

    /// Fit the model to the data.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidClusterCount`] if `k` is zero or larger than
    /// the number of samples.
    pub fn fit(&mut self, data: &ArrayView2<f32>) -> Result<&mut Self> {
        let result = kmeans_lloyd(data, &self.config)?;

        self.d = data.ncols();
        self.fitted = Some(result);
        Ok(self)
    }

    /// Predict cluster assignments for new data.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The model has not been fitted yet
    /// - Data dimensions don't match the training data
    pub fn predict(&self, data: &ArrayView2<f32>) -> Result<Vec<usize>> {
        let fitted = self.fitted.as_ref().ok_or(Error::NotFitted)?;

        let n_features = data.ncols();
        if n_features != self.d {
            return Err(Error::InvalidDimensions(format!(
                "Expected {} features, got {}",
                self.d, n_features
            )));
        }

        Ok(predict_labels(data, &fitted.centroids.view()))
    }

    /// Fit the model and return the cluster assignment of every training row.
    pub fn fit_predict(&mut self, data: &ArrayView2<f32>) -> Result<Vec<usize>> {
        self.fit(data)?;
        self.labels()
            .map(<[usize]>::to_vec)
            .ok_or(Error::NotFitted)
    }

    /// Get the centroids of the fitted model.
    pub fn centroids(&self) -> Option<&Array2<f32>> {
        self.fitted.as_ref().map(|f| &f.centroids)
    }

    /// Labels of the training rows from the last fit.
    pub fn labels(&self) -> Option<&[usize]> {
        self.fitted.as_ref().map(|f| f.labels.as_slice())
    }

    /// Sum of squared distances of the training rows to their centroids.
    pub fn inertia(&self) -> Option<f64> {
        self.fitted.as_ref().map(|f| f.inertia)
    }

    /// Lloyd iterations run by the winning restart.
    pub fn n_iterations(&self) -> Option<usize> {
        self.fitted.as_ref().map(|f| f.n_iterations)
    }

    /// Get the number of clusters.
    pub fn k(&self) -> usize {
        self.config.k
    }

    /// Get the configuration.
    pub fn config(&self) -> &KMeansConfig {
        &self.config
    }
}
