use crate::config::VectorizerConfig;
use crate::error::{Error, Result};
use crate::stop_words::is_stop_word;
use ndarray::{Array1, Array2};
use std::collections::{BTreeSet, HashMap};

/// TF-IDF feature vectors for a batch of titles over the batch's own vocabulary
#[derive(Debug, Clone)]
pub struct FeatureMatrix {
    /// Distinct surviving terms in lexicographic order; column `j` of
    /// `features` is the weight of `vocabulary[j]`
    pub vocabulary: Vec<String>,

    /// One row per title, shape (n_titles, vocabulary.len())
    pub features: Array2<f32>,
}

/// Term-frequency / inverse-document-frequency vectorizer.
///
/// The vocabulary and IDF weights are rebuilt on every call to [`fit`]
/// so nothing carries over from one batch to the next.
///
/// [`fit`]: TfidfVectorizer::fit
#[derive(Debug, Clone, Default)]
pub struct TfidfVectorizer {
    config: VectorizerConfig,
    vocabulary: Vec<String>,
    index: HashMap<String, usize>,
    idf: Option<Array1<f32>>,
}

impl TfidfVectorizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: VectorizerConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    /// Split `text` into lowercase word tokens, dropping short tokens and
    /// stop words.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        text.split(|c: char| !(c.is_alphanumeric() || c == '_'))
            .map(str::to_lowercase)
            .filter(|token| token.chars().count() >= self.config.min_token_len.max(1))
            .filter(|token| !(self.config.stop_words && is_stop_word(token)))
            .collect()
    }

    /// Learn the vocabulary and IDF weights of a batch.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyBatch`] if `titles` is empty.
    pub fn fit<S: AsRef<str>>(&mut self, titles: &[S]) -> Result<&mut Self> {
        if titles.is_empty() {
            return Err(Error::EmptyBatch);
        }

        let documents: Vec<Vec<String>> = titles.iter().map(|t| self.tokenize(t.as_ref())).collect();

        let vocabulary: Vec<String> = documents
            .iter()
            .flatten()
            .cloned()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        let index: HashMap<String, usize> = vocabulary
            .iter()
            .enumerate()
            .map(|(i, term)| (term.clone(), i))
            .collect();

        // Document frequency counts each title at most once per term
        let mut df = vec![0usize; vocabulary.len()];
        for doc in &documents {
            let distinct: BTreeSet<usize> = doc.iter().filter_map(|t| index.get(t).copied()).collect();
            for j in distinct {
                df[j] += 1;
            }
        }

        // Smoothed so that a term present in every title still gets weight 1
        let n_docs = documents.len() as f32;
        let idf = Array1::from_iter(df.iter().map(|&d| ((1.0 + n_docs) / (1.0 + d as f32)).ln() + 1.0));

        self.vocabulary = vocabulary;
        self.index = index;
        self.idf = Some(idf);
        Ok(self)
    }

    /// Project titles onto the fitted vocabulary. Terms unseen during
    /// [`fit`](TfidfVectorizer::fit) are ignored.
    pub fn transform<S: AsRef<str>>(&self, titles: &[S]) -> Result<Array2<f32>> {
        let idf = self.idf.as_ref().ok_or(Error::NotFitted)?;
        let mut features = Array2::<f32>::zeros((titles.len(), self.vocabulary.len()));

        for (i, title) in titles.iter().enumerate() {
            let mut row = features.row_mut(i);
            for token in self.tokenize(title.as_ref()) {
                if let Some(&j) = self.index.get(&token) {
                    row[j] += 1.0;
                }
            }

            if self.config.sublinear_tf {
                row.mapv_inplace(|tf| if tf > 0.0 { 1.0 + tf.ln() } else { 0.0 });
            }
            row *= idf;

            if self.config.normalize {
                let norm = row.dot(&row).sqrt();
                if norm > 0.0 {
                    row /= norm;
                }
            }
        }

        Ok(features)
    }

    /// Fit on `titles` and return their feature vectors with the vocabulary.
    pub fn fit_transform<S: AsRef<str>>(&mut self, titles: &[S]) -> Result<FeatureMatrix> {
        self.fit(titles)?;
        let features = self.transform(titles)?;
        Ok(FeatureMatrix {
            vocabulary: self.vocabulary.clone(),
            features,
        })
    }

    /// Vocabulary learned by the last fit, empty before fitting
    pub fn vocabulary(&self) -> &[String] {
        &self.vocabulary
    }

    /// IDF weight per vocabulary term, `None` before fitting
    pub fn idf(&self) -> Option<&Array1<f32>> {
        self.idf.as_ref()
    }
}
