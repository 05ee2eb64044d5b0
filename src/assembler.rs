use crate::article::Article;
use crate::engine::Clustering;
use crate::error::{Error, Result};

/// A topic group ready for display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cluster {
    /// Zero-based cluster index
    pub id: usize,

    /// Label terms, heaviest first
    pub terms: Vec<String>,

    /// Member articles in their original order
    pub articles: Vec<Article>,
}

/// Join cluster assignments back to the articles they were computed from.
///
/// Returns one [`Cluster`] per id in `0..clustering.k()`, ordered by id.
/// Every article lands in exactly one cluster and keeps its relative order.
pub fn assemble(articles: &[Article], clustering: &Clustering) -> Result<Vec<Cluster>> {
    if articles.len() != clustering.labels.len() {
        return Err(Error::InvalidDimensions(format!(
            "{} articles but {} cluster assignments",
            articles.len(),
            clustering.labels.len()
        )));
    }

    let mut clusters: Vec<Cluster> = clustering
        .terms
        .iter()
        .enumerate()
        .map(|(id, terms)| Cluster {
            id,
            terms: terms.clone(),
            articles: Vec::new(),
        })
        .collect();

    for (article, &label) in articles.iter().zip(&clustering.labels) {
        let k = clusters.len();
        let cluster = clusters.get_mut(label).ok_or_else(|| {
            Error::InvalidDimensions(format!("cluster id {} is outside 0..{}", label, k))
        })?;
        cluster.articles.push(article.clone());
    }

    Ok(clusters)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(n: usize) -> Article {
        Article::new(format!("Headline {}", n), format!("https://example.com/{}", n)).unwrap()
    }

    fn clustering(labels: Vec<usize>, k: usize) -> Clustering {
        Clustering {
            labels,
            terms: (0..k).map(|c| vec![format!("term{}", c)]).collect(),
        }
    }

    #[test]
    fn test_assemble_stable_partition() {
        let articles: Vec<Article> = (0..5).map(article).collect();
        let clusters = assemble(&articles, &clustering(vec![1, 0, 1, 0, 1], 2)).unwrap();

        assert_eq!(clusters.len(), 2);
        assert_eq!(clusters[0].id, 0);
        assert_eq!(clusters[0].terms, vec!["term0"]);
        assert_eq!(clusters[0].articles, vec![article(1), article(3)]);
        assert_eq!(clusters[1].articles, vec![article(0), article(2), article(4)]);
    }

    #[test]
    fn test_assemble_keeps_empty_clusters() {
        let articles: Vec<Article> = (0..2).map(article).collect();
        let clusters = assemble(&articles, &clustering(vec![0, 0], 2)).unwrap();

        assert_eq!(clusters.len(), 2);
        assert!(clusters[1].articles.is_empty());
    }

    #[test]
    fn test_assemble_length_mismatch() {
        let articles: Vec<Article> = (0..3).map(article).collect();
        let result = assemble(&articles, &clustering(vec![0, 1], 2));
        assert!(matches!(result, Err(Error::InvalidDimensions(_))));
    }

    #[test]
    fn test_assemble_label_out_of_range() {
        let articles: Vec<Article> = (0..2).map(article).collect();
        let result = assemble(&articles, &clustering(vec![0, 2], 2));
        assert!(matches!(result, Err(Error::InvalidDimensions(_))));
    }
}
