use std::{
    collections::{BTreeMap, HashMap},
    fs::File,
    io::{BufReader, BufWriter},
    path::Path,
};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::artifacts::{ensure_exists, ArtifactError};

use super::{ngrams, params::VectorizerParams, FeatureVector};

/// A TF-IDF vectorizer over word n-grams of cleaned text
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TfidfVectorizer {
    params: VectorizerParams,

    /// Term to feature index, indices assigned in lexicographic term order
    vocabulary: BTreeMap<String, usize>,

    /// Inverse document frequency per feature index
    idf: Vec<f32>,
}

impl TfidfVectorizer {
    /// The type name reported by the service metadata
    pub const NAME: &'static str = "TfidfVectorizer";

    /// Learn the vocabulary and IDF weights from cleaned texts
    pub fn fit<T: AsRef<str>>(texts: &[T], params: VectorizerParams) -> Self {
        debug!("Fitting TfidfVectorizer on {} texts", texts.len());

        let mut term_freq: HashMap<String, usize> = HashMap::new();
        let mut doc_freq: HashMap<String, usize> = HashMap::new();

        for text in texts {
            for (term, count) in ngrams::count_ngrams(text.as_ref(), params.ngram_range) {
                *term_freq.entry(term.clone()).or_insert(0) += count;
                *doc_freq.entry(term).or_insert(0) += 1;
            }
        }

        let candidates = term_freq.len();

        // Most frequent terms first, ties broken by the term itself
        let mut ranked: Vec<(String, usize)> = term_freq.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranked.truncate(params.max_features);

        let mut terms: Vec<String> = ranked.into_iter().map(|(term, _)| term).collect();
        terms.sort();

        debug!(
            "Vocabulary capped from {} to {} terms",
            candidates,
            terms.len()
        );

        // Smoothed IDF: ln((1 + n) / (1 + df)) + 1
        let n_docs = texts.len() as f32;
        let idf = terms
            .iter()
            .map(|term| {
                let df = doc_freq.get(term).copied().unwrap_or(0) as f32;
                ((1.0 + n_docs) / (1.0 + df)).ln() + 1.0
            })
            .collect();

        let vocabulary = terms
            .into_iter()
            .enumerate()
            .map(|(index, term)| (term, index))
            .collect();

        Self {
            params,
            vocabulary,
            idf,
        }
    }

    /// Map a cleaned text to an L2-normalized TF-IDF vector. Terms outside the vocabulary are
    /// ignored.
    pub fn transform(&self, text: &str) -> FeatureVector {
        let mut entries: Vec<(usize, f32)> = ngrams::count_ngrams(text, self.params.ngram_range)
            .into_iter()
            .filter_map(|(term, count)| {
                self.vocabulary
                    .get(&term)
                    .map(|&index| (index, count as f32 * self.idf[index]))
            })
            .collect();

        entries.sort_by_key(|(index, _)| *index);

        let norm = entries.iter().map(|(_, v)| v * v).sum::<f32>().sqrt();
        if norm > 0.0 {
            for (_, value) in entries.iter_mut() {
                *value /= norm;
            }
        }

        FeatureVector::from_sorted(self.num_features(), entries)
    }

    /// Transform a batch of cleaned texts
    pub fn transform_all<T: AsRef<str>>(&self, texts: &[T]) -> Vec<FeatureVector> {
        texts.iter().map(|text| self.transform(text.as_ref())).collect()
    }

    /// Fit on the texts and transform them in one pass
    pub fn fit_transform<T: AsRef<str>>(
        texts: &[T],
        params: VectorizerParams,
    ) -> (Self, Vec<FeatureVector>) {
        let vectorizer = Self::fit(texts, params);
        let features = vectorizer.transform_all(texts);

        (vectorizer, features)
    }

    /// The output dimension
    pub fn num_features(&self) -> usize {
        self.vocabulary.len()
    }

    /// The fitted vocabulary
    pub fn vocabulary(&self) -> &BTreeMap<String, usize> {
        &self.vocabulary
    }

    /// The fitted IDF weights, by feature index
    pub fn idf(&self) -> &[f32] {
        &self.idf
    }

    /// The parameters used for fitting
    pub fn params(&self) -> &VectorizerParams {
        &self.params
    }

    /// A stable FNV-1a hash over the vocabulary terms, their indices and IDF weights, as a hex
    /// string. Two vectorizers with the same fingerprint produce the same features.
    pub fn fingerprint(&self) -> String {
        const OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
        const PRIME: u64 = 0x0100_0000_01b3;

        let mut hash = OFFSET;
        let mut feed = |bytes: &[u8]| {
            for byte in bytes {
                hash ^= u64::from(*byte);
                hash = hash.wrapping_mul(PRIME);
            }
        };

        for (term, index) in &self.vocabulary {
            feed(term.as_bytes());
            feed(&(*index as u64).to_le_bytes());
        }

        for weight in &self.idf {
            feed(&weight.to_bits().to_le_bytes());
        }

        format!("{hash:016x}")
    }

    /// Write the fitted vectorizer as JSON
    pub fn save(&self, path: &Path) -> Result<(), ArtifactError> {
        let file = File::create(path).map_err(|source| ArtifactError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        serde_json::to_writer(BufWriter::new(file), self).map_err(|source| ArtifactError::Json {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Read a fitted vectorizer written by [`TfidfVectorizer::save`]
    pub fn load(path: &Path) -> Result<Self, ArtifactError> {
        ensure_exists(path)?;

        let file = File::open(path).map_err(|source| ArtifactError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let vectorizer: Self =
            serde_json::from_reader(BufReader::new(file)).map_err(|source| ArtifactError::Json {
                path: path.to_path_buf(),
                source,
            })?;

        debug!(
            "Loaded TfidfVectorizer with {} features",
            vectorizer.num_features()
        );

        Ok(vectorizer)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn corpus() -> Vec<&'static str> {
        vec![
            "senat pass budget bill",
            "senat reject budget",
            "shock celebr secret cure",
            "secret cure doctor hate",
        ]
    }

    #[test]
    fn test_fit_builds_sorted_vocabulary() {
        let vectorizer = TfidfVectorizer::fit(&corpus(), VectorizerParams::default());

        let terms: Vec<&String> = vectorizer.vocabulary().keys().collect();
        let mut sorted = terms.clone();
        sorted.sort();
        assert_eq!(terms, sorted);

        assert!(vectorizer.vocabulary().contains_key("senat"));
        assert!(vectorizer.vocabulary().contains_key("secret cure"));
        assert_eq!(vectorizer.idf().len(), vectorizer.num_features());
    }

    #[test]
    fn test_max_features_keeps_most_frequent_terms() {
        let params = VectorizerParams::default().with_max_features(4);
        let vectorizer = TfidfVectorizer::fit(&corpus(), params);

        assert_eq!(vectorizer.num_features(), 4);
        for term in ["budget", "cure", "secret", "secret cure"] {
            assert!(vectorizer.vocabulary().contains_key(term), "missing {term}");
        }
    }

    #[test]
    fn test_idf_discounts_common_terms() {
        let vectorizer = TfidfVectorizer::fit(&corpus(), VectorizerParams::default());
        let idf = |term: &str| vectorizer.idf()[vectorizer.vocabulary()[term]];

        assert!(idf("budget") < idf("bill"));
        assert!((idf("bill") - ((5.0_f32 / 2.0).ln() + 1.0)).abs() < 1e-6);
    }

    #[test]
    fn test_transform_is_normalized_and_ignores_unknown_terms() {
        let vectorizer = TfidfVectorizer::fit(&corpus(), VectorizerParams::default());

        let features = vectorizer.transform("senat budget zebra");
        assert_eq!(features.dim(), vectorizer.num_features());
        assert_eq!(features.nnz(), 2);
        assert!((features.l2_norm() - 1.0).abs() < 1e-5);

        let unknown = vectorizer.transform("zebra giraff");
        assert!(unknown.is_zero());
        assert_eq!(unknown.dim(), vectorizer.num_features());
    }

    #[test]
    fn test_fit_transform_matches_transform() {
        let texts = corpus();
        let (vectorizer, features) =
            TfidfVectorizer::fit_transform(&texts, VectorizerParams::default());

        assert_eq!(features.len(), texts.len());
        assert_eq!(
            features[2].to_dense(),
            vectorizer.transform(texts[2]).to_dense()
        );
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("vector.json");
        let vectorizer = TfidfVectorizer::fit(&corpus(), VectorizerParams::default());

        vectorizer.save(&path).unwrap();
        let loaded = TfidfVectorizer::load(&path).unwrap();

        assert_eq!(loaded.vocabulary(), vectorizer.vocabulary());
        assert_eq!(loaded.params(), vectorizer.params());
        assert_eq!(loaded.fingerprint(), vectorizer.fingerprint());
        for (a, b) in loaded.idf().iter().zip(vectorizer.idf()) {
            assert!((a - b).abs() < 1e-6);
        }
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = TfidfVectorizer::load(&dir.path().join("vector.json"));

        assert!(matches!(result, Err(ArtifactError::Missing(_))));
    }

    #[test]
    fn test_fingerprint_differs_between_idf_weights() {
        let texts = ["alpha beta", "alpha gamma"];
        let repeated = ["alpha beta", "alpha gamma", "alpha beta", "alpha beta", "alpha beta"];

        let a = TfidfVectorizer::fit(&texts, VectorizerParams::default());
        let b = TfidfVectorizer::fit(&repeated, VectorizerParams::default());

        assert_eq!(a.vocabulary(), b.vocabulary());
        assert_ne!(a.idf(), b.idf());
        assert_ne!(a.fingerprint(), b.fingerprint());
    }

    #[test]
    fn test_fingerprint_differs_between_vocabularies() {
        let a = TfidfVectorizer::fit(&corpus(), VectorizerParams::default());
        let b = TfidfVectorizer::fit(&corpus()[..2], VectorizerParams::default());

        assert_ne!(a.fingerprint(), b.fingerprint());
    }
}
