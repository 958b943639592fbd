//! Feature extraction: TF-IDF weighting over unigrams and bigrams of cleaned text

/// N-gram counting
pub mod ngrams;

/// Vectorizer parameters
pub mod params;

/// The TF-IDF vectorizer
pub mod tfidf;

/// Sparse feature vectors
pub mod vector;

pub use params::VectorizerParams;
pub use tfidf::TfidfVectorizer;
pub use vector::FeatureVector;
