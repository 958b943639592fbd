use sprs::CsVec;

/// A sparse, fixed-dimension feature vector produced by the vectorizer
#[derive(Clone, Debug)]
pub struct FeatureVector(CsVec<f32>);

impl FeatureVector {
    /// Build a feature vector from `(index, value)` entries sorted by index
    pub(crate) fn from_sorted(dim: usize, entries: Vec<(usize, f32)>) -> Self {
        let (indices, data): (Vec<_>, Vec<_>) = entries.into_iter().unzip();

        Self(CsVec::new(dim, indices, data))
    }

    /// The dimension of the vector, equal to the vocabulary size
    pub fn dim(&self) -> usize {
        self.0.dim()
    }

    /// Number of non-zero entries
    pub fn nnz(&self) -> usize {
        self.0.nnz()
    }

    /// True when no vocabulary term was present in the text
    pub fn is_zero(&self) -> bool {
        self.0.nnz() == 0
    }

    /// Iterate over the non-zero `(index, value)` entries
    pub fn iter(&self) -> impl Iterator<Item = (usize, f32)> + '_ {
        self.0.iter().map(|(index, value)| (index, *value))
    }

    /// The Euclidean norm of the vector
    pub fn l2_norm(&self) -> f32 {
        self.iter().map(|(_, v)| v * v).sum::<f32>().sqrt()
    }

    /// Scatter the vector into a dense row, which must be zeroed and `dim()` long
    pub fn write_dense(&self, row: &mut [f32]) {
        for (index, value) in self.iter() {
            row[index] = value;
        }
    }

    /// Expand into a dense vector
    pub fn to_dense(&self) -> Vec<f32> {
        let mut dense = vec![0.0; self.dim()];
        self.write_dense(&mut dense);
        dense
    }
}
