use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

use crate::labels::Label;

/// Split example indices into train and test sets, keeping class proportions in both.
///
/// For each class, `round(count * test_fraction)` examples are drawn into the test set using a
/// generator seeded with `seed`. Both index lists are returned sorted.
pub fn stratified_split(labels: &[Label], test_fraction: f64, seed: u64) -> (Vec<usize>, Vec<usize>) {
    let mut rng = StdRng::seed_from_u64(seed);

    let mut train = Vec::with_capacity(labels.len());
    let mut test = Vec::new();

    for class in Label::ALL {
        let mut indices = labels
            .iter()
            .enumerate()
            .filter(|(_, label)| **label == class)
            .map(|(index, _)| index)
            .collect::<Vec<_>>();

        indices.shuffle(&mut rng);

        let n_test = ((indices.len() as f64) * test_fraction).round() as usize;
        let n_test = n_test.min(indices.len());

        test.extend_from_slice(&indices[..n_test]);
        train.extend_from_slice(&indices[n_test..]);
    }

    train.sort_unstable();
    test.sort_unstable();

    (train, test)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn labels() -> Vec<Label> {
        let mut labels = vec![Label::Unreliable; 60];
        labels.extend(vec![Label::Reliable; 40]);
        labels
    }

    #[test]
    fn test_split_is_stratified() {
        let labels = labels();
        let (train, test) = stratified_split(&labels, 0.2, 42);

        assert_eq!(train.len(), 80);
        assert_eq!(test.len(), 20);

        let fake_in_test = test.iter().filter(|i| labels[**i] == Label::Unreliable).count();
        assert_eq!(fake_in_test, 12);
    }

    #[test]
    fn test_split_partitions_indices() {
        let labels = labels();
        let (train, test) = stratified_split(&labels, 0.2, 7);

        let mut all = train.iter().chain(test.iter()).copied().collect::<Vec<_>>();
        all.sort_unstable();
        assert_eq!(all, (0..labels.len()).collect::<Vec<_>>());
    }

    #[test]
    fn test_split_is_reproducible() {
        let labels = labels();

        assert_eq!(
            stratified_split(&labels, 0.2, 42),
            stratified_split(&labels, 0.2, 42)
        );
        assert_ne!(
            stratified_split(&labels, 0.2, 42).1,
            stratified_split(&labels, 0.2, 43).1
        );
    }
}
