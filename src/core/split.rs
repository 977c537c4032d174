use crate::utils::error::Result;
use crate::utils::validation::validate_open_range;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::collections::BTreeMap;

fn test_size(total: usize, test_ratio: f64) -> usize {
    ((total as f64) * test_ratio).ceil().min(total as f64) as usize
}

/// Seeded shuffle split into `(train, test)`; the test side gets `ceil(n * test_ratio)` rows.
pub fn train_test_split<T>(mut rows: Vec<T>, test_ratio: f64, seed: u64) -> Result<(Vec<T>, Vec<T>)> {
    validate_open_range("test_ratio", test_ratio, 0.0, 1.0)?;

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    rows.shuffle(&mut rng);

    let total = rows.len();
    let test = rows.split_off(total - test_size(total, test_ratio));

    tracing::debug!(
        "Dataset split: {} train, {} test (seed {})",
        rows.len(),
        test.len(),
        seed
    );
    Ok((rows, test))
}

/// Splits every stratum separately so each keeps its share in both sets.
pub fn stratified_split<T, K, F>(
    rows: Vec<T>,
    test_ratio: f64,
    seed: u64,
    key: F,
) -> Result<(Vec<T>, Vec<T>)>
where
    K: Ord,
    F: Fn(&T) -> K,
{
    validate_open_range("test_ratio", test_ratio, 0.0, 1.0)?;

    let mut strata: BTreeMap<K, Vec<T>> = BTreeMap::new();
    for row in rows {
        strata.entry(key(&row)).or_default().push(row);
    }

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut train = Vec::new();
    let mut test = Vec::new();

    for (_, mut group) in strata {
        group.shuffle(&mut rng);
        let n_test = ((group.len() as f64) * test_ratio).round() as usize;
        let group_test = group.split_off(group.len() - n_test.min(group.len()));
        train.extend(group);
        test.extend(group_test);
    }

    train.shuffle(&mut rng);
    test.shuffle(&mut rng);

    tracing::debug!(
        "Stratified split: {} train, {} test (seed {})",
        train.len(),
        test.len(),
        seed
    );
    Ok((train, test))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_split_sizes_sum_to_total() {
        for total in [0usize, 1, 7, 100, 20640] {
            let rows: Vec<usize> = (0..total).collect();
            let (train, test) = train_test_split(rows, 0.2, 42).unwrap();
            assert_eq!(train.len() + test.len(), total);
            assert_eq!(test.len(), ((total as f64) * 0.2).ceil() as usize);
        }
    }

    #[test]
    fn test_split_is_deterministic_and_disjoint() {
        let rows: Vec<usize> = (0..50).collect();
        let (train_a, test_a) = train_test_split(rows.clone(), 0.3, 7).unwrap();
        let (train_b, test_b) = train_test_split(rows, 0.3, 7).unwrap();

        assert_eq!(train_a, train_b);
        assert_eq!(test_a, test_b);

        let train_set: HashSet<_> = train_a.iter().collect();
        assert!(test_a.iter().all(|row| !train_set.contains(row)));
    }

    #[test]
    fn test_split_rejects_bad_ratio() {
        assert!(train_test_split(vec![1, 2, 3], 0.0, 42).is_err());
        assert!(train_test_split(vec![1, 2, 3], 1.0, 42).is_err());
        assert!(stratified_split(vec![1, 2, 3], 1.5, 42, |x| *x).is_err());
    }

    #[test]
    fn test_stratified_split_keeps_proportions() {
        // 80 rows in stratum 0, 20 rows in stratum 1
        let rows: Vec<(usize, u8)> = (0..100).map(|i| (i, u8::from(i >= 80))).collect();
        let (train, test) = stratified_split(rows, 0.25, 42, |row| row.1).unwrap();

        assert_eq!(train.len() + test.len(), 100);
        assert_eq!(test.iter().filter(|row| row.1 == 0).count(), 20);
        assert_eq!(test.iter().filter(|row| row.1 == 1).count(), 5);
    }
}
