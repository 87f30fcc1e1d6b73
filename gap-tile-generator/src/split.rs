use log::debug;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Seeded permutation of `0..n`. Same `(n, seed)` always gives the same order.
pub fn permutation(n: usize, seed: u64) -> Vec<usize> {
    let mut perm: Vec<usize> = (0..n).collect();
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    perm.shuffle(&mut rng);
    perm
}

/// Reorders `items` so that `out[i] = items[perm[i]]`.
///
/// `perm` must be a permutation of `0..items.len()`.
pub fn apply_permutation<T>(items: Vec<T>, perm: &[usize]) -> Vec<T> {
    debug_assert_eq!(items.len(), perm.len());
    let mut rank = vec![0usize; perm.len()];
    for (pos, &src) in perm.iter().enumerate() {
        rank[src] = pos;
    }
    let mut keyed: Vec<(usize, T)> = items.into_iter().enumerate().map(|(i, t)| (rank[i], t)).collect();
    keyed.sort_unstable_by_key(|(r, _)| *r);
    keyed.into_iter().map(|(_, t)| t).collect()
}

/// `(n_train, n_val)` for `n` items; the validation side is rounded up.
pub fn split_counts(n: usize, val_fraction: f64) -> (usize, usize) {
    let n_val = ((n as f64) * val_fraction).ceil() as usize;
    let n_val = n_val.min(n);
    (n - n_val, n_val)
}

/// Shuffles `items` with `seed` and splits them into (train, validation).
pub fn train_val_split<T>(items: Vec<T>, val_fraction: f64, seed: u64) -> (Vec<T>, Vec<T>) {
    let total = items.len();
    let (n_train, n_val) = split_counts(total, val_fraction);

    let perm = permutation(total, seed);
    let mut train = apply_permutation(items, &perm);
    let val = train.split_off(n_train);

    debug!("split {} tiles => {} training, {} validation", total, n_train, n_val);
    (train, val)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn permutation_is_reproducible() {
        assert_eq!(permutation(50, 11), permutation(50, 11));
        assert_ne!(permutation(50, 11), permutation(50, 7));

        let mut sorted = permutation(50, 11);
        sorted.sort_unstable();
        assert_eq!(sorted, (0..50).collect::<Vec<_>>());
    }

    #[test]
    fn apply_permutation_indexes_source() {
        let items = vec!['a', 'b', 'c', 'd'];
        let perm = [2, 0, 3, 1];
        assert_eq!(apply_permutation(items, &perm), vec!['c', 'a', 'd', 'b']);
    }

    #[test]
    fn validation_side_rounds_up() {
        assert_eq!(split_counts(5, 0.2), (4, 1));
        assert_eq!(split_counts(6, 0.2), (4, 2));
        assert_eq!(split_counts(10, 0.2), (8, 2));
        assert_eq!(split_counts(0, 0.2), (0, 0));
    }

    #[test]
    fn split_preserves_every_item() {
        let items: Vec<usize> = (0..23).collect();
        let (train, val) = train_val_split(items, 0.2, 11);
        assert_eq!(train.len(), 18);
        assert_eq!(val.len(), 5);

        let mut all: Vec<usize> = train.iter().chain(val.iter()).copied().collect();
        all.sort_unstable();
        assert_eq!(all, (0..23).collect::<Vec<_>>());
    }

    #[test]
    fn split_is_deterministic() {
        let a = train_val_split((0..40).collect::<Vec<u32>>(), 0.2, 11);
        let b = train_val_split((0..40).collect::<Vec<u32>>(), 0.2, 11);
        assert_eq!(a, b);
    }
}
