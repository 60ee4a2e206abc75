use rand::seq::SliceRandom;
use rand::Rng;

/// Returns a uniformly shuffled copy of `items` (Fisher-Yates). The input is left untouched.
pub fn shuffle<T: Clone>(items: &[T]) -> Vec<T> {
    shuffle_with(items, &mut rand::thread_rng())
}

pub fn shuffle_with<T: Clone, R: Rng + ?Sized>(items: &[T], rng: &mut R) -> Vec<T> {
    let mut shuffled = items.to_vec();
    shuffled.shuffle(rng);
    shuffled
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn test_shuffle_is_permutation() {
        let input: Vec<u32> = (0..50).collect();
        let shuffled = shuffle(&input);

        let mut sorted = shuffled.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, input);
    }

    #[test]
    fn test_shuffle_does_not_mutate_input() {
        let input = vec!["a", "b", "c", "d"];
        let snapshot = input.clone();
        for _ in 0..20 {
            let _ = shuffle(&input);
        }
        assert_eq!(input, snapshot);
    }

    #[test]
    fn test_shuffle_reaches_every_ordering() {
        let input = [1, 2, 3];
        let mut seen: HashSet<Vec<i32>> = HashSet::new();

        for _ in 0..2_000 {
            seen.insert(shuffle(&input));
            if seen.len() == 6 {
                break;
            }
        }

        assert_eq!(seen.len(), 6);
    }

    #[test]
    fn test_shuffle_handles_empty_and_single() {
        let empty: Vec<i32> = Vec::new();
        assert!(shuffle(&empty).is_empty());
        assert_eq!(shuffle(&[42]), vec![42]);
    }

    #[test]
    fn test_seeded_shuffle_is_reproducible() {
        let input: Vec<u8> = (0..10).collect();
        let first = shuffle_with(&input, &mut StdRng::seed_from_u64(7));
        let second = shuffle_with(&input, &mut StdRng::seed_from_u64(7));
        assert_eq!(first, second);
    }
}
