//! Item sources feeding producer threads.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Supplies the items a producer pushes into the buffer.
///
/// Blanket-implemented for every [`Iterator`], so ranges, `vec.into_iter()`,
/// and adapter chains like `source.take(n)` are sources already. Returning
/// `None` ends the producer normally.
pub trait ItemSource<T> {
    /// Returns the next item, or `None` when the source is exhausted.
    fn next_item(&mut self) -> Option<T>;
}

impl<T, I> ItemSource<T> for I
where
    I: Iterator<Item = T>,
{
    fn next_item(&mut self) -> Option<T> {
        self.next()
    }
}

const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Endless supply of fixed-length alphabetic strings.
///
/// Strings are drawn from `[A-Za-z]` with a [`SmallRng`], so a seeded
/// generator yields the same sequence on every run. The iterator never
/// ends; bound it with [`Iterator::take`] when the producer should stop.
///
/// # Examples
///
/// ```
/// use relay_pipeline::RandomStrings;
///
/// let mut strings = RandomStrings::with_seed(5, 7);
/// let first = strings.next().unwrap();
/// assert_eq!(first.len(), 5);
/// assert!(first.chars().all(|c| c.is_ascii_alphabetic()));
///
/// // Same seed, same sequence.
/// let mut again = RandomStrings::with_seed(5, 7);
/// assert_eq!(again.next().unwrap(), first);
/// ```
#[derive(Debug, Clone)]
pub struct RandomStrings {
    rng: SmallRng,
    len: usize,
}

impl RandomStrings {
    /// Creates a generator of `len`-character strings seeded from the OS.
    pub fn new(len: usize) -> Self {
        Self {
            rng: SmallRng::from_entropy(),
            len,
        }
    }

    /// Creates a deterministic generator for reproducible runs.
    pub fn with_seed(len: usize, seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
            len,
        }
    }
}

impl Iterator for RandomStrings {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        let s = (0..self.len)
            .map(|_| ALPHABET[self.rng.gen_range(0..ALPHABET.len())] as char)
            .collect();
        Some(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iterators_are_sources() {
        let mut source = vec![1, 2, 3].into_iter();
        assert_eq!(source.next_item(), Some(1));
        assert_eq!(source.next_item(), Some(2));
        assert_eq!(source.next_item(), Some(3));
        assert_eq!(source.next_item(), None);
    }

    #[test]
    fn bounded_adapter_ends_the_source() {
        let mut source = RandomStrings::with_seed(4, 9).take(2);
        assert!(source.next_item().is_some());
        assert!(source.next_item().is_some());
        assert!(source.next_item().is_none());
    }

    #[test]
    fn random_strings_have_requested_length() {
        let strings: Vec<String> = RandomStrings::with_seed(5, 42).take(100).collect();
        assert!(strings.iter().all(|s| s.len() == 5));
        assert!(strings
            .iter()
            .all(|s| s.chars().all(|c| c.is_ascii_alphabetic())));
    }

    #[test]
    fn same_seed_same_sequence() {
        let a: Vec<String> = RandomStrings::with_seed(8, 1).take(20).collect();
        let b: Vec<String> = RandomStrings::with_seed(8, 1).take(20).collect();
        assert_eq!(a, b);
    }

    #[test]
    fn different_seeds_diverge() {
        let a: Vec<String> = RandomStrings::with_seed(8, 1).take(20).collect();
        let b: Vec<String> = RandomStrings::with_seed(8, 2).take(20).collect();
        assert_ne!(a, b);
    }
}
