use crate::utils::error::Result;
use crate::utils::validation::validate_positive_number;
use std::collections::{HashSet, VecDeque};
use std::hash::Hash;
use std::iter::Fuse;

/// Yields `seed`, then `next(&previous)` until it returns `None`.
pub fn generate<T, F>(seed: T, next: F) -> impl Iterator<Item = T>
where
    F: FnMut(&T) -> Option<T>,
{
    std::iter::successors(Some(seed), next)
}

/// Yields `produce()` until it returns `None`.
pub fn generate_with<T, F>(produce: F) -> impl Iterator<Item = T>
where
    F: FnMut() -> Option<T>,
{
    std::iter::from_fn(produce)
}

pub fn flatten<I>(iterables: I) -> impl Iterator<Item = <I::Item as IntoIterator>::Item>
where
    I: IntoIterator,
    I::Item: IntoIterator,
{
    iterables.into_iter().flatten()
}

pub trait SequenceExt: Iterator + Sized {
    /// Keeps the first element for each distinct key.
    fn distinct_by<K, F>(self, key: F) -> DistinctBy<Self, K, F>
    where
        K: Eq + Hash,
        F: FnMut(&Self::Item) -> K,
    {
        DistinctBy {
            iter: self,
            key,
            seen: HashSet::new(),
        }
    }

    fn distinct(self) -> DistinctBy<Self, Self::Item, fn(&Self::Item) -> Self::Item>
    where
        Self::Item: Eq + Hash + Clone,
    {
        self.distinct_by(Clone::clone as fn(&Self::Item) -> Self::Item)
    }

    /// Sliding windows of `size` elements, advancing by `step`. With `partial`
    /// the trailing shorter windows are yielded too.
    fn windowed(self, size: usize, step: usize, partial: bool) -> Result<Windowed<Self>>
    where
        Self::Item: Clone,
    {
        validate_positive_number("size", size, 1)?;
        validate_positive_number("step", step, 1)?;
        Ok(Windowed {
            iter: self.fuse(),
            buffer: VecDeque::new(),
            size,
            step,
            partial,
        })
    }

    /// Consecutive non-overlapping chunks; the last one may be shorter.
    fn chunked(self, size: usize) -> Result<Windowed<Self>>
    where
        Self::Item: Clone,
    {
        self.windowed(size, size, true)
    }
}

impl<I: Iterator> SequenceExt for I {}

pub struct DistinctBy<I: Iterator, K, F> {
    iter: I,
    key: F,
    seen: HashSet<K>,
}

impl<I, K, F> Iterator for DistinctBy<I, K, F>
where
    I: Iterator,
    K: Eq + Hash,
    F: FnMut(&I::Item) -> K,
{
    type Item = I::Item;

    fn next(&mut self) -> Option<I::Item> {
        for item in self.iter.by_ref() {
            if self.seen.insert((self.key)(&item)) {
                return Some(item);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.iter.size_hint().1)
    }
}

pub struct Windowed<I: Iterator> {
    iter: Fuse<I>,
    buffer: VecDeque<I::Item>,
    size: usize,
    step: usize,
    partial: bool,
}

impl<I> Iterator for Windowed<I>
where
    I: Iterator,
    I::Item: Clone,
{
    type Item = Vec<I::Item>;

    fn next(&mut self) -> Option<Vec<I::Item>> {
        while self.buffer.len() < self.size {
            match self.iter.next() {
                Some(item) => self.buffer.push_back(item),
                None => break,
            }
        }

        let full = self.buffer.len() == self.size;
        if self.buffer.is_empty() || (!full && !self.partial) {
            return None;
        }

        let window: Vec<I::Item> = self.buffer.iter().cloned().collect();
        if self.step <= self.buffer.len() {
            self.buffer.drain(..self.step);
        } else {
            let skip = self.step - self.buffer.len();
            self.buffer.clear();
            for _ in 0..skip {
                if self.iter.next().is_none() {
                    break;
                }
            }
        }
        Some(window)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_stops_on_none() {
        let powers: Vec<u32> = generate(1, |&n| if n < 100 { Some(n * 3) } else { None }).collect();
        assert_eq!(powers, vec![1, 3, 9, 27, 81, 243]);
    }

    #[test]
    fn test_generate_with_counter() {
        let mut n = 0;
        let items: Vec<i32> = generate_with(|| {
            n += 1;
            (n <= 3).then_some(n)
        })
        .collect();
        assert_eq!(items, vec![1, 2, 3]);
    }

    #[test]
    fn test_flatten() {
        let nested = vec![vec![1, 2], vec![], vec![3]];
        assert_eq!(flatten(nested).collect::<Vec<_>>(), vec![1, 2, 3]);
    }

    #[test]
    fn test_distinct_by_keeps_first() {
        let words = ["apple", "avocado", "banana", "blueberry", "cherry"];
        let firsts: Vec<_> = words
            .iter()
            .distinct_by(|w| w.chars().next())
            .copied()
            .collect();
        assert_eq!(firsts, vec!["apple", "banana", "cherry"]);

        let unique: Vec<_> = vec![3, 1, 3, 2, 1].into_iter().distinct().collect();
        assert_eq!(unique, vec![3, 1, 2]);
    }

    #[test]
    fn test_distinct_is_lazy() {
        let mut pulled = 0;
        let first_two: Vec<_> = (0..)
            .inspect(|_| pulled += 1)
            .distinct_by(|n| n / 2)
            .take(2)
            .collect();
        assert_eq!(first_two, vec![0, 2]);
        assert_eq!(pulled, 3);
    }

    #[test]
    fn test_windowed() {
        let full: Vec<_> = (1..=5).windowed(3, 1, false).unwrap().collect();
        assert_eq!(full, vec![vec![1, 2, 3], vec![2, 3, 4], vec![3, 4, 5]]);

        let partial: Vec<_> = (1..=5).windowed(3, 2, true).unwrap().collect();
        assert_eq!(partial, vec![vec![1, 2, 3], vec![3, 4, 5], vec![5]]);

        let sparse: Vec<_> = (1..=10).windowed(2, 4, false).unwrap().collect();
        assert_eq!(sparse, vec![vec![1, 2], vec![5, 6], vec![9, 10]]);

        assert!((1..3).windowed(0, 1, false).is_err());
        assert!((1..3).windowed(1, 0, false).is_err());
    }

    #[test]
    fn test_chunked() {
        let chunks: Vec<_> = "abcdefg".chars().chunked(3).unwrap().collect();
        assert_eq!(
            chunks,
            vec![vec!['a', 'b', 'c'], vec!['d', 'e', 'f'], vec!['g']]
        );
    }

    #[test]
    fn test_window_larger_than_input() {
        let windows: Vec<Vec<i32>> = (1..3).windowed(usize::MAX, 1, true).unwrap().collect();
        assert_eq!(windows, vec![vec![1, 2], vec![2]]);

        let full: Vec<Vec<i32>> = (1..3).windowed(usize::MAX, 1, false).unwrap().collect();
        assert!(full.is_empty());

        let chunks: Vec<Vec<i32>> = (1..3).chunked(usize::MAX).unwrap().collect();
        assert_eq!(chunks, vec![vec![1, 2]]);
    }
}
