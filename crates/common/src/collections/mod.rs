//! Slice and vector helpers
//!
//! - **[`SliceExt`]**: non-mutating append
//! - **[`HashableSliceExt`]**: frequency counts, duplicate removal and
//!   single-element extraction for `Eq + Hash` elements
//! - **[`FloatSliceExt`]**: arithmetic mean
//!
//! ## Usage
//!
//! ```rust
//! use foundationkit_common::collections::{HashableSliceExt, SliceExt};
//!
//! let values = [3, 1, 3, 2].appending(3);
//! assert_eq!(values.mode(), Some(3));
//! assert_eq!(values.removing_duplicates(), vec![3, 1, 2]);
//! ```

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

/// Non-mutating append on slices
pub trait SliceExt<T: Clone> {
    /// A new vector with `element` appended
    fn appending(&self, element: T) -> Vec<T>;

    /// A new vector with every element of `elements` appended
    fn appending_all<I>(&self, elements: I) -> Vec<T>
    where
        I: IntoIterator<Item = T>;
}

impl<T: Clone> SliceExt<T> for [T] {
    fn appending(&self, element: T) -> Vec<T> {
        let mut appended = Vec::with_capacity(self.len() + 1);
        appended.extend_from_slice(self);
        appended.push(element);
        appended
    }

    fn appending_all<I>(&self, elements: I) -> Vec<T>
    where
        I: IntoIterator<Item = T>,
    {
        let mut appended = self.to_vec();
        appended.extend(elements);
        appended
    }
}

/// Helpers for slices of hashable elements
pub trait HashableSliceExt<T: Eq + Hash + Clone> {
    /// Number of occurrences of each distinct element
    fn frequencies(&self) -> HashMap<T, usize>;

    /// Most frequent element; ties go to the element seen first
    fn mode(&self) -> Option<T>;

    /// Elements in their original order with later duplicates dropped
    fn removing_duplicates(&self) -> Vec<T>;

    /// The element if the slice holds exactly one
    fn only_element(&self) -> Option<T>;

    /// The element if the slice holds exactly one distinct value
    fn unique_element(&self) -> Option<T>;
}

impl<T: Eq + Hash + Clone> HashableSliceExt<T> for [T] {
    fn frequencies(&self) -> HashMap<T, usize> {
        let mut frequencies = HashMap::with_capacity(self.len());
        for element in self {
            *frequencies.entry(element.clone()).or_insert(0) += 1;
        }
        frequencies
    }

    fn mode(&self) -> Option<T> {
        let frequencies = self.frequencies();
        let mut best: Option<(&T, usize)> = None;
        for element in self {
            let count = frequencies.get(element).copied().unwrap_or_default();
            if best.map_or(true, |(_, best_count)| count > best_count) {
                best = Some((element, count));
            }
        }
        best.map(|(element, _)| element.clone())
    }

    fn removing_duplicates(&self) -> Vec<T> {
        let mut seen = HashSet::with_capacity(self.len());
        self.iter().filter(|element| seen.insert(*element)).cloned().collect()
    }

    fn only_element(&self) -> Option<T> {
        match self {
            [element] => Some(element.clone()),
            _ => None,
        }
    }

    fn unique_element(&self) -> Option<T> {
        let first = self.first()?;
        self.iter().all(|element| element == first).then(|| first.clone())
    }
}

/// In-place duplicate removal on vectors
pub trait DedupExt {
    /// Drop later duplicates, keeping the first occurrence of each element
    fn remove_duplicates(&mut self);
}

impl<T: Eq + Hash + Clone> DedupExt for Vec<T> {
    fn remove_duplicates(&mut self) {
        let mut seen = HashSet::with_capacity(self.len());
        self.retain(|element| seen.insert(element.clone()));
    }
}

/// Arithmetic on floating-point slices
pub trait FloatSliceExt {
    /// Arithmetic mean, `None` when empty
    fn average(&self) -> Option<f64>;
}

impl FloatSliceExt for [f64] {
    fn average(&self) -> Option<f64> {
        if self.is_empty() {
            return None;
        }
        #[allow(clippy::cast_precision_loss)]
        let count = self.len() as f64;
        Some(self.iter().sum::<f64>() / count)
    }
}

impl FloatSliceExt for [f32] {
    fn average(&self) -> Option<f64> {
        if self.is_empty() {
            return None;
        }
        #[allow(clippy::cast_precision_loss)]
        let count = self.len() as f64;
        Some(self.iter().map(|&value| f64::from(value)).sum::<f64>() / count)
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for collection helpers

    use super::*;

    #[test]
    fn test_appending_leaves_source_untouched() {
        let source = vec![1, 2];
        assert_eq!(source.appending(3), vec![1, 2, 3]);
        assert_eq!(source.appending_all([3, 4]), vec![1, 2, 3, 4]);
        assert_eq!(source, vec![1, 2]);
    }

    #[test]
    fn test_frequencies() {
        let frequencies = ["a", "b", "a", "c", "a"].frequencies();
        assert_eq!(frequencies.get("a"), Some(&3));
        assert_eq!(frequencies.get("b"), Some(&1));
        assert_eq!(frequencies.get("z"), None);
        assert_eq!(frequencies.values().sum::<usize>(), 5);
    }

    /// Validates mode picks the most frequent element with first-seen ties.
    #[test]
    fn test_mode() {
        assert_eq!([1, 2, 2, 3].mode(), Some(2));
        assert_eq!([5, 4, 4, 5].mode(), Some(5));
        assert_eq!(Vec::<i32>::new().mode(), None);
    }

    #[test]
    fn test_removing_duplicates_preserves_order() {
        assert_eq!([3, 1, 3, 2, 1].removing_duplicates(), vec![3, 1, 2]);

        let mut values = vec!["b", "a", "b"];
        values.remove_duplicates();
        assert_eq!(values, vec!["b", "a"]);
    }

    #[test]
    fn test_only_and_unique_element() {
        assert_eq!([7].only_element(), Some(7));
        assert_eq!([7, 7].only_element(), None);
        assert_eq!([7, 7].unique_element(), Some(7));
        assert_eq!([7, 8].unique_element(), None);
        assert_eq!(Vec::<i32>::new().unique_element(), None);
    }

    #[test]
    fn test_average() {
        assert_eq!([1.0, 2.0, 3.0, 4.0].average(), Some(2.5));
        assert_eq!([2.0f32].average(), Some(2.0));
        assert_eq!(Vec::<f64>::new().average(), None);
    }
}
