//! Binary selection masks.

use std::ops::Index;

/// A fixed-length binary vector; bit `i` set means candidate `i` is selected.
///
/// Masks are plain values. Nothing enforces a particular number of set bits:
/// the cardinality target is scored by the evaluator, not checked here.
///
/// # Examples
///
/// ```
/// use u_subset::subset::SelectionMask;
///
/// let mask = SelectionMask::from_indices(5, &[1, 3]);
/// assert_eq!(mask.popcount(), 2);
/// assert_eq!(mask.selected_indices(), vec![1, 3]);
/// assert_eq!(mask.unselected_indices(), vec![0, 2, 4]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SelectionMask {
    bits: Vec<bool>,
}

impl SelectionMask {
    /// A mask of length `n` with nothing selected.
    pub fn empty(n: usize) -> Self {
        Self {
            bits: vec![false; n],
        }
    }

    /// A mask of length `n` with exactly the given indices set.
    ///
    /// # Panics
    /// Panics if any index is `>= n`.
    pub fn from_indices(n: usize, indices: &[usize]) -> Self {
        let mut mask = Self::empty(n);
        for &i in indices {
            mask.bits[i] = true;
        }
        mask
    }

    /// Number of positions (the candidate count `N`).
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Returns whether candidate `i` is selected.
    pub fn get(&self, i: usize) -> bool {
        self.bits[i]
    }

    /// Sets the membership of candidate `i`.
    pub fn set(&mut self, i: usize, selected: bool) {
        self.bits[i] = selected;
    }

    /// Number of selected candidates.
    pub fn popcount(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }

    /// Indices of selected candidates, ascending.
    pub fn selected_indices(&self) -> Vec<usize> {
        self.indices_where(true)
    }

    /// Indices of unselected candidates, ascending.
    pub fn unselected_indices(&self) -> Vec<usize> {
        self.indices_where(false)
    }

    fn indices_where(&self, value: bool) -> Vec<usize> {
        self.bits
            .iter()
            .enumerate()
            .filter_map(|(i, &b)| (b == value).then_some(i))
            .collect()
    }

    /// Bitwise AND of two masks of equal length.
    pub fn and(&self, other: &Self) -> Self {
        self.zip_with(other, |a, b| a && b)
    }

    /// Bitwise XOR of two masks of equal length.
    pub fn xor(&self, other: &Self) -> Self {
        self.zip_with(other, |a, b| a != b)
    }

    /// Number of positions where the two masks differ.
    pub fn hamming_distance(&self, other: &Self) -> usize {
        debug_assert_eq!(self.len(), other.len(), "masks must have equal length");
        self.bits
            .iter()
            .zip(&other.bits)
            .filter(|(a, b)| a != b)
            .count()
    }

    fn zip_with(&self, other: &Self, f: impl Fn(bool, bool) -> bool) -> Self {
        debug_assert_eq!(self.len(), other.len(), "masks must have equal length");
        Self {
            bits: self
                .bits
                .iter()
                .zip(&other.bits)
                .map(|(&a, &b)| f(a, b))
                .collect(),
        }
    }

    /// Iterates over the bits in index order.
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.bits.iter().copied()
    }

    /// Borrows the underlying bits.
    pub fn as_slice(&self) -> &[bool] {
        &self.bits
    }
}

impl Index<usize> for SelectionMask {
    type Output = bool;

    fn index(&self, i: usize) -> &bool {
        &self.bits[i]
    }
}

impl From<Vec<bool>> for SelectionMask {
    fn from(bits: Vec<bool>) -> Self {
        Self { bits }
    }
}

impl From<SelectionMask> for Vec<bool> {
    fn from(mask: SelectionMask) -> Self {
        mask.bits
    }
}
