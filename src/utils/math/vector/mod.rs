pub mod math;

use num::Num;

/// ZeroSpVec is a sparse vector that treats zero elements as implicit.
/// It holds `inds` and `vals`:
/// `inds` holds the dimension index of each stored element,
/// `vals` holds the value of each stored element.
///
/// Stored elements are guaranteed to be sorted by ascending index,
/// and a stored value is never zero.
#[derive(Debug, Clone, PartialEq)]
pub struct ZeroSpVec<N> {
    inds: Vec<u32>,
    vals: Vec<N>,
    len: usize,
}

impl<N> ZeroSpVec<N>
where
    N: Num + Copy,
{
    #[inline]
    pub fn new() -> Self {
        ZeroSpVec {
            inds: Vec::new(),
            vals: Vec::new(),
            len: 0,
        }
    }

    /// Create an all-zero vector with `len` dimensions
    #[inline]
    pub fn with_len(len: usize) -> Self {
        ZeroSpVec {
            inds: Vec::new(),
            vals: Vec::new(),
            len,
        }
    }

    /// Reserve room for `cap` non-zero elements
    #[inline]
    pub fn with_capacity(cap: usize) -> Self {
        ZeroSpVec {
            inds: Vec::with_capacity(cap),
            vals: Vec::with_capacity(cap),
            len: 0,
        }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of dimensions, zeros included
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Number of stored (non-zero) elements
    #[inline]
    pub fn nnz(&self) -> usize {
        self.inds.len()
    }

    #[inline]
    pub fn shrink_to_fit(&mut self) {
        self.inds.shrink_to_fit();
        self.vals.shrink_to_fit();
    }

    /// Append one dimension at the end.
    /// Zero is not stored.
    #[inline]
    pub fn push(&mut self, elem: N) {
        if elem != N::zero() {
            self.inds.push(self.len as u32);
            self.vals.push(elem);
        }
        self.len += 1;
    }

    /// Store `value` at `index` without touching the dimension count.
    /// `index` must be greater than every stored index and less than `len`.
    ///
    /// # Arguments
    /// * `index` - dimension index
    /// * `value` - value to store, zero is ignored
    #[inline]
    pub fn raw_push(&mut self, index: usize, value: N) {
        debug_assert!(index < self.len, "index {index} out of range for len {}", self.len);
        debug_assert!(
            self.inds.last().map_or(true, |&last| (last as usize) < index),
            "raw_push requires ascending indices"
        );
        if value != N::zero() {
            self.inds.push(index as u32);
            self.vals.push(value);
        }
    }

    /// Get the element at `index`.
    /// Returns None when `index` is out of range.
    #[inline]
    pub fn get(&self, index: usize) -> Option<N> {
        if index >= self.len {
            return None;
        }
        match self.inds.binary_search(&(index as u32)) {
            Ok(pos) => Some(self.vals[pos]),
            Err(_) => Some(N::zero()),
        }
    }

    /// Iterate stored elements as `(index, &value)` in ascending index order
    #[inline]
    pub fn raw_iter(&self) -> impl Iterator<Item = (usize, &N)> + '_ {
        self.inds.iter().map(|&i| i as usize).zip(self.vals.iter())
    }

    /// Expand into a dense vector
    pub fn to_dense(&self) -> Vec<N> {
        let mut dense = vec![N::zero(); self.len];
        for (idx, val) in self.raw_iter() {
            dense[idx] = *val;
        }
        dense
    }
}

impl<N> Default for ZeroSpVec<N>
where
    N: Num + Copy,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<N> From<Vec<N>> for ZeroSpVec<N>
where
    N: Num + Copy,
{
    fn from(vec: Vec<N>) -> Self {
        let mut sp = ZeroSpVec::with_capacity(vec.len());
        for elem in vec {
            sp.push(elem);
        }
        sp.shrink_to_fit();
        sp
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_keeps_zeros_implicit() {
        let sp = ZeroSpVec::from(vec![0u32, 3, 0, 0, 1]);
        assert_eq!(sp.len(), 5);
        assert_eq!(sp.nnz(), 2);
        assert_eq!(sp.get(1), Some(3));
        assert_eq!(sp.get(2), Some(0));
        assert_eq!(sp.get(5), None);
        assert_eq!(sp.to_dense(), vec![0, 3, 0, 0, 1]);
    }

    #[test]
    fn raw_push_fills_fixed_length() {
        let mut sp: ZeroSpVec<u32> = ZeroSpVec::with_len(6);
        sp.raw_push(1, 2);
        sp.raw_push(3, 0);
        sp.raw_push(4, 7);
        assert_eq!(sp.len(), 6);
        assert_eq!(sp.nnz(), 2);
        let stored: Vec<(usize, u32)> = sp.raw_iter().map(|(i, v)| (i, *v)).collect();
        assert_eq!(stored, vec![(1, 2), (4, 7)]);
    }
}
