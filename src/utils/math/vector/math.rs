use std::{cmp::Ordering, ops::AddAssign};

use num::Num;

use super::ZeroSpVec;

impl<N> ZeroSpVec<N>
where
    N: Num + Copy,
{
    /// Compute the dot product
    ///
    /// # Arguments
    /// * `other` - the other vector
    ///
    /// # Returns
    /// * `R` - dot product accumulated in `R`
    #[inline]
    pub fn dot<R>(&self, other: &Self) -> R
    where
        R: Num + AddAssign + Copy,
        N: Into<R>,
    {
        debug_assert_eq!(
            self.len(),
            other.len(),
            "Vectors must be of the same length to compute dot product."
        );

        let mut result = R::zero();
        if self.nnz() == 0 || other.nnz() == 0 {
            return result;
        }

        let mut a_it = self.raw_iter();
        let mut b_it = other.raw_iter();
        let mut a_next = a_it.next();
        let mut b_next = b_it.next();
        while let (Some((ia, va)), Some((ib, vb))) = (a_next, b_next) {
            match ia.cmp(&ib) {
                Ordering::Equal => {
                    result += (*va).into() * (*vb).into();
                    a_next = a_it.next();
                    b_next = b_it.next();
                }
                Ordering::Less => a_next = a_it.next(),
                Ordering::Greater => b_next = b_it.next(),
            }
        }
        result
    }

    /// Squared L2 norm
    #[inline]
    pub fn norm_sq<R>(&self) -> R
    where
        R: Num + AddAssign + Copy,
        N: Into<R>,
    {
        let mut result = R::zero();
        for (_, val) in self.raw_iter() {
            let v: R = (*val).into();
            result += v * v;
        }
        result
    }

    /// Cosine similarity
    /// cosθ = A・B / (|A||B|)
    /// A zero vector on either side yields 0.0 instead of NaN.
    #[inline]
    pub fn cosine(&self, other: &Self) -> f64
    where
        N: Into<f64>,
    {
        let norm_a = self.norm_sq::<f64>().sqrt();
        let norm_b = other.norm_sq::<f64>().sqrt();
        if norm_a == 0.0 || norm_b == 0.0 {
            return 0.0;
        }
        self.dot::<f64>(other) / (norm_a * norm_b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dot_skips_disjoint_dimensions() {
        let a = ZeroSpVec::from(vec![1u32, 0, 2, 0]);
        let b = ZeroSpVec::from(vec![3u32, 5, 0, 4]);
        assert_eq!(a.dot::<f64>(&b), 3.0);
        assert_eq!(a.norm_sq::<f64>(), 5.0);
    }

    #[test]
    fn cosine_of_parallel_vectors_is_one() {
        let a = ZeroSpVec::from(vec![1u32, 2, 0]);
        let b = ZeroSpVec::from(vec![2u32, 4, 0]);
        assert!((a.cosine(&b) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn cosine_with_zero_vector_is_zero() {
        let a = ZeroSpVec::from(vec![1u32, 2, 0]);
        let zero: ZeroSpVec<u32> = ZeroSpVec::with_len(3);
        assert_eq!(a.cosine(&zero), 0.0);
        assert_eq!(zero.cosine(&zero), 0.0);
    }
}
