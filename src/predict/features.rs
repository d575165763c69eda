//! Feature sources for traversal.
//!
//! A [`FeatureLookup`] answers one question per split node: is the tested
//! feature present, and if so what is its value? Missing-value policy lives
//! here, not in the walk:
//!
//! - [`DenseFeatures`]: positional vector. Out-of-range indices are missing,
//!   and optionally so is an exact `0.0`.
//! - [`SparseFeatures`]: key-value map. Absent keys and NaN values are
//!   missing; `0.0` is an ordinary value.

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

/// Per-node feature access used by the traversal walk.
pub trait FeatureLookup {
    /// Value of `feature`, or `None` when the node's default branch applies.
    fn present_value(&self, feature: u32) -> Option<f32>;
}

impl<T: FeatureLookup + ?Sized> FeatureLookup for &T {
    #[inline]
    fn present_value(&self, feature: u32) -> Option<f32> {
        (**self).present_value(feature)
    }
}

// =============================================================================
// Dense
// =============================================================================

/// Dense feature vector indexed by feature id.
///
/// # Example
///
/// ```
/// use boosters_regtree::predict::{DenseFeatures, FeatureLookup};
///
/// let values = [0.0f32, 2.5];
/// assert_eq!(DenseFeatures::new(&values, false).present_value(0), Some(0.0));
/// assert_eq!(DenseFeatures::new(&values, true).present_value(0), None);
/// assert_eq!(DenseFeatures::new(&values, false).present_value(7), None);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct DenseFeatures<'a> {
    values: &'a [f32],
    treat_zero_as_missing: bool,
}

impl<'a> DenseFeatures<'a> {
    pub fn new(values: &'a [f32], treat_zero_as_missing: bool) -> Self {
        Self {
            values,
            treat_zero_as_missing,
        }
    }

    #[inline]
    pub fn values(&self) -> &'a [f32] {
        self.values
    }

    #[inline]
    pub fn treats_zero_as_missing(&self) -> bool {
        self.treat_zero_as_missing
    }
}

impl FeatureLookup for DenseFeatures<'_> {
    #[inline]
    fn present_value(&self, feature: u32) -> Option<f32> {
        let value = *self.values.get(feature as usize)?;
        dense_value(value, self.treat_zero_as_missing)
    }
}

/// Zero-as-missing check shared by the dense sources.
///
/// NaN stays present. It compares false against every threshold and routes
/// right.
#[inline]
fn dense_value(value: f32, treat_zero_as_missing: bool) -> Option<f32> {
    if treat_zero_as_missing && value == 0.0 {
        None
    } else {
        Some(value)
    }
}

/// Dense feature source over an `ndarray` row view.
///
/// Same semantics as [`DenseFeatures`], for rows that are not contiguous.
#[cfg(feature = "ndarray")]
#[derive(Debug, Clone)]
pub struct ArrayFeatures<'a> {
    values: ndarray::ArrayView1<'a, f32>,
    treat_zero_as_missing: bool,
}

#[cfg(feature = "ndarray")]
impl<'a> ArrayFeatures<'a> {
    pub fn new(values: ndarray::ArrayView1<'a, f32>, treat_zero_as_missing: bool) -> Self {
        Self {
            values,
            treat_zero_as_missing,
        }
    }
}

#[cfg(feature = "ndarray")]
impl FeatureLookup for ArrayFeatures<'_> {
    #[inline]
    fn present_value(&self, feature: u32) -> Option<f32> {
        let value = *self.values.get(feature as usize)?;
        dense_value(value, self.treat_zero_as_missing)
    }
}

// =============================================================================
// Sparse
// =============================================================================

/// Key-value storage for sparse rows.
pub trait SparseMap {
    /// Stored value for `feature`, if any.
    fn get_feature(&self, feature: u32) -> Option<f32>;
}

impl<S: BuildHasher> SparseMap for HashMap<u32, f32, S> {
    #[inline]
    fn get_feature(&self, feature: u32) -> Option<f32> {
        self.get(&feature).copied()
    }
}

impl<S: BuildHasher> SparseMap for HashMap<usize, f32, S> {
    #[inline]
    fn get_feature(&self, feature: u32) -> Option<f32> {
        self.get(&(feature as usize)).copied()
    }
}

impl SparseMap for BTreeMap<u32, f32> {
    #[inline]
    fn get_feature(&self, feature: u32) -> Option<f32> {
        self.get(&feature).copied()
    }
}

impl SparseMap for BTreeMap<usize, f32> {
    #[inline]
    fn get_feature(&self, feature: u32) -> Option<f32> {
        self.get(&(feature as usize)).copied()
    }
}

/// Sparse row wrapper applying the NaN-is-missing policy.
#[derive(Debug)]
pub struct SparseFeatures<'a, M: ?Sized>(pub &'a M);

impl<M: ?Sized> Clone for SparseFeatures<'_, M> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<M: ?Sized> Copy for SparseFeatures<'_, M> {}

impl<M: SparseMap + ?Sized> FeatureLookup for SparseFeatures<'_, M> {
    #[inline]
    fn present_value(&self, feature: u32) -> Option<f32> {
        self.0.get_feature(feature).filter(|v| !v.is_nan())
    }
}
