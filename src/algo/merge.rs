// SPDX-License-Identifier: MIT
// Copyright (c) 2024 Rishabh Dwivedi (rishabhdwivedi17@gmail.com)

//! In-place, stable merge of two adjacent sorted runs with O(1) auxiliary
//! space. Exposes a bidirectional-cursor overload and a random-access-cursor
//! overload of the same trim-and-divide engine (see [`super::trim`] and
//! [`super::divide`]); both compile to the same code, monomorphized over the
//! [`super::primitives::Advance`] implementation the cursor category allows.

use crate::{BidirectionalRange, RandomAccessRange, SemiOutputRange};

use super::divide::{self, Hints};
use super::primitives::{Bidi, Ra};

/// Merges the two consecutive sorted runs `[start, mid)` and `[mid, end)`
/// in `rng` into a single sorted run, wrt `is_less`.
///
/// # Precondition
///   - `[start, mid)` and `[mid, end)` are each non-decreasing under
///     `is_less`.
///   - `is_less` is a strict weak ordering.
///
/// # Postcondition
///   - `[start, end)` is non-decreasing under `is_less`.
///   - Elements equivalent under `is_less` retain their relative order.
///   - Uses O(1) auxiliary space.
///   - Complexity: O(n log n) comparisons and O(n log n) element moves,
///     where n is the combined length of the two runs.
///
/// # Example
/// ```rust
/// use stl::*;
/// use rng::infix::*;
///
/// let mut arr = [(1, 1), (1, 3), (2, 3), (1, 2), (2, 2), (2, 4)];
/// algo::merge_in_place_by(&mut arr, 0, 3, 6, |x: &(i32, i32), y: &(i32, i32)| x.0 < y.0);
/// assert!(arr.equals(&[(1, 1), (1, 3), (1, 2), (2, 3), (2, 2), (2, 4)]));
/// ```
pub fn merge_in_place_by<R, Compare>(
    rng: &mut R,
    start: R::Position,
    mid: R::Position,
    end: R::Position,
    is_less: Compare,
) where
    R: BidirectionalRange + SemiOutputRange + ?Sized,
    Compare: Fn(&R::Element, &R::Element) -> bool,
{
    divide::merge::<R, Bidi, Compare>(rng, start, mid, end, &is_less, Hints::unknown());
}

/// Merges the two consecutive sorted runs `[start, mid)` and `[mid, end)`
/// in `rng` into a single sorted run.
///
/// # Precondition
///   - `[start, mid)` and `[mid, end)` are each non-decreasing.
///
/// # Postcondition
///   - Same as [`merge_in_place_by`], ordered by `Ord`.
pub fn merge_in_place<R>(rng: &mut R, start: R::Position, mid: R::Position, end: R::Position)
where
    R: BidirectionalRange + SemiOutputRange + ?Sized,
    R::Element: Ord,
{
    merge_in_place_by(rng, start, mid, end, |a: &R::Element, b: &R::Element| a < b);
}

/// Random-access-cursor specialisation of [`merge_in_place_by`]. Identical
/// postconditions; uses O(1) position offsetting instead of repeated
/// single-step traversal, which sharpens the O(n log n) bound's constant
/// factor for ranges that support it (slices, `Vec`, arrays).
///
/// # Example
/// ```rust
/// use stl::*;
///
/// let mut arr = [1, 3, 5, 2, 4, 6];
/// algo::merge_in_place_by_ra(&mut arr, 0, 3, 6, |x: &i32, y: &i32| x < y);
/// assert_eq!(arr, [1, 2, 3, 4, 5, 6]);
/// ```
pub fn merge_in_place_by_ra<R, Compare>(
    rng: &mut R,
    start: R::Position,
    mid: R::Position,
    end: R::Position,
    is_less: Compare,
) where
    R: RandomAccessRange + SemiOutputRange + ?Sized,
    Compare: Fn(&R::Element, &R::Element) -> bool,
{
    divide::merge::<R, Ra, Compare>(rng, start, mid, end, &is_less, Hints::unknown());
}

/// Random-access-cursor specialisation of [`merge_in_place`].
pub fn merge_in_place_ra<R>(rng: &mut R, start: R::Position, mid: R::Position, end: R::Position)
where
    R: RandomAccessRange + SemiOutputRange + ?Sized,
    R::Element: Ord,
{
    merge_in_place_by_ra(rng, start, mid, end, |a: &R::Element, b: &R::Element| a < b);
}
