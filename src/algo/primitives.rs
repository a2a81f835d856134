// SPDX-License-Identifier: MIT
// Copyright (c) 2024 Rishabh Dwivedi (rishabhdwivedi17@gmail.com)

//! Leaf-level operations the trim and divide phases are built from: binary
//! search helpers, bounded rotations, range swaps and the symmetric
//! displacement search. Everything here is parameterised over iterator
//! category through [`Advance`] rather than over a single concrete cursor
//! type, so trim/divide only need to be written once.

use crate::{BidirectionalRange, RandomAccessRange, SemiOutputRange};

/// Bridges the position arithmetic that differs between a `BidirectionalRange`
/// cursor, which can only step one position at a time, and a
/// `RandomAccessRange` cursor, which can jump by `n` in O(1).
pub trait Advance<R: BidirectionalRange + ?Sized> {
    fn advance(rng: &R, pos: R::Position, n: usize) -> R::Position;
    fn retreat(rng: &R, pos: R::Position, n: usize) -> R::Position;
    fn distance(rng: &R, from: R::Position, to: R::Position) -> usize;
}

/// `Advance` for plain bidirectional cursors: every step costs one `after`/
/// `before` call, so distance/offset are O(n).
pub struct Bidi;

impl<R: BidirectionalRange + ?Sized> Advance<R> for Bidi {
    fn advance(rng: &R, mut pos: R::Position, n: usize) -> R::Position {
        for _ in 0..n {
            pos = rng.after(pos);
        }
        pos
    }

    fn retreat(rng: &R, mut pos: R::Position, n: usize) -> R::Position {
        for _ in 0..n {
            pos = rng.before(pos);
        }
        pos
    }

    fn distance(rng: &R, from: R::Position, to: R::Position) -> usize {
        rng.distance(from, to)
    }
}

/// `Advance` for random-access cursors: offset and distance are O(1).
pub struct Ra;

impl<R: RandomAccessRange + ?Sized> Advance<R> for Ra {
    fn advance(rng: &R, pos: R::Position, n: usize) -> R::Position {
        rng.after_n(pos, n)
    }

    fn retreat(rng: &R, pos: R::Position, n: usize) -> R::Position {
        rng.before_n(pos, n)
    }

    fn distance(rng: &R, from: R::Position, to: R::Position) -> usize {
        rng.distance(from, to)
    }
}

/// `a <= b` derived from the caller's strict weak order `is_less`.
///
/// Defined exactly once; every comparison elsewhere in the engine that
/// means "less-or-equivalent" goes through this helper.
pub fn le<T, Compare>(is_less: &Compare, a: &T, b: &T) -> bool
where
    Compare: Fn(&T, &T) -> bool,
{
    !is_less(b, a)
}

/// Smallest position in `[start, end)` for which `pred` is false.
///
/// # Precondition
///   - `pred` is true on a (possibly empty) prefix of `[start, end)` and
///     false on the remainder.
///
/// Complexity: O(log2(n)) predicate evaluations; O(log2(n)) position steps
/// if `A` is [`Ra`], otherwise O(n) position steps.
pub(crate) fn partition_point<R, A, Pred>(
    rng: &R,
    mut start: R::Position,
    end: R::Position,
    pred: Pred,
) -> R::Position
where
    R: BidirectionalRange + ?Sized,
    A: Advance<R>,
    Pred: Fn(&R::Element) -> bool,
{
    let mut len = A::distance(rng, start.clone(), end);
    while len > 0 {
        let half = len / 2;
        let mid = A::advance(rng, start.clone(), half);
        if pred(rng.at(&mid)) {
            start = A::advance(rng, mid, 1);
            len -= half + 1;
        } else {
            len = half;
        }
    }
    start
}

/// Rightmost position in `[start, end]` holding a value `< value`.
///
/// # Precondition
///   - `[start, end]` is non-decreasing under `is_less`.
///   - some position in `[start, end]` is known to hold a value `< value`.
pub fn largest_less<R, A, Compare>(
    rng: &R,
    start: R::Position,
    end: R::Position,
    value: &R::Element,
    is_less: &Compare,
) -> R::Position
where
    R: BidirectionalRange + ?Sized,
    A: Advance<R>,
    Compare: Fn(&R::Element, &R::Element) -> bool,
{
    let one_past_end = A::advance(rng, end, 1);
    let first_not_less =
        partition_point::<R, A, _>(rng, start.clone(), one_past_end, |x| is_less(x, value));
    debug_assert!(
        first_not_less != start,
        "largest_less: no element < value in [start, end]"
    );
    A::retreat(rng, first_not_less, 1)
}

/// Leftmost position in `[start, end]` holding a value `> value`.
///
/// # Precondition
///   - `[start, end]` is non-decreasing under `is_less`.
///   - some position in `[start, end]` is known to hold a value `> value`.
pub fn smallest_greater<R, A, Compare>(
    rng: &R,
    start: R::Position,
    end: R::Position,
    value: &R::Element,
    is_less: &Compare,
) -> R::Position
where
    R: BidirectionalRange + ?Sized,
    A: Advance<R>,
    Compare: Fn(&R::Element, &R::Element) -> bool,
{
    let one_past_end = A::advance(rng, end, 1);
    let pos =
        partition_point::<R, A, _>(rng, start, one_past_end.clone(), |x| !is_less(value, x));
    debug_assert!(
        pos != one_past_end,
        "smallest_greater: no element > value in [start, end]"
    );
    pos
}

/// Smallest `d` in `[0, len)` such that `*(end_left - d) <= *(start_right +
/// d)` under `is_less`.
///
/// # Precondition
///   - `end_left` is the last position of the left run, `start_right` the
///     first position of the right run, and both runs have length >= `len`.
///   - `len > 0`.
///   - such a `d` exists (guaranteed by a pigeonhole argument on two sorted
///     runs whose boundary is strictly inverted, spec.md §4.1).
///
/// Complexity: O(log2(len)) comparisons.
pub fn symmetric_displacement<R, A, Compare>(
    rng: &R,
    end_left: R::Position,
    start_right: R::Position,
    len: usize,
    is_less: &Compare,
) -> usize
where
    R: BidirectionalRange + ?Sized,
    A: Advance<R>,
    Compare: Fn(&R::Element, &R::Element) -> bool,
{
    debug_assert!(len > 0, "symmetric_displacement: len must be positive");
    let mut lower = 0usize;
    let mut upper = len - 1;
    loop {
        let d = lower + (upper - lower) / 2;
        let left_pos = A::retreat(rng, end_left.clone(), d);
        let right_pos = A::advance(rng, start_right.clone(), d);
        if le(is_less, rng.at(&left_pos), rng.at(&right_pos)) {
            upper = d;
        } else {
            lower = d + 1;
        }
        if lower >= upper {
            break;
        }
    }
    lower
}

/// Debug-only check that `[start, end)` is non-decreasing under `is_less`.
///
/// Used to assert merge's precondition that both input runs arrive already
/// individually sorted (spec.md §9: "each phase's precondition must be
/// documented as a checked (debug-only) assertion").
pub(crate) fn is_sorted_range<R, Compare>(
    rng: &R,
    start: R::Position,
    end: R::Position,
    is_less: &Compare,
) -> bool
where
    R: BidirectionalRange + ?Sized,
    Compare: Fn(&R::Element, &R::Element) -> bool,
{
    let mut cur = start;
    if cur == end {
        return true;
    }
    let mut next = rng.after(cur.clone());
    while next != end {
        if is_less(rng.at(&next), rng.at(&cur)) {
            return false;
        }
        cur = next.clone();
        next = rng.after(next);
    }
    true
}

/// Moves the element at `end - 1` to the front of `[start, end)`, shifting
/// everything else right by one. Mirror of a left-rotation-by-one.
///
/// # Precondition
///   - `[start, end)` is non-empty.
pub fn rotate_right_by_one<R>(rng: &mut R, start: R::Position, end: R::Position)
where
    R: BidirectionalRange + SemiOutputRange + ?Sized,
{
    let mut cur = rng.before(end);
    while cur != start {
        let prev = rng.before(cur.clone());
        rng.swap_at(&prev, &cur);
        cur = prev;
    }
}

/// Swaps `[a, a_end)` with an equal-length block starting at `b`, both
/// within the same range.
///
/// # Precondition
///   - `[a, a_end)` and the same-length block starting at `b` are disjoint
///     (or identical) valid positions in `rng`.
pub fn swap_equal_blocks<R>(rng: &mut R, mut a: R::Position, a_end: R::Position, mut b: R::Position)
where
    R: BidirectionalRange + SemiOutputRange + ?Sized,
{
    while a != a_end {
        rng.swap_at(&a, &b);
        a = rng.after(a);
        b = rng.after(b);
    }
}

/// General rotation: `[start, mid)` and `[mid, end)` swap places, each
/// keeping its internal order.
///
/// # Precondition
///   - `[start, mid)` and `[mid, end)` represent valid positions in `rng`.
///
/// # Postcondition
///   - Returns the position the element originally at `start` ends up at.
///   - Complexity: O(n). At most n swaps.
pub fn rotate<R>(rng: &mut R, start: R::Position, mid: R::Position, end: R::Position) -> R::Position
where
    R: BidirectionalRange + SemiOutputRange + ?Sized,
{
    if start == mid {
        return end;
    }
    if mid == end {
        return start;
    }
    let mut write = start.clone();
    let mut next_read = start;
    let mut read = mid.clone();
    while read != end {
        if write == next_read {
            next_read = read.clone();
        }
        rng.swap_at(&write, &read);
        write = rng.after(write);
        read = rng.after(read);
    }
    rotate(rng, write.clone(), next_read, end);
    write
}

/// Merges a small residual `[start_left, start_right)` / `[start_right,
/// end)` pair by repeatedly rotating out-of-place right elements into the
/// left run. O(length_left * length_right); only ever called once
/// `min(length_left, length_right)` is bounded by a small constant, where
/// this is O(the longer run).
pub fn insertion_merge<R, A, Compare>(
    rng: &mut R,
    mut start_left: R::Position,
    mut start_right: R::Position,
    end: R::Position,
    is_less: &Compare,
) where
    R: BidirectionalRange + SemiOutputRange + ?Sized,
    A: Advance<R>,
    Compare: Fn(&R::Element, &R::Element) -> bool,
{
    while start_left != start_right && start_right != end {
        if is_less(rng.at(&start_right), rng.at(&start_left)) {
            let next_right = rng.after(start_right.clone());
            rotate_right_by_one(rng, start_left.clone(), next_right.clone());
            start_left = rng.after(start_left);
            start_right = next_right;
        } else {
            start_left = rng.after(start_left);
        }
    }
}
