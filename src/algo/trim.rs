// SPDX-License-Identifier: MIT
// Copyright (c) 2024 Rishabh Dwivedi (rishabhdwivedi17@gmail.com)

//! The pre-recursion pass that opportunistically retires correctly-ordered
//! elements from both ends of the two runs before divide ever has to
//! recurse. Structured as a state machine over [`Phase`] rather than nested
//! conditionals, so each phase's precondition reads as a single checked
//! assertion.

use crate::{BidirectionalRange, SemiOutputRange};

use super::primitives::{self, le, Advance};

/// Result of a trim pass.
pub enum Outcome<P> {
    /// The two runs are fully merged; nothing is left for divide to do.
    Done,
    /// Trim shrank the problem to a strictly-inverted pair of runs, each of
    /// length >= 2, satisfying `*(start_right + 1) < *start_left` and
    /// `*end_right < *(end_left - 1)` (the "two-deep" guarantees divide's
    /// displacement search relies on), in addition to the weaker `*start_left
    /// > *start_right` and `*end_right < *end_left`.
    Shrunk {
        start_left: P,
        end_left: P,
        start_right: P,
        end_right: P,
    },
}

enum Phase {
    Loop,
    Trivial,
}

/// Runs the trim phases until either the runs are fully merged or
/// shrunk-with-strengthened-invariants, per the phase table: P1/P2 binary
/// search the ends inward, P3/P4 fold single elements across the boundary to
/// establish the two-deep guarantee, P6/P7 block-swap entire runs when one is
/// one-sided relative to the other, and anything left over (one run down to
/// length 1, or the whole residual range resolvable by a single rotation)
/// falls through to `Phase::Trivial`.
///
/// # Precondition
///   - `[start_left, end_left]` and `[start_right, end_right]` are each
///     non-decreasing under `is_less`, contiguous (`start_right ==
///     after(end_left)`), and both non-empty.
pub fn trim<R, A, Compare>(
    rng: &mut R,
    mut start_left: R::Position,
    mut end_left: R::Position,
    mut start_right: R::Position,
    mut end_right: R::Position,
    is_less: &Compare,
) -> Outcome<R::Position>
where
    R: BidirectionalRange + SemiOutputRange + ?Sized,
    A: Advance<R>,
    Compare: Fn(&R::Element, &R::Element) -> bool,
{
    debug_assert!(
        rng.after(end_left.clone()) == start_right,
        "trim: left and right runs must be contiguous"
    );

    let mut phase = Phase::Loop;
    loop {
        match phase {
            Phase::Loop => {
                // already sorted, or one run drained by a previous block swap
                if start_left == start_right || le(is_less, rng.at(&end_left), rng.at(&start_right)) {
                    return Outcome::Done;
                }

                // P1: left's prefix <= right's first element can be retired in place.
                if le(is_less, rng.at(&start_left), rng.at(&start_right)) {
                    let after_start_left = rng.after(start_left.clone());
                    start_left = primitives::smallest_greater::<R, A, Compare>(
                        rng,
                        after_start_left,
                        end_left.clone(),
                        rng.at(&start_right),
                        is_less,
                    );
                }

                // P2: right's suffix >= left's last element can be retired in place.
                if !is_less(rng.at(&end_right), rng.at(&end_left)) {
                    let before_end_right = rng.before(end_right.clone());
                    end_right = primitives::largest_less::<R, A, Compare>(
                        rng,
                        start_right.clone(),
                        before_end_right,
                        rng.at(&end_left),
                        is_less,
                    );
                }

                // one run collapsed to length 0 or 1, or the whole residual
                // range is now resolvable by a single rotation
                if !is_less(rng.at(&start_left), rng.at(&end_right))
                    || start_left == end_left
                    || start_right == end_right
                {
                    phase = Phase::Trivial;
                    continue;
                }

                debug_assert!(
                    is_less(rng.at(&start_right), rng.at(&start_left))
                        && is_less(rng.at(&start_left), rng.at(&end_right))
                        && is_less(rng.at(&end_right), rng.at(&end_left)),
                    "trim P3/P4: expected *end_left > *end_right > *start_left > *start_right"
                );

                // P3: fold single left elements into *start_right while
                // *start_left <= *(start_right + 1) (start_right + 1 is in
                // bounds since the right run has length >= 2 here).
                let next_right = rng.after(start_right.clone());
                if le(is_less, rng.at(&start_left), rng.at(&next_right)) {
                    loop {
                        rng.swap_at(&start_left, &start_right);
                        start_left = rng.after(start_left);
                        let next_right = rng.after(start_right.clone());
                        if !le(is_less, rng.at(&start_left), rng.at(&next_right)) {
                            break;
                        }
                    }
                    if start_left == end_left || !is_less(rng.at(&start_left), rng.at(&end_right)) {
                        phase = Phase::Trivial;
                        continue;
                    }
                }

                // P4: symmetric fold of single right elements into *end_left
                // while *(end_left - 1) <= *end_right.
                let prev_left = rng.before(end_left.clone());
                if le(is_less, rng.at(&prev_left), rng.at(&end_right)) {
                    loop {
                        rng.swap_at(&end_right, &end_left);
                        end_right = rng.before(end_right);
                        let prev_left = rng.before(end_left.clone());
                        if !le(is_less, rng.at(&prev_left), rng.at(&end_right)) {
                            break;
                        }
                    }
                    if start_right == end_right || !is_less(rng.at(&start_left), rng.at(&end_right)) {
                        phase = Phase::Trivial;
                        continue;
                    }
                }

                let length_left = A::distance(rng, start_left.clone(), rng.after(end_left.clone()));
                let length_right = A::distance(rng, start_right.clone(), rng.after(end_right.clone()));

                // P5/P6: left run is no longer than right run and sorts entirely
                // before a length-matched prefix of the right run.
                if length_left <= length_right {
                    let probe = A::advance(rng, start_right.clone(), length_left - 1);
                    if !is_less(rng.at(&start_left), rng.at(&probe)) {
                        let dest_end = rng.after(end_left.clone());
                        primitives::swap_equal_blocks(rng, start_left.clone(), dest_end, start_right.clone());
                        start_left = start_right.clone();
                        start_right = A::advance(rng, start_right, length_left);
                        end_left = A::advance(rng, end_left, length_left);
                        continue;
                    }
                }

                // P5/P7: right run is no longer than left run and sorts entirely
                // after a length-matched suffix of the left run.
                if length_left >= length_right {
                    let probe = A::retreat(rng, end_left.clone(), length_right - 1);
                    if !is_less(rng.at(&probe), rng.at(&end_right)) {
                        let dest_end = rng.after(end_right.clone());
                        primitives::swap_equal_blocks(rng, start_right.clone(), dest_end, probe);
                        end_left = A::retreat(rng, end_left, length_right);
                        start_right = rng.after(end_left.clone());
                        end_right = A::advance(rng, start_right.clone(), length_right - 1);
                        continue;
                    }
                }

                return Outcome::Shrunk {
                    start_left,
                    end_left,
                    start_right,
                    end_right,
                };
            }
            Phase::Trivial => {
                resolve_trivial::<R, A, Compare>(rng, start_left, start_right, end_right, is_less);
                return Outcome::Done;
            }
        }
    }
}

/// Resolves whatever trim's bail-out conditions leave behind: either a
/// fully reversed (or equal-endpoints) pair handled by a single rotation, or
/// a run trimmed down to length 1, handled by the generic insertion merge.
fn resolve_trivial<R, A, Compare>(
    rng: &mut R,
    start_left: R::Position,
    start_right: R::Position,
    end_right: R::Position,
    is_less: &Compare,
) where
    R: BidirectionalRange + SemiOutputRange + ?Sized,
    A: Advance<R>,
    Compare: Fn(&R::Element, &R::Element) -> bool,
{
    let one_past_end = rng.after(end_right.clone());
    if start_left == start_right || start_right == one_past_end {
        return;
    }

    if le(is_less, rng.at(&end_right), rng.at(&start_left)) {
        if le(is_less, rng.at(&start_left), rng.at(&end_right)) {
            resolve_equal_endpoints::<R, A, Compare>(rng, start_left, start_right, end_right, is_less);
        } else {
            primitives::rotate(rng, start_left, start_right, one_past_end);
        }
    } else {
        primitives::insertion_merge::<R, A, Compare>(rng, start_left, start_right, one_past_end, is_less);
    }
}

/// Stability repair for the case where `*start_left` and `*end_right` are
/// equivalent (`spec.md` §4.2.1): a naive full rotation would place
/// right-run elements before equivalent left-run elements, breaking
/// stability. Finds the equivalent prefix/suffix lengths, performs the full
/// rotation, then a second local rotation restores original relative order
/// among exactly those equivalent elements.
fn resolve_equal_endpoints<R, A, Compare>(
    rng: &mut R,
    start_left: R::Position,
    start_right: R::Position,
    end_right: R::Position,
    is_less: &Compare,
) where
    R: BidirectionalRange + SemiOutputRange + ?Sized,
    A: Advance<R>,
    Compare: Fn(&R::Element, &R::Element) -> bool,
{
    let end_left = rng.before(start_right.clone());
    let one_past_end = rng.after(end_right.clone());

    let prefix_end = primitives::partition_point::<R, A, _>(
        rng,
        start_left.clone(),
        rng.after(end_left),
        |x| le(is_less, x, rng.at(&start_left)),
    );
    let k_left = A::distance(rng, start_left.clone(), prefix_end);

    let suffix_start = primitives::partition_point::<R, A, _>(
        rng,
        start_right.clone(),
        one_past_end.clone(),
        |x| is_less(x, rng.at(&end_right)),
    );
    let k_right = A::distance(rng, suffix_start, one_past_end.clone());

    let junction = primitives::rotate(rng, start_left, start_right, one_past_end);

    let window_start = A::retreat(rng, junction.clone(), k_right);
    let window_end = A::advance(rng, junction.clone(), k_left);
    primitives::rotate(rng, window_start, junction, window_end);
}
