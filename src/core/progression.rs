//! Arithmetic progressions over integers, chars and calendar dates.
//!
//! A progression is `first`, a clamped `last`, and a non-zero `step`. Values are
//! mapped to dense `i128` ordinals so the arithmetic never overflows for any
//! supported element type.

use crate::utils::error::{KitError, Result};
use crate::utils::validation::validate_non_zero;
use chrono::{Datelike, NaiveDate};
use std::fmt;
use std::marker::PhantomData;

const SURROGATE_START: i128 = 0xD800;
const SURROGATE_LEN: i128 = 0x800;

/// An element type that can be stepped through by whole units.
pub trait Step: Copy + fmt::Debug {
    fn to_ordinal(self) -> i128;
    fn from_ordinal(ordinal: i128) -> Option<Self>;
}

impl Step for i32 {
    fn to_ordinal(self) -> i128 {
        self as i128
    }

    fn from_ordinal(ordinal: i128) -> Option<Self> {
        i32::try_from(ordinal).ok()
    }
}

impl Step for i64 {
    fn to_ordinal(self) -> i128 {
        self as i128
    }

    fn from_ordinal(ordinal: i128) -> Option<Self> {
        i64::try_from(ordinal).ok()
    }
}

/// Surrogate code points are not chars, so the ordinal space closes the gap:
/// `U+D7FF` is immediately followed by `U+E000`.
impl Step for char {
    fn to_ordinal(self) -> i128 {
        let code = self as u32 as i128;
        if code >= SURROGATE_START {
            code - SURROGATE_LEN
        } else {
            code
        }
    }

    fn from_ordinal(ordinal: i128) -> Option<Self> {
        let code = if ordinal >= SURROGATE_START {
            ordinal + SURROGATE_LEN
        } else {
            ordinal
        };
        char::from_u32(u32::try_from(code).ok()?)
    }
}

/// Steps by days.
impl Step for NaiveDate {
    fn to_ordinal(self) -> i128 {
        self.num_days_from_ce() as i128
    }

    fn from_ordinal(ordinal: i128) -> Option<Self> {
        NaiveDate::from_num_days_from_ce_opt(i32::try_from(ordinal).ok()?)
    }
}

pub struct Progression<T> {
    first: i128,
    last: i128,
    step: i128,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for Progression<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Progression<T> {}

impl<T> PartialEq for Progression<T> {
    fn eq(&self, other: &Self) -> bool {
        if self.is_empty() && other.is_empty() {
            return true;
        }
        self.first == other.first && self.last == other.last && self.step == other.step
    }
}

impl<T: Step> fmt::Debug for Progression<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Progression")
            .field("first", &T::from_ordinal(self.first))
            .field("last", &T::from_ordinal(self.last))
            .field("step", &self.step)
            .finish()
    }
}

/// Last value reachable from `start` towards `end` in whole steps.
fn clamp_last(start: i128, end: i128, step: i128) -> i128 {
    if step > 0 {
        if start >= end {
            end
        } else {
            end - (end - start).rem_euclid(step)
        }
    } else if start <= end {
        end
    } else {
        end + (start - end).rem_euclid(-step)
    }
}

fn validate_step(step: i64) -> Result<()> {
    validate_non_zero("step", step)?;
    if step == i64::MIN {
        return Err(KitError::invalid_argument(
            "step",
            step,
            "Step must be greater than i64::MIN to avoid overflow on negation",
        ));
    }
    Ok(())
}

impl<T> Progression<T> {
    fn from_ordinals(first: i128, last: i128, step: i128) -> Self {
        Self {
            first,
            last: clamp_last(first, last, step),
            step,
            _marker: PhantomData,
        }
    }

    pub fn step(&self) -> i64 {
        self.step as i64
    }

    pub fn is_empty(&self) -> bool {
        if self.step > 0 {
            self.first > self.last
        } else {
            self.first < self.last
        }
    }

    /// Number of elements, saturating at `u64::MAX`.
    pub fn len(&self) -> u64 {
        if self.is_empty() {
            return 0;
        }
        let count = (self.last - self.first) / self.step + 1;
        u64::try_from(count).unwrap_or(u64::MAX)
    }

    /// Swaps the ends and negates the step.
    pub fn reversed(&self) -> Self {
        if self.is_empty() {
            return Self::from_ordinals(self.last, self.first, -self.step);
        }
        Self {
            first: self.last,
            last: self.first,
            step: -self.step,
            _marker: PhantomData,
        }
    }

    /// Multiplies the step by `factor`, keeping its direction. `last` is
    /// re-clamped to the new step.
    pub fn step_by(&self, factor: i64) -> Result<Self> {
        if factor <= 0 {
            return Err(KitError::invalid_argument(
                "factor",
                factor,
                "Step factor must be positive",
            ));
        }
        let step = (self.step as i64).checked_mul(factor).ok_or_else(|| {
            KitError::invalid_argument("factor", factor, "Step overflowed i64")
        })?;
        validate_step(step)?;
        Ok(Self::from_ordinals(self.first, self.last, step as i128))
    }
}

impl<T: Step> Progression<T> {
    pub fn new(first: T, last: T, step: i64) -> Result<Self> {
        validate_step(step)?;
        Ok(Self::from_ordinals(
            first.to_ordinal(),
            last.to_ordinal(),
            step as i128,
        ))
    }

    /// First element, or `None` when empty.
    pub fn first(&self) -> Option<T> {
        if self.is_empty() {
            None
        } else {
            T::from_ordinal(self.first)
        }
    }

    /// Last element after clamping, or `None` when empty.
    pub fn last(&self) -> Option<T> {
        if self.is_empty() {
            None
        } else {
            T::from_ordinal(self.last)
        }
    }

    pub fn contains(&self, value: T) -> bool {
        if self.is_empty() {
            return false;
        }
        let ordinal = value.to_ordinal();
        let (low, high) = if self.step > 0 {
            (self.first, self.last)
        } else {
            (self.last, self.first)
        };
        ordinal >= low && ordinal <= high && (ordinal - self.first) % self.step == 0
    }

    /// A fresh iterator from `first`; the progression itself is not consumed.
    pub fn iter(&self) -> ProgressionIter<T> {
        ProgressionIter {
            next: self.first,
            last: self.last,
            step: self.step,
            done: self.is_empty(),
            _marker: PhantomData,
        }
    }
}

/// `first..=last` stepping by one.
pub fn range_to<T: Step>(first: T, last: T) -> Progression<T> {
    Progression::from_ordinals(first.to_ordinal(), last.to_ordinal(), 1)
}

/// `first` down to `last` stepping by minus one.
pub fn down_to<T: Step>(first: T, last: T) -> Progression<T> {
    Progression::from_ordinals(first.to_ordinal(), last.to_ordinal(), -1)
}

/// `first..end` with `end` excluded.
pub fn until<T: Step>(first: T, end: T) -> Progression<T> {
    Progression::from_ordinals(first.to_ordinal(), end.to_ordinal() - 1, 1)
}

pub struct ProgressionIter<T> {
    next: i128,
    last: i128,
    step: i128,
    done: bool,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Step> Iterator for ProgressionIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.done {
            return None;
        }
        let current = self.next;
        if current == self.last {
            self.done = true;
        } else {
            self.next += self.step;
        }
        T::from_ordinal(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.done {
            return (0, Some(0));
        }
        let remaining = (self.last - self.next) / self.step + 1;
        match usize::try_from(remaining) {
            Ok(n) => (n, Some(n)),
            Err(_) => (usize::MAX, None),
        }
    }
}

impl<T: Step> IntoIterator for Progression<T> {
    type Item = T;
    type IntoIter = ProgressionIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: Step> IntoIterator for &Progression<T> {
    type Item = T;
    type IntoIter = ProgressionIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
