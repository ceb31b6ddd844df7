//! Addressing entries of a [`UDict`](crate::UDict).
//!
//! A [`KeySelector`] picks one or more entries either by key, or by their
//! **1-based** position in insertion order. Positions are 1-based because the
//! dictionary is meant to be read like a numbered list: `Position(1)` is the
//! first key that was inserted. Ranges of positions are inclusive of both
//! ends, so `(1..=2).into()` addresses the first two keys.
//!
//! Negative positions count from the end, `-1` being the last key.

use std::ops::{RangeFrom, RangeFull, RangeInclusive, RangeToInclusive};

use crate::error::{Error, Result};

/// Selects entries of a [`UDict`](crate::UDict).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum KeySelector<K> {
    /// A key, used verbatim whether or not it is present.
    Key(K),
    /// A 1-based position in insertion order.
    Position(isize),
    /// An inclusive range of 1-based positions.
    ///
    /// A missing `start` or `stop` extends the range to the corresponding end
    /// of the dictionary, taking the direction of `step` into account.
    Range {
        start: Option<isize>,
        stop: Option<isize>,
        step: isize,
    },
}

impl<K> KeySelector<K> {
    pub fn key(key: K) -> Self {
        KeySelector::Key(key)
    }

    /// The key at 1-based `position`. Negative positions count from the end.
    pub fn position(position: isize) -> Self {
        KeySelector::Position(position)
    }

    /// A range of positions going from `start` to `stop` (both included) in
    /// increments of `step`.
    pub fn range(start: Option<isize>, stop: Option<isize>, step: isize) -> Self {
        KeySelector::Range { start, stop, step }
    }

    fn as_ref(&self) -> KeySelector<&K> {
        match self {
            KeySelector::Key(key) => KeySelector::Key(key),
            KeySelector::Position(position) => KeySelector::Position(*position),
            KeySelector::Range { start, stop, step } => KeySelector::range(*start, *stop, *step),
        }
    }

    /// Resolves this selector against a dictionary holding `len` keys.
    pub(crate) fn resolve(&self, len: usize) -> Result<Resolved<&K>> {
        self.as_ref().into_resolved(len)
    }

    pub(crate) fn into_resolved(self, len: usize) -> Result<Resolved<K>> {
        match self {
            KeySelector::Key(key) => Ok(Resolved::Key(key)),
            KeySelector::Position(position) => {
                Ok(Resolved::Indices(vec![position_to_index(position, len)?]))
            }
            KeySelector::Range { start, stop, step } => {
                let indices = range_to_indices(start, stop, step, len)?;
                log::debug!(
                    "range {start:?}..={stop:?} (step {step}) over {len} keys selects {} entries",
                    indices.len()
                );
                Ok(Resolved::Indices(indices))
            }
        }
    }
}

impl<K> From<RangeInclusive<isize>> for KeySelector<K> {
    fn from(range: RangeInclusive<isize>) -> Self {
        let (start, stop) = range.into_inner();
        KeySelector::range(Some(start), Some(stop), 1)
    }
}

impl<K> From<RangeFrom<isize>> for KeySelector<K> {
    fn from(range: RangeFrom<isize>) -> Self {
        KeySelector::range(Some(range.start), None, 1)
    }
}

impl<K> From<RangeToInclusive<isize>> for KeySelector<K> {
    fn from(range: RangeToInclusive<isize>) -> Self {
        KeySelector::range(None, Some(range.end), 1)
    }
}

impl<K> From<RangeFull> for KeySelector<K> {
    fn from(_: RangeFull) -> Self {
        KeySelector::range(None, None, 1)
    }
}

/// What a selector designates once the dictionary length is known.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Resolved<K> {
    Key(K),
    /// 0-based indices, all of them in bounds.
    Indices(Vec<usize>),
}

/// Maps a position that may count from the end (`-1` is the last key) to a
/// position counting from the start, without checking bounds.
fn normalize(position: isize, len: isize) -> isize {
    if position < 0 {
        position + len + 1
    } else {
        position
    }
}

fn position_to_index(position: isize, len: usize) -> Result<usize> {
    // A map can't hold more than `isize::MAX` entries.
    let signed_len = len as isize;
    let normalized = normalize(position, signed_len);

    if (1..=signed_len).contains(&normalized) {
        Ok((normalized - 1) as usize)
    } else {
        Err(Error::PositionOutOfRange { position, len })
    }
}

fn range_to_indices(
    start: Option<isize>,
    stop: Option<isize>,
    step: isize,
    len: usize,
) -> Result<Vec<usize>> {
    if step == 0 {
        return Err(Error::ZeroStep);
    }

    let signed_len = len as isize;
    let bound = |b: Option<isize>| b.map(|b| normalize(b, signed_len));

    // Clamp both ends to `[1, len]`. What remains of the range is then
    // guaranteed to be in bounds.
    let (start, stop) = if step > 0 {
        (
            bound(start).map_or(1, |s| s.max(1)),
            bound(stop).map_or(signed_len, |s| s.min(signed_len)),
        )
    } else {
        (
            bound(start).map_or(signed_len, |s| s.min(signed_len)),
            bound(stop).map_or(1, |s| s.max(1)),
        )
    };

    let mut indices = Vec::new();
    let mut current = start;

    while (step > 0 && current <= stop) || (step < 0 && current >= stop) {
        indices.push((current - 1) as usize);

        match current.checked_add(step) {
            Some(next) => current = next,
            None => break,
        }
    }

    Ok(indices)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use pretty_assertions::assert_eq;

    fn indices(selector: KeySelector<()>, len: usize) -> Vec<usize> {
        match selector.resolve(len) {
            Ok(Resolved::Indices(indices)) => indices,
            other => panic!("expected indices, got {other:?}"),
        }
    }

    #[test]
    fn positions() {
        assert_eq!(indices(KeySelector::Position(1), 3), vec![0]);
        assert_eq!(indices(KeySelector::Position(3), 3), vec![2]);
        assert_eq!(indices(KeySelector::Position(-1), 3), vec![2]);
        assert_eq!(indices(KeySelector::Position(-3), 3), vec![0]);

        for position in [0, 4, -4] {
            assert_matches!(
                KeySelector::<()>::Position(position).resolve(3),
                Err(Error::PositionOutOfRange { len: 3, .. })
            );
        }
    }

    #[test]
    fn ranges_include_stop() {
        assert_eq!(indices((1..=2).into(), 3), vec![0, 1]);
        assert_eq!(indices((2..).into(), 4), vec![1, 2, 3]);
        assert_eq!(indices((..=1).into(), 4), vec![0]);
        assert_eq!(indices((..).into(), 3), vec![0, 1, 2]);
        assert_eq!(indices((-2..=-1).into(), 5), vec![3, 4]);
    }

    #[test]
    fn ranges_with_step() {
        assert_eq!(indices(KeySelector::range(None, None, 2), 5), vec![0, 2, 4]);
        assert_eq!(indices(KeySelector::range(None, None, -1), 3), vec![2, 1, 0]);
        assert_eq!(
            indices(KeySelector::range(Some(4), Some(2), -2), 5),
            vec![3, 1]
        );
        assert_eq!(
            indices(KeySelector::range(Some(1), None, isize::MAX), 3),
            vec![0]
        );
    }

    #[test]
    fn descending_ranges_include_stop() {
        assert_eq!(
            indices(KeySelector::range(Some(3), Some(1), -1), 3),
            vec![2, 1, 0]
        );
        assert_eq!(
            indices(KeySelector::range(Some(-1), Some(-2), -1), 3),
            vec![2, 1]
        );
    }

    #[test]
    fn ranges_are_clamped() {
        assert_eq!(indices((0..=10).into(), 3), vec![0, 1, 2]);
        assert_eq!(indices((-10..=2).into(), 3), vec![0, 1]);
        assert_eq!(indices((3..=1).into(), 3), Vec::<usize>::new());
        assert_eq!(indices((..).into(), 0), Vec::<usize>::new());
    }

    #[test]
    fn zero_step() {
        assert_matches!(
            KeySelector::<()>::range(None, None, 0).resolve(3),
            Err(Error::ZeroStep)
        );
    }

    #[test]
    fn keys_are_verbatim() {
        assert_eq!(
            KeySelector::Key("absent").resolve(0),
            Ok(Resolved::Key(&"absent"))
        );
        assert_eq!(KeySelector::key("k"), KeySelector::Key("k"));
        assert_eq!(KeySelector::<()>::position(2), KeySelector::Position(2));
    }
}
