//! Combining dictionaries.
//!
//! Every operation here leaves its operands alone and returns a new
//! [`UDict`] that keeps the default value of the left-hand side. The right-hand
//! side can be another [`UDict`] or a plain [`IndexMap`]: anything that
//! iterates over `(&K, &V)`.

use std::{
    fmt::Debug,
    hash::Hash,
    ops::{Add, Neg, Sub},
};

use indexmap::IndexMap;

use crate::{
    error::{ArithError, Error, Result},
    UDict,
};

/// Values that can be multiplied and divided elementwise.
///
/// Failures are reported instead of panicking: dividing by zero is an error
/// for floats too, and integer arithmetic is checked for overflow.
pub trait Arith: Sized {
    fn try_mul(&self, rhs: &Self) -> Result<Self, ArithError>;
    fn try_div(&self, rhs: &Self) -> Result<Self, ArithError>;
}

macro_rules! impl_arith_int {
    ($($t:ty),*) => {
        $(
            impl Arith for $t {
                fn try_mul(&self, rhs: &Self) -> Result<Self, ArithError> {
                    self.checked_mul(*rhs).ok_or(ArithError::Overflow)
                }

                fn try_div(&self, rhs: &Self) -> Result<Self, ArithError> {
                    if *rhs == 0 {
                        return Err(ArithError::DivisionByZero);
                    }

                    // `MIN / -1`
                    self.checked_div(*rhs).ok_or(ArithError::Overflow)
                }
            }
        )*
    };
}

macro_rules! impl_arith_float {
    ($($t:ty),*) => {
        $(
            impl Arith for $t {
                fn try_mul(&self, rhs: &Self) -> Result<Self, ArithError> {
                    Ok(self * rhs)
                }

                fn try_div(&self, rhs: &Self) -> Result<Self, ArithError> {
                    if *rhs == 0.0 {
                        Err(ArithError::DivisionByZero)
                    } else {
                        Ok(self / rhs)
                    }
                }
            }
        )*
    };
}

impl_arith_int!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
impl_arith_float!(f32, f64);

type ArithOp<V> = fn(&V, &V) -> Result<V, ArithError>;

impl<K: Hash + Eq + Clone, V: Clone> UDict<K, V> {
    /// Right-biased union: keys of `other` overwrite ours, new ones are
    /// appended in `other`'s order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use ufpy_udict::UDict;
    /// let dict = UDict::from_pairs([("x", 1), ("y", 2)]);
    /// let merged = &dict + &UDict::from_pairs([("y", 99), ("z", 3)]);
    /// assert_eq!(merged, UDict::from_pairs([("x", 1), ("y", 99), ("z", 3)]));
    /// assert_eq!(dict.get_key(&"y"), Some(&2));
    /// ```
    pub fn merged<'a, I>(&self, other: I) -> Self
    where
        I: IntoIterator<Item = (&'a K, &'a V)>,
        K: 'a,
        V: 'a,
    {
        let mut result = self.clone();
        result
            .entries_mut()
            .extend(other.into_iter().map(|(k, v)| (k.clone(), v.clone())));
        result
    }

    /// Drops every key whose value is the same in `other`. Keys whose values
    /// differ are kept.
    pub fn without_matching<'a, I>(&self, other: I) -> Self
    where
        I: IntoIterator<Item = (&'a K, &'a V)>,
        K: 'a,
        V: PartialEq + 'a,
    {
        let mut result = self.clone();
        for (key, value) in other {
            if result.get_key(key) == Some(value) {
                result.remove(key);
            }
        }
        result
    }

    /// Multiplies our value for each key of `other` by `other`'s value.
    ///
    /// Fails with [`Error::MissingKey`] if `other` has a key we don't.
    pub fn checked_mul<'a, I>(&self, other: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a K, &'a V)>,
        K: Debug + 'a,
        V: Arith + 'a,
    {
        self.combine(other, V::try_mul)
    }

    /// Divides our value for each key of `other` by `other`'s value.
    pub fn checked_div<'a, I>(&self, other: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a K, &'a V)>,
        K: Debug + 'a,
        V: Arith + 'a,
    {
        self.combine(other, V::try_div)
    }

    /// Multiplies every value by `scalar`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use ufpy_udict::UDict;
    /// let dict = UDict::from_pairs([("x", 1), ("y", 2)]);
    /// let doubled = dict.checked_mul_scalar(&2).unwrap();
    /// assert_eq!(doubled, UDict::from_pairs([("x", 2), ("y", 4)]));
    /// ```
    pub fn checked_mul_scalar(&self, scalar: &V) -> Result<Self>
    where
        K: Debug,
        V: Arith,
    {
        self.combine_scalar(scalar, V::try_mul)
    }

    pub fn checked_div_scalar(&self, scalar: &V) -> Result<Self>
    where
        K: Debug,
        V: Arith,
    {
        self.combine_scalar(scalar, V::try_div)
    }

    fn combine<'a, I>(&self, other: I, op: ArithOp<V>) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a K, &'a V)>,
        K: Debug + 'a,
        V: 'a,
    {
        let mut result = self.clone();
        for (key, rhs) in other {
            let slot = result
                .entries_mut()
                .get_mut(key)
                .ok_or_else(|| Error::missing_key(key))?;
            *slot = op(slot, rhs).map_err(|e| Error::arith(key, e))?;
        }
        Ok(result)
    }

    fn combine_scalar(&self, scalar: &V, op: ArithOp<V>) -> Result<Self>
    where
        K: Debug,
    {
        let mut result = self.clone();
        for (key, slot) in result.entries_mut().iter_mut() {
            *slot = op(slot, scalar).map_err(|e| Error::arith(key, e))?;
        }
        Ok(result)
    }
}

impl<K: Hash + Eq + Clone, V: Clone> Add<&UDict<K, V>> for &UDict<K, V> {
    type Output = UDict<K, V>;

    fn add(self, rhs: &UDict<K, V>) -> Self::Output {
        self.merged(rhs)
    }
}

impl<K: Hash + Eq + Clone, V: Clone> Add<&IndexMap<K, V>> for &UDict<K, V> {
    type Output = UDict<K, V>;

    fn add(self, rhs: &IndexMap<K, V>) -> Self::Output {
        self.merged(rhs)
    }
}

impl<K: Hash + Eq + Clone, V: Clone + PartialEq> Sub<&UDict<K, V>> for &UDict<K, V> {
    type Output = UDict<K, V>;

    fn sub(self, rhs: &UDict<K, V>) -> Self::Output {
        self.without_matching(rhs)
    }
}

impl<K: Hash + Eq + Clone, V: Clone + PartialEq> Sub<&IndexMap<K, V>> for &UDict<K, V> {
    type Output = UDict<K, V>;

    fn sub(self, rhs: &IndexMap<K, V>) -> Self::Output {
        self.without_matching(rhs)
    }
}

/// Reversed insertion order.
impl<K: Clone, V: Clone> Neg for &UDict<K, V> {
    type Output = UDict<K, V>;

    fn neg(self) -> Self::Output {
        self.reversed()
    }
}

impl<K, V> Neg for UDict<K, V> {
    type Output = UDict<K, V>;

    fn neg(mut self) -> Self::Output {
        self.reverse();
        self
    }
}
