// satec_logic
// Copyright (C) 2021  Univ. Artois & CNRS
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.

/// A logical content that may be trivial.
///
/// This enum mainly acts like an [`Option`],
/// where [`Some`] is replaced by [`NotTrivial`]
/// and [`None`] can be [`True`] or [`False`].
/// Clauses are built through this type: a clause containing a literal and its negation is [`True`],
/// and an empty clause is [`False`].
///
/// [`Option`]: std::option::Option
/// [`Some`]: std::option::Option::Some
/// [`None`]: std::option::Option::None
/// [`NotTrivial`]: MaybeTrivial::NotTrivial
/// [`True`]: MaybeTrivial::True
/// [`False`]: MaybeTrivial::False
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MaybeTrivial<T> {
    /// A value which is not trivial
    NotTrivial(T),
    /// A trivially `true` value (a tautology)
    True,
    /// A trivially `false` value (a contradiction)
    False,
}

impl<F> MaybeTrivial<F> {
    /// Returns the contained [`MaybeTrivial::NotTrivial`] value, consuming the self value.
    ///
    /// # Panics
    ///
    /// Panics if the self value equals `True` or `False`.
    pub fn unwrap(self) -> F {
        match self {
            MaybeTrivial::NotTrivial(f) => f,
            MaybeTrivial::True => panic!("cannot unwrap MaybeTrivial for True"),
            MaybeTrivial::False => panic!("cannot unwrap MaybeTrivial for False"),
        }
    }

    /// Returns `true` if the `MaybeTrivial` is a [`False`] value.
    ///
    /// [`False`]: MaybeTrivial::False
    pub fn is_false(&self) -> bool {
        matches!(self, MaybeTrivial::False)
    }

    /// Returns `true` if the `MaybeTrivial` is a [`True`] value.
    ///
    /// [`True`]: MaybeTrivial::True
    pub fn is_true(&self) -> bool {
        matches!(self, MaybeTrivial::True)
    }

    /// Converts from `&MaybeTrivial<T>` to `MaybeTrivial<&T>`.
    pub fn as_ref(&self) -> MaybeTrivial<&F> {
        match self {
            MaybeTrivial::NotTrivial(ref f) => MaybeTrivial::NotTrivial(f),
            MaybeTrivial::True => MaybeTrivial::True,
            MaybeTrivial::False => MaybeTrivial::False,
        }
    }

    /// Maps a `MaybeTrivial<T>` to `MaybeTrivial<U>` by applying a function to a non-trivial value.
    pub fn map<M, U>(self, mapper: M) -> MaybeTrivial<U>
    where
        M: FnOnce(F) -> U,
    {
        match self {
            MaybeTrivial::NotTrivial(f) => MaybeTrivial::NotTrivial(mapper(f)),
            MaybeTrivial::True => MaybeTrivial::True,
            MaybeTrivial::False => MaybeTrivial::False,
        }
    }
}

impl<F> From<bool> for MaybeTrivial<F> {
    fn from(b: bool) -> Self {
        if b {
            MaybeTrivial::True
        } else {
            MaybeTrivial::False
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unwrap_not_trivial() {
        assert_eq!(1, MaybeTrivial::NotTrivial(1).unwrap());
    }

    #[test]
    #[should_panic(expected = "cannot unwrap MaybeTrivial for True")]
    fn test_unwrap_true() {
        MaybeTrivial::<()>::True.unwrap();
    }

    #[test]
    #[should_panic(expected = "cannot unwrap MaybeTrivial for False")]
    fn test_unwrap_false() {
        MaybeTrivial::<()>::False.unwrap();
    }

    #[test]
    fn test_from_bool() {
        assert!(MaybeTrivial::<()>::from(true).is_true());
        assert!(MaybeTrivial::<()>::from(false).is_false());
    }

    #[test]
    fn test_map() {
        assert_eq!(MaybeTrivial::NotTrivial(2), MaybeTrivial::NotTrivial(1).map(|x| x + 1));
        assert_eq!(MaybeTrivial::<i32>::True, MaybeTrivial::<i32>::True.map(|x| x + 1));
        assert_eq!(
            MaybeTrivial::NotTrivial(&3),
            MaybeTrivial::NotTrivial(3).as_ref()
        );
    }
}
