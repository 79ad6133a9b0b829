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

/// A variable identifier.
///
/// It can be obtained from and converted into `usize`.
/// Variables are numbered from zero; the DIMACS writer shifts them by one.
///
/// # Examples
///
/// ```
/// use satec_logic::VarId;
///
/// assert_eq!(0, usize::from(VarId::from(0)))
/// ```
#[derive(Clone, Copy, Debug, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub struct VarId(usize);

impl From<usize> for VarId {
    fn from(u: usize) -> Self {
        VarId(u)
    }
}

impl From<VarId> for usize {
    fn from(v: VarId) -> Self {
        v.0
    }
}

impl std::fmt::Display for VarId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}

/// A literal, composed by a [`VarId`] and a `bool` (its polarity).
///
/// # Order
///
/// A total order is imposed on literals:
/// * if variable identifiers are not equal, the same order applies to the literals;
/// * if variable identifiers are equal and polarity are different, the polarity (`bool`) order applies;
/// * if variable identifiers and polarity are equals, the two literals are equal.
///
/// # Examples
///
/// ```
/// use satec_logic::{VarId, Literal};
///
/// let v = VarId::from(0);
/// let l = Literal::new(v, true);
/// assert_eq!(Literal::new(v, false), l.negate());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Literal(VarId, bool);

impl Literal {
    /// Builds a new literal, given its [`VarId`] and its polarity as a `bool`.
    pub fn new(var_id: VarId, polarity: bool) -> Self {
        Literal(var_id, polarity)
    }

    /// Returns the negation of the literal, as a new `Literal`.
    ///
    /// # Examples
    ///
    /// ```
    /// use satec_logic::{VarId, Literal};
    ///
    /// let v = VarId::from(0);
    /// let l = Literal::new(v, true);
    /// let not_l = l.negate();
    /// assert_eq!(Literal::new(v, false), not_l)
    /// ```
    pub fn negate(&self) -> Self {
        Literal(self.0, !self.1)
    }

    fn is_negation_of(&self, other: &Literal) -> bool {
        self.0 == other.0 && self.1 != other.1
    }

    /// Returns the [`VarId`] of this literal.
    pub fn var_id(&self) -> VarId {
        self.0
    }

    /// Returns the polarity of this literal.
    pub fn polarity(&self) -> bool {
        self.1
    }

    /// Returns a dense index for this literal, suitable to address per-literal tables.
    ///
    /// The negative literal of variable `v` has index `2v`, the positive one `2v+1`.
    ///
    /// # Examples
    ///
    /// ```
    /// use satec_logic::Literal;
    ///
    /// assert_eq!(4, Literal::from((2, false)).index());
    /// assert_eq!(5, Literal::from((2, true)).index());
    /// ```
    pub fn index(&self) -> usize {
        (usize::from(self.0) << 1) | self.1 as usize
    }

    /// Returns the truth value of this literal under a (partial) variable assignment.
    ///
    /// `None` is returned if the variable is unassigned or out of the assignment bounds.
    pub fn value_in(&self, assignment: &[Option<bool>]) -> Option<bool> {
        assignment
            .get(usize::from(self.0))
            .copied()
            .flatten()
            .map(|v| v == self.1)
    }
}

impl PartialOrd for Literal {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Literal {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.cmp(&other.0).then(self.1.cmp(&other.1))
    }
}

impl From<(usize, bool)> for Literal {
    fn from(couple: (usize, bool)) -> Self {
        Literal::new(VarId::from(couple.0), couple.1)
    }
}

impl std::fmt::Display for Literal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.1 {
            write!(f, "{}", self.0)
        } else {
            write!(f, "-{}", self.0)
        }
    }
}

/// A sorted vector of literals.
///
/// This is the type used for clause contents before their reduction and for SAT solver models.
/// A model contains exactly one literal per variable of the formula.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct LiteralVec(Vec<Literal>);

impl LiteralVec {
    /// Builds a new sorted literal vector.
    pub fn new(mut literals: Vec<Literal>) -> Self {
        literals.sort_unstable();
        LiteralVec(literals)
    }

    /// Removes multiple occurrences of the same literal.
    ///
    /// Returns `None` if the vector contains a literal and its negation.
    pub fn clean(self) -> Option<LiteralVec> {
        let mut new_vec: Vec<Literal> = Vec::with_capacity(self.0.len());
        for lit in self.0 {
            match new_vec.last() {
                Some(last) if *last == lit => {}
                Some(last) if last.is_negation_of(&lit) => return None,
                _ => new_vec.push(lit),
            }
        }
        Some(LiteralVec(new_vec))
    }

    pub fn as_slice(&self) -> &[Literal] {
        &self.0
    }

    pub fn to_vec(self) -> Vec<Literal> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the number of variables needed to hold these literals (highest variable index plus one).
    pub fn n_vars(&self) -> usize {
        self.0
            .iter()
            .map(|l| usize::from(l.var_id()) + 1)
            .max()
            .unwrap_or(0)
    }

    /// Returns the value given to a variable, if this vector contains one of its literals.
    ///
    /// # Examples
    ///
    /// ```
    /// use satec_logic::{LiteralVec, VarId};
    ///
    /// let model = LiteralVec::from(vec![(0, false), (1, true)]);
    /// assert_eq!(Some(false), model.value_of(VarId::from(0)));
    /// assert_eq!(Some(true), model.value_of(VarId::from(1)));
    /// assert_eq!(None, model.value_of(VarId::from(2)));
    /// ```
    pub fn value_of(&self, var: VarId) -> Option<bool> {
        if self.0.binary_search(&Literal::new(var, true)).is_ok() {
            Some(true)
        } else if self.0.binary_search(&Literal::new(var, false)).is_ok() {
            Some(false)
        } else {
            None
        }
    }

    /// Checks if this vector contains the given literal.
    pub fn contains(&self, lit: &Literal) -> bool {
        self.0.binary_search(lit).is_ok()
    }
}

impl<T> From<Vec<T>> for LiteralVec
where
    T: Into<Literal>,
{
    fn from(v: Vec<T>) -> Self {
        LiteralVec::new(v.into_iter().map(|l| l.into()).collect())
    }
}

impl<T> From<&[T]> for LiteralVec
where
    T: Copy + Into<Literal>,
{
    fn from(v: &[T]) -> Self {
        LiteralVec::new(v.iter().map(|l| (*l).into()).collect())
    }
}
