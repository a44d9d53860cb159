//! Candidate pairs and the one equality predicate the ballot relies on.
//!
//! A pair can arrive as a plain `Vec<String>` or as a [`SharedPair`], a persistent
//! collection whose clones share one reference-counted root. Both are read through
//! [`CandidatePair`], and [`pairs_equal`] is the only place that decides whether two
//! pairs hold the same candidates.

use std::fmt;
use std::sync::Arc;

/// Read access to an ordered set of candidates (normally exactly two).
pub trait CandidatePair {
    fn len(&self) -> usize;

    fn get(&self, index: usize) -> Option<&str>;

    /// Identity of the shared root, for structurally shared collections only.
    ///
    /// Two pairs reporting the same root are guaranteed to hold equal elements.
    fn root_id(&self) -> Option<usize> {
        None
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn candidates(&self) -> Candidates<'_>
    where
        Self: Sized,
    {
        Candidates { pair: self, index: 0 }
    }
}

/// Iterator over the candidates of any [`CandidatePair`], in order.
pub struct Candidates<'a> {
    pair: &'a dyn CandidatePair,
    index: usize,
}

impl<'a> Iterator for Candidates<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.pair.get(self.index)?;
        self.index += 1;
        Some(item)
    }
}

/// Element-wise value equality, with a root-identity fast path.
///
/// When both sides report the same [`CandidatePair::root_id`] the elements are not
/// compared at all. In every other case (plain lists, different roots, mixed
/// representations) the answer comes from comparing length and each element.
pub fn pairs_equal<A, B>(a: &A, b: &B) -> bool
where
    A: CandidatePair + ?Sized,
    B: CandidatePair + ?Sized,
{
    if let (Some(left), Some(right)) = (a.root_id(), b.root_id()) {
        if left == right {
            return true;
        }
    }

    a.len() == b.len() && (0..a.len()).all(|i| a.get(i) == b.get(i))
}

impl CandidatePair for Vec<String> {
    fn len(&self) -> usize {
        self.as_slice().len()
    }

    fn get(&self, index: usize) -> Option<&str> {
        self.as_slice().get(index).map(String::as_str)
    }
}

impl CandidatePair for [String; 2] {
    fn len(&self) -> usize {
        2
    }

    fn get(&self, index: usize) -> Option<&str> {
        self.as_slice().get(index).map(String::as_str)
    }
}

/// Persistent ordered collection of candidates.
///
/// Cloning is O(1) and shares the root. Nothing mutates a root in place: changes
/// such as [`SharedPair::reversed`] produce a new one.
#[derive(Clone)]
pub struct SharedPair {
    root: Arc<[String]>,
}

impl SharedPair {
    pub fn of(first: impl Into<String>, second: impl Into<String>) -> Self {
        Self {
            root: Arc::from(vec![first.into(), second.into()]),
        }
    }

    /// Returns a collection with `value` at `index`, keeping the root when the value
    /// is already in place. Out-of-range indices leave the collection as it is.
    #[cfg(test)]
    pub fn set(&self, index: usize, value: impl Into<String>) -> Self {
        let value = value.into();
        match self.root.get(index) {
            Some(current) if *current == value => self.clone(),
            Some(_) => {
                let mut items = self.root.to_vec();
                items[index] = value;
                Self { root: items.into() }
            }
            None => self.clone(),
        }
    }

    pub fn reversed(&self) -> Self {
        self.root.iter().rev().cloned().collect()
    }
}

impl CandidatePair for SharedPair {
    fn len(&self) -> usize {
        self.root.len()
    }

    fn get(&self, index: usize) -> Option<&str> {
        self.root.get(index).map(String::as_str)
    }

    fn root_id(&self) -> Option<usize> {
        Some(Arc::as_ptr(&self.root) as *const String as usize)
    }
}

impl FromIterator<String> for SharedPair {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self {
            root: iter.into_iter().collect(),
        }
    }
}

impl PartialEq for SharedPair {
    fn eq(&self, other: &Self) -> bool {
        pairs_equal(self, other)
    }
}

impl Eq for SharedPair {}

impl fmt::Debug for SharedPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SharedPair").field(&self.root).finish()
    }
}

/// A pair as handed to the ballot, in either representation.
#[derive(Debug, Clone)]
pub enum PairInput {
    List(Vec<String>),
    Shared(SharedPair),
}

impl PairInput {
    fn as_dyn(&self) -> &dyn CandidatePair {
        match self {
            PairInput::List(list) => list,
            PairInput::Shared(shared) => shared,
        }
    }

    /// Same candidates in reverse order, keeping the representation.
    pub fn reversed(&self) -> Self {
        match self {
            PairInput::List(list) => PairInput::List(list.as_slice().iter().rev().cloned().collect()),
            PairInput::Shared(shared) => PairInput::Shared(shared.reversed()),
        }
    }
}

impl CandidatePair for PairInput {
    fn len(&self) -> usize {
        self.as_dyn().len()
    }

    fn get(&self, index: usize) -> Option<&str> {
        self.as_dyn().get(index)
    }

    fn root_id(&self) -> Option<usize> {
        self.as_dyn().root_id()
    }
}

impl PartialEq for PairInput {
    fn eq(&self, other: &Self) -> bool {
        pairs_equal(self, other)
    }
}

impl Eq for PairInput {}

impl From<Vec<String>> for PairInput {
    fn from(list: Vec<String>) -> Self {
        PairInput::List(list)
    }
}

impl From<[&str; 2]> for PairInput {
    fn from(pair: [&str; 2]) -> Self {
        PairInput::List(pair.iter().map(|s| s.to_string()).collect())
    }
}

impl From<SharedPair> for PairInput {
    fn from(shared: SharedPair) -> Self {
        PairInput::Shared(shared)
    }
}
