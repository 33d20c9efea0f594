//! Item quantity aggregation.
//!
//! An [`Overview`] maps each item id to the summed quantity over every
//! receipt added to it. Ids are compared exactly: no case folding and no
//! whitespace trimming.

use crate::receipt::Receipt;
use std::collections::hash_map::{self, HashMap};

/// Summed quantities per item id.
///
/// # Invariants
///
/// - For receipts `R` added in any order, `get(id)` equals the sum of
///   `quantity` over all items in `R` with that id
/// - Sums wrap on `i64` overflow, so addition stays commutative and
///   associative
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overview {
    to_buy: HashMap<String, i64>,

    /// Longest id seen, in characters. Used for column alignment.
    max_id_width: usize,
}

impl Overview {
    pub fn new() -> Self {
        Overview::default()
    }

    /// Adds every item of `receipt` to the running totals.
    pub fn add_receipt(&mut self, receipt: &Receipt) {
        for item in receipt.items() {
            self.add(&item.id, item.quantity);
        }
    }

    /// Adds each receipt in turn.
    pub fn add_receipts<'a, I>(&mut self, receipts: I)
    where
        I: IntoIterator<Item = &'a Receipt>,
    {
        for receipt in receipts {
            self.add_receipt(receipt);
        }
    }

    /// Folds another overview into this one, summing matching ids.
    pub fn merge(&mut self, other: &Overview) {
        for (id, quantity) in other.iter() {
            self.add(id, quantity);
        }
    }

    fn add(&mut self, id: &str, quantity: i64) {
        self.max_id_width = self.max_id_width.max(id.chars().count());

        match self.to_buy.get_mut(id) {
            Some(total) => *total = total.wrapping_add(quantity),
            None => {
                self.to_buy.insert(id.to_string(), quantity);
            }
        }
    }

    /// Total quantity for `id`, if any receipt mentioned it.
    pub fn get(&self, id: &str) -> Option<i64> {
        self.to_buy.get(id).copied()
    }

    /// Number of distinct ids.
    pub fn len(&self) -> usize {
        self.to_buy.len()
    }

    pub fn is_empty(&self) -> bool {
        self.to_buy.is_empty()
    }

    /// Width of the longest id, in characters.
    pub fn max_id_width(&self) -> usize {
        self.max_id_width
    }

    /// Iterates over `(id, quantity)` pairs in unspecified order.
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            inner: self.to_buy.iter(),
        }
    }

    /// Returns `(id, quantity)` pairs sorted lexicographically by id.
    pub fn sorted(&self) -> Vec<(&str, i64)> {
        let mut entries: Vec<_> = self.iter().collect();
        entries.sort_unstable_by(|a, b| a.0.cmp(b.0));
        entries
    }
}

/// Iterator over the entries of an [`Overview`].
pub struct Iter<'a> {
    inner: hash_map::Iter<'a, String, i64>,
}

impl<'a> Iterator for Iter<'a> {
    type Item = (&'a str, i64);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(id, qty)| (id.as_str(), *qty))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<'a> IntoIterator for &'a Overview {
    type Item = (&'a str, i64);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
