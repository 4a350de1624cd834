//! Committed bank state and the change sets applied to it.

use evm_bank_primitives::{Address, Coin};
use hashbrown::HashMap;
use num_bigint::BigUint;
use num_traits::Zero;
use std::collections::BTreeMap;

/// Key of a single ledger entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StoreKey {
    /// Balance of `denom` held by `address`.
    Balance { address: Address, denom: String },
    /// Total supply of `denom`.
    Supply { denom: String },
}

impl StoreKey {
    pub fn balance(address: Address, denom: impl Into<String>) -> Self {
        Self::Balance {
            address,
            denom: denom.into(),
        }
    }

    pub fn supply(denom: impl Into<String>) -> Self {
        Self::Supply {
            denom: denom.into(),
        }
    }
}

/// Read access shared by the committed store and every context layered on it.
pub trait ReadStore {
    /// Returns the stored value, `None` when absent or zero.
    fn get(&self, key: &StoreKey) -> Option<BigUint>;
}

/// Buffered writes, ordered by key. `None` deletes the entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet {
    writes: BTreeMap<StoreKey, Option<BigUint>>,
}

impl ChangeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a write; zero values are stored as deletions.
    pub fn insert(&mut self, key: StoreKey, value: Option<BigUint>) {
        let value = value.filter(|v| !v.is_zero());
        self.writes.insert(key, value);
    }

    /// The buffered write for `key`, if any. The outer `Option` tells
    /// whether the key was written at all.
    pub fn lookup(&self, key: &StoreKey) -> Option<Option<&BigUint>> {
        self.writes.get(key).map(Option::as_ref)
    }

    /// Moves every write of `other` into `self`, later writes winning.
    pub fn extend(&mut self, other: ChangeSet) {
        self.writes.extend(other.writes);
    }

    pub fn is_empty(&self) -> bool {
        self.writes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.writes.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&StoreKey, Option<&BigUint>)> {
        self.writes.iter().map(|(k, v)| (k, v.as_ref()))
    }
}

impl IntoIterator for ChangeSet {
    type Item = (StoreKey, Option<BigUint>);
    type IntoIter = std::collections::btree_map::IntoIter<StoreKey, Option<BigUint>>;

    fn into_iter(self) -> Self::IntoIter {
        self.writes.into_iter()
    }
}

/// The committed ledger state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BankStore {
    entries: HashMap<StoreKey, BigUint>,
}

impl BankStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes a single entry, removing it when the value is zero or `None`.
    pub fn set(&mut self, key: StoreKey, value: Option<BigUint>) -> Option<BigUint> {
        match value.filter(|v| !v.is_zero()) {
            Some(v) => self.entries.insert(key, v),
            None => self.entries.remove(&key),
        }
    }

    /// Applies a change set and returns the pre-images needed to undo it.
    pub fn apply(&mut self, changes: ChangeSet) -> ChangeSet {
        let mut undo = ChangeSet::new();
        for (key, value) in changes {
            let previous = self.set(key.clone(), value);
            undo.insert(key, previous);
        }
        undo
    }

    /// Balance of `denom` held by `address`, zero when absent.
    pub fn balance(&self, address: &Address, denom: &str) -> BigUint {
        self.get(&StoreKey::balance(*address, denom))
            .unwrap_or_default()
    }

    /// Total supply of `denom`, zero when absent.
    pub fn supply(&self, denom: &str) -> BigUint {
        self.get(&StoreKey::supply(denom)).unwrap_or_default()
    }

    /// All non-zero balances, sorted by address then denom.
    pub fn balances(&self) -> Vec<(Address, Coin)> {
        let mut out: Vec<(Address, Coin)> = self
            .entries
            .iter()
            .filter_map(|(key, amount)| match key {
                StoreKey::Balance { address, denom } => Some((
                    *address,
                    Coin {
                        denom: denom.clone(),
                        amount: amount.clone(),
                    },
                )),
                StoreKey::Supply { .. } => None,
            })
            .collect();
        out.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.denom.cmp(&b.1.denom)));
        out
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl ReadStore for BankStore {
    fn get(&self, key: &StoreKey) -> Option<BigUint> {
        self.entries.get(key).cloned()
    }
}
