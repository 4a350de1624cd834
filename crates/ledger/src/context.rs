//! Write-buffering view over the ledger.
//!
//! A `LedgerContext` is the explicit transactional handle every keeper
//! operation receives. It reads through to its parent and keeps its own
//! writes in a `ChangeSet` until the owner decides to merge or drop them.
//! Contexts nest: a branch of a context sees the parent's pending writes,
//! and merging the branch folds its writes into the parent rather than into
//! the committed store.

use crate::store::{ChangeSet, ReadStore, StoreKey};
use evm_bank_primitives::Address;
use num_bigint::BigUint;

pub struct LedgerContext<'a> {
    parent: &'a dyn ReadStore,
    writes: ChangeSet,
    depth: usize,
}

impl<'a> LedgerContext<'a> {
    /// Opens a root context over committed state.
    pub fn new(parent: &'a dyn ReadStore) -> Self {
        Self {
            parent,
            writes: ChangeSet::new(),
            depth: 0,
        }
    }

    /// Opens a nested context whose writes stay private until merged back
    /// with [`LedgerContext::apply`].
    pub fn branch(&self) -> LedgerContext<'_> {
        LedgerContext {
            parent: self,
            writes: ChangeSet::new(),
            depth: self.depth + 1,
        }
    }

    /// Nesting level; a root context is at depth zero.
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn balance(&self, address: &Address, denom: &str) -> BigUint {
        self.get(&StoreKey::balance(*address, denom))
            .unwrap_or_default()
    }

    pub fn set_balance(&mut self, address: &Address, denom: &str, amount: BigUint) {
        self.writes
            .insert(StoreKey::balance(*address, denom), Some(amount));
    }

    pub fn supply(&self, denom: &str) -> BigUint {
        self.get(&StoreKey::supply(denom)).unwrap_or_default()
    }

    pub fn set_supply(&mut self, denom: &str, amount: BigUint) {
        self.writes.insert(StoreKey::supply(denom), Some(amount));
    }

    /// Merges the writes of a finished branch.
    pub fn apply(&mut self, changes: ChangeSet) {
        self.writes.extend(changes);
    }

    /// Pending writes of this context.
    pub fn change_set(&self) -> &ChangeSet {
        &self.writes
    }

    pub fn into_change_set(self) -> ChangeSet {
        self.writes
    }
}

impl ReadStore for LedgerContext<'_> {
    fn get(&self, key: &StoreKey) -> Option<BigUint> {
        match self.writes.lookup(key) {
            Some(value) => value.cloned(),
            None => self.parent.get(key),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::BankStore;

    fn addr(b: u8) -> Address {
        Address::from_low_byte(b)
    }

    #[test]
    fn test_reads_see_own_writes() {
        let mut store = BankStore::new();
        store.set(StoreKey::balance(addr(1), "stake"), Some(BigUint::from(10u8)));

        let mut ctx = LedgerContext::new(&store);
        assert_eq!(ctx.balance(&addr(1), "stake"), BigUint::from(10u8));
        ctx.set_balance(&addr(1), "stake", BigUint::from(3u8));
        assert_eq!(ctx.balance(&addr(1), "stake"), BigUint::from(3u8));

        // committed state untouched until the owner applies the change set
        assert_eq!(store.balance(&addr(1), "stake"), BigUint::from(10u8));
    }

    #[test]
    fn test_zero_write_shadows_parent() {
        let mut store = BankStore::new();
        store.set(StoreKey::balance(addr(1), "stake"), Some(BigUint::from(10u8)));

        let mut ctx = LedgerContext::new(&store);
        ctx.set_balance(&addr(1), "stake", BigUint::from(0u8));
        assert_eq!(ctx.balance(&addr(1), "stake"), BigUint::from(0u8));
    }

    #[test]
    fn test_branch_merge_and_discard() {
        let store = BankStore::new();
        let mut ctx = LedgerContext::new(&store);
        ctx.set_balance(&addr(1), "stake", BigUint::from(1u8));

        let discarded = {
            let mut child = ctx.branch();
            assert_eq!(child.depth(), 1);
            assert_eq!(child.balance(&addr(1), "stake"), BigUint::from(1u8));
            child.set_balance(&addr(2), "stake", BigUint::from(9u8));
            child.balance(&addr(2), "stake")
        };
        assert_eq!(discarded, BigUint::from(9u8));
        assert_eq!(ctx.balance(&addr(2), "stake"), BigUint::from(0u8));

        let merged = {
            let mut child = ctx.branch();
            child.set_balance(&addr(2), "stake", BigUint::from(7u8));
            child.into_change_set()
        };
        ctx.apply(merged);
        assert_eq!(ctx.balance(&addr(2), "stake"), BigUint::from(7u8));
        assert_eq!(ctx.change_set().len(), 2);
    }
}
