//! Running ledger logic atomically with the enclosing VM call.
//!
//! The VM exposes an [`ExtStateDb`]. The precompile hands it a native
//! action; the host runs the action against a fresh [`LedgerContext`] and
//! keeps the writes only if the action succeeds. Two hosts are provided:
//!
//! - [`JournaledState`]: the top-level VM state. Each successful action is
//!   applied to the bank store and journaled with its pre-images, so a later
//!   revert of the enclosing call undoes it.
//! - [`LedgerContext`] itself: a re-entrant call made from inside another
//!   action branches the outer context and merges into it, so inner writes
//!   join the outer action instead of forming a separate transaction.

use evm_bank_ledger::{BankStore, ChangeSet, LedgerContext, LedgerResult};
use evm_bank_primitives::Address;
use tracing::debug;

/// Ledger logic run by [`ExtStateDb::execute_native_action`].
pub type NativeAction<'a> = Box<dyn FnOnce(&mut LedgerContext<'_>) -> LedgerResult<()> + 'a>;

/// State access the VM grants to stateful precompiles.
pub trait ExtStateDb {
    /// Runs `action` against the current ledger state.
    ///
    /// On success every write of the action becomes visible to later reads
    /// and is tied to the enclosing call's outcome. On failure no write is
    /// kept.
    fn execute_native_action(
        &mut self,
        contract: Address,
        action: NativeAction<'_>,
    ) -> LedgerResult<()>;
}

/// Runs a value-returning closure as a native action.
///
/// The result defaults to `T::default()` if the host never ran the action.
pub fn run_atomic<S, T, F>(state: &mut S, contract: Address, f: F) -> LedgerResult<T>
where
    S: ExtStateDb + ?Sized,
    T: Default,
    F: FnOnce(&mut LedgerContext<'_>) -> LedgerResult<T>,
{
    let mut out = T::default();
    state.execute_native_action(
        contract,
        Box::new(|ctx: &mut LedgerContext<'_>| -> LedgerResult<()> {
            out = f(ctx)?;
            Ok(())
        }),
    )?;
    Ok(out)
}

#[derive(Debug)]
struct JournalEntry {
    contract: Address,
    undo: ChangeSet,
}

/// VM-side state owning the bank store and the native-action journal.
#[derive(Debug, Default)]
pub struct JournaledState {
    store: BankStore,
    journal: Vec<JournalEntry>,
}

impl JournaledState {
    pub fn new(store: BankStore) -> Self {
        Self {
            store,
            journal: Vec::new(),
        }
    }

    /// Current state, including uncommitted native actions.
    pub fn store(&self) -> &BankStore {
        &self.store
    }

    /// Number of native actions recorded since the last commit.
    pub fn journal_len(&self) -> usize {
        self.journal.len()
    }

    /// Marks the current journal position.
    pub fn snapshot(&self) -> usize {
        self.journal.len()
    }

    /// Undoes every native action recorded after `snapshot`, newest first.
    pub fn revert_to_snapshot(&mut self, snapshot: usize) {
        while self.journal.len() > snapshot {
            let Some(entry) = self.journal.pop() else {
                break;
            };
            debug!(contract = %entry.contract, keys = entry.undo.len(), "reverting native action");
            self.store.apply(entry.undo);
        }
    }

    /// Finalises all recorded actions. Returns how many were committed.
    pub fn commit(&mut self) -> usize {
        let committed = self.journal.len();
        self.journal.clear();
        committed
    }

    /// Commits and hands back the store.
    pub fn into_store(mut self) -> BankStore {
        self.commit();
        self.store
    }
}

impl ExtStateDb for JournaledState {
    fn execute_native_action(
        &mut self,
        contract: Address,
        action: NativeAction<'_>,
    ) -> LedgerResult<()> {
        let changes = {
            let mut ctx = LedgerContext::new(&self.store);
            action(&mut ctx)?;
            ctx.into_change_set()
        };
        if changes.is_empty() {
            return Ok(());
        }

        let keys = changes.len();
        let undo = self.store.apply(changes);
        self.journal.push(JournalEntry { contract, undo });
        debug!(contract = %contract, keys, journal = self.journal.len(), "native action applied");
        Ok(())
    }
}

impl ExtStateDb for LedgerContext<'_> {
    fn execute_native_action(
        &mut self,
        contract: Address,
        action: NativeAction<'_>,
    ) -> LedgerResult<()> {
        let changes = {
            let mut branch = self.branch();
            action(&mut branch)?;
            branch.into_change_set()
        };
        debug!(contract = %contract, depth = self.depth() + 1, keys = changes.len(), "nested native action merged");
        self.apply(changes);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use evm_bank_ledger::LedgerError;
    use num_bigint::BigUint;

    fn addr(b: u8) -> Address {
        Address::from_low_byte(b)
    }

    fn credit(ctx: &mut LedgerContext<'_>, who: u8, amount: u32) {
        let current = ctx.balance(&addr(who), "stake");
        ctx.set_balance(&addr(who), "stake", current + amount);
    }

    #[test]
    fn test_failed_action_leaves_no_trace() {
        let mut state = JournaledState::default();
        let result: LedgerResult<()> = run_atomic(&mut state, addr(100), |ctx| {
            credit(ctx, 1, 50);
            Err(LedgerError::InvalidCoins("boom".to_string()))
        });
        assert!(result.is_err());
        assert!(state.store().is_empty());
        assert_eq!(state.journal_len(), 0);
    }

    #[test]
    fn test_writes_visible_within_and_after_action() {
        let mut state = JournaledState::default();
        let seen = run_atomic(&mut state, addr(100), |ctx| {
            credit(ctx, 1, 50);
            credit(ctx, 1, 25);
            Ok(ctx.balance(&addr(1), "stake"))
        })
        .unwrap();
        assert_eq!(seen, BigUint::from(75u32));
        assert_eq!(state.store().balance(&addr(1), "stake"), BigUint::from(75u32));
    }

    #[test]
    fn test_read_only_action_is_not_journaled() {
        let mut state = JournaledState::default();
        let balance = run_atomic(&mut state, addr(100), |ctx| Ok(ctx.balance(&addr(1), "stake"))).unwrap();
        assert_eq!(balance, BigUint::from(0u32));
        assert_eq!(state.journal_len(), 0);
    }

    #[test]
    fn test_revert_to_snapshot() {
        let mut state = JournaledState::default();
        run_atomic(&mut state, addr(100), |ctx| {
            credit(ctx, 1, 10);
            Ok(())
        })
        .unwrap();

        let snapshot = state.snapshot();
        run_atomic(&mut state, addr(100), |ctx| {
            credit(ctx, 1, 5);
            credit(ctx, 2, 7);
            Ok(())
        })
        .unwrap();
        assert_eq!(state.store().balance(&addr(1), "stake"), BigUint::from(15u32));

        state.revert_to_snapshot(snapshot);
        assert_eq!(state.store().balance(&addr(1), "stake"), BigUint::from(10u32));
        assert_eq!(state.store().balance(&addr(2), "stake"), BigUint::from(0u32));
        assert_eq!(state.commit(), 1);
    }

    #[test]
    fn test_into_store_keeps_applied_actions() {
        let mut state = JournaledState::default();
        run_atomic(&mut state, addr(100), |ctx| {
            credit(ctx, 4, 9);
            Ok(())
        })
        .unwrap();
        let store = state.into_store();
        assert_eq!(store.balance(&addr(4), "stake"), BigUint::from(9u32));
    }

    #[test]
    fn test_nested_actions_join_outer_scope() {
        let mut state = JournaledState::default();
        run_atomic(&mut state, addr(100), |ctx| {
            credit(ctx, 1, 10);
            run_atomic(ctx, addr(100), |inner| {
                credit(inner, 2, 20);
                Ok(())
            })?;
            let failed: LedgerResult<()> = run_atomic(ctx, addr(100), |inner| {
                credit(inner, 3, 30);
                Err(LedgerError::InvalidCoins("inner".to_string()))
            });
            assert!(failed.is_err());
            assert_eq!(ctx.balance(&addr(3), "stake"), BigUint::from(0u32));
            Ok(())
        })
        .unwrap();

        // one journal entry for the whole outer action
        assert_eq!(state.journal_len(), 1);
        assert_eq!(state.store().balance(&addr(2), "stake"), BigUint::from(20u32));

        state.revert_to_snapshot(0);
        assert!(state.store().is_empty());
    }

    #[test]
    fn test_outer_failure_discards_inner_success() {
        let mut state = JournaledState::default();
        let result: LedgerResult<()> = run_atomic(&mut state, addr(100), |ctx| {
            run_atomic(ctx, addr(100), |inner| {
                credit(inner, 2, 20);
                Ok(())
            })?;
            Err(LedgerError::InvalidCoins("outer".to_string()))
        });
        assert!(result.is_err());
        assert!(state.store().is_empty());
    }
}
