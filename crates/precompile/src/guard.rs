//! Blocked-recipient check run before any mutating call.

use crate::error::{PrecompileError, PrecompileResult};
use evm_bank_ledger::BankKeeper;
use evm_bank_primitives::Address;
use tracing::debug;

/// Rejects recipients the ledger's blocked-address policy refuses.
///
/// EVM and ledger accounts share the same 20 bytes, so a decoded `Address`
/// is already a well-formed ledger account and only the policy is consulted.
pub fn check_recipient<K>(keeper: &K, recipient: &Address) -> PrecompileResult<()>
where
    K: BankKeeper + ?Sized,
{
    if keeper.blocked_addr(recipient) {
        debug!(recipient = %recipient, "recipient blocked by bank policy");
        return Err(PrecompileError::UnauthorizedRecipient(*recipient));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use evm_bank_ledger::{module_address, MemoryBankKeeper};

    #[test]
    fn test_blocked_and_allowed() {
        let keeper = MemoryBankKeeper::new();
        let blocked = Address::from_low_byte(0xbb);
        keeper.block_address(blocked);

        assert!(check_recipient(&keeper, &Address::from_low_byte(1)).is_ok());
        assert_eq!(
            check_recipient(&keeper, &blocked),
            Err(PrecompileError::UnauthorizedRecipient(blocked))
        );
        assert!(check_recipient(&keeper, &module_address("evm")).is_err());
    }
}
