//! The four methods of the bank precompile and their selectors.

use crate::abi::{encoded_len, Param};
use evm_bank_primitives::SELECTOR_SIZE;
use once_cell::sync::Lazy;
use sha3::{Digest, Keccak256};

/// A method selector: the first four bytes of `keccak256(signature)`.
pub type Selector = [u8; SELECTOR_SIZE];

/// Computes the selector of a canonical signature such as `mint(address,uint256)`.
pub fn selector_of(signature: &str) -> Selector {
    let hash = Keccak256::digest(signature.as_bytes());
    let mut selector = [0u8; SELECTOR_SIZE];
    selector.copy_from_slice(&hash[..SELECTOR_SIZE]);
    selector
}

pub const MINT_SELECTOR: Selector = [0x40, 0xc1, 0x0f, 0x19];
pub const BURN_SELECTOR: Selector = [0x9d, 0xc2, 0x9f, 0xac];
pub const BALANCE_OF_SELECTOR: Selector = [0xf7, 0x88, 0x8a, 0xec];
pub const TRANSFER_SELECTOR: Selector = [0xbe, 0xab, 0xac, 0xc8];

/// Describes one callable method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodSignature {
    pub name: &'static str,
    pub selector: Selector,
    pub inputs: Vec<Param>,
    pub outputs: Vec<Param>,
    /// Whether the method changes ledger state.
    pub mutating: bool,
}

impl MethodSignature {
    fn new(name: &'static str, inputs: Vec<Param>, outputs: Vec<Param>, mutating: bool) -> Self {
        let mut signature = Self {
            name,
            selector: [0u8; SELECTOR_SIZE],
            inputs,
            outputs,
            mutating,
        };
        signature.selector = selector_of(&signature.canonical());
        signature
    }

    /// Canonical textual signature, e.g. `transfer(address,address,uint256)`.
    pub fn canonical(&self) -> String {
        let types: Vec<&str> = self
            .inputs
            .iter()
            .map(|p| p.kind.canonical_name())
            .collect();
        format!("{}({})", self.name, types.join(","))
    }

    pub fn selector_hex(&self) -> String {
        format!("0x{}", hex::encode(self.selector))
    }

    /// Minimum payload length, selector included.
    pub fn min_input_len(&self) -> usize {
        SELECTOR_SIZE + encoded_len(&self.inputs)
    }
}

/// The closed set of methods the precompile understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Mint,
    Burn,
    BalanceOf,
    Transfer,
}

impl Method {
    pub const ALL: [Method; 4] = [
        Method::Mint,
        Method::Burn,
        Method::BalanceOf,
        Method::Transfer,
    ];

    /// Resolves a selector. `None` means the method is unknown.
    pub const fn from_selector(selector: &Selector) -> Option<Method> {
        match *selector {
            MINT_SELECTOR => Some(Method::Mint),
            BURN_SELECTOR => Some(Method::Burn),
            BALANCE_OF_SELECTOR => Some(Method::BalanceOf),
            TRANSFER_SELECTOR => Some(Method::Transfer),
            _ => None,
        }
    }

    pub fn signature(self) -> &'static MethodSignature {
        METHODS.get(self)
    }
}

/// Immutable table of method signatures.
#[derive(Debug)]
pub struct MethodRegistry {
    mint: MethodSignature,
    burn: MethodSignature,
    balance_of: MethodSignature,
    transfer: MethodSignature,
}

impl MethodRegistry {
    fn build() -> Self {
        // `burn` names its first argument "recipient", but it is the account
        // being debited.
        Self {
            mint: MethodSignature::new(
                "mint",
                vec![Param::address("recipient"), Param::uint256("amount")],
                Vec::new(),
                true,
            ),
            burn: MethodSignature::new(
                "burn",
                vec![Param::address("recipient"), Param::uint256("amount")],
                Vec::new(),
                true,
            ),
            balance_of: MethodSignature::new(
                "balanceOf",
                vec![Param::address("token"), Param::address("address")],
                vec![Param::uint256("amount")],
                false,
            ),
            transfer: MethodSignature::new(
                "transfer",
                vec![
                    Param::address("sender"),
                    Param::address("recipient"),
                    Param::uint256("amount"),
                ],
                Vec::new(),
                true,
            ),
        }
    }

    pub fn get(&self, method: Method) -> &MethodSignature {
        match method {
            Method::Mint => &self.mint,
            Method::Burn => &self.burn,
            Method::BalanceOf => &self.balance_of,
            Method::Transfer => &self.transfer,
        }
    }

    pub fn lookup(&self, selector: &Selector) -> Option<Method> {
        Method::from_selector(selector)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Method, &MethodSignature)> {
        Method::ALL.into_iter().map(move |m| (m, self.get(m)))
    }
}

/// Never written after construction. [`init`] builds it eagerly.
pub static METHODS: Lazy<MethodRegistry> = Lazy::new(MethodRegistry::build);

pub fn registry() -> &'static MethodRegistry {
    &METHODS
}

/// Builds the method table now instead of on the first call.
pub fn init() {
    Lazy::force(&METHODS);
}

#[cfg(test)]
mod tests {
    use super::*;
    use hashbrown::HashSet;

    #[test]
    fn test_canonical_signatures() {
        assert_eq!(Method::Mint.signature().canonical(), "mint(address,uint256)");
        assert_eq!(Method::Burn.signature().canonical(), "burn(address,uint256)");
        assert_eq!(
            Method::BalanceOf.signature().canonical(),
            "balanceOf(address,address)"
        );
        assert_eq!(
            Method::Transfer.signature().canonical(),
            "transfer(address,address,uint256)"
        );
    }

    #[test]
    fn test_well_known_selectors() {
        assert_eq!(Method::Mint.signature().selector, [0x40, 0xc1, 0x0f, 0x19]);
        assert_eq!(Method::Burn.signature().selector, [0x9d, 0xc2, 0x9f, 0xac]);
        assert_eq!(selector_of("transfer(address,uint256)"), [0xa9, 0x05, 0x9c, 0xbb]);
        assert_eq!(selector_of("balanceOf(address)"), [0x70, 0xa0, 0x82, 0x31]);
    }

    #[test]
    fn test_const_selectors_match_signatures() {
        for method in Method::ALL {
            let signature = method.signature();
            assert_eq!(signature.selector, selector_of(&signature.canonical()));
            assert_eq!(Method::from_selector(&signature.selector), Some(method));
        }
        assert_eq!(Method::BalanceOf.signature().selector, BALANCE_OF_SELECTOR);
        assert_eq!(Method::Transfer.signature().selector, TRANSFER_SELECTOR);
    }

    #[test]
    fn test_init_builds_table() {
        init();
        assert!(Lazy::get(&METHODS).is_some());
    }

    #[test]
    fn test_selectors_are_distinct() {
        let selectors: HashSet<Selector> = registry().iter().map(|(_, s)| s.selector).collect();
        assert_eq!(selectors.len(), Method::ALL.len());
    }

    #[test]
    fn test_lookup_roundtrip() {
        for (method, signature) in registry().iter() {
            assert_eq!(Method::from_selector(&signature.selector), Some(method));
        }
        assert_eq!(Method::from_selector(&[0, 0, 0, 0]), None);
    }

    #[test]
    fn test_mutating_flags_and_lengths() {
        assert!(Method::Mint.signature().mutating);
        assert!(Method::Burn.signature().mutating);
        assert!(Method::Transfer.signature().mutating);
        assert!(!Method::BalanceOf.signature().mutating);

        assert_eq!(Method::Mint.signature().min_input_len(), 68);
        assert_eq!(Method::Transfer.signature().min_input_len(), 100);
        assert_eq!(Method::BalanceOf.signature().outputs.len(), 1);
    }
}
