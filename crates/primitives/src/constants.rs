//! Size constants for EVM-side values.

/// Size of an address in bytes.
pub const ADDRESS_SIZE: usize = 20;

/// Size of an ABI word in bytes.
pub const WORD_SIZE: usize = 32;

/// Size of a method selector in bytes.
pub const SELECTOR_SIZE: usize = 4;

/// Number of zero bytes that pad an address up to a full word.
pub const ADDRESS_PADDING: usize = WORD_SIZE - ADDRESS_SIZE;
