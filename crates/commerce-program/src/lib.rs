//! Client SDK for the on-chain commerce program.
//!
//! This crate turns typed values into the program's wire format and back:
//! account state codecs ([`state`]), instruction builders ([`instruction`]),
//! and program-derived address search ([`pda`]). Everything is a pure
//! function over bytes — signing, RPC submission, and confirmation belong
//! to the caller's transaction stack, and the UI layer only ever sees the
//! decoded types.

pub mod error;
pub mod instruction;
pub mod pda;
pub mod state;

// Re-export key public types for ergonomic imports.
pub use commerce_codec::{Address, CodecError};
pub use error::ClientError;
pub use instruction::{
    chargeback_payment, clear_payment, create_payment, initialize_merchant, refund_payment,
    update_refund_policy, AccountMeta, AccountRole, Instruction,
};
pub use state::{Merchant, Payment, RefundPolicy, Status};

/// The deployed commerce program:
/// `AnSctV4bwU1aritn1R9Qhr9mM63czKS7D2Dbby2XGvLy`.
pub const PROGRAM_ID: Address = Address::new([
    0x91, 0x5d, 0x49, 0x34, 0xc5, 0xaf, 0x56, 0x1a, 0x2a, 0x8b, 0xfe, 0x8a, 0xe8, 0x44, 0x22,
    0x71, 0x8c, 0x64, 0x0d, 0xda, 0x62, 0xea, 0x64, 0x73, 0x1e, 0x78, 0x68, 0x99, 0x80, 0xe7,
    0x83, 0xd2,
]);

/// The system program: 32 zero bytes.
pub const SYSTEM_PROGRAM_ID: Address = Address::new([0u8; 32]);

/// SPL Token program: `TokenkegQfeZyiNwAJbNbGKPFXCWuBvf9Ss623VQ5DA`.
pub const TOKEN_PROGRAM_ID: Address = Address::new([
    0x06, 0xdd, 0xf6, 0xe1, 0xd7, 0x65, 0xa1, 0x93, 0xd9, 0xcb, 0xe1, 0x46, 0xce, 0xeb, 0x79,
    0xac, 0x1c, 0xb4, 0x85, 0xed, 0x5f, 0x5b, 0x37, 0x91, 0x3a, 0x8c, 0xf5, 0x85, 0x7e, 0xff,
    0x00, 0xa9,
]);

/// Associated Token Account program:
/// `ATokenGPvbdGVxr1b2hvZbsiqW5xWH25efTNsLJA8knL`.
pub const ASSOCIATED_TOKEN_PROGRAM_ID: Address = Address::new([
    0x8c, 0x97, 0x25, 0x8f, 0x4e, 0x24, 0x89, 0xf1, 0xbb, 0x3d, 0x10, 0x29, 0x14, 0x8e, 0x0d,
    0x83, 0x0b, 0x5a, 0x13, 0x99, 0xda, 0xff, 0x10, 0x84, 0x04, 0x8e, 0x7b, 0xd8, 0xdb, 0xe9,
    0xf8, 0x59,
]);
