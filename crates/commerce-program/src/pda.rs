//! Program-derived address search.
//!
//! A PDA is found by hashing the seed bytes, a bump byte, the program
//! address, and a fixed marker string, then checking that the digest is
//! NOT a valid Ed25519 curve point. The search starts at bump 255 and
//! walks down; the first off-curve candidate wins. The downward order is a
//! compatibility requirement — every address stored on chain was derived
//! that way, so any other order would disagree with deployed state.

use sha2::{Digest, Sha256};

use commerce_codec::Address;

use crate::error::ClientError;
use crate::{ASSOCIATED_TOKEN_PROGRAM_ID, PROGRAM_ID, TOKEN_PROGRAM_ID};

/// The string appended to every PDA candidate hash: "ProgramDerivedAddress".
const PDA_MARKER: &[u8] = b"ProgramDerivedAddress";

/// Seed prefix of merchant accounts.
pub const MERCHANT_SEED: &[u8] = b"merchant";
/// Seed prefix of payment accounts.
pub const PAYMENT_SEED: &[u8] = b"payment";
/// Seed of the platform operator account.
pub const OPERATOR_SEED: &[u8] = b"operator";

/// Find the program-derived address and bump for the given seeds.
///
/// Iterates bump seeds from 255 down to 0, computing
/// `SHA-256(seed_0 || seed_1 || ... || bump || program_id || marker)`
/// and returning the first digest that is not a valid Ed25519 point.
/// Pure and reproducible: identical inputs always yield the identical
/// `(address, bump)` pair.
pub fn find_program_address(
    seeds: &[&[u8]],
    program_id: &Address,
) -> Result<(Address, u8), ClientError> {
    for bump in (0u8..=255).rev() {
        if let Some(address) = try_create_program_address(seeds, bump, program_id) {
            return Ok((address, bump));
        }
    }

    // Practically unreachable, but a defined failure rather than a crash.
    Err(ClientError::NoValidBump)
}

/// Attempt one candidate. `None` means the digest fell on the curve and
/// the next bump must be tried.
fn try_create_program_address(
    seeds: &[&[u8]],
    bump: u8,
    program_id: &Address,
) -> Option<Address> {
    let mut hasher = Sha256::new();

    for seed in seeds {
        hasher.update(seed);
    }
    hasher.update([bump]);
    hasher.update(program_id.as_bytes());
    hasher.update(PDA_MARKER);

    let hash: [u8; 32] = hasher.finalize().into();

    if is_on_curve(&hash) {
        return None;
    }

    Some(Address::new(hash))
}

/// Check if 32 bytes represent a valid Ed25519 curve point.
///
/// Uses `curve25519-dalek` to attempt decompression. If it succeeds, the
/// bytes could be a signable public key and are unusable as a PDA.
fn is_on_curve(bytes: &[u8; 32]) -> bool {
    curve25519_dalek::edwards::CompressedEdwardsY(*bytes)
        .decompress()
        .is_some()
}

// ---------------------------------------------------------------------------
// Commerce program seed schedules
// ---------------------------------------------------------------------------

/// Merchant account for an authority: `["merchant", authority]`.
pub fn derive_merchant_address(authority: &Address) -> Result<(Address, u8), ClientError> {
    find_program_address(&[MERCHANT_SEED, authority.as_ref()], &PROGRAM_ID)
}

/// Payment account for an order: `["payment", merchant, order_id]`.
pub fn derive_payment_address(
    merchant: &Address,
    order_id: &[u8; 32],
) -> Result<(Address, u8), ClientError> {
    find_program_address(
        &[PAYMENT_SEED, merchant.as_ref(), order_id],
        &PROGRAM_ID,
    )
}

/// The platform operator account: `["operator"]`.
pub fn derive_operator_address() -> Result<(Address, u8), ClientError> {
    find_program_address(&[OPERATOR_SEED], &PROGRAM_ID)
}

/// Associated token account for an `owner` + `mint` pair.
///
/// Escrow and settlement vaults are plain ATAs: seeds
/// `[owner, token_program_id, mint]` under the ATA program.
pub fn derive_token_account(owner: &Address, mint: &Address) -> Result<Address, ClientError> {
    find_program_address(
        &[owner.as_ref(), TOKEN_PROGRAM_ID.as_ref(), mint.as_ref()],
        &ASSOCIATED_TOKEN_PROGRAM_ID,
    )
    .map(|(address, _bump)| address)
}
