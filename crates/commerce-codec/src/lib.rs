//! Binary codec layer for the commerce program.
//!
//! This crate implements the account and instruction wire format of the
//! on-chain commerce program by hand — no `solana-sdk` dependency (which
//! drags in tokio and 200+ transitive dependencies). The format is a fixed
//! binary layout: little-endian integers, 32-byte public keys, u32 length
//! prefixes, and single-byte discriminators/tags.
//!
//! Rather than one hand-written encode/decode pair per account and
//! instruction type, the wire format is described by `static` schema tables
//! ([`layout::StructLayout`], [`layout::EnumLayout`]) consumed by a single
//! generic engine ([`engine`]). Typed wrappers live downstream in
//! `commerce-program` and only map fields; all byte-level work happens here.

pub mod address;
pub mod engine;
pub mod error;
pub mod layout;
pub mod primitives;

// Re-export key public types for ergonomic imports.
pub use address::Address;
pub use engine::{decode_enum, decode_struct, encode_enum, encode_struct, Value};
pub use error::CodecError;
pub use layout::{EnumLayout, FieldLayout, StructLayout, TypeLayout, VariantLayout};
