//! Hathor SDK - Cryptographic primitives, hashing, and utilities.
//!
//! This crate provides the foundational building blocks for the Hathor SDK:
//! - Hash functions (SHA-256, SHA-256d, RIPEMD-160, Hash160)
//! - Big-endian byte codec (`ByteReader`/`ByteWriter`) with the Hathor
//!   dual-width output value encoding
//! - Elliptic curve cryptography (secp256k1 keys and DER signatures)
//! - A generic binary-heap priority queue

pub mod hash;
pub mod util;
pub mod ec;
pub mod priority_queue;

mod error;
pub use error::PrimitivesError;
pub use priority_queue::{PqNode, PriorityQueue};
pub use util::{ByteReader, ByteWriter};
