// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! EquivalenceHash and NameHash per OMG DDS-XTypes v1.3 specification
//!
//!
//! Section 7.3.4.8: TypeIdentifier hash computation
//! Section 7.3.1.2.1.1: Member name hashing

use md5::{Digest, Md5};
use std::fmt;

/// Mask applied to a name hash when it is used as an automatic member id.
pub const MEMBER_ID_HASH_MASK: u32 = 0x0FFF_FFFF;

/// EquivalenceHash - 14-byte truncated MD5 of a canonically encoded TypeObject
///
/// Two identifiers with the same equivalence kind and the same hash are
/// assumed to denote equivalent types.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct EquivalenceHash([u8; 14]);

impl EquivalenceHash {
    /// Create from raw 14-byte array
    pub const fn from_bytes(bytes: [u8; 14]) -> Self {
        Self(bytes)
    }

    /// Get the raw 14-byte array
    pub const fn as_bytes(&self) -> &[u8; 14] {
        &self.0
    }

    /// All-zero hash
    pub const fn zero() -> Self {
        Self([0u8; 14])
    }

    /// MD5 over `data`, truncated to the first 14 bytes of the digest.
    pub fn compute(data: &[u8]) -> Self {
        let digest = Md5::digest(data);
        let mut bytes = [0u8; 14];
        bytes.copy_from_slice(&digest[..14]);
        Self(bytes)
    }
}

impl fmt::Debug for EquivalenceHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EquivalenceHash(")?;
        for byte in &self.0 {
            write!(f, "{:02x}", byte)?;
        }
        write!(f, ")")
    }
}

impl fmt::Display for EquivalenceHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in &self.0 {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

impl From<[u8; 14]> for EquivalenceHash {
    fn from(bytes: [u8; 14]) -> Self {
        Self::from_bytes(bytes)
    }
}

impl AsRef<[u8]> for EquivalenceHash {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// NameHash - first 4 bytes of the MD5 of a member name
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct NameHash(pub [u8; 4]);

impl NameHash {
    /// Hash a member name (UTF-8 bytes, no terminator).
    pub fn of(name: &str) -> Self {
        let digest = Md5::digest(name.as_bytes());
        let mut bytes = [0u8; 4];
        bytes.copy_from_slice(&digest[..4]);
        Self(bytes)
    }

    pub const fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }
}

impl fmt::Debug for NameHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "NameHash({:02x}{:02x}{:02x}{:02x})",
            self.0[0], self.0[1], self.0[2], self.0[3]
        )
    }
}

impl From<[u8; 4]> for NameHash {
    fn from(bytes: [u8; 4]) -> Self {
        Self(bytes)
    }
}

/// Compute the `NameHash` stored in minimal member details.
pub fn hash_member_name(name: &str) -> NameHash {
    NameHash::of(name)
}

/// Derive an automatic (`@autoid(HASH)`) member id from a member name.
///
/// The first four digest bytes are read as a little-endian u32 and the
/// top nibble is cleared.
pub fn hash_member_name_to_id(name: &str) -> u32 {
    u32::from_le_bytes(NameHash::of(name).0) & MEMBER_ID_HASH_MASK
}
