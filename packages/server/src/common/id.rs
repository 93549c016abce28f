//! Typed serial-key wrappers for compile-time type safety.
//!
//! This module provides `Id<T>`, a typed wrapper around the `SERIAL` integer
//! primary keys used by every moderation table. It prevents accidentally
//! mixing up different ID types (e.g., passing a `KingdomId` where a
//! `SiteId` was expected).
//!
//! # Example
//!
//! ```rust
//! use situs_core::common::id::Id;
//!
//! pub struct Site;
//! pub struct Kingdom;
//!
//! pub type SiteId = Id<Site>;
//! pub type KingdomId = Id<Kingdom>;
//!
//! let site_id = SiteId::parse("7").unwrap();
//! assert_eq!(site_id.as_i32(), 7);
//!
//! // This would be a compile error:
//! // let wrong: KingdomId = site_id;
//! ```

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt::{self, Debug, Display};
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::str::FromStr;
use thiserror::Error;

/// Errors produced when turning untrusted input into an `Id`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdError {
    #[error("id is not an integer: {0:?}")]
    NotAnInteger(String),

    #[error("id must be a positive integer, got {0}")]
    NotPositive(i64),

    #[error("id {0} is too large")]
    OutOfRange(i64),
}

/// A typed wrapper around an `i32` serial key.
///
/// The type parameter `T` represents the entity type this ID belongs to.
/// IDs with different `T` parameters are incompatible at compile time.
#[repr(transparent)]
pub struct Id<T>(i32, PhantomData<fn() -> T>);

// ============================================================================
// Core implementations
// ============================================================================

impl<T> Id<T> {
    /// Wraps a raw key loaded from the database.
    ///
    /// No positivity check is applied; rows coming back from Postgres are
    /// trusted. Use [`Id::new`] or [`Id::parse`] for caller input.
    #[inline]
    pub const fn from_i32(raw: i32) -> Self {
        Self(raw, PhantomData)
    }

    /// Creates an `Id` from caller input, rejecting zero and negatives.
    pub fn new(raw: i64) -> Result<Self, IdError> {
        if raw <= 0 {
            return Err(IdError::NotPositive(raw));
        }
        i32::try_from(raw)
            .map(Self::from_i32)
            .map_err(|_| IdError::OutOfRange(raw))
    }

    /// Parses an `Id` from a path segment or CLI argument.
    pub fn parse(s: &str) -> Result<Self, IdError> {
        let raw: i64 = s
            .trim()
            .parse()
            .map_err(|_| IdError::NotAnInteger(s.to_string()))?;
        Self::new(raw)
    }

    /// Returns the inner key.
    #[inline]
    pub const fn as_i32(&self) -> i32 {
        self.0
    }
}

// ============================================================================
// Standard trait implementations
// ============================================================================

impl<T> Clone for Id<T> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Id<T> {}

impl<T> Debug for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Include type name for debugging clarity
        f.debug_tuple(&format!("Id<{}>", std::any::type_name::<T>()))
            .field(&self.0)
            .finish()
    }
}

impl<T> Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}

impl<T> PartialEq for Id<T> {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<T> Eq for Id<T> {}

impl<T> PartialOrd for Id<T> {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Id<T> {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.cmp(&other.0)
    }
}

impl<T> Hash for Id<T> {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl<T> From<Id<T>> for i32 {
    #[inline]
    fn from(id: Id<T>) -> Self {
        id.0
    }
}

impl<T> FromStr for Id<T> {
    type Err = IdError;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

// ============================================================================
// Serde support
// ============================================================================

impl<T> Serialize for Id<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl<'de, T> Deserialize<'de> for Id<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = i64::deserialize(deserializer)?;
        Self::new(raw).map_err(serde::de::Error::custom)
    }
}

// ============================================================================
// sqlx support
// ============================================================================

use sqlx::encode::IsNull;
use sqlx::error::BoxDynError;
use sqlx::postgres::{PgArgumentBuffer, PgHasArrayType, PgTypeInfo, PgValueRef, Postgres};
use sqlx::{Decode, Encode, Type};

impl<T> Type<Postgres> for Id<T> {
    fn type_info() -> PgTypeInfo {
        <i32 as Type<Postgres>>::type_info()
    }

    fn compatible(ty: &PgTypeInfo) -> bool {
        <i32 as Type<Postgres>>::compatible(ty)
    }
}

impl<T> PgHasArrayType for Id<T> {
    fn array_type_info() -> PgTypeInfo {
        <i32 as PgHasArrayType>::array_type_info()
    }
}

impl<T> Encode<'_, Postgres> for Id<T> {
    fn encode_by_ref(&self, buf: &mut PgArgumentBuffer) -> Result<IsNull, BoxDynError> {
        <i32 as Encode<Postgres>>::encode_by_ref(&self.0, buf)
    }
}

impl<T> Decode<'_, Postgres> for Id<T> {
    fn decode(value: PgValueRef<'_>) -> Result<Self, BoxDynError> {
        <i32 as Decode<Postgres>>::decode(value).map(Self::from_i32)
    }
}

// ============================================================================
// Tests
// ============================================================================
