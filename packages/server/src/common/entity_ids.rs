//! Typed ID definitions for all moderation entities.
//!
//! ```rust
//! use situs_core::common::{KingdomId, SiteId};
//!
//! let site_id = SiteId::from_i32(7);
//! let kingdom_id = KingdomId::from_i32(3);
//!
//! // This would be a compile error:
//! // let wrong: KingdomId = site_id;
//! ```

pub use super::id::Id;

// ============================================================================
// Entity marker types
// ============================================================================

/// Marker type for archaeological site submissions.
pub struct Site;

/// Marker type for historical kingdoms a site may be attributed to.
pub struct Kingdom;

/// Marker type for researchers linked to sites.
pub struct Archaeologist;

/// Marker type for objects recovered at a site.
pub struct FoundObject;

/// Marker type for historical figures.
pub struct Figure;

/// Marker type for authenticated members (reporters and moderators).
pub struct Member;

// ============================================================================
// Type aliases - the primary API
// ============================================================================

pub type SiteId = Id<Site>;

pub type KingdomId = Id<Kingdom>;

pub type ArchaeologistId = Id<Archaeologist>;

pub type FoundObjectId = Id<FoundObject>;

pub type FigureId = Id<Figure>;

pub type MemberId = Id<Member>;
