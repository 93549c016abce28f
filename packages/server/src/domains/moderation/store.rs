//! Moderation Store: transactional access to sites, kingdoms, archaeologists
//! and research links.
//!
//! The cascade engine only talks to these traits. `PgModerationStore` backs
//! them with Postgres; `kernel::test_dependencies::InMemoryModerationStore`
//! is the test double.

use async_trait::async_trait;

use super::{ModerationError, ModerationStatus};
use crate::common::{ArchaeologistId, KingdomId, MemberId, SiteId};
use crate::domains::sites::Site;

/// Opens transactions against the moderation tables.
#[async_trait]
pub trait ModerationStore: Send + Sync {
    type Tx: ModerationTx;

    async fn begin(&self) -> Result<Self::Tx, ModerationError>;
}

/// Operations available inside one moderation transaction.
///
/// Every `*_if_*` write evaluates its guard in the same statement that
/// performs the write; "nothing to do" is `Ok(false)`, never an error.
/// Dropping a transaction without calling [`ModerationTx::commit`] rolls it
/// back.
#[async_trait]
pub trait ModerationTx: Send {
    async fn get_site(&mut self, site_id: SiteId) -> Result<Option<Site>, ModerationError>;

    /// Set the site's verification status and stamp the reviewer.
    /// `None` when no such site exists.
    async fn set_site_status(
        &mut self,
        site_id: SiteId,
        status: ModerationStatus,
        reviewed_by: Option<MemberId>,
    ) -> Result<Option<Site>, ModerationError>;

    async fn set_kingdom_status_if_pending(
        &mut self,
        kingdom_id: KingdomId,
        status: ModerationStatus,
    ) -> Result<bool, ModerationError>;

    async fn set_archaeologist_status_if_pending(
        &mut self,
        archaeologist_id: ArchaeologistId,
        status: ModerationStatus,
    ) -> Result<bool, ModerationError>;

    /// Linked archaeologist ids in ascending order.
    async fn archaeologist_ids_linked_to_site(
        &mut self,
        site_id: SiteId,
    ) -> Result<Vec<ArchaeologistId>, ModerationError>;

    /// Whether a non-rejected site other than `excluding` references the kingdom.
    async fn kingdom_has_other_referencing_site(
        &mut self,
        kingdom_id: KingdomId,
        excluding: SiteId,
    ) -> Result<bool, ModerationError>;

    /// Whether the archaeologist is linked to a non-rejected site other than `excluding`.
    async fn archaeologist_has_other_link(
        &mut self,
        archaeologist_id: ArchaeologistId,
        excluding: SiteId,
    ) -> Result<bool, ModerationError>;

    /// Reject the kingdom if it is pending and no other surviving site
    /// references it.
    async fn demote_kingdom_if_unreferenced(
        &mut self,
        kingdom_id: KingdomId,
        excluding: SiteId,
    ) -> Result<bool, ModerationError>;

    /// Reject the archaeologist if it is pending and has no other surviving
    /// research link.
    async fn demote_archaeologist_if_unlinked(
        &mut self,
        archaeologist_id: ArchaeologistId,
        excluding: SiteId,
    ) -> Result<bool, ModerationError>;

    async fn commit(self) -> Result<(), ModerationError>;
}
