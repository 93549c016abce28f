// In-memory Moderation Store for tests.
//
// Transactions are serialized on one mutex and work on a private copy of the
// tables, which replaces the shared copy only on commit. Dropping a
// transaction discards its copy, matching Postgres rollback-on-drop.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::common::{ArchaeologistId, KingdomId, MemberId, SiteId};
use crate::domains::moderation::{
    ModerationError, ModerationStatus, ModerationStore, ModerationTx,
};
use crate::domains::sites::Site;

// =============================================================================
// Tables
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModerationTables {
    pub sites: BTreeMap<SiteId, Site>,
    pub kingdoms: BTreeMap<KingdomId, ModerationStatus>,
    pub archaeologists: BTreeMap<ArchaeologistId, ModerationStatus>,
    pub research_links: BTreeSet<(ArchaeologistId, SiteId)>,
}

/// Status-only view of the tables, ignoring review timestamps
pub type StatusSnapshot = (
    Vec<(SiteId, ModerationStatus)>,
    Vec<(KingdomId, ModerationStatus)>,
    Vec<(ArchaeologistId, ModerationStatus)>,
);

impl ModerationTables {
    pub fn site_status(&self, id: SiteId) -> Option<ModerationStatus> {
        self.sites.get(&id).map(|s| s.verification_status)
    }

    pub fn kingdom_status(&self, id: KingdomId) -> Option<ModerationStatus> {
        self.kingdoms.get(&id).copied()
    }

    pub fn archaeologist_status(&self, id: ArchaeologistId) -> Option<ModerationStatus> {
        self.archaeologists.get(&id).copied()
    }

    pub fn statuses(&self) -> StatusSnapshot {
        (
            self.sites
                .iter()
                .map(|(id, s)| (*id, s.verification_status))
                .collect(),
            self.kingdoms.iter().map(|(id, s)| (*id, *s)).collect(),
            self.archaeologists.iter().map(|(id, s)| (*id, *s)).collect(),
        )
    }

    fn is_surviving_site(&self, site_id: SiteId, excluding: SiteId) -> bool {
        site_id != excluding
            && self
                .site_status(site_id)
                .is_some_and(|status| status != ModerationStatus::Rejected)
    }

    fn set_if_pending<K: Ord>(
        map: &mut BTreeMap<K, ModerationStatus>,
        key: &K,
        status: ModerationStatus,
    ) -> bool {
        match map.get_mut(key) {
            Some(current) if current.is_pending() => {
                *current = status;
                true
            }
            _ => false,
        }
    }
}

// =============================================================================
// Failure injection
// =============================================================================

/// Where an injected store failure fires
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailPoint {
    SiteWrite,
    KingdomWrite,
    ArchaeologistWrite,
    Commit,
}

fn injected_failure(point: FailPoint) -> ModerationError {
    ModerationError::StoreUnavailable(sqlx::Error::Protocol(format!(
        "injected failure at {:?}",
        point
    )))
}

// =============================================================================
// Store
// =============================================================================

#[derive(Clone, Default)]
pub struct InMemoryModerationStore {
    tables: Arc<Mutex<ModerationTables>>,
    fail_point: Arc<Mutex<Option<FailPoint>>>,
}

impl InMemoryModerationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent transaction fail at `point`
    pub async fn fail_at(&self, point: FailPoint) {
        *self.fail_point.lock().await = Some(point);
    }

    pub async fn snapshot(&self) -> ModerationTables {
        self.tables.lock().await.clone()
    }

    pub async fn insert_kingdom(&self, id: KingdomId, status: ModerationStatus) {
        self.tables.lock().await.kingdoms.insert(id, status);
    }

    pub async fn insert_archaeologist(&self, id: ArchaeologistId, status: ModerationStatus) {
        self.tables.lock().await.archaeologists.insert(id, status);
    }

    pub async fn insert_site(
        &self,
        id: SiteId,
        kingdom_id: Option<KingdomId>,
        status: ModerationStatus,
    ) {
        let now = Utc::now();
        let site = Site {
            site_id: id,
            name: format!("Site {}", id),
            street: "Jalan Candi".to_string(),
            village_id: None,
            latitude: -7.6079,
            longitude: 110.2038,
            historical_period: None,
            site_type: None,
            kingdom_id,
            verification_status: status,
            reporter_id: MemberId::from_i32(100),
            reviewed_by: None,
            reviewed_at: None,
            created_at: now,
            updated_at: now,
        };
        self.tables.lock().await.sites.insert(id, site);
    }

    pub async fn link(&self, archaeologist_id: ArchaeologistId, site_id: SiteId) {
        self.tables
            .lock()
            .await
            .research_links
            .insert((archaeologist_id, site_id));
    }
}

#[async_trait]
impl ModerationStore for InMemoryModerationStore {
    type Tx = InMemoryModerationTx;

    async fn begin(&self) -> Result<Self::Tx, ModerationError> {
        let fail_point = *self.fail_point.lock().await;
        let guard = self.tables.clone().lock_owned().await;
        let working = guard.clone();
        Ok(InMemoryModerationTx {
            guard,
            working,
            fail_point,
        })
    }
}

pub struct InMemoryModerationTx {
    guard: OwnedMutexGuard<ModerationTables>,
    working: ModerationTables,
    fail_point: Option<FailPoint>,
}

impl InMemoryModerationTx {
    fn check(&self, point: FailPoint) -> Result<(), ModerationError> {
        if self.fail_point == Some(point) {
            return Err(injected_failure(point));
        }
        Ok(())
    }
}

#[async_trait]
impl ModerationTx for InMemoryModerationTx {
    async fn get_site(&mut self, site_id: SiteId) -> Result<Option<Site>, ModerationError> {
        Ok(self.working.sites.get(&site_id).cloned())
    }

    async fn set_site_status(
        &mut self,
        site_id: SiteId,
        status: ModerationStatus,
        reviewed_by: Option<MemberId>,
    ) -> Result<Option<Site>, ModerationError> {
        self.check(FailPoint::SiteWrite)?;
        let Some(site) = self.working.sites.get_mut(&site_id) else {
            return Ok(None);
        };
        let now = Utc::now();
        site.verification_status = status;
        site.reviewed_by = reviewed_by.or(site.reviewed_by);
        site.reviewed_at = Some(now);
        site.updated_at = now;
        Ok(Some(site.clone()))
    }

    async fn set_kingdom_status_if_pending(
        &mut self,
        kingdom_id: KingdomId,
        status: ModerationStatus,
    ) -> Result<bool, ModerationError> {
        self.check(FailPoint::KingdomWrite)?;
        Ok(ModerationTables::set_if_pending(
            &mut self.working.kingdoms,
            &kingdom_id,
            status,
        ))
    }

    async fn set_archaeologist_status_if_pending(
        &mut self,
        archaeologist_id: ArchaeologistId,
        status: ModerationStatus,
    ) -> Result<bool, ModerationError> {
        self.check(FailPoint::ArchaeologistWrite)?;
        Ok(ModerationTables::set_if_pending(
            &mut self.working.archaeologists,
            &archaeologist_id,
            status,
        ))
    }

    async fn archaeologist_ids_linked_to_site(
        &mut self,
        site_id: SiteId,
    ) -> Result<Vec<ArchaeologistId>, ModerationError> {
        // BTreeSet iteration keeps ids ascending
        Ok(self
            .working
            .research_links
            .iter()
            .filter(|(_, linked_site)| *linked_site == site_id)
            .map(|(archaeologist_id, _)| *archaeologist_id)
            .collect())
    }

    async fn kingdom_has_other_referencing_site(
        &mut self,
        kingdom_id: KingdomId,
        excluding: SiteId,
    ) -> Result<bool, ModerationError> {
        let tables = &self.working;
        Ok(tables.sites.values().any(|site| {
            site.kingdom_id == Some(kingdom_id) && tables.is_surviving_site(site.site_id, excluding)
        }))
    }

    async fn archaeologist_has_other_link(
        &mut self,
        archaeologist_id: ArchaeologistId,
        excluding: SiteId,
    ) -> Result<bool, ModerationError> {
        let tables = &self.working;
        Ok(tables.research_links.iter().any(|(linked, site_id)| {
            *linked == archaeologist_id && tables.is_surviving_site(*site_id, excluding)
        }))
    }

    // Transactions hold the store-wide lock, so check-then-write is atomic here.
    async fn demote_kingdom_if_unreferenced(
        &mut self,
        kingdom_id: KingdomId,
        excluding: SiteId,
    ) -> Result<bool, ModerationError> {
        if self
            .kingdom_has_other_referencing_site(kingdom_id, excluding)
            .await?
        {
            return Ok(false);
        }
        self.set_kingdom_status_if_pending(kingdom_id, ModerationStatus::Rejected)
            .await
    }

    async fn demote_archaeologist_if_unlinked(
        &mut self,
        archaeologist_id: ArchaeologistId,
        excluding: SiteId,
    ) -> Result<bool, ModerationError> {
        if self
            .archaeologist_has_other_link(archaeologist_id, excluding)
            .await?
        {
            return Ok(false);
        }
        self.set_archaeologist_status_if_pending(archaeologist_id, ModerationStatus::Rejected)
            .await
    }

    async fn commit(mut self) -> Result<(), ModerationError> {
        self.check(FailPoint::Commit)?;
        *self.guard = std::mem::take(&mut self.working);
        Ok(())
    }
}
