//! Cascade Engine: approve or reject a site and propagate the decision to the
//! kingdom and archaeologists it references, in one transaction.
//!
//! Approval promotes every pending dependent. Rejection demotes a pending
//! dependent only when no other surviving site still references it.

use serde::Serialize;
use tracing::{debug, info};

use super::store::{ModerationStore, ModerationTx};
use super::{ModerationError, ModerationStatus};
use crate::common::{Actor, ArchaeologistId, SiteId};
use crate::domains::sites::Site;

/// Moderator decision on a site submission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Approve,
    Reject,
}

impl Decision {
    fn site_status(self) -> ModerationStatus {
        match self {
            Decision::Approve => ModerationStatus::Verified,
            Decision::Reject => ModerationStatus::Rejected,
        }
    }
}

impl std::fmt::Display for Decision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Decision::Approve => write!(f, "approve"),
            Decision::Reject => write!(f, "reject"),
        }
    }
}

/// What a cascade changed
#[derive(Debug, Clone, Serialize)]
pub struct CascadeOutcome {
    pub site: Site,
    pub kingdom_changed: bool,
    pub archaeologists_changed: Vec<ArchaeologistId>,
}

pub struct CascadeEngine<S> {
    store: S,
}

impl<S: ModerationStore> CascadeEngine<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Verify a site and promote its pending kingdom and archaeologists.
    pub async fn approve(
        &self,
        site_id: SiteId,
        actor: &Actor,
    ) -> Result<CascadeOutcome, ModerationError> {
        self.run(site_id, Decision::Approve, actor).await
    }

    /// Reject a site and demote dependents nothing else vouches for.
    pub async fn reject(
        &self,
        site_id: SiteId,
        actor: &Actor,
    ) -> Result<CascadeOutcome, ModerationError> {
        self.run(site_id, Decision::Reject, actor).await
    }

    async fn run(
        &self,
        site_id: SiteId,
        decision: Decision,
        actor: &Actor,
    ) -> Result<CascadeOutcome, ModerationError> {
        let mut tx = self.store.begin().await?;

        // Dropping `tx` on any early return rolls everything back.
        let site = tx
            .set_site_status(site_id, decision.site_status(), Some(actor.member_id()))
            .await?
            .ok_or(ModerationError::NotFound(site_id))?;

        let kingdom_changed = match site.kingdom_id {
            Some(kingdom_id) => {
                let affected = match decision {
                    Decision::Approve => {
                        tx.set_kingdom_status_if_pending(kingdom_id, ModerationStatus::Verified)
                            .await?
                    }
                    Decision::Reject => tx.demote_kingdom_if_unreferenced(kingdom_id, site_id).await?,
                };
                debug!(%site_id, %kingdom_id, %decision, affected, "Kingdom cascade step");
                affected
            }
            None => false,
        };

        let mut archaeologists_changed = Vec::new();
        for archaeologist_id in tx.archaeologist_ids_linked_to_site(site_id).await? {
            let affected = match decision {
                Decision::Approve => {
                    tx.set_archaeologist_status_if_pending(
                        archaeologist_id,
                        ModerationStatus::Verified,
                    )
                    .await?
                }
                Decision::Reject => {
                    tx.demote_archaeologist_if_unlinked(archaeologist_id, site_id)
                        .await?
                }
            };
            debug!(%site_id, %archaeologist_id, %decision, affected, "Archaeologist cascade step");
            if affected {
                archaeologists_changed.push(archaeologist_id);
            }
        }

        tx.commit().await?;

        info!(
            %site_id,
            %decision,
            moderator = %actor.member_id(),
            role = %actor.role(),
            kingdom_changed,
            archaeologists_changed = archaeologists_changed.len(),
            "Site moderated"
        );

        Ok(CascadeOutcome {
            site,
            kingdom_changed,
            archaeologists_changed,
        })
    }
}
