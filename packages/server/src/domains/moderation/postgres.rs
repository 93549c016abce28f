//! Postgres-backed Moderation Store.
//!
//! Lock order inside a cascade is site row, kingdom row, then archaeologist
//! rows by ascending id. Both approval and rejection follow it.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};

use super::store::{ModerationStore, ModerationTx};
use super::{ModerationError, ModerationStatus};
use crate::common::{ArchaeologistId, KingdomId, MemberId, SiteId};
use crate::domains::sites::Site;

#[derive(Clone)]
pub struct PgModerationStore {
    pool: PgPool,
}

impl PgModerationStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ModerationStore for PgModerationStore {
    type Tx = PgModerationTx;

    async fn begin(&self) -> Result<Self::Tx, ModerationError> {
        let tx = self.pool.begin().await?;
        Ok(PgModerationTx { tx })
    }
}

/// One moderation transaction. Rolled back on drop unless committed.
pub struct PgModerationTx {
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl ModerationTx for PgModerationTx {
    async fn get_site(&mut self, site_id: SiteId) -> Result<Option<Site>, ModerationError> {
        let site = sqlx::query_as::<_, Site>("SELECT * FROM sites WHERE site_id = $1")
            .bind(site_id)
            .fetch_optional(&mut *self.tx)
            .await?;
        Ok(site)
    }

    async fn set_site_status(
        &mut self,
        site_id: SiteId,
        status: ModerationStatus,
        reviewed_by: Option<MemberId>,
    ) -> Result<Option<Site>, ModerationError> {
        let site = sqlx::query_as::<_, Site>(
            r#"
            UPDATE sites SET
                verification_status = $2,
                reviewed_by = COALESCE($3, reviewed_by),
                reviewed_at = NOW(),
                updated_at = NOW()
            WHERE site_id = $1
            RETURNING *
            "#,
        )
        .bind(site_id)
        .bind(status)
        .bind(reviewed_by)
        .fetch_optional(&mut *self.tx)
        .await?;
        Ok(site)
    }

    async fn set_kingdom_status_if_pending(
        &mut self,
        kingdom_id: KingdomId,
        status: ModerationStatus,
    ) -> Result<bool, ModerationError> {
        let result = sqlx::query(
            r#"
            UPDATE kingdoms SET
                validation_status = $2,
                updated_at = NOW()
            WHERE kingdom_id = $1 AND validation_status = 'pending'
            "#,
        )
        .bind(kingdom_id)
        .bind(status)
        .execute(&mut *self.tx)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn set_archaeologist_status_if_pending(
        &mut self,
        archaeologist_id: ArchaeologistId,
        status: ModerationStatus,
    ) -> Result<bool, ModerationError> {
        let result = sqlx::query(
            r#"
            UPDATE archaeologists SET
                validation_status = $2,
                updated_at = NOW()
            WHERE archaeologist_id = $1 AND validation_status = 'pending'
            "#,
        )
        .bind(archaeologist_id)
        .bind(status)
        .execute(&mut *self.tx)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn archaeologist_ids_linked_to_site(
        &mut self,
        site_id: SiteId,
    ) -> Result<Vec<ArchaeologistId>, ModerationError> {
        let ids = sqlx::query_scalar::<_, ArchaeologistId>(
            r#"
            SELECT archaeologist_id FROM research_links
            WHERE site_id = $1
            ORDER BY archaeologist_id ASC
            "#,
        )
        .bind(site_id)
        .fetch_all(&mut *self.tx)
        .await?;
        Ok(ids)
    }

    async fn kingdom_has_other_referencing_site(
        &mut self,
        kingdom_id: KingdomId,
        excluding: SiteId,
    ) -> Result<bool, ModerationError> {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM sites
                WHERE kingdom_id = $1
                  AND site_id <> $2
                  AND verification_status <> 'rejected'
            )
            "#,
        )
        .bind(kingdom_id)
        .bind(excluding)
        .fetch_one(&mut *self.tx)
        .await?;
        Ok(exists)
    }

    async fn archaeologist_has_other_link(
        &mut self,
        archaeologist_id: ArchaeologistId,
        excluding: SiteId,
    ) -> Result<bool, ModerationError> {
        let exists = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM research_links rl
                JOIN sites s ON s.site_id = rl.site_id
                WHERE rl.archaeologist_id = $1
                  AND rl.site_id <> $2
                  AND s.verification_status <> 'rejected'
            )
            "#,
        )
        .bind(archaeologist_id)
        .bind(excluding)
        .fetch_one(&mut *self.tx)
        .await?;
        Ok(exists)
    }

    async fn demote_kingdom_if_unreferenced(
        &mut self,
        kingdom_id: KingdomId,
        excluding: SiteId,
    ) -> Result<bool, ModerationError> {
        // Serialize concurrent rejections on the kingdom row. The guarded
        // update below runs as a new statement, so under read committed it
        // sees site rows committed by whoever held the lock before us.
        let locked = sqlx::query_scalar::<_, KingdomId>(
            "SELECT kingdom_id FROM kingdoms WHERE kingdom_id = $1 FOR UPDATE",
        )
        .bind(kingdom_id)
        .fetch_optional(&mut *self.tx)
        .await?;
        if locked.is_none() {
            return Ok(false);
        }

        let result = sqlx::query(
            r#"
            UPDATE kingdoms SET
                validation_status = 'rejected',
                updated_at = NOW()
            WHERE kingdom_id = $1
              AND validation_status = 'pending'
              AND NOT EXISTS (
                  SELECT 1 FROM sites
                  WHERE kingdom_id = $1
                    AND site_id <> $2
                    AND verification_status <> 'rejected'
              )
            "#,
        )
        .bind(kingdom_id)
        .bind(excluding)
        .execute(&mut *self.tx)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn demote_archaeologist_if_unlinked(
        &mut self,
        archaeologist_id: ArchaeologistId,
        excluding: SiteId,
    ) -> Result<bool, ModerationError> {
        let locked = sqlx::query_scalar::<_, ArchaeologistId>(
            "SELECT archaeologist_id FROM archaeologists WHERE archaeologist_id = $1 FOR UPDATE",
        )
        .bind(archaeologist_id)
        .fetch_optional(&mut *self.tx)
        .await?;
        if locked.is_none() {
            return Ok(false);
        }

        let result = sqlx::query(
            r#"
            UPDATE archaeologists SET
                validation_status = 'rejected',
                updated_at = NOW()
            WHERE archaeologist_id = $1
              AND validation_status = 'pending'
              AND NOT EXISTS (
                  SELECT 1 FROM research_links rl
                  JOIN sites s ON s.site_id = rl.site_id
                  WHERE rl.archaeologist_id = $1
                    AND rl.site_id <> $2
                    AND s.verification_status <> 'rejected'
              )
            "#,
        )
        .bind(archaeologist_id)
        .bind(excluding)
        .execute(&mut *self.tx)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn commit(self) -> Result<(), ModerationError> {
        self.tx.commit().await?;
        Ok(())
    }
}
