//! Read-side repository for the `wf_trans` audit table.

use sqlx::PgPool;

use crate::models::wf_trans::WfTrans;

/// Column list for wf_trans queries.
const COLUMNS: &str =
    "wf_trans_id, wf_form_id, ref_id, chain_index, user_id, action, action_date, notes";

/// Query operations over the append-only workflow audit trail.
///
/// Rows are only ever inserted by the stored transition functions; there
/// is deliberately no insert or update here.
pub struct WfTransRepo;

impl WfTransRepo {
    /// Ordered history of workflow actions for one document, oldest first.
    pub async fn history(
        pool: &PgPool,
        ref_id: &str,
        wf_form_id: i32,
    ) -> Result<Vec<WfTrans>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM wf_trans
             WHERE ref_id = $1 AND wf_form_id = $2
             ORDER BY action_date ASC, wf_trans_id ASC"
        );
        sqlx::query_as::<_, WfTrans>(&query)
            .bind(ref_id)
            .bind(wf_form_id)
            .fetch_all(pool)
            .await
    }

    /// Count audit rows for a document, for event-per-transition assertions.
    pub async fn count_for_ref(
        pool: &PgPool,
        ref_id: &str,
        wf_form_id: i32,
    ) -> Result<i64, sqlx::Error> {
        let row: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM wf_trans WHERE ref_id = $1 AND wf_form_id = $2",
        )
        .bind(ref_id)
        .bind(wf_form_id)
        .fetch_one(pool)
        .await?;
        Ok(row.0)
    }
}
