//! Repository for the `document_headers` table.

use docflow_core::types::DbId;
use docflow_core::DocKind;
use sqlx::PgPool;

use crate::models::document::{CreateDocument, DocumentHeader};

/// Column list for document_headers queries.
const COLUMNS: &str = "rec_id, business_id, kind, status_id, revision, \
    current_approver, current_index, wf_trans_id, \
    created_by, modified_by, created_date, modified_date";

/// Read and insert operations for document headers.
///
/// All workflow mutations go through [`TransitionRepo`](super::TransitionRepo);
/// this repository only creates drafts and reads snapshots.
pub struct DocumentRepo;

impl DocumentRepo {
    /// Insert a new draft header, assigning its business id from the
    /// rec_id sequence (e.g. `PR0001`), and return the created row.
    pub async fn create(
        pool: &PgPool,
        kind: DocKind,
        input: &CreateDocument,
    ) -> Result<DocumentHeader, sqlx::Error> {
        let query = format!(
            "WITH next AS (
                SELECT nextval('document_headers_rec_id_seq') AS id
             )
             INSERT INTO document_headers
                (rec_id, business_id, kind, created_by, modified_by)
             SELECT id, $1 || lpad(id::text, 4, '0'), $2, $3, $3 FROM next
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, DocumentHeader>(&query)
            .bind(kind.business_prefix())
            .bind(kind.as_str())
            .bind(&input.created_by)
            .fetch_one(pool)
            .await
    }

    /// Fetch a header snapshot by its physical id, scoped to a kind.
    ///
    /// The kind is part of the lookup so a purchase-request endpoint can
    /// never act on a sales invoice that happens to share a rec_id space.
    pub async fn find_by_id(
        pool: &PgPool,
        kind: DocKind,
        rec_id: DbId,
    ) -> Result<Option<DocumentHeader>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM document_headers WHERE rec_id = $1 AND kind = $2");
        sqlx::query_as::<_, DocumentHeader>(&query)
            .bind(rec_id)
            .bind(kind.as_str())
            .fetch_optional(pool)
            .await
    }

}
