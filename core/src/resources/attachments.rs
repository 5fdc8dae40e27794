use std::path::Path;

use bytes::Bytes;
use uuid::Uuid;

use crate::client::NO_BODY;
use crate::error::ApiError;
use crate::http::{HttpMethod, QueryOptions};
use crate::models::AttachmentModel;
use crate::response::LockstepResponse;

const BASE: &str = "/api/v1/Attachments";

resource! {
    /// Files attached to other records.
    AttachmentsClient => BASE, AttachmentModel {
        retrieve: retrieve_attachment,
        update: update_attachment,
        delete: delete_attachment,
        query: query_attachments,
    }
}

impl AttachmentsClient<'_> {
    /// Upload a file and attach it to the record identified by `table_name`
    /// (for example `Invoices`) and `object_id`.
    pub async fn upload_attachment(
        &self,
        table_name: &str,
        object_id: Uuid,
        attachment_type: Option<&str>,
        file_path: impl AsRef<Path>,
    ) -> Result<LockstepResponse<Vec<AttachmentModel>>, ApiError> {
        let query = QueryOptions::new()
            .with("tableName", table_name)
            .with("objectId", object_id)
            .opt("attachmentType", attachment_type);
        self.api
            .file_upload(HttpMethod::Post, BASE, query, file_path)
            .await
    }

    /// Download the stored file contents.
    pub async fn download_attachment_file(&self, id: Uuid) -> Result<LockstepResponse<Bytes>, ApiError> {
        self.api
            .request_blob(HttpMethod::Get, &format!("{BASE}/{id}/download"), QueryOptions::new(), NO_BODY)
            .await
    }
}
