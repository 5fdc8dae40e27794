use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A file attached to another record, identified by `table_key` + `object_key`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AttachmentModel {
    pub group_key: Option<Uuid>,
    pub attachment_id: Option<Uuid>,
    pub table_key: Option<String>,
    pub object_key: Option<Uuid>,
    pub file_name: Option<String>,
    pub file_ext: Option<String>,
    pub attachment_type: Option<String>,
    pub is_archived: bool,
    pub origin_attachment_id: Option<Uuid>,
    pub view_internal: bool,
    pub view_external: bool,
    pub erp_key: Option<String>,
    pub created: Option<String>,
    pub created_user_id: Option<Uuid>,
}
