//! # Key Schema

use serde::{Deserialize, Serialize};

/// Set to `"1"` once a wallet connected successfully.
pub const CONNECTED_KEY: &str = "resumechain_connected";
/// Last seen contract address.
pub const CONTRACT_KEY: &str = "resumechain_contract";
/// Id of the last created resume.
pub const LAST_ID_KEY: &str = "resumechain_last_id";
/// Display name of the last created resume.
pub const LAST_NAME_KEY: &str = "resumechain_last_name";
/// Title of the last created resume.
pub const LAST_TITLE_KEY: &str = "resumechain_last_title";
/// Most recently uploaded JSON content id.
pub const LAST_JSON_CID_KEY: &str = "resumechain_last_json_cid";
/// Most recently uploaded attachment content id.
pub const LAST_FILE_CID_KEY: &str = "resumechain_last_file_cid";

/// Keys dropped when the contract address changes.
pub const DEPLOYMENT_SCOPED_KEYS: [&str; 3] = [LAST_ID_KEY, LAST_NAME_KEY, LAST_TITLE_KEY];

/// JSON content id key of resume `id`.
pub fn cid_by_id_key(id: u64) -> String {
    format!("resumechain_cid_by_id_{id}")
}

/// Attachment content id key of resume `id`.
pub fn file_by_id_key(id: u64) -> String {
    format!("resumechain_file_by_id_{id}")
}

/// The last resume created from this client.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastResume {
    /// Ledger id.
    pub id: u64,
    /// Display name; empty when unknown.
    pub name: String,
    /// Title; empty when unknown.
    pub title: String,
}
