//! # Resume Documents
//!
//! The off-chain resume document, the digest anchored on-chain for it, and
//! the public directory view built from both.

use rc_08_content_store::hash_json_stable;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use shared_types::{Bytes32, Record};

/// Attachment name used when the uploader did not supply one.
pub const DEFAULT_ATTACHMENT_NAME: &str = "attachment";

/// Input of a resume upload.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeDraft {
    /// Display name.
    pub name: String,
    /// Headline.
    pub title: String,
    /// Location.
    pub location: String,
    /// Contact email.
    pub email: String,
    /// Contact phone.
    pub phone: String,
    /// Skills, already split.
    pub skills: Vec<String>,
    /// Free text.
    pub about: String,
    /// Content id of an already uploaded attachment.
    pub file_cid: Option<String>,
    /// Original file name of the attachment.
    pub attachment_name: Option<String>,
}

impl ResumeDraft {
    /// Splits a comma-separated skill list, dropping blanks.
    pub fn parse_skills(raw: &str) -> Vec<String> {
        raw.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// The document as pinned to content storage.
    pub fn to_document(&self) -> Value {
        let mut doc = Map::new();
        doc.insert(
            "basic".into(),
            json!({
                "name": self.name,
                "title": self.title,
                "location": self.location,
                "email": self.email,
                "phone": self.phone,
            }),
        );
        doc.insert("skills".into(), json!(self.skills));
        doc.insert("about".into(), json!(self.about));
        if let Some(cid) = &self.file_cid {
            doc.insert("fileCid".into(), json!(cid));
        }
        doc.insert(
            "attachments".into(),
            attachments(self.file_cid.as_deref(), self.attachment_name.as_deref()),
        );
        Value::Object(doc)
    }

    /// Name the document is pinned under.
    pub fn pin_name(&self) -> String {
        let base = if self.name.is_empty() { "resume" } else { self.name.as_str() };
        format!("{base}.json")
    }
}

fn attachments(file_cid: Option<&str>, name: Option<&str>) -> Value {
    match file_cid {
        Some(cid) => json!([{
            "cid": cid,
            "name": name.unwrap_or(DEFAULT_ATTACHMENT_NAME),
        }]),
        None => json!([]),
    }
}

/// Digest anchored on-chain for an uploaded document.
///
/// Covers the content ids only; `fileCid` is left out when there is no
/// attachment.
pub fn anchor_digest(json_cid: &str, file_cid: Option<&str>) -> Bytes32 {
    let mut anchor = Map::new();
    anchor.insert("jsonCid".into(), json!(json_cid));
    if let Some(file_cid) = file_cid {
        anchor.insert("fileCid".into(), json!(file_cid));
    }
    hash_json_stable(&Value::Object(anchor))
}

/// Adds `fileCid` and `attachments` to a fetched document that lacks them.
///
/// Returns true if the document changed.
pub fn fill_attachment(doc: &mut Value, file_cid: &str) -> bool {
    let Some(obj) = doc.as_object_mut() else {
        return false;
    };
    let mut changed = false;
    let has_file_cid = obj
        .get("fileCid")
        .and_then(Value::as_str)
        .is_some_and(|s| !s.is_empty());
    if !has_file_cid {
        obj.insert("fileCid".into(), json!(file_cid));
        changed = true;
    }
    let has_attachments = obj
        .get("attachments")
        .and_then(Value::as_array)
        .is_some_and(|a| !a.is_empty());
    if !has_attachments {
        obj.insert("attachments".into(), attachments(Some(file_cid), None));
        changed = true;
    }
    changed
}

/// A public record with whatever of its document could be fetched.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DirectoryEntry {
    /// The ledger record.
    pub record: Record,
    /// Known content id of the document.
    pub json_cid: Option<String>,
    /// `basic.name`, empty when unknown.
    pub name: String,
    /// `basic.title`, empty when unknown.
    pub title: String,
    /// `basic.location`, empty when unknown.
    pub location: String,
    /// Skills, empty when unknown.
    pub skills: Vec<String>,
}

impl DirectoryEntry {
    /// Builds an entry from a record and its fetched document, if any.
    pub fn new(record: Record, json_cid: Option<String>, doc: Option<&Value>) -> Self {
        let basic = doc.and_then(|d| d.get("basic"));
        let field = |key: &str| {
            basic
                .and_then(|b| b.get(key))
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string()
        };
        let skills = doc
            .and_then(|d| d.get("skills"))
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();
        Self {
            json_cid,
            name: field("name"),
            title: field("title"),
            location: field("location"),
            skills,
            record,
        }
    }
}

/// Case-insensitive substring filter over directory entries.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryFilter {
    /// Matches if any skill contains it.
    pub skill: Option<String>,
    /// Matches if the location contains it.
    pub location: Option<String>,
}

impl DirectoryFilter {
    /// Returns true if `entry` passes every set criterion.
    pub fn matches(&self, entry: &DirectoryEntry) -> bool {
        let skill_ok = match non_empty(&self.skill) {
            Some(q) => entry.skills.iter().any(|s| contains_ci(s, q)),
            None => true,
        };
        let location_ok = match non_empty(&self.location) {
            Some(q) => contains_ci(&entry.location, q),
            None => true,
        };
        skill_ok && location_ok
    }
}

fn non_empty(q: &Option<String>) -> Option<&str> {
    q.as_deref().filter(|q| !q.is_empty())
}

fn contains_ci(text: &str, query: &str) -> bool {
    !text.is_empty() && text.to_lowercase().contains(&query.to_lowercase())
}
