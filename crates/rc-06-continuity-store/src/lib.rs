//! # RC-06 Continuity Store
//!
//! A flat string-to-string cache that lets the client pick up where it left
//! off: whether a wallet was connected, which contract it talked to, the last
//! resume it created and the content ids attached to each resume.
//!
//! **Subsystem ID:** 06
//!
//! ## Key Schema
//!
//! | Key | Value |
//! |-----|-------|
//! | `resumechain_connected` | `"1"` after a successful wallet connection |
//! | `resumechain_contract` | last seen contract address |
//! | `resumechain_last_id` / `_last_name` / `_last_title` | last created resume |
//! | `resumechain_cid_by_id_{id}` | JSON content id of resume `id` |
//! | `resumechain_file_by_id_{id}` | attachment content id of resume `id` |
//! | `resumechain_last_json_cid` / `_last_file_cid` | most recent uploads |
//!
//! A change of contract address clears the `resumechain_last_*` resume keys,
//! since ids from one deployment mean nothing on another.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

pub use adapters::{FileContinuityStore, MemoryContinuityStore};
pub use domain::*;
pub use ports::ContinuityStore;
pub use service::Continuity;
