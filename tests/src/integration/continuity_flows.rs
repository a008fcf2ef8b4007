//! # Continuity Flows
//!
//! What a client remembers across restarts through the file-backed store.

#[cfg(test)]
mod tests {
    use crate::fixtures::{signer, World, OWNER_KEY};
    use client_runtime::ResumeDraft;
    use rc_06_continuity_store::{
        cid_by_id_key, ContinuityError, ContinuityStore, FileContinuityStore, LastResume,
        CONTRACT_KEY, LAST_JSON_CID_KEY,
    };
    use shared_types::Address;
    use std::sync::Arc;

    fn draft() -> ResumeDraft {
        ResumeDraft {
            name: "Ada".into(),
            title: "Engineer".into(),
            skills: ResumeDraft::parse_skills("Rust, Solidity,, "),
            file_cid: Some("bafyattachment".into()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_reload_restores_last_resume_and_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("continuity.json");
        let owner = signer(OWNER_KEY).address();
        let world = World::new(owner);

        let published = {
            let store = Arc::new(FileContinuityStore::open(&path).unwrap());
            let client = world.client(Some(signer(OWNER_KEY)), true, store);
            client.remember_connection().unwrap();
            client.publish_resume(&draft(), true).await.unwrap()
        };

        let store = Arc::new(FileContinuityStore::open(&path).unwrap());
        let client = world.client(Some(signer(OWNER_KEY)), true, store);
        assert!(client.continuity().was_connected().unwrap());
        assert_eq!(
            client.continuity().last_resume().unwrap(),
            Some(LastResume {
                id: 1,
                name: "Ada".into(),
                title: "Engineer".into(),
            })
        );

        let doc = client.load_resume_document(Some(1)).await.unwrap().unwrap();
        assert_eq!(doc["skills"], serde_json::json!(["Rust", "Solidity"]));
        assert_eq!(doc["fileCid"], "bafyattachment");
        assert_eq!(
            client.load_resume_document(None).await.unwrap(),
            Some(doc)
        );
        assert_eq!(
            client.continuity().json_cid_for(Some(1)).unwrap(),
            Some(published.json_cid)
        );
    }

    #[tokio::test]
    async fn test_contract_change_clears_only_scoped_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("continuity.json");
        let owner = signer(OWNER_KEY).address();

        let first = World::new(owner);
        let store = Arc::new(FileContinuityStore::open(&path).unwrap());
        let client = first.client(Some(signer(OWNER_KEY)), true, store);
        client.remember_connection().unwrap();
        let published = client.publish_resume(&draft(), false).await.unwrap();

        let redeployed = World::with_contract(Address::new([0xdd; 20]), owner);
        let store = Arc::new(FileContinuityStore::open(&path).unwrap());
        let client = redeployed.client(Some(signer(OWNER_KEY)), true, store.clone());
        client.remember_connection().unwrap();

        assert!(client.continuity().last_resume().unwrap().is_none());
        assert_eq!(
            store.get(CONTRACT_KEY).unwrap(),
            Some(Address::new([0xdd; 20]).to_hex())
        );
        assert_eq!(
            store.get(LAST_JSON_CID_KEY).unwrap(),
            Some(published.json_cid.clone())
        );
        assert_eq!(store.get(&cid_by_id_key(1)).unwrap(), Some(published.json_cid));

        // Reconnecting to the same deployment keeps what was stored since.
        client.publish_resume(&draft(), false).await.unwrap();
        client.remember_connection().unwrap();
        assert_eq!(client.continuity().last_resume().unwrap().map(|r| r.id), Some(1));
    }

    #[test]
    fn test_corrupt_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("continuity.json");
        std::fs::write(&path, b"[\"not\", \"an\", \"object\"]").unwrap();

        let err = FileContinuityStore::open(&path).err().unwrap();
        assert!(matches!(err, ContinuityError::Corrupt { .. }));
    }
}
