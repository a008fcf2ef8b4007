//! # Access Flows
//!
//! Owner publishes, viewers read the record as themselves and decrypt the
//! caller-scoped access flag through the shared relayer session.

#[cfg(test)]
mod tests {
    use crate::fixtures::{signer, World, OWNER_KEY, VIEWER_KEY};
    use client_runtime::{anchor_digest, ResumeDraft};
    use rc_06_continuity_store::MemoryContinuityStore;
    use serde_json::json;
    use shared_types::{Handle, LedgerCall, MockLedger, U256};
    use std::sync::Arc;

    fn draft(name: &str) -> ResumeDraft {
        ResumeDraft {
            name: name.into(),
            title: "Engineer".into(),
            skills: vec!["Rust".into()],
            about: format!("About {name}"),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_owner_decrypts_own_access_flag() {
        let owner = signer(OWNER_KEY).address();
        let world = World::new(owner);
        let client = world.client(
            Some(signer(OWNER_KEY)),
            true,
            Arc::new(MemoryContinuityStore::new()),
        );

        let published = client.publish_resume(&draft("Ada"), false).await.unwrap();
        assert_eq!(published.content_hash, anchor_digest(&published.json_cid, None));

        let record = client.resume(1).await.unwrap();
        let handle = MockLedger::access_handle(1, &owner).canonical_hex();
        world.session.set_response(json!({ handle.clone(): true }));

        client.start_session().await.unwrap().unwrap();
        assert_eq!(client.has_access(&record).await.unwrap(), Some(true));

        let calls = world.session.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].user_address, owner);
        assert_eq!(calls[0].requests[0].handle, handle);
    }

    #[tokio::test]
    async fn test_viewer_gains_and_loses_access() {
        let owner = signer(OWNER_KEY).address();
        let viewer = signer(VIEWER_KEY).address();
        let world = World::new(owner);
        let owner_client = world.client(
            Some(signer(OWNER_KEY)),
            true,
            Arc::new(MemoryContinuityStore::new()),
        );
        let viewer_client = world.client(
            Some(signer(VIEWER_KEY)),
            false,
            Arc::new(MemoryContinuityStore::new()),
        );
        owner_client.publish_resume(&draft("Ada"), false).await.unwrap();
        viewer_client.start_session().await.unwrap().unwrap();

        // Without a grant the viewer reads a null handle and nothing is sent.
        let record = viewer_client.resume(1).await.unwrap();
        assert_eq!(record.caller_access, Handle::NULL);
        assert_eq!(viewer_client.has_access(&record).await.unwrap(), None);
        assert!(world.session.calls().is_empty());

        owner_client.writes().grant_access(1, viewer).await.unwrap().unwrap();
        let record = viewer_client.resume(1).await.unwrap();
        let handle = MockLedger::access_handle(1, &viewer).canonical_hex();
        assert_eq!(record.caller_access.canonical_hex(), handle);

        world.session.set_response(json!({ handle.clone(): true }));
        assert_eq!(viewer_client.has_access(&record).await.unwrap(), Some(true));
        assert_eq!(world.session.calls()[0].user_address, viewer);

        owner_client.writes().revoke_access(1, viewer).await.unwrap().unwrap();
        let record = viewer_client.resume(1).await.unwrap();
        assert!(record.caller_access.is_null());
        assert_eq!(
            world.ledger.submitted().last(),
            Some(&LedgerCall::RevokeAccess {
                resume_id: 1,
                viewer
            })
        );
    }

    #[tokio::test]
    async fn test_viewer_cannot_write() {
        let owner = signer(OWNER_KEY).address();
        let world = World::new(owner);
        let viewer_client = world.client(
            Some(signer(VIEWER_KEY)),
            false,
            Arc::new(MemoryContinuityStore::new()),
        );
        assert!(viewer_client.publish_resume(&draft("Eve"), true).await.is_err());
        assert!(viewer_client
            .writes()
            .grant_access(1, owner)
            .await
            .unwrap()
            .is_none());
        assert!(world.ledger.submitted().is_empty());
        assert!(world.content.is_empty());
    }

    #[tokio::test]
    async fn test_listings_split_public_and_owned() {
        let owner = signer(OWNER_KEY).address();
        let world = World::new(owner);
        let owner_client = world.client(
            Some(signer(OWNER_KEY)),
            true,
            Arc::new(MemoryContinuityStore::new()),
        );
        let anonymous = world.client(None, false, Arc::new(MemoryContinuityStore::new()));

        owner_client.publish_resume(&draft("Ada"), true).await.unwrap();
        owner_client.publish_resume(&draft("Grace"), false).await.unwrap();
        owner_client.publish_resume(&draft("Linus"), true).await.unwrap();

        let public: Vec<u64> = anonymous
            .public_resumes()
            .await
            .unwrap()
            .iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(public, vec![1, 3]);

        let mine: Vec<u64> = owner_client
            .my_resumes()
            .await
            .unwrap()
            .iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(mine, vec![1, 2, 3]);
        assert!(anonymous.my_resumes().await.unwrap().is_empty());

        // Public listings are read anonymously, so no access flag leaks.
        assert!(anonymous
            .public_resumes()
            .await
            .unwrap()
            .iter()
            .all(|r| r.caller_access.is_null()));
    }

    #[tokio::test]
    async fn test_endorsement_counter_decrypts() {
        let owner = signer(OWNER_KEY).address();
        let world = World::new(owner);
        let client = world.client(
            Some(signer(OWNER_KEY)),
            true,
            Arc::new(MemoryContinuityStore::new()),
        );
        client.publish_resume(&draft("Ada"), true).await.unwrap();
        let section = json!({ "exp": { "company": "Analytical Engines", "years": 3 } });
        let (section_hash, _) = client.upsert_section(1, &section).await.unwrap().unwrap();

        let handle = client
            .scanner()
            .encrypted_endorsement_count(1, section_hash)
            .await
            .unwrap();
        assert!(!handle.is_null());

        world
            .session
            .set_response(json!({ handle.canonical_hex(): "5" }));
        client.start_session().await.unwrap().unwrap();
        assert_eq!(
            client.endorsement_count(1, section_hash).await.unwrap(),
            Some(U256::from(5u64))
        );

        // Unknown sections have a null counter and decrypt to nothing.
        assert_eq!(
            client
                .endorsement_count(1, shared_types::Bytes32([7; 32]))
                .await
                .unwrap(),
            None
        );
    }
}
