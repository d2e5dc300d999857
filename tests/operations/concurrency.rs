//! The shared handle under parallel callers.

use crate::common::*;
use incidentdb::SharedIncidentDb;
use incidentdb_core::Client;
use serde_json::json;
use std::collections::BTreeSet;
use std::sync::{Arc, Barrier};
use std::thread;

#[test]
fn parallel_creates_get_distinct_dense_ids() {
    let shared = SharedIncidentDb::new(create_db());
    let threads = 8;
    let per_thread = 25;
    let barrier = Arc::new(Barrier::new(threads));

    let handles: Vec<_> = (0..threads)
        .map(|t| {
            let shared = shared.clone();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                (0..per_thread)
                    .map(|i| {
                        let reply = shared.invoke("create_client", client_args((t * 1000 + i) as u64));
                        reply["client_id"].as_str().unwrap().to_string()
                    })
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let ids: BTreeSet<u64> = handles
        .into_iter()
        .flat_map(|h| h.join().unwrap())
        .map(|id| id.parse().unwrap())
        .collect();
    let total = (threads * per_thread) as u64;
    assert_eq!(ids, (1..=total).collect::<BTreeSet<_>>());
    assert_eq!(shared.with(|db| db.store().table::<Client>().len()), total as usize);
}

#[test]
fn racing_duplicates_admit_exactly_one() {
    let shared = SharedIncidentDb::new(create_db());
    let barrier = Arc::new(Barrier::new(6));

    let handles: Vec<_> = (0..6)
        .map(|_| {
            let shared = shared.clone();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                shared.invoke("create_client", client_args(7))
            })
        })
        .collect();

    let replies: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    let winners = replies.iter().filter(|r| r["success"] == true).count();
    assert_eq!(winners, 1);
    assert!(replies
        .iter()
        .filter(|r| r.get("success").is_none())
        .all(|r| r["error"] == json!("registration_number REG-7 already exists")));
}
