//! Live API tests. Run with: `cargo test --features online -- --nocapture`
#![cfg(feature = "online")]

use cml_rs::{Client, Period};

#[test]
fn stats_for_known_player() {
    let cli = Client::default();
    let stats = cli.stats_parsed("Lynx Titan").unwrap();
    assert!(stats.skills.len() >= 24);
    assert!(stats.timestamp > 0);
}

#[test]
fn track_week() {
    let cli = Client::default();
    let track = cli.track_parsed("Lynx Titan", Period::Week.seconds()).unwrap();
    assert!(track.gains.len() >= 24);
}

#[test]
fn search_fragment() {
    let cli = Client::default();
    let found = cli.search_parsed("duk").unwrap();
    assert_eq!(found.count, found.names.len());
}
