//! End-to-end tests for the synchronization layer through `CoinwatchClient`,
//! driven by a scripted gateway and tokio's paused clock.

mod common;

use std::sync::Arc;
use std::time::Duration;

use coinwatch::domain::price_history::PricePoint;
use coinwatch::prelude::*;
use coinwatch::sync::history::RATE_LIMITED_MESSAGE;
use tokio::sync::Semaphore;

use common::{coin, settle, ScriptedGateway};

const MINUTE: Duration = Duration::from_secs(60);

fn client(gateway: Arc<ScriptedGateway>, tracked: &[&str]) -> CoinwatchClient {
    CoinwatchClient::builder()
        .gateway(gateway)
        .tracked(TrackedUniverse::new(tracked.iter().copied()).unwrap())
        .build()
        .unwrap()
}

#[tokio::test(start_paused = true)]
async fn bulk_refresh_populates_coins_in_upstream_order() {
    let gw = ScriptedGateway::new();
    gw.push_coins(Ok(vec![
        coin("btc", "Bitcoin", 50_000.0),
        coin("eth", "Ethereum", 3_000.0),
    ]));
    let mut client = client(gw.clone(), &["btc", "eth"]);

    client.start().await;
    settle().await;

    assert_eq!(
        client.coins().await,
        vec![
            coin("btc", "Bitcoin", 50_000.0),
            coin("eth", "Ethereum", 3_000.0)
        ]
    );
    client.stop();
}

#[tokio::test(start_paused = true)]
async fn polling_failure_keeps_previous_coins_and_recovers() {
    let gw = ScriptedGateway::new();
    gw.push_coins(Ok(vec![coin("btc", "Bitcoin", 50_000.0)]));
    gw.push_coins(Err(500));
    gw.push_coins(Ok(vec![coin("btc", "Bitcoin", 51_000.0)]));
    let mut client = client(gw.clone(), &["btc"]);

    client.start().await;
    settle().await;
    let first = client.store().snapshot().await;
    assert_eq!(first.coins()[0].current_price, 50_000.0);

    // Second tick fails: state is untouched, no error escapes.
    tokio::time::sleep(MINUTE + Duration::from_secs(1)).await;
    assert_eq!(gw.bulk_calls(), 2);
    assert_eq!(client.store().snapshot().await, first);
    assert_eq!(client.poll_status().failures, 1);
    assert_eq!(client.poll_state(), PollState::Polling);

    // Third tick succeeds.
    tokio::time::sleep(MINUTE).await;
    assert_eq!(gw.bulk_calls(), 3);
    assert_eq!(client.coins().await[0].current_price, 51_000.0);
    client.stop();
}

#[tokio::test(start_paused = true)]
async fn pinned_history_is_fetched_once() {
    let gw = ScriptedGateway::new();
    gw.push_coins(Ok(vec![coin("btc", "Bitcoin", 50_000.0)]));
    gw.set_history("btc", Ok(vec![(1000, 100.0), (2000, 110.0)]));
    let mut client = client(gw.clone(), &["btc"]);
    client.refresh_now().await.unwrap();

    assert!(client.pin("btc").await);
    let btc = Symbol::new("btc");
    let mut rx = client.view(&btc).unwrap().subscribe();
    rx.wait_for(|s| s.is_ready()).await.unwrap();

    let series = client.store().cached_history(&btc).await.unwrap();
    assert_eq!(
        series.points,
        vec![PricePoint::new(1000, 100.0), PricePoint::new(2000, 110.0)]
    );

    let again = client.store().ensure_history(&btc).await.unwrap();
    assert_eq!(again, series);
    assert_eq!(gw.history_calls("btc"), 1);
}

#[tokio::test(start_paused = true)]
async fn rate_limited_history_keeps_retrying_on_fixed_delay() {
    let gw = ScriptedGateway::new();
    gw.push_coins(Ok(vec![coin("xrp", "XRP", 0.6)]));
    gw.set_history("xrp", Err(429));
    let mut client = client(gw.clone(), &["xrp"]);
    client.refresh_now().await.unwrap();
    client.pin("xrp").await;

    let xrp = Symbol::new("xrp");
    let mut rx = client.view(&xrp).unwrap().subscribe();
    let failed = rx.wait_for(|s| s.is_failed()).await.unwrap().clone();
    assert!(matches!(
        failed,
        HistoryViewState::Failed { kind: FailureKind::RateLimited, ref message, .. }
            if message == RATE_LIMITED_MESSAGE
    ));

    for expected_calls in 2..=4 {
        tokio::time::sleep(MINUTE).await;
        settle().await;
        assert_eq!(gw.history_calls("xrp"), expected_calls);
        assert!(client.view(&xrp).unwrap().is_active());
    }

    // Upstream recovers: the next retry lands in Ready.
    gw.set_history("xrp", Ok(vec![(1, 0.6)]));
    rx.wait_for(|s| s.is_ready()).await.unwrap();
    assert_eq!(gw.history_calls("xrp"), 5);
}

#[tokio::test(start_paused = true)]
async fn one_failing_symbol_does_not_block_another() {
    let gw = ScriptedGateway::new();
    gw.push_coins(Ok(vec![
        coin("doge", "Dogecoin", 0.1),
        coin("link", "Chainlink", 15.0),
    ]));
    gw.set_history("doge", Err(503));
    gw.set_history("link", Ok(vec![(1, 15.0)]));
    let mut client = client(gw.clone(), &["doge", "link"]);
    client.refresh_now().await.unwrap();

    client.pin("doge").await;
    client.pin("link").await;

    let mut link = client.view(&Symbol::new("link")).unwrap().subscribe();
    link.wait_for(|s| s.is_ready()).await.unwrap();
    settle().await;
    assert!(client.view(&Symbol::new("doge")).unwrap().state().is_failed());

    let order: Vec<_> = client
        .pinned_views()
        .await
        .into_iter()
        .map(|v| v.symbol().to_string())
        .collect();
    assert_eq!(order, ["doge", "link"]);
}

#[tokio::test(start_paused = true)]
async fn unpin_during_fetch_leaves_no_view_behind() {
    let gate = Arc::new(Semaphore::new(0));
    let gw = ScriptedGateway::gated(gate.clone());
    gw.push_coins(Ok(vec![coin("ada", "Cardano", 0.5)]));
    gw.set_history("ada", Ok(vec![(1, 0.5)]));
    let mut client = client(gw.clone(), &["ada"]);
    client.refresh_now().await.unwrap();

    client.pin("ada").await;
    let ada = Symbol::new("ada");
    let rx = client.view(&ada).unwrap().subscribe();
    settle().await;
    assert_eq!(gw.history_calls("ada"), 1);

    assert!(client.unpin("ada").await);
    gate.add_permits(1);
    settle().await;

    assert!(client.view(&ada).is_none());
    assert!(!client.store().is_selected(&ada).await);
    assert!(rx.borrow().is_loading(), "no update reached the closed view");
}

#[tokio::test(start_paused = true)]
async fn search_is_a_read_only_projection() {
    let gw = ScriptedGateway::new();
    gw.push_coins(Ok(vec![
        coin("btc", "Bitcoin", 50_000.0),
        coin("bch", "Bitcoin Cash", 300.0),
        coin("eth", "Ethereum", 3_000.0),
    ]));
    let client = client(gw, &["btc", "bch", "eth"]);
    client.refresh_now().await.unwrap();

    let before = client.store().snapshot().await;
    let hits: Vec<_> = client
        .search("BITCOIN")
        .await
        .into_iter()
        .map(|c| c.symbol.to_string())
        .collect();
    assert_eq!(hits, ["btc", "bch"]);
    assert_eq!(client.store().snapshot().await, before);
}
