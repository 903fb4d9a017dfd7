//! Tests for the page loader.
//!
//! The loader spawns onto a runtime handle and is polled from the calling
//! thread, the same way the UI drives it, so these are plain `#[test]`s with a
//! dedicated runtime rather than `#[tokio::test]`s.

use std::time::{Duration, Instant};

use tokio::runtime::Runtime;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::*;
use crate::config::GalleryConfig;

fn runtime() -> Runtime {
    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .unwrap()
}

fn page_json(ids: &[&str], total: u64) -> serde_json::Value {
    let cards: Vec<serde_json::Value> = ids
        .iter()
        .map(|id| {
            serde_json::json!({
                "id": id,
                "name": format!("Card {id}"),
                "images": {
                    "small": format!("https://img/{id}.png"),
                    "large": format!("https://img/{id}_hires.png")
                },
                "set": { "name": "Base" },
                "types": ["Colorless"]
            })
        })
        .collect();
    serde_json::json!({ "data": cards, "totalCount": total })
}

fn mock_page(page: u32, template: ResponseTemplate) -> Mock {
    Mock::given(method("GET"))
        .and(path("/cards"))
        .and(query_param("page", page.to_string()))
        .respond_with(template)
}

fn loader_for(rt: &Runtime, server: &MockServer) -> PageLoader {
    let config = GalleryConfig::default().with_base_url(server.uri());
    let client = PokemonTcgClient::new(&config).unwrap();
    PageLoader::new(client, rt.handle().clone())
}

/// Poll until `done` holds for the collected outcomes, or fail after 5s.
fn poll_until(
    loader: &mut PageLoader,
    mut done: impl FnMut(&PageLoader, &[PageOutcome]) -> bool,
) -> Vec<PageOutcome> {
    let deadline = Instant::now() + Duration::from_secs(5);
    let mut outcomes = Vec::new();
    loop {
        outcomes.extend(loader.poll());
        if done(&*loader, &outcomes) {
            return outcomes;
        }
        assert!(
            Instant::now() < deadline,
            "timed out waiting for loader, got {outcomes:?}"
        );
        std::thread::sleep(Duration::from_millis(10));
    }
}

fn ids(cards: &[Card]) -> Vec<&str> {
    cards.iter().map(|c| c.id.as_str()).collect()
}

#[test]
fn first_load_fetches_and_records_total() {
    let rt = runtime();
    let server = rt.block_on(MockServer::start());
    rt.block_on(
        mock_page(1, ResponseTemplate::new(200).set_body_json(page_json(&["a", "b"], 25)))
            .expect(1)
            .mount(&server),
    );

    let mut loader = loader_for(&rt, &server);
    assert_eq!(loader.total_pages(), None);
    assert_eq!(loader.navigate(1), PageRequest::Pending);

    let outcomes = poll_until(&mut loader, |_, o| !o.is_empty());
    match &outcomes[0] {
        PageOutcome::Loaded { page, cards } => {
            assert_eq!(*page, 1);
            assert_eq!(ids(cards), vec!["a", "b"]);
        }
        other => panic!("expected loaded page, got {other:?}"),
    }
    assert_eq!(loader.cache().total_count(), Some(25));
    assert_eq!(loader.total_pages(), Some(3));
    assert!(loader.cache().contains(1));
}

#[test]
fn cached_page_is_served_without_network() {
    let rt = runtime();
    let server = rt.block_on(MockServer::start());
    rt.block_on(
        mock_page(1, ResponseTemplate::new(200).set_body_json(page_json(&["a"], 5)))
            .expect(1)
            .mount(&server),
    );

    let mut loader = loader_for(&rt, &server);
    loader.load_page(1);
    poll_until(&mut loader, |l, _| l.cache().contains(1));

    match loader.load_page(1) {
        PageRequest::Cached(cards) => assert_eq!(ids(&cards), vec!["a"]),
        PageRequest::Pending => panic!("cached page should not be fetched again"),
    }
    match loader.navigate(1) {
        PageRequest::Cached(cards) => assert_eq!(ids(&cards), vec!["a"]),
        PageRequest::Pending => panic!("cached page should not be fetched again"),
    }

    let requests = rt.block_on(server.received_requests()).unwrap();
    assert_eq!(requests.len(), 1);
}

#[test]
fn navigating_away_cancels_previous_request() {
    let rt = runtime();
    let server = rt.block_on(MockServer::start());
    rt.block_on(
        mock_page(
            1,
            ResponseTemplate::new(200)
                .set_body_json(page_json(&["slow"], 20))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server),
    );
    rt.block_on(
        mock_page(2, ResponseTemplate::new(200).set_body_json(page_json(&["fast"], 20)))
            .mount(&server),
    );

    let mut loader = loader_for(&rt, &server);
    assert_eq!(loader.navigate(1), PageRequest::Pending);
    assert_eq!(loader.navigate(2), PageRequest::Pending);

    let outcomes = poll_until(&mut loader, |_, o| !o.is_empty());
    assert_eq!(
        outcomes,
        vec![PageOutcome::Loaded {
            page: 2,
            cards: loader.cache().get(2).unwrap().to_vec(),
        }]
    );

    // The aborted page 1 request never produces an outcome or a cache entry
    std::thread::sleep(Duration::from_millis(200));
    assert!(loader.poll().is_empty());
    assert!(!loader.cache().contains(1));
}

#[test]
fn loading_another_page_cancels_previous_request() {
    let rt = runtime();
    let server = rt.block_on(MockServer::start());
    rt.block_on(
        mock_page(
            1,
            ResponseTemplate::new(200)
                .set_body_json(page_json(&["slow"], 20))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&server),
    );
    rt.block_on(
        mock_page(2, ResponseTemplate::new(200).set_body_json(page_json(&["fast"], 20)))
            .mount(&server),
    );

    let mut loader = loader_for(&rt, &server);
    assert_eq!(loader.load_page(1), PageRequest::Pending);
    assert_eq!(loader.load_page(2), PageRequest::Pending);

    let outcomes = poll_until(&mut loader, |_, o| !o.is_empty());
    assert!(matches!(outcomes[..], [PageOutcome::Loaded { page: 2, .. }]));

    std::thread::sleep(Duration::from_millis(200));
    assert!(loader.poll().is_empty());
    assert!(!loader.cache().contains(1));
}

#[test]
fn failed_primary_load_reports_failure() {
    let rt = runtime();
    let server = rt.block_on(MockServer::start());
    rt.block_on(mock_page(1, ResponseTemplate::new(500)).mount(&server));

    let mut loader = loader_for(&rt, &server);
    loader.navigate(1);

    let outcomes = poll_until(&mut loader, |_, o| !o.is_empty());
    assert_eq!(outcomes, vec![PageOutcome::Failed { page: 1 }]);
    assert!(loader.cache().is_empty());
}

#[test]
fn empty_page_is_reported_but_not_cached() {
    let rt = runtime();
    let server = rt.block_on(MockServer::start());
    rt.block_on(
        mock_page(1, ResponseTemplate::new(200).set_body_json(page_json(&[], 0))).mount(&server),
    );

    let mut loader = loader_for(&rt, &server);
    loader.navigate(1);

    let outcomes = poll_until(&mut loader, |_, o| !o.is_empty());
    assert_eq!(
        outcomes,
        vec![PageOutcome::Loaded {
            page: 1,
            cards: Vec::new()
        }]
    );
    assert!(!loader.cache().contains(1));
}

#[test]
fn navigation_prefetches_next_page_once_total_is_known() {
    let rt = runtime();
    let server = rt.block_on(MockServer::start());
    rt.block_on(
        mock_page(1, ResponseTemplate::new(200).set_body_json(page_json(&["p1"], 25)))
            .mount(&server),
    );
    rt.block_on(
        mock_page(2, ResponseTemplate::new(200).set_body_json(page_json(&["p2"], 25)))
            .mount(&server),
    );
    rt.block_on(
        mock_page(3, ResponseTemplate::new(200).set_body_json(page_json(&["p3"], 25)))
            .mount(&server),
    );

    let mut loader = loader_for(&rt, &server);

    // Total unknown on the first navigation: nothing to prefetch yet
    loader.navigate(1);
    poll_until(&mut loader, |_, o| !o.is_empty());
    assert!(!loader.cache().contains(2));

    loader.navigate(2);
    let outcomes = poll_until(&mut loader, |l, o| !o.is_empty() && l.cache().contains(3));

    // Only the primary load is reported
    assert_eq!(outcomes.len(), 1);
    assert!(matches!(outcomes[0], PageOutcome::Loaded { page: 2, .. }));
    assert_eq!(ids(loader.cache().get(3).unwrap()), vec!["p3"]);

    // Page 3 is the last page: navigating there serves the cache and
    // prefetches nothing
    assert!(matches!(loader.navigate(3), PageRequest::Cached(_)));
    std::thread::sleep(Duration::from_millis(100));
    let requests = rt.block_on(server.received_requests()).unwrap();
    assert_eq!(requests.len(), 3);
}

#[test]
fn prefetch_failure_is_ignored() {
    let rt = runtime();
    let server = rt.block_on(MockServer::start());
    rt.block_on(
        mock_page(1, ResponseTemplate::new(200).set_body_json(page_json(&["p1"], 30)))
            .mount(&server),
    );
    rt.block_on(mock_page(2, ResponseTemplate::new(503)).expect(1).mount(&server));

    let mut loader = loader_for(&rt, &server);
    loader.navigate(1);
    poll_until(&mut loader, |_, o| !o.is_empty());

    loader.prefetch(2);
    std::thread::sleep(Duration::from_millis(300));
    assert!(loader.poll().is_empty());
    assert!(!loader.cache().contains(2));
}

#[test]
fn prefetch_skips_pages_past_the_end() {
    let rt = runtime();
    let server = rt.block_on(MockServer::start());
    rt.block_on(
        mock_page(1, ResponseTemplate::new(200).set_body_json(page_json(&["p1"], 10)))
            .mount(&server),
    );

    let mut loader = loader_for(&rt, &server);
    loader.navigate(1);
    poll_until(&mut loader, |_, o| !o.is_empty());
    assert_eq!(loader.total_pages(), Some(1));

    loader.prefetch(2);
    loader.prefetch(0);
    std::thread::sleep(Duration::from_millis(100));

    let requests = rt.block_on(server.received_requests()).unwrap();
    assert_eq!(requests.len(), 1);
}
