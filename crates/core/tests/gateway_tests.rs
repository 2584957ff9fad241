use std::sync::Arc;
use std::time::Duration;

use serde_json::{json, Value};
use visa_site_core::catalog;
use visa_site_core::content::ListOrigin;
use visa_site_core::document::{Collection, Fields};
use visa_site_core::events::EventBus;
use visa_site_core::gateway::ContentGateway;
use visa_site_core::store::{DocumentStore, MemoryStore};
use visa_site_core::{ContentDomain, ContentError, FallbackResolver, Language};

fn fields(value: Value) -> Fields {
    match value {
        Value::Object(map) => map,
        _ => panic!("expected object"),
    }
}

fn setup() -> (Arc<MemoryStore>, Arc<ContentGateway>) {
    let store = Arc::new(MemoryStore::default());
    let gateway = Arc::new(ContentGateway::new(store.clone()));
    (store, gateway)
}

#[tokio::test]
async fn missing_document_yields_skeleton() {
    let (_store, gateway) = setup();
    let snapshot = gateway.fetch(ContentDomain::About).await.unwrap();
    assert!(snapshot.is_skeleton());

    let resolver = FallbackResolver::new(catalog::site());
    assert_eq!(
        resolver.resolve(ContentDomain::About, "heading", Language::Indonesia, Some(&snapshot)),
        "Tentang kami"
    );
}

#[tokio::test]
async fn fetch_normalizes_remote_document() {
    let (store, gateway) = setup();
    store
        .set(
            &ContentDomain::Hero.text_path(),
            fields(json!({
                "title": { "English": "Visas without the queue", "Indonesia": "" },
                "subtitle": "Same text for everyone",
                "ctaPrimary": 5
            })),
        )
        .await
        .unwrap();

    let snapshot = gateway.fetch(ContentDomain::Hero).await.unwrap();
    let resolver = FallbackResolver::new(catalog::site());
    let en = resolver.resolve_domain(ContentDomain::Hero, Language::English, Some(&snapshot));
    let id = resolver.resolve_domain(ContentDomain::Hero, Language::Indonesia, Some(&snapshot));

    assert_eq!(en.text("title"), Some("Visas without the queue"));
    assert_eq!(id.text("title"), Some("Mitra Visa Terpercaya Anda di Bali"));
    assert_eq!(en.text("subtitle"), Some("Same text for everyone"));
    assert_eq!(id.text("subtitle"), Some("Same text for everyone"));
    assert_eq!(en.text("ctaPrimary"), Some("Chat on WhatsApp"));
}

#[tokio::test]
async fn testimonials_come_from_their_collection() {
    let (store, gateway) = setup();
    store
        .add(
            Collection::Testimonials,
            fields(json!({ "author": "Marta", "message": "Quick and honest", "rating": 5 })),
        )
        .await
        .unwrap();

    let snapshot = gateway.fetch(ContentDomain::Testimonial).await.unwrap();
    let resolved = FallbackResolver::new(catalog::site()).resolve_domain(
        ContentDomain::Testimonial,
        Language::English,
        Some(&snapshot),
    );

    assert_eq!(resolved.list_origin, Some(ListOrigin::Remote));
    let items = resolved.items().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].fields["name"], "Marta");
    assert_eq!(items[0].fields["text"], "Quick and honest");
}

#[tokio::test]
async fn unavailable_store_is_surfaced_then_masked_with_last_good() {
    let (store, gateway) = setup();
    store
        .set(
            &ContentDomain::Footer.text_path(),
            fields(json!({ "tagline": { "English": "Cached tagline" } })),
        )
        .await
        .unwrap();
    gateway.fetch(ContentDomain::Footer).await.unwrap();

    store.set_offline(true);
    assert!(matches!(
        gateway.fetch(ContentDomain::Footer).await,
        Err(ContentError::StoreUnavailable(_))
    ));

    let snapshot = gateway.snapshot_or_last_good(ContentDomain::Footer).await;
    let resolver = FallbackResolver::new(catalog::site());
    assert_eq!(
        resolver.resolve(ContentDomain::Footer, "tagline", Language::English, Some(&snapshot)),
        "Cached tagline"
    );

    let never_fetched = gateway.snapshot_or_last_good(ContentDomain::Gallery).await;
    assert!(never_fetched.is_skeleton());
}

#[tokio::test]
async fn subscription_follows_writes_to_its_domain() {
    let (store, gateway) = setup();
    let mut subscription = gateway.subscribe(ContentDomain::Nav);

    store
        .set_merge(
            &ContentDomain::Nav.text_path(),
            fields(json!({ "home": { "English": "Start", "Indonesia": "Mulai" } })),
        )
        .await
        .unwrap();

    let updated = tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            let current = subscription.current();
            if current.field("home").is_some() {
                return current;
            }
            assert!(subscription.changed().await, "feed ended");
        }
    })
    .await
    .expect("snapshot not delivered");

    assert_eq!(
        updated.field("home").and_then(|f| f.text_for(Language::Indonesia)),
        Some("Mulai")
    );
}

#[tokio::test]
async fn dropping_subscription_releases_it() {
    let bus = EventBus::new(64);
    let store = Arc::new(MemoryStore::new(bus.clone()));
    let gateway = Arc::new(ContentGateway::new(store));

    let subscription = gateway.subscribe(ContentDomain::Team);
    assert_eq!(bus.subscriber_count(), 1);
    drop(subscription);

    tokio::time::timeout(Duration::from_secs(5), async {
        while bus.subscriber_count() > 0 {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .expect("subscription still holds the feed");
}
