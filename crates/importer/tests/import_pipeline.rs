use async_trait::async_trait;
use chrono::NaiveDate;
use importer::canonical::{RawClassification, RawEvent, RawVenue};
use importer::sources::ticketmaster::EventSearchResponse;
use importer::{EventSource, ImportFilters, ImportService, ImporterError};
use storage::dto::import::ImportStats;
use storage::models::{Availability, ExternalIds, NewMusical, ProductionStatus};
use storage::{CatalogStore, MemoryStore};

/// Replays a fixed batch, or fails every fetch when `events` is `None`.
struct ScriptedSource {
    provider: &'static str,
    events: Option<Vec<RawEvent>>,
}

impl ScriptedSource {
    fn returning(events: Vec<RawEvent>) -> Self {
        Self {
            provider: "ticketmaster",
            events: Some(events),
        }
    }

    fn failing() -> Self {
        Self {
            provider: "ticketmaster",
            events: None,
        }
    }
}

#[async_trait]
impl EventSource for ScriptedSource {
    async fn search_musical_events(
        &self,
        _filters: &ImportFilters,
    ) -> importer::Result<Vec<RawEvent>> {
        match &self.events {
            Some(events) => Ok(events.clone()),
            None => Err(ImporterError::UpstreamUnavailable(
                "HTTP 503 Service Unavailable".to_string(),
            )),
        }
    }

    fn provider(&self) -> &'static str {
        self.provider
    }
}

fn venue(name: &str, city: &str, state: &str) -> RawVenue {
    RawVenue {
        external_id: Some(format!("venue-{}", name.to_lowercase().replace(' ', "-"))),
        name: name.to_string(),
        address: "1 Main St".to_string(),
        city: city.to_string(),
        state: state.to_string(),
        postal_code: "00000".to_string(),
        latitude: Some("40.7590".to_string()),
        longitude: Some("-73.9845".to_string()),
    }
}

fn event(id: &str, name: &str, date: &str, raw_venue: Option<RawVenue>) -> RawEvent {
    RawEvent {
        external_id: id.to_string(),
        name: name.to_string(),
        local_date: Some(date.to_string()),
        local_time: Some("19:00:00".to_string()),
        status_code: "onsale".to_string(),
        ticket_url: Some(format!("https://www.ticketmaster.com/event/{}", id)),
        venue: raw_venue,
        classifications: vec![RawClassification {
            segment: Some("Arts & Theatre".to_string()),
            genre: Some("Theatre".to_string()),
            sub_genre: Some("Musical".to_string()),
        }],
    }
}

fn batch() -> Vec<RawEvent> {
    let gershwin = || Some(venue("Gershwin Theatre", "New York", "NY"));
    vec![
        event("tm-1", "Wicked - Broadway", "2024-07-01", gershwin()),
        event("tm-2", "Wicked - Broadway", "2024-07-02", gershwin()),
        event("tm-3", "Hamilton - The Musical", "2024-07-03", None),
        event(
            "tm-4",
            "Hamilton - National Tour",
            "2024-05-20",
            Some(venue("Orpheum Theatre", "San Francisco", "CA")),
        ),
        event(
            "tm-5",
            "Six (Chicago)",
            "2024-06-01",
            Some(venue("CIBC Theatre", "Chicago", "IL")),
        ),
    ]
}

fn service(
    store: &MemoryStore,
    source: ScriptedSource,
) -> ImportService<MemoryStore, ScriptedSource> {
    ImportService::new(store.clone(), source)
        .with_reference_date(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap())
}

#[tokio::test]
async fn test_event_without_venue_is_skipped_and_batch_continues() {
    let store = MemoryStore::new();
    let service = service(&store, ScriptedSource::returning(batch()));

    let summary = service
        .import_musical_events(&ImportFilters::default())
        .await;

    assert_eq!(summary.imported, 4);
    assert_eq!(summary.skipped, 1);
    assert_eq!(summary.errors.len(), 1);
    assert!(summary.errors[0].contains("tm-3"));
    assert!(summary.errors[0].contains("missing venue"));

    let stats = service.get_import_stats().await.unwrap();
    assert_eq!(
        stats,
        ImportStats {
            musicals: 3,
            productions: 3,
            performances: 4,
            venues: 3,
        }
    );
}

#[tokio::test]
async fn test_rows_are_normalized() {
    let store = MemoryStore::new();
    service(&store, ScriptedSource::returning(batch()))
        .import_musical_events(&ImportFilters::default())
        .await;

    let mut musical_names: Vec<String> = store.musicals().into_iter().map(|m| m.name).collect();
    musical_names.sort();
    assert_eq!(musical_names, vec!["Hamilton", "Six", "Wicked"]);

    let productions = store.productions();
    let status_of = |name: &str| {
        productions
            .iter()
            .find(|p| p.name == name)
            .map(|p| (p.production_type.clone(), p.status.clone()))
            .unwrap()
    };
    assert_eq!(
        status_of("Wicked - Broadway"),
        ("broadway".to_string(), ProductionStatus::Upcoming.to_string())
    );
    assert_eq!(
        status_of("Hamilton - National Tour"),
        ("touring".to_string(), "completed".to_string())
    );
    assert_eq!(
        status_of("Six (Chicago)"),
        ("regional".to_string(), "active".to_string())
    );

    assert!(
        store
            .performances()
            .iter()
            .all(|p| p.availability == Availability::Available.as_str())
    );
}

#[tokio::test]
async fn test_fetch_failure_reports_single_error() {
    let store = MemoryStore::new();
    let service = service(&store, ScriptedSource::failing());

    let summary = service
        .import_musical_events(&ImportFilters::default())
        .await;

    assert_eq!(summary.imported, 0);
    assert_eq!(summary.skipped, 0);
    assert_eq!(summary.errors.len(), 1);
    assert!(summary.errors[0].starts_with("Failed to fetch events:"));
    assert_eq!(service.get_import_stats().await.unwrap().total(), 0);
}

#[tokio::test]
async fn test_rerunning_a_batch_creates_no_new_rows() {
    let store = MemoryStore::new();
    let service = service(&store, ScriptedSource::returning(batch()));

    service.import_musical_events(&ImportFilters::default()).await;
    let before = service.get_import_stats().await.unwrap();

    let rerun = service.import_musical_events(&ImportFilters::default()).await;
    let after = service.get_import_stats().await.unwrap();

    assert_eq!(rerun.imported, 4);
    assert_eq!(rerun.skipped, 1);
    assert_eq!(before, after);
}

#[tokio::test]
async fn test_invalid_date_skips_only_that_event() {
    let store = MemoryStore::new();
    let events = vec![
        event(
            "tm-bad",
            "Chicago",
            "TBA",
            Some(venue("Ambassador Theatre", "New York", "NY")),
        ),
        event(
            "tm-good",
            "Chicago",
            "2024-08-01",
            Some(venue("Ambassador Theatre", "New York", "NY")),
        ),
    ];

    let summary = service(&store, ScriptedSource::returning(events))
        .import_musical_events(&ImportFilters::default())
        .await;

    assert_eq!(summary.imported, 1);
    assert_eq!(summary.skipped, 1);
    assert!(summary.errors[0].starts_with("Failed to import event tm-bad:"));
    assert_eq!(store.performances().len(), 1);
}

#[tokio::test]
async fn test_existing_provider_ids_are_kept() {
    let store = MemoryStore::new();
    store
        .insert_musical(&NewMusical {
            name: "Wicked".to_string(),
            description: None,
            genre: "Musical".to_string(),
            external_ids: ExternalIds::single("seatgeek", "sg-wicked"),
        })
        .await
        .unwrap();

    service(&store, ScriptedSource::returning(batch()))
        .import_musical_events(&ImportFilters::default())
        .await;

    let wicked = store.find_musical("Wicked").await.unwrap().unwrap();
    assert_eq!(wicked.external_ids.0.get("seatgeek"), Some("sg-wicked"));
    assert_eq!(wicked.external_ids.0.get("ticketmaster"), Some("tm-1"));
    assert_eq!(wicked.genre, "Musical");
}

#[tokio::test]
async fn test_clear_all_data_empties_every_table() {
    let store = MemoryStore::new();
    let service = service(&store, ScriptedSource::returning(batch()));
    service.import_musical_events(&ImportFilters::default()).await;
    assert!(service.get_import_stats().await.unwrap().total() > 0);

    service.clear_all_data().await.unwrap();

    assert_eq!(service.get_import_stats().await.unwrap(), ImportStats::default());
}

#[tokio::test]
async fn test_date_tba_event_is_skipped_within_a_fetched_page() {
    let page: EventSearchResponse = serde_json::from_str(
        r#"{
            "_embedded": {
                "events": [
                    {
                        "id": "tm-dated",
                        "name": "Hadestown - Broadway",
                        "dates": {
                            "start": { "localDate": "2024-10-05", "localTime": "19:30:00" },
                            "status": { "code": "onsale" }
                        },
                        "_embedded": { "venues": [ {
                            "id": "KovZpZA7AAEA",
                            "name": "Walter Kerr Theatre",
                            "city": { "name": "New York" },
                            "state": { "stateCode": "NY" }
                        } ] }
                    },
                    {
                        "id": "tm-tba",
                        "name": "Hadestown - Broadway",
                        "dates": { "start": { "dateTBA": true }, "status": { "code": "onsale" } },
                        "_embedded": { "venues": [ {
                            "id": "KovZpZA7AAEA",
                            "name": "Walter Kerr Theatre",
                            "city": { "name": "New York" },
                            "state": { "stateCode": "NY" }
                        } ] }
                    }
                ]
            }
        }"#,
    )
    .unwrap();
    let events: Vec<RawEvent> = page.into_events().into_iter().map(RawEvent::from).collect();

    let store = MemoryStore::new();
    let summary = service(&store, ScriptedSource::returning(events))
        .import_musical_events(&ImportFilters::default())
        .await;

    assert_eq!(summary.imported, 1);
    assert_eq!(summary.skipped, 1);
    assert_eq!(summary.errors.len(), 1);
    assert!(summary.errors[0].starts_with("Failed to import event tm-tba:"));
    assert!(summary.errors[0].contains("missing start date"));
    assert_eq!(store.performances().len(), 1);
}
