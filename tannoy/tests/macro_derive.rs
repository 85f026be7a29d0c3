//! The `#[derive(Event)]` macro: topic mapping for enums and structs.

#![cfg(feature = "macros")]

use tannoy::prelude::*;
use tannoy::testing::RecordingHandler;

#[derive(Clone, Debug, PartialEq, Event)]
enum DerivedEvent {
    #[topic("user.created")]
    Created(u64),
    #[topic("user.renamed")]
    Renamed { id: u64, name: String },
    Deleted(u64),
    Flushed,
}

#[derive(Clone, Debug, Event)]
#[topic("tick")]
struct Tick;

#[derive(Clone, Debug, Event)]
struct Heartbeat {
    #[allow(dead_code)]
    sequence: u64,
}

#[test]
fn test_enum_variants_map_to_topics() {
    assert_eq!(DerivedEvent::Created(1).topic(), Topic::new("user.created"));
    assert_eq!(
        DerivedEvent::Renamed {
            id: 1,
            name: "x".to_string()
        }
        .topic(),
        Topic::new("user.renamed")
    );

    // Without an override the variant identifier is the topic.
    assert_eq!(DerivedEvent::Deleted(1).topic(), Topic::new("Deleted"));
    assert_eq!(DerivedEvent::Flushed.topic(), Topic::new("Flushed"));
}

#[test]
fn test_struct_topics() {
    assert_eq!(Tick.topic(), Topic::new("tick"));
    assert_eq!(Heartbeat { sequence: 3 }.topic(), Topic::new("Heartbeat"));
}

#[tokio::test]
async fn test_derived_event_round_trips_through_a_bus() {
    let recorder = RecordingHandler::<DerivedEvent>::new();
    let bus = Bus::new().subscribe(Module::new(
        "user.created",
        recorder.clone(),
        DerivedEvent::Created,
    ));

    join_all(bus.dispatch(DerivedEvent::Created(42)).unwrap())
        .await
        .unwrap();

    assert_eq!(recorder.events(), vec![DerivedEvent::Created(42)]);
    assert_eq!(
        bus.dispatch(DerivedEvent::Flushed).unwrap_err(),
        DispatchError::UnhandledTopic(Topic::new("Flushed"))
    );
}
