//! Fan-out, ordering, and synchronous-failure behavior of `dispatch`.

use tannoy::{
    Bus, BusError, DispatchError, Dispatcher, HandlerError, Module, join_all,
    testing::{
        CountingHandler, FailingHandler, PanickingHandler, Recorder, RecordingHandler, settled,
    },
};

mod common;
use common::{AppEvent, TOPIC_B, TOPIC_C};

#[tokio::test]
async fn test_fan_out_invokes_every_subscriber() {
    let first = CountingHandler::new();
    let second = CountingHandler::new();
    let third = CountingHandler::new();

    let bus = Bus::new()
        .subscribe(Module::new("c", first.clone(), |()| AppEvent::C))
        .subscribe(Module::new("c", second.clone(), |()| AppEvent::C))
        .subscribe(Module::new("c", third.clone(), |()| AppEvent::C));

    let completions = bus.dispatch(AppEvent::C).unwrap();
    assert_eq!(completions.len(), 3, "one completion per subscriber");
    join_all(completions).await.unwrap();

    assert_eq!(first.count(), 1);
    assert_eq!(second.count(), 1);
    assert_eq!(third.count(), 1);
}

#[tokio::test]
async fn test_most_recent_subscriber_runs_first() {
    let recorder = Recorder::new();
    let bus = Bus::new()
        .subscribe(Module::new(
            "c",
            RecordingHandler::<AppEvent>::labeled("h1", &recorder),
            |()| AppEvent::C,
        ))
        .subscribe(Module::new(
            "c",
            RecordingHandler::<AppEvent>::labeled("h2", &recorder),
            |()| AppEvent::C,
        ))
        .subscribe(Module::new(
            "c",
            RecordingHandler::<AppEvent>::labeled("h3", &recorder),
            |()| AppEvent::C,
        ));

    join_all(bus.dispatch(AppEvent::C).unwrap()).await.unwrap();

    assert_eq!(
        recorder.entries(),
        vec!["h3", "h2", "h1"],
        "the most recent subscription is invoked first"
    );
}

#[tokio::test]
async fn test_unhandled_topic_fails_and_runs_nothing() {
    let handler = CountingHandler::new();
    let bus = Bus::new().subscribe(Module::new("c", handler.clone(), |()| AppEvent::C));

    let err = bus.dispatch(AppEvent::B(1)).unwrap_err();
    assert_eq!(err, DispatchError::UnhandledTopic(TOPIC_B));
    assert_eq!(handler.count(), 0, "no handler may run for an unhandled topic");
}

#[test]
fn test_unhandled_topic_error_names_the_topic() {
    let err = DispatchError::UnhandledTopic(TOPIC_B);
    assert_eq!(err.to_string(), "unhandled topic \"b\"");
}

#[tokio::test]
async fn test_every_subscriber_sees_the_payload() {
    let first = RecordingHandler::<AppEvent>::new();
    let second = RecordingHandler::<AppEvent>::new();

    let bus = Bus::new()
        .subscribe(Module::new("a", first.clone(), AppEvent::A))
        .subscribe(Module::new("a", second.clone(), AppEvent::A));

    join_all(bus.dispatch(AppEvent::A("hello".to_string())).unwrap())
        .await
        .unwrap();

    assert_eq!(first.events(), vec![AppEvent::A("hello".to_string())]);
    assert_eq!(second.events(), vec![AppEvent::A("hello".to_string())]);
}

#[test]
fn test_factory_round_trip() {
    let module = Module::new("b", CountingHandler::new(), AppEvent::B);
    assert_eq!(module.topic(), TOPIC_B);
    assert_eq!(module.factory().build(9), AppEvent::B(9));
}

#[test]
fn test_factory_retrievable_from_registry() {
    let bus = Bus::new().subscribe(Module::new("b", CountingHandler::new(), AppEvent::B));

    let id = bus.registry().subscribers(TOPIC_B)[0];
    assert_eq!(bus.registry().topic_of(id), Some(TOPIC_B));

    let factory = bus.registry().factory::<u32>(id).unwrap();
    assert_eq!(factory.build(5), AppEvent::B(5));
    assert!(
        bus.registry().factory::<String>(id).is_none(),
        "factory retrieval is typed by payload"
    );
}

#[tokio::test]
async fn test_completions_are_already_running() {
    let handler = CountingHandler::new();
    let bus = Bus::new().subscribe(Module::new("c", handler.clone(), |()| AppEvent::C));

    let completions = bus.dispatch(AppEvent::C).unwrap();

    // The invocation proceeds regardless of whether anyone awaits it.
    tokio::task::yield_now().await;
    tokio::task::yield_now().await;

    assert_eq!(handler.count(), 1);
    assert!(completions[0].is_settled());
}

#[tokio::test]
async fn test_dispatching_through_a_trait_object() {
    let handler = CountingHandler::new();
    let bus = Bus::new().subscribe(Module::new("c", handler.clone(), |()| AppEvent::C));

    // Producers that only publish can hold the bus behind `dyn Dispatcher`.
    let dispatcher: &dyn Dispatcher<AppEvent> = &bus;
    join_all(dispatcher.dispatch(AppEvent::C).unwrap())
        .await
        .unwrap();

    assert_eq!(handler.count(), 1);
}

async fn run_to_completion(bus: &Bus<AppEvent>) -> Result<(), BusError> {
    join_all(bus.dispatch(AppEvent::C)?).await?;
    Ok(())
}

#[tokio::test]
async fn test_bus_error_wraps_both_failure_phases() {
    let empty: Bus<AppEvent> = Bus::new();
    let err = run_to_completion(&empty).await.unwrap_err();
    assert!(matches!(
        err,
        BusError::Dispatch(DispatchError::UnhandledTopic(topic)) if topic == TOPIC_C
    ));

    let failing = Bus::new().subscribe(Module::new("c", FailingHandler::new("nope"), |()| {
        AppEvent::C
    }));
    let err = run_to_completion(&failing).await.unwrap_err();
    assert!(matches!(err, BusError::Handler(HandlerError::Failed(_))));
}

#[tokio::test]
async fn test_panicking_subscriber_fails_only_its_completion() {
    let survivor = CountingHandler::new();
    let bus = Bus::new()
        .subscribe(Module::new("c", survivor.clone(), |()| AppEvent::C))
        .subscribe(Module::new("c", PanickingHandler::new("boom"), |()| {
            AppEvent::C
        }));

    let outcomes = settled(bus.dispatch(AppEvent::C).unwrap()).await;
    assert_eq!(outcomes.len(), 2);

    // Panicking subscriber was invoked first (most recent subscription).
    match &outcomes[0] {
        Err(HandlerError::Panicked(message)) => assert_eq!(message, "boom"),
        other => panic!("expected a panicked completion, got {other:?}"),
    }
    assert!(outcomes[1].is_ok());
    assert_eq!(survivor.count(), 1, "sibling subscribers are unaffected");
}
