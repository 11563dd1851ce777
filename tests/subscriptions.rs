mod common;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use common::*;
use httptap::log::{
    ChangeListener, ListenerError, LogChange, MemoryListener, Response, Subscription, TrafficLog,
};

#[test]
fn every_mutation_delivers_exactly_one_notification() {
    let log = TrafficLog::new();
    let listener = MemoryListener::new();
    let subscription = log.subscribe(listener.clone());

    let event = pending_event("https://example.com/one");
    log.append(event.clone()).unwrap();
    log.update(event.complete(Response::new(200, "OK"))).unwrap();
    log.touch();
    log.clear();

    let changes = listener.snapshot();
    assert_eq!(changes.len(), 4);
    assert!(matches!(changes[0], LogChange::Appended(_)));
    assert!(matches!(changes[1], LogChange::Updated(_)));
    assert_eq!(changes[2], LogChange::Touched);
    assert_eq!(changes[3], LogChange::Cleared);
    subscription.cancel();
}

#[test]
fn failed_mutations_do_not_notify() {
    let log = TrafficLog::new();
    let listener = MemoryListener::new();
    let _subscription = log.subscribe(listener.clone());

    let event = pending_event("https://example.com/only");
    log.append(event.clone()).unwrap();
    log.append(event.clone()).unwrap_err();
    log.update(pending_event("https://example.com/absent"))
        .unwrap_err();

    assert_eq!(listener.snapshot().len(), 1);
}

#[test]
fn notifications_reach_every_active_subscriber() {
    let log = TrafficLog::new();
    let first = MemoryListener::new();
    let second = MemoryListener::new();
    let sub_a = log.subscribe(first.clone());
    let sub_b = log.subscribe(second.clone());
    assert_eq!(log.subscriber_count(), 2);

    log.append(pending_event("https://example.com/broadcast"))
        .unwrap();

    assert_eq!(first.snapshot().len(), 1);
    assert_eq!(second.snapshot().len(), 1);
    sub_a.cancel();
    sub_b.cancel();
}

#[test]
fn single_subscriber_sees_changes_in_emission_order() {
    let log = TrafficLog::new();
    let listener = MemoryListener::new();
    let _subscription = log.subscribe(listener.clone());

    let mut ids = Vec::new();
    for i in 0..10 {
        let event = pending_event(&format!("https://example.com/{i}"));
        ids.push(event.id());
        log.append(event).unwrap();
    }

    let seen: Vec<_> = listener
        .snapshot()
        .iter()
        .map(|change| change.event().unwrap().id())
        .collect();
    assert_eq!(seen, ids);
}

#[test]
fn cancelled_subscription_receives_nothing_further() {
    let log = TrafficLog::new();
    let listener = MemoryListener::new();
    let subscription = log.subscribe(listener.clone());

    log.append(pending_event("https://example.com/before"))
        .unwrap();
    assert!(subscription.is_active());

    subscription.cancel();
    assert!(!subscription.is_active());
    assert_eq!(log.subscriber_count(), 0);

    log.append(pending_event("https://example.com/after"))
        .unwrap();
    log.clear();

    assert_eq!(listener.snapshot().len(), 1);
}

#[test]
fn cancelling_twice_is_a_noop() {
    let log = TrafficLog::new();
    let subscription = log.subscribe_fn(|_| {});
    subscription.cancel();
    subscription.cancel();
    assert!(!subscription.is_active());
}

#[test]
fn subscription_outliving_the_log_is_harmless() {
    let subscription = {
        let log = TrafficLog::new();
        log.subscribe_fn(|_| {})
    };
    assert!(!subscription.is_active());
    subscription.cancel();
}

#[test]
fn late_subscriber_gets_no_replay() {
    let log = TrafficLog::new();
    log.append(pending_event("https://example.com/history"))
        .unwrap();

    let listener = MemoryListener::new();
    let _subscription = log.subscribe(listener.clone());
    assert!(listener.snapshot().is_empty());

    // History is available through a snapshot instead.
    assert_eq!(log.snapshot().len(), 1);
}

struct FailingListener;

impl ChangeListener for FailingListener {
    fn on_change(&mut self, _change: &LogChange) -> Result<(), ListenerError> {
        Err(ListenerError::other("boom"))
    }
}

#[test]
fn failing_listener_does_not_starve_its_peers() {
    init_tracing();
    let log = TrafficLog::new();
    let healthy = MemoryListener::new();
    let failing = log.subscribe(FailingListener);
    let _watching = log.subscribe(healthy.clone());

    log.append(pending_event("https://example.com/fault"))
        .unwrap();
    log.touch();

    // The healthy listener saw everything and the failing one is still
    // registered; the fault was only reported, not acted on.
    assert_eq!(healthy.snapshot().len(), 2);
    assert!(failing.is_active());
    assert_eq!(log.subscriber_count(), 2);
}

#[test]
fn closure_subscribers_observe_counts() {
    let log = TrafficLog::new();
    let seen = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&seen);
    let subscription = log.subscribe_fn(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    log.append(pending_event("https://example.com/counted"))
        .unwrap();
    log.touch();
    assert_eq!(seen.load(Ordering::SeqCst), 2);
    subscription.cancel();
}

#[test]
fn listener_may_read_the_log_during_delivery() {
    let log = Arc::new(TrafficLog::new());
    let observed = Arc::new(Mutex::new(Vec::new()));

    let reader = Arc::clone(&log);
    let lengths = Arc::clone(&observed);
    let subscription = log.subscribe_fn(move |_| {
        lengths.lock().unwrap().push(reader.snapshot().len());
    });

    log.append(pending_event("https://example.com/reentrant"))
        .unwrap();
    log.append(pending_event("https://example.com/reentrant2"))
        .unwrap();

    // Each notification already sees the mutation it announces.
    assert_eq!(*observed.lock().unwrap(), vec![1, 2]);
    subscription.cancel();
}

#[test]
fn listener_may_cancel_its_own_subscription_during_delivery() {
    let log = TrafficLog::new();
    let slot: Arc<Mutex<Option<Subscription>>> = Arc::new(Mutex::new(None));
    let seen = Arc::new(AtomicUsize::new(0));

    let handle = Arc::clone(&slot);
    let counter = Arc::clone(&seen);
    let subscription = log.subscribe_fn(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
        // A viewer tearing itself down unsubscribes from inside its own
        // callback; this must complete rather than deadlock.
        if let Some(own) = handle.lock().unwrap().take() {
            own.cancel();
        }
    });
    *slot.lock().unwrap() = Some(subscription);

    log.append(pending_event("https://example.com/first"))
        .unwrap();
    assert_eq!(log.subscriber_count(), 0);

    log.append(pending_event("https://example.com/second"))
        .unwrap();
    assert_eq!(seen.load(Ordering::SeqCst), 1);
}

#[test]
fn listener_may_cancel_a_peer_during_delivery() {
    let log = TrafficLog::new();
    let peer_changes = MemoryListener::new();
    let peer = log.subscribe(peer_changes.clone());

    let slot: Arc<Mutex<Option<Subscription>>> = Arc::new(Mutex::new(None));
    *slot.lock().unwrap() = Some(peer);
    let handle = Arc::clone(&slot);
    let canceller = log.subscribe_fn(move |_| {
        if let Some(peer) = handle.lock().unwrap().take() {
            peer.cancel();
        }
    });

    log.append(pending_event("https://example.com/fanout"))
        .unwrap();
    log.touch();

    // Whether the peer saw the first notification depends on fan-out order;
    // after its cancellation completed it must see nothing more.
    assert!(peer_changes.snapshot().len() <= 1);
    assert_eq!(log.subscriber_count(), 1);
    canceller.cancel();
}

#[tokio::test]
async fn channel_bridge_feeds_async_consumers() {
    let log = TrafficLog::new();
    let (subscription, changes) = log.subscribe_channel();

    log.append(pending_event("https://example.com/async"))
        .unwrap();
    log.touch();

    let first = changes.recv_async().await.unwrap();
    assert!(matches!(first, LogChange::Appended(_)));
    let second = changes.recv_async().await.unwrap();
    assert_eq!(second, LogChange::Touched);
    subscription.cancel();
}

#[test]
fn dropped_channel_receiver_keeps_the_log_healthy() {
    init_tracing();
    let log = TrafficLog::new();
    let (subscription, changes) = log.subscribe_channel();
    drop(changes);

    // Delivery failure is contained; the log and later subscribers work on.
    log.append(pending_event("https://example.com/orphaned"))
        .unwrap();
    let listener = MemoryListener::new();
    let _watching = log.subscribe(listener.clone());
    log.touch();
    assert_eq!(listener.snapshot().len(), 1);
    subscription.cancel();
}
