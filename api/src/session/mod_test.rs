use std::sync::atomic::{AtomicUsize, Ordering};

use super::*;
use crate::testkit;

fn counting_listener(counter: &Arc<AtomicUsize>) -> SessionListener {
    let counter = Arc::clone(counter);
    Arc::new(move |_, _| {
        counter.fetch_add(1, Ordering::SeqCst);
    })
}

#[test]
fn notify_reaches_every_subscriber() {
    let broadcast = SessionBroadcast::new();
    let hits = Arc::new(AtomicUsize::new(0));
    let _a = broadcast.subscribe(counting_listener(&hits));
    let _b = broadcast.subscribe(counting_listener(&hits));

    broadcast.notify(SessionEvent::SignedOut, None);
    assert_eq!(hits.load(Ordering::SeqCst), 2);
}

#[test]
fn dropping_subscription_unsubscribes() {
    let broadcast = SessionBroadcast::new();
    let hits = Arc::new(AtomicUsize::new(0));
    let keep = broadcast.subscribe(counting_listener(&hits));
    let gone = broadcast.subscribe(counting_listener(&hits));
    assert_eq!(broadcast.listener_count(), 2);

    gone.unsubscribe();
    assert_eq!(broadcast.listener_count(), 1);

    broadcast.notify(SessionEvent::SignedIn, Some(&testkit::session("u1", "a@example.com")));
    assert_eq!(hits.load(Ordering::SeqCst), 1);

    drop(keep);
    assert_eq!(broadcast.listener_count(), 0);
}

#[test]
fn subscription_outliving_registry_drops_cleanly() {
    let broadcast = SessionBroadcast::new();
    let sub = broadcast.subscribe(Arc::new(|_, _| {}));
    drop(broadcast);
    drop(sub);
}

#[test]
fn listener_may_unsubscribe_reentrantly() {
    let broadcast = SessionBroadcast::new();
    let slot: Arc<Mutex<Option<Subscription>>> = Arc::new(Mutex::new(None));
    let slot_in_listener = Arc::clone(&slot);
    let sub = broadcast.subscribe(Arc::new(move |_, _| {
        lock(&slot_in_listener).take();
    }));
    *lock(&slot) = Some(sub);

    broadcast.notify(SessionEvent::SignedOut, None);
    assert_eq!(broadcast.listener_count(), 0);
}

#[test]
fn memory_persistence_round_trip() {
    let store = MemoryPersistence::default();
    assert!(store.load().is_none());
    let session = testkit::session("u1", "a@example.com");
    store.save(&session);
    assert_eq!(store.load(), Some(session));
    store.clear();
    assert!(store.load().is_none());
}
