use parking_lot::Mutex;
use relay_event_bus::{Channel, Delivery, EventBus};
use relay_inbox::*;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

fn channel(name: &str) -> Channel {
    Channel::new(name).expect("valid channel")
}

#[test]
fn publish_dispose_publish_scenario() {
    let bus = EventBus::new();
    let c = channel("C");
    let inbox = Inbox::attach(&bus, &c).unwrap();

    bus.publish(&c, "a").unwrap();
    bus.publish(&c, "b").unwrap();
    assert_eq!(inbox.texts(), ["a", "b"]);
    assert!(inbox.has_unread());

    inbox.dispose();
    let delivery = bus.publish(&c, "c").unwrap();

    assert!(delivery.is_empty());
    assert_eq!(inbox.texts(), ["a", "b"]);
}

#[test]
fn publish_without_holders_changes_nothing() {
    let bus = EventBus::new();
    let inbox = Inbox::attach(&bus, &channel("C")).unwrap();

    assert!(bus.publish("other", "x").unwrap().is_empty());

    assert!(inbox.is_empty());
    assert!(!inbox.has_unread());
}

#[test]
fn independent_holders_see_the_same_sequence() {
    let bus = EventBus::new();
    let c = channel("C");
    let first = Inbox::attach(&bus, &c).unwrap();
    let second = Inbox::attach(&bus, &c).unwrap();

    bus.publish(&c, "1").unwrap();
    bus.publish(&c, "2").unwrap();
    first.dispose();
    assert_eq!(bus.publish(&c, "3").unwrap(), Delivery { delivered: 1, faulted: 0 });

    assert_eq!(first.texts(), ["1", "2"]);
    assert_eq!(second.texts(), ["1", "2", "3"]);
    assert_eq!(second.status(), HolderStatus::Active);
}

#[test]
fn faulting_subscriber_does_not_starve_the_inbox() {
    let bus = EventBus::new();
    let c = channel("C");
    let _bad = bus.subscribe(&c, |_| panic!("render failed")).unwrap();
    let inbox = Inbox::attach(&bus, &c).unwrap();

    let delivery = bus.publish(&c, "still here").unwrap();

    assert_eq!(delivery, Delivery { delivered: 1, faulted: 1 });
    assert_eq!(inbox.texts(), ["still here"]);
}

#[test]
fn observers_fire_once_per_event_after_mutation() {
    let bus = EventBus::new();
    let c = channel("C");
    let inbox = Inbox::attach(&bus, &c).unwrap();
    let lens = Arc::new(Mutex::new(Vec::new()));

    let sink = Arc::clone(&lens);
    let reader = inbox.downgrade();
    let _obs = inbox.on_change(move |change| {
        let visible = reader.upgrade().map_or(0, |inbox| inbox.len());
        sink.lock().push((change.len, visible));
        Ok(())
    });

    for payload in ["a", "b", "c"] {
        bus.publish(&c, payload).unwrap();
    }

    assert_eq!(*lens.lock(), [(1, 1), (2, 2), (3, 3)]);
}

#[test]
fn faulting_observer_keeps_the_message() {
    let bus = EventBus::new();
    let c = channel("C");
    let inbox = Inbox::attach(&bus, &c).unwrap();
    let _obs = inbox.on_change(|_| Err("surface unavailable".into()));

    assert_eq!(bus.publish(&c, "kept").unwrap().delivered, 1);
    assert_eq!(inbox.len(), 1);
}

#[test]
fn observer_can_dispose_the_inbox() {
    let bus = EventBus::new();
    let c = channel("C");
    let inbox = Inbox::attach(&bus, &c).unwrap();

    let reader = inbox.downgrade();
    let _obs = inbox.on_change(move |_| {
        if let Some(inbox) = reader.upgrade() {
            inbox.dispose();
        }
        Ok(())
    });

    bus.publish(&c, "first").unwrap();
    bus.publish(&c, "second").unwrap();

    assert_eq!(inbox.texts(), ["first"]);
    assert_eq!(inbox.status(), HolderStatus::Disposed);
}

#[test]
fn mark_read_notifies_only_on_change() {
    let bus = EventBus::new();
    let c = channel("C");
    let inbox = Inbox::attach(&bus, &c).unwrap();
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&hits);
    let _obs = inbox.on_change(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(())
    });

    assert!(!inbox.mark_read());
    bus.publish(&c, "a").unwrap();
    assert!(inbox.mark_read());
    assert!(!inbox.has_unread());
    assert_eq!(inbox.texts(), ["a"]);

    assert_eq!(hits.load(Ordering::SeqCst), 2);
}

#[test]
fn concurrent_publishers_lose_nothing() {
    let bus = EventBus::new();
    let c = channel("C");
    let inbox = Inbox::attach(&bus, &c).unwrap();

    std::thread::scope(|scope| {
        for worker in 0..4 {
            let bus = bus.clone();
            let c = c.clone();
            scope.spawn(move || {
                for i in 0..50 {
                    bus.publish(&c, format!("{worker}-{i}")).unwrap();
                }
            });
        }
    });

    let ids: Vec<u64> = inbox.messages().iter().map(|m| m.id).collect();
    assert_eq!(ids, (0..200).collect::<Vec<u64>>());
}

#[test]
fn disposed_inbox_is_inert() {
    let bus = EventBus::new();
    let c = channel("C");
    let inbox = Inbox::attach(&bus, &c).unwrap();
    bus.publish(&c, "a").unwrap();
    inbox.dispose();

    let hits = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&hits);
    let late = inbox.on_change(move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(())
    });

    assert!(!late.is_active());
    assert!(!inbox.mark_read());
    assert!(inbox.has_unread(), "frozen state keeps the flag it had");
    bus.publish(&c, "b").unwrap();

    assert_eq!(hits.load(Ordering::SeqCst), 0);
    assert_eq!(inbox.texts(), ["a"]);
    assert_eq!(inbox.channel().as_str(), "C");
}

#[test]
fn observer_can_mark_read_from_inside_a_notification() {
    let bus = EventBus::new();
    let c = channel("C");
    let inbox = Inbox::attach(&bus, &c).unwrap();
    let seen = Arc::new(Mutex::new(Vec::new()));

    let sink = Arc::clone(&seen);
    let reader = inbox.downgrade();
    let _obs = inbox.on_change(move |change| {
        sink.lock().push(change.has_unread);
        if change.has_unread {
            if let Some(inbox) = reader.upgrade() {
                inbox.mark_read();
            }
        }
        Ok(())
    });

    bus.publish(&c, "a").unwrap();

    assert_eq!(*seen.lock(), [true, false]);
    assert!(!inbox.has_unread());
}

#[test]
fn concurrent_publishers_notify_in_mutation_order() {
    let bus = EventBus::new();
    let c = channel("C");
    let inbox = Inbox::attach(&bus, &c).unwrap();
    let lens = Arc::new(Mutex::new(Vec::new()));

    let sink = Arc::clone(&lens);
    let _obs = inbox.on_change(move |change| {
        sink.lock().push(change.len);
        Ok(())
    });

    std::thread::scope(|scope| {
        for worker in 0..4 {
            let bus = bus.clone();
            let c = c.clone();
            scope.spawn(move || {
                for i in 0..50 {
                    bus.publish(&c, format!("{worker}-{i}")).unwrap();
                }
            });
        }
    });

    assert_eq!(*lens.lock(), (1..=200).collect::<Vec<usize>>());
}

mod properties {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn inbox_mirrors_published_sequence(
            payloads in proptest::collection::vec("[a-zA-Z0-9 ]{0,24}", 0..48)
        ) {
            let bus = EventBus::new();
            let c = channel("C");
            let inbox = Inbox::attach(&bus, &c).unwrap();

            for payload in &payloads {
                bus.publish(&c, payload.as_str()).unwrap();
            }

            prop_assert_eq!(inbox.texts(), payloads.clone());
            let ids: Vec<u64> = inbox.messages().iter().map(|m| m.id).collect();
            prop_assert_eq!(ids, (0..payloads.len() as u64).collect::<Vec<_>>());
            prop_assert_eq!(inbox.has_unread(), !payloads.is_empty());
        }
    }
}
