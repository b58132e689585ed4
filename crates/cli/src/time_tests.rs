#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
use super::*;

#[test]
fn test_system_clock() {
    let clock = SystemClock::new();
    assert!(clock.now_millis() > 0);
}

#[test]
fn test_test_clock_new() {
    let clock = TestClock::new(1000);
    assert_eq!(clock.now_millis(), 1000);
}

#[test]
fn test_test_clock_advance() {
    let clock = TestClock::new(1000);
    clock.advance(Duration::from_millis(500));
    assert_eq!(clock.now_millis(), 1500);
    clock.advance_ms(250);
    assert_eq!(clock.now_millis(), 1750);
}

#[test]
fn test_test_clock_set() {
    let clock = TestClock::new(1000);
    clock.set(5000);
    assert_eq!(clock.now_millis(), 5000);
}

#[test]
fn test_test_clock_shared_state() {
    let clock1 = TestClock::new(1000);
    let clock2 = clock1.clone();
    clock1.advance_ms(500);
    assert_eq!(clock2.now_millis(), 1500);
}

#[tokio::test]
async fn test_test_clock_sleep_advances() {
    let clock = TestClock::at_epoch();
    clock.sleep(Duration::from_millis(500)).await;
    assert_eq!(clock.now_millis(), 500);
}

#[tokio::test]
async fn test_sleeping_poller_interleaves_with_other_tasks() {
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    let clock = TestClock::at_epoch();
    let flag = Arc::new(AtomicBool::new(false));

    let poller = {
        let clock = clock.clone();
        let flag = Arc::clone(&flag);
        async move {
            let mut polls = 0u32;
            while !flag.load(Ordering::SeqCst) {
                polls += 1;
                clock.sleep(Duration::from_millis(10)).await;
            }
            polls
        }
    };
    let flipper = {
        let flag = Arc::clone(&flag);
        async move {
            tokio::task::yield_now().await;
            flag.store(true, Ordering::SeqCst);
        }
    };

    let (polls, ()) = tokio::join!(poller, flipper);
    assert!(polls >= 1);
    assert!(clock.now_millis() >= 10);
}

#[test]
fn test_clock_handle_system() {
    let handle = ClockHandle::system();
    assert!(!handle.is_test());
    assert!(handle.as_test().is_none());
}

#[test]
fn test_clock_handle_test() {
    let handle = ClockHandle::test_at(1000);
    assert!(handle.is_test());
    let test = handle.as_test().unwrap();
    assert_eq!(test.now_millis(), 1000);
}

#[tokio::test]
async fn test_clock_handle_sleep() {
    let handle = ClockHandle::test_at(1000);
    handle.sleep(Duration::from_millis(100)).await;
    assert_eq!(handle.now_millis(), 1100);
}

#[test]
fn test_clock_handle_default() {
    let handle = ClockHandle::default();
    assert!(!handle.is_test());
}
