#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::time::Duration;

use tokio::time::{Instant, sleep, timeout};
use toastline::config::ToastSettings;
use toastline::stack::ToastStack;
use toastline::toast::{LifecyclePhase, NotificationDescriptor, Target};
use toastline::types::{Icon, Severity};

fn descriptor(title: &str, severity: Severity) -> NotificationDescriptor {
    NotificationDescriptor::new(Icon::from("fa-wallet"), title, "", severity)
}

#[tokio::test(start_paused = true)]
async fn each_toast_runs_its_own_auto_dismiss_timer() {
    let mut stack = ToastStack::new(ToastSettings::default());
    let start = Instant::now();
    let warning = stack.push(descriptor("Budget at 90%", Severity::Warning)).unwrap();
    let success = stack.push(descriptor("Expense saved", Severity::Success)).unwrap();

    assert_eq!(stack.next_removed().await, Some(success));
    let first = start.elapsed();
    assert!(first >= Duration::from_millis(3_300), "{first:?}");
    assert!(first < Duration::from_millis(3_400), "{first:?}");

    assert_eq!(stack.next_removed().await, Some(warning));
    let second = start.elapsed();
    assert!(second >= Duration::from_millis(5_300), "{second:?}");
    assert!(second < Duration::from_millis(5_400), "{second:?}");

    assert!(stack.is_empty());
    assert_eq!(stack.next_removed().await, None);
}

#[tokio::test(start_paused = true)]
async fn error_toasts_wait_for_the_user() {
    let mut stack = ToastStack::new(ToastSettings::default());
    let id = stack.push(descriptor("Sync failed", Severity::Error)).unwrap();

    assert!(
        timeout(Duration::from_secs(60), stack.next_removed())
            .await
            .is_err()
    );
    assert_eq!(stack.visible_count(), 1);

    assert!(stack.click(id, Target::CloseControl));
    assert_eq!(stack.next_removed().await, Some(id));
}

#[tokio::test(start_paused = true)]
async fn queued_toasts_start_their_lifecycle_when_promoted() {
    let mut stack = ToastStack::new(ToastSettings {
        max_visible: 1,
        ..ToastSettings::default()
    });
    let first = stack.push(descriptor("first", Severity::Info)).unwrap();
    let second = stack.push(descriptor("second", Severity::Info)).unwrap();
    assert_eq!(stack.queued_count(), 1);

    // Sitting in the queue does not consume the auto-dismiss delay.
    sleep(Duration::from_secs(2)).await;
    assert_eq!(stack.next_removed().await, Some(first));
    let promoted_at = Instant::now();

    let visible: Vec<_> = stack.visible().collect();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].id, second);
    assert_eq!(visible[0].snapshot.phase, LifecyclePhase::Entering);
    drop(visible);

    assert_eq!(stack.next_removed().await, Some(second));
    assert!(promoted_at.elapsed() >= Duration::from_millis(3_300));
}

#[tokio::test(start_paused = true)]
async fn clear_suppresses_pending_completions() {
    let mut stack = ToastStack::new(ToastSettings::default());
    let id = stack.push(descriptor("saved", Severity::Success)).unwrap();
    sleep(Duration::from_millis(50)).await;
    stack.click(id, Target::Body);
    sleep(Duration::from_millis(100)).await;

    stack.clear();
    sleep(Duration::from_secs(10)).await;
    assert!(stack.drain_removed().is_empty());
    assert!(stack.is_empty());
}

#[tokio::test(start_paused = true)]
async fn drain_removed_collects_finished_toasts() {
    let mut stack = ToastStack::new(ToastSettings {
        sticky: true,
        ..ToastSettings::default()
    });
    let a = stack.push(descriptor("a", Severity::Info)).unwrap();
    let b = stack.push(descriptor("b", Severity::Info)).unwrap();
    stack.click(a, Target::Body);
    stack.dismiss(b);

    sleep(Duration::from_secs(1)).await;
    let mut removed = stack.drain_removed();
    removed.sort();
    let mut expected = vec![a, b];
    expected.sort();
    assert_eq!(removed, expected);
    assert!(stack.is_empty());
}
