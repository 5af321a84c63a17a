//! Path Isolation Tests
//!
//! Values set on one logical path are never observed on an unrelated one.

use crate::common::*;
use std::sync::Barrier;
use std::thread;

#[test]
fn concurrent_threads_see_their_own_values() {
    let ctx = test_context();
    let barrier = Arc::new(Barrier::new(2));

    let spawn_writer = |value: &'static str| {
        let ctx = Arc::clone(&ctx);
        let barrier = Arc::clone(&barrier);
        thread::spawn(move || {
            ctx.set_data("k", value);
            // Both paths have written before either reads.
            barrier.wait();
            ctx.get::<&'static str>("k").map(|v| *v)
        })
    };

    let p1 = spawn_writer("a");
    let p2 = spawn_writer("b");
    assert_eq!(p1.join().unwrap(), Some("a"));
    assert_eq!(p2.join().unwrap(), Some("b"));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_tasks_see_their_own_values() {
    let ctx = test_context();
    let barrier = Arc::new(tokio::sync::Barrier::new(2));

    let mut handles = Vec::new();
    for value in [1i64, 2i64] {
        let ctx = Arc::clone(&ctx);
        let barrier = Arc::clone(&barrier);
        handles.push(
            callctx::spawn(async move {
                ctx.set_data("k", value);
                barrier.wait().await;
                tokio::task::yield_now().await;
                read_i64(&ctx, "k")
            })
            .unwrap(),
        );
    }

    let mut seen = Vec::new();
    for h in handles {
        seen.push(h.await.unwrap());
    }
    assert_eq!(seen, vec![Some(1), Some(2)]);
}

#[tokio::test(flavor = "current_thread")]
async fn unscoped_tasks_on_one_worker_do_not_share_values() {
    let ctx = test_context();
    let (tx, rx) = tokio::sync::oneshot::channel::<()>();

    let first_ctx = Arc::clone(&ctx);
    let first = tokio::spawn(async move {
        assert!(callctx::is_detached());
        first_ctx.set_data("k", 1i64);
        rx.await.unwrap();
        read_i64(&first_ctx, "k")
    });

    let second_ctx = Arc::clone(&ctx);
    let second = tokio::spawn(async move {
        second_ctx.set_data("k", 2i64);
        tx.send(()).unwrap();
        read_i64(&second_ctx, "k")
    });

    assert_eq!(second.await.unwrap(), None);
    assert_eq!(first.await.unwrap(), None);
    assert_eq!(read_i64(&ctx, "k"), None);
}

#[tokio::test(flavor = "current_thread")]
async fn flow_context_gives_plain_task_its_own_path() {
    let ctx = test_context();
    let task_ctx = Arc::clone(&ctx);
    let seen = tokio::spawn(
        async move {
            assert!(!callctx::is_detached());
            task_ctx.set_data("k", 3i64);
            tokio::task::yield_now().await;
            read_i64(&task_ctx, "k")
        }
        .flow_context(),
    )
    .await
    .unwrap();
    assert_eq!(seen, Some(3));
}

#[test]
fn thread_without_hand_off_starts_empty() {
    let ctx = test_context();
    on_fresh_thread(move || {
        ctx.set_data("k", 1i64);
        let child_ctx = Arc::clone(&ctx);
        let seen = thread::spawn(move || read_i64(&child_ctx, "k")).join().unwrap();
        assert_eq!(seen, None);
    });
}

#[test]
fn spawn_thread_inherits_but_does_not_leak_back() {
    let ctx = test_context();
    on_fresh_thread(move || {
        ctx.set_data("k", 1i64);
        let child_ctx = Arc::clone(&ctx);
        let seen = callctx::spawn_thread(move || {
            let inherited = read_i64(&child_ctx, "k");
            child_ctx.set_data("k", 2i64);
            inherited
        })
        .join()
        .unwrap();

        assert_eq!(seen, Some(1));
        assert_eq!(read_i64(&ctx, "k"), Some(1));
    });
}

#[test]
fn parent_writes_after_hand_off_are_not_seen() {
    let ctx = test_context();
    on_fresh_thread(move || {
        ctx.set_data("k", 1i64);
        let snapshot = callctx::capture();
        ctx.set_data("k", 2i64);

        let child_ctx = Arc::clone(&ctx);
        let seen = snapshot.run(|| read_i64(&child_ctx, "k"));
        assert_eq!(seen, Some(1));
    });
}

#[test]
fn clear_data_only_affects_caller() {
    let ctx = test_context();
    on_fresh_thread(move || {
        ctx.set_data("k", 1i64);
        let snapshot = callctx::capture();
        ctx.clear_data("k");

        assert_eq!(read_i64(&ctx, "k"), None);
        let child_ctx = Arc::clone(&ctx);
        assert_eq!(snapshot.run(|| read_i64(&child_ctx, "k")), Some(1));
    });
}
