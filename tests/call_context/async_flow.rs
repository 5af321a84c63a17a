//! Async Propagation Tests
//!
//! Values follow a logical path across `.await` points and worker threads.

use crate::common::*;
use std::time::Duration;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn value_survives_suspension() {
    let ctx = test_context();
    let task_ctx = Arc::clone(&ctx);
    let seen = callctx::spawn(async move {
        task_ctx.set_data("k", 1i64);
        for _ in 0..10 {
            tokio::task::yield_now().await;
            tokio::time::sleep(Duration::from_millis(1)).await;
        }
        read_i64(&task_ctx, "k")
    })
    .unwrap()
    .await
    .unwrap();
    assert_eq!(seen, Some(1));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn spawned_task_inherits_parent_snapshot() {
    let ctx = test_context();
    let parent_ctx = Arc::clone(&ctx);
    callctx::spawn(async move {
        parent_ctx.set_data("request_id", 7i64);

        let child_ctx = Arc::clone(&parent_ctx);
        let inherited = callctx::spawn(async move { read_i64(&child_ctx, "request_id") })
            .unwrap()
            .await
            .unwrap();
        assert_eq!(inherited, Some(7));
    })
    .unwrap()
    .await
    .unwrap();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn child_task_writes_do_not_reach_parent() {
    let ctx = test_context();
    let parent_ctx = Arc::clone(&ctx);
    callctx::spawn(async move {
        parent_ctx.set_data("k", 1i64);

        let child_ctx = Arc::clone(&parent_ctx);
        callctx::spawn(async move {
            child_ctx.set_data("k", 2i64);
            child_ctx.set_data("child-only", 3i64);
        })
        .unwrap()
        .await
        .unwrap();

        assert_eq!(read_i64(&parent_ctx, "k"), Some(1));
        assert_eq!(read_i64(&parent_ctx, "child-only"), None);
    })
    .unwrap()
    .await
    .unwrap();
}

#[tokio::test]
async fn flow_context_carries_values_into_nested_future() {
    let ctx = test_context();
    let scoped_ctx = Arc::clone(&ctx);
    ContextSnapshot::new()
        .scope(async move {
            scoped_ctx.set_data("k", 5i64);
            let inner_ctx = Arc::clone(&scoped_ctx);
            let seen = async move {
                tokio::task::yield_now().await;
                read_i64(&inner_ctx, "k")
            }
            .flow_context()
            .await;
            assert_eq!(seen, Some(5));
        })
        .await;
}

#[tokio::test]
async fn spawn_blocking_inherits_snapshot() {
    let ctx = test_context();
    let scoped_ctx = Arc::clone(&ctx);
    ContextSnapshot::new()
        .scope(async move {
            scoped_ctx.set_data("k", 11i64);
            let blocking_ctx = Arc::clone(&scoped_ctx);
            let seen = callctx::spawn_blocking(move || read_i64(&blocking_ctx, "k"))
                .unwrap()
                .await
                .unwrap();
            assert_eq!(seen, Some(11));
        })
        .await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn join_all_children_each_see_own_writes() {
    let ctx = test_context();
    let handles: Vec<_> = (0..32i64)
        .map(|i| {
            let ctx = Arc::clone(&ctx);
            callctx::spawn(async move {
                ctx.set_data("k", i);
                tokio::time::sleep(Duration::from_millis((i % 3) as u64)).await;
                read_i64(&ctx, "k") == Some(i)
            })
            .unwrap()
        })
        .collect();

    for h in handles {
        assert!(h.await.unwrap());
    }
}

#[test]
fn spawn_outside_runtime_is_no_runtime_error() {
    assert_eq!(callctx::spawn(async {}).unwrap_err(), Error::NoRuntime);
}
