//! Per-logical-call-chain storage.
//!
//! Identity fields and call-path state live in a [`ChainState`] that is
//! task-local while a future runs inside [`scope`] (or one of its
//! variants) and thread-local otherwise. Two chains never share a
//! `ChainState`, so concurrent requests cannot see each other's request id
//! or nesting depth.

use crate::context::Context;
use std::cell::RefCell;
use std::future::Future;
use tokio::task::JoinHandle;

#[derive(Debug, Clone)]
pub(crate) struct ActiveFrame {
    pub(crate) id: u64,
    pub(crate) name: String,
}

#[derive(Debug, Default, Clone)]
pub(crate) struct ChainState {
    pub(crate) context: Context,
    pub(crate) frames: Vec<ActiveFrame>,
    pub(crate) next_frame_id: u64,
}

impl ChainState {
    fn with_context(context: Context) -> Self {
        ChainState {
            context,
            ..ChainState::default()
        }
    }
}

tokio::task_local! {
    static TASK_CHAIN: RefCell<ChainState>;
}

thread_local! {
    static THREAD_CHAIN: RefCell<ChainState> = RefCell::new(ChainState::default());
}

/// Run `f` against the chain state of the caller. `f` must not log or
/// re-enter this function.
pub(crate) fn with_chain<R>(f: impl FnOnce(&mut ChainState) -> R) -> R {
    if TASK_CHAIN.try_with(|_| ()).is_ok() {
        TASK_CHAIN.with(|chain| f(&mut chain.borrow_mut()))
    } else {
        THREAD_CHAIN.with(|chain| f(&mut chain.borrow_mut()))
    }
}

/// Returns `true` when the caller runs inside a task-scoped chain rather
/// than on the thread's own chain.
pub fn in_task_scope() -> bool {
    TASK_CHAIN.try_with(|_| ()).is_ok()
}

/// Run `fut` as a fresh logical chain: empty context, depth 0.
pub async fn scope<F>(fut: F) -> F::Output
where
    F: Future,
{
    TASK_CHAIN
        .scope(RefCell::new(ChainState::default()), fut)
        .await
}

/// Run `fut` as a fresh logical chain seeded with `context`.
pub async fn scope_with<F>(context: Context, fut: F) -> F::Output
where
    F: Future,
{
    TASK_CHAIN
        .scope(RefCell::new(ChainState::with_context(context)), fut)
        .await
}

/// Run `fut` on the caller's task chain, or as a new chain seeded with the
/// caller's context when the caller has none.
///
/// Async instrumentation goes through here: an unscoped tokio task shares
/// its worker thread's chain with every other unscoped task on that worker
/// and may resume on a different worker after each `.await`.
pub async fn within_chain<F>(fut: F) -> F::Output
where
    F: Future,
{
    if in_task_scope() {
        fut.await
    } else {
        scope_with(crate::context::current(), fut).await
    }
}

/// Spawn `fut` on the current tokio runtime as a new chain that inherits
/// the caller's context. The call path of the new chain starts empty.
pub fn spawn<F>(fut: F) -> JoinHandle<F::Output>
where
    F: Future + Send + 'static,
    F::Output: Send + 'static,
{
    let context = crate::context::current();
    tokio::spawn(scope_with(context, fut))
}

/// Run a synchronous closure as a fresh chain on the current thread,
/// leaving the thread's own chain untouched.
pub fn sync_scope<R>(f: impl FnOnce() -> R) -> R {
    TASK_CHAIN.sync_scope(RefCell::new(ChainState::default()), f)
}
