//! Lifecycle tracking for one asynchronous operation.
//!
//! A [`Fetcher`] owns a `{data, loading, error}` slot and re-runs its
//! producer whenever the dependencies it is watching change. Every run gets a
//! [`CancelToken`]; superseding or tearing down a run cancels its token, and
//! results carrying a cancelled or outdated token are never applied. The
//! request itself keeps running to completion.

use crate::models::api_response::ApiResponse;
use iced::futures::FutureExt;
use iced::futures::future::BoxFuture;
use log::debug;
use std::fmt;
use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Debug, Clone, PartialEq)]
pub struct FetchState<T> {
    pub data: Option<T>,
    pub loading: bool,
    pub error: Option<String>,
}

impl<T> FetchState<T> {
    pub fn loading() -> Self {
        Self {
            data: None,
            loading: true,
            error: None,
        }
    }

    fn settled(response: ApiResponse<T>) -> Self {
        match response.into_result() {
            Ok(data) => Self {
                data: Some(data),
                loading: false,
                error: None,
            },
            Err(error) => Self {
                data: None,
                loading: false,
                error: Some(error),
            },
        }
    }
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        Self::loading()
    }
}

/// Advisory cancellation flag shared between a fetcher and one producer run.
#[derive(Debug, Clone)]
pub struct CancelToken {
    generation: u64,
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    fn new(generation: u64) -> Self {
        Self {
            generation,
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

/// A started run that still has to be driven to completion by the caller.
pub struct Pending<T> {
    token: CancelToken,
    future: BoxFuture<'static, ApiResponse<T>>,
}

impl<T> Pending<T> {
    pub fn token(&self) -> &CancelToken {
        &self.token
    }

    pub async fn settle(self) -> Settled<T> {
        let response = self.future.await;
        Settled {
            token: self.token,
            response,
        }
    }
}

impl<T> fmt::Debug for Pending<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pending")
            .field("token", &self.token)
            .finish_non_exhaustive()
    }
}

/// A finished run, ready to be handed back to [`Fetcher::apply`].
#[derive(Debug, Clone)]
pub struct Settled<T> {
    pub token: CancelToken,
    pub response: ApiResponse<T>,
}

pub struct Fetcher<T, D> {
    state: FetchState<T>,
    deps: Option<D>,
    current: Option<CancelToken>,
    generation: u64,
}

impl<T, D> Fetcher<T, D>
where
    T: Send + 'static,
    D: PartialEq + Clone,
{
    pub fn new() -> Self {
        Self {
            state: FetchState::loading(),
            deps: None,
            current: None,
            generation: 0,
        }
    }

    pub fn state(&self) -> &FetchState<T> {
        &self.state
    }

    pub fn deps(&self) -> Option<&D> {
        self.deps.as_ref()
    }

    pub fn is_in_flight(&self) -> bool {
        self.current.is_some()
    }

    /// Starts a run when `deps` differs from the last watched dependencies.
    pub fn watch<F, Fut>(&mut self, deps: D, producer: F) -> Option<Pending<T>>
    where
        F: FnOnce(CancelToken) -> Fut,
        Fut: Future<Output = ApiResponse<T>> + Send + 'static,
    {
        if self.deps.as_ref() == Some(&deps) {
            return None;
        }
        self.deps = Some(deps);
        Some(self.start(producer))
    }

    /// Re-runs with the current dependencies. Nothing happens before the first `watch`.
    pub fn restart<F, Fut>(&mut self, producer: F) -> Option<Pending<T>>
    where
        F: FnOnce(CancelToken) -> Fut,
        Fut: Future<Output = ApiResponse<T>> + Send + 'static,
    {
        self.deps.as_ref()?;
        Some(self.start(producer))
    }

    fn start<F, Fut>(&mut self, producer: F) -> Pending<T>
    where
        F: FnOnce(CancelToken) -> Fut,
        Fut: Future<Output = ApiResponse<T>> + Send + 'static,
    {
        self.teardown();
        self.generation += 1;

        let token = CancelToken::new(self.generation);
        self.current = Some(token.clone());
        self.state = FetchState::loading();

        let future = producer(token.clone()).boxed();
        Pending { token, future }
    }

    /// Applies a finished run. Returns `false` when the run was cancelled or superseded.
    pub fn apply(&mut self, settled: Settled<T>) -> bool {
        let Settled { token, response } = settled;

        let is_current = self
            .current
            .as_ref()
            .is_some_and(|current| current.generation == token.generation);

        if token.is_cancelled() || !is_current {
            debug!("Discarding result of stale fetch #{}", token.generation);
            return false;
        }

        debug!(
            "Fetch #{} settled (success: {})",
            token.generation,
            response.is_success()
        );
        self.current = None;
        self.state = FetchState::settled(response);
        true
    }

    /// Cancels the in-flight run, if any. Its result will be ignored.
    pub fn teardown(&mut self) {
        if let Some(token) = self.current.take() {
            token.cancel();
        }
    }
}

impl<T, D> Default for Fetcher<T, D>
where
    T: Send + 'static,
    D: PartialEq + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, D> Drop for Fetcher<T, D> {
    fn drop(&mut self) {
        if let Some(token) = self.current.take() {
            token.cancel();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use iced::futures::channel::oneshot;

    fn ready<T: Send + 'static>(
        response: ApiResponse<T>,
    ) -> impl FnOnce(CancelToken) -> std::future::Ready<ApiResponse<T>> {
        move |_| std::future::ready(response)
    }

    #[test]
    fn starts_in_loading_state() {
        let fetcher: Fetcher<String, u32> = Fetcher::new();
        assert_eq!(fetcher.state(), &FetchState::loading());
        assert!(!fetcher.is_in_flight());
    }

    #[tokio::test]
    async fn success_sets_data_and_clears_loading() {
        let mut fetcher: Fetcher<String, u32> = Fetcher::new();

        let pending = fetcher.watch(1, ready(ApiResponse::ok("X".to_string()))).unwrap();
        assert!(fetcher.state().loading);

        assert!(fetcher.apply(pending.settle().await));
        assert_eq!(
            fetcher.state(),
            &FetchState {
                data: Some("X".to_string()),
                loading: false,
                error: None,
            }
        );
        assert!(!fetcher.is_in_flight());
    }

    #[tokio::test]
    async fn failure_sets_error_and_clears_data() {
        let mut fetcher: Fetcher<String, u32> = Fetcher::new();

        let pending = fetcher.watch(1, ready(ApiResponse::err("E"))).unwrap();
        assert!(fetcher.apply(pending.settle().await));

        assert_eq!(
            fetcher.state(),
            &FetchState {
                data: None,
                loading: false,
                error: Some("E".to_string()),
            }
        );
    }

    #[tokio::test]
    async fn dependency_change_resets_previous_data() {
        let mut fetcher: Fetcher<String, u32> = Fetcher::new();

        let first = fetcher.watch(1, ready(ApiResponse::ok("one".to_string()))).unwrap();
        fetcher.apply(first.settle().await);
        assert!(fetcher.state().data.is_some());

        let _second = fetcher.watch(2, ready(ApiResponse::ok("two".to_string()))).unwrap();
        assert_eq!(fetcher.state(), &FetchState::loading());
    }

    #[test]
    fn unchanged_dependencies_do_not_rerun() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut fetcher: Fetcher<u8, &str> = Fetcher::new();

        for _ in 0..3 {
            let calls = Arc::clone(&calls);
            let _ = fetcher.watch("2024-01-01", move |_| {
                calls.fetch_add(1, Ordering::SeqCst);
                std::future::ready(ApiResponse::ok(1))
            });
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn restart_reruns_with_same_dependencies() {
        let mut fetcher: Fetcher<u8, u32> = Fetcher::new();
        assert!(fetcher.restart(ready(ApiResponse::ok(1))).is_none());

        let first = fetcher.watch(7, ready(ApiResponse::ok(1))).unwrap();
        let second = fetcher.restart(ready(ApiResponse::ok(2))).unwrap();

        assert!(first.token().is_cancelled());
        assert!(!second.token().is_cancelled());
        assert_eq!(fetcher.deps(), Some(&7));
    }

    #[tokio::test]
    async fn superseded_results_are_discarded_in_any_order() {
        let mut fetcher: Fetcher<String, &str> = Fetcher::new();

        let first = fetcher
            .watch("2024-01-01", ready(ApiResponse::ok("first".to_string())))
            .unwrap();
        let second = fetcher
            .watch("2024-01-02", ready(ApiResponse::ok("second".to_string())))
            .unwrap();

        let first = first.settle().await;
        let second = second.settle().await;

        assert!(fetcher.apply(second));
        assert!(!fetcher.apply(first));
        assert_eq!(fetcher.state().data.as_deref(), Some("second"));
    }

    #[tokio::test]
    async fn teardown_suppresses_late_results() {
        let (tx, rx) = oneshot::channel::<ApiResponse<String>>();
        let mut fetcher: Fetcher<String, u32> = Fetcher::new();

        let pending = fetcher
            .watch(1, move |_| async move {
                rx.await.unwrap_or_else(|_| ApiResponse::err("dropped"))
            })
            .unwrap();
        let token = pending.token().clone();

        fetcher.teardown();
        assert!(token.is_cancelled());

        tx.send(ApiResponse::ok("late".to_string())).unwrap();
        let settled = pending.settle().await;

        assert!(!fetcher.apply(settled));
        assert_eq!(fetcher.state(), &FetchState::loading());
    }

    #[tokio::test]
    async fn producer_sees_cancellation_after_drop() {
        let mut fetcher: Fetcher<u8, u32> = Fetcher::new();
        let pending = fetcher
            .watch(1, |token| async move {
                if token.is_cancelled() {
                    ApiResponse::err("cancelled")
                } else {
                    ApiResponse::ok(1)
                }
            })
            .unwrap();

        drop(fetcher);

        let settled = pending.settle().await;
        assert!(settled.token.is_cancelled());
        assert_eq!(settled.response.error(), Some("cancelled"));
    }
}
