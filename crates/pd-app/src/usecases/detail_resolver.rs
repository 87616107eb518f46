//! Detail resolver orchestration
//!
//! 这个模块负责驱动 `ResolverStateMachine`: 把 locator 变化、请求完成和卸载
//! 转换为状态机事件, 并执行状态机返回的动作。
//!
//! # Architecture / 架构
//!
//! ```text
//! set_locator / unmount / fetch completion
//!   ↓
//! DetailResolver (converts events, owns the lock)
//!   ↓
//! ResolverStateMachine (pure state transitions)
//!   ↓
//! ResolverActions (spawn fetch / cancel token / publish FetchState)
//! ```
//!
//! Every fetch runs in its own task with a child of the resolver's lifetime
//! token. Changing the locator cancels the previous fetch; dropping or
//! unmounting the resolver cancels all of them. A completion that still
//! slips through is rejected by the state machine's generation check.

use pd_core::detail::{FrontSprite, Projection};
use pd_core::fetch::{
    FetchFailure, FetchState, Generation, ResolverAction, ResolverEvent, ResolverStateMachine,
};
use pd_core::ports::DetailSourcePort;
use pd_core::Locator;
use std::sync::Arc;
use tokio::sync::{watch, Mutex};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// One detail view's resolver, parameterized by the projection it applies.
pub struct DetailResolver<P: Projection> {
    inner: Arc<ResolverInner<P>>,
}

struct ResolverInner<P: Projection> {
    source: Arc<dyn DetailSourcePort>,
    projection: P,
    core: Mutex<ResolverCore<P::Output>>,
    state_tx: watch::Sender<FetchState<P::Output>>,
    /// Tied to the owning view; every fetch token is a child of it.
    lifetime: CancellationToken,
}

struct ResolverCore<T> {
    machine: ResolverStateMachine<T>,
    in_flight: Option<(Generation, CancellationToken)>,
}

impl<P: Projection> DetailResolver<P> {
    /// Create an idle resolver. Nothing is fetched until a locator is set.
    pub fn new(source: Arc<dyn DetailSourcePort>, projection: P) -> Self {
        let (state_tx, _) = watch::channel(FetchState::idle());
        Self {
            inner: Arc::new(ResolverInner {
                source,
                projection,
                core: Mutex::new(ResolverCore {
                    machine: ResolverStateMachine::new(),
                    in_flight: None,
                }),
                state_tx,
                lifetime: CancellationToken::new(),
            }),
        }
    }

    /// Point the resolver at `locator`.
    ///
    /// A new locator publishes `loading = true` (keeping the previous value)
    /// before the fetch is spawned. The same locator again is a no-op. A
    /// blank locator settles to `loading = false, value = None` without any
    /// network call.
    pub async fn set_locator(&self, locator: impl Into<Locator>) {
        ResolverInner::dispatch(&self.inner, ResolverEvent::LocatorChanged(locator.into())).await;
    }

    /// Detach from the owning view. Any in-flight fetch is cancelled and
    /// late responses are ignored.
    pub async fn unmount(&self) {
        ResolverInner::dispatch(&self.inner, ResolverEvent::Unmount).await;
        self.inner.lifetime.cancel();
    }

    /// Current snapshot.
    pub fn state(&self) -> FetchState<P::Output> {
        self.inner.state_tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<FetchState<P::Output>> {
        self.inner.state_tx.subscribe()
    }

    /// Wait until the current resolution is no longer loading.
    pub async fn settled(&self) -> FetchState<P::Output> {
        let mut rx = self.inner.state_tx.subscribe();
        let settled = match rx.wait_for(|state| !state.loading).await {
            Ok(state) => state.clone(),
            Err(_) => self.state(),
        };
        settled
    }
}

impl<P: Projection> Drop for DetailResolver<P> {
    fn drop(&mut self) {
        self.inner.lifetime.cancel();
    }
}

impl<P: Projection> ResolverInner<P> {
    /// Feed one event through the state machine and run the resulting actions
    /// while still holding the lock, so publishes keep transition order.
    async fn dispatch(inner: &Arc<Self>, event: ResolverEvent<P::Output>) {
        let mut core = inner.core.lock().await;

        if let ResolverEvent::FetchCompleted { generation, .. } = &event {
            if matches!(&core.in_flight, Some((current, _)) if current == generation) {
                core.in_flight = None;
            }
        }

        let actions = core.machine.handle_event(event);
        for action in actions {
            match action {
                ResolverAction::StartFetch {
                    locator,
                    generation,
                } => {
                    let token = inner.lifetime.child_token();
                    core.in_flight = Some((generation, token.clone()));
                    Self::spawn_fetch(inner, locator, generation, token);
                }
                ResolverAction::CancelFetch { generation } => {
                    if let Some((current, token)) = core.in_flight.take() {
                        if current == generation {
                            token.cancel();
                        } else {
                            core.in_flight = Some((current, token));
                        }
                    }
                }
                ResolverAction::Publish(state) => {
                    inner.state_tx.send_replace(state);
                }
                ResolverAction::DiscardCompletion { generation } => {
                    debug!(generation, "Discarding superseded fetch completion");
                }
                ResolverAction::LogTransition {
                    old_state,
                    event,
                    new_state,
                } => {
                    debug!(%old_state, %event, %new_state, "Resolver transition");
                }
            }
        }
    }

    fn spawn_fetch(
        inner: &Arc<Self>,
        locator: Locator,
        generation: Generation,
        token: CancellationToken,
    ) {
        let inner = Arc::clone(inner);
        tokio::spawn(async move {
            let outcome = tokio::select! {
                _ = token.cancelled() => {
                    debug!(%locator, generation, "Fetch cancelled before completion");
                    return;
                }
                outcome = inner.fetch(&locator) => outcome,
            };

            if token.is_cancelled() {
                debug!(%locator, generation, "Dropping response of cancelled fetch");
                return;
            }

            Self::dispatch(
                &inner,
                ResolverEvent::FetchCompleted {
                    generation,
                    outcome,
                },
            )
            .await;
        });
    }

    async fn fetch(&self, locator: &Locator) -> Result<P::Output, FetchFailure> {
        let outcome = self.fetch_and_project(locator).await;
        if let Err(err) = &outcome {
            warn!(%locator, error = %err, "Error fetching detail");
        }
        outcome
    }

    async fn fetch_and_project(&self, locator: &Locator) -> Result<P::Output, FetchFailure> {
        let document = self.source.fetch_document(locator).await?;
        let record = self.projection.project(&document)?;
        Ok(record)
    }
}

/// `{ image_uri, loading }` view of an image-only resolver.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageState {
    pub image_uri: Option<String>,
    pub loading: bool,
}

impl From<FetchState<String>> for ImageState {
    fn from(state: FetchState<String>) -> Self {
        Self {
            image_uri: state.value,
            loading: state.loading,
        }
    }
}

impl DetailResolver<FrontSprite> {
    pub fn image(&self) -> ImageState {
        self.state().into()
    }

    pub fn image_uri(&self) -> Option<String> {
        self.state().value
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use pd_core::detail::FullDetail;
    use pd_core::ports::CatalogError;
    use serde_json::{json, Value};
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::time::Duration;
    use tokio::sync::Notify;

    const BULBASAUR: &str = "https://pokeapi.co/api/v2/pokemon/1/";
    const IVYSAUR: &str = "https://pokeapi.co/api/v2/pokemon/2/";

    #[derive(Default)]
    struct FakeSource {
        documents: HashMap<String, Value>,
        gates: HashMap<String, Arc<Notify>>,
        calls: AtomicUsize,
    }

    impl FakeSource {
        fn with_document(mut self, locator: &str, document: Value) -> Self {
            self.documents.insert(locator.to_string(), document);
            self
        }

        fn with_gate(mut self, locator: &str, gate: Arc<Notify>) -> Self {
            self.gates.insert(locator.to_string(), gate);
            self
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl DetailSourcePort for FakeSource {
        async fn fetch_document(&self, locator: &Locator) -> Result<Value, CatalogError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(gate) = self.gates.get(locator.as_str()) {
                gate.notified().await;
            }
            self.documents
                .get(locator.as_str())
                .cloned()
                .ok_or(CatalogError::Status(404))
        }
    }

    fn document(id: u32, name: &str) -> Value {
        json!({
            "id": id,
            "name": name,
            "height": 7,
            "weight": 69,
            "sprites": {"front_default": format!("https://img/{id}.png")},
            "types": [{"slot": 1, "type": {"name": "grass", "url": ""}}],
        })
    }

    async fn settle_background_tasks() {
        tokio::time::sleep(Duration::from_millis(20)).await;
    }

    #[tokio::test]
    async fn publishes_loading_then_resolved_for_one_locator() {
        let source = Arc::new(FakeSource::default().with_document(BULBASAUR, document(1, "bulbasaur")));
        let resolver = DetailResolver::new(source.clone(), FullDetail);

        resolver.set_locator(BULBASAUR).await;
        let loading = resolver.state();
        assert!(loading.loading);
        assert!(loading.value.is_none());

        let settled = resolver.settled().await;
        assert!(!settled.loading);
        assert_eq!(settled.value.map(|d| d.name), Some("bulbasaur".to_string()));

        // Same locator: no refetch and loading never flips back.
        resolver.set_locator(BULBASAUR).await;
        assert!(!resolver.state().loading);
        assert_eq!(source.calls(), 1);
    }

    #[tokio::test]
    async fn blank_locator_never_touches_the_network() {
        let source = Arc::new(FakeSource::default());
        let resolver = DetailResolver::new(source.clone(), FullDetail);

        resolver.set_locator("").await;

        assert_eq!(resolver.settled().await, FetchState::idle());
        settle_background_tasks().await;
        assert_eq!(source.calls(), 0);
    }

    #[tokio::test]
    async fn failed_fetch_settles_to_absent() {
        let source = Arc::new(FakeSource::default());
        let resolver = DetailResolver::new(source, FullDetail);

        resolver.set_locator(BULBASAUR).await;
        let settled = resolver.settled().await;

        assert!(settled.is_absent());
    }

    #[tokio::test]
    async fn projection_failure_settles_to_absent() {
        let source = Arc::new(
            FakeSource::default().with_document(BULBASAUR, json!({"sprites": {"front_default": null}})),
        );
        let resolver = DetailResolver::new(source, FrontSprite);

        resolver.set_locator(BULBASAUR).await;
        resolver.settled().await;

        assert_eq!(
            resolver.image(),
            ImageState {
                image_uri: None,
                loading: false
            }
        );
    }

    #[tokio::test]
    async fn resolvers_do_not_affect_each_other() {
        let gate = Arc::new(Notify::new());
        let source = Arc::new(
            FakeSource::default()
                .with_document(BULBASAUR, document(1, "bulbasaur"))
                .with_document(IVYSAUR, document(2, "ivysaur"))
                .with_gate(IVYSAUR, gate.clone()),
        );
        let a = DetailResolver::new(source.clone(), FullDetail);
        let b = DetailResolver::new(source.clone(), FullDetail);

        a.set_locator(BULBASAUR).await;
        b.set_locator(IVYSAUR).await;
        let b_before = b.state();

        a.settled().await;
        assert_eq!(b.state(), b_before);
        assert!(b.state().loading);

        gate.notify_one();
        assert_eq!(b.settled().await.value.map(|d| d.id), Some(2));
        assert_eq!(a.state().value.map(|d| d.id), Some(1));
    }

    #[tokio::test]
    async fn superseded_response_does_not_overwrite_newer_locator() {
        let slow = Arc::new(Notify::new());
        let source = Arc::new(
            FakeSource::default()
                .with_document(BULBASAUR, document(1, "bulbasaur"))
                .with_document(IVYSAUR, document(2, "ivysaur"))
                .with_gate(BULBASAUR, slow.clone()),
        );
        let resolver = DetailResolver::new(source, FullDetail);

        resolver.set_locator(BULBASAUR).await;
        resolver.set_locator(IVYSAUR).await;
        assert_eq!(resolver.settled().await.value.map(|d| d.id), Some(2));

        slow.notify_one();
        settle_background_tasks().await;

        assert_eq!(resolver.state().value.map(|d| d.id), Some(2));
        assert!(!resolver.state().loading);
    }

    #[tokio::test]
    async fn refetch_keeps_previous_record_while_loading() {
        let gate = Arc::new(Notify::new());
        let source = Arc::new(
            FakeSource::default()
                .with_document(BULBASAUR, document(1, "bulbasaur"))
                .with_document(IVYSAUR, document(2, "ivysaur"))
                .with_gate(IVYSAUR, gate.clone()),
        );
        let resolver = DetailResolver::new(source, FullDetail);

        resolver.set_locator(BULBASAUR).await;
        resolver.settled().await;
        resolver.set_locator(IVYSAUR).await;

        let loading = resolver.state();
        assert!(loading.loading);
        assert_eq!(loading.value.map(|d| d.id), Some(1));

        gate.notify_one();
        assert_eq!(resolver.settled().await.value.map(|d| d.id), Some(2));
    }

    #[tokio::test]
    async fn late_response_after_unmount_is_ignored() {
        let gate = Arc::new(Notify::new());
        let source = Arc::new(
            FakeSource::default()
                .with_document(BULBASAUR, document(1, "bulbasaur"))
                .with_gate(BULBASAUR, gate.clone()),
        );
        let resolver = DetailResolver::new(source, FullDetail);
        let mut rx = resolver.subscribe();

        resolver.set_locator(BULBASAUR).await;
        resolver.unmount().await;
        let _ = rx.borrow_and_update();

        gate.notify_one();
        settle_background_tasks().await;

        assert!(!rx.has_changed().unwrap());
        assert!(resolver.state().is_absent());
    }

    /// Sets its flag when the pending fetch future is dropped.
    struct DropFlag(Arc<AtomicBool>);

    impl Drop for DropFlag {
        fn drop(&mut self) {
            self.0.store(true, Ordering::SeqCst);
        }
    }

    struct HangingSource {
        started: Arc<Notify>,
        dropped: Arc<AtomicBool>,
    }

    #[async_trait]
    impl DetailSourcePort for HangingSource {
        async fn fetch_document(&self, _locator: &Locator) -> Result<Value, CatalogError> {
            let _flag = DropFlag(self.dropped.clone());
            self.started.notify_one();
            tokio::time::sleep(Duration::from_secs(30)).await;
            Err(CatalogError::Transport("timed out".into()))
        }
    }

    #[tokio::test]
    async fn dropping_resolver_cancels_in_flight_fetch() {
        let started = Arc::new(Notify::new());
        let dropped = Arc::new(AtomicBool::new(false));
        let source = Arc::new(HangingSource {
            started: started.clone(),
            dropped: dropped.clone(),
        });
        let resolver = DetailResolver::new(source, FullDetail);

        resolver.set_locator(BULBASAUR).await;
        started.notified().await;
        assert!(!dropped.load(Ordering::SeqCst));

        drop(resolver);
        settle_background_tasks().await;

        assert!(dropped.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn image_projection_matches_full_projection() {
        let source = Arc::new(FakeSource::default().with_document(BULBASAUR, document(1, "bulbasaur")));
        let full = DetailResolver::new(source.clone(), FullDetail);
        let image = DetailResolver::new(source, FrontSprite);

        full.set_locator(BULBASAUR).await;
        image.set_locator(BULBASAUR).await;
        let record = full.settled().await.value.unwrap();
        image.settled().await;

        assert_eq!(image.image().image_uri, record.sprites.front_default);
    }
}
