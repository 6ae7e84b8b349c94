//! Fetch-once remote resources with a tri-state lifecycle.
//!
//! A `RemoteResource` issues exactly one request per mount (or per URL
//! change), then settles into `Ready` or `Error`. The request runs on the
//! tokio runtime and is collected from the frame loop with `poll()`.
//!
//! Unmounting does not abort the request. It flips the instance's liveness
//! guard instead, and a result resolving after that is dropped on the floor.

use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::task::JoinHandle;

use crate::github::FetchError;
use crate::task::{PollResult, poll_task};

/// Lifecycle phase of a remote resource
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Loading,
    Error,
    Ready,
}

/// What the user sees when a fetch failed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchFailure {
    pub message: String,
    pub status: Option<u16>,
}

impl From<FetchError> for FetchFailure {
    fn from(err: FetchError) -> Self {
        Self {
            status: err.status(),
            message: err.to_string(),
        }
    }
}

impl std::fmt::Display for FetchFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Error: {}", self.message)
    }
}

/// Current state of a remote resource. Payload and failure are mutually exclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchState<T> {
    Loading,
    Error(FetchFailure),
    Ready(T),
}

impl<T> FetchState<T> {
    pub fn phase(&self) -> Phase {
        match self {
            FetchState::Loading => Phase::Loading,
            FetchState::Error(_) => Phase::Error,
            FetchState::Ready(_) => Phase::Ready,
        }
    }

    pub fn payload(&self) -> Option<&T> {
        match self {
            FetchState::Ready(payload) => Some(payload),
            _ => None,
        }
    }

    pub fn failure(&self) -> Option<&FetchFailure> {
        match self {
            FetchState::Error(failure) => Some(failure),
            _ => None,
        }
    }
}

type FetchTask<T> = JoinHandle<Option<Result<T, FetchError>>>;

/// A single remote resource bound to one URL at a time
pub struct RemoteResource<T> {
    /// URL of the current mount cycle
    url: Option<String>,
    /// Whether a mount cycle is active
    mounted: bool,
    state: FetchState<T>,
    /// In-flight request; yields `None` if the guard was down at resolution
    task: Option<FetchTask<T>>,
    /// Liveness guard shared with the in-flight request
    alive: Arc<AtomicBool>,
}

impl<T> Default for RemoteResource<T> {
    fn default() -> Self {
        Self {
            url: None,
            mounted: false,
            state: FetchState::Loading,
            task: None,
            alive: Arc::new(AtomicBool::new(false)),
        }
    }
}

impl<T: Send + 'static> RemoteResource<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &FetchState<T> {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Whether a request is still in flight
    pub fn is_pending(&self) -> bool {
        self.task.is_some()
    }

    /// Mount against `url`, starting the request with `fetch`.
    ///
    /// Re-mounting with the URL of the active cycle does nothing. A different
    /// URL tears the active cycle down first. With no URL, nothing is fetched
    /// and the resource stays `Loading`.
    ///
    /// Returns true if a request was started.
    pub fn mount<F, Fut>(&mut self, url: Option<String>, fetch: F) -> bool
    where
        F: FnOnce(String) -> Fut + Send + 'static,
        Fut: Future<Output = Result<T, FetchError>> + Send + 'static,
    {
        if self.mounted && self.url == url {
            return false;
        }

        self.unmount();

        self.mounted = true;
        self.url = url.clone();
        self.alive = Arc::new(AtomicBool::new(true));

        let Some(url) = url else {
            tracing::debug!("Resource mounted without a URL, staying idle");
            return false;
        };

        tracing::debug!("Fetching {}", url);

        let guard = Arc::clone(&self.alive);
        self.task = Some(tokio::spawn(async move {
            let result = fetch(url.clone()).await;
            if guard.load(Ordering::Acquire) {
                Some(result)
            } else {
                tracing::debug!("Discarding result for {} after unmount", url);
                None
            }
        }));

        true
    }

    /// Tear down the active cycle.
    ///
    /// The in-flight request keeps running detached; its result is ignored.
    pub fn unmount(&mut self) {
        self.alive.store(false, Ordering::Release);
        self.task = None;
        self.mounted = false;
        self.url = None;
        self.state = FetchState::Loading;
    }

    /// Collect a finished request. Returns the new phase on a transition.
    pub fn poll(&mut self) -> Option<Phase> {
        match poll_task(&mut self.task) {
            PollResult::Complete(result) => self.apply(result),
            PollResult::Pending | PollResult::NoTask => None,
        }
    }

    /// Wait for the in-flight request and apply it.
    pub async fn settle(&mut self) -> &FetchState<T> {
        if let Some(handle) = self.task.take() {
            let result = handle.await;
            self.apply(result);
        }
        &self.state
    }

    fn apply(
        &mut self,
        result: Result<Option<Result<T, FetchError>>, tokio::task::JoinError>,
    ) -> Option<Phase> {
        if !self.alive.load(Ordering::Acquire) {
            return None;
        }

        self.state = match result {
            Ok(Some(Ok(payload))) => FetchState::Ready(payload),
            Ok(Some(Err(e))) => {
                tracing::error!(
                    "Failed to fetch {}: {}",
                    self.url.as_deref().unwrap_or("<none>"),
                    e
                );
                FetchState::Error(e.into())
            }
            Ok(None) => return None,
            Err(e) => {
                tracing::error!("Fetch task panicked: {}", e);
                FetchState::Error(FetchFailure {
                    message: e.to_string(),
                    status: None,
                })
            }
        };

        Some(self.state.phase())
    }
}

impl<T> Drop for RemoteResource<T> {
    fn drop(&mut self) {
        self.alive.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;
    use std::time::Duration;

    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::github::{GitHubClient, Release};

    async fn release_server(template: ResponseTemplate) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(template)
            .mount(&server)
            .await;
        server
    }

    fn mount_release(resource: &mut RemoteResource<Release>, url: Option<String>) -> bool {
        let client = GitHubClient::new().unwrap();
        resource.mount(url, move |url| async move {
            client.get_release(&url).await.map(|r| r.data)
        })
    }

    #[tokio::test]
    async fn test_release_reaches_ready_with_name() {
        let server = release_server(
            ResponseTemplate::new(200).set_body_string(r#"{"name":"1.0.100"}"#),
        )
        .await;

        let mut resource = RemoteResource::new();
        assert!(mount_release(&mut resource, Some(server.uri())));
        assert_eq!(resource.phase(), Phase::Loading);

        let state = resource.settle().await;
        assert_eq!(state.payload().map(Release::version), Some("1.0.100"));
        assert!(state.failure().is_none());
    }

    #[tokio::test]
    async fn test_http_status_becomes_error_with_code() {
        for code in [404u16, 500] {
            let server = release_server(ResponseTemplate::new(code)).await;

            let mut resource = RemoteResource::new();
            mount_release(&mut resource, Some(server.uri()));
            let state = resource.settle().await;

            let failure = state.failure().expect("error state");
            assert!(failure.message.contains(&code.to_string()));
            assert_eq!(failure.status, Some(code));
            assert!(state.payload().is_none());
        }
    }

    #[tokio::test]
    async fn test_network_failure_errors_exactly_once() {
        let mut resource: RemoteResource<String> = RemoteResource::new();
        resource.mount(Some("unreachable".to_string()), |_| async {
            Err(FetchError::Network("connection refused".to_string()))
        });

        let mut transitions = 0;
        while resource.is_pending() {
            if resource.poll().is_some() {
                transitions += 1;
            }
            tokio::task::yield_now().await;
        }
        for _ in 0..3 {
            if resource.poll().is_some() {
                transitions += 1;
            }
        }

        assert_eq!(transitions, 1);
        assert_eq!(
            resource.state().failure().map(|f| f.to_string()),
            Some("Error: connection refused".to_string())
        );
    }

    #[tokio::test]
    async fn test_unmount_before_resolution_discards_result() {
        let server = release_server(
            ResponseTemplate::new(200)
                .set_body_string(r#"{"name":"late"}"#)
                .set_delay(Duration::from_millis(100)),
        )
        .await;

        let mut resource = RemoteResource::new();
        mount_release(&mut resource, Some(server.uri()));
        let handle = resource.task.take().expect("request started");
        resource.unmount();

        // The request still completes, but the guard suppresses its result
        assert_eq!(handle.await.unwrap(), None);
        assert_eq!(resource.poll(), None);
        assert_eq!(resource.phase(), Phase::Loading);
        assert_eq!(server.received_requests().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_missing_url_stays_loading_without_fetch() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);

        let mut resource: RemoteResource<String> = RemoteResource::new();
        let started = resource.mount(None, move |_| async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Ok(String::new())
        });

        assert!(!started);
        assert!(resource.is_mounted());
        assert_eq!(resource.settle().await.phase(), Phase::Loading);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_remount_same_url_is_single_fetch() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut resource: RemoteResource<String> = RemoteResource::new();

        for _ in 0..3 {
            let counter = Arc::clone(&calls);
            resource.mount(Some("a".to_string()), move |url| async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Ok(url)
            });
        }
        resource.settle().await;

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(resource.state().payload().map(String::as_str), Some("a"));
    }

    #[tokio::test]
    async fn test_url_change_refetches() {
        let mut resource: RemoteResource<String> = RemoteResource::new();
        resource.mount(Some("first".to_string()), |url| async move { Ok(url) });
        resource.settle().await;

        let started = resource.mount(Some("second".to_string()), |url| async move { Ok(url) });
        assert!(started);
        assert_eq!(resource.phase(), Phase::Loading);

        let state = resource.settle().await;
        assert_eq!(state.payload().map(String::as_str), Some("second"));
    }
}
