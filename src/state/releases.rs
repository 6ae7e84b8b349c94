//! Latest-release state shared by the version badge and the dependency snippets

use crate::config::ReleaseConfig;
use crate::github::{FetchResult, GitHubClient, RateLimitInfo, Release};
use crate::resource::{FetchState, Phase, RemoteResource};
use crate::snippets::{DependencySnippet, dependency_snippets};
use crate::state::StateEvent;

/// Latest release lookup, fetched once per mount
#[derive(Default)]
pub struct ReleaseState {
    resource: RemoteResource<FetchResult<Release>>,
    /// Last known rate limit info from GitHub API
    pub rate_limit: RateLimitInfo,
}

impl ReleaseState {
    pub fn state(&self) -> &FetchState<FetchResult<Release>> {
        self.resource.state()
    }

    /// The release, once loaded
    pub fn release(&self) -> Option<&Release> {
        self.state().payload().map(|r| &r.data)
    }

    pub fn is_loading(&self) -> bool {
        self.resource.phase() == Phase::Loading
    }

    pub fn is_pending(&self) -> bool {
        self.resource.is_pending()
    }

    /// Start the lookup for the configured repository
    pub fn mount(&mut self, config: &ReleaseConfig, client: &GitHubClient) -> Option<StateEvent> {
        let url = client.latest_release_url(&config.repository);
        let client = client.clone();
        let started = self.resource.mount(Some(url), move |url| async move {
            client.get_release(&url).await
        });

        started.then(|| StateEvent::StatusMessage("Fetching latest release...".to_string()))
    }

    pub fn unmount(&mut self) {
        self.resource.unmount();
    }

    /// Poll the lookup for completion
    pub fn poll(&mut self) -> Vec<StateEvent> {
        let mut events = Vec::new();

        match self.resource.poll() {
            Some(Phase::Ready) => {
                if let Some(result) = self.resource.state().payload() {
                    self.rate_limit = result.rate_limit.clone();
                    let name = result.data.version().to_string();
                    events.push(StateEvent::StatusMessage(format!("Latest release: {}", name)));
                    events.push(StateEvent::LogInfo(format!("Fetched latest release {}", name)));
                }
            }
            Some(Phase::Error) => {
                if let Some(failure) = self.resource.state().failure() {
                    events.push(StateEvent::LogError(format!(
                        "Failed to fetch release info: {}",
                        failure.message
                    )));
                    events.push(StateEvent::StatusMessage(failure.to_string()));
                }
            }
            Some(Phase::Loading) | None => {}
        }

        events
    }

    /// Wait for the lookup and apply it
    pub async fn settle(&mut self) {
        if let Some(result) = self.resource.settle().await.payload() {
            self.rate_limit = result.rate_limit.clone();
        }
    }

    /// Dependency snippets for the loaded release
    pub fn snippets(&self, config: &ReleaseConfig) -> Option<Vec<DependencySnippet>> {
        self.release()
            .map(|r| dependency_snippets(&config.group_id, &config.artifact_id, r.version()))
    }
}
