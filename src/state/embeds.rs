//! Code embed state for the examples tab

use crate::code_embed::CodeEmbed;
use crate::config::EmbedConfig;
use crate::github::GitHubClient;
use crate::resource::Phase;
use crate::state::StateEvent;

/// All configured code embeds
#[derive(Default)]
pub struct EmbedsState {
    pub embeds: Vec<CodeEmbed>,
}

impl EmbedsState {
    pub fn from_config(configs: &[EmbedConfig]) -> Self {
        Self {
            embeds: configs.iter().map(CodeEmbed::from_config).collect(),
        }
    }

    /// Mount every embed. Already-mounted embeds are left alone.
    pub fn mount_all(&mut self, client: &GitHubClient) -> usize {
        self.embeds
            .iter_mut()
            .map(|embed| embed.mount(client))
            .filter(|started| *started)
            .count()
    }

    /// Repoint embeds at new sources, pairwise. Blank entries leave an embed
    /// without a source. Returns how many requests were started.
    pub fn set_sources(&mut self, sources: &[String], client: &GitHubClient) -> usize {
        self.embeds
            .iter_mut()
            .zip(sources)
            .map(|(embed, src)| {
                let src = src.trim();
                let src = (!src.is_empty()).then(|| src.to_string());
                embed.set_source(src, client)
            })
            .filter(|started| *started)
            .count()
    }

    pub fn unmount_all(&mut self) {
        for embed in &mut self.embeds {
            embed.unmount();
        }
    }

    pub fn is_pending(&self) -> bool {
        self.embeds.iter().any(CodeEmbed::is_pending)
    }

    /// Poll every embed for completion
    pub fn poll(&mut self) -> Vec<StateEvent> {
        let mut events = Vec::new();

        for embed in &mut self.embeds {
            let name = embed.file_name().unwrap_or("<none>").to_string();
            match embed.poll() {
                Some(Phase::Ready) => {
                    events.push(StateEvent::LogInfo(format!("Loaded code embed {}", name)));
                }
                Some(Phase::Error) => {
                    let message = embed
                        .state()
                        .failure()
                        .map(|f| f.message.clone())
                        .unwrap_or_default();
                    events.push(StateEvent::LogError(format!(
                        "Failed to fetch code {}: {}",
                        name, message
                    )));
                }
                Some(Phase::Loading) | None => {}
            }
        }

        events
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_embeds_fail_independently() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/Good.java"))
            .respond_with(ResponseTemplate::new(200).set_body_string("class Good {}"))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/Bad.java"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let configs = vec![
            EmbedConfig { src: format!("{}/Good.java", server.uri()), language: None },
            EmbedConfig { src: format!("{}/Bad.java", server.uri()), language: None },
        ];
        let mut state = EmbedsState::from_config(&configs);
        let client = GitHubClient::new().unwrap();
        assert_eq!(state.mount_all(&client), 2);
        assert_eq!(state.mount_all(&client), 0);

        let mut events = Vec::new();
        while state.is_pending() {
            events.extend(state.poll());
            tokio::task::yield_now().await;
        }

        assert_eq!(events.len(), 2);
        assert!(state.embeds[0].markdown().is_some());
        assert_eq!(state.embeds[1].state().failure().and_then(|f| f.status), Some(404));
    }

    #[tokio::test]
    async fn test_set_sources_refetches_mounted_embeds() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("class X {}"))
            .mount(&server)
            .await;

        let configs = vec![
            EmbedConfig { src: format!("{}/A.java", server.uri()), language: None },
            EmbedConfig { src: format!("{}/B.java", server.uri()), language: None },
        ];
        let mut state = EmbedsState::from_config(&configs);
        let client = GitHubClient::new().unwrap();
        state.mount_all(&client);

        let sources = vec![configs[0].src.clone(), format!("  {}/C.py ", server.uri())];
        assert_eq!(state.set_sources(&sources, &client), 1);
        assert_eq!(state.embeds[1].file_name(), Some("C.py"));
        assert_eq!(state.embeds[1].language(), "python");

        assert_eq!(state.set_sources(&[String::new()], &client), 0);
        assert_eq!(state.embeds[0].file_name(), None);
    }
}
