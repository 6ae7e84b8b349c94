//! Source files embedded from GitHub.
//!
//! The file is fetched from its raw-content URL; the title row links back to
//! the browsable blob page, which is derived from the raw URL by plain text
//! substitution (no request is made for it).

use crate::config::EmbedConfig;
use crate::github::GitHubClient;
use crate::resource::{FetchState, Phase, RemoteResource};

const RAW_CONTENT_PREFIX: &str = "https://raw.githubusercontent.com";
const BROWSE_PREFIX: &str = "https://github.com";
const RAW_REF_SEGMENT: &str = "/refs/heads/";
const BLOB_SEGMENT: &str = "/blob/";

/// Highlighting language when none can be inferred
const DEFAULT_LANGUAGE: &str = "java";

/// Browsable GitHub page for a raw-content URL
pub fn github_blob_url(src: &str) -> String {
    src.replacen(RAW_CONTENT_PREFIX, BROWSE_PREFIX, 1)
        .replacen(RAW_REF_SEGMENT, BLOB_SEGMENT, 1)
}

/// Filename label: everything after the last `/`
pub fn file_label(src: &str) -> &str {
    src.rsplit('/').next().unwrap_or(src)
}

/// Highlighting language for a file, from its extension
pub fn language_for(src: &str) -> &'static str {
    let name = file_label(src);
    let ext = name.rsplit_once('.').map(|(_, ext)| ext).unwrap_or("");
    match ext.to_ascii_lowercase().as_str() {
        "java" => "java",
        "kt" | "kts" => "kotlin",
        "groovy" | "gradle" => "groovy",
        "xml" => "xml",
        "py" => "python",
        "rs" => "rust",
        "js" => "javascript",
        "ts" => "typescript",
        "json" => "json",
        "yml" | "yaml" => "yaml",
        "toml" => "toml",
        "sh" => "bash",
        "md" => "markdown",
        _ => DEFAULT_LANGUAGE,
    }
}

/// Wrap code in a fenced markdown block so the viewer highlights it
pub fn fenced(code: &str, language: &str) -> String {
    // A fence longer than any backtick run inside the code
    let longest = code
        .split(|c: char| c != '`')
        .map(str::len)
        .max()
        .unwrap_or(0);
    let fence = "`".repeat(longest.max(2) + 1);
    let newline = if code.ends_with('\n') { "" } else { "\n" };
    format!("{fence}{language}\n{code}{newline}{fence}\n")
}

/// One embedded file and its fetch lifecycle
pub struct CodeEmbed {
    src: Option<String>,
    language: Option<String>,
    resource: RemoteResource<String>,
}

impl CodeEmbed {
    pub fn new(src: Option<String>, language: Option<String>) -> Self {
        Self {
            src,
            language,
            resource: RemoteResource::new(),
        }
    }

    pub fn from_config(config: &EmbedConfig) -> Self {
        Self::new(Some(config.src.clone()), config.language.clone())
    }

    /// Browsable URL for the title link
    pub fn github_url(&self) -> Option<String> {
        self.src.as_deref().map(github_blob_url)
    }

    pub fn file_name(&self) -> Option<&str> {
        self.src.as_deref().map(file_label)
    }

    pub fn language(&self) -> &str {
        match (&self.language, &self.src) {
            (Some(lang), _) => lang.as_str(),
            (None, Some(src)) => language_for(src),
            (None, None) => DEFAULT_LANGUAGE,
        }
    }

    pub fn state(&self) -> &FetchState<String> {
        self.resource.state()
    }

    pub fn is_pending(&self) -> bool {
        self.resource.is_pending()
    }

    /// Start fetching the current source, if not already mounted on it
    pub fn mount(&mut self, client: &GitHubClient) -> bool {
        let client = client.clone();
        self.resource.mount(self.src.clone(), move |url| async move {
            client.get_text(&url).await
        })
    }

    /// Point the embed at a different file. A mounted embed refetches on a
    /// changed URL; an unmounted one picks it up on its next mount.
    pub fn set_source(&mut self, src: Option<String>, client: &GitHubClient) -> bool {
        if self.src == src {
            return false;
        }
        self.src = src;
        if !self.resource.is_mounted() {
            return false;
        }
        self.mount(client)
    }

    pub fn unmount(&mut self) {
        self.resource.unmount();
    }

    pub fn poll(&mut self) -> Option<Phase> {
        self.resource.poll()
    }

    pub async fn settle(&mut self) -> &FetchState<String> {
        self.resource.settle().await
    }

    /// Markdown for the loaded code, ready for the viewer
    pub fn markdown(&self) -> Option<String> {
        self.state()
            .payload()
            .map(|code| fenced(code, self.language()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const RAW: &str = "https://raw.githubusercontent.com/org/repo/refs/heads/main/Foo.java";

    #[test]
    fn test_github_blob_url() {
        assert_eq!(
            github_blob_url(RAW),
            "https://github.com/org/repo/blob/main/Foo.java"
        );
        // Non-raw URLs pass through untouched
        assert_eq!(
            github_blob_url("https://example.com/a/b.txt"),
            "https://example.com/a/b.txt"
        );
    }

    #[test]
    fn test_file_label() {
        assert_eq!(file_label(RAW), "Foo.java");
        assert_eq!(file_label("Foo.java"), "Foo.java");
        assert_eq!(file_label("https://example.com/dir/"), "");
    }

    #[test]
    fn test_language_for() {
        assert_eq!(language_for(RAW), "java");
        assert_eq!(language_for("https://x/build.gradle.kts"), "kotlin");
        assert_eq!(language_for("https://x/pom.xml"), "xml");
        assert_eq!(language_for("https://x/LICENSE"), "java");
    }

    #[test]
    fn test_fenced_outgrows_inner_backticks() {
        assert_eq!(fenced("int x;", "java"), "```java\nint x;\n```\n");
        let md = fenced("// ````\n", "java");
        assert!(md.starts_with("`````java\n"));
        assert!(md.ends_with("\n`````\n"));
    }

    #[test]
    fn test_embed_labels() {
        let embed = CodeEmbed::new(Some(RAW.to_string()), None);
        assert_eq!(embed.file_name(), Some("Foo.java"));
        assert_eq!(
            embed.github_url().as_deref(),
            Some("https://github.com/org/repo/blob/main/Foo.java")
        );
        assert_eq!(embed.language(), "java");

        let override_lang = CodeEmbed::new(Some(RAW.to_string()), Some("text".into()));
        assert_eq!(override_lang.language(), "text");
    }

    #[tokio::test]
    async fn test_embed_fetches_code() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/org/repo/refs/heads/main/Foo.java"))
            .respond_with(ResponseTemplate::new(200).set_body_string("class Foo {}"))
            .mount(&server)
            .await;

        let client = GitHubClient::new().unwrap();
        let src = format!("{}/org/repo/refs/heads/main/Foo.java", server.uri());
        let mut embed = CodeEmbed::new(Some(src), None);
        assert!(embed.mount(&client));

        embed.settle().await;
        assert_eq!(embed.markdown().as_deref(), Some("```java\nclass Foo {}\n```\n"));
    }

    #[tokio::test]
    async fn test_embed_error_keeps_payload_empty() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let client = GitHubClient::new().unwrap();
        let mut embed = CodeEmbed::new(Some(format!("{}/Missing.java", server.uri())), None);
        embed.mount(&client);

        let state = embed.settle().await;
        assert_eq!(
            state.failure().map(|f| f.to_string()).as_deref(),
            Some("Error: HTTP error! status: 404")
        );
        assert!(embed.markdown().is_none());
    }

    #[tokio::test]
    async fn test_set_source_refetches_only_on_change() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("x"))
            .mount(&server)
            .await;

        let client = GitHubClient::new().unwrap();
        let first = format!("{}/A.java", server.uri());
        let mut embed = CodeEmbed::new(Some(first.clone()), None);
        embed.mount(&client);
        embed.settle().await;

        assert!(!embed.set_source(Some(first), &client));
        assert!(embed.set_source(Some(format!("{}/B.kt", server.uri())), &client));
        assert_eq!(embed.language(), "kotlin");
        embed.settle().await;

        assert_eq!(server.received_requests().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_set_source_while_unmounted_defers_fetch() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("x"))
            .mount(&server)
            .await;

        let client = GitHubClient::new().unwrap();
        let mut embed = CodeEmbed::new(Some(format!("{}/A.java", server.uri())), None);

        assert!(!embed.set_source(Some(format!("{}/B.java", server.uri())), &client));
        assert!(!embed.is_pending());
        assert_eq!(embed.file_name(), Some("B.java"));

        assert!(embed.mount(&client));
        embed.settle().await;
        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].url.path(), "/B.java");
    }
}
