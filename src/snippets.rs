//! "Add to your project" dependency snippets for a release.

use serde::Serialize;

/// One build-tool snippet
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DependencySnippet {
    /// Heading shown above the snippet
    pub title: &'static str,
    /// Build file the snippet belongs in
    pub file: &'static str,
    /// Highlighting language
    pub language: &'static str,
    pub code: String,
}

/// Maven, Groovy Gradle and Kotlin Gradle snippets for `group:artifact:version`
pub fn dependency_snippets(
    group_id: &str,
    artifact_id: &str,
    version: &str,
) -> Vec<DependencySnippet> {
    vec![
        DependencySnippet {
            title: "Using Maven",
            file: "pom.xml",
            language: "xml",
            code: format!(
                "<dependency>\n    \
                 <groupId>{group_id}</groupId>\n    \
                 <artifactId>{artifact_id}</artifactId>\n    \
                 <version>{version}</version>\n\
                 </dependency>"
            ),
        },
        DependencySnippet {
            title: "Using Groovy-based",
            file: "build.gradle",
            language: "groovy",
            code: format!(
                "dependencies {{\n    implementation '{group_id}:{artifact_id}:{version}'\n}}"
            ),
        },
        DependencySnippet {
            title: "For Kotlin-based",
            file: "build.gradle.kts",
            language: "kotlin",
            code: format!(
                "dependencies {{\n    implementation(\"{group_id}:{artifact_id}:{version}\")\n}}"
            ),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snippets_embed_release_name() {
        let snippets = dependency_snippets("io.github.ollama4j", "ollama4j", "1.1.0");
        assert_eq!(snippets.len(), 3);

        assert_eq!(snippets[0].file, "pom.xml");
        assert_eq!(
            snippets[0].code,
            "<dependency>\n    <groupId>io.github.ollama4j</groupId>\n    \
             <artifactId>ollama4j</artifactId>\n    <version>1.1.0</version>\n</dependency>"
        );
        assert_eq!(
            snippets[1].code,
            "dependencies {\n    implementation 'io.github.ollama4j:ollama4j:1.1.0'\n}"
        );
        assert!(snippets[2]
            .code
            .contains("implementation(\"io.github.ollama4j:ollama4j:1.1.0\")"));
    }
}
