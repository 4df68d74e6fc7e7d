//! Startup helpers for the fragrance advisor console.
//!
//! Reads one message per stdin line and writes one JSON `ChatReply` per line
//! to stdout. Logs go to stderr.

use std::process::ExitCode;
use std::sync::Arc;

use anyhow::Context;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

use crate::advisor::catalog::in_memory::InMemoryCatalog;
use crate::advisor::chat::orchestrator::ChatOrchestrator;
use crate::advisor::conversation::store::ANONYMOUS_SESSION;
use crate::advisor::core::config::AdvisorConfig;
use crate::advisor::embedding::embedder::{OllamaEmbedder, QueryEmbedder};
use crate::advisor::retrieval::catalog::ProductCatalog;
use crate::llm::generator::{Generator, OllamaGenerator};

/// Environment variable pointing to the JSON product catalog.
pub const CATALOG_ENV: &str = "ADVISOR_CATALOG";
/// Environment variable naming the console session.
pub const SESSION_ENV: &str = "ADVISOR_SESSION";

/// Initialize tracing to stderr, `info` unless `RUST_LOG` says otherwise.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .try_init();
}

/// Run the console advisor (used by the `fragrance-advisor` binary).
///
/// # Returns
/// `ExitCode::SUCCESS` once stdin is exhausted, `1` on failure.
#[must_use]
pub fn run() -> ExitCode {
    init_tracing();

    tracing::info!("Starting fragrance advisor v{}", env!("CARGO_PKG_VERSION"));

    let orchestrator = match build_orchestrator() {
        Ok(orchestrator) => orchestrator,
        Err(e) => {
            tracing::error!("Failed to build advisor: {e:#}");
            return ExitCode::from(1);
        }
    };

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            tracing::error!("Failed to create runtime: {e}");
            return ExitCode::from(1);
        }
    };

    let session = std::env::var(SESSION_ENV).unwrap_or_else(|_| ANONYMOUS_SESSION.to_string());
    let stdin = BufReader::new(tokio::io::stdin());
    let stdout = tokio::io::stdout();

    if let Err(e) = rt.block_on(serve_lines(&orchestrator, &session, stdin, stdout)) {
        tracing::error!("Console error: {e:#}");
        return ExitCode::from(1);
    }

    ExitCode::SUCCESS
}

/// Build the orchestrator from environment configuration.
///
/// # Errors
/// Returns an error if the config is invalid, the catalog cannot be loaded or
/// an Ollama adapter cannot be built.
pub fn build_orchestrator() -> anyhow::Result<ChatOrchestrator> {
    let config = AdvisorConfig::from_env().context("invalid advisor configuration")?;

    let path = std::env::var(CATALOG_ENV)
        .with_context(|| format!("{CATALOG_ENV} must point to a JSON product catalog"))?;
    let catalog: Arc<dyn ProductCatalog> = Arc::new(
        InMemoryCatalog::load(&path).with_context(|| format!("cannot load catalog {path}"))?,
    );

    let embedder: Option<Arc<dyn QueryEmbedder>> = if config.embedding.model.is_some() {
        Some(Arc::new(OllamaEmbedder::new(&config.embedding)?))
    } else {
        tracing::info!("No embedding model configured; using full-text retrieval only");
        None
    };

    let generator: Arc<dyn Generator> = Arc::new(OllamaGenerator::new(&config.llm)?);
    tracing::info!("Completion model: {}", config.llm.model);

    Ok(ChatOrchestrator::from_config(
        &config, catalog, embedder, generator,
    )?)
}

/// Answer each non-blank input line with one JSON reply line.
///
/// # Errors
/// Returns an error if reading, serializing or writing fails.
pub async fn serve_lines<R, W>(
    orchestrator: &ChatOrchestrator,
    session_id: &str,
    reader: R,
    mut writer: W,
) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = reader.lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let reply = orchestrator.chat(session_id, &line).await;
        let mut json = serde_json::to_string(&reply)?;
        json.push('\n');
        writer.write_all(json.as_bytes()).await?;
        writer.flush().await?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::advisor::chat::orchestrator::ChatReply;
    use crate::advisor::chat::replies::GREETING_REPLY;
    use crate::advisor::core::errors::AdvisorResult;
    use crate::llm::generator::GenerateFuture;

    struct EchoGenerator;

    impl Generator for EchoGenerator {
        fn generate(&self, _prompt: &str, _max_tokens: u64) -> GenerateFuture<'_, AdvisorResult<String>> {
            Box::pin(async { Ok("Experimente o Jardim Secreto.".to_string()) })
        }
    }

    const CATALOG: &str = r#"[
        {"id": 1, "name": "Jardim Secreto", "brand": "Casa", "slug": "jardim-secreto",
         "price": 250.0, "accords": ["Floral"]}
    ]"#;

    #[tokio::test]
    async fn test_serve_lines_writes_one_json_reply_per_line() {
        let catalog: Arc<dyn ProductCatalog> =
            Arc::new(InMemoryCatalog::from_json(CATALOG).unwrap());
        let orchestrator = ChatOrchestrator::from_config(
            &AdvisorConfig::default(),
            catalog,
            None,
            Arc::new(EchoGenerator),
        )
        .unwrap();

        let input: &[u8] = "oi\n\nquero um perfume floral\n".as_bytes();
        let mut output = Vec::new();
        serve_lines(&orchestrator, "console", input, &mut output)
            .await
            .unwrap();

        let text = String::from_utf8(output).unwrap();
        let replies: Vec<ChatReply> = text
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(replies.len(), 2);
        assert_eq!(replies[0].reply, GREETING_REPLY);
        assert_eq!(replies[1].reply, "Experimente o Jardim Secreto.");
        assert_eq!(replies[1].suggestions[0].slug, "jardim-secreto");
    }
}
