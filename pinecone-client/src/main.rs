use std::env;
use std::process::ExitCode;

use pinecone_client::{ClientConfig, ClientError, ClientResult, IndexAdminClient, VectorClient};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "usage: pinecone-admin <command> [name]

commands:
  list-indexes
  describe-index <index>
  delete-index <index>
  stats <index>
  list-collections
  describe-collection <collection>
  delete-collection <collection>

configuration is read from PINECONE_ENVIRONMENT, PINECONE_PROJECT_ID,
PINECONE_API_KEY and optionally PINECONE_BASE_URL, PINECONE_TIMEOUT_SECS";

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("pinecone_client=info,pinecone_core=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    match run(&args).await {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(ClientError::Configuration(msg)) => {
            error!("{}", msg);
            eprintln!("{}", USAGE);
            ExitCode::from(2)
        }
        Err(e) => {
            error!(error = %e, "Command failed");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: &[String]) -> ClientResult<String> {
    let command = args
        .first()
        .ok_or_else(|| ClientError::Configuration("no command given".to_string()))?;
    let name = || {
        args.get(1)
            .map(String::as_str)
            .ok_or_else(|| ClientError::Configuration(format!("'{}' needs a name", command)))
    };

    let config = ClientConfig::from_env()?;
    info!(environment = %config.environment, project_id = %config.project_id, command = %command, "Running");

    match command.as_str() {
        "list-indexes" => IndexAdminClient::new(&config)?.list_indexes().await,
        "describe-index" => IndexAdminClient::new(&config)?.describe_index(name()?).await,
        "delete-index" => IndexAdminClient::new(&config)?.delete_index(name()?).await,
        "list-collections" => IndexAdminClient::new(&config)?.list_collections().await,
        "describe-collection" => IndexAdminClient::new(&config)?.describe_collection(name()?).await,
        "delete-collection" => IndexAdminClient::new(&config)?.delete_collection(name()?).await,
        "stats" => {
            let stats = VectorClient::new(&config)?.describe_index_stats(name()?).await?;
            let mut out = format!(
                "dimension: {}\nfullness: {}\ntotal vectors: {}",
                stats.dimension, stats.index_fullness, stats.total_vector_count
            );
            for (namespace, ns_stats) in &stats.namespaces {
                let label = if namespace.is_empty() { "(default)" } else { namespace.as_str() };
                out.push_str(&format!("\n  {}: {}", label, ns_stats.vector_count));
            }
            Ok(out)
        }
        other => Err(ClientError::Configuration(format!("unknown command '{}'", other))),
    }
}
