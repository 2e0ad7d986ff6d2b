

use clap::{Parser, Subcommand};
use medrag::{LlmProviderFactory, MedragConfig, QueryRewriter, RewriteOutcome};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(
    name = "medrag",
    about = "Rewrite medical questions into retrieval queries",
    version
)]
struct Cli {
    /// Configuration file (TOML, YAML or JSON)
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Rewrite one question and show how the rewrite was obtained
    Rewrite {
        query: String,

        /// Skip the model and use the rule engine only
        #[arg(long)]
        no_llm: bool,

        /// Print the outcome as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn,medrag=info")))
        .init();

    let cli = Cli::parse();
    let config = MedragConfig::load(cli.config.as_deref())?;

    match cli.command {
        Command::Rewrite { query, no_llm, json } => {
            let rewriter = if no_llm || !config.rewrite_enabled {
                QueryRewriter::rule_based()
            } else {
                QueryRewriter::from_config(&config, LlmProviderFactory::try_from_config(&config))
            };

            let outcome = rewriter.rewrite_detailed(&query).await;
            if json {
                println!("{}", serde_json::to_string_pretty(&outcome)?);
            } else {
                print_outcome(&outcome);
            }
        }
    }

    Ok(())
}

fn print_outcome(outcome: &RewriteOutcome) {
    println!("原始问题: {}", outcome.original);
    println!("检索查询: {}", outcome.rewritten);
    println!("来源: {}", outcome.source);
    if let Some(reason) = &outcome.rejection {
        println!("拒绝原因: {}", reason.detail());
    }
    if !outcome.keywords.is_empty() {
        println!("关键词: {}", outcome.keywords.join(", "));
    }
}
