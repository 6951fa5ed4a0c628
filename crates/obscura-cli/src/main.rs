//! Obscura CLI
//!
//! Command-line front end for the scanning and transformation engine

use anyhow::{Context, bail};
use clap::{Parser, Subcommand, ValueEnum};
use obscura_core::{CategoryId, Method};
use obscura_crypto::CryptoProvider;
use obscura_engine::{CategoryRegistry, Scanner, Transformer};
use std::collections::HashSet;
use std::io::Read;
use std::ops::ControlFlow;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "obscura")]
#[command(about = "Obscura - PII scanning and redaction", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the category catalog as JSON descriptors
    Categories,

    /// Scan a document and report detected matches
    Scan {
        /// Input file, or `-` for stdin
        input: PathBuf,

        /// Comma-separated category ids to scan (default: all)
        #[arg(long, value_delimiter = ',')]
        categories: Vec<String>,

        /// Emit the full detection result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Rewrite a document with the selected transform
    Process {
        /// Input file, or `-` for stdin
        input: PathBuf,

        /// Transform to apply
        #[arg(long, value_enum)]
        method: CliMethod,

        /// Password for --method encrypt (min 8 characters)
        #[arg(long)]
        password: Option<String>,

        /// Comma-separated category ids to process (default: all)
        #[arg(long, value_delimiter = ',')]
        categories: Vec<String>,

        /// Write the transformed document here instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,

        /// Use the non-secure demo crypto backend
        #[arg(long, default_value = "false")]
        demo_crypto: bool,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliMethod {
    Mask,
    Hash,
    Encrypt,
    Redact,
}

impl From<CliMethod> for Method {
    fn from(method: CliMethod) -> Self {
        match method {
            CliMethod::Mask => Method::Mask,
            CliMethod::Hash => Method::Hash,
            CliMethod::Encrypt => Method::Encrypt,
            CliMethod::Redact => Method::Redact,
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let registry = CategoryRegistry::builtin()?;

    match cli.command {
        Commands::Categories => {
            println!("{}", serde_json::to_string_pretty(&registry.descriptors())?);
        }

        Commands::Scan {
            input,
            categories,
            json,
        } => {
            let text = read_input(&input)?;
            let enabled = parse_categories(&registry, &categories)?;

            let scanner = Scanner::new(&registry);
            let mut result = scanner.scan_with_progress(&text, |percent, message| {
                eprintln!("[{percent:>3}%] {message}");
                ControlFlow::Continue(())
            })?;
            result.retain(|m| enabled.contains(&m.category));

            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                for (category, hits) in result.iter() {
                    let descriptor = registry.get(category);
                    let name = descriptor.map(|c| c.display_name).unwrap_or("unknown");
                    println!("{name} ({category}): {} match(es)", hits.count);
                    for m in &hits.matches {
                        println!("  [{}..{}] {}", m.start, m.end(), m.text);
                    }
                }
                println!("total: {}", result.total());
            }
        }

        Commands::Process {
            input,
            method,
            password,
            categories,
            output,
            demo_crypto,
        } => {
            let text = read_input(&input)?;
            let enabled = parse_categories(&registry, &categories)?;
            let method = Method::from(method);

            let scanner = Scanner::new(&registry);
            let result = scanner.scan_with_progress(&text, |percent, message| {
                eprintln!("[{percent:>3}%] {message}");
                ControlFlow::Continue(())
            })?;

            let provider = if demo_crypto {
                CryptoProvider::demo()
            } else {
                CryptoProvider::new()
            };
            let outcome = Transformer::new(provider).apply(
                &text,
                &result,
                &enabled,
                method,
                password.as_deref(),
            )?;

            info!(
                detected = outcome.original_count,
                processed = outcome.processed_count,
                security = ?outcome.security_level,
                "processing complete"
            );
            eprintln!(
                "detected {} match(es), processed {} ({:?}, security {:?})",
                outcome.original_count, outcome.processed_count, outcome.method, outcome.security_level
            );

            match output {
                Some(path) => std::fs::write(&path, &outcome.transformed_text)
                    .with_context(|| format!("writing {}", path.display()))?,
                None => println!("{}", outcome.transformed_text),
            }
        }
    }

    Ok(())
}

/// Read the document from a file, or stdin when the path is `-`
fn read_input(path: &PathBuf) -> anyhow::Result<String> {
    if path.as_os_str() == "-" {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("reading stdin")?;
        Ok(text)
    } else {
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
    }
}

/// Resolve category id tokens against the registry; empty means all
fn parse_categories(
    registry: &CategoryRegistry,
    tokens: &[String],
) -> anyhow::Result<HashSet<CategoryId>> {
    if tokens.is_empty() {
        return Ok(registry.categories().iter().map(|c| c.id).collect());
    }

    let mut enabled = HashSet::new();
    for token in tokens {
        let category = registry
            .categories()
            .iter()
            .find(|c| c.id.as_str() == token)
            .map(|c| c.id);
        match category {
            Some(id) => {
                enabled.insert(id);
            }
            None => bail!("unknown category: {token}"),
        }
    }
    Ok(enabled)
}
