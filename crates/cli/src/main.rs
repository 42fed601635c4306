//! binlore CLI - semantic explorer for LOLBAS and GTFOBins.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use binlore_core::{
    Domain, DomainSelector, EmbeddingConfig, EntryDetails, GenerationConfig, RetrievalConfig,
    SourceConfig,
};
use binlore_corpus::{Catalog, DataSource, GtfobinsCatalog, LolbasCatalog};
use binlore_rag::{Combiner, KnowledgeBase, OllamaEmbedder, OllamaGenerator, QueryEngine};
use clap::{Parser, Subcommand};
use tracing::Level;

#[derive(Parser)]
#[command(name = "binlore")]
#[command(about = "Semantic explorer for LOLBAS and GTFOBins", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Directory for cached dataset feeds
    #[arg(long, default_value = ".binlore")]
    data_dir: PathBuf,

    /// Ollama-compatible server URL
    #[arg(long, default_value = "http://localhost:11434")]
    ollama_url: String,

    /// Embedding model name
    #[arg(long, default_value = "qwen3-embedding:0.6b")]
    embed_model: String,

    /// Generation model name
    #[arg(long, default_value = "qwen3:4b")]
    gen_model: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Ask a question across one or both datasets
    Query {
        /// The question
        text: String,
        /// Domain: all, windows or unix
        #[arg(long, default_value = "all")]
        domain: String,
        /// How many chunks to hand the generation model
        #[arg(long)]
        top_k: Option<usize>,
    },
    /// List entry names
    List {
        /// Domain: all, windows or unix
        #[arg(long, default_value = "all")]
        domain: String,
    },
    /// Show one entry in full
    Show {
        /// Entry name (case-insensitive), e.g. certutil.exe
        name: String,
        /// Domain: all, windows or unix
        #[arg(long, default_value = "all")]
        domain: String,
    },
    /// List the function categories GTFOBins documents for one binary
    Functions {
        /// Binary name, e.g. vim
        binary: String,
    },
    /// Dataset and backend overview
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Query { text, domain, top_k } => {
            let selector: DomainSelector = domain.parse()?;
            let retrieval = match top_k {
                Some(top_k) => RetrievalConfig { top_k: *top_k },
                None => RetrievalConfig::default(),
            };

            let (answer, sources) = match selector {
                DomainSelector::All => {
                    let mut combiner = build_combiner(&cli, retrieval).await?;
                    combiner.build_indexes(DomainSelector::All).await?;
                    let result = combiner.query(text).await?;
                    (result.answer, result.sources)
                }
                DomainSelector::Windows | DomainSelector::Unix => {
                    let domain = selector.domains()[0];
                    let mut base = build_base(&cli, domain, retrieval).await?;
                    base.build_index().await?;
                    let result = base.query(text).await?;
                    (result.answer, result.sources)
                }
            };

            println!("{answer}\n");
            println!("Sources ({}):", sources.len());
            for (i, source) in sources.iter().enumerate() {
                println!("--- [{}] ---\n{}\n", i + 1, source);
            }
        }
        Commands::List { domain } => {
            let selector: DomainSelector = domain.parse()?;
            let names = match selector {
                DomainSelector::All => {
                    let combiner = build_combiner(&cli, RetrievalConfig::default()).await?;
                    combiner.entry_names(DomainSelector::All)
                }
                _ => load_catalog(&cli, selector.domains()[0]).await?.entry_names(),
            };

            for name in names {
                println!("{name}");
            }
        }
        Commands::Show { name, domain } => {
            let selector: DomainSelector = domain.parse()?;
            let details = match selector {
                DomainSelector::All => {
                    let combiner = build_combiner(&cli, RetrievalConfig::default()).await?;
                    combiner.entry_details(name, DomainSelector::All)
                }
                _ => load_catalog(&cli, selector.domains()[0]).await?.entry_details(name),
            };

            let Some(details) = details else {
                println!("No entry named '{name}'");
                return Ok(());
            };
            print_details(&details);
        }
        Commands::Functions { binary } => {
            let sources = source_config(&cli);
            let source = DataSource::new();
            let catalog = GtfobinsCatalog::load(
                &source,
                &sources.gtfobins_url,
                &sources.gtfobins_cache(),
            )
            .await?;

            let functions = catalog.function_names(binary);
            if functions.is_empty() {
                println!("GTFOBins has no entry named '{binary}'");
            } else {
                for function in functions {
                    println!("{function}");
                }
            }
        }
        Commands::Status => {
            let sources = source_config(&cli);
            let embedding = embedding_config(&cli);
            println!("binlore status");
            println!("  data dir: {}", sources.data_dir.display());
            println!("  backend:  {}", cli.ollama_url);
            println!("  embed:    {} (dimension {})", embedding.model, embedding.dimension);
            println!("  generate: {}", cli.gen_model);

            let embedder = OllamaEmbedder::new(embedding);
            if embedder.health_check().await {
                println!("  ollama:   reachable");
            } else {
                println!("  ollama:   UNREACHABLE");
            }

            for domain in DomainSelector::All.domains() {
                match load_catalog(&cli, *domain).await {
                    Ok(catalog) => {
                        let chunks = match catalog.chunks() {
                            Ok(chunks) => chunks.len().to_string(),
                            Err(e) => format!("none ({e})"),
                        };
                        println!(
                            "  {}: {} entries, {} chunks",
                            catalog.domain().label(),
                            catalog.entry_names().len(),
                            chunks
                        );
                    }
                    Err(e) => println!("  {}: unavailable ({e})", domain.label()),
                }
            }
        }
    }

    Ok(())
}

fn source_config(cli: &Cli) -> SourceConfig {
    SourceConfig {
        data_dir: cli.data_dir.clone(),
        ..SourceConfig::default()
    }
}

fn embedding_config(cli: &Cli) -> EmbeddingConfig {
    EmbeddingConfig {
        base_url: cli.ollama_url.clone(),
        model: cli.embed_model.clone(),
        ..EmbeddingConfig::default()
    }
}

fn generation_config(cli: &Cli) -> GenerationConfig {
    GenerationConfig {
        base_url: cli.ollama_url.clone(),
        model: cli.gen_model.clone(),
    }
}

async fn load_catalog(cli: &Cli, domain: Domain) -> Result<Box<dyn Catalog>> {
    let sources = source_config(cli);
    let source = DataSource::new();
    let catalog: Box<dyn Catalog> = match domain {
        Domain::Windows => Box::new(
            LolbasCatalog::load(&source, &sources.lolbas_url, &sources.lolbas_cache()).await?,
        ),
        Domain::Unix => Box::new(
            GtfobinsCatalog::load(&source, &sources.gtfobins_url, &sources.gtfobins_cache())
                .await?,
        ),
    };
    Ok(catalog)
}

async fn build_base(cli: &Cli, domain: Domain, retrieval: RetrievalConfig) -> Result<KnowledgeBase> {
    let catalog = load_catalog(cli, domain).await?;
    let embedder = Arc::new(OllamaEmbedder::new(embedding_config(cli)));
    let engine = QueryEngine::new(Arc::new(OllamaGenerator::new(generation_config(cli))));
    Ok(KnowledgeBase::new(catalog, embedder, engine, retrieval))
}

async fn build_combiner(cli: &Cli, retrieval: RetrievalConfig) -> Result<Combiner> {
    let windows = build_base(cli, Domain::Windows, retrieval).await?;
    let unix = build_base(cli, Domain::Unix, retrieval).await?;
    Ok(Combiner::new(windows, unix))
}

fn print_details(details: &EntryDetails) {
    match details {
        EntryDetails::Windows(entry) => {
            println!("{} [{}]", entry.name, Domain::Windows.label());
            if !entry.description.is_empty() {
                println!("{}", entry.description);
            }
            for command in &entry.commands {
                println!();
                println!("* {}", command.usecase);
                if !command.description.is_empty() {
                    println!("  {}", command.description);
                }
                if !command.mitre_id.is_empty() {
                    println!("  MITRE: {}", command.mitre_id);
                }
                println!("  > {}", command.command);
            }
        }
        EntryDetails::Unix { name, entry } => {
            println!("{} [{}]", name, Domain::Unix.label());
            if !entry.description.is_empty() {
                println!("{}", entry.description);
            }
            for (function, examples) in &entry.functions {
                println!();
                println!("* {function}");
                for example in examples {
                    if !example.description.is_empty() {
                        println!("  {}", example.description);
                    }
                    println!("  $ {}", example.code);
                }
            }
        }
    }
}
