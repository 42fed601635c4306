//! End-to-end query flow against a live Ollama backend.
//!
//! Requires a running Ollama server with the embedding and generation
//! models pulled, plus network access (or warm caches) for the feeds.
//!
//! Run with: cargo run -p binlore-rag --example query_e2e

use std::sync::Arc;

use binlore_core::{
    DomainSelector, EmbeddingConfig, GenerationConfig, RetrievalConfig, SourceConfig,
};
use binlore_corpus::{DataSource, GtfobinsCatalog, LolbasCatalog};
use binlore_rag::{Combiner, KnowledgeBase, OllamaEmbedder, OllamaGenerator, QueryEngine};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    println!("=== binlore query e2e ===\n");

    let embedding = EmbeddingConfig::default();
    let generation = GenerationConfig::default();
    let sources = SourceConfig::default();

    let embedder = OllamaEmbedder::new(embedding);
    if !embedder.health_check().await {
        println!("[FAIL] Ollama is not reachable, start it and pull the models first");
        return Ok(());
    }
    println!("[OK] Ollama reachable");

    let source = DataSource::new();
    let lolbas =
        LolbasCatalog::load(&source, &sources.lolbas_url, &sources.lolbas_cache()).await?;
    println!("[OK] LOLBAS catalog: {} entries", lolbas.len());

    let gtfobins =
        GtfobinsCatalog::load(&source, &sources.gtfobins_url, &sources.gtfobins_cache()).await?;
    println!("[OK] GTFOBins catalog: {} binaries", gtfobins.len());

    let embedder = Arc::new(embedder);
    let generator = Arc::new(OllamaGenerator::new(generation));
    let engine = QueryEngine::new(generator);
    let retrieval = RetrievalConfig::default();

    let windows = KnowledgeBase::new(Box::new(lolbas), embedder.clone(), engine.clone(), retrieval);
    let unix = KnowledgeBase::new(Box::new(gtfobins), embedder, engine, retrieval);

    let mut combiner = Combiner::new(windows, unix);
    println!("\nBuilding indexes (embeds every chunk, this takes a while)...");
    combiner.build_indexes(DomainSelector::All).await?;
    println!("[OK] Indexes built");

    let question = "How can I download a file from the internet using a built-in binary?";
    println!("\nQuery: {question}\n");

    let result = combiner.query(question).await?;
    println!("{}", result.answer);
    println!("\n[OK] {} source chunks attached", result.sources.len());

    Ok(())
}
