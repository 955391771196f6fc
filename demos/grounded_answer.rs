//! End-to-end retrieval walkthrough over offline backends.
//!
//! Indexes a handful of documents with pre-computed embeddings, retrieves
//! the best matches for a query, reranks them, and prints a grounded
//! answer with its citations.
//!
//! Run with: cargo run --example grounded_answer

use std::sync::Arc;

use kopis::document::Document;
use kopis::embedding::precomputed::PrecomputedEmbedder;
use kopis::generation::extractive::ExtractiveGenerator;
use kopis::pipeline::config::RagPipelineConfig;
use kopis::pipeline::engine::RagPipelineBuilder;
use kopis::rerank::embedding::EmbeddingReranker;
use kopis::vector::SimilarityMetric;

#[tokio::main]
async fn main() -> kopis::error::Result<()> {
    env_logger::init();

    let query = "When is Apple's conference call scheduled?";

    // Embeddings for this corpus were computed offline; a hosted embedder
    // would produce them at ingest time instead.
    let corpus = [
        (
            "doc_0",
            "The Mediterranean diet emphasizes fish, olive oil, and vegetables.",
            vec![0.1, 0.9, 0.0, 0.1],
        ),
        (
            "doc_1",
            "Apple's conference call to discuss fourth fiscal quarter results is scheduled for Thursday, November 2, 2023.",
            vec![0.9, 0.1, 0.2, 0.0],
        ),
        (
            "doc_2",
            "Photosynthesis converts light energy into glucose in plants.",
            vec![0.0, 0.2, 0.9, 0.1],
        ),
        (
            "doc_3",
            "Apple reported record services revenue in its latest earnings.",
            vec![0.7, 0.0, 0.1, 0.3],
        ),
    ];

    let mut embedder = PrecomputedEmbedder::new(4);
    embedder.insert(query, vec![1.0, 0.0, 0.1, 0.0])?;
    for (_, text, vector) in &corpus {
        embedder.insert(*text, vector.clone())?;
    }
    let embedder = Arc::new(embedder);

    let mut pipeline = RagPipelineBuilder::new()
        .embedder(embedder.clone())
        .reranker(Arc::new(EmbeddingReranker::new(embedder)))
        .generator(Arc::new(ExtractiveGenerator::new()))
        .config(RagPipelineConfig {
            retrieve_k: 3,
            rerank_top_n: Some(2),
            metric: SimilarityMetric::DotProduct,
        })
        .build()?;

    let documents = corpus
        .iter()
        .map(|(id, text, _)| Document::with_id(*id, *text))
        .collect();
    let indexed = pipeline.add_documents(documents).await?;
    println!("Indexed {indexed} documents\n");

    println!("Query: {query}\n");

    let retrieved = pipeline.retrieve(query).await?;
    println!("Top results:");
    for (rank, result) in retrieved.iter().enumerate() {
        let preview = &result.document.text[..60.min(result.document.text.len())];
        println!(
            "  {}. [Score: {:.3}] ({}) {}...",
            rank + 1,
            result.score,
            result.document.id,
            preview
        );
    }

    let answer = pipeline.answer(query).await?;
    println!("\nAnswer:\n{}", answer.text);

    println!("Citations:");
    for citation in &answer.citations {
        println!(
            "  [{}..{}] {:?} <- {}",
            citation.start,
            citation.end,
            &citation.text[..40.min(citation.text.len())],
            citation.document_ids.join(", ")
        );
    }

    Ok(())
}
