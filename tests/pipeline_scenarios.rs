//! End-to-end tests for the retrieval pipeline over offline backends.

use std::sync::Arc;

use kopis::document::Document;
use kopis::embedding::precomputed::PrecomputedEmbedder;
use kopis::error::Result;
use kopis::generation::extractive::ExtractiveGenerator;
use kopis::pipeline::config::RagPipelineConfig;
use kopis::pipeline::engine::{RagPipeline, RagPipelineBuilder};
use kopis::rerank::embedding::EmbeddingReranker;
use kopis::vector::SimilarityMetric;

const QUERY: &str = "How do I write a resume?";

/// Embedder fixture mirroring a small hosted-embedding corpus: the query
/// vector lands closest to the resume documents, far from the distractor.
fn sample_embedder() -> PrecomputedEmbedder {
    PrecomputedEmbedder::new(4)
        .with_vector(QUERY, vec![1.0, 0.2, 0.0, 0.0])
        .unwrap()
        .with_vector(
            "Keep your resume to one page and lead with impact.",
            vec![0.9, 0.3, 0.1, 0.0],
        )
        .unwrap()
        .with_vector(
            "Tailor each resume to the job description.",
            vec![0.8, 0.4, 0.0, 0.1],
        )
        .unwrap()
        .with_vector(
            "Rivers provide water and habitat for aquatic species.",
            vec![0.0, 0.1, 0.9, 0.4],
        )
        .unwrap()
        .with_vector(
            "Interview questions often cover strengths and weaknesses.",
            vec![0.4, 0.5, 0.2, 0.2],
        )
        .unwrap()
}

fn sample_documents() -> Vec<Document> {
    vec![
        Document::with_id("doc_0", "Keep your resume to one page and lead with impact.")
            .with_title("Resume Length"),
        Document::with_id("doc_1", "Tailor each resume to the job description.")
            .with_title("Resume Tailoring"),
        Document::with_id("doc_2", "Rivers provide water and habitat for aquatic species.")
            .with_title("Rivers"),
        Document::with_id(
            "doc_3",
            "Interview questions often cover strengths and weaknesses.",
        )
        .with_title("Interviews"),
    ]
}

async fn build_sample_pipeline(config: RagPipelineConfig, with_reranker: bool) -> Result<RagPipeline> {
    let embedder = Arc::new(sample_embedder());

    let mut builder = RagPipelineBuilder::new()
        .embedder(embedder.clone())
        .generator(Arc::new(ExtractiveGenerator::new()))
        .config(config);

    if with_reranker {
        builder = builder.reranker(Arc::new(EmbeddingReranker::new(embedder)));
    }

    let mut pipeline = builder.build()?;
    pipeline.add_documents(sample_documents()).await?;
    Ok(pipeline)
}

#[tokio::test]
async fn pipeline_retrieves_most_relevant_documents_first() -> Result<()> {
    let config = RagPipelineConfig {
        retrieve_k: 3,
        ..RagPipelineConfig::default()
    };
    let pipeline = build_sample_pipeline(config, false).await?;

    let retrieved = pipeline.retrieve(QUERY).await?;

    assert_eq!(retrieved.len(), 3);
    assert_eq!(retrieved[0].document.id, "doc_0");
    assert_eq!(retrieved[1].document.id, "doc_1");
    assert_eq!(retrieved[2].document.id, "doc_3");
    assert!(retrieved[0].score >= retrieved[1].score);
    assert!(retrieved[1].score >= retrieved[2].score);

    // Store indices map back to the ingestion order
    assert_eq!(retrieved[0].index, 0);
    assert_eq!(retrieved[2].index, 3);
    Ok(())
}

#[tokio::test]
async fn pipeline_retrieve_k_caps_result_count() -> Result<()> {
    let config = RagPipelineConfig {
        retrieve_k: 2,
        ..RagPipelineConfig::default()
    };
    let pipeline = build_sample_pipeline(config, false).await?;

    let retrieved = pipeline.retrieve(QUERY).await?;
    assert_eq!(retrieved.len(), 2);
    Ok(())
}

#[tokio::test]
async fn pipeline_answer_cites_retrieved_documents() -> Result<()> {
    let config = RagPipelineConfig {
        retrieve_k: 2,
        ..RagPipelineConfig::default()
    };
    let pipeline = build_sample_pipeline(config, false).await?;

    let answer = pipeline.answer(QUERY).await?;

    assert_eq!(
        answer.cited_document_ids(),
        vec!["doc_0".to_string(), "doc_1".to_string()]
    );
    for citation in &answer.citations {
        assert_eq!(&answer.text[citation.start..citation.end], citation.text);
    }
    Ok(())
}

#[tokio::test]
async fn pipeline_rerank_stage_truncates_context() -> Result<()> {
    let config = RagPipelineConfig {
        retrieve_k: 4,
        rerank_top_n: Some(1),
        metric: SimilarityMetric::DotProduct,
    };
    let pipeline = build_sample_pipeline(config, true).await?;

    let answer = pipeline.answer(QUERY).await?;

    // Only the single best document survives the rerank stage
    assert_eq!(answer.cited_document_ids(), vec!["doc_0".to_string()]);
    Ok(())
}

#[tokio::test]
async fn pipeline_answers_without_documents() -> Result<()> {
    let embedder = Arc::new(sample_embedder());
    let pipeline = RagPipelineBuilder::new()
        .embedder(embedder)
        .generator(Arc::new(ExtractiveGenerator::new()))
        .build()?;

    let answer = pipeline.answer(QUERY).await?;
    assert!(answer.citations.is_empty());
    Ok(())
}

#[tokio::test]
async fn pipeline_failed_ingest_leaves_store_intact() -> Result<()> {
    let embedder = PrecomputedEmbedder::new(4)
        .with_vector("first", vec![1.0, 0.0, 0.0, 0.0])
        .unwrap();

    let mut pipeline = RagPipelineBuilder::new()
        .embedder(Arc::new(embedder))
        .generator(Arc::new(ExtractiveGenerator::new()))
        .build()?;

    pipeline
        .add_documents(vec![Document::with_id("doc_0", "first")])
        .await?;

    // Unknown text makes the embedder fail; the store must stay intact
    let result = pipeline
        .add_documents(vec![Document::with_id("doc_1", "unregistered")])
        .await;
    assert!(result.is_err());
    assert_eq!(pipeline.document_count(), 1);
    Ok(())
}
