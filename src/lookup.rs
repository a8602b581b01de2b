//! Exact substring lookup over the loaded knowledge base.
//!
//! Both filters are case-insensitive substring matches returned in
//! dataset order. Only article-shaped records carry an `artigo` field,
//! so `find_by_article` is effectively a consulta-only operation; entries
//! of other shapes simply never match. An empty backing dataset yields an
//! empty result, never an error.

use crate::models::{Category, Dataset, KnowledgeEntry, SourceRecord};

/// Entries whose `artigo` field contains `query` (case-insensitive).
pub fn find_by_article<'a>(
    dataset: &'a Dataset,
    query: &str,
    category: Category,
) -> Vec<&'a KnowledgeEntry> {
    let needle = query.to_lowercase();
    dataset
        .entries(category)
        .iter()
        .filter(|entry| match &entry.source {
            SourceRecord::Article(a) => a.artigo.to_lowercase().contains(&needle),
            _ => false,
        })
        .collect()
}

/// Entries whose topic contains `query` (case-insensitive).
pub fn find_by_topic<'a>(
    dataset: &'a Dataset,
    query: &str,
    category: Category,
) -> Vec<&'a KnowledgeEntry> {
    let needle = query.to_lowercase();
    dataset
        .entries(category)
        .iter()
        .filter(|entry| entry.topic.to_lowercase().contains(&needle))
        .collect()
}
