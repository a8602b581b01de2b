//! Rendering of retrieval results.
//!
//! Two consumers, two renderings: [`format_natural`] produces the
//! human-readable answer shown directly to users, and
//! [`build_llm_context`] produces the compact context block embedded in
//! the completion prompt.

use crate::lemma::Lemmatizer;
use crate::matcher::relevant_entries;
use crate::models::{KnowledgeEntry, MatchResult, SourceRecord};

/// Fixed reply when a relevance result is empty, regardless of category.
pub const NOTHING_FOUND: &str = "Não encontrei informações relevantes.";

/// Render matched entries as a humanized multi-paragraph answer, one
/// shape-specific template per entry, separated by a visible rule.
pub fn format_natural(results: &[MatchResult<'_>]) -> String {
    if results.is_empty() {
        return NOTHING_FOUND.to_string();
    }

    let paragraphs: Vec<String> = results
        .iter()
        .map(|result| match &result.entry.source {
            SourceRecord::Article(a) => format!(
                "**Base Legal: {} - {}**\n\n{}\n\n**Explicação:** {}",
                a.artigo, a.tema, result.entry.text, a.explicacao
            ),
            SourceRecord::Situation(s) => format!(
                "**Situação Jurídica:** {}\n\n**Análise:** {}",
                s.descricao, s.analise
            ),
            SourceRecord::Contract(c) => {
                format!("**Contrato:** {}\n\n**Análise:** {}", c.tipo, c.analise)
            }
            SourceRecord::Other(_) => "Não foi possível formatar a resposta.".to_string(),
        })
        .collect();

    paragraphs.join("\n\n---\n\n")
}

/// Build the knowledge context embedded in the LLM prompt.
///
/// Entries sharing a lemma with the question are selected; an empty
/// question, or a question that matches nothing, selects the whole
/// category so the prompt always carries the knowledge base. (The
/// predecessor of this code queried the matcher with an empty string and
/// therefore always produced an empty context; "no usable query" is now
/// explicitly treated as "select everything".)
pub fn build_llm_context(
    lemmatizer: &dyn Lemmatizer,
    question: &str,
    entries: &[KnowledgeEntry],
) -> String {
    let matched = relevant_entries(lemmatizer, question, entries);
    context_from_matches(&matched, entries)
}

/// Same context rendering from already-computed matches, so callers that
/// have run the matcher for display purposes do not lemmatize the
/// category a second time. Empty matches select all of `entries`.
pub fn context_from_matches(results: &[MatchResult<'_>], entries: &[KnowledgeEntry]) -> String {
    if results.is_empty() {
        return entries
            .iter()
            .map(render_context)
            .collect::<Vec<_>>()
            .join("\n\n");
    }
    results
        .iter()
        .map(|r| render_context(r.entry))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Compact per-entry rendering used inside prompts.
fn render_context(entry: &KnowledgeEntry) -> String {
    match &entry.source {
        SourceRecord::Article(a) => format!(
            "Artigo: {}\nTema: {}\nTexto: {}\nExplicação: {}",
            a.artigo, a.tema, entry.text, a.explicacao
        ),
        SourceRecord::Situation(s) => {
            format!("Situação: {}\nAnálise: {}", s.descricao, s.analise)
        }
        SourceRecord::Contract(c) => format!("Contrato: {}\nAnálise: {}", c.tipo, c.analise),
        SourceRecord::Other(v) => v.to_string(),
    }
}
