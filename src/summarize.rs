//! Document and video summarization.
//!
//! Extract text (PDF bytes or a fetched transcript), classify it as
//! legal or general by keyword presence, and forward it to the LLM
//! gateway under the matching summary-kind label. Summarizers never
//! touch the lemma matcher — the knowledge base plays no part here.
//!
//! Legal PDFs additionally go through a clause screening that flags
//! phrases typical of abusive (leonine) contract clauses.

use serde::Serialize;

use crate::lemma::FoldingLemmatizer;
use crate::llm::{LlmClient, LlmError};
use crate::pdf::{extract_pdf_text, ExtractError};
use crate::transcript::{fetch_transcript, TranscriptError, TranscriptFetcher};

#[derive(Debug, thiserror::Error)]
pub enum SummarizeError {
    #[error(transparent)]
    Extract(#[from] ExtractError),
    #[error(transparent)]
    Llm(#[from] LlmError),
    #[error(transparent)]
    Transcript(#[from] TranscriptError),
    #[error("no transcript available for this video")]
    NoTranscript,
}

/// Coarse domain label deciding which summary prompt a text gets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Domain {
    Legal,
    General,
}

/// Keywords whose presence (case-insensitive substring) marks a text as
/// legal-domain.
const LEGAL_KEYWORDS: &[&str] = &[
    "constituição",
    "lei",
    "direito",
    "jurídico",
    "cidadania",
    "tribunal",
    "justiça",
    "artigo",
    "constitucional",
    "advogado",
    "oab",
    "código civil",
    "penal",
    "jurisdição",
    "contrato",
    "obrigação",
    "cláusula",
    "acordo",
    "regulamento",
    "normas",
    "supremo",
    "stf",
    "stj",
    "processo",
    "jurisprudência",
    "magistrado",
    "procurador",
    "civil",
    "norma",
    "decisão",
    "ação judicial",
];

/// Clause phrases that suggest an abusive or leonine contract term.
const SUSPECT_CLAUSES: &[&str] = &[
    "renúncia de direitos",
    "indenização desproporcional",
    "multa excessiva",
    "exclusão de responsabilidade",
    "obrigações excessivas",
    "cláusula abusiva",
    "renuncia ao direito",
    "cláusula penal",
    "perda de direitos",
    "indenização sem culpa",
];

/// A finished summary plus its classification; `screening` carries the
/// clause-screening note for legal PDFs.
#[derive(Debug, Serialize)]
pub struct DocumentSummary {
    pub domain: Domain,
    pub summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub screening: Option<String>,
}

/// Classify a text by keyword presence.
pub fn classify_domain(text: &str) -> Domain {
    let lower = text.to_lowercase();
    if LEGAL_KEYWORDS.iter().any(|k| lower.contains(k)) {
        Domain::Legal
    } else {
        Domain::General
    }
}

/// Suspect clause phrases present in the text, in list order.
pub fn screen_contract(text: &str) -> Vec<&'static str> {
    let lower = text.to_lowercase();
    SUSPECT_CLAUSES
        .iter()
        .copied()
        .filter(|clause| lower.contains(clause))
        .collect()
}

/// Render the critical-analysis note for a screened document. The word
/// count covers content words only, stop words excluded.
fn render_screening(text: &str) -> String {
    let clauses = screen_contract(text);
    let words = FoldingLemmatizer::new().content_word_count(text);

    if clauses.is_empty() {
        format!(
            "**Análise Crítica:**\n\
             Não foram detectadas cláusulas explicitamente abusivas, mas é recomendada \
             uma leitura completa por um especialista. O documento contém aproximadamente \
             {words} palavras relevantes."
        )
    } else {
        let listed = clauses
            .iter()
            .map(|c| format!("- {c}"))
            .collect::<Vec<_>>()
            .join("\n");
        format!(
            "**Análise Crítica:**\n\
             O documento apresenta indícios de cláusulas que podem ser consideradas \
             **abusivas ou leoninas**. É recomendada uma análise jurídica especializada.\n\n\
             Cláusulas suspeitas detectadas:\n{listed}\n\n\
             O documento contém aproximadamente {words} palavras relevantes."
        )
    }
}

/// Summarize a PDF byte stream. Legal documents also get the clause
/// screening note.
pub async fn summarize_pdf(llm: &LlmClient, bytes: &[u8]) -> Result<DocumentSummary, SummarizeError> {
    let text = extract_pdf_text(bytes)?;
    let domain = classify_domain(&text);
    let kind = match domain {
        Domain::Legal => "resumo de documento jurídico",
        Domain::General => "resumo de documento geral",
    };
    tracing::info!(?domain, chars = text.len(), "summarizing PDF");

    let summary = llm.summarize(&text, kind).await?;
    let screening = match domain {
        Domain::Legal => Some(render_screening(&text)),
        Domain::General => None,
    };

    Ok(DocumentSummary {
        domain,
        summary,
        screening,
    })
}

/// Summarize a video by its transcript.
pub async fn summarize_video(
    llm: &LlmClient,
    fetcher: &dyn TranscriptFetcher,
    url: &str,
    languages: &[String],
) -> Result<DocumentSummary, SummarizeError> {
    let transcript = fetch_transcript(fetcher, url, languages)
        .await?
        .ok_or(SummarizeError::NoTranscript)?;

    let domain = classify_domain(&transcript);
    let kind = match domain {
        Domain::Legal => "resumo de vídeo jurídico",
        Domain::General => "resumo de vídeo geral",
    };
    tracing::info!(?domain, chars = transcript.len(), "summarizing video transcript");

    let summary = llm.summarize(&transcript, kind).await?;
    Ok(DocumentSummary {
        domain,
        summary,
        screening: None,
    })
}
