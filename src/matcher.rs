//! Keyword-overlap relevance matching.
//!
//! Best-effort retrieval, not semantic search: an entry is relevant to a
//! question iff the two lemma sets share at least one token. There is no
//! score, no threshold and no top-k — the whole non-empty intersection
//! is the relevance signal, and the shared lemmas ride along in the
//! result for explanation output.

use crate::lemma::Lemmatizer;
use crate::models::{KnowledgeEntry, MatchResult, SourceRecord};

/// Select all entries whose base text shares at least one lemma with the
/// question. An empty question has an empty lemma set and therefore
/// matches nothing.
pub fn relevant_entries<'a>(
    lemmatizer: &dyn Lemmatizer,
    question: &str,
    entries: &'a [KnowledgeEntry],
) -> Vec<MatchResult<'a>> {
    let question_lemmas = lemmatizer.lemmas(question);
    if question_lemmas.is_empty() {
        return Vec::new();
    }

    let mut results = Vec::new();
    for entry in entries {
        let base = base_text(entry);
        let entry_lemmas = lemmatizer.lemmas(&base);
        let shared: Vec<String> = question_lemmas
            .intersection(&entry_lemmas)
            .cloned()
            .collect();
        if !shared.is_empty() {
            results.push(MatchResult { entry, shared });
        }
    }
    results
}

/// Shape-specific synthetic text an entry is matched against. The
/// segmented block stands in for the article body so relevance stays at
/// block granularity.
fn base_text(entry: &KnowledgeEntry) -> String {
    match &entry.source {
        SourceRecord::Article(a) => {
            format!("{} {} {} {}", a.artigo, a.tema, entry.text, a.explicacao)
        }
        SourceRecord::Situation(s) => format!("{} {}", s.descricao, s.analise),
        SourceRecord::Contract(c) => format!("{} {}", c.tipo, c.analise),
        SourceRecord::Other(v) => v.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lemma::FoldingLemmatizer;
    use crate::models::{ArticleRecord, Category, ContractRecord, SituationRecord};

    fn article_entry(artigo: &str, tema: &str, texto: &str, explicacao: &str) -> KnowledgeEntry {
        KnowledgeEntry {
            id: "1_0".to_string(),
            category: Category::Consulta,
            topic: tema.to_string(),
            text: texto.to_string(),
            original: texto.to_string(),
            source: SourceRecord::Article(ArticleRecord {
                id: Some("1".to_string()),
                artigo: artigo.to_string(),
                tema: tema.to_string(),
                texto: texto.to_string(),
                explicacao: explicacao.to_string(),
            }),
        }
    }

    fn fixture() -> Vec<KnowledgeEntry> {
        vec![
            article_entry(
                "Art. 7º",
                "Direito do Trabalho",
                "São direitos dos trabalhadores férias anuais remuneradas",
                "Garante férias aos trabalhadores",
            ),
            article_entry(
                "Art. 5º",
                "Direitos Fundamentais",
                "Todos são iguais perante a lei",
                "Princípio da igualdade",
            ),
        ]
    }

    #[test]
    fn question_matches_by_shared_lemmas() {
        let lemmatizer = FoldingLemmatizer::new();
        let entries = fixture();
        let results = relevant_entries(&lemmatizer, "Tenho direito a férias?", &entries);
        assert_eq!(results.len(), 2, "both entries mention direito");
        let ferias_hit = results
            .iter()
            .find(|r| r.entry.topic == "Direito do Trabalho")
            .unwrap();
        assert!(ferias_hit.shared.iter().any(|l| l == "feria"));
    }

    #[test]
    fn unrelated_question_matches_nothing() {
        let lemmatizer = FoldingLemmatizer::new();
        let entries = fixture();
        let results = relevant_entries(&lemmatizer, "receita bolo cenoura", &entries);
        assert!(results.is_empty());
    }

    #[test]
    fn empty_question_matches_nothing() {
        let lemmatizer = FoldingLemmatizer::new();
        assert!(relevant_entries(&lemmatizer, "", &fixture()).is_empty());
        assert!(relevant_entries(&lemmatizer, "  ", &fixture()).is_empty());
    }

    #[test]
    fn situation_and_contract_shapes_use_their_own_fields() {
        let lemmatizer = FoldingLemmatizer::new();
        let entries = vec![
            KnowledgeEntry {
                id: "0_0".to_string(),
                category: Category::AnaliseSituacao,
                topic: String::new(),
                text: String::new(),
                original: String::new(),
                source: SourceRecord::Situation(SituationRecord {
                    id: None,
                    descricao: "Despejo sem aviso prévio".to_string(),
                    analise: "O locador deve notificar o locatário".to_string(),
                    titulo: String::new(),
                    texto: String::new(),
                }),
            },
            KnowledgeEntry {
                id: "1_0".to_string(),
                category: Category::AnaliseContrato,
                topic: String::new(),
                text: String::new(),
                original: String::new(),
                source: SourceRecord::Contract(ContractRecord {
                    id: None,
                    tipo: "Contrato de locação".to_string(),
                    analise: "Multa limitada a três aluguéis".to_string(),
                    titulo: String::new(),
                    texto: String::new(),
                }),
            },
        ];

        let despejo = relevant_entries(&lemmatizer, "fui despejado sem aviso", &entries);
        assert_eq!(despejo.len(), 1);
        assert_eq!(despejo[0].entry.id, "0_0");

        let multa = relevant_entries(&lemmatizer, "qual a multa da locação?", &entries);
        assert_eq!(multa.len(), 1);
        assert_eq!(multa[0].entry.id, "1_0");
    }
}
