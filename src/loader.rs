//! Knowledge-base loading and segmentation.
//!
//! The three JSON knowledge files are read once at startup and re-derived
//! in full on every restart; there is no write path and no incremental
//! update. Long `texto` bodies are cut into word-aligned blocks so the
//! matcher and lookup operate on bounded pieces of text.
//!
//! A missing or malformed file logs a warning and loads as empty rather
//! than failing startup. Callers cannot distinguish "file absent" from
//! "file empty"; the warning in the log is the only trace.

use std::path::Path;

use crate::config::KnowledgeConfig;
use crate::models::{Category, Dataset, KnowledgeEntry, SourceRecord};

/// Parse one knowledge file into raw records. Load failures degrade to an
/// empty list, logged at warn level.
pub fn load_records(path: &Path) -> Vec<SourceRecord> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "knowledge file not readable, loading empty");
            return Vec::new();
        }
    };

    match serde_json::from_str::<Vec<SourceRecord>>(&content) {
        Ok(records) => records,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "knowledge file is not valid JSON, loading empty");
            Vec::new()
        }
    }
}

/// Split `text` on whitespace and greedily accumulate words into blocks.
/// A block closes once its joined character count reaches `max_chars`;
/// the final partial block is kept. Words are never split, so a block may
/// exceed `max_chars` by at most one word. Lengths are characters, not
/// bytes, so accented text does not close blocks early.
pub fn segment(text: &str, max_chars: usize) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    let mut current_len = 0usize;

    for word in text.split_whitespace() {
        let word_chars = word.chars().count();
        current_len += if current.is_empty() {
            word_chars
        } else {
            word_chars + 1
        };
        current.push(word);
        if current_len >= max_chars {
            blocks.push(current.join(" "));
            current.clear();
            current_len = 0;
        }
    }

    if !current.is_empty() {
        blocks.push(current.join(" "));
    }

    blocks
}

/// Load one file and segment every record's body into [`KnowledgeEntry`]
/// blocks. Records with an empty body yield no entries.
pub fn load_segmented(path: &Path, category: Category, max_chars: usize) -> Vec<KnowledgeEntry> {
    let records = load_records(path);
    let mut entries = Vec::new();

    for record in records {
        let body = record.body().to_string();
        let topic = record.topic().to_string();
        for (index, block) in segment(&body, max_chars).into_iter().enumerate() {
            let id = match record.source_id() {
                Some(source_id) => format!("{}_{}", source_id, index),
                None => format!("{}_{}", index, index),
            };
            entries.push(KnowledgeEntry {
                id,
                category,
                topic: topic.clone(),
                text: block,
                original: body.clone(),
                source: record.clone(),
            });
        }
    }

    entries
}

impl Dataset {
    /// Eagerly load all three categories. Runs once at process start.
    pub fn load(config: &KnowledgeConfig) -> Dataset {
        let dataset = Dataset {
            articles: load_segmented(&config.articles, Category::Consulta, config.max_block_chars),
            situations: load_segmented(
                &config.situations,
                Category::AnaliseSituacao,
                config.max_block_chars,
            ),
            contracts: load_segmented(
                &config.contracts,
                Category::AnaliseContrato,
                config.max_block_chars,
            ),
        };
        tracing::info!(
            articles = dataset.articles.len(),
            situations = dataset.situations.len(),
            contracts = dataset.contracts.len(),
            "knowledge base loaded"
        );
        dataset
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn segment_rejoins_to_normalized_input() {
        let text = "a direito civil contrato locação multa rescisão prazo aviso renovação";
        for max_chars in [5, 10, 20, 300] {
            let blocks = segment(text, max_chars);
            assert_eq!(blocks.join(" "), text, "max_chars = {}", max_chars);
            assert!(blocks.iter().all(|b| !b.is_empty()));
        }
    }

    #[test]
    fn segment_never_splits_words() {
        let blocks = segment("constitucionalidade responsabilidade", 8);
        assert_eq!(
            blocks,
            vec!["constitucionalidade".to_string(), "responsabilidade".to_string()]
        );
    }

    #[test]
    fn segment_keeps_trailing_partial_block() {
        let blocks = segment("um dois tres quatro", 9);
        assert_eq!(blocks, vec!["um dois tres", "quatro"]);
    }

    #[test]
    fn segment_counts_characters_not_bytes() {
        // "férias" is six characters but seven bytes; byte counting would
        // close the block before the second word joins it.
        let blocks = segment("férias remuneradas", 7);
        assert_eq!(blocks, vec!["férias remuneradas".to_string()]);
    }

    #[test]
    fn segment_empty_text_yields_nothing() {
        assert!(segment("", 300).is_empty());
        assert!(segment("   ", 300).is_empty());
    }

    #[test]
    fn missing_file_loads_empty() {
        let entries = load_segmented(
            Path::new("/nonexistent/base.json"),
            Category::Consulta,
            300,
        );
        assert!(entries.is_empty());
    }

    #[test]
    fn malformed_json_loads_empty() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(b"{ not json").unwrap();
        assert!(load_records(f.path()).is_empty());
    }

    #[test]
    fn entries_carry_positional_ids_and_provenance() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(
            r#"[
                {"id": "7", "artigo": "Art. 7º", "tema": "Trabalho",
                 "texto": "Direitos dos trabalhadores urbanos e rurais além de outros que visem à melhoria de sua condição social",
                 "explicacao": "Garantias trabalhistas"}
            ]"#
            .as_bytes(),
        )
        .unwrap();

        let entries = load_segmented(f.path(), Category::Consulta, 40);
        assert!(entries.len() > 1);
        assert_eq!(entries[0].id, "7_0");
        assert_eq!(entries[1].id, "7_1");
        assert_eq!(entries[0].topic, "Trabalho");
        assert_eq!(entries[0].category, Category::Consulta);
        let rejoined = entries
            .iter()
            .map(|e| e.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        assert_eq!(rejoined, entries[0].original);
    }
}
