//! Core data models for the legal knowledge base.
//!
//! Source records come in three shapes distinguished by which fields the
//! JSON object carries: statute articles, analyzed legal situations, and
//! analyzed contract types. The shapes are modeled as a tagged variant so
//! downstream formatting and matching pattern-match exhaustively instead
//! of probing for field presence.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the three fixed document types partitioning the knowledge base.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Consulta,
    AnaliseSituacao,
    AnaliseContrato,
}

impl Category {
    pub const ALL: [Category; 3] = [
        Category::Consulta,
        Category::AnaliseSituacao,
        Category::AnaliseContrato,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Consulta => "consulta",
            Category::AnaliseSituacao => "analise_situacao",
            Category::AnaliseContrato => "analise_contrato",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a category string matches none of the accepted names.
#[derive(Debug, thiserror::Error)]
#[error("unknown category '{0}': use consulta, analise_situacao or analise_contrato")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    /// Accepts the canonical names plus the short aliases the HTTP API
    /// has always taken (`situacao`, `contrato`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "consulta" => Ok(Category::Consulta),
            "situacao" | "analise_situacao" => Ok(Category::AnaliseSituacao),
            "contrato" | "analise_contrato" => Ok(Category::AnaliseContrato),
            other => Err(UnknownCategory(other.to_string())),
        }
    }
}

/// A raw knowledge-base object, before segmentation.
///
/// Shape is decided by the discriminating required field: `artigo` for
/// statute articles, `descricao` for situation analyses, `tipo` for
/// contract analyses. Anything else falls through to [`SourceRecord::Other`]
/// and is carried as opaque JSON.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SourceRecord {
    Article(ArticleRecord),
    Situation(SituationRecord),
    Contract(ContractRecord),
    Other(serde_json::Value),
}

/// Statute-article record (`base_juridica.json`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArticleRecord {
    #[serde(default, deserialize_with = "id_string_or_number")]
    pub id: Option<String>,
    pub artigo: String,
    #[serde(default)]
    pub tema: String,
    #[serde(default)]
    pub texto: String,
    #[serde(default)]
    pub explicacao: String,
}

/// Legal-situation record (`situacoes.json`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SituationRecord {
    #[serde(default, deserialize_with = "id_string_or_number")]
    pub id: Option<String>,
    pub descricao: String,
    #[serde(default)]
    pub analise: String,
    #[serde(default)]
    pub titulo: String,
    #[serde(default)]
    pub texto: String,
}

/// Contract-analysis record (`contratos.json`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContractRecord {
    #[serde(default, deserialize_with = "id_string_or_number")]
    pub id: Option<String>,
    pub tipo: String,
    #[serde(default)]
    pub analise: String,
    #[serde(default)]
    pub titulo: String,
    #[serde(default)]
    pub texto: String,
}

/// Knowledge files are hand-maintained; ids show up both as numbers and
/// as strings, so normalize to a string here.
fn id_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.map(|v| match v {
        serde_json::Value::String(s) => s,
        other => other.to_string(),
    }))
}

impl SourceRecord {
    /// The record's own id, when the source file provides one.
    pub fn source_id(&self) -> Option<&str> {
        match self {
            SourceRecord::Article(a) => a.id.as_deref(),
            SourceRecord::Situation(s) => s.id.as_deref(),
            SourceRecord::Contract(c) => c.id.as_deref(),
            SourceRecord::Other(v) => v.get("id").and_then(|id| id.as_str()),
        }
    }

    /// Topic label: `tema` when present, else `titulo`, else empty.
    pub fn topic(&self) -> &str {
        match self {
            SourceRecord::Article(a) => &a.tema,
            SourceRecord::Situation(s) => &s.titulo,
            SourceRecord::Contract(c) => &c.titulo,
            SourceRecord::Other(_) => "",
        }
    }

    /// Free-text body that gets segmented into blocks.
    pub fn body(&self) -> &str {
        match self {
            SourceRecord::Article(a) => &a.texto,
            SourceRecord::Situation(s) => &s.texto,
            SourceRecord::Contract(c) => &c.texto,
            SourceRecord::Other(v) => v.get("texto").and_then(|t| t.as_str()).unwrap_or(""),
        }
    }
}

/// One segmented block of a source record, tagged with provenance.
///
/// `text` is a word-aligned block bounded by the configured block size;
/// `original` keeps the full untruncated source body. Ids are positional
/// (`{source_id_or_index}_{block_index}`) and regenerate on every load.
#[derive(Debug, Clone, Serialize)]
pub struct KnowledgeEntry {
    pub id: String,
    pub category: Category,
    pub topic: String,
    pub text: String,
    pub original: String,
    pub source: SourceRecord,
}

/// The in-memory knowledge base: three disjoint per-category collections,
/// loaded eagerly at startup and read-only afterwards. Handlers receive
/// it behind an `Arc`; nothing mutates it after load.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub articles: Vec<KnowledgeEntry>,
    pub situations: Vec<KnowledgeEntry>,
    pub contracts: Vec<KnowledgeEntry>,
}

impl Dataset {
    pub fn entries(&self, category: Category) -> &[KnowledgeEntry] {
        match category {
            Category::Consulta => &self.articles,
            Category::AnaliseSituacao => &self.situations,
            Category::AnaliseContrato => &self.contracts,
        }
    }

    pub fn len(&self) -> usize {
        self.articles.len() + self.situations.len() + self.contracts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A relevance hit: the matched entry plus the lemmas it shares with the
/// question. Transient — lives only within one request.
#[derive(Debug, Clone)]
pub struct MatchResult<'a> {
    pub entry: &'a KnowledgeEntry,
    pub shared: Vec<String>,
}
