//! End-to-end pipeline test over fixture knowledge files: load and
//! segment the three categories, then exercise lookup, matching, and
//! formatting against the loaded dataset. No network involved.

use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

use juris::config::KnowledgeConfig;
use juris::format::{build_llm_context, format_natural, NOTHING_FOUND};
use juris::lemma::FoldingLemmatizer;
use juris::lookup::{find_by_article, find_by_topic};
use juris::matcher::relevant_entries;
use juris::models::{Category, Dataset};

fn setup_knowledge_dir() -> (TempDir, KnowledgeConfig) {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path().to_path_buf();

    fs::write(
        root.join("base_juridica.json"),
        r#"[
            {"id": "5", "artigo": "Art. 5º", "tema": "Direitos Fundamentais",
             "texto": "Todos são iguais perante a lei sem distinção de qualquer natureza garantindo-se aos brasileiros e aos estrangeiros residentes no País a inviolabilidade do direito à vida à liberdade à igualdade à segurança e à propriedade",
             "explicacao": "Princípio da igualdade e direitos fundamentais"},
            {"id": "7", "artigo": "Art. 7º", "tema": "Direito do Trabalho",
             "texto": "São direitos dos trabalhadores urbanos e rurais férias anuais remuneradas com pelo menos um terço a mais do que o salário normal",
             "explicacao": "Garante férias remuneradas aos trabalhadores"}
        ]"#,
    )
    .unwrap();

    fs::write(
        root.join("situacoes.json"),
        r#"[
            {"id": 1, "titulo": "Despejo", "descricao": "Locatário despejado sem aviso prévio",
             "analise": "O locador deve notificar o locatário com antecedência",
             "texto": "Locatário despejado sem aviso prévio do locador"}
        ]"#,
    )
    .unwrap();

    fs::write(
        root.join("contratos.json"),
        r#"[
            {"id": 1, "titulo": "Locação residencial", "tipo": "Contrato de locação",
             "analise": "Multa rescisória limitada a três aluguéis",
             "texto": "Contrato de locação residencial com cláusula de multa rescisória"}
        ]"#,
    )
    .unwrap();

    let config = KnowledgeConfig {
        articles: root.join("base_juridica.json"),
        situations: root.join("situacoes.json"),
        contracts: root.join("contratos.json"),
        max_block_chars: 120,
    };

    (tmp, config)
}

#[test]
fn dataset_loads_all_three_categories() {
    let (_tmp, config) = setup_knowledge_dir();
    let dataset = Dataset::load(&config);

    assert!(!dataset.articles.is_empty());
    assert_eq!(dataset.situations.len(), 1);
    assert_eq!(dataset.contracts.len(), 1);

    // Long article bodies get cut into more than one block.
    assert!(dataset.articles.len() > 2);
    let art5_blocks: Vec<_> = dataset
        .articles
        .iter()
        .filter(|e| e.id.starts_with("5_"))
        .collect();
    assert!(art5_blocks.len() > 1);
    let rejoined = art5_blocks
        .iter()
        .map(|e| e.text.as_str())
        .collect::<Vec<_>>()
        .join(" ");
    assert_eq!(rejoined, art5_blocks[0].original);
}

#[test]
fn missing_files_load_as_empty_dataset() {
    let config = KnowledgeConfig {
        articles: PathBuf::from("/nonexistent/a.json"),
        situations: PathBuf::from("/nonexistent/s.json"),
        contracts: PathBuf::from("/nonexistent/c.json"),
        max_block_chars: 300,
    };
    let dataset = Dataset::load(&config);
    assert!(dataset.is_empty());

    // Lookups against the empty dataset are empty, never errors.
    assert!(find_by_article(&dataset, "5", Category::Consulta).is_empty());
    assert!(find_by_topic(&dataset, "despejo", Category::AnaliseSituacao).is_empty());
}

#[test]
fn article_lookup_finds_art_5() {
    let (_tmp, config) = setup_knowledge_dir();
    let dataset = Dataset::load(&config);

    let hits = find_by_article(&dataset, "5", Category::Consulta);
    assert!(!hits.is_empty());
    assert!(hits.iter().all(|e| e.id.starts_with("5_")));
}

#[test]
fn topic_lookup_works_per_category() {
    let (_tmp, config) = setup_knowledge_dir();
    let dataset = Dataset::load(&config);

    let hits = find_by_topic(&dataset, "trabalho", Category::Consulta);
    assert!(!hits.is_empty());

    let hits = find_by_topic(&dataset, "despejo", Category::AnaliseSituacao);
    assert_eq!(hits.len(), 1);

    // Same query against the wrong category finds nothing.
    assert!(find_by_topic(&dataset, "despejo", Category::AnaliseContrato).is_empty());
}

#[test]
fn question_retrieves_and_formats_relevant_entries() {
    let (_tmp, config) = setup_knowledge_dir();
    let dataset = Dataset::load(&config);
    let lemmatizer = FoldingLemmatizer::new();

    let results = relevant_entries(
        &lemmatizer,
        "Tenho direito a férias remuneradas?",
        dataset.entries(Category::Consulta),
    );
    assert!(!results.is_empty());
    assert!(results
        .iter()
        .any(|r| r.shared.iter().any(|l| l == "feria")));

    let rendered = format_natural(&results);
    assert!(rendered.contains("**Base Legal:"));
    assert_ne!(rendered, NOTHING_FOUND);
}

#[test]
fn unrelated_question_formats_to_nothing_found() {
    let (_tmp, config) = setup_knowledge_dir();
    let dataset = Dataset::load(&config);
    let lemmatizer = FoldingLemmatizer::new();

    let results = relevant_entries(
        &lemmatizer,
        "receita bolo cenoura",
        dataset.entries(Category::Consulta),
    );
    assert!(results.is_empty());
    assert_eq!(format_natural(&results), NOTHING_FOUND);
}

#[test]
fn llm_context_always_carries_the_category() {
    let (_tmp, config) = setup_knowledge_dir();
    let dataset = Dataset::load(&config);
    let lemmatizer = FoldingLemmatizer::new();

    // Empty question: whole category goes into the context.
    let context = build_llm_context(&lemmatizer, "", dataset.entries(Category::AnaliseContrato));
    assert!(context.contains("Contrato: Contrato de locação"));

    // Matching question: context narrowed but still present.
    let context = build_llm_context(
        &lemmatizer,
        "qual a multa da rescisão?",
        dataset.entries(Category::AnaliseContrato),
    );
    assert!(context.contains("Análise: Multa rescisória limitada a três aluguéis"));
}
