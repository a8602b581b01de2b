//! # Juris
//!
//! A legal-assistant backend: keyword retrieval over a curated legal
//! knowledge base, LLM-backed question answering, and PDF/video
//! summarization.
//!
//! The heavy lifting (language understanding, summarization,
//! transcription, PDF parsing) is delegated to external collaborators;
//! this crate owns the retrieval and formatting glue between them.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────┐   ┌────────────┐   ┌────────────┐
//! │ JSON files │──▶│   Loader   │──▶│  Dataset   │  (read-only,
//! │ 3 per-cat  │   │ segmenting │   │ in-memory  │   per-process)
//! └────────────┘   └────────────┘   └─────┬──────┘
//!                                         │
//!                      ┌──────────────────┼─────────────┐
//!                      ▼                  ▼             ▼
//!                ┌──────────┐      ┌──────────┐   ┌──────────┐
//!                │  Lookup  │      │ Matcher  │──▶│  Format  │
//!                └──────────┘      └──────────┘   └────┬─────┘
//!                                                      ▼
//!         PDF bytes ─▶ pdf ──────────┐           ┌──────────┐
//!         video URL ─▶ transcript ─▶ summarize ─▶│   LLM    │
//!                                                └──────────┘
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`models`] | Categories, record shapes, knowledge entries |
//! | [`loader`] | Knowledge-file loading and segmentation |
//! | [`lemma`] | Lemmatizer seam and folding default |
//! | [`matcher`] | Keyword-overlap relevance matching |
//! | [`lookup`] | Substring lookup by article/topic |
//! | [`format`] | Natural-language and prompt-context rendering |
//! | [`pdf`] | PDF text extraction and cleanup |
//! | [`transcript`] | Video id parsing and transcript fetching |
//! | [`summarize`] | Domain classification and summarization flows |
//! | [`llm`] | OpenAI-compatible completion gateway |
//! | [`server`] | JSON HTTP API |

pub mod config;
pub mod format;
pub mod lemma;
pub mod llm;
pub mod loader;
pub mod lookup;
pub mod matcher;
pub mod models;
pub mod pdf;
pub mod server;
pub mod summarize;
pub mod transcript;
