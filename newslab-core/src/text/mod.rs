//! Headline text analysis: tokenization, TF-IDF weighting, topic modeling
//! and shallow entity extraction.

pub mod entities;
pub mod lda;
pub mod stopwords;
pub mod tfidf;
pub mod tokenizer;

pub use entities::{Entity, EntityExtractor, EntityKind};
pub use lda::{LdaError, LdaModel, LdaOptions, LdaTopic};
pub use stopwords::{is_stop_word, stop_words};
pub use tfidf::{TfidfModel, TfidfOptions};
pub use tokenizer::{bigrams, Tokenizer};
