//! CSS engine: tokenizer, rule parser, specificity, cascade.

pub mod tokenizer;
pub mod model;
pub mod parser;
pub mod specificity;
pub mod cascade;
