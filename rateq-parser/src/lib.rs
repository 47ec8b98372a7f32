//! Parsing and normalization of single-variable rational equations.
//!
//! The [`tokenizer`] and [`parser`] modules turn a canonical equation string such as
//! `1/(x-2)=3/(x+1)` into an abstract syntax tree. The [`normalize`] module sits in front of them
//! and recovers such a canonical string from raw OCR, LaTeX or hand-typed input.

pub mod normalize;
pub mod parser;
pub mod tokenizer;
