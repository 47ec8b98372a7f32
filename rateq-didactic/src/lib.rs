//! Teaching material built on top of [`rateq_solver`].
//!
//! Two things live here:
//!
//! - [`explain`] turns an [`AnalysisResult`](rateq_solver::AnalysisResult) into a written
//!   solution, either as a concise trace, a narrated walkthrough in a teacher's voice, or a single
//!   LaTeX block.
//! - [`check`] grades a student's answer and written work against an equation, and produces
//!   feedback and a model derivation when the answer is wrong.
//!
//! Neither re-derives any mathematics; both only project what the analyzer has already found.

pub mod check;
pub mod explain;

pub use check::{
    check,
    Assessment,
    CheckerError,
    ConceptFlags,
    Grade,
    LineKind,
    StudentValue,
    VerificationReport,
};
pub use explain::{render, render_level, DetailLevel, Mode};
