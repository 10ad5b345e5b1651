// Docsight: text analytics for PDF reports
//
// This is the library root. Each module corresponds to one stage of the
// analysis pipeline or to the plumbing around it.

pub mod cache;
pub mod config;
pub mod error;
pub mod extract;
pub mod frequency;
pub mod output;
pub mod pipeline;
pub mod sentiment;
pub mod text;
pub mod topics;
