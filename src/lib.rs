//! Keyword highlighting for search-result previews of documents and source files.

pub mod config;
pub mod error;
pub mod highlight;
pub mod models;
pub mod util;

pub use config::HighlightConfig;
pub use error::HighlightError;
pub use highlight::{CodeHighlighter, KeywordProcessor, SearchHelper, TextHighlighter};
pub use models::{CodeLine, Highlight};
pub use util::{
    analyzer::{escape_query, Flavor, HighlightEngine},
    html::{escape_html, html},
};
