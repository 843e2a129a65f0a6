pub mod analyzer;
pub mod html;
pub mod snippet;
pub mod text;
