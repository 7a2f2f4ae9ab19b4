//! Reconciles a Canvas quiz export with its graded results and renders the
//! outcome as a Markdown study sheet.

pub mod canvas;
pub mod markup;
pub mod render;
