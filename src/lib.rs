//! Gemini image studio - analyze, edit and generate images with Gemini
//!
//! Packages a prompt and an optional uploaded image into the right Gemini or
//! Imagen request, performs a single call, and normalizes the reply into
//! either plain text or a `data:` URL ready for display.

pub mod ai;
pub mod error;
pub mod image;
pub mod models;
pub mod studio;

pub use error::{Error, Result};
pub use studio::{ImageService, Studio};
