//! Limpieza destructiva de metadata: marcas de tiempo, banderas de atributos
//! y re-codificación de imágenes.

mod batch;
mod engine;
mod image;

pub use batch::{SanitizeEvent, SanitizeSummary, run_sanitize_with_sender, sanitize_files};
pub use engine::{neutral_timestamp, sanitize_file};
