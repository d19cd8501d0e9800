//! Pipeline de solo lectura: atributos del sistema de archivos, metadata de
//! imagen embebida y reporte por lote.

mod attributes;
mod builder;
mod export;
mod image;
mod model;
mod renderer;

pub use builder::{build_report, inspect_files};
pub use export::export_reports_json;
pub use image::is_image_extension;
pub use model::{FileAttributes, FileReport, ImageMetadata};
pub use renderer::render_batch;

#[cfg(test)]
mod tests;
