//! Modelos serializables del reporte de metadata por archivo.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Instantánea de los atributos del sistema de archivos para una ruta.
///
/// Se reconstruye en cada inspección; nunca se conserva más allá de un
/// reporte, de modo que dos inspecciones consecutivas reflejan el estado
/// real del disco.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FileAttributes {
    pub path: PathBuf,
    pub size_bytes: u64,
    pub created_at: Option<DateTime<Local>>,
    pub modified_at: Option<DateTime<Local>>,
    pub accessed_at: Option<DateTime<Local>>,
    /// Extensión normalizada en minúsculas, sin el punto inicial.
    pub extension: String,
    pub directory: String,
    pub read_only: bool,
    pub hidden: bool,
    pub archive: bool,
}

/// Metadata embebida de una imagen raster reconocida.
///
/// Su ausencia significa que el archivo no es una imagen o que el contenedor
/// no se pudo decodificar; ambos casos son válidos y no fatales.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ImageMetadata {
    pub width_px: u32,
    pub height_px: u32,
    pub dpi_x: f64,
    pub dpi_y: f64,
    pub pixel_format: String,
    pub title: Option<String>,
    pub subject: Option<String>,
    pub comment: Option<String>,
}

impl ImageMetadata {
    /// Indica si el contenedor conserva alguna etiqueta descriptiva.
    pub fn has_text_tags(&self) -> bool {
        self.title.is_some() || self.subject.is_some() || self.comment.is_some()
    }
}

/// Resultado de inspeccionar una ruta: exactamente una de las dos variantes.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum FileReport {
    Ready {
        attributes: FileAttributes,
        image: Option<ImageMetadata>,
    },
    Failed {
        path: PathBuf,
        error: String,
    },
}

impl FileReport {
    pub fn path(&self) -> &Path {
        match self {
            FileReport::Ready { attributes, .. } => &attributes.path,
            FileReport::Failed { path, .. } => path,
        }
    }
}
