//! Tipos de error compartidos por las rutas de inspección y limpieza.

use std::io;
use std::path::{Path, PathBuf};

/// Error central del motor de limpieza de metadata.
///
/// Los fallos de lectura viajan como dato dentro del reporte por archivo;
/// nunca cruzan la frontera del lote como `Err`.
#[derive(thiserror::Error, Debug)]
pub enum CleanError {
    /// No se pudieron leer los atributos del archivo (ruta inexistente,
    /// permiso denegado o ruta inválida).
    #[error("No se pudo acceder a `{}`: {source}", .path.display())]
    Access {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Falló el reinicio de marcas de tiempo o el despeje de banderas de
    /// atributos durante la limpieza.
    #[error("No se pudo limpiar la metadata del archivo {name}: {detail}")]
    AttributeWrite { name: String, detail: String },
}

impl CleanError {
    pub fn access(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Access {
            path: path.into(),
            source,
        }
    }

    pub fn attribute_write(path: &Path, detail: impl Into<String>) -> Self {
        Self::AttributeWrite {
            name: display_name(path),
            detail: detail.into(),
        }
    }
}

/// Nombre visible del archivo para mensajes dirigidos al usuario.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
