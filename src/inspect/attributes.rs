//! Lectura de atributos del sistema de archivos para una ruta.

use chrono::{DateTime, Local};
use std::fs;
use std::path::Path;
use std::time::SystemTime;

use super::model::FileAttributes;
use crate::errors::CleanError;

/// Lee los nueve atributos del reporte con una sola llamada `stat` más la
/// consulta de banderas propia de la plataforma, evitando la carrera entre
/// comprobar existencia y leer campos.
pub fn read_attributes(path: &Path) -> Result<FileAttributes, CleanError> {
    let metadata = fs::symlink_metadata(path).map_err(|error| CleanError::access(path, error))?;

    let directory = path
        .parent()
        .map(|dir| dir.display().to_string())
        .unwrap_or_default();

    Ok(FileAttributes {
        path: path.to_path_buf(),
        size_bytes: metadata.len(),
        created_at: metadata.created().ok().map(to_local),
        modified_at: metadata.modified().ok().map(to_local),
        accessed_at: metadata.accessed().ok().map(to_local),
        extension: normalized_extension(path),
        directory,
        read_only: metadata.permissions().readonly(),
        hidden: is_hidden(path, &metadata),
        archive: is_archive(&metadata),
    })
}

/// Extensión en minúsculas; toda comparación posterior es insensible a
/// mayúsculas.
pub fn normalized_extension(path: &Path) -> String {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_lowercase())
        .unwrap_or_default()
}

fn to_local(time: SystemTime) -> DateTime<Local> {
    time.into()
}

#[cfg(windows)]
fn is_hidden(_path: &Path, metadata: &fs::Metadata) -> bool {
    use std::os::windows::fs::MetadataExt;
    use winapi::um::winnt::FILE_ATTRIBUTE_HIDDEN;

    metadata.file_attributes() & FILE_ATTRIBUTE_HIDDEN != 0
}

#[cfg(not(windows))]
fn is_hidden(path: &Path, _metadata: &fs::Metadata) -> bool {
    // Fuera de Windows no existe la bandera: aplica la convención de nombres
    // con punto inicial.
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.starts_with('.'))
}

#[cfg(windows)]
fn is_archive(metadata: &fs::Metadata) -> bool {
    use std::os::windows::fs::MetadataExt;
    use winapi::um::winnt::FILE_ATTRIBUTE_ARCHIVE;

    metadata.file_attributes() & FILE_ATTRIBUTE_ARCHIVE != 0
}

#[cfg(not(windows))]
fn is_archive(_metadata: &fs::Metadata) -> bool {
    false
}
