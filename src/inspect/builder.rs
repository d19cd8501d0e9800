//! Construcción del reporte por archivo y por lote.

use std::path::Path;

use super::attributes::read_attributes;
use super::image::{is_image_extension, read_image_metadata};
use super::model::FileReport;

/// Construye el reporte de una sola ruta. Nunca propaga errores más allá de
/// esta frontera: cada ruta produce exactamente un `FileReport`.
pub fn build_report(path: &Path) -> FileReport {
    let attributes = match read_attributes(path) {
        Ok(attributes) => attributes,
        Err(error) => {
            // Sin atributos no se intenta decodificar la imagen.
            return FileReport::Failed {
                path: path.to_path_buf(),
                error: error.to_string(),
            };
        }
    };

    let image = if is_image_extension(&attributes.extension) {
        read_image_metadata(path, &attributes.extension)
    } else {
        None
    };

    FileReport::Ready { attributes, image }
}

/// Inspección de solo lectura de un lote completo, en el orden recibido.
/// Es idempotente: repetirla sin mutaciones intermedias produce los mismos
/// resultados salvo las marcas de tiempo que avancen por sí solas.
pub fn inspect_files<P: AsRef<Path>>(paths: &[P]) -> Vec<FileReport> {
    paths.iter().map(|path| build_report(path.as_ref())).collect()
}
