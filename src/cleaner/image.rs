//! Re-codificación de imágenes a un contenedor limpio sin metadata.

use image::{ImageFormat, ImageReader};
use std::fs;
use std::path::{Path, PathBuf};

/// Decodifica la imagen completa y la vuelve a escribir como un contenedor
/// nuevo que solo conserva el buffer de pixeles: volver a codificar es la
/// única manera fiable de descartar bloques auxiliares desconocidos.
///
/// La codificación es PNG (sin pérdida) sea cual sea el contenedor original;
/// el nombre del archivo no cambia. El reemplazo final es un `rename`
/// atómico y el temporal se elimina en todo camino de fallo.
pub fn rewrite_clean_image(path: &Path) -> Result<(), String> {
    let img = ImageReader::open(path)
        .map_err(|e| format!("No se pudo abrir la imagen: {}", e))?
        .with_guessed_format()
        .map_err(|e| format!("No se pudo identificar la imagen: {}", e))?
        .decode()
        .map_err(|e| format!("No se pudo decodificar la imagen: {}", e))?;

    let temp_path = temp_sibling_path(path);

    if let Err(error) = img.save_with_format(&temp_path, ImageFormat::Png) {
        let _ = fs::remove_file(&temp_path);
        return Err(format!("No se pudo guardar la imagen limpia: {}", error));
    }

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        format!("No se pudo reemplazar el archivo original: {}", e)
    })?;

    Ok(())
}

/// Ruta temporal en el mismo directorio que el original para que el
/// reemplazo final sea un `rename` dentro del mismo sistema de archivos.
fn temp_sibling_path(path: &Path) -> PathBuf {
    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    let stem = path.file_stem().unwrap_or_default().to_string_lossy();

    // Usar el reloj para evitar colisiones entre ejecuciones consecutivas.
    use std::time::{SystemTime, UNIX_EPOCH};
    let marker = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or(0);

    parent.join(format!(".{}_limpio_{}.tmp", stem, marker))
}
