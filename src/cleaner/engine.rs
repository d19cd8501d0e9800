//! Motor de limpieza destructiva de metadata por archivo.

use chrono::{Local, TimeZone};
use filetime::FileTime;
use std::path::Path;
use std::time::SystemTime;

use super::image::rewrite_clean_image;
use crate::errors::CleanError;
use crate::inspect::is_image_extension;

/// Limpia la metadata de un archivo: re-codifica la imagen (mejor esfuerzo),
/// fija las marcas de tiempo en el instante neutral y despeja las banderas
/// de atributos.
///
/// La re-codificación de imagen nunca decide el resultado: sus fallos se
/// descartan. Un fallo al escribir marcas de tiempo o banderas sí es fatal
/// para este archivo y lleva su nombre en el error.
pub fn sanitize_file(path: &Path) -> Result<(), CleanError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    // La re-codificación reescribe el archivo completo, así que corre antes
    // de fijar las marcas de tiempo: el instante neutral debe quedar en el
    // archivo final aunque la imagen se haya reemplazado.
    if is_image_extension(&extension) {
        let _ = rewrite_clean_image(path);
    }

    reset_timestamps(path)?;
    clear_attribute_flags(path)?;

    Ok(())
}

/// Instante neutral escrito en las marcas de tiempo durante la limpieza
/// (2000-01-01 12:00:00): borra cualquier correlación temporal entre
/// archivos.
pub fn neutral_timestamp() -> SystemTime {
    let neutral = Local
        .with_ymd_and_hms(2000, 1, 1, 12, 0, 0)
        .single()
        .expect("el instante neutral es una fecha válida");
    SystemTime::from(neutral)
}

fn reset_timestamps(path: &Path) -> Result<(), CleanError> {
    let neutral = FileTime::from_system_time(neutral_timestamp());

    filetime::set_file_times(path, neutral, neutral).map_err(|error| {
        CleanError::attribute_write(
            path,
            format!("no se pudieron reiniciar las marcas de tiempo ({error})"),
        )
    })?;

    set_creation_time(path)
}

#[cfg(windows)]
fn set_creation_time(path: &Path) -> Result<(), CleanError> {
    use std::fs::{FileTimes, OpenOptions};
    use std::os::windows::fs::FileTimesExt;

    let file = OpenOptions::new().write(true).open(path).map_err(|error| {
        CleanError::attribute_write(
            path,
            format!("no se pudo abrir el archivo para fijar la fecha de creación ({error})"),
        )
    })?;

    let times = FileTimes::new().set_created(neutral_timestamp());
    file.set_times(times).map_err(|error| {
        CleanError::attribute_write(
            path,
            format!("no se pudo fijar la fecha de creación ({error})"),
        )
    })
}

#[cfg(not(windows))]
fn set_creation_time(_path: &Path) -> Result<(), CleanError> {
    // La fecha de creación no es escribible en estas plataformas.
    Ok(())
}

#[cfg(windows)]
fn clear_attribute_flags(path: &Path) -> Result<(), CleanError> {
    use std::os::windows::ffi::OsStrExt;
    use winapi::um::fileapi::SetFileAttributesW;
    use winapi::um::winnt::FILE_ATTRIBUTE_NORMAL;

    let wide: Vec<u16> = path
        .as_os_str()
        .encode_wide()
        .chain(std::iter::once(0))
        .collect();

    // SAFETY: la cadena está terminada en NUL y vive durante toda la llamada.
    let result = unsafe { SetFileAttributesW(wide.as_ptr(), FILE_ATTRIBUTE_NORMAL) };
    if result == 0 {
        let error = std::io::Error::last_os_error();
        return Err(CleanError::attribute_write(
            path,
            format!("no se pudieron despejar las banderas de atributos ({error})"),
        ));
    }

    Ok(())
}

#[cfg(not(windows))]
fn clear_attribute_flags(path: &Path) -> Result<(), CleanError> {
    use std::fs;

    let metadata = fs::symlink_metadata(path).map_err(|error| {
        CleanError::attribute_write(path, format!("no se pudieron leer los permisos ({error})"))
    })?;

    let mut permissions = metadata.permissions();
    if permissions.readonly() {
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            permissions.set_mode(permissions.mode() | 0o600);
        }
        #[cfg(not(unix))]
        permissions.set_readonly(false);

        fs::set_permissions(path, permissions).map_err(|error| {
            CleanError::attribute_write(
                path,
                format!("no se pudo quitar el modo de solo lectura ({error})"),
            )
        })?;
    }

    Ok(())
}
