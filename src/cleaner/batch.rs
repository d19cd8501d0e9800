//! Orquestación del lote de limpieza con eventos de progreso.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;

use super::engine::sanitize_file;

/// Conteo agregado del lote: archivos limpiados frente al total solicitado.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct SanitizeSummary {
    pub cleared: usize,
    pub total: usize,
}

/// Eventos emitidos durante la limpieza por lote para que la capa de
/// presentación muestre el progreso y los errores por archivo.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum SanitizeEvent {
    Started {
        total: usize,
    },
    Processing {
        index: usize,
        total: usize,
        path: PathBuf,
    },
    Success {
        path: PathBuf,
    },
    Failure {
        path: PathBuf,
        error: String,
    },
    Finished {
        summary: SanitizeSummary,
    },
}

/// Limpia cada ruta en el orden recibido. El fallo de un archivo nunca
/// detiene el resto del lote, y un lote vacío devuelve `(0, 0)` sin tocar
/// el disco. El llamador ya obtuvo la confirmación explícita del usuario
/// antes de invocar esta función.
pub fn sanitize_files<P: AsRef<Path>>(paths: &[P]) -> SanitizeSummary {
    let total = paths.len();
    let mut cleared = 0_usize;

    for path in paths {
        if sanitize_file(path.as_ref()).is_ok() {
            cleared += 1;
        }
    }

    SanitizeSummary { cleared, total }
}

/// Variante con progreso: mismo contrato que [`sanitize_files`], emitiendo
/// un evento por paso. Los envíos fallidos se ignoran para que un receptor
/// desconectado no interrumpa la limpieza.
pub fn run_sanitize_with_sender(
    files: Vec<PathBuf>,
    sender: Sender<SanitizeEvent>,
) -> SanitizeSummary {
    let total = files.len();
    let _ = sender.send(SanitizeEvent::Started { total });

    let mut cleared = 0_usize;
    for (index, path) in files.into_iter().enumerate() {
        let _ = sender.send(SanitizeEvent::Processing {
            index: index + 1,
            total,
            path: path.clone(),
        });

        match sanitize_file(&path) {
            Ok(()) => {
                cleared += 1;
                let _ = sender.send(SanitizeEvent::Success { path });
            }
            Err(error) => {
                let _ = sender.send(SanitizeEvent::Failure {
                    path,
                    error: error.to_string(),
                });
            }
        }
    }

    let summary = SanitizeSummary { cleared, total };
    let _ = sender.send(SanitizeEvent::Finished { summary });
    summary
}
