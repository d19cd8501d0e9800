//! Exportación del reporte de lote en formato JSON.

use std::fs;
use std::path::Path;

use super::model::FileReport;

pub fn export_reports_json(reports: &[FileReport], path: &Path) -> Result<(), String> {
    let json = serde_json::to_string_pretty(reports)
        .map_err(|err| format!("No se pudo serializar el reporte: {err}"))?;
    fs::write(path, json).map_err(|err| format!("No se pudo guardar el JSON: {err}"))
}
