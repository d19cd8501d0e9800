//! Formato legible de tamaños y marcas de tiempo.

use chrono::{DateTime, Local};

const SIZE_UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];

/// Formatea bytes en unidades binarias con hasta dos decimales ("12.34 MB").
pub fn format_size(bytes: u64) -> String {
    let mut value = bytes as f64;
    let mut unit = 0;

    while value >= 1024.0 && unit < SIZE_UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    format!("{} {}", trim_decimals(value), SIZE_UNITS[unit])
}

// Dos decimales como máximo, sin ceros finales.
fn trim_decimals(value: f64) -> String {
    let text = format!("{value:.2}");
    text.trim_end_matches('0').trim_end_matches('.').to_string()
}

pub fn format_optional_time(time: Option<DateTime<Local>>) -> String {
    match time {
        Some(value) => value.format("%d.%m.%Y %H:%M").to_string(),
        None => "No disponible".to_string(),
    }
}
