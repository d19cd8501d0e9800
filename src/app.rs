//! Capa de presentación interactiva: recoge rutas, muestra reportes y pide
//! la confirmación explícita antes de limpiar. Toda la lógica vive detrás
//! de `inspect` y `cleaner`; aquí solo hay cableado de consola.

use console::style;
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;

use crate::cleaner::{SanitizeEvent, run_sanitize_with_sender};
use crate::errors::display_name;
use crate::inspect::{self, FileReport};
use crate::ui;

pub fn run() -> Result<(), String> {
    ui::render_header();
    ui::render_intro();

    let mut state = AppState::default();
    let mut input = String::new();

    loop {
        match read_user_input(&mut input) {
            Ok(None) => {
                println!("\n{}", style("Fin de la entrada. ¡Hasta luego!").dim());
                break;
            }
            Ok(Some(line)) => {
                if line.is_empty() {
                    continue;
                }

                if matches_command(&line, &["exit", "salir"]) {
                    println!("{}", style("Hasta luego!").dim());
                    break;
                }

                if matches_command(&line, &["ayuda", "help"]) {
                    ui::render_help();
                    continue;
                }

                if let Err(message) = handle_input(&mut state, &line) {
                    eprintln!("{message}");
                }
            }
            Err(error) => {
                eprintln!("Error al leer la entrada: {error}");
            }
        }
    }

    Ok(())
}

#[derive(Default)]
struct AppState {
    current_files: Vec<PathBuf>,
    last_reports: Vec<FileReport>,
}

fn handle_input(state: &mut AppState, line: &str) -> Result<(), String> {
    let mut parts = line.split_whitespace();
    let command = parts.next().unwrap_or("");

    match command.to_ascii_lowercase().as_str() {
        "limpiar" | "clean" => run_clean(state),
        "exportar" | "export" => {
            let remainder = line[command.len()..].trim();
            if remainder.is_empty() {
                return Err("Debes indicar la ruta del archivo JSON de salida.".to_string());
            }
            run_export(state, remainder)
        }
        _ => {
            let paths = parse_paths(line);
            if paths.is_empty() {
                return Err("No se reconoció ninguna ruta en la entrada.".to_string());
            }
            load_batch(state, paths);
            Ok(())
        }
    }
}

/// Cada entrada de rutas reemplaza el lote completo; no se acumulan lotes.
fn load_batch(state: &mut AppState, paths: Vec<PathBuf>) {
    state.current_files = paths;
    state.last_reports = inspect::inspect_files(&state.current_files);
    inspect::render_batch(&state.last_reports);
    ui::render_clean_hint();
}

fn run_clean(state: &mut AppState) -> Result<(), String> {
    if state.current_files.is_empty() {
        return Err("No hay archivos en el lote. Ingresa rutas primero.".to_string());
    }

    if !confirm_clean(state.current_files.len())? {
        println!("{}", style("Limpieza cancelada.").dim());
        return Ok(());
    }

    let files = state.current_files.clone();
    let (sender, receiver) = mpsc::channel();
    let handle = thread::spawn(move || run_sanitize_with_sender(files, sender));

    for event in receiver.iter() {
        render_event(&event);
        if matches!(event, SanitizeEvent::Finished { .. }) {
            break;
        }
    }

    handle
        .join()
        .map_err(|_| "La limpieza por lote falló de forma inesperada".to_string())?;

    // Volver a inspeccionar para mostrar el estado ya limpio.
    state.last_reports = inspect::inspect_files(&state.current_files);
    inspect::render_batch(&state.last_reports);

    Ok(())
}

fn confirm_clean(count: usize) -> Result<bool, String> {
    print!(
        "\n{} ",
        style(format!(
            "¿Seguro que deseas limpiar la metadata de {count} archivo(s)? Esta acción es irreversible. [s/N] ▸"
        ))
        .yellow()
    );
    io::stdout()
        .flush()
        .map_err(|error| format!("No se pudo escribir en la consola: {error}"))?;

    let mut answer = String::new();
    io::stdin()
        .read_line(&mut answer)
        .map_err(|error| format!("No se pudo leer la confirmación: {error}"))?;

    let answer = answer.trim();
    Ok(answer.eq_ignore_ascii_case("s") || answer.eq_ignore_ascii_case("si"))
}

fn render_event(event: &SanitizeEvent) {
    match event {
        SanitizeEvent::Started { total } => {
            println!(
                "\n{}",
                style(format!("│ Limpiando metadata de {total} archivo(s)...")).dim()
            );
        }
        SanitizeEvent::Processing { index, total, path } => {
            println!(
                "{}",
                style(format!("│ [{index}/{total}] {}", display_name(path))).dim()
            );
        }
        SanitizeEvent::Success { path } => {
            println!(
                "{}",
                style(format!("│   ✓ {}", display_name(path))).green()
            );
        }
        SanitizeEvent::Failure { path, error } => {
            println!(
                "{}",
                style(format!("│   ✗ {}: {error}", display_name(path))).red()
            );
        }
        SanitizeEvent::Finished { summary } => {
            println!(
                "\n{}",
                style(format!(
                    "Metadata limpiada en {} de {} archivo(s).",
                    summary.cleared, summary.total
                ))
                .green()
                .bold()
            );
        }
    }
}

fn run_export(state: &AppState, target: &str) -> Result<(), String> {
    if state.last_reports.is_empty() {
        return Err("No hay un reporte que exportar. Inspecciona archivos primero.".to_string());
    }

    let target = PathBuf::from(target);
    inspect::export_reports_json(&state.last_reports, &target)?;

    println!(
        "{}",
        style(format!("Reporte exportado a {}", target.display())).green()
    );
    Ok(())
}

/// Separa la línea en rutas; las comillas dobles agrupan rutas con espacios
/// (así llegan los archivos arrastrados a la terminal).
fn parse_paths(line: &str) -> Vec<PathBuf> {
    let mut paths = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            c if c.is_whitespace() && !in_quotes => {
                if !current.is_empty() {
                    paths.push(PathBuf::from(current.clone()));
                    current.clear();
                }
            }
            c => current.push(c),
        }
    }

    if !current.is_empty() {
        paths.push(PathBuf::from(current));
    }

    paths
}

fn matches_command(input: &str, aliases: &[&str]) -> bool {
    aliases
        .iter()
        .any(|alias| input.eq_ignore_ascii_case(alias))
}

fn read_user_input(buffer: &mut String) -> io::Result<Option<String>> {
    print!("{} ", style("Archivos").bold().cyan());
    print!("{} ", style("›").cyan());
    io::stdout().flush()?;

    buffer.clear();
    let bytes_read = io::stdin().read_line(buffer)?;
    if bytes_read == 0 {
        return Ok(None);
    }

    Ok(Some(buffer.trim().to_string()))
}
