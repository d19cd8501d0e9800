//! Presentación en consola de los reportes de inspección.

use comfy_table::Color;
use console::style;

use super::model::{FileAttributes, FileReport, ImageMetadata};
use crate::errors::display_name;
use crate::formatting::{format_optional_time, format_size};

/// Imprime todos los reportes de un lote en el orden recibido.
pub fn render_batch(reports: &[FileReport]) {
    for report in reports {
        render_report(report);
    }
    println!();
}

pub fn render_report(report: &FileReport) {
    match report {
        FileReport::Ready { attributes, image } => render_ready(attributes, image.as_ref()),
        FileReport::Failed { path, error } => render_failed(&display_name(path), error),
    }
}

fn render_ready(attributes: &FileAttributes, image: Option<&ImageMetadata>) {
    println!(
        "\n{}",
        style(format!("━━━ {} ━━━", display_name(&attributes.path)))
            .cyan()
            .bold()
    );

    print_property("Tamaño", &format_size(attributes.size_bytes), Color::White);
    print_property(
        "Creación",
        &format_optional_time(attributes.created_at),
        Color::White,
    );
    print_property(
        "Última modificación",
        &format_optional_time(attributes.modified_at),
        Color::White,
    );
    print_property(
        "Último acceso",
        &format_optional_time(attributes.accessed_at),
        Color::White,
    );
    print_property("Extensión", &attributes.extension, Color::White);
    print_property("Directorio", &attributes.directory, Color::White);
    print_flag("Solo lectura", attributes.read_only);
    print_flag("Oculto", attributes.hidden);
    print_flag("Archivado", attributes.archive);

    if let Some(image) = image {
        render_image_section(image);
    }
}

fn render_image_section(image: &ImageMetadata) {
    println!("\n  {}", style("Metadata de imagen:").cyan().bold());
    print_property(
        "Dimensiones",
        &format!("{} × {}", image.width_px, image.height_px),
        Color::White,
    );
    print_property(
        "DPI",
        &format!("{} × {}", image.dpi_x, image.dpi_y),
        Color::White,
    );
    print_property("Formato de pixel", &image.pixel_format, Color::White);

    if let Some(title) = &image.title {
        print_property("⚠  Título", title, Color::Yellow);
    }
    if let Some(subject) = &image.subject {
        print_property("⚠  Asunto", subject, Color::Yellow);
    }
    if let Some(comment) = &image.comment {
        print_property("⚠  Comentario", comment, Color::Yellow);
    }

    if image.has_text_tags() {
        println!(
            "\n{}",
            style("  ⚠  Esta imagen contiene etiquetas que pueden revelar información sensible")
                .yellow()
        );
    }
}

fn render_failed(name: &str, error: &str) {
    println!("\n{}", style(format!("━━━ ❌ {} ━━━", name)).red().bold());
    println!("{}", style(format!("  Error: {}", error)).red());
}

fn print_flag(label: &str, value: bool) {
    let (text, color) = if value {
        ("Sí", Color::Yellow)
    } else {
        ("No", Color::Green)
    };
    print_property(label, text, color);
}

/// Imprime una propiedad con el estilo consistente de METACleaner.
fn print_property(label: &str, value: &str, color: Color) {
    let label_styled = style(format!("  {}", label)).cyan().bold();
    let arrow = style("→").dim();

    let value_styled = match color {
        Color::Yellow => style(value).yellow(),
        Color::Green => style(value).green(),
        Color::Red => style(value).red(),
        _ => style(value).white(),
    };

    println!("{} {} {}", label_styled, arrow, value_styled);
}
