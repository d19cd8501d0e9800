use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;
use tempfile::tempdir;

use super::attributes::read_attributes;
use super::builder::{build_report, inspect_files};
use super::export::export_reports_json;
use super::image::{is_image_extension, read_image_metadata};
use super::model::FileReport;
use crate::errors::CleanError;

#[test]
fn read_attributes_normalizes_extension_and_reports_size() -> Result<(), Box<dyn std::error::Error>>
{
    let dir = tempdir()?;
    let source = dir.path().join("Informe.TXT");
    fs::write(&source, b"contenido de prueba")?;

    let attributes = read_attributes(&source)?;

    assert_eq!(attributes.size_bytes, 19);
    assert_eq!(attributes.extension, "txt");
    assert_eq!(attributes.directory, dir.path().display().to_string());
    assert!(!attributes.read_only);
    assert!(!attributes.hidden);
    assert!(attributes.modified_at.is_some());

    Ok(())
}

#[test]
fn read_attributes_fails_for_missing_path() {
    let error = read_attributes(Path::new("/ruta/que/no/existe.txt"))
        .expect_err("una ruta inexistente debería fallar");

    assert!(matches!(error, CleanError::Access { .. }));
}

#[cfg(unix)]
#[test]
fn dotfiles_are_reported_as_hidden() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let source = dir.path().join(".oculto");
    fs::write(&source, b"x")?;

    let attributes = read_attributes(&source)?;
    assert!(attributes.hidden);

    Ok(())
}

#[test]
fn report_for_missing_path_uses_error_variant() {
    let report = build_report(Path::new("/ruta/que/no/existe.png"));

    match report {
        FileReport::Failed { path, error } => {
            assert_eq!(path, Path::new("/ruta/que/no/existe.png"));
            assert!(error.contains("No se pudo acceder"));
        }
        FileReport::Ready { .. } => panic!("el reporte debería estar en la variante de error"),
    }
}

#[test]
fn non_image_extensions_are_never_decoded() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;

    // Contenido PNG válido con nombre de texto: la extensión manda.
    let source = dir.path().join("datos.txt");
    create_sample_png(&source, Some("Título oculto"), None)?;

    assert!(!is_image_extension("txt"));
    assert!(read_image_metadata(&source, "txt").is_none());

    match build_report(&source) {
        FileReport::Ready { image, .. } => assert!(image.is_none()),
        FileReport::Failed { .. } => panic!("los atributos deberían leerse sin problema"),
    }

    Ok(())
}

#[test]
fn corrupt_image_keeps_attributes_and_drops_image() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let source = dir.path().join("roto.png");
    fs::write(&source, b"esto no es un PNG de verdad")?;

    match build_report(&source) {
        FileReport::Ready { attributes, image } => {
            assert_eq!(attributes.extension, "png");
            assert!(image.is_none());
        }
        FileReport::Failed { .. } => panic!("una imagen corrupta no debería abortar el reporte"),
    }

    Ok(())
}

#[test]
fn png_report_includes_geometry_and_text_tags() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let source = dir.path().join("foto.png");
    create_sample_png(&source, Some("Foto secreta"), Some("Comentario privado"))?;

    let image = read_image_metadata(&source, "png").expect("la imagen debería decodificarse");

    assert_eq!(image.width_px, 3);
    assert_eq!(image.height_px, 2);
    assert_eq!(image.pixel_format, "Rgb8");
    assert_eq!(image.dpi_x, 96.0);
    assert_eq!(image.dpi_y, 96.0);
    assert_eq!(image.title.as_deref(), Some("Foto secreta"));
    assert_eq!(image.comment.as_deref(), Some("Comentario privado"));
    assert!(image.subject.is_none());

    Ok(())
}

#[test]
fn blank_text_tags_are_treated_as_absent() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let source = dir.path().join("foto.png");
    create_sample_png(&source, Some("   "), None)?;

    let image = read_image_metadata(&source, "png").expect("la imagen debería decodificarse");
    assert!(image.title.is_none());

    Ok(())
}

#[test]
fn inspect_preserves_order_and_is_idempotent() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let first = dir.path().join("zeta.txt");
    let second = dir.path().join("alfa.txt");
    fs::write(&first, b"primero")?;
    fs::write(&second, b"segundo")?;

    let paths = [first.clone(), second.clone()];
    let reports = inspect_files(&paths);
    let repeated = inspect_files(&paths);

    assert_eq!(reports.len(), 2);
    assert_eq!(reports[0].path(), first.as_path());
    assert_eq!(reports[1].path(), second.as_path());

    for (before, after) in reports.iter().zip(repeated.iter()) {
        let (FileReport::Ready { attributes: a, .. }, FileReport::Ready { attributes: b, .. }) =
            (before, after)
        else {
            panic!("ambas inspecciones deberían producir reportes completos");
        };
        assert_eq!(a.size_bytes, b.size_bytes);
        assert_eq!(a.extension, b.extension);
        assert_eq!(a.read_only, b.read_only);
        assert_eq!(a.hidden, b.hidden);
        assert_eq!(a.archive, b.archive);
    }

    Ok(())
}

#[test]
fn export_reports_json_writes_the_batch() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempdir()?;
    let source = dir.path().join("nota.txt");
    fs::write(&source, b"contenido")?;

    let reports = inspect_files(&[source]);
    let target = dir.path().join("reporte.json");
    export_reports_json(&reports, &target).map_err(Box::<dyn std::error::Error>::from)?;

    let json = fs::read_to_string(&target)?;
    assert!(json.contains("nota.txt"));
    assert!(json.contains("size_bytes"));

    Ok(())
}

fn create_sample_png(
    path: &Path,
    title: Option<&str>,
    comment: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let file = File::create(path)?;
    let mut encoder = png::Encoder::new(BufWriter::new(file), 3, 2);
    encoder.set_color(png::ColorType::Rgb);
    encoder.set_depth(png::BitDepth::Eight);

    if let Some(title) = title {
        encoder.add_text_chunk("Title".to_string(), title.to_string())?;
    }
    if let Some(comment) = comment {
        encoder.add_text_chunk("Comment".to_string(), comment.to_string())?;
    }

    let mut writer = encoder.write_header()?;
    writer.write_image_data(&[200_u8; 18])?;
    writer.finish()?;

    Ok(())
}
