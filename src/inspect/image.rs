//! Decodificación de metadata embebida en imágenes raster.
//!
//! Solo se leen los encabezados del contenedor: la geometría, la resolución y
//! las etiquetas descriptivas están disponibles sin decodificar el buffer de
//! pixeles completo.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use image::{ImageDecoder, ImageFormat};

use super::model::ImageMetadata;

/// Extensiones de imagen reconocidas; cualquier otra se ignora sin abrir el
/// archivo.
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "bmp", "tiff", "webp"];

// Resolución asumida cuando el contenedor no declara ninguna.
const DEFAULT_DPI: f64 = 96.0;

const INCHES_PER_METER: f64 = 0.0254;

// Etiquetas XP* de Windows; `kamadak-exif` no exporta constantes para ellas.
const TAG_XP_TITLE: exif::Tag = exif::Tag(exif::Context::Tiff, 0x9c9b);
const TAG_XP_COMMENT: exif::Tag = exif::Tag(exif::Context::Tiff, 0x9c9c);
const TAG_XP_SUBJECT: exif::Tag = exif::Tag(exif::Context::Tiff, 0x9c9f);

pub fn is_image_extension(extension: &str) -> bool {
    IMAGE_EXTENSIONS.contains(&extension.to_lowercase().as_str())
}

/// Lee geometría, resolución, formato de pixel y etiquetas descriptivas de
/// una imagen. Cualquier fallo de apertura o decodificación devuelve `None`:
/// la inspección es de mejor esfuerzo y nunca aborta el lote.
pub fn read_image_metadata(path: &Path, extension: &str) -> Option<ImageMetadata> {
    if !is_image_extension(extension) {
        return None;
    }

    // El formato se detecta por contenido, no por extensión: un archivo
    // re-codificado a PNG conserva su nombre original.
    let format = sniff_format(path)?;

    let mut metadata = match format {
        ImageFormat::Png => read_png(path)?,
        _ => read_generic(path, format)?,
    };

    if matches!(format, ImageFormat::Jpeg | ImageFormat::Tiff) {
        apply_exif(path, &mut metadata);
    }

    metadata.title = non_blank(metadata.title.take());
    metadata.subject = non_blank(metadata.subject.take());
    metadata.comment = non_blank(metadata.comment.take());

    Some(metadata)
}

fn sniff_format(path: &Path) -> Option<ImageFormat> {
    let mut file = File::open(path).ok()?;
    let mut header = [0_u8; 32];
    let read = file.read(&mut header).ok()?;
    image::guess_format(&header[..read]).ok()
}

/// PNG se lee con su decodificador nativo: el encabezado entrega geometría,
/// profundidad, resolución (pHYs) y los bloques de texto tEXt/zTXt/iTXt.
fn read_png(path: &Path) -> Option<ImageMetadata> {
    let file = File::open(path).ok()?;
    let decoder = png::Decoder::new(BufReader::new(file));
    let reader = decoder.read_info().ok()?;
    let info = reader.info();

    let (dpi_x, dpi_y) = png_resolution(info);
    let mut metadata = ImageMetadata {
        width_px: info.width,
        height_px: info.height,
        dpi_x,
        dpi_y,
        pixel_format: format!("{:?}{}", info.color_type, info.bit_depth as u8),
        title: None,
        subject: None,
        comment: None,
    };

    for chunk in &info.uncompressed_latin1_text {
        assign_png_text(&mut metadata, &chunk.keyword, chunk.text.clone());
    }
    for chunk in &info.compressed_latin1_text {
        if let Ok(text) = chunk.get_text() {
            assign_png_text(&mut metadata, &chunk.keyword, text);
        }
    }
    for chunk in &info.utf8_text {
        if let Ok(text) = chunk.get_text() {
            assign_png_text(&mut metadata, &chunk.keyword, text);
        }
    }

    Some(metadata)
}

fn png_resolution(info: &png::Info<'_>) -> (f64, f64) {
    match &info.pixel_dims {
        Some(dims) if matches!(dims.unit, png::Unit::Meter) => (
            f64::from(dims.xppu) * INCHES_PER_METER,
            f64::from(dims.yppu) * INCHES_PER_METER,
        ),
        _ => (DEFAULT_DPI, DEFAULT_DPI),
    }
}

// Palabras clave estándar del bloque de texto PNG; la primera aparición gana.
fn assign_png_text(metadata: &mut ImageMetadata, keyword: &str, text: String) {
    let slot = if keyword.eq_ignore_ascii_case("Title") {
        &mut metadata.title
    } else if keyword.eq_ignore_ascii_case("Description") {
        &mut metadata.subject
    } else if keyword.eq_ignore_ascii_case("Comment") {
        &mut metadata.comment
    } else {
        return;
    };

    if slot.is_none() {
        *slot = Some(text);
    }
}

/// Los demás contenedores usan el decodificador correspondiente de `image`
/// para obtener geometría y formato de pixel sin decodificar pixeles.
fn read_generic(path: &Path, format: ImageFormat) -> Option<ImageMetadata> {
    use image::codecs::{bmp::BmpDecoder, gif::GifDecoder, jpeg::JpegDecoder, tiff::TiffDecoder, webp::WebPDecoder};

    let reader = BufReader::new(File::open(path).ok()?);
    let decoder: Box<dyn ImageDecoder> = match format {
        ImageFormat::Jpeg => Box::new(JpegDecoder::new(reader).ok()?),
        ImageFormat::Gif => Box::new(GifDecoder::new(reader).ok()?),
        ImageFormat::Bmp => Box::new(BmpDecoder::new(reader).ok()?),
        ImageFormat::Tiff => Box::new(TiffDecoder::new(reader).ok()?),
        ImageFormat::WebP => Box::new(WebPDecoder::new(reader).ok()?),
        _ => return None,
    };

    let (width_px, height_px) = decoder.dimensions();
    Some(ImageMetadata {
        width_px,
        height_px,
        dpi_x: DEFAULT_DPI,
        dpi_y: DEFAULT_DPI,
        pixel_format: format!("{:?}", decoder.color_type()),
        title: None,
        subject: None,
        comment: None,
    })
}

/// Completa resolución y etiquetas descriptivas desde el bloque EXIF de
/// contenedores JPEG y TIFF. Todo fallo se ignora.
fn apply_exif(path: &Path, metadata: &mut ImageMetadata) {
    let Ok(file) = File::open(path) else {
        return;
    };
    let mut reader = BufReader::new(file);
    let Ok(exif) = exif::Reader::new().read_from_container(&mut reader) else {
        return;
    };

    let factor = resolution_unit_factor(&exif);
    if let Some(value) = rational_field(&exif, exif::Tag::XResolution) {
        metadata.dpi_x = value * factor;
    }
    if let Some(value) = rational_field(&exif, exif::Tag::YResolution) {
        metadata.dpi_y = value * factor;
    }

    if metadata.title.is_none() {
        metadata.title = xp_text_field(&exif, TAG_XP_TITLE);
    }
    if metadata.subject.is_none() {
        metadata.subject = ascii_field(&exif, exif::Tag::ImageDescription)
            .or_else(|| xp_text_field(&exif, TAG_XP_SUBJECT));
    }
    if metadata.comment.is_none() {
        metadata.comment = xp_text_field(&exif, TAG_XP_COMMENT);
    }
}

// ResolutionUnit 3 = valores por centímetro; 2 (o ausente) = por pulgada.
fn resolution_unit_factor(exif: &exif::Exif) -> f64 {
    let unit = exif
        .get_field(exif::Tag::ResolutionUnit, exif::In::PRIMARY)
        .and_then(|field| field.value.get_uint(0));

    match unit {
        Some(3) => 2.54,
        _ => 1.0,
    }
}

fn rational_field(exif: &exif::Exif, tag: exif::Tag) -> Option<f64> {
    let field = exif.get_field(tag, exif::In::PRIMARY)?;
    match &field.value {
        exif::Value::Rational(values) => values.first().map(|value| value.to_f64()),
        _ => None,
    }
}

fn ascii_field(exif: &exif::Exif, tag: exif::Tag) -> Option<String> {
    let field = exif.get_field(tag, exif::In::PRIMARY)?;
    match &field.value {
        exif::Value::Ascii(values) => values
            .first()
            .map(|value| String::from_utf8_lossy(value).into_owned()),
        _ => None,
    }
}

// Las etiquetas XP* de Windows guardan UCS-2 LE dentro de un campo de bytes.
fn xp_text_field(exif: &exif::Exif, tag: exif::Tag) -> Option<String> {
    let field = exif.get_field(tag, exif::In::PRIMARY)?;
    let exif::Value::Byte(bytes) = &field.value else {
        return None;
    };

    let mut units: Vec<u16> = bytes
        .chunks_exact(2)
        .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
        .collect();
    while units.last() == Some(&0) {
        units.pop();
    }

    Some(String::from_utf16_lossy(&units))
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}
