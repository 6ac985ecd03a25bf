//! Image-to-PDF assembly
//!
//! Every image becomes one page sized exactly to the image, in the order
//! given. The document is built in memory and only written once every
//! image has been embedded.

mod io;
mod jpeg;
mod orientation;
mod page;
mod raster;
mod xobject;

use crate::constants::{PDF_VERSION, PRODUCER};
use crate::output::OutputTarget;
use crate::types::*;
use chrono::{DateTime, Local};
use lopdf::{Dictionary, Document, Object, StringFormat};
use pdf_collect::ImagePath;
use std::path::{Path, PathBuf};

/// Merge `images` into a single PDF at `output_path`
pub async fn assemble(images: &[ImagePath], output_path: impl AsRef<Path>) -> Result<()> {
    assemble_with_progress(images, output_path, None, |_, _| {}).await
}

/// Merge `images` into a single PDF at `output_path`, calling
/// `progress(done, total)` after each page.
///
/// Nothing is created on disk when any image fails. A file already at
/// `output_path` is replaced.
pub async fn assemble_with_progress<F>(
    images: &[ImagePath],
    output_path: impl AsRef<Path>,
    title: Option<String>,
    progress: F,
) -> Result<()>
where
    F: FnMut(usize, usize) + Send + 'static,
{
    let output_path = output_path.as_ref();
    let bytes = render(images, title, progress).await?;
    io::save_pdf(bytes, output_path).await?;
    log::info!("Wrote {}", output_path.display());
    Ok(())
}

/// Merge `images` into a new file named by `target` and return its path.
///
/// Never overwrites: if the generated name is taken, even by a run that
/// finished a moment ago, the next `_N` suffix is used.
pub async fn assemble_into<F>(
    images: &[ImagePath],
    target: &OutputTarget,
    title: Option<String>,
    progress: F,
) -> Result<PathBuf>
where
    F: FnMut(usize, usize) + Send + 'static,
{
    let bytes = render(images, title, progress).await?;
    let path = io::save_pdf_new(bytes, target).await?;
    log::info!("Wrote {}", path.display());
    Ok(path)
}

async fn render<F>(images: &[ImagePath], title: Option<String>, progress: F) -> Result<Vec<u8>>
where
    F: FnMut(usize, usize) + Send + 'static,
{
    if images.is_empty() {
        return Err(AssembleError::NoImages);
    }

    let images = images.to_vec();
    tokio::task::spawn_blocking(move || build_pdf_bytes(&images, title.as_deref(), progress))
        .await?
}

fn build_pdf_bytes<F>(images: &[ImagePath], title: Option<&str>, mut progress: F) -> Result<Vec<u8>>
where
    F: FnMut(usize, usize),
{
    let total = images.len();
    let mut output = Document::with_version(PDF_VERSION);
    let pages_id = output.new_object_id();
    let mut page_ids = Vec::with_capacity(total);

    for (index, image) in images.iter().enumerate() {
        let bytes = std::fs::read(image.path()).map_err(|source| AssembleError::Read {
            path: image.path().to_path_buf(),
            source,
        })?;

        let embedded = xobject::embed_image(&mut output, image, bytes)?;
        page_ids.push(page::add_image_page(&mut output, embedded, pages_id));
        log::debug!(
            "Page {}/{}: {} ({}x{})",
            index + 1,
            total,
            image.file_name(),
            embedded.width,
            embedded.height
        );
        progress(index + 1, total);
    }

    let mut pages = Dictionary::new();
    pages.set("Type", Object::Name(b"Pages".to_vec()));
    pages.set(
        "Kids",
        Object::Array(page_ids.into_iter().map(Object::Reference).collect()),
    );
    pages.set("Count", Object::Integer(total as i64));
    output.objects.insert(pages_id, Object::Dictionary(pages));

    let mut catalog = Dictionary::new();
    catalog.set("Type", Object::Name(b"Catalog".to_vec()));
    catalog.set("Pages", Object::Reference(pages_id));
    let catalog_id = output.add_object(catalog);
    output.trailer.set("Root", Object::Reference(catalog_id));

    let info_id = output.add_object(info_dictionary(title, &Local::now()));
    output.trailer.set("Info", Object::Reference(info_id));

    let mut writer = Vec::new();
    output.save_to(&mut writer)?;
    Ok(writer)
}

fn info_dictionary(title: Option<&str>, now: &DateTime<Local>) -> Dictionary {
    let mut info = Dictionary::new();
    info.set("Producer", Object::string_literal(PRODUCER));
    info.set("CreationDate", Object::string_literal(pdf_date(now)));
    if let Some(title) = title {
        info.set("Title", text_string(title));
    }
    info
}

/// `D:YYYYMMDDHHmmSS+HH'mm'`
fn pdf_date(now: &DateTime<Local>) -> String {
    let offset_minutes = now.offset().local_minus_utc() / 60;
    let sign = if offset_minutes < 0 { '-' } else { '+' };
    let offset_minutes = offset_minutes.abs();
    format!(
        "D:{}{}{:02}'{:02}'",
        now.format("%Y%m%d%H%M%S"),
        sign,
        offset_minutes / 60,
        offset_minutes % 60
    )
}

/// ASCII as a literal, anything else as UTF-16BE with a byte order mark
fn text_string(text: &str) -> Object {
    if text.is_ascii() {
        return Object::string_literal(text);
    }
    let mut bytes = vec![0xFE, 0xFF];
    bytes.extend(text.encode_utf16().flat_map(u16::to_be_bytes));
    Object::String(bytes, StringFormat::Hexadecimal)
}
