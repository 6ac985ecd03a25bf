use image::{Rgb, RgbImage, Rgba, RgbaImage};
use lopdf::{Document, Object, ObjectId};
use pdf_assemble::*;
use pdf_collect::{ImagePath, SelectionState, from_files, from_folder};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

fn write_png(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let path = dir.join(name);
    RgbImage::from_pixel(width, height, Rgb([200, 30, 30]))
        .save_with_format(&path, image::ImageFormat::Png)
        .unwrap();
    path
}

fn write_jpeg(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
    let path = dir.join(name);
    RgbImage::from_pixel(width, height, Rgb([30, 30, 200]))
        .save_with_format(&path, image::ImageFormat::Jpeg)
        .unwrap();
    path
}

fn selection(paths: &[PathBuf]) -> SelectionState {
    from_files(paths).unwrap()
}

fn page_ids(doc: &Document) -> Vec<ObjectId> {
    doc.get_pages().into_values().collect()
}

fn media_box(doc: &Document, page_id: ObjectId) -> Vec<i64> {
    doc.get_dictionary(page_id)
        .unwrap()
        .get(b"MediaBox")
        .unwrap()
        .as_array()
        .unwrap()
        .iter()
        .map(|value| value.as_i64().unwrap())
        .collect()
}

fn page_image<'a>(doc: &'a Document, page_id: ObjectId) -> &'a lopdf::Stream {
    let page = doc.get_dictionary(page_id).unwrap();
    let resources = page.get(b"Resources").unwrap().as_dict().unwrap();
    let xobjects = resources.get(b"XObject").unwrap().as_dict().unwrap();
    let image_id = xobjects.get(b"Im0").unwrap().as_reference().unwrap();
    doc.get_object(image_id).unwrap().as_stream().unwrap()
}

#[tokio::test]
async fn test_pages_match_image_sizes_in_order() {
    let temp = TempDir::new().unwrap();
    let a = write_png(temp.path(), "A.png", 80, 60);
    let b = write_jpeg(temp.path(), "B.jpg", 120, 160);
    let selection = selection(&[b, a]);

    let output = temp.path().join("result").join("merged.pdf");
    assemble(selection.images(), &output).await.unwrap();

    let doc = Document::load(&output).unwrap();
    let pages = page_ids(&doc);
    assert_eq!(pages.len(), 2);
    assert_eq!(media_box(&doc, pages[0]), vec![0, 0, 80, 60]);
    assert_eq!(media_box(&doc, pages[1]), vec![0, 0, 120, 160]);
}

#[tokio::test]
async fn test_single_image_single_page() {
    let temp = TempDir::new().unwrap();
    let a = write_png(temp.path(), "only.png", 33, 17);
    let output = temp.path().join("out.pdf");

    assemble(selection(&[a]).images(), &output).await.unwrap();

    let doc = Document::load(&output).unwrap();
    let pages = page_ids(&doc);
    assert_eq!(pages.len(), 1);
    assert_eq!(media_box(&doc, pages[0]), vec![0, 0, 33, 17]);
}

#[tokio::test]
async fn test_jpeg_is_embedded_unchanged() {
    let temp = TempDir::new().unwrap();
    let jpeg = write_jpeg(temp.path(), "photo.jpeg", 64, 48);
    let original = std::fs::read(&jpeg).unwrap();
    let output = temp.path().join("out.pdf");

    assemble(selection(&[jpeg]).images(), &output).await.unwrap();

    let doc = Document::load(&output).unwrap();
    let stream = page_image(&doc, page_ids(&doc)[0]);
    assert_eq!(
        stream.dict.get(b"Filter").unwrap().as_name().unwrap(),
        b"DCTDecode"
    );
    assert_eq!(
        stream.dict.get(b"ColorSpace").unwrap().as_name().unwrap(),
        b"DeviceRGB"
    );
    assert_eq!(stream.content, original);
}

#[tokio::test]
async fn test_png_alpha_becomes_soft_mask() {
    let temp = TempDir::new().unwrap();
    let translucent = temp.path().join("translucent.png");
    RgbaImage::from_fn(4, 4, |x, _| Rgba([10, 20, 30, (x * 60) as u8]))
        .save(&translucent)
        .unwrap();
    let opaque = temp.path().join("opaque.png");
    RgbaImage::from_pixel(4, 4, Rgba([10, 20, 30, 255]))
        .save(&opaque)
        .unwrap();
    let output = temp.path().join("out.pdf");

    let selection = selection(&[translucent, opaque]);
    assemble(selection.images(), &output).await.unwrap();

    let doc = Document::load(&output).unwrap();
    let pages = page_ids(&doc);
    // natural order: opaque, translucent
    assert!(page_image(&doc, pages[0]).dict.get(b"SMask").is_err());
    assert!(page_image(&doc, pages[1]).dict.get(b"SMask").is_ok());
}

#[tokio::test]
async fn test_zero_images_creates_nothing() {
    let temp = TempDir::new().unwrap();
    let output_dir = temp.path().join("result");
    let images: Vec<ImagePath> = Vec::new();

    let result = assemble(&images, output_dir.join("merged.pdf")).await;
    assert!(matches!(result, Err(AssembleError::NoImages)));
    assert!(!output_dir.exists());
}

#[tokio::test]
async fn test_corrupt_image_leaves_no_output() {
    let temp = TempDir::new().unwrap();
    let good = write_png(temp.path(), "1.png", 10, 10);
    let bad = temp.path().join("2.png");
    std::fs::write(&bad, b"definitely not an image").unwrap();
    let output_dir = temp.path().join("result");

    let selection = selection(&[good, bad]);
    let result = assemble(selection.images(), output_dir.join("merged.pdf")).await;

    assert!(matches!(result, Err(AssembleError::Decode { .. })));
    assert!(!output_dir.exists());
}

#[tokio::test]
async fn test_content_decides_format_over_extension() {
    let temp = TempDir::new().unwrap();
    let misnamed = temp.path().join("actually_png.jpg");
    std::fs::copy(write_png(temp.path(), "src.png", 12, 8), &misnamed).unwrap();
    let gif = temp.path().join("animated.png");
    std::fs::write(&gif, b"GIF89a\x01\x00\x01\x00\x00\x00\x00;").unwrap();

    let output = temp.path().join("out.pdf");
    assemble(selection(&[misnamed]).images(), &output)
        .await
        .unwrap();
    let doc = Document::load(&output).unwrap();
    assert_eq!(media_box(&doc, page_ids(&doc)[0]), vec![0, 0, 12, 8]);

    let result = assemble(selection(&[gif]).images(), temp.path().join("gif.pdf")).await;
    assert!(matches!(result, Err(AssembleError::UnsupportedFormat { .. })));
}

#[tokio::test]
async fn test_progress_and_title() {
    let temp = TempDir::new().unwrap();
    for name in ["p1.png", "p2.png", "p3.png"] {
        write_png(temp.path(), name, 5, 5);
    }
    let selection = from_folder(temp.path(), false).unwrap();
    let output = temp.path().join("out.pdf");

    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    assemble_with_progress(
        selection.images(),
        &output,
        Some("Holiday".to_string()),
        move |done, total| sink.lock().unwrap().push((done, total)),
    )
    .await
    .unwrap();

    assert_eq!(*seen.lock().unwrap(), vec![(1, 3), (2, 3), (3, 3)]);

    let doc = Document::load(&output).unwrap();
    let info_id = doc.trailer.get(b"Info").unwrap().as_reference().unwrap();
    let info = doc.get_dictionary(info_id).unwrap();
    match info.get(b"Title").unwrap() {
        Object::String(bytes, _) => assert_eq!(bytes, b"Holiday"),
        other => panic!("unexpected title {other:?}"),
    }
    assert!(info.get(b"Producer").is_ok());
}

#[tokio::test]
async fn test_second_run_never_overwrites_first() {
    let temp = TempDir::new().unwrap();
    let image = write_png(temp.path(), "a.png", 6, 6);
    let selection = selection(&[image]);
    let target = OutputTarget::for_selection(&selection, None);
    assert_eq!(target.dir(), selection.source().join("result"));

    let first = target.resolve();
    assemble(selection.images(), &first).await.unwrap();
    let first_bytes = std::fs::read(&first).unwrap();

    let second = target.resolve();
    assert_ne!(first, second);
    assemble(selection.images(), &second).await.unwrap();

    assert_eq!(std::fs::read(&first).unwrap(), first_bytes);
    assert!(second.exists());
}

#[test]
fn test_audit_flags_large_images() {
    let temp = TempDir::new().unwrap();
    write_png(temp.path(), "big.png", 100, 100);
    write_png(temp.path(), "small.png", 10, 10);
    let selection = from_folder(temp.path(), false).unwrap();

    let warnings = audit_with_threshold(selection.images(), 10_000);
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].to_string(), "big.png (100x100)");

    assert!(audit(selection.images()).is_empty());
}

#[test]
fn test_options_validate() {
    assert!(MergeOptions::default().validate().is_ok());

    let options = MergeOptions {
        size_warning_pixels: 0,
        ..Default::default()
    };
    assert!(matches!(options.validate(), Err(AssembleError::Config(_))));

    let temp = TempDir::new().unwrap();
    let file = temp.path().join("not_a_dir");
    std::fs::write(&file, b"").unwrap();
    let options = MergeOptions {
        output_dir: Some(file),
        ..Default::default()
    };
    assert!(options.validate().is_err());
}

#[tokio::test]
async fn test_options_save_and_load() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("options.json");
    let options = MergeOptions {
        recursive: true,
        title: Some("Scans".to_string()),
        ..Default::default()
    };

    options.save(&path).await.unwrap();
    assert_eq!(MergeOptions::load(&path).await.unwrap(), options);

    std::fs::write(&path, br#"{ "recursive": true }"#).unwrap();
    let partial = MergeOptions::load(&path).await.unwrap();
    assert!(partial.recursive);
    assert_eq!(partial.size_warning_pixels, DEFAULT_SIZE_WARNING_PIXELS);
}

#[test]
fn test_audit_measures_misnamed_images() {
    let temp = TempDir::new().unwrap();
    let misnamed = temp.path().join("huge.jpg");
    std::fs::copy(write_png(temp.path(), "src.png", 120, 100), &misnamed).unwrap();
    let selection = selection(&[misnamed]);

    let warnings = audit_with_threshold(selection.images(), 10_000);
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].to_string(), "huge.jpg (120x100)");
}

/// Insert an APP1 segment carrying only the EXIF Orientation tag
fn with_exif_orientation(jpeg: &[u8], orientation: u16) -> Vec<u8> {
    let mut tiff = b"Exif\0\0MM\0\x2A\0\0\0\x08".to_vec();
    tiff.extend_from_slice(&[0, 1, 0x01, 0x12, 0, 3, 0, 0, 0, 1]);
    tiff.extend_from_slice(&orientation.to_be_bytes());
    tiff.extend_from_slice(&[0, 0, 0, 0, 0, 0]);

    let mut out = jpeg[..2].to_vec();
    out.extend_from_slice(&[0xFF, 0xE1]);
    out.extend_from_slice(&((tiff.len() + 2) as u16).to_be_bytes());
    out.extend_from_slice(&tiff);
    out.extend_from_slice(&jpeg[2..]);
    out
}

#[tokio::test]
async fn test_exif_orientation_rotates_page() {
    let temp = TempDir::new().unwrap();
    let plain = write_jpeg(temp.path(), "plain.jpg", 40, 30);
    let rotated = temp.path().join("rotated.jpg");
    std::fs::write(
        &rotated,
        with_exif_orientation(&std::fs::read(&plain).unwrap(), 6),
    )
    .unwrap();
    let output = temp.path().join("out.pdf");

    let selection = selection(&[plain, rotated]);
    assemble(selection.images(), &output).await.unwrap();

    let doc = Document::load(&output).unwrap();
    let pages = page_ids(&doc);
    let plain_page = doc.get_dictionary(pages[0]).unwrap();
    assert!(plain_page.get(b"Rotate").is_err());

    let rotated_page = doc.get_dictionary(pages[1]).unwrap();
    assert_eq!(rotated_page.get(b"Rotate").unwrap().as_i64().unwrap(), 90);
    // stored pixel size, not the displayed one
    assert_eq!(media_box(&doc, pages[1]), vec![0, 0, 40, 30]);
}

#[tokio::test]
async fn test_assemble_into_never_replaces_existing_file() {
    let temp = TempDir::new().unwrap();
    let image = write_png(temp.path(), "a.png", 6, 6);
    let selection = selection(&[image]);
    let target = OutputTarget::for_selection(&selection, None);

    std::fs::create_dir_all(target.dir()).unwrap();
    std::fs::write(target.path(), b"earlier run").unwrap();

    let written = assemble_into(selection.images(), &target, None, |_, _| {})
        .await
        .unwrap();

    assert_ne!(written, target.path());
    assert_eq!(std::fs::read(target.path()).unwrap(), b"earlier run");
    assert_eq!(page_ids(&Document::load(&written).unwrap()).len(), 1);
}

#[tokio::test]
async fn test_concurrent_runs_get_distinct_files() {
    let temp = TempDir::new().unwrap();
    let image = write_png(temp.path(), "a.png", 6, 6);
    let selection = selection(&[image]);
    let target = OutputTarget::for_selection(&selection, None);

    let (first, second) = tokio::join!(
        assemble_into(selection.images(), &target, None, |_, _| {}),
        assemble_into(selection.images(), &target, None, |_, _| {}),
    );
    let (first, second) = (first.unwrap(), second.unwrap());

    assert_ne!(first, second);
    assert!(first.exists() && second.exists());
    let leftovers: Vec<_> = std::fs::read_dir(target.dir())
        .unwrap()
        .map(|entry| entry.unwrap().file_name())
        .filter(|name| name.to_string_lossy().ends_with(".part"))
        .collect();
    assert!(leftovers.is_empty());
}
