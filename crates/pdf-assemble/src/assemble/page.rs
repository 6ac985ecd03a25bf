//! Exact-fit pages
//!
//! One PDF unit per pixel: the MediaBox is the image's pixel size and the
//! image fills it with no scaling, cropping or padding.

use super::xobject::EmbeddedImage;
use crate::constants::PAGE_IMAGE_NAME;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};

/// Add a page showing `image` at its native size, turned by its EXIF
/// rotation
pub(crate) fn add_image_page(
    output: &mut Document,
    image: EmbeddedImage,
    parent_pages_id: ObjectId,
) -> ObjectId {
    let (width, height) = (image.width, image.height);

    let content = format!(
        "q {} 0 0 {} 0 0 cm /{} Do Q\n",
        width, height, PAGE_IMAGE_NAME
    );
    let content_id = output.add_object(Stream::new(Dictionary::new(), content.into_bytes()));

    let mut xobjects = Dictionary::new();
    xobjects.set(PAGE_IMAGE_NAME, Object::Reference(image.id));
    let mut resources = Dictionary::new();
    resources.set("XObject", Object::Dictionary(xobjects));

    let mut page_dict = Dictionary::new();
    page_dict.set("Type", Object::Name(b"Page".to_vec()));
    page_dict.set("Parent", Object::Reference(parent_pages_id));
    page_dict.set(
        "MediaBox",
        Object::Array(vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Integer(i64::from(width)),
            Object::Integer(i64::from(height)),
        ]),
    );
    if image.rotation != 0 {
        page_dict.set("Rotate", Object::Integer(i64::from(image.rotation)));
    }
    page_dict.set("Resources", Object::Dictionary(resources));
    page_dict.set("Contents", Object::Reference(content_id));

    output.add_object(page_dict)
}
