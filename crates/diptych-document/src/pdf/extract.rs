// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// PDF image extraction — walk each page's content stream and decode every
// image XObject it paints, using the `lopdf` crate.

use std::collections::HashMap;
use std::path::Path;

use diptych_core::error::{DiptychError, Result};
use diptych_core::types::{PixelBuffer, SampleLayout};
use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use tracing::{debug, info, instrument, warn};

use crate::source::DocumentImage;

/// Page-tree levels searched for inherited `/Resources` before giving up.
const MAX_INHERITANCE_DEPTH: usize = 32;

/// Form XObjects nested deeper than this are not walked.
const MAX_FORM_DEPTH: usize = 16;

/// Extracts the raster images painted in a PDF, in paint order.
///
/// Wraps `lopdf::Document`. Images drawn with the `Do` operator are returned
/// whether a page paints them directly or through (nested) form XObjects;
/// inline images are ignored. Images whose samples are not 8-bit RGB, or
/// JPEG, are skipped with a warning rather than failing the whole document.
pub struct ImageExtractor {
    /// The underlying lopdf document.
    document: Document,
    /// Source path, if opened from a file (useful for diagnostics).
    source_path: Option<String>,
}

/// State threaded through one [`ImageExtractor::extract_images`] walk.
#[derive(Default)]
struct PaintWalk {
    images: Vec<DocumentImage>,
    decoded: HashMap<ObjectId, Option<DocumentImage>>,
    /// Forms currently being walked, outermost first.
    open_forms: Vec<ObjectId>,
}

impl ImageExtractor {
    // -- Construction ---------------------------------------------------------

    /// Open a PDF from the filesystem.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path_ref = path.as_ref();
        info!("Opening PDF: {}", path_ref.display());

        let document = Document::load(path_ref).map_err(|err| {
            DiptychError::PdfError(format!("failed to open {}: {}", path_ref.display(), err))
        })?;

        debug!(pages = document.get_pages().len(), "PDF loaded");

        Ok(Self {
            document,
            source_path: Some(path_ref.display().to_string()),
        })
    }

    /// Create an extractor from raw PDF bytes already in memory.
    #[instrument(skip_all, fields(bytes_len = data.len()))]
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let document = Document::load_mem(data).map_err(|err| {
            DiptychError::PdfError(format!("failed to load PDF from memory: {}", err))
        })?;

        debug!(pages = document.get_pages().len(), "PDF loaded from bytes");

        Ok(Self {
            document,
            source_path: None,
        })
    }

    // -- Inspection -----------------------------------------------------------

    /// Number of pages in the document.
    pub fn page_count(&self) -> usize {
        self.document.get_pages().len()
    }

    /// Return the source path if the extractor was created via [`ImageExtractor::open`].
    pub fn source_path(&self) -> Option<&str> {
        self.source_path.as_deref()
    }

    // -- Extraction -----------------------------------------------------------

    /// Decode every image painted in the document, page by page, in paint
    /// order. An image painted twice appears twice.
    #[instrument(skip(self))]
    pub fn extract_images(&self) -> Result<Vec<DocumentImage>> {
        let mut walk = PaintWalk::default();

        for (page_number, page_id) in self.document.get_pages() {
            let content_bytes = self.document.get_page_content(page_id).map_err(|err| {
                DiptychError::PdfError(format!(
                    "cannot read content of page {}: {}",
                    page_number, err
                ))
            })?;
            let content = Content::decode(&content_bytes).map_err(|err| {
                DiptychError::PdfError(format!(
                    "cannot parse content of page {}: {}",
                    page_number, err
                ))
            })?;

            let Some(xobjects) = self.page_xobjects(page_id) else {
                debug!(page_number, "Page has no XObject resources");
                continue;
            };

            self.walk_operations(page_number, &content.operations, xobjects, &mut walk);
        }

        info!(count = walk.images.len(), "Image extraction complete");
        Ok(walk.images)
    }

    /// [`extract_images`](Self::extract_images), normalised to RGBA buffers.
    pub fn extract_pixel_buffers(&self) -> Result<Vec<PixelBuffer>> {
        self.extract_images()?
            .into_iter()
            .map(DocumentImage::into_pixel_buffer)
            .collect()
    }

    // -- Helpers --------------------------------------------------------------

    /// Follow the `Do` operators of one content stream against `xobjects`.
    fn walk_operations<'a>(
        &'a self,
        page_number: u32,
        operations: &[Operation],
        xobjects: &'a Dictionary,
        walk: &mut PaintWalk,
    ) {
        for operation in operations.iter().filter(|op| op.operator == "Do") {
            let Some(Object::Name(name)) = operation.operands.first() else {
                continue;
            };
            let Ok(entry) = xobjects.get(name) else {
                warn!(
                    page_number,
                    name = %String::from_utf8_lossy(name),
                    "Do references an unknown XObject"
                );
                continue;
            };

            let (id, stream) = match entry {
                Object::Reference(id) => match self.document.get_object(*id) {
                    Ok(Object::Stream(stream)) => (Some(*id), stream),
                    _ => continue,
                },
                Object::Stream(stream) => (None, stream),
                _ => continue,
            };

            if self.has_subtype(&stream.dict, b"Form") {
                self.walk_form(page_number, id, stream, xobjects, walk);
                continue;
            }

            let image = match id {
                Some(id) => walk
                    .decoded
                    .entry(id)
                    .or_insert_with(|| self.decode_image(stream))
                    .clone(),
                None => self.decode_image(stream),
            };

            if let Some(image) = image {
                debug!(
                    page_number,
                    width = image.width,
                    height = image.height,
                    layout = ?image.layout,
                    "Image extracted"
                );
                walk.images.push(image);
            }
        }
    }

    /// Walk the content of a form XObject. A form without `/Resources` uses
    /// the resources of whatever painted it.
    fn walk_form<'a>(
        &'a self,
        page_number: u32,
        id: Option<ObjectId>,
        form: &'a Stream,
        inherited: &'a Dictionary,
        walk: &mut PaintWalk,
    ) {
        if walk.open_forms.len() >= MAX_FORM_DEPTH {
            warn!(page_number, "Skipping form XObject nested too deeply");
            return;
        }
        if let Some(id) = id
            && walk.open_forms.contains(&id)
        {
            warn!(page_number, form = ?id, "Skipping form XObject that paints itself");
            return;
        }

        let content = match stream_content(form).and_then(|bytes| Content::decode(&bytes)) {
            Ok(content) => content,
            Err(err) => {
                warn!(page_number, %err, "Skipping form XObject with unreadable content");
                return;
            }
        };

        let xobjects = match form.dict.get(b"Resources") {
            Ok(resources) => {
                let Some(xobjects) = self
                    .resolve_dict(resources)
                    .and_then(|resources| resources.get(b"XObject").ok())
                    .and_then(|xobjects| self.resolve_dict(xobjects))
                else {
                    debug!(page_number, "Form XObject has no XObject resources");
                    return;
                };
                xobjects
            }
            Err(_) => inherited,
        };

        if let Some(id) = id {
            walk.open_forms.push(id);
        }
        self.walk_operations(page_number, &content.operations, xobjects, walk);
        if id.is_some() {
            walk.open_forms.pop();
        }
    }

    /// Follow a single indirect reference.
    fn resolve<'a>(&'a self, object: &'a Object) -> Option<&'a Object> {
        match object {
            Object::Reference(id) => self.document.get_object(*id).ok(),
            other => Some(other),
        }
    }

    fn resolve_dict<'a>(&'a self, object: &'a Object) -> Option<&'a Dictionary> {
        match self.resolve(object)? {
            Object::Dictionary(dict) => Some(dict),
            _ => None,
        }
    }

    /// Entry of `dict` with one level of indirection followed.
    fn lookup<'a>(&'a self, dict: &'a Dictionary, key: &[u8]) -> Option<&'a Object> {
        self.resolve(dict.get(key).ok()?)
    }

    fn has_subtype(&self, dict: &Dictionary, subtype: &[u8]) -> bool {
        matches!(self.lookup(dict, b"Subtype"), Some(Object::Name(name)) if name == subtype)
    }

    /// The `/XObject` resource dictionary in effect for a page, walking up the
    /// page tree for inherited `/Resources`.
    fn page_xobjects(&self, page_id: ObjectId) -> Option<&Dictionary> {
        let mut node = self.document.get_dictionary(page_id).ok()?;
        for _ in 0..MAX_INHERITANCE_DEPTH {
            if let Ok(resources) = node.get(b"Resources") {
                let resources = self.resolve_dict(resources)?;
                return self.resolve_dict(resources.get(b"XObject").ok()?);
            }
            node = self.resolve_dict(node.get(b"Parent").ok()?)?;
        }
        None
    }

    /// Positive integer entry of an image dictionary.
    fn dimension(&self, dict: &Dictionary, key: &[u8]) -> Option<u32> {
        match self.lookup(dict, key)? {
            Object::Integer(value) => u32::try_from(*value).ok().filter(|v| *v > 0),
            _ => None,
        }
    }

    /// Whether `/ColorSpace` describes three-component RGB samples:
    /// `DeviceRGB`, `CalRGB`, or an `ICCBased` profile with `/N 3`.
    fn is_rgb_color_space(&self, dict: &Dictionary) -> bool {
        match self.lookup(dict, b"ColorSpace") {
            Some(Object::Name(name)) => name == b"DeviceRGB",
            Some(Object::Array(family)) => match family.first() {
                Some(Object::Name(name)) if name == b"CalRGB" => true,
                Some(Object::Name(name)) if name == b"ICCBased" => {
                    let components = match family.get(1).and_then(|p| self.resolve(p)) {
                        Some(Object::Stream(profile)) => self.lookup(&profile.dict, b"N"),
                        _ => None,
                    };
                    matches!(components, Some(Object::Integer(3)))
                }
                _ => false,
            },
            _ => false,
        }
    }

    /// Decode an image XObject stream into RGB or RGBA samples, or `None` (with
    /// a log line) when it is not an image this pipeline accepts.
    fn decode_image(&self, stream: &Stream) -> Option<DocumentImage> {
        let dict = &stream.dict;
        if !self.has_subtype(dict, b"Image") {
            debug!("Skipping non-image XObject");
            return None;
        }

        let (Some(width), Some(height)) =
            (self.dimension(dict, b"Width"), self.dimension(dict, b"Height"))
        else {
            warn!("Skipping image with missing or invalid dimensions");
            return None;
        };

        if !self.is_rgb_color_space(dict) {
            warn!(width, height, "Skipping image whose colour space is not RGB");
            return None;
        }

        let filters = stream_filters(dict);
        if let Some((last, outer)) = filters.split_last()
            && last == b"DCTDecode"
        {
            return match jpeg_bytes(stream, outer) {
                Ok(jpeg) => decode_jpeg(&jpeg, width, height),
                Err(err) => {
                    warn!(width, height, %err, "Skipping JPEG image that failed to unwrap");
                    None
                }
            };
        }

        if let Some(Object::Integer(bits)) = self.lookup(dict, b"BitsPerComponent")
            && *bits != 8
        {
            warn!(width, height, bits, "Skipping image with unsupported bit depth");
            return None;
        }

        let samples = match stream_content(stream) {
            Ok(samples) => samples,
            Err(err) => {
                warn!(width, height, %err, "Skipping image that failed to decompress");
                return None;
            }
        };

        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|pixels| pixels.checked_mul(SampleLayout::Rgb.channels()));
        if expected != Some(samples.len()) {
            warn!(
                width,
                height,
                sample_len = samples.len(),
                "Skipping image whose samples are not 8-bit RGB"
            );
            return None;
        }

        let image = DocumentImage {
            width,
            height,
            layout: SampleLayout::Rgb,
            samples,
        };
        Some(self.apply_soft_mask(dict, image))
    }

    /// Merge an 8-bit `/SMask` into the alpha channel of an RGB image.
    ///
    /// The mask is ignored when it cannot be decoded or its size differs.
    fn apply_soft_mask(&self, dict: &Dictionary, image: DocumentImage) -> DocumentImage {
        if image.layout != SampleLayout::Rgb {
            return image;
        }
        let Some(Object::Stream(mask)) = self.lookup(dict, b"SMask") else {
            return image;
        };
        let pixel_count = image.width as usize * image.height as usize;
        let Some(alpha) = stream_content(mask).ok().filter(|a| a.len() == pixel_count) else {
            warn!(
                width = image.width,
                height = image.height,
                "Ignoring soft mask that does not match the image"
            );
            return image;
        };

        let mut samples = Vec::with_capacity(pixel_count * 4);
        for (rgb, a) in image.samples.chunks_exact(3).zip(alpha) {
            samples.extend_from_slice(rgb);
            samples.push(a);
        }
        DocumentImage {
            layout: SampleLayout::Rgba,
            samples,
            ..image
        }
    }
}

/// Filter names of a stream dictionary, in application order.
fn stream_filters(dict: &Dictionary) -> Vec<Vec<u8>> {
    match dict.get(b"Filter") {
        Ok(Object::Name(name)) => vec![name.clone()],
        Ok(Object::Array(filters)) => filters
            .iter()
            .filter_map(|f| match f {
                Object::Name(name) => Some(name.clone()),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    }
}

/// Stream bytes with every filter undone.
fn stream_content(stream: &Stream) -> lopdf::Result<Vec<u8>> {
    if stream_filters(&stream.dict).is_empty() {
        Ok(stream.content.clone())
    } else {
        stream.decompressed_content()
    }
}

/// The JPEG data of a `DCTDecode` stream, with the `outer` filters listed
/// before `DCTDecode` undone.
fn jpeg_bytes(stream: &Stream, outer: &[Vec<u8>]) -> lopdf::Result<Vec<u8>> {
    if outer.is_empty() {
        return Ok(stream.content.clone());
    }
    let mut wrapped = stream.clone();
    let outer: Vec<Object> = outer.iter().cloned().map(Object::Name).collect();
    wrapped.dict.set("Filter", outer);
    wrapped.decompressed_content()
}

/// Decode JPEG data with the `image` crate.
fn decode_jpeg(jpeg: &[u8], width: u32, height: u32) -> Option<DocumentImage> {
    let decoded = match image::load_from_memory(jpeg) {
        Ok(decoded) => decoded.to_rgba8(),
        Err(err) => {
            warn!(width, height, %err, "Skipping JPEG image that failed to decode");
            return None;
        }
    };
    let (width, height) = decoded.dimensions();
    Some(DocumentImage {
        width,
        height,
        layout: SampleLayout::Rgba,
        samples: decoded.into_raw(),
    })
}
