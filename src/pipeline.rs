//! One source image and its derived artifacts.
//!
//! Each stage is computed on first access and cached on the owning
//! [`Tracing`] — the prepared bitmap, the tracer's vector document, and the
//! grouped path forest. Caches are cleared only when the source image is
//! replaced; there is no global caching. The stages themselves never log or
//! print, and every failure is a typed [`TraceError`].

use std::path::Path;

use image::{DynamicImage, GrayImage};

use crate::bitmap;
use crate::error::TraceError;
use crate::path_builder::build_subpaths;
use crate::regions::{PathForest, group_filled_regions};
use crate::svg_stream::parse_vector_document;
use crate::tracer;

pub struct Tracing {
    source: DynamicImage,
    prepared: Option<GrayImage>,
    vector_doc: Option<String>,
    forest: Option<PathForest>,
}

impl Tracing {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, TraceError> {
        let source = image::open(path).map_err(TraceError::ImageDecode)?;
        Ok(Self::from_image(source))
    }

    pub fn from_image(source: DynamicImage) -> Self {
        Tracing {
            source,
            prepared: None,
            vector_doc: None,
            forest: None,
        }
    }

    pub fn source(&self) -> &DynamicImage {
        &self.source
    }

    /// Swaps in a new source image and discards every cached stage.
    pub fn replace_source(&mut self, source: DynamicImage) {
        self.source = source;
        self.prepared = None;
        self.vector_doc = None;
        self.forest = None;
    }

    /// The thresholded black-on-white bitmap handed to the tracer.
    pub fn prepared_bitmap(&mut self) -> &GrayImage {
        self.prepared
            .get_or_insert_with(|| bitmap::prepare(&self.source))
    }

    /// The tracer's SVG output for the prepared bitmap.
    pub fn vector_document(&mut self) -> Result<&str, TraceError> {
        if self.vector_doc.is_none() {
            let bmp = bitmap::encode_bmp(self.prepared_bitmap())?;
            self.vector_doc = Some(tracer::run(&bmp)?);
        }
        Ok(self.vector_doc.as_deref().expect("vector document cached above"))
    }

    /// The filled regions reconstructed from the vector document.
    pub fn path_forest(&mut self) -> Result<&PathForest, TraceError> {
        if self.forest.is_none() {
            let stream = parse_vector_document(self.vector_document()?)?;
            let subpaths = build_subpaths(&stream)?;
            self.forest = Some(PathForest::new(group_filled_regions(subpaths)));
        }
        Ok(self.forest.as_ref().expect("path forest cached above"))
    }
}
