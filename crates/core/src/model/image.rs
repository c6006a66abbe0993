//! Named image objects and their pixel encodings.
//!
//! Image objects are owned by the rendering collaborator's object store and
//! resolved by the reference name carried in a paint operation's arguments.
//! They are read-only here; the pipeline only ever inspects dimensions and
//! hands the pixel buffer across the processing boundary.

use crate::error::{PlanError, Result};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Pixel encoding of a decoded image buffer.
///
/// The tags mirror the collaborator's image-kind enumeration. That
/// enumeration is external and could grow; the mapping below is deliberately
/// a single explicit table so an unrecognized tag fails loudly instead of
/// flowing downstream as a zero-width encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    /// 1 bit per pixel, packed black/white.
    Binary,
    /// 8-bit RGB triples.
    Rgb,
    /// 8-bit RGBA quads.
    Rgba,
}

impl ImageKind {
    /// Decode the collaborator's numeric kind tag.
    pub fn from_tag(tag: u8) -> Result<Self> {
        match tag {
            1 => Ok(Self::Binary),
            2 => Ok(Self::Rgb),
            3 => Ok(Self::Rgba),
            other => Err(PlanError::UnknownEncoding(other)),
        }
    }

    /// Bits per pixel the processing routine needs to interpret a raw buffer
    /// of this encoding.
    pub const fn bits_per_pixel(self) -> u8 {
        match self {
            Self::Binary => 1,
            Self::Rgb => 24,
            Self::Rgba => 32,
        }
    }
}

mod b64 {
    //! Pixel buffers travel base64-encoded inside page dumps.

    use base64::Engine as _;
    use base64::engine::general_purpose::STANDARD;
    use bytes::Bytes;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(data: &Bytes, ser: S) -> Result<S::Ok, S::Error> {
        ser.serialize_str(&STANDARD.encode(data))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(de: D) -> Result<Bytes, D::Error> {
        let encoded = String::deserialize(de)?;
        STANDARD
            .decode(encoded)
            .map(Bytes::from)
            .map_err(serde::de::Error::custom)
    }
}

/// A decoded raster image from the collaborator's object store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageImage {
    /// Raw pixel buffer, layout determined by `kind`.
    #[serde(with = "b64")]
    pub data: Bytes,
    pub width: u32,
    pub height: u32,
    /// Raw kind tag as emitted by the collaborator; decoded at dispatch time
    /// so an unknown tag surfaces as an error on the image it belongs to.
    pub kind: u8,
}

impl PageImage {
    /// Decode the pixel encoding, failing on unrecognized tags.
    pub fn encoding(&self) -> Result<ImageKind> {
        ImageKind::from_tag(self.kind)
    }

    /// Bits per pixel for this image's encoding.
    pub fn bits_per_pixel(&self) -> Result<u8> {
        Ok(self.encoding()?.bits_per_pixel())
    }
}

/// The collaborator's object store: reference name to image object.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectStore {
    objects: HashMap<String, PageImage>,
}

impl ObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, image: PageImage) {
        self.objects.insert(name.into(), image);
    }

    /// Resolve a reference name to its image object.
    pub fn get(&self, name: &str) -> Result<&PageImage> {
        self.objects
            .get(name)
            .ok_or_else(|| PlanError::ObjectNotFound(name.to_string()))
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_table_is_exact() {
        assert_eq!(ImageKind::from_tag(1).unwrap().bits_per_pixel(), 1);
        assert_eq!(ImageKind::from_tag(2).unwrap().bits_per_pixel(), 24);
        assert_eq!(ImageKind::from_tag(3).unwrap().bits_per_pixel(), 32);
    }

    #[test]
    fn unknown_tags_fail_instead_of_defaulting() {
        for tag in [0u8, 4, 17, 255] {
            assert!(matches!(
                ImageKind::from_tag(tag),
                Err(PlanError::UnknownEncoding(t)) if t == tag
            ));
        }
    }

    #[test]
    fn page_image_round_trips_through_json() {
        let image = PageImage {
            data: Bytes::from_static(&[0xde, 0xad, 0xbe, 0xef]),
            width: 2,
            height: 1,
            kind: 2,
        };
        let json = serde_json::to_string(&image).unwrap();
        assert!(json.contains("3q2+7w==")); // base64 of the buffer
        let back: PageImage = serde_json::from_str(&json).unwrap();
        assert_eq!(back, image);
    }
}
