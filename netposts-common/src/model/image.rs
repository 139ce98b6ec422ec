use crate::php::PhpValue;
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, convert::Infallible, fmt::Display, str::FromStr};

pub const FULL_SIZE_NAME: &str = "full";

/// Which variant of an uploaded image to resolve.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Default, Hash)]
pub enum ImageSize {
    /// The original upload.
    #[default]
    Full,
    /// A generated variant such as `thumbnail` or `large`.
    Named(String),
}

impl From<&str> for ImageSize {
    fn from(value: &str) -> Self {
        if value.is_empty() || value == FULL_SIZE_NAME {
            Self::Full
        } else {
            Self::Named(value.to_owned())
        }
    }
}

impl FromStr for ImageSize {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(s.into())
    }
}

impl Display for ImageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Full => f.write_str(FULL_SIZE_NAME),
            Self::Named(name) => f.write_str(name),
        }
    }
}

/// One generated variant listed in an attachment's metadata.
#[derive(Clone, Eq, PartialEq, Debug, Default, Hash)]
pub struct ImageSizeRecord {
    /// Bare file name; it lives next to the original.
    pub file: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub mime_type: Option<String>,
}

/// Attachment metadata as stored under `_wp_attachment_metadata`.
#[derive(Clone, Eq, PartialEq, Debug, Default, Hash)]
pub struct ImageMetadata {
    /// Path of the original relative to the upload base URL, e.g. `2021/05/photo.jpg`.
    pub file: Option<String>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub sizes: BTreeMap<String, ImageSizeRecord>,
}

impl ImageMetadata {
    /// Reads the metadata out of an unserialized PHP value.
    ///
    /// Returns `None` if the value is not an array. Malformed fields are treated as absent.
    #[must_use]
    pub fn from_php(value: &PhpValue) -> Option<Self> {
        if !value.is_array() {
            return None;
        }

        let sizes = value
            .get("sizes")
            .and_then(PhpValue::entries)
            .map(|entries| {
                entries
                    .iter()
                    .filter(|(_, size)| size.is_array())
                    .map(|(name, size)| {
                        let record = ImageSizeRecord {
                            file: size.get("file").and_then(PhpValue::as_str).map(str::to_owned),
                            width: size.get("width").and_then(PhpValue::as_u32),
                            height: size.get("height").and_then(PhpValue::as_u32),
                            mime_type: size
                                .get("mime-type")
                                .and_then(PhpValue::as_str)
                                .map(str::to_owned),
                        };
                        (name.to_string(), record)
                    })
                    .collect()
            })
            .unwrap_or_default();

        Some(Self {
            file: value.get("file").and_then(PhpValue::as_str).map(str::to_owned),
            width: value.get("width").and_then(PhpValue::as_u32),
            height: value.get("height").and_then(PhpValue::as_u32),
            sizes,
        })
    }

    /// The record of a named size, or `None` for [`ImageSize::Full`] and sizes that were never
    /// generated.
    #[must_use]
    pub fn size(&self, size: &ImageSize) -> Option<&ImageSizeRecord> {
        match size {
            ImageSize::Full => None,
            ImageSize::Named(name) => self.sizes.get(name),
        }
    }
}

/// A resolved image: `(url, width, height, resized)`.
#[derive(Clone, Eq, PartialEq, Debug, Hash, Serialize, Deserialize)]
pub struct ImageSrc {
    pub url: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
    /// `true` if `url` points at a generated variant rather than the original.
    pub resized: bool,
}

/// The featured image shown next to a post in a listing.
#[derive(Clone, Eq, PartialEq, Debug, Hash, Serialize, Deserialize)]
pub struct Thumbnail {
    pub url: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

#[cfg(test)]
mod tests {
    use crate::{
        model::image::{ImageMetadata, ImageSize, ImageSizeRecord},
        php::unserialize,
    };

    const PHOTO_METADATA: &str = concat!(
        r#"a:5:{s:5:"width";i:800;s:6:"height";i:600;s:4:"file";s:17:"2021/05/photo.jpg";"#,
        r#"s:5:"sizes";a:2:{s:9:"thumbnail";a:4:{s:4:"file";s:17:"photo-150x150.jpg";"#,
        r#"s:5:"width";i:150;s:6:"height";i:150;s:9:"mime-type";s:10:"image/jpeg";}"#,
        r#"s:5:"large";a:3:{s:4:"file";s:17:"photo-800x450.jpg";s:5:"width";s:3:"800";"#,
        r#"s:6:"height";i:450;}}s:10:"image_meta";a:0:{}}"#,
    );

    #[test]
    fn parse_sizes() {
        assert_eq!("full".parse::<ImageSize>(), Ok(ImageSize::Full));
        assert_eq!("".parse::<ImageSize>(), Ok(ImageSize::Full));
        assert_eq!(
            "thumbnail".parse::<ImageSize>(),
            Ok(ImageSize::Named("thumbnail".to_owned()))
        );
    }

    #[test]
    fn attachment_metadata() {
        let value = unserialize(PHOTO_METADATA.as_bytes()).unwrap();
        let metadata = ImageMetadata::from_php(&value).unwrap();

        assert_eq!(metadata.file.as_deref(), Some("2021/05/photo.jpg"));
        assert_eq!(metadata.width, Some(800));
        assert_eq!(metadata.height, Some(600));
        assert_eq!(
            metadata.size(&ImageSize::Named("thumbnail".to_owned())),
            Some(&ImageSizeRecord {
                file: Some("photo-150x150.jpg".to_owned()),
                width: Some(150),
                height: Some(150),
                mime_type: Some("image/jpeg".to_owned()),
            })
        );
        // Numeric strings count as dimensions.
        assert_eq!(metadata.sizes["large"].width, Some(800));
        assert_eq!(metadata.sizes["large"].mime_type, None);
    }

    #[test]
    fn missing_fields_are_absent() {
        let value = unserialize(br#"a:1:{s:5:"width";s:4:"wide";}"#).unwrap();
        let metadata = ImageMetadata::from_php(&value).unwrap();

        assert_eq!(metadata, ImageMetadata::default());
        assert_eq!(metadata.size(&ImageSize::Named("medium".to_owned())), None);
        assert_eq!(metadata.size(&ImageSize::Full), None);
    }

    #[test]
    fn scalars_are_not_metadata() {
        let value = unserialize(br#"s:3:"abc";"#).unwrap();
        assert_eq!(ImageMetadata::from_php(&value), None);
    }
}
