use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// A marketplace listing as returned by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    #[serde(default)]
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub category: String,
    /// Image path relative to the backend origin
    #[serde(default)]
    pub image: String,
}

/// Body of the backend's read endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ItemsResponse {
    // The backend encodes an empty collection as `null`
    #[serde(default)]
    pub items: Option<Vec<Item>>,
}

impl ItemsResponse {
    pub fn into_items(self) -> Vec<Item> {
        self.items.unwrap_or_default()
    }
}

/// An image chosen for upload, held in memory until submit
#[derive(Clone, PartialEq)]
pub struct ImageFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl fmt::Debug for ImageFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageFile")
            .field("file_name", &self.file_name)
            .field("len", &self.bytes.len())
            .finish()
    }
}

impl ImageFile {
    pub fn new(file_name: &str, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.to_string(),
            bytes,
        }
    }

    /// Read an image from disk, keeping only its file name for the upload
    pub fn from_path(path: &Path) -> std::io::Result<Self> {
        let bytes = std::fs::read(path)?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| "image".to_string());
        Ok(Self { file_name, bytes })
    }

    /// Content type guessed from the file extension
    pub fn content_type(&self) -> &'static str {
        let extension = Path::new(&self.file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());

        match extension.as_deref() {
            Some("jpg") | Some("jpeg") => "image/jpeg",
            Some("png") => "image/png",
            Some("gif") => "image/gif",
            Some("webp") => "image/webp",
            _ => "application/octet-stream",
        }
    }
}

/// Fields of a listing draft
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    Name,
    Category,
    Image,
}

impl DraftField {
    pub fn as_str(&self) -> &'static str {
        match self {
            DraftField::Name => "name",
            DraftField::Category => "category",
            DraftField::Image => "image",
        }
    }
}

impl fmt::Display for DraftField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fields that must be filled before a draft may be submitted
pub const REQUIRED_FIELDS: [DraftField; 2] = [DraftField::Name, DraftField::Image];

/// The in-progress, not-yet-submitted listing
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingDraft {
    pub name: String,
    pub category: String,
    pub image: Option<ImageFile>,
}

impl ListingDraft {
    pub fn is_field_empty(&self, field: DraftField) -> bool {
        match field {
            DraftField::Name => self.name.is_empty(),
            DraftField::Category => self.category.is_empty(),
            DraftField::Image => self.image.is_none(),
        }
    }

    /// Required fields that are still empty, in declaration order
    pub fn missing_required_fields(&self) -> Vec<DraftField> {
        REQUIRED_FIELDS
            .iter()
            .copied()
            .filter(|field| self.is_field_empty(*field))
            .collect()
    }
}

/// Required fields were empty when converting a draft into a listing
#[derive(Debug, Clone, PartialEq)]
pub struct MissingFields(pub Vec<DraftField>);

impl fmt::Display for MissingFields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.0.iter().map(|field| field.as_str()).collect();
        write!(f, "Missing fields: {}", names.join(", "))
    }
}

impl std::error::Error for MissingFields {}

/// A validated listing, ready to be sent to the backend
#[derive(Debug, Clone, PartialEq)]
pub struct NewListing {
    pub name: String,
    pub category: String,
    pub image: ImageFile,
}

impl TryFrom<&ListingDraft> for NewListing {
    type Error = MissingFields;

    fn try_from(draft: &ListingDraft) -> Result<Self, Self::Error> {
        let missing = draft.missing_required_fields();
        match (&draft.image, missing.is_empty()) {
            (Some(image), true) => Ok(NewListing {
                name: draft.name.clone(),
                category: draft.category.clone(),
                image: image.clone(),
            }),
            _ => Err(MissingFields(missing)),
        }
    }
}
