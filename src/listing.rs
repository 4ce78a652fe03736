//! Listing form state controller
//!
//! Owns the in-progress [`ListingDraft`], applies field and file changes,
//! validates required fields and submits through the [`MarketplaceApi`].
//! Every submit attempt that reaches the backend notifies the completion
//! observer and resets the draft, whether the backend accepted it or not.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::api::{ApiError, MarketplaceApi};
use crate::models::{DraftField, ImageFile, ListingDraft, MissingFields, NewListing};

pub const LISTED_MESSAGE: &str = "Item listed successfully";
pub const FAILED_MESSAGE: &str = "Failed to list this item";

#[derive(Error, Debug)]
pub enum FormError {
    #[error("Unknown form field: {0}")]
    UnknownField(String),

    #[error("Cannot read image {path}: {source}")]
    Image {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Text inputs of the listing form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextField {
    Name,
    Category,
}

impl FromStr for TextField {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(TextField::Name),
            "category" => Ok(TextField::Category),
            other => Err(FormError::UnknownField(other.to_string())),
        }
    }
}

impl From<TextField> for DraftField {
    fn from(field: TextField) -> Self {
        match field {
            TextField::Name => DraftField::Name,
            TextField::Category => DraftField::Category,
        }
    }
}

/// Result of a submit attempt, carrying what the user should be told
#[derive(Debug)]
pub enum SubmitOutcome {
    /// Required fields were empty; nothing was sent
    Blocked(MissingFields),
    /// The backend accepted the listing
    Listed,
    /// The backend could not be reached or rejected the listing
    Failed(ApiError),
}

impl SubmitOutcome {
    pub fn message(&self) -> String {
        match self {
            SubmitOutcome::Blocked(missing) => missing.to_string(),
            SubmitOutcome::Listed => LISTED_MESSAGE.to_string(),
            SubmitOutcome::Failed(_) => FAILED_MESSAGE.to_string(),
        }
    }

    /// Whether the backend was called (and the draft therefore reset)
    pub fn was_attempted(&self) -> bool {
        !matches!(self, SubmitOutcome::Blocked(_))
    }

    pub fn is_success(&self) -> bool {
        matches!(self, SubmitOutcome::Listed)
    }
}

impl fmt::Display for SubmitOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

pub struct ListingForm {
    api: Arc<dyn MarketplaceApi>,
    draft: ListingDraft,
    on_listing_completed: Box<dyn Fn() + Send + Sync>,
}

impl ListingForm {
    pub fn new<F>(api: Arc<dyn MarketplaceApi>, on_listing_completed: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        Self {
            api,
            draft: ListingDraft::default(),
            on_listing_completed: Box::new(on_listing_completed),
        }
    }

    pub fn draft(&self) -> &ListingDraft {
        &self.draft
    }

    /// Overwrite one text field, leaving the others untouched
    pub fn on_field_change(&mut self, field: TextField, value: &str) {
        match field {
            TextField::Name => self.draft.name = value.to_string(),
            TextField::Category => self.draft.category = value.to_string(),
        }
    }

    /// Like [`Self::on_field_change`], for callers that only know the input's name
    pub fn on_named_field_change(&mut self, field_name: &str, value: &str) -> Result<(), FormError> {
        let field = field_name.parse::<TextField>()?;
        self.on_field_change(field, value);
        Ok(())
    }

    /// Take the first selected file as the image; an empty selection clears it
    pub fn on_file_change(&mut self, field_name: &str, files: Vec<ImageFile>) -> Result<(), FormError> {
        if field_name != DraftField::Image.as_str() {
            return Err(FormError::UnknownField(field_name.to_string()));
        }

        match files.into_iter().next() {
            Some(file) => {
                debug!("Selected image {} ({} bytes)", file.file_name, file.bytes.len());
                self.draft.image = Some(file);
            }
            None => {
                debug!("Image selection cleared");
                self.draft.image = None;
            }
        }
        Ok(())
    }

    /// Read an image from disk and select it
    pub fn attach_image(&mut self, path: &Path) -> Result<(), FormError> {
        let file = ImageFile::from_path(path).map_err(|source| FormError::Image {
            path: path.to_path_buf(),
            source,
        })?;
        self.on_file_change(DraftField::Image.as_str(), vec![file])
    }

    /// Validate the draft and submit it.
    ///
    /// A draft with an empty required field is not sent and stays as it is.
    /// Otherwise the completion observer fires exactly once and the draft is
    /// reset, regardless of the backend's answer.
    pub async fn on_submit(&mut self) -> SubmitOutcome {
        let listing = match NewListing::try_from(&self.draft) {
            Ok(listing) => listing,
            Err(missing) => {
                warn!("Listing blocked: {}", missing);
                return SubmitOutcome::Blocked(missing);
            }
        };

        let result = self.api.submit_item(&listing).await;

        (self.on_listing_completed)();
        self.reset();

        match result {
            Ok(()) => {
                info!("POST success: {}", listing.name);
                SubmitOutcome::Listed
            }
            Err(e) => {
                error!("POST error: {}", e);
                SubmitOutcome::Failed(e)
            }
        }
    }

    pub fn reset(&mut self) {
        self.draft = ListingDraft::default();
    }
}

/// List one item without a form UI: fill the draft, read the image and submit
pub async fn add_item(
    api: Arc<dyn MarketplaceApi>,
    name: &str,
    category: &str,
    image: &Path,
) -> Result<SubmitOutcome, FormError> {
    let mut form = ListingForm::new(api, || {});
    form.on_field_change(TextField::Name, name);
    form.on_field_change(TextField::Category, category);
    form.attach_image(image)?;
    Ok(form.on_submit().await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::FakeApi;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn form_with(api: Arc<FakeApi>) -> (ListingForm, Arc<AtomicUsize>) {
        let completions = Arc::new(AtomicUsize::new(0));
        let counter = completions.clone();
        let form = ListingForm::new(api, move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        (form, completions)
    }

    fn chair_image() -> ImageFile {
        ImageFile::new("chair.jpg", b"jpeg".to_vec())
    }

    fn fill_chair(form: &mut ListingForm) {
        form.on_field_change(TextField::Name, "Chair");
        form.on_field_change(TextField::Category, "Furniture");
        form.on_file_change("image", vec![chair_image()]).unwrap();
    }

    #[test]
    fn test_field_changes_keep_last_value_per_field() {
        let (mut form, _) = form_with(Arc::new(FakeApi::default()));

        form.on_field_change(TextField::Name, "Ch");
        form.on_field_change(TextField::Category, "Furn");
        form.on_field_change(TextField::Name, "Chair");
        assert_eq!(form.draft().name, "Chair");
        assert_eq!(form.draft().category, "Furn");
        assert!(form.draft().image.is_none());

        form.on_named_field_change("category", "Furniture").unwrap();
        assert_eq!(form.draft().name, "Chair");
        assert_eq!(form.draft().category, "Furniture");
    }

    #[test]
    fn test_unknown_field_leaves_draft_unchanged() {
        let (mut form, _) = form_with(Arc::new(FakeApi::default()));
        form.on_field_change(TextField::Name, "Chair");

        let err = form.on_named_field_change("price", "10").unwrap_err();
        assert!(matches!(err, FormError::UnknownField(ref f) if f == "price"));
        assert!(form.on_file_change("name", vec![chair_image()]).is_err());
        assert_eq!(form.draft().name, "Chair");
        assert!(form.draft().image.is_none());
    }

    #[test]
    fn test_file_change_takes_first_and_empty_selection_clears() {
        let (mut form, _) = form_with(Arc::new(FakeApi::default()));

        let second = ImageFile::new("other.png", vec![9]);
        form.on_file_change("image", vec![chair_image(), second]).unwrap();
        assert_eq!(form.draft().image, Some(chair_image()));

        form.on_file_change("image", Vec::new()).unwrap();
        assert!(form.draft().image.is_none());
    }

    #[test]
    fn test_attach_image_missing_file() {
        let (mut form, _) = form_with(Arc::new(FakeApi::default()));
        let err = form.attach_image(Path::new("/definitely/not/here.jpg")).unwrap_err();
        assert!(matches!(err, FormError::Image { .. }));
    }

    #[tokio::test]
    async fn test_submit_success_sends_exact_values_and_resets() {
        let api = Arc::new(FakeApi::default());
        let (mut form, completions) = form_with(api.clone());
        fill_chair(&mut form);

        let outcome = form.on_submit().await;

        assert!(outcome.is_success());
        assert_eq!(outcome.message(), "Item listed successfully");
        assert_eq!(
            api.submitted(),
            vec![NewListing {
                name: "Chair".to_string(),
                category: "Furniture".to_string(),
                image: chair_image(),
            }]
        );
        assert_eq!(completions.load(Ordering::SeqCst), 1);
        assert_eq!(*form.draft(), ListingDraft::default());
    }

    #[tokio::test]
    async fn test_submit_failure_still_notifies_and_resets() {
        let api = Arc::new(FakeApi::failing_submit());
        let (mut form, completions) = form_with(api.clone());
        fill_chair(&mut form);

        let outcome = form.on_submit().await;

        assert!(matches!(outcome, SubmitOutcome::Failed(_)));
        assert!(outcome.was_attempted());
        assert_eq!(outcome.message(), "Failed to list this item");
        assert_eq!(api.submitted().len(), 1);
        assert_eq!(completions.load(Ordering::SeqCst), 1);
        assert_eq!(*form.draft(), ListingDraft::default());
    }

    #[tokio::test]
    async fn test_empty_draft_is_blocked() {
        let api = Arc::new(FakeApi::default());
        let (mut form, completions) = form_with(api.clone());

        let outcome = form.on_submit().await;

        assert!(!outcome.was_attempted());
        assert_eq!(outcome.message(), "Missing fields: name, image");
        assert!(api.submitted().is_empty());
        assert_eq!(completions.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_blocked_draft_is_kept_for_correction() {
        let api = Arc::new(FakeApi::default());
        let (mut form, _) = form_with(api.clone());
        form.on_field_change(TextField::Name, "Chair");

        let outcome = form.on_submit().await;
        assert_eq!(outcome.message(), "Missing fields: image");
        assert_eq!(form.draft().name, "Chair");

        form.on_file_change("image", vec![chair_image()]).unwrap();
        assert!(form.on_submit().await.is_success());
        assert_eq!(api.submitted()[0].category, "");
    }

    fn chair_file(dir: &tempfile::TempDir) -> PathBuf {
        let path = dir.path().join("chair.jpg");
        std::fs::write(&path, b"jpeg").unwrap();
        path
    }

    #[tokio::test]
    async fn test_add_item_lists_with_file_name() {
        let dir = tempfile::TempDir::new().unwrap();
        let api = Arc::new(FakeApi::default());

        let outcome = add_item(api.clone(), "Chair", "Furniture", &chair_file(&dir))
            .await
            .unwrap();

        assert!(outcome.is_success());
        assert_eq!(api.submitted()[0].image.file_name, "chair.jpg");
        assert_eq!(api.submitted()[0].category, "Furniture");
    }

    #[tokio::test]
    async fn test_add_item_reports_unsuccessful_outcomes() {
        let dir = tempfile::TempDir::new().unwrap();

        let blocked = add_item(Arc::new(FakeApi::default()), "", "", &chair_file(&dir))
            .await
            .unwrap();
        assert!(!blocked.is_success());
        assert_eq!(blocked.message(), "Missing fields: name");

        let failed = add_item(Arc::new(FakeApi::failing_submit()), "Chair", "", &chair_file(&dir))
            .await
            .unwrap();
        assert!(!failed.is_success());
        assert_eq!(failed.message(), "Failed to list this item");

        let missing_file = add_item(
            Arc::new(FakeApi::default()),
            "Chair",
            "",
            &dir.path().join("nope.jpg"),
        )
        .await;
        assert!(matches!(missing_file, Err(FormError::Image { .. })));
    }
}
