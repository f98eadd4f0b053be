//! Form State Store for an orphanage registration draft.
//!
//! Setters touch exactly one field; nothing is validated at set time.
//! Validity is derived on demand from the current values, and the
//! "highlight empty fields" view combines it with the error flag raised by a
//! rejected submission.

use std::collections::BTreeMap;

use crate::error::FormError;
use crate::image::{ImageFile, ImagePreviewManager, PreviewRegistry};
use crate::types::{Field, Position};

/// Maximum number of characters accepted for `about`.
pub const ABOUT_MAX_CHARS: usize = 300;

/// Snapshot of everything that gets sent to the API.
#[derive(Debug, Clone, PartialEq)]
pub struct OrphanageDraft {
    pub name: String,
    pub about: String,
    pub instructions: String,
    pub opening_hours: String,
    pub open_on_weekends: bool,
    /// `None` until the user picks a point on the map.
    pub position: Option<Position>,
    pub images: Vec<ImageFile>,
}

impl Default for OrphanageDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            about: String::new(),
            instructions: String::new(),
            opening_hours: String::new(),
            open_on_weekends: true,
            position: None,
            images: Vec::new(),
        }
    }
}

/// Live form session state.
#[derive(Debug)]
pub struct FormState {
    name: String,
    about: String,
    instructions: String,
    opening_hours: String,
    open_on_weekends: bool,
    position: Option<Position>,
    initial_position: Option<Position>,
    images: ImagePreviewManager,
    has_error: bool,
}

impl Default for FormState {
    fn default() -> Self {
        Self::new(PreviewRegistry::default())
    }
}

impl FormState {
    pub fn new(previews: PreviewRegistry) -> Self {
        Self {
            name: String::new(),
            about: String::new(),
            instructions: String::new(),
            opening_hours: String::new(),
            open_on_weekends: true,
            position: None,
            initial_position: None,
            images: ImagePreviewManager::new(previews),
            has_error: false,
        }
    }

    // -----------------------------------------------------------------------
    // Setters
    // -----------------------------------------------------------------------

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Input past [`ABOUT_MAX_CHARS`] characters is dropped.
    pub fn set_about(&mut self, about: impl Into<String>) {
        let mut about = about.into();
        if let Some((cut, _)) = about.char_indices().nth(ABOUT_MAX_CHARS) {
            about.truncate(cut);
        }
        self.about = about;
    }

    pub fn set_instructions(&mut self, instructions: impl Into<String>) {
        self.instructions = instructions.into();
    }

    pub fn set_opening_hours(&mut self, opening_hours: impl Into<String>) {
        self.opening_hours = opening_hours.into();
    }

    pub fn set_open_on_weekends(&mut self, open: bool) {
        self.open_on_weekends = open;
    }

    /// Map click: overwrites the marker position.
    pub fn set_position(&mut self, latitude: f64, longitude: f64) {
        self.position = Some(Position::new(latitude, longitude));
    }

    /// Map centre, normally seeded once from geolocation.
    pub fn seed_initial_position(&mut self, position: Position) {
        self.initial_position = Some(position);
    }

    pub fn select_images(&mut self, files: impl IntoIterator<Item = ImageFile>) -> usize {
        self.images.select_images(files)
    }

    pub fn remove_image(&mut self, index: usize) -> Result<ImageFile, FormError> {
        self.images.remove_image(index)
    }

    pub fn images_mut(&mut self) -> &mut ImagePreviewManager {
        &mut self.images
    }

    // -----------------------------------------------------------------------
    // Getters
    // -----------------------------------------------------------------------

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn about(&self) -> &str {
        &self.about
    }

    pub fn instructions(&self) -> &str {
        &self.instructions
    }

    pub fn opening_hours(&self) -> &str {
        &self.opening_hours
    }

    pub fn open_on_weekends(&self) -> bool {
        self.open_on_weekends
    }

    pub fn position(&self) -> Option<Position> {
        self.position
    }

    pub fn initial_position(&self) -> Option<Position> {
        self.initial_position
    }

    pub fn images(&self) -> &ImagePreviewManager {
        &self.images
    }

    /// Set by a rejected submission, cleared by a successful one.
    pub fn has_error(&self) -> bool {
        self.has_error
    }

    pub(crate) fn set_has_error(&mut self, has_error: bool) {
        self.has_error = has_error;
    }

    // -----------------------------------------------------------------------
    // Validity
    // -----------------------------------------------------------------------

    /// Whether each required field currently holds a value.
    pub fn field_validity(&self) -> BTreeMap<Field, bool> {
        Field::ALL
            .into_iter()
            .map(|field| (field, self.is_filled(field)))
            .collect()
    }

    /// Empty required fields, but only once a submission has been rejected.
    pub fn highlighted_fields(&self) -> Vec<Field> {
        if !self.has_error {
            return Vec::new();
        }
        Field::ALL
            .into_iter()
            .filter(|field| !self.is_filled(*field))
            .collect()
    }

    pub fn is_highlighted(&self, field: Field) -> bool {
        self.has_error && !self.is_filled(field)
    }

    fn is_filled(&self, field: Field) -> bool {
        match field {
            Field::Name => !self.name.trim().is_empty(),
            Field::About => !self.about.trim().is_empty(),
            Field::Instructions => !self.instructions.trim().is_empty(),
            Field::OpeningHours => !self.opening_hours.trim().is_empty(),
            Field::Images => !self.images.is_empty(),
            Field::Position => self.position.is_some(),
        }
    }

    /// Copy the current values out for submission.
    pub fn draft(&self) -> OrphanageDraft {
        OrphanageDraft {
            name: self.name.clone(),
            about: self.about.clone(),
            instructions: self.instructions.clone(),
            opening_hours: self.opening_hours.clone(),
            open_on_weekends: self.open_on_weekends,
            position: self.position,
            images: self.images.images().to_vec(),
        }
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
