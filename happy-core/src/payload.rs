//! Multipart payload for `POST /orphanages`.

use crate::form::OrphanageDraft;
use crate::image::ImageFile;

/// Field name repeated once per uploaded image.
pub const IMAGES_FIELD: &str = "images";

/// One part of the multipart body.
#[derive(Debug, Clone, PartialEq)]
pub enum Part {
    Text { name: &'static str, value: String },
    File { name: &'static str, image: ImageFile },
}

impl Part {
    pub fn name(&self) -> &'static str {
        match self {
            Part::Text { name, .. } | Part::File { name, .. } => *name,
        }
    }
}

/// Ordered multipart parts: text fields first, then every image in
/// selection order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MultipartPayload {
    parts: Vec<Part>,
}

impl MultipartPayload {
    /// Coerce every draft value to text and append the images.
    ///
    /// An unset position goes out as `0`/`0`; the API rejects it.
    pub fn from_draft(draft: &OrphanageDraft) -> Self {
        let (latitude, longitude) = draft
            .position
            .map(|p| (p.latitude, p.longitude))
            .unwrap_or((0.0, 0.0));

        let mut parts = vec![
            text("name", draft.name.clone()),
            text("about", draft.about.clone()),
            text("latitude", latitude.to_string()),
            text("longitude", longitude.to_string()),
            text("instructions", draft.instructions.clone()),
            text("opening_hours", draft.opening_hours.clone()),
            text("open_on_weekends", draft.open_on_weekends.to_string()),
        ];
        parts.extend(draft.images.iter().cloned().map(|image| Part::File {
            name: IMAGES_FIELD,
            image,
        }));
        Self { parts }
    }

    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    pub fn into_parts(self) -> Vec<Part> {
        self.parts
    }

    /// Value of the first text part called `name`.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.parts.iter().find_map(|part| match part {
            Part::Text { name: n, value } if *n == name => Some(value.as_str()),
            _ => None,
        })
    }

    pub fn files(&self) -> impl Iterator<Item = &ImageFile> {
        self.parts.iter().filter_map(|part| match part {
            Part::File { image, .. } => Some(image),
            Part::Text { .. } => None,
        })
    }

    pub fn file_count(&self) -> usize {
        self.files().count()
    }
}

fn text(name: &'static str, value: String) -> Part {
    Part::Text { name, value }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Position;

    fn draft() -> OrphanageDraft {
        OrphanageDraft {
            name: "Lar das meninas".into(),
            about: "Sobre".into(),
            instructions: "Instruções".into(),
            opening_hours: "8h-18h".into(),
            open_on_weekends: false,
            position: Some(Position::new(-25.43, -49.27)),
            images: vec![
                ImageFile::from_bytes("a.jpg", vec![1]),
                ImageFile::from_bytes("b.png", vec![2]),
            ],
        }
    }

    #[test]
    fn fields_are_text_in_wire_order() {
        let payload = MultipartPayload::from_draft(&draft());
        let names: Vec<&str> = payload.parts().iter().map(Part::name).collect();
        assert_eq!(
            names,
            [
                "name",
                "about",
                "latitude",
                "longitude",
                "instructions",
                "opening_hours",
                "open_on_weekends",
                "images",
                "images",
            ]
        );
        assert_eq!(payload.text("latitude"), Some("-25.43"));
        assert_eq!(payload.text("longitude"), Some("-49.27"));
        assert_eq!(payload.text("open_on_weekends"), Some("false"));
    }

    #[test]
    fn images_keep_selection_order() {
        let payload = MultipartPayload::from_draft(&draft());
        let files: Vec<&str> = payload.files().map(ImageFile::file_name).collect();
        assert_eq!(files, ["a.jpg", "b.png"]);
    }

    #[test]
    fn unset_position_sent_as_zero() {
        let payload = MultipartPayload::from_draft(&OrphanageDraft::default());
        assert_eq!(payload.text("latitude"), Some("0"));
        assert_eq!(payload.text("longitude"), Some("0"));
        assert_eq!(payload.text("open_on_weekends"), Some("true"));
        assert_eq!(payload.file_count(), 0);
    }
}
