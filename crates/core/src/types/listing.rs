//! Item listing drafts.

use thiserror::Error;

/// A listing was submitted with a field missing.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingError {
    #[error("Please fill in all fields.")]
    Incomplete,
}

/// An uploaded item image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingImage {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl ListingImage {
    /// A file input with nothing selected still submits a part, with an empty
    /// filename and no bytes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.file_name.is_empty() || self.bytes.is_empty()
    }
}

/// Contents of the sell-item form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingDraft {
    pub item_name: String,
    pub price: String,
    pub image: Option<ListingImage>,
}

impl ListingDraft {
    /// Check that every field is present.
    ///
    /// # Errors
    ///
    /// Returns [`ListingError::Incomplete`] if the item name, price or image
    /// is missing.
    pub fn validate(self) -> Result<ValidListing, ListingError> {
        let image = self
            .image
            .filter(|image| !image.is_empty())
            .ok_or(ListingError::Incomplete)?;

        if self.item_name.is_empty() || self.price.is_empty() {
            return Err(ListingError::Incomplete);
        }

        Ok(ValidListing {
            item_name: self.item_name,
            price: self.price,
            image,
        })
    }
}

/// A listing with all three fields present. Only built by
/// [`ListingDraft::validate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidListing {
    item_name: String,
    price: String,
    image: ListingImage,
}

impl ValidListing {
    #[must_use]
    pub fn item_name(&self) -> &str {
        &self.item_name
    }

    #[must_use]
    pub fn price(&self) -> &str {
        &self.price
    }

    #[must_use]
    pub const fn image(&self) -> &ListingImage {
        &self.image
    }

    /// Split into `(item_name, price, image)`.
    #[must_use]
    pub fn into_parts(self) -> (String, String, ListingImage) {
        (self.item_name, self.price, self.image)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn image() -> ListingImage {
        ListingImage {
            file_name: "lamp.png".to_string(),
            content_type: Some("image/png".to_string()),
            bytes: vec![0x89, b'P', b'N', b'G'],
        }
    }

    fn draft() -> ListingDraft {
        ListingDraft {
            item_name: "Lamp".to_string(),
            price: "19.99".to_string(),
            image: Some(image()),
        }
    }

    #[test]
    fn test_complete_draft_validates() {
        let listing = draft().validate().unwrap();
        assert_eq!(listing.item_name(), "Lamp");
        assert_eq!(listing.price(), "19.99");
        assert_eq!(listing.image().file_name, "lamp.png");
    }

    #[test]
    fn test_missing_image() {
        let mut d = draft();
        d.image = None;
        assert_eq!(d.validate(), Err(ListingError::Incomplete));
    }

    #[test]
    fn test_empty_file_part_is_missing() {
        let mut d = draft();
        d.image = Some(ListingImage {
            file_name: String::new(),
            content_type: Some("application/octet-stream".to_string()),
            bytes: Vec::new(),
        });
        assert_eq!(d.validate(), Err(ListingError::Incomplete));
    }

    #[test]
    fn test_missing_name_or_price() {
        let mut d = draft();
        d.item_name.clear();
        assert_eq!(d.validate(), Err(ListingError::Incomplete));

        let mut d = draft();
        d.price.clear();
        assert_eq!(d.validate(), Err(ListingError::Incomplete));
    }

    #[test]
    fn test_message() {
        assert_eq!(
            ListingError::Incomplete.to_string(),
            "Please fill in all fields."
        );
    }

    #[test]
    fn test_into_parts() {
        let (name, price, img) = draft().validate().unwrap().into_parts();
        assert_eq!(name, "Lamp");
        assert_eq!(price, "19.99");
        assert_eq!(img, image());
    }
}
