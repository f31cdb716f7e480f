use std::fmt;

/// Transient input for creating one new beer. Consumed by
/// `BeerRepository::add_beer` and discarded; never persisted as-is.
#[derive(Debug, Clone, PartialEq)]
pub struct BeerSubmission {
    pub beer_type: String,
    pub name: String,
    pub score: i32,
    pub note: String,
    pub image: Option<Vec<u8>>,
}

impl BeerSubmission {
    pub fn new(
        beer_type: impl Into<String>,
        name: impl Into<String>,
        score: i32,
        note: impl Into<String>,
    ) -> Self {
        Self {
            beer_type: beer_type.into(),
            name: name.into(),
            score,
            note: note.into(),
            image: None,
        }
    }

    pub fn with_image(mut self, image: Vec<u8>) -> Self {
        self.image = Some(image);
        self
    }

    /// Well-formedness check. Callers run this before handing the
    /// submission to the repository; the repository itself assumes it holds.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.beer_type.trim().is_empty() {
            return Err(ValidationError::EmptyBeerType);
        }
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyBeerName);
        }
        if let Some(image) = &self.image {
            if image.is_empty() {
                return Err(ValidationError::EmptyImage);
            }
        }
        Ok(())
    }
}

/// Malformed submission data, caught before it reaches the store.
#[derive(Debug, PartialEq, Eq)]
pub enum ValidationError {
    EmptyBeerType,
    EmptyBeerName,
    EmptyImage,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::EmptyBeerType => write!(f, "Beer type name cannot be empty"),
            ValidationError::EmptyBeerName => write!(f, "Beer name cannot be empty"),
            ValidationError::EmptyImage => write!(f, "Image data is present but empty"),
        }
    }
}

impl std::error::Error for ValidationError {}
