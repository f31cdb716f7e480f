use chrono::{DateTime, Utc};
use std::fmt;
use uuid::Uuid;

use super::beer_type::BeerType;

/// A single tasting record. Owned by exactly one [`BeerType`]; the
/// reference is hydrated by the repository and is only ever absent if the
/// underlying store has been tampered with.
///
/// The struct intentionally has no serde derives. Its serializable form is
/// the transfer shape in `crate::transfer`, which excludes the image bytes.
#[derive(Debug, Clone, PartialEq)]
pub struct Beer {
    pub id: Uuid,
    pub name: String,
    pub score: i32,
    pub note: String,
    pub image: Option<Vec<u8>>,
    pub beer_type: Option<BeerType>,
    pub created_at: DateTime<Utc>,
}

impl Beer {
    pub fn new(
        name: impl Into<String>,
        score: i32,
        note: impl Into<String>,
        beer_type: BeerType,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            score,
            note: note.into(),
            image: None,
            beer_type: Some(beer_type),
            created_at: Utc::now(),
        }
    }

    pub fn with_image(mut self, image: Vec<u8>) -> Self {
        self.image = Some(image);
        self
    }
}

impl fmt::Display for Beer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.name)?;
        writeln!(f, "{}", "=".repeat(self.name.len()))?;

        if let Some(beer_type) = &self.beer_type {
            writeln!(f, "Type: {}", beer_type.name)?;
        }
        writeln!(f, "Score: {}", self.score)?;

        if !self.note.is_empty() {
            writeln!(f, "Note: {}", self.note)?;
        }
        if let Some(image) = &self.image {
            writeln!(f, "Image: {} bytes", image.len())?;
        }

        writeln!(f, "Added: {}", self.created_at.format("%Y-%m-%d"))?;
        writeln!(f, "Id: {}", self.id)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_beer_new() {
        let beer = Beer::new("Mosaic Haze", 8, "citrus", BeerType::new("IPA"));
        assert_eq!(beer.name, "Mosaic Haze");
        assert_eq!(beer.score, 8);
        assert_eq!(beer.note, "citrus");
        assert!(beer.image.is_none());
        assert_eq!(beer.beer_type.as_ref().unwrap().name, "IPA");
    }

    #[test]
    fn test_beer_with_image() {
        let beer =
            Beer::new("Hazy Jane", 7, "", BeerType::new("IPA")).with_image(vec![0xff, 0xd8]);
        assert_eq!(beer.image, Some(vec![0xff, 0xd8]));
    }

    #[test]
    fn test_beer_display() {
        let beer = Beer::new("Mosaic Haze", 8, "citrus", BeerType::new("IPA"))
            .with_image(vec![1, 2, 3]);

        let output = format!("{}", beer);
        assert!(output.contains("Mosaic Haze"));
        assert!(output.contains("Type: IPA"));
        assert!(output.contains("Score: 8"));
        assert!(output.contains("Note: citrus"));
        assert!(output.contains("Image: 3 bytes"));
        assert!(output.contains(&beer.id.to_string()));
    }

    #[test]
    fn test_beer_display_skips_empty_note() {
        let beer = Beer::new("Hazy Jane", 7, "", BeerType::new("IPA"));
        let output = format!("{}", beer);
        assert!(!output.contains("Note:"));
        assert!(!output.contains("Image:"));
    }
}
