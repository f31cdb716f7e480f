//! Transfer codec: the serializable form of a beer record used for
//! sharing and scanning. Image bytes are deliberately not part of the
//! payload; only id, name, score, note and the owning type travel.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::models::Beer;

/// Encoded form of a beer type: id and name only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransferBeerType {
    pub id: Uuid,
    pub name: String,
}

/// Encoded form of a persisted beer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransferBeer {
    pub id: Uuid,
    pub name: String,
    pub score: i32,
    pub note: String,
    #[serde(rename = "beerType")]
    pub beer_type: TransferBeerType,
}

/// Beer type parsed from an externally produced payload.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ScannedBeerType {
    pub id: Uuid,
    pub name: String,
}

/// Beer parsed from an externally produced payload. Decoding never
/// touches the store; ingestion is a separate step on the repository.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ScannedBeer {
    pub id: Uuid,
    pub name: String,
    pub score: i32,
    pub note: String,
    #[serde(rename = "beerType")]
    pub beer_type: ScannedBeerType,
}

/// Build the transfer shape for a persisted beer.
///
/// A beer always belongs to a type; a missing reference means the store
/// invariant is broken, and encoding refuses rather than emitting a
/// partial payload.
pub fn transfer_beer(beer: &Beer) -> Result<TransferBeer, EncodingError> {
    let beer_type = beer
        .beer_type
        .as_ref()
        .ok_or(EncodingError::MissingBeerType)?;

    Ok(TransferBeer {
        id: beer.id,
        name: beer.name.clone(),
        score: beer.score,
        note: beer.note.clone(),
        beer_type: TransferBeerType {
            id: beer_type.id,
            name: beer_type.name.clone(),
        },
    })
}

/// Encode a persisted beer as a JSON payload.
pub fn encode_beer(beer: &Beer) -> Result<String, EncodingError> {
    let transfer = transfer_beer(beer)?;
    serde_json::to_string_pretty(&transfer).map_err(EncodingError::Serialize)
}

/// Decode an externally supplied JSON payload into a [`ScannedBeer`].
pub fn decode_beer(payload: &str) -> Result<ScannedBeer, DecodingError> {
    serde_json::from_str(payload).map_err(DecodingError::InvalidPayload)
}

/// Failed to encode a beer for transfer.
#[derive(Debug)]
pub enum EncodingError {
    /// The beer carries no beer type reference
    MissingBeerType,
    /// JSON serialization failed
    Serialize(serde_json::Error),
}

impl fmt::Display for EncodingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EncodingError::MissingBeerType => {
                write!(f, "Cannot encode a beer without an associated beer type")
            }
            EncodingError::Serialize(e) => write!(f, "Failed to encode beer: {}", e),
        }
    }
}

impl std::error::Error for EncodingError {}

/// Malformed or incomplete transfer payload.
#[derive(Debug)]
pub enum DecodingError {
    InvalidPayload(serde_json::Error),
}

impl fmt::Display for DecodingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodingError::InvalidPayload(e) => write!(f, "Invalid beer payload: {}", e),
        }
    }
}

impl std::error::Error for DecodingError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BeerType;

    fn sample_beer() -> Beer {
        Beer::new("Mosaic Haze", 8, "citrus", BeerType::new("IPA")).with_image(vec![1, 2, 3])
    }

    #[test]
    fn test_encode_beer_fields() {
        let beer = sample_beer();
        let payload = encode_beer(&beer).unwrap();

        let value: serde_json::Value = serde_json::from_str(&payload).unwrap();
        assert_eq!(value["id"], beer.id.to_string());
        assert_eq!(value["name"], "Mosaic Haze");
        assert_eq!(value["score"], 8);
        assert_eq!(value["note"], "citrus");
        assert_eq!(
            value["beerType"]["id"],
            beer.beer_type.as_ref().unwrap().id.to_string()
        );
        assert_eq!(value["beerType"]["name"], "IPA");
    }

    #[test]
    fn test_encode_beer_excludes_image() {
        let payload = encode_beer(&sample_beer()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&payload).unwrap();
        assert!(value.get("image").is_none());
        assert!(value.get("imageData").is_none());
    }

    #[test]
    fn test_encode_beer_without_type_fails() {
        let mut beer = sample_beer();
        beer.beer_type = None;

        match encode_beer(&beer) {
            Err(EncodingError::MissingBeerType) => {}
            other => panic!("expected MissingBeerType, got {:?}", other),
        }
    }

    #[test]
    fn test_decode_beer() {
        let payload = r#"{
            "id": "7f2a1c3e-58d4-4f89-a1b0-3c2d5e6f7a8b",
            "name": "Hazy Jane",
            "score": 7,
            "note": "",
            "beerType": {
                "id": "0b1c2d3e-4f5a-6789-abcd-ef0123456789",
                "name": "IPA"
            }
        }"#;

        let scanned = decode_beer(payload).unwrap();
        assert_eq!(scanned.name, "Hazy Jane");
        assert_eq!(scanned.score, 7);
        assert_eq!(scanned.note, "");
        assert_eq!(scanned.beer_type.name, "IPA");
        assert_eq!(
            scanned.id.to_string(),
            "7f2a1c3e-58d4-4f89-a1b0-3c2d5e6f7a8b"
        );
    }

    #[test]
    fn test_decode_beer_missing_field_fails() {
        // no score
        let payload = r#"{
            "id": "7f2a1c3e-58d4-4f89-a1b0-3c2d5e6f7a8b",
            "name": "Hazy Jane",
            "note": "",
            "beerType": { "id": "0b1c2d3e-4f5a-6789-abcd-ef0123456789", "name": "IPA" }
        }"#;
        assert!(decode_beer(payload).is_err());
    }

    #[test]
    fn test_decode_beer_missing_type_fails() {
        let payload = r#"{
            "id": "7f2a1c3e-58d4-4f89-a1b0-3c2d5e6f7a8b",
            "name": "Hazy Jane",
            "score": 7,
            "note": ""
        }"#;
        assert!(decode_beer(payload).is_err());
    }

    #[test]
    fn test_decode_beer_wrong_type_fails() {
        let payload = r#"{
            "id": "7f2a1c3e-58d4-4f89-a1b0-3c2d5e6f7a8b",
            "name": "Hazy Jane",
            "score": "seven",
            "note": "",
            "beerType": { "id": "0b1c2d3e-4f5a-6789-abcd-ef0123456789", "name": "IPA" }
        }"#;
        assert!(decode_beer(payload).is_err());
    }

    #[test]
    fn test_decode_beer_not_json_fails() {
        let err = decode_beer("not json at all").unwrap_err();
        assert!(err.to_string().contains("Invalid beer payload"));
    }

    #[test]
    fn test_encode_decode_round_trip() {
        let beer = sample_beer();
        let payload = encode_beer(&beer).unwrap();
        let scanned = decode_beer(&payload).unwrap();

        let beer_type = beer.beer_type.as_ref().unwrap();
        assert_eq!(scanned.id, beer.id);
        assert_eq!(scanned.name, beer.name);
        assert_eq!(scanned.score, beer.score);
        assert_eq!(scanned.note, beer.note);
        assert_eq!(scanned.beer_type.id, beer_type.id);
        assert_eq!(scanned.beer_type.name, beer_type.name);
    }
}
