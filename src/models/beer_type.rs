use std::fmt;
use uuid::Uuid;

/// A named grouping of beers. Names are unique, matched case-sensitively.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BeerType {
    pub id: Uuid,
    pub name: String,
}

impl BeerType {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
        }
    }
}

impl fmt::Display for BeerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_beer_type_new() {
        let beer_type = BeerType::new("IPA");
        assert_eq!(beer_type.name, "IPA");
        assert!(!beer_type.id.is_nil());
    }

    #[test]
    fn test_beer_type_new_generates_unique_ids() {
        let a = BeerType::new("Stout");
        let b = BeerType::new("Stout");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_beer_type_display() {
        let beer_type = BeerType::new("Lager");
        assert_eq!(format!("{}", beer_type), "Lager");
    }
}
