mod beer;
mod beer_type;
mod submission;

pub use beer::Beer;
pub use beer_type::BeerType;
pub use submission::{BeerSubmission, ValidationError};
