pub mod classify;
pub mod engine;
pub mod error;
pub mod filter;
pub mod keywords;
pub mod normalize;
pub mod select;
pub mod sources;
pub mod tables;

mod retry;

pub use engine::{curate, Candidate, CanonicalEntry, CurationProfile};
pub use error::ProduceError;
pub use select::{RejectReason, Rejection, SelectionState};
pub use sources::openfoodfacts::FoodFactsClient;
pub use sources::unsplash::ImageSearchClient;
