pub mod index;
pub mod loader;
pub mod models;
pub mod rate_card;

pub use index::{build_index, LabelStyle, RateCardIndex, StoragePricing};
pub use loader::{calculate_hash, load_rate_card, parse_rate_card_json, parse_storage_pricing_json};
pub use models::{
    ComputeCategory, ComputeType, Lookup, Named, RateCardEntry, Rates, StorageClass,
};
pub use rate_card::RateCard;
