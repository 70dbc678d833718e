pub mod dto;

pub use dto::{CategoryProfit, ProfitabilityRequest, ProfitabilityResponse};
