pub mod dto;

pub use dto::{
    ChefItemPerformance, ChefPerformance, ChefPerformanceRequest, ChefPerformanceResponse,
};
