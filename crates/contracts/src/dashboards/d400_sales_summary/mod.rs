pub mod dto;

pub use dto::{
    CategorySales, DailyRevenue, SalesSummaryRequest, SalesSummaryResponse, TopItem,
};
