pub mod d400_sales_summary;
pub mod d401_chef_performance;
pub mod d402_profitability;
