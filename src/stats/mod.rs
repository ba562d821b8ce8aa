//! Stats module - aggregate queries and descriptive statistics

mod aggregate;
mod calculator;

pub use aggregate::{
    global_mean_price, mean_price_by_neighbourhood, mean_price_by_room_type, price_extremes,
    GroupMean,
};
pub use calculator::{PriceSummary, StatsCalculator};
