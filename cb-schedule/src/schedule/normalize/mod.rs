mod availability;
mod effective_range;
mod time_token;

pub use availability::classify;
pub use effective_range::{
    correct_malformed_year, extract_effective_range, parse_effective_text, parse_loose_date,
};
pub use time_token::normalize_time;
