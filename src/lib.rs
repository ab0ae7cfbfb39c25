pub mod error;
pub mod json_data;
pub mod lat_long;
pub mod mission;
pub mod projection;
pub mod table;

pub use lat_long::distance_meters;
