pub mod codec;
pub mod coerce;
pub mod decoder;
pub mod encoder;
pub mod percentage;

pub use crate::domain::model::{Percentage, Price, PriceCollection};
pub use crate::domain::ports::{ConfigProvider, Storage};
pub use crate::utils::error::Result;
