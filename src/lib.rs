pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::storage::LocalStorage;
pub use config::CodecConfig;
pub use core::codec::PriceFieldCodec;
pub use domain::model::{Percentage, Price, PriceCollection, DEFAULT_CURRENCY};
pub use utils::error::{CodecError, Result};
pub use utils::validation::{ConstraintViolation, PathStyle, ViolationKind, ViolationList};
