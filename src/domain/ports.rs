use crate::utils::error::Result;
use crate::utils::validation::PathStyle;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> Result<Vec<u8>>;
    fn write_file(&self, path: &str, data: &[u8]) -> Result<()>;
}

/// Settings the codec needs on every call.
pub trait ConfigProvider: Send + Sync {
    fn default_currency(&self) -> &str;
    fn field_path(&self) -> &str;
    fn path_style(&self) -> PathStyle;
    fn key_prefix(&self) -> &str;
    fn percentage_precision(&self) -> u32;
    fn allow_null(&self) -> bool;
}
