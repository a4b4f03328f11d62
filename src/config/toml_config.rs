use crate::domain::model::DEFAULT_CURRENCY;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{CodecError, Result};
use crate::utils::validation::{PathStyle, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub codec: CodecConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    pub default_currency: String,
    pub field_path: String,
    pub path_style: PathStyle,
    pub key_prefix: String,
    pub percentage_precision: u32,
    pub allow_null: bool,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            default_currency: DEFAULT_CURRENCY.to_string(),
            field_path: "/price".to_string(),
            path_style: PathStyle::Pointer,
            key_prefix: "c".to_string(),
            percentage_precision: 2,
            allow_null: false,
        }
    }
}

impl CodecConfig {
    pub fn with_default_currency(mut self, currency_id: impl Into<String>) -> Self {
        self.default_currency = currency_id.into();
        self
    }

    pub fn with_field_path(mut self, field_path: impl Into<String>) -> Self {
        self.field_path = field_path.into();
        self
    }
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(CodecError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| CodecError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${DEFAULT_CURRENCY_ID})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| CodecError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}

impl ConfigProvider for CodecConfig {
    fn default_currency(&self) -> &str {
        &self.default_currency
    }

    fn field_path(&self) -> &str {
        &self.field_path
    }

    fn path_style(&self) -> PathStyle {
        self.path_style
    }

    fn key_prefix(&self) -> &str {
        &self.key_prefix
    }

    fn percentage_precision(&self) -> u32 {
        self.percentage_precision
    }

    fn allow_null(&self) -> bool {
        self.allow_null
    }
}

impl Validate for CodecConfig {
    fn validate(&self) -> Result<()> {
        use crate::utils::validation::*;

        validate_currency_id("codec.default_currency", &self.default_currency)?;
        validate_non_empty_string("codec.field_path", &self.field_path)?;
        // 儲存用的 key 必須帶前綴
        validate_non_empty_string("codec.key_prefix", &self.key_prefix)?;
        validate_range("codec.percentage_precision", self.percentage_precision, 0, 10)?;

        Ok(())
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.codec.validate()
    }
}
