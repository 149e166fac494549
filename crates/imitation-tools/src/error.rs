//! 配置与文件读写错误

use imitation_control::ControlError;
use std::path::PathBuf;
use thiserror::Error;

/// 工具层错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    /// 文件读写失败
    #[error("I/O error on {path}: {source}")]
    Io {
        /// 文件路径
        path: PathBuf,
        /// 底层错误
        #[source]
        source: std::io::Error,
    },

    /// TOML 解析失败
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// TOML 序列化失败
    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// JSON 解析或序列化失败
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// 不支持的文件格式（按扩展名判断）
    #[error("Unsupported file format: {0} (expected .toml or .json)")]
    UnsupportedFormat(PathBuf),

    /// 配置内容无效
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    /// 控制层错误
    #[error("Control error: {0}")]
    Control(#[from] ControlError),
}

impl ConfigError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::Io {
            path: path.into(),
            source,
        }
    }
}

/// 工具层 Result 类型别名
pub type Result<T> = std::result::Result<T, ConfigError>;

/// 文件格式（按扩展名）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FileFormat {
    Toml,
    Json,
}

impl FileFormat {
    pub(crate) fn detect(path: &std::path::Path) -> Result<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Ok(FileFormat::Toml),
            Some("json") => Ok(FileFormat::Json),
            _ => Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_detect_format() {
        assert_eq!(FileFormat::detect(Path::new("robot.toml")).unwrap(), FileFormat::Toml);
        assert_eq!(FileFormat::detect(Path::new("state.json")).unwrap(), FileFormat::Json);
        assert!(matches!(
            FileFormat::detect(Path::new("state.yaml")),
            Err(ConfigError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_control_error_conversion() {
        let err: ConfigError = ControlError::InvalidConfiguration("dt".to_string()).into();
        assert!(format!("{}", err).contains("Control error: Invalid configuration: dt"));
    }
}
