//! 配置模块
//!
//! 优化器开关与日志参数，以 TOML 文件加载和保存。

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::query::context::session::{SessionVariables, DEFAULT_TOPN_OPT_LIMIT_THRESHOLD};
use crate::query::planner::rewrite::DEFAULT_MAX_ITERATIONS;

/// 配置错误
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("配置文件读写失败: {0}")]
    Io(#[from] std::io::Error),

    #[error("配置文件解析失败: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("配置序列化失败: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("无效的配置项: {0}")]
    Invalid(String),
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub optimizer: OptimizerConfig,
    pub log: LogConfig,
}

/// 优化器配置
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct OptimizerConfig {
    /// 是否允许 LIMIT/TopN 与聚合组合时转换为 TopN 聚合
    pub push_topn_to_agg: bool,
    /// limit + offset 的上限，超过时不转换
    pub topn_opt_limit_threshold: u64,
    /// 重写器整轮遍历的最大次数
    pub max_iterations: usize,
    /// 禁用的规则名或规则族名
    pub disabled_rules: Vec<String>,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            push_topn_to_agg: true,
            topn_opt_limit_threshold: DEFAULT_TOPN_OPT_LIMIT_THRESHOLD,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            disabled_rules: Vec::new(),
        }
    }
}

impl OptimizerConfig {
    /// 生成一次请求使用的会话变量
    pub fn session_variables(&self) -> SessionVariables {
        SessionVariables::new(self.push_topn_to_agg, self.topn_opt_limit_threshold)
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
    pub dir: String,
    pub file: String,
    pub max_file_size: u64,
    pub max_files: usize,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            dir: "logs".to_string(),
            file: "topn_agg".to_string(),
            max_file_size: 100 * 1024 * 1024, // 100MB
            max_files: 5,
        }
    }
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.optimizer.max_iterations == 0 {
            return Err(ConfigError::Invalid(
                "optimizer.max_iterations must be at least 1".to_string(),
            ));
        }
        if self.log.level.trim().is_empty() {
            return Err(ConfigError::Invalid("log.level must not be empty".to_string()));
        }
        Ok(())
    }
}
