use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::models::{OutputFormat, SortKey};

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub defaults: Defaults,
}

/// 프롬프트와 `--no-prompt` 실행에 쓰이는 기본값.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Defaults {
    pub directory: Option<PathBuf>,
    #[serde(default)]
    pub ignore: Vec<String>,
    pub sort: Option<SortKey>,
    pub format: Option<OutputFormat>,
    pub output_directory: Option<PathBuf>,
    /// 내장 HTML 템플릿 대신 사용할 파일
    pub html_template: Option<PathBuf>,
}

fn config_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home)
        .join(".config")
        .join("music-library")
        .join("config.toml")
}

/// 설정 파일을 읽는다. 파일이 없으면 기본값을 반환한다.
pub fn load_config() -> Result<Config> {
    load_config_from(&config_path())
}

pub fn save_config(config: &Config) -> Result<PathBuf> {
    let path = config_path();
    save_config_to(config, &path)?;
    Ok(path)
}

fn load_config_from(path: &Path) -> Result<Config> {
    if !path.exists() {
        return Ok(Config::default());
    }
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("설정 파일을 읽을 수 없습니다: {}", path.display()))?;
    toml::from_str(&content)
        .with_context(|| format!("설정 파일 형식이 잘못되었습니다: {}", path.display()))
}

fn save_config_to(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    std::fs::write(path, content)
        .with_context(|| format!("설정 파일을 저장할 수 없습니다: {}", path.display()))?;
    Ok(())
}
