// ============================================
// src/config.rs
// コマンドライン引数と設定ファイル
// ============================================

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use clap::Parser;
use directories::ProjectDirs;
use serde::Deserialize;
use tracing::debug;

use crate::error::ConfigError;
use crate::kana::Syllabary;

const CONFIG_FILE: &str = "config.json";
const LOG_FILE: &str = "kana-quiz.log";
const DEFAULT_LOG_FILTER: &str = "info";

/// Kana Quiz - hiragana / katakana romaji drill
#[derive(Debug, Parser)]
#[command(name = "kana-quiz", version, about)]
pub struct Cli {
    /// Skip the menu and start a quiz right away
    #[arg(short, long, value_enum)]
    pub syllabary: Option<Syllabary>,

    /// Path to the config file (JSON)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Where to write the log
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// 設定ファイルの中身（すべて省略可）
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub syllabary: Option<Syllabary>,
    pub log_filter: Option<String>,
    pub log_file: Option<PathBuf>,
}

impl FileConfig {
    /// ファイルから読み込む。ファイルがなければデフォルト
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// 引数と設定ファイルをマージした最終的な設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// 起動直後に始める文字セット（None ならメニューから）
    pub syllabary: Option<Syllabary>,
    pub log_filter: String,
    pub log_file: Option<PathBuf>,
}

impl Config {
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let file = match cli.config.as_deref() {
            Some(path) => FileConfig::load(path)?,
            None => match default_config_path() {
                Some(path) => FileConfig::load(&path)?,
                None => FileConfig::default(),
            },
        };
        Ok(Self::merge(cli, file))
    }

    /// 引数の値が設定ファイルより優先
    pub fn merge(cli: &Cli, file: FileConfig) -> Self {
        let log_filter = match cli.verbose {
            0 => file
                .log_filter
                .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string()),
            1 => "debug".to_string(),
            _ => "trace".to_string(),
        };
        Self {
            syllabary: cli.syllabary.or(file.syllabary),
            log_filter,
            log_file: cli
                .log_file
                .clone()
                .or(file.log_file)
                .or_else(default_log_path),
        }
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("jp", "kana-quiz", "KANA_QUIZ")
}

pub fn default_config_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.config_dir().join(CONFIG_FILE))
}

pub fn default_log_path() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.data_dir().join(LOG_FILE))
}
