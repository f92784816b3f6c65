// ============================================
// src/main.rs (メインファイル)
// ============================================

use std::fs::{self, File, OpenOptions};
use std::io::stdout;
use std::path::Path;
use std::sync::Mutex;

use clap::Parser;
use crossterm::{
    ExecutableCommand,
    cursor::{Hide, Show},
    event::{self, Event},
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;
use tracing::info;
use tracing_subscriber::EnvFilter;

use kana_quiz::app::{AppAction, AppState};
use kana_quiz::config::{Cli, Config};
use kana_quiz::error::AppError;
use kana_quiz::ui;

// --------------------------------------------------
// メイン関数 (TUIセットアップと実行ループ)
// --------------------------------------------------

fn main() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = Config::load(&cli)?;
    init_logging(&config);
    info!(?config, "starting kana-quiz");

    let mut terminal = setup_terminal()?;
    let result = run_app(&mut terminal, &config);
    // ループがエラーで抜けても端末は必ず元に戻す
    restore_terminal()?;
    result
}

/// ログはファイルに書く（代替スクリーンを汚さないため）
fn init_logging(config: &Config) {
    let Some(path) = config.log_file.as_deref() else {
        return;
    };
    let Some(file) = open_log_file(path) else {
        return;
    };

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
}

fn open_log_file(path: &Path) -> Option<File> {
    if let Some(dir) = path.parent() {
        // ディレクトリがまだなければ作成する
        if !dir.as_os_str().is_empty() && fs::create_dir_all(dir).is_err() {
            return None;
        }
    }
    OpenOptions::new().create(true).append(true).open(path).ok()
}

fn setup_terminal() -> Result<Terminal<impl Backend>, AppError> {
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?; // 代替スクリーンを使用
    stdout().execute(Hide)?; // カーソルを非表示
    let backend = CrosstermBackend::new(stdout());
    Ok(Terminal::new(backend)?)
}

fn restore_terminal() -> Result<(), AppError> {
    stdout().execute(Show)?; // カーソルを再表示
    stdout().execute(LeaveAlternateScreen)?; // 代替スクリーンを終了
    disable_raw_mode()?;
    Ok(())
}

fn run_app(terminal: &mut Terminal<impl Backend>, config: &Config) -> Result<(), AppError> {
    let mut app_state = match config.syllabary {
        Some(syllabary) => AppState::with_syllabary(syllabary),
        None => AppState::new(),
    };

    loop {
        terminal.draw(|f| ui::ui(f, &app_state))?;

        // 入力があるまでブロックする（タイマーは使わない）
        match event::read()? {
            Event::Key(key) => {
                if app_state.handle_key(key) == AppAction::Quit {
                    break;
                }
            }
            // Resize は次の draw で反映される
            _ => {}
        }
    }

    info!("bye");
    Ok(())
}
