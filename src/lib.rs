// ============================================
// src/lib.rs
// かなクイズ本体（main.rs は端末の準備と実行ループだけ）
// ============================================

pub mod app;
pub mod config;
pub mod error;
pub mod kana;
pub mod quiz;
pub mod ui;
