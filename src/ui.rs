// ============================================
// src/ui.rs
// UI描画
// ============================================

use ratatui::{
    prelude::*,
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::app::{AppState, Screen};
use crate::kana::Syllabary;
use crate::quiz::{AnswerOutcome, Summary};

// 配色
const ACCENT: Color = Color::Green; // 正解・選択中
const ERROR: Color = Color::Red; // 不正解
const SECONDARY: Color = Color::Cyan; // 結果表示など

pub fn ui(f: &mut Frame, app_state: &AppState) {
    let size = f.area();
    // 枠線を描画
    let block = Block::default().borders(Borders::ALL).title("Kana Quiz");
    let inner_area = block.inner(size);
    f.render_widget(block, size);

    match &app_state.screen {
        Screen::Menu { selected } => draw_menu(f, inner_area, *selected),
        Screen::Question { input } => draw_question(f, inner_area, app_state, Some(input.as_str())),
        Screen::Feedback { outcome } => {
            // 出題画面の上にポップアップを重ねる
            draw_question(f, inner_area, app_state, None);
            draw_feedback(f, inner_area, *outcome);
        }
        Screen::Results { summary } => draw_results(f, inner_area, app_state, summary),
    }
}

fn draw_menu(f: &mut Frame, area: Rect, selected: usize) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(2), // [1] タイトル
            Constraint::Length(Syllabary::ALL.len() as u16 + 1), // [2] 選択肢
            Constraint::Length(1), // [3] 操作説明
            Constraint::Min(0),
        ])
        .split(area);

    f.render_widget(
        Paragraph::new("Welcome to the Kana Quiz!").bold().centered(),
        chunks[1],
    );

    let items: Vec<Line> = Syllabary::ALL
        .iter()
        .enumerate()
        .map(|(i, s)| {
            let text = format!("{}. {}", i + 1, s.label());
            if i == selected {
                Line::from(format!("> {text} <")).style(Style::default().fg(Color::Black).bg(ACCENT))
            } else {
                Line::from(text).style(Style::default().fg(Color::Gray))
            }
        })
        .collect();
    f.render_widget(Paragraph::new(items).centered(), chunks[2]);

    f.render_widget(
        Paragraph::new("↑/↓ select · Enter start · q quit")
            .style(Style::default().fg(Color::DarkGray))
            .centered(),
        chunks[3],
    );
}

/// 集計行（例: "3 correct | 1 incorrect (4/46)"）
fn tally_line(summary: &Summary) -> String {
    format!(
        "{} correct | {} incorrect ({}/{})",
        summary.correct,
        summary.incorrect,
        summary.answered(),
        summary.total
    )
}

/// `input` が None のときは集計だけ描く（判定ポップアップの背景）
fn draw_question(f: &mut Frame, area: Rect, app_state: &AppState, input: Option<&str>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // [0] 集計
            Constraint::Min(0),
            Constraint::Length(1), // [2] 問題
            Constraint::Length(1), // [3] 空白
            Constraint::Length(1), // [4] 回答欄
            Constraint::Min(0),
            Constraint::Length(1), // [6] 操作説明
        ])
        .split(area);

    if let Ok(summary) = app_state.quiz.summary() {
        f.render_widget(
            Paragraph::new(tally_line(&summary)).style(Style::default().fg(Color::Yellow)),
            chunks[0],
        );
    }

    let Some(input) = input else {
        return;
    };

    if let Ok(symbol) = app_state.quiz.current_prompt() {
        let prompt = Line::from(vec![
            Span::raw("What is the romaji for: "),
            Span::styled(symbol, Style::default().fg(Color::White).bold()),
        ]);
        f.render_widget(Paragraph::new(prompt).centered(), chunks[2]);
    }

    let answer = Line::from(vec![
        Span::styled("> ", Style::default().fg(SECONDARY)),
        Span::raw(input),
        // カーソル代わり
        Span::styled(" ", Style::default().bg(Color::White)),
    ]);
    f.render_widget(Paragraph::new(answer).centered(), chunks[4]);

    f.render_widget(
        Paragraph::new("Enter submit · Esc back to menu")
            .style(Style::default().fg(Color::DarkGray))
            .centered(),
        chunks[6],
    );
}

fn draw_feedback(f: &mut Frame, area: Rect, outcome: AnswerOutcome) {
    let (text, color) = match outcome {
        AnswerOutcome::Correct => ("Correct!".to_string(), ACCENT),
        AnswerOutcome::Incorrect { expected } => {
            (format!("Incorrect. The correct answer is: {expected}"), ERROR)
        }
    };
    draw_popup(f, area, "Answer", vec![Line::from(text).style(Style::default().fg(color))]);
}

fn draw_results(f: &mut Frame, area: Rect, app_state: &AppState, summary: &Summary) {
    let title = app_state.syllabary.map_or("Quiz", |s| s.label());
    let lines = vec![
        Line::from(format!("{title} quiz complete!")).bold(),
        Line::from(format!(
            "Final score: {} correct | {} incorrect",
            summary.correct, summary.incorrect
        ))
        .style(Style::default().fg(SECONDARY)),
    ];
    draw_popup(f, area, "Final Result", lines);
}

/// 中央にポップアップを描く（Enter で閉じる）
fn draw_popup(f: &mut Frame, area: Rect, title: &str, mut lines: Vec<Line>) {
    lines.push(Line::from(""));
    lines.push(Line::from("[ OK ]").style(Style::default().fg(Color::Black).bg(ACCENT)));

    let height = lines.len() as u16 + 2;
    let width = area.width.min(60);
    let popup = centered_rect(area, width, height);

    f.render_widget(Clear, popup);
    f.render_widget(
        Paragraph::new(lines)
            .centered()
            .block(Block::default().borders(Borders::ALL).title(title.to_string())),
        popup,
    );
}

fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}
