// ============================================
// src/app.rs
// 画面遷移とキー入力の処理（端末なしでテストできるようにする）
// ============================================

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tracing::warn;

use crate::kana::Syllabary;
use crate::quiz::{AnswerOutcome, QuizController, Summary};

/// 今表示している画面
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    /// 文字セットの選択
    Menu { selected: usize },
    /// 出題中。`input` は入力途中の回答
    Question { input: String },
    /// 1問ごとの判定表示
    Feedback { outcome: AnswerOutcome },
    /// 最終結果
    Results { summary: Summary },
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum AppAction {
    Continue,
    Quit,
}

/// アプリ全体の状態
#[derive(Debug)]
pub struct AppState {
    pub screen: Screen,
    pub quiz: QuizController,
    /// 最後に選んだ文字セット（結果画面の表示用）
    pub syllabary: Option<Syllabary>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self {
            screen: Screen::Menu { selected: 0 },
            quiz: QuizController::new(),
            syllabary: None,
        }
    }

    /// 指定の文字セットですぐに始める（--syllabary 用）
    pub fn with_syllabary(syllabary: Syllabary) -> Self {
        let mut state = Self::new();
        state.start_quiz(syllabary);
        state
    }

    pub fn start_quiz(&mut self, syllabary: Syllabary) {
        self.quiz.start(&syllabary.table());
        self.syllabary = Some(syllabary);
        self.screen = Screen::Question {
            input: String::new(),
        };
    }

    /// メニューに戻る。進行中のセッションは破棄
    fn back_to_menu(&mut self) {
        self.quiz.abandon();
        let selected = self
            .syllabary
            .and_then(|s| Syllabary::ALL.iter().position(|x| *x == s))
            .unwrap_or(0);
        self.screen = Screen::Menu { selected };
    }

    /// キー入力の処理
    pub fn handle_key(&mut self, key: KeyEvent) -> AppAction {
        if key.kind != KeyEventKind::Press {
            return AppAction::Continue;
        }
        // Ctrl+C はどの画面でも終了
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return AppAction::Quit;
        }

        match &mut self.screen {
            Screen::Menu { selected } => match key.code {
                KeyCode::Esc | KeyCode::Char('q') => return AppAction::Quit,
                KeyCode::Up | KeyCode::Char('k') => {
                    *selected = selected.saturating_sub(1);
                }
                KeyCode::Down | KeyCode::Char('j') => {
                    *selected = (*selected + 1).min(Syllabary::ALL.len() - 1);
                }
                KeyCode::Enter => {
                    let syllabary = Syllabary::ALL[*selected];
                    self.start_quiz(syllabary);
                }
                KeyCode::Char('1') => self.start_quiz(Syllabary::Hiragana),
                KeyCode::Char('2') => self.start_quiz(Syllabary::Katakana),
                _ => {}
            },
            Screen::Question { input } => match key.code {
                KeyCode::Esc => self.back_to_menu(),
                KeyCode::Backspace => {
                    input.pop();
                }
                KeyCode::Char(c) => input.push(c),
                KeyCode::Enter => {
                    let answer = std::mem::take(input);
                    self.submit(&answer);
                }
                _ => {}
            },
            Screen::Feedback { .. } => {
                if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
                    self.advance();
                }
            }
            Screen::Results { .. } => {
                if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                    self.back_to_menu();
                }
            }
        }
        AppAction::Continue
    }

    fn submit(&mut self, answer: &str) {
        match self.quiz.submit_answer(answer) {
            Ok(outcome) => self.screen = Screen::Feedback { outcome },
            Err(e) => {
                // 画面と状態がずれた場合はメニューに戻す
                warn!(error = %e, "answer submitted outside a running session");
                self.back_to_menu();
            }
        }
    }

    /// 判定表示を閉じて次の問題へ（全部終わっていれば結果画面へ）
    fn advance(&mut self) {
        if self.quiz.is_complete() {
            match self.quiz.summary() {
                Ok(summary) => self.screen = Screen::Results { summary },
                Err(_) => self.back_to_menu(),
            }
        } else {
            self.screen = Screen::Question {
                input: String::new(),
            };
        }
    }
}
