// ============================================
// src/quiz.rs
// 出題セッションの状態管理（シャッフル → 順番に出題 → 集計）
// ============================================

use rand::Rng;
use rand::seq::SliceRandom;
use tracing::{debug, info};

use crate::error::QuizError;
use crate::kana::{SymbolEntry, SyllabaryTable};

/// 1回の回答の判定結果
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum AnswerOutcome {
    Correct,
    /// 不正解。表示用に正解を持つ
    Incorrect { expected: &'static str },
}

impl AnswerOutcome {
    pub fn is_correct(&self) -> bool {
        matches!(self, AnswerOutcome::Correct)
    }
}

/// 正解数・不正解数・総問題数
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct Summary {
    pub correct: usize,
    pub incorrect: usize,
    pub total: usize,
}

impl Summary {
    pub fn answered(&self) -> usize {
        self.correct + self.incorrect
    }

    pub fn remaining(&self) -> usize {
        self.total - self.answered()
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SessionState {
    NotStarted,
    InProgress,
    Complete,
}

/// 1周分の出題状態
///
/// `order` はテーブルのエントリをシャッフルしたもの。文字と正解を一緒に
/// 持つので、テーブルとセッションがずれることはない。
/// 常に `correct + incorrect == position` かつ `position <= order.len()`。
#[derive(Debug, Clone)]
pub struct QuizSession {
    table_name: &'static str,
    order: Vec<SymbolEntry>,
    position: usize,
    correct: usize,
    incorrect: usize,
}

impl QuizSession {
    fn new<R: Rng + ?Sized>(table: &SyllabaryTable, rng: &mut R) -> Self {
        let mut order = table.entries().to_vec();
        order.shuffle(rng);
        Self {
            table_name: table.name(),
            order,
            position: 0,
            correct: 0,
            incorrect: 0,
        }
    }

    pub fn table_name(&self) -> &'static str {
        self.table_name
    }

    /// 出題順の文字列
    pub fn order(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.order.iter().map(|e| e.symbol)
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn correct_count(&self) -> usize {
        self.correct
    }

    pub fn incorrect_count(&self) -> usize {
        self.incorrect
    }

    pub fn is_complete(&self) -> bool {
        self.position == self.order.len()
    }

    pub fn summary(&self) -> Summary {
        Summary {
            correct: self.correct,
            incorrect: self.incorrect,
            total: self.order.len(),
        }
    }

    fn current(&self) -> Result<&SymbolEntry, QuizError> {
        self.order
            .get(self.position)
            .ok_or(QuizError::SessionComplete)
    }

    fn submit(&mut self, raw: &str) -> Result<AnswerOutcome, QuizError> {
        let entry = *self.current()?;
        let answer = normalize_answer(raw);

        let outcome = if answer == entry.romaji {
            self.correct += 1;
            AnswerOutcome::Correct
        } else {
            self.incorrect += 1;
            AnswerOutcome::Incorrect {
                expected: entry.romaji,
            }
        };
        // 判定と同時に次の問題へ進める（同じ問題に2回答えることはできない）
        self.position += 1;

        debug!(
            symbol = entry.symbol,
            answer = %answer,
            correct = outcome.is_correct(),
            position = self.position,
            "answer submitted"
        );
        if self.is_complete() {
            info!(
                table = self.table_name,
                correct = self.correct,
                incorrect = self.incorrect,
                "quiz session complete"
            );
        }
        Ok(outcome)
    }
}

/// 前後の空白を除き、小文字にそろえる
pub fn normalize_answer(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// 出題コントローラ。生きているセッションは常に高々1つ
#[derive(Debug, Default)]
pub struct QuizController {
    session: Option<QuizSession>,
}

impl QuizController {
    pub fn new() -> Self {
        Self::default()
    }

    /// 新しいセッションを開始する。進行中のセッションは破棄される
    pub fn start(&mut self, table: &SyllabaryTable) {
        self.start_with_rng(table, &mut rand::rng());
    }

    pub fn start_with_rng<R: Rng + ?Sized>(&mut self, table: &SyllabaryTable, rng: &mut R) {
        if let Some(prev) = &self.session {
            if !prev.is_complete() {
                debug!(
                    table = prev.table_name,
                    position = prev.position,
                    "discarding unfinished session"
                );
            }
        }
        let session = QuizSession::new(table, rng);
        info!(table = table.name(), total = session.order.len(), "quiz session started");
        self.session = Some(session);
    }

    /// セッションを捨ててメニューに戻る
    pub fn abandon(&mut self) {
        if let Some(session) = self.session.take() {
            info!(
                table = session.table_name,
                position = session.position,
                total = session.order.len(),
                "quiz session abandoned"
            );
        }
    }

    pub fn session(&self) -> Option<&QuizSession> {
        self.session.as_ref()
    }

    pub fn state(&self) -> SessionState {
        match &self.session {
            None => SessionState::NotStarted,
            Some(s) if s.is_complete() => SessionState::Complete,
            Some(_) => SessionState::InProgress,
        }
    }

    /// 現在出題中の文字
    pub fn current_prompt(&self) -> Result<&'static str, QuizError> {
        let session = self.session.as_ref().ok_or(QuizError::NotStarted)?;
        session.current().map(|e| e.symbol)
    }

    pub fn submit_answer(&mut self, raw: &str) -> Result<AnswerOutcome, QuizError> {
        self.session
            .as_mut()
            .ok_or(QuizError::NotStarted)?
            .submit(raw)
    }

    pub fn is_complete(&self) -> bool {
        self.state() == SessionState::Complete
    }

    /// 途中経過でも呼べる（件数は常に position と整合している）
    pub fn summary(&self) -> Result<Summary, QuizError> {
        self.session
            .as_ref()
            .map(QuizSession::summary)
            .ok_or(QuizError::NotStarted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kana::{HIRAGANA, KATAKANA};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const PAIR: SyllabaryTable = SyllabaryTable::new(
        "Pair",
        &[
            SymbolEntry { symbol: "あ", romaji: "a" },
            SymbolEntry { symbol: "い", romaji: "i" },
        ],
    );

    fn seeded(seed: u64) -> StdRng {
        StdRng::seed_from_u64(seed)
    }

    fn assert_consistent(controller: &QuizController) {
        if let Some(s) = controller.session() {
            assert_eq!(s.correct_count() + s.incorrect_count(), s.position());
            assert!(s.position() <= s.summary().total);
        }
    }

    #[test]
    fn start_builds_a_permutation_of_the_table() {
        let mut quiz = QuizController::new();
        quiz.start_with_rng(&HIRAGANA, &mut seeded(7));

        let session = quiz.session().unwrap();
        let mut order: Vec<&str> = session.order().collect();
        let mut keys: Vec<&str> = HIRAGANA.symbols().collect();
        assert_eq!(order.len(), keys.len());
        order.sort_unstable();
        keys.sort_unstable();
        assert_eq!(order, keys);

        assert_eq!(session.position(), 0);
        assert_eq!(quiz.summary().unwrap(), Summary { correct: 0, incorrect: 0, total: 46 });
        assert_eq!(quiz.state(), SessionState::InProgress);
    }

    #[test]
    fn different_seeds_give_different_orders() {
        let orders: Vec<Vec<&str>> = (0..8)
            .map(|seed| {
                let mut quiz = QuizController::new();
                quiz.start_with_rng(&KATAKANA, &mut seeded(seed));
                quiz.session().unwrap().order().collect()
            })
            .collect();
        assert!(orders.iter().any(|o| o != &orders[0]));
    }

    #[test]
    fn answers_are_case_and_whitespace_insensitive() {
        let mut quiz = QuizController::new();
        quiz.start_with_rng(&HIRAGANA, &mut seeded(1));

        let prompt = quiz.current_prompt().unwrap();
        let expected = HIRAGANA.expected(prompt).unwrap();
        let raw = format!("  {}\t\n", expected.to_uppercase());
        assert_eq!(quiz.submit_answer(&raw), Ok(AnswerOutcome::Correct));
        assert_eq!(quiz.session().unwrap().correct_count(), 1);
    }

    #[test]
    fn wrong_answer_carries_the_expected_romaji() {
        let mut quiz = QuizController::new();
        quiz.start_with_rng(&KATAKANA, &mut seeded(2));

        let prompt = quiz.current_prompt().unwrap();
        let expected = KATAKANA.expected(prompt).unwrap();
        assert_eq!(
            quiz.submit_answer("xyz"),
            Ok(AnswerOutcome::Incorrect { expected })
        );
        assert_eq!(quiz.session().unwrap().incorrect_count(), 1);
        assert_eq!(quiz.session().unwrap().position(), 1);
    }

    #[test]
    fn empty_answer_counts_as_incorrect() {
        let mut quiz = QuizController::new();
        quiz.start_with_rng(&PAIR, &mut seeded(3));
        let outcome = quiz.submit_answer("   ").unwrap();
        assert!(!outcome.is_correct());
        assert_eq!(quiz.summary().unwrap().incorrect, 1);
    }

    #[test]
    fn two_symbol_walkthrough() {
        let mut quiz = QuizController::new();
        quiz.start_with_rng(&PAIR, &mut seeded(4));

        let first = quiz.current_prompt().unwrap();
        let answer = PAIR.expected(first).unwrap().to_uppercase();
        assert_eq!(quiz.submit_answer(&answer), Ok(AnswerOutcome::Correct));
        assert_eq!(quiz.summary().unwrap().correct, 1);
        assert!(!quiz.is_complete());

        let second = quiz.current_prompt().unwrap();
        assert_ne!(first, second);
        let expected = PAIR.expected(second).unwrap();
        assert_eq!(
            quiz.submit_answer("zzz"),
            Ok(AnswerOutcome::Incorrect { expected })
        );

        assert!(quiz.is_complete());
        assert_eq!(quiz.state(), SessionState::Complete);
        assert_eq!(quiz.summary().unwrap(), Summary { correct: 1, incorrect: 1, total: 2 });
    }

    #[test]
    fn full_pass_completes_with_consistent_counts() {
        let mut quiz = QuizController::new();
        quiz.start_with_rng(&HIRAGANA, &mut seeded(5));

        let mut n = 0;
        while !quiz.is_complete() {
            let prompt = quiz.current_prompt().unwrap();
            // 偶数番目だけ正解する
            let answer = if n % 2 == 0 { HIRAGANA.expected(prompt).unwrap() } else { "?" };
            quiz.submit_answer(answer).unwrap();
            assert_consistent(&quiz);
            n += 1;
        }

        let summary = quiz.summary().unwrap();
        assert_eq!(n, 46);
        assert_eq!(summary.answered(), summary.total);
        assert_eq!(summary.remaining(), 0);
        assert_eq!(summary.correct, 23);
        assert_eq!(summary.incorrect, 23);
    }

    #[test]
    fn operations_after_completion_fail_without_changing_state() {
        let mut quiz = QuizController::new();
        quiz.start_with_rng(&PAIR, &mut seeded(6));
        quiz.submit_answer("a").unwrap();
        quiz.submit_answer("i").unwrap();
        let before = quiz.summary().unwrap();

        assert_eq!(quiz.current_prompt(), Err(QuizError::SessionComplete));
        assert_eq!(quiz.submit_answer("a"), Err(QuizError::SessionComplete));
        assert_eq!(quiz.summary().unwrap(), before);
        assert_eq!(quiz.session().unwrap().position(), 2);
        assert_consistent(&quiz);
    }

    #[test]
    fn operations_before_start_fail() {
        let mut quiz = QuizController::new();
        assert_eq!(quiz.state(), SessionState::NotStarted);
        assert_eq!(quiz.current_prompt(), Err(QuizError::NotStarted));
        assert_eq!(quiz.submit_answer("a"), Err(QuizError::NotStarted));
        assert_eq!(quiz.summary(), Err(QuizError::NotStarted));
        assert!(!quiz.is_complete());
    }

    #[test]
    fn restarting_resets_progress() {
        let mut quiz = QuizController::new();
        quiz.start_with_rng(&HIRAGANA, &mut seeded(8));
        quiz.submit_answer("nope").unwrap();
        quiz.submit_answer("nope").unwrap();

        quiz.start_with_rng(&KATAKANA, &mut seeded(9));
        let session = quiz.session().unwrap();
        assert_eq!(session.table_name(), "Katakana");
        assert_eq!(session.position(), 0);
        assert_eq!(quiz.summary().unwrap(), Summary { correct: 0, incorrect: 0, total: 46 });
        assert!(KATAKANA.expected(quiz.current_prompt().unwrap()).is_some());
    }

    #[test]
    fn restart_is_allowed_after_completion() {
        let mut quiz = QuizController::new();
        quiz.start_with_rng(&PAIR, &mut seeded(10));
        quiz.submit_answer("a").unwrap();
        quiz.submit_answer("a").unwrap();
        assert!(quiz.is_complete());

        quiz.start(&PAIR);
        assert_eq!(quiz.state(), SessionState::InProgress);
        assert_eq!(quiz.summary().unwrap().answered(), 0);
    }

    #[test]
    fn abandon_returns_to_not_started() {
        let mut quiz = QuizController::new();
        quiz.start(&HIRAGANA);
        quiz.submit_answer("a").unwrap();
        quiz.abandon();
        assert_eq!(quiz.state(), SessionState::NotStarted);
        assert!(quiz.session().is_none());
    }

    #[test]
    fn normalize_trims_and_lowercases_only() {
        assert_eq!(normalize_answer("  ShI \n"), "shi");
        assert_eq!(normalize_answer("s h i"), "s h i");
    }
}
