use crate::model::QuestionBank;

/// Placeholder shown in the review when a question was left unanswered.
pub const NO_ANSWER: &str = "no answer";

/// Why an attempt was scored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionReason {
    Completed,
    TimeExpired,
}

/// One missed or unanswered question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewItem {
    pub index: usize,
    pub question_text: String,
    pub user_answer: String,
    pub correct_answer: String,
}

impl ReviewItem {
    #[must_use]
    pub fn is_unanswered(&self) -> bool {
        self.user_answer == NO_ANSWER
    }
}

/// Score and review list for a submitted attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizResult {
    score: usize,
    total: usize,
    review: Vec<ReviewItem>,
    reason: SubmissionReason,
}

impl QuizResult {
    #[must_use]
    pub fn evaluate(
        bank: &QuestionBank,
        answers: &[Option<String>],
        reason: SubmissionReason,
    ) -> Self {
        Self {
            score: calculate_score(bank, answers),
            total: bank.len(),
            review: build_review(bank, answers),
            reason,
        }
    }

    #[must_use]
    pub fn score(&self) -> usize {
        self.score
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.total
    }

    #[must_use]
    pub fn review(&self) -> &[ReviewItem] {
        &self.review
    }

    #[must_use]
    pub fn reason(&self) -> SubmissionReason {
        self.reason
    }

    #[must_use]
    pub fn score_line(&self) -> String {
        format!("Você acertou {} de {} perguntas!", self.score, self.total)
    }
}

/// Number of answers matching the bank's correct answer. `None` never matches.
#[must_use]
pub fn calculate_score(bank: &QuestionBank, answers: &[Option<String>]) -> usize {
    bank.questions()
        .iter()
        .zip(answers)
        .filter(|(question, answer)| question.is_correct(answer.as_deref()))
        .count()
}

/// Every question whose answer is wrong or missing, in bank order.
#[must_use]
pub fn build_review(bank: &QuestionBank, answers: &[Option<String>]) -> Vec<ReviewItem> {
    bank.questions()
        .iter()
        .enumerate()
        .filter_map(|(index, question)| {
            let answer = answers.get(index).and_then(Option::as_deref);
            if question.is_correct(answer) {
                return None;
            }
            Some(ReviewItem {
                index,
                question_text: question.text().to_string(),
                user_answer: answer.unwrap_or(NO_ANSWER).to_string(),
                correct_answer: question.correct_answer().to_string(),
            })
        })
        .collect()
}
