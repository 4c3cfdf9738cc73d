//! One playthrough: fifteen questions, a prize ladder and a per-question countdown.

use std::time::Duration;

use bevy::prelude::Resource;
use rand::Rng;
use thiserror::Error;
use uuid::Uuid;

use crate::{
    question_bank::{InsufficientQuestions, OptionLetter, Question, QuestionBank},
    timer::Countdown,
};

pub const QUESTIONS_PER_GAME: usize = 15;
pub const SECONDS_PER_QUESTION: u32 = 30;

/// Prize for answering question `i` correctly.
pub const PRIZE_LADDER: [u64; QUESTIONS_PER_GAME] = [
    1_000, 2_000, 3_000, 5_000, 10_000, 20_000, 40_000, 80_000, 160_000, 320_000, 640_000,
    1_250_000, 2_500_000, 5_000_000, 10_000_000,
];

/// What a single answer or tick did to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Advanced,
    Won,
    WrongAnswer,
    TimedOut,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    AllCorrect,
    WrongAnswer,
    TimeUp,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Outcome {
    pub won: bool,
    pub won_amount: u64,
    pub answered: usize,
    pub reason: EndReason,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("session is already over")]
    Finished,
}

#[derive(Resource, Debug, Clone)]
pub struct GameSession {
    id: Uuid,
    questions: Vec<Question>,
    index: usize,
    won_amount: u64,
    countdown: Countdown,
    outcome: Option<Outcome>,
}

impl GameSession {
    /// Samples a fresh question set and starts the clock for the first question.
    pub fn start<R: Rng + ?Sized>(
        bank: &QuestionBank,
        rng: &mut R,
        now: Duration,
    ) -> Result<Self, InsufficientQuestions> {
        let questions = bank.sample(QUESTIONS_PER_GAME, rng)?;
        Ok(Self::with_questions(questions, now))
    }

    fn with_questions(questions: Vec<Question>, now: Duration) -> Self {
        debug_assert_eq!(questions.len(), QUESTIONS_PER_GAME);
        Self {
            id: Uuid::new_v4(),
            questions,
            index: 0,
            won_amount: 0,
            countdown: Countdown::new(SECONDS_PER_QUESTION, now),
            outcome: None,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Zero-based index of the question being asked, `QUESTIONS_PER_GAME` after a win.
    pub fn current_index(&self) -> usize {
        self.index
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.questions.get(self.index)
    }

    /// Prize awarded if the current question is answered correctly.
    pub fn prize_at_stake(&self) -> Option<u64> {
        PRIZE_LADDER.get(self.index).copied()
    }

    pub fn won_amount(&self) -> u64 {
        self.won_amount
    }

    pub fn time_left(&self) -> u32 {
        self.countdown.seconds_left()
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn answer(&mut self, choice: OptionLetter, now: Duration) -> Result<Step, SessionError> {
        if self.is_over() {
            return Err(SessionError::Finished);
        }
        let Some(question) = self.questions.get(self.index) else {
            return Err(SessionError::Finished);
        };

        if !question.is_correct(choice) {
            self.finish(EndReason::WrongAnswer);
            return Ok(Step::WrongAnswer);
        }

        self.won_amount = PRIZE_LADDER[self.index];
        self.index += 1;

        if self.index == QUESTIONS_PER_GAME {
            self.finish(EndReason::AllCorrect);
            return Ok(Step::Won);
        }

        self.countdown.restart(now);
        Ok(Step::Advanced)
    }

    /// Advances the countdown. Returns `Some(Step::TimedOut)` on the tick that ends the session.
    pub fn tick(&mut self, now: Duration) -> Option<Step> {
        if self.is_over() {
            return None;
        }

        if self.countdown.tick(now) {
            self.finish(EndReason::TimeUp);
            return Some(Step::TimedOut);
        }
        None
    }

    fn finish(&mut self, reason: EndReason) {
        self.outcome = Some(Outcome {
            won: reason == EndReason::AllCorrect,
            won_amount: self.won_amount,
            answered: self.index,
            reason,
        });
    }
}
