//! KAUN BANEGA CROREPATI - fifteen questions between you and a crore.
//!
//! [`QuizCorePlugin`] holds the rules and runs headless. [`PresentationPlugin`]
//! and [`SoundPlugin`] draw and play them.

pub mod audio;
pub mod config;
pub mod question_bank;
#[cfg(feature = "scoreboard")]
pub mod scoreboard;
pub mod screen;
pub mod session;
pub mod timer;
pub mod ui;

pub use audio::SoundPlugin;
pub use config::GameConfig;
pub use question_bank::{LoadError, OptionLetter, ParseLetterError, Question, QuestionBank};
pub use screen::{GameCue, MenuNotice, QuizCorePlugin, Screen, UiAction};
pub use session::{GameSession, Outcome, PRIZE_LADDER, QUESTIONS_PER_GAME, SECONDS_PER_QUESTION};
pub use ui::PresentationPlugin;
