//! Screen state machine and the controller systems that drive it.
//!
//! Everything here runs headless: the presentation layer only feeds
//! [`UiAction`]s in and reads [`Screen`], [`GameSession`], [`MenuNotice`]
//! and [`GameCue`]s back out.

use bevy::prelude::*;

use crate::{
    question_bank::{OptionLetter, QuestionBank},
    session::{GameSession, SessionError, Step, QUESTIONS_PER_GAME},
};

#[derive(States, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Screen {
    #[default]
    MainMenu,
    Game,
    Results,
}

/// Player intent, already resolved to a control on some screen.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiAction {
    Start,
    Answer(OptionLetter),
    PlayAgain,
    Exit,
}

/// Something the player should hear or see acknowledged.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameCue {
    Correct,
    Wrong,
    Won,
    TimeUp,
    StartRejected,
}

/// Message shown on the main menu after a rejected start.
#[derive(Resource, Debug, Default, Clone, PartialEq, Eq)]
pub struct MenuNotice(pub Option<String>);

#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct ControllerSet;

pub struct QuizCorePlugin;

impl Plugin for QuizCorePlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<Screen>()
            .enable_state_scoped_entities::<Screen>()
            .init_resource::<MenuNotice>()
            .add_event::<UiAction>()
            .add_event::<GameCue>()
            .add_systems(
                Update,
                (tick_countdown.run_if(in_state(Screen::Game)), route_actions)
                    .chain()
                    .in_set(ControllerSet),
            )
            .add_systems(OnEnter(Screen::MainMenu), discard_session)
            .add_systems(OnEnter(Screen::Results), log_outcome);
    }
}

/// Runs before [`route_actions`], so an expiring clock beats a click in the same frame.
fn tick_countdown(
    time: Res<Time<Real>>,
    session: Option<ResMut<GameSession>>,
    mut next_screen: ResMut<NextState<Screen>>,
    mut cues: EventWriter<GameCue>,
) {
    let Some(mut session) = session else {
        return;
    };

    if let Some(step) = session.tick(time.elapsed()) {
        settle(step, &mut next_screen, &mut cues);
    }
}

#[allow(clippy::too_many_arguments)]
fn route_actions(
    mut cmd: Commands,
    mut actions: EventReader<UiAction>,
    screen: Res<State<Screen>>,
    mut next_screen: ResMut<NextState<Screen>>,
    bank: Option<Res<QuestionBank>>,
    mut session: Option<ResMut<GameSession>>,
    mut notice: ResMut<MenuNotice>,
    time: Res<Time<Real>>,
    mut cues: EventWriter<GameCue>,
    mut exit: EventWriter<AppExit>,
) {
    let now = time.elapsed();

    // One action per frame; the rest were aimed at a screen that is about to change.
    for action in actions.read() {
        let handled = match (*screen.get(), *action) {
            (Screen::MainMenu, UiAction::Start) => {
                let Some(bank) = bank.as_deref() else {
                    warn!("Start requested before any questions were loaded");
                    continue;
                };
                match GameSession::start(bank, &mut rand::rng(), now) {
                    Ok(new_session) => {
                        info!("Starting session {}", new_session.id());
                        cmd.insert_resource(new_session);
                        notice.0 = None;
                        next_screen.set(Screen::Game);
                    }
                    Err(err) => {
                        warn!("Cannot start a game: {}", err);
                        notice.0 = Some(format!(
                            "Not enough questions: {} of {} loaded",
                            err.available, QUESTIONS_PER_GAME
                        ));
                        cues.send(GameCue::StartRejected);
                    }
                }
                true
            }
            (Screen::Game, UiAction::Answer(choice)) => {
                let Some(session) = session.as_deref_mut() else {
                    warn!("Answer {} with no session in progress", choice);
                    continue;
                };
                match session.answer(choice, now) {
                    Ok(step) => {
                        debug!(
                            "Session {} answered {} -> {:?}",
                            session.id(),
                            choice,
                            step
                        );
                        settle(step, &mut next_screen, &mut cues);
                    }
                    Err(SessionError::Finished) => {
                        debug!("Ignoring answer {} after the session ended", choice);
                    }
                }
                true
            }
            (Screen::Results, UiAction::PlayAgain) => {
                next_screen.set(Screen::MainMenu);
                true
            }
            (Screen::MainMenu | Screen::Results, UiAction::Exit) => {
                info!("Exit requested");
                exit.send(AppExit::Success);
                true
            }
            (screen, action) => {
                debug!("Ignoring {:?} on {:?}", action, screen);
                false
            }
        };

        if handled {
            break;
        }
    }
    actions.clear();
}

fn settle(step: Step, next_screen: &mut NextState<Screen>, cues: &mut EventWriter<GameCue>) {
    match step {
        Step::Advanced => {
            cues.send(GameCue::Correct);
        }
        Step::Won => {
            cues.send(GameCue::Correct);
            cues.send(GameCue::Won);
            next_screen.set(Screen::Results);
        }
        Step::WrongAnswer => {
            cues.send(GameCue::Wrong);
            next_screen.set(Screen::Results);
        }
        Step::TimedOut => {
            cues.send(GameCue::TimeUp);
            next_screen.set(Screen::Results);
        }
    }
}

fn discard_session(mut cmd: Commands) {
    cmd.remove_resource::<GameSession>();
}

fn log_outcome(session: Option<Res<GameSession>>) {
    let Some(session) = session else {
        return;
    };
    if let Some(outcome) = session.outcome() {
        info!(
            "Session {} ended ({:?}): won={} amount={} after {} correct",
            session.id(),
            outcome.reason,
            outcome.won,
            outcome.won_amount,
            outcome.answered
        );
    }
}
