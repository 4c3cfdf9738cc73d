use std::time::Duration;

use bevy::{prelude::*, state::app::StatesPlugin, time::TimeUpdateStrategy};
use crorepati::{
    session::EndReason, GameCue, GameSession, MenuNotice, OptionLetter, QuestionBank,
    QuizCorePlugin, Screen, UiAction, PRIZE_LADDER, QUESTIONS_PER_GAME,
};

fn bank(n: usize) -> QuestionBank {
    let source: String = (0..n)
        .map(|i| {
            format!(
                "Question {i}?|a{i}|b{i}|c{i}|d{i}|{}\n",
                OptionLetter::ALL[i % 4]
            )
        })
        .collect();
    QuestionBank::parse(&source).unwrap()
}

fn app_with(questions: usize) -> App {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, StatesPlugin, QuizCorePlugin))
        .insert_resource(bank(questions));
    app.update();
    app
}

fn screen(app: &App) -> Screen {
    *app.world().resource::<State<Screen>>().get()
}

fn session(app: &App) -> &GameSession {
    app.world().resource::<GameSession>()
}

/// Sends one action and runs frames until any screen change it caused has landed.
fn act(app: &mut App, action: UiAction) {
    app.world_mut().send_event(action);
    app.update();
    app.update();
}

fn correct_letter(app: &App) -> OptionLetter {
    session(app).current_question().unwrap().correct
}

fn wrong_letter(app: &App) -> OptionLetter {
    let correct = correct_letter(app);
    OptionLetter::ALL
        .into_iter()
        .find(|l| *l != correct)
        .unwrap()
}

fn start(app: &mut App) {
    act(app, UiAction::Start);
    assert_eq!(screen(app), Screen::Game);
}

#[test]
fn start_enters_the_first_question() {
    let mut app = app_with(20);
    assert_eq!(screen(&app), Screen::MainMenu);

    start(&mut app);

    let session = session(&app);
    assert_eq!(session.current_index(), 0);
    assert_eq!(session.won_amount(), 0);
    assert_eq!(session.prize_at_stake(), Some(PRIZE_LADDER[0]));
    assert!(session.time_left() > 0);
    assert!(!session.is_over());
}

#[test]
fn fifteen_correct_answers_win_the_crore() {
    let mut app = app_with(QUESTIONS_PER_GAME);
    start(&mut app);

    for i in 0..QUESTIONS_PER_GAME {
        assert_eq!(screen(&app), Screen::Game);
        assert_eq!(session(&app).current_index(), i);
        let letter = correct_letter(&app);
        act(&mut app, UiAction::Answer(letter));
    }

    assert_eq!(screen(&app), Screen::Results);
    let outcome = session(&app).outcome().unwrap();
    assert!(outcome.won);
    assert_eq!(outcome.won_amount, 10_000_000);
    assert_eq!(outcome.answered, QUESTIONS_PER_GAME);
}

#[test]
fn wrong_answer_keeps_the_last_prize() {
    for misses_at in [0, 1, 7, 14] {
        let mut app = app_with(20);
        start(&mut app);

        for _ in 0..misses_at {
            let letter = correct_letter(&app);
            act(&mut app, UiAction::Answer(letter));
        }
        let letter = wrong_letter(&app);
        act(&mut app, UiAction::Answer(letter));

        assert_eq!(screen(&app), Screen::Results);
        let outcome = session(&app).outcome().unwrap();
        assert!(!outcome.won);
        let expected = if misses_at == 0 {
            0
        } else {
            PRIZE_LADDER[misses_at - 1]
        };
        assert_eq!(outcome.won_amount, expected, "missed question {misses_at}");
    }
}

#[test]
fn small_bank_rejects_start() {
    let mut app = app_with(QUESTIONS_PER_GAME - 1);

    app.world_mut().send_event(UiAction::Start);
    app.update();

    let rejected = app
        .world()
        .resource::<Events<GameCue>>()
        .iter_current_update_events()
        .any(|cue| *cue == GameCue::StartRejected);
    assert!(rejected);

    app.update();
    assert_eq!(screen(&app), Screen::MainMenu);
    assert!(app.world().get_resource::<GameSession>().is_none());
    let notice = app.world().resource::<MenuNotice>();
    assert_eq!(
        notice.0.as_deref(),
        Some("Not enough questions: 14 of 15 loaded")
    );
}

#[test]
fn running_out_of_time_ends_the_game() {
    let mut app = app_with(20);
    app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(500)));
    start(&mut app);

    let letter = correct_letter(&app);
    act(&mut app, UiAction::Answer(letter));
    assert_eq!(session(&app).current_index(), 1);

    for _ in 0..200 {
        if screen(&app) == Screen::Results {
            break;
        }
        app.update();
    }

    assert_eq!(screen(&app), Screen::Results);
    let outcome = session(&app).outcome().unwrap();
    assert!(!outcome.won);
    assert_eq!(outcome.won_amount, PRIZE_LADDER[0]);
    assert_eq!(session(&app).time_left(), 0);
}

#[test]
fn expiry_beats_an_answer_in_the_same_frame() {
    let mut app = app_with(20);
    app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_secs(1)));
    start(&mut app);

    let letter = correct_letter(&app);
    act(&mut app, UiAction::Answer(letter));
    assert_eq!(session(&app).current_index(), 1);

    // Each frame is one second, so the next frame is the one that reaches zero.
    while session(&app).time_left() > 1 {
        app.update();
    }
    assert_eq!(screen(&app), Screen::Game);

    let letter = correct_letter(&app);
    act(&mut app, UiAction::Answer(letter));

    assert_eq!(screen(&app), Screen::Results);
    let session = session(&app);
    let outcome = session.outcome().unwrap();
    assert_eq!(outcome.reason, EndReason::TimeUp);
    assert!(!outcome.won);
    assert_eq!(outcome.won_amount, PRIZE_LADDER[0]);
    assert_eq!(outcome.answered, 1);
    assert_eq!(session.current_index(), 1);
}

#[test]
fn actions_for_other_screens_are_ignored() {
    let mut app = app_with(20);

    act(&mut app, UiAction::Answer(OptionLetter::A));
    act(&mut app, UiAction::PlayAgain);
    assert_eq!(screen(&app), Screen::MainMenu);
    assert!(app.world().get_resource::<GameSession>().is_none());

    start(&mut app);
    act(&mut app, UiAction::Start);
    act(&mut app, UiAction::Exit);
    assert_eq!(screen(&app), Screen::Game);
    assert_eq!(session(&app).current_index(), 0);
    assert!(app.should_exit().is_none());
}

#[test]
fn play_again_returns_to_menu_and_forgets_the_session() {
    let mut app = app_with(20);
    start(&mut app);
    let first = session(&app).id();

    let letter = wrong_letter(&app);
    act(&mut app, UiAction::Answer(letter));
    assert_eq!(screen(&app), Screen::Results);

    act(&mut app, UiAction::PlayAgain);
    assert_eq!(screen(&app), Screen::MainMenu);
    assert!(app.world().get_resource::<GameSession>().is_none());

    start(&mut app);
    assert_ne!(session(&app).id(), first);
}

#[test]
fn exit_from_menu_quits_successfully() {
    let mut app = app_with(20);
    act(&mut app, UiAction::Exit);
    assert_eq!(app.should_exit(), Some(AppExit::Success));
}

#[test]
fn exit_from_results_quits_successfully() {
    let mut app = app_with(20);
    start(&mut app);
    let letter = wrong_letter(&app);
    act(&mut app, UiAction::Answer(letter));
    assert_eq!(screen(&app), Screen::Results);
    assert!(app.should_exit().is_none());

    act(&mut app, UiAction::Exit);
    assert_eq!(app.should_exit(), Some(AppExit::Success));
}
