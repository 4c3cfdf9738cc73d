use bevy::{prelude::*, sprite::Anchor, text::TextBounds};

use super::{
    button::{spawn_button, ButtonLabel, ButtonSpec, QuizButton},
    format_prize, screen_point, GOLD, LIGHT_BLUE, MEDIUM_FONT, OPTION_HOVER, TIMER_HURRY,
    WINDOW_WIDTH,
};
use crate::{
    question_bank::OptionLetter,
    screen::{Screen, UiAction},
    session::{GameSession, QUESTIONS_PER_GAME},
};

const HURRY_SECONDS: u32 = 5;

#[derive(Component)]
struct TimerText;

#[derive(Component)]
struct PrizeText;

#[derive(Component)]
struct QuestionNumberText;

#[derive(Component)]
struct QuestionText;

pub struct GameScreenPlugin;

impl Plugin for GameScreenPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(Screen::Game), setup_game_screen)
            .add_systems(
                Update,
                (update_hud, update_question)
                    .run_if(in_state(Screen::Game))
                    .run_if(resource_exists::<GameSession>),
            );
    }
}

fn hud_text(text: &str, font_size: f32, color: Color) -> impl Bundle {
    (
        Text2d::new(text),
        TextFont {
            font_size,
            ..default()
        },
        TextColor(color),
        StateScoped(Screen::Game),
    )
}

fn setup_game_screen(
    mut cmd: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut mats: ResMut<Assets<ColorMaterial>>,
) {
    cmd.spawn((
        hud_text("", MEDIUM_FONT, Color::WHITE),
        Anchor::TopLeft,
        Transform::from_translation(screen_point(20.0, 20.0)),
        TimerText,
    ));
    cmd.spawn((
        hud_text("", MEDIUM_FONT, Color::WHITE),
        Anchor::TopRight,
        Transform::from_translation(screen_point(WINDOW_WIDTH - 20.0, 20.0)),
        PrizeText,
    ));
    cmd.spawn((
        hud_text("", MEDIUM_FONT, GOLD),
        Transform::from_translation(screen_point(400.0, 60.0)),
        QuestionNumberText,
    ));
    cmd.spawn((
        hud_text("", MEDIUM_FONT, Color::WHITE),
        TextLayout::new_with_justify(JustifyText::Center),
        TextBounds::new_horizontal(WINDOW_WIDTH - 100.0),
        Transform::from_translation(screen_point(400.0, 150.0)),
        QuestionText,
    ));

    // 2x2 grid of answers
    for letter in OptionLetter::ALL {
        let row = (letter.index() / 2) as f32;
        let col = (letter.index() % 2) as f32;
        let center = screen_point(225.0 + col * 300.0, 385.0 + row * 100.0);
        spawn_button(
            &mut cmd,
            &mut meshes,
            &mut mats,
            ButtonSpec::new(
                format!("{letter}."),
                UiAction::Answer(letter),
                center,
                Vec2::new(250.0, 70.0),
            )
            .colors(LIGHT_BLUE, OPTION_HOVER),
            Screen::Game,
        );
    }
}

/// Writes only on change so unchanged labels are not re-laid out every frame.
fn set_text(text: &mut Mut<Text2d>, value: String) {
    if text.0 != value {
        text.0 = value;
    }
}

fn update_hud(
    session: Res<GameSession>,
    mut timer: Query<(&mut Text2d, &mut TextColor), With<TimerText>>,
    mut prize: Query<&mut Text2d, (With<PrizeText>, Without<TimerText>)>,
    mut number: Query<
        &mut Text2d,
        (With<QuestionNumberText>, Without<TimerText>, Without<PrizeText>),
    >,
) {
    let secs = session.time_left();
    for (mut txt, mut col) in timer.iter_mut() {
        set_text(&mut txt, format!("Time: {secs}"));
        let color = if secs <= HURRY_SECONDS {
            TIMER_HURRY
        } else {
            Color::WHITE
        };
        if col.0 != color {
            col.0 = color;
        }
    }

    // After the last answer the index runs past the ladder; keep showing the top rung.
    let at_stake = session
        .prize_at_stake()
        .unwrap_or_else(|| session.won_amount());
    for mut txt in prize.iter_mut() {
        set_text(&mut txt, format!("Prize: {}", format_prize(at_stake)));
    }

    let shown = (session.current_index() + 1).min(QUESTIONS_PER_GAME);
    for mut txt in number.iter_mut() {
        set_text(&mut txt, format!("Question {shown}/{QUESTIONS_PER_GAME}"));
    }
}

fn update_question(
    session: Res<GameSession>,
    mut question: Query<&mut Text2d, With<QuestionText>>,
    buttons: Query<(&QuizButton, &Children)>,
    mut labels: Query<&mut Text2d, (With<ButtonLabel>, Without<QuestionText>)>,
) {
    let Some(current) = session.current_question() else {
        return;
    };

    for mut txt in question.iter_mut() {
        set_text(&mut txt, current.text.clone());
    }

    for (button, children) in buttons.iter() {
        let UiAction::Answer(letter) = button.action else {
            continue;
        };
        let mut iter = labels.iter_many_mut(children.iter());
        while let Some(mut txt) = iter.fetch_next() {
            set_text(&mut txt, format!("{letter}. {}", current.option(letter)));
        }
    }
}
