use bevy::prelude::*;
use rand::Rng;

use super::{
    button::{spawn_button, ButtonSpec},
    format_prize, screen_point, GOLD, LARGE_FONT, MEDIUM_FONT, RED, RED_HOVER, SMALL_FONT,
    WINDOW_HEIGHT, WINDOW_WIDTH,
};
use crate::{
    screen::{Screen, UiAction},
    session::{EndReason, GameSession, Outcome},
};

const CONFETTI_BURST: usize = 100;
// 0.1 px/frame² at 60 fps
const GRAVITY: f32 = 360.0;
const CONFETTI_COLORS: [Color; 6] = [
    Color::srgb(1.0, 0.0, 0.0),
    Color::srgb(0.0, 1.0, 0.0),
    Color::srgb(0.0, 0.0, 1.0),
    Color::srgb(1.0, 1.0, 0.0),
    Color::srgb(1.0, 0.0, 1.0),
    Color::srgb(0.0, 1.0, 1.0),
];

#[derive(Component)]
struct Confetti {
    vel: Vec2,
    spin: f32,
}

pub struct ResultScreenPlugin;

impl Plugin for ResultScreenPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(Screen::Results), setup_results)
            .add_systems(
                Update,
                (spray_confetti, animate_confetti).run_if(in_state(Screen::Results)),
            );
    }
}

fn headline(outcome: &Outcome) -> &'static str {
    if outcome.won {
        "Congratulations!"
    } else {
        "Game Over"
    }
}

fn message(outcome: &Outcome) -> &'static str {
    match outcome.reason {
        EndReason::AllCorrect => "You've reached the top prize!",
        _ if outcome.won_amount > 0 => "Better luck next time!",
        _ => "You didn't win any money this time.",
    }
}

fn setup_results(
    mut cmd: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut mats: ResMut<Assets<ColorMaterial>>,
    session: Option<Res<GameSession>>,
) {
    let outcome = session.and_then(|s| s.outcome()).unwrap_or(Outcome {
        won: false,
        won_amount: 0,
        answered: 0,
        reason: EndReason::WrongAnswer,
    });

    let mut text = |value: String, font_size: f32, color: Color, y: f32| {
        cmd.spawn((
            Text2d::new(value),
            TextFont {
                font_size,
                ..default()
            },
            TextColor(color),
            Transform::from_translation(screen_point(400.0, y).with_z(5.0)),
            StateScoped(Screen::Results),
        ));
    };

    text(headline(&outcome).into(), LARGE_FONT, GOLD, 120.0);
    if outcome.reason == EndReason::TimeUp {
        text("Time's up!".into(), SMALL_FONT, RED_HOVER, 160.0);
    }
    text(
        format!("You won: {}", format_prize(outcome.won_amount)),
        MEDIUM_FONT,
        Color::WHITE,
        200.0,
    );
    text(message(&outcome).into(), MEDIUM_FONT, Color::WHITE, 260.0);

    let size = Vec2::new(200.0, 60.0);
    spawn_button(
        &mut cmd,
        &mut meshes,
        &mut mats,
        ButtonSpec::new(
            "Play Again",
            UiAction::PlayAgain,
            screen_point(400.0, 380.0).with_z(5.0),
            size,
        ),
        Screen::Results,
    );
    spawn_button(
        &mut cmd,
        &mut meshes,
        &mut mats,
        ButtonSpec::new(
            "Exit",
            UiAction::Exit,
            screen_point(400.0, 480.0).with_z(5.0),
            size,
        )
        .colors(RED, RED_HOVER),
        Screen::Results,
    );
}

/// Throws a fresh burst whenever the previous one has fallen off screen.
fn spray_confetti(
    mut cmd: Commands,
    session: Option<Res<GameSession>>,
    confetti: Query<(), With<Confetti>>,
) {
    let won = session
        .and_then(|s| s.outcome())
        .is_some_and(|o| o.won);
    if !won || !confetti.is_empty() {
        return;
    }

    let mut rng = rand::rng();
    for _ in 0..CONFETTI_BURST {
        let x = rng.random_range(-WINDOW_WIDTH / 2.0..WINDOW_WIDTH / 2.0);
        let y = rng.random_range(-WINDOW_HEIGHT / 2.0..WINDOW_HEIGHT / 2.0);
        let size = rng.random_range(5.0..15.0);
        let color = CONFETTI_COLORS[rng.random_range(0..CONFETTI_COLORS.len())];

        cmd.spawn((
            Sprite::from_color(color, Vec2::splat(size)),
            Transform::from_xyz(x, y, 1.0)
                .with_rotation(Quat::from_rotation_z(rng.random_range(0.0..std::f32::consts::TAU))),
            Confetti {
                vel: Vec2::new(
                    rng.random_range(-180.0..180.0),
                    rng.random_range(240.0..480.0),
                ),
                spin: rng.random_range(-5.0..5.0),
            },
            StateScoped(Screen::Results),
        ));
    }
}

fn animate_confetti(
    mut cmd: Commands,
    time: Res<Time>,
    mut confetti: Query<(Entity, &mut Transform, &mut Confetti)>,
) {
    let dt = time.delta_secs();
    for (entity, mut t, mut c) in confetti.iter_mut() {
        c.vel.y -= GRAVITY * dt;
        t.translation.x += c.vel.x * dt;
        t.translation.y += c.vel.y * dt;
        t.rotate_z(c.spin * dt);

        if t.translation.y < -WINDOW_HEIGHT / 2.0 - 50.0 {
            cmd.entity(entity).despawn();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(won: bool, won_amount: u64, reason: EndReason) -> Outcome {
        Outcome {
            won,
            won_amount,
            answered: 0,
            reason,
        }
    }

    #[test]
    fn messages_follow_the_outcome() {
        let top = outcome(true, 10_000_000, EndReason::AllCorrect);
        assert_eq!(headline(&top), "Congratulations!");
        assert_eq!(message(&top), "You've reached the top prize!");

        let partial = outcome(false, 40_000, EndReason::TimeUp);
        assert_eq!(headline(&partial), "Game Over");
        assert_eq!(message(&partial), "Better luck next time!");

        let nothing = outcome(false, 0, EndReason::WrongAnswer);
        assert_eq!(message(&nothing), "You didn't win any money this time.");
    }
}
