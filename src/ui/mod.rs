//! Everything drawn on screen. None of it feeds back into game rules except
//! through [`UiAction`](crate::screen::UiAction) events.

use bevy::{prelude::*, window::PrimaryWindow};

use crate::screen::Screen;

pub mod button;
pub mod game;
pub mod menu;
pub mod results;

pub const WINDOW_WIDTH: f32 = 800.0;
pub const WINDOW_HEIGHT: f32 = 600.0;

// COLORS
pub const DARK_BLUE: Color = Color::srgb(0.0, 0.0, 0.5);
pub const PURPLE: Color = Color::srgb(0.5, 0.0, 0.5);
pub const GOLD: Color = Color::srgb(1.0, 0.84, 0.0);
pub const LIGHT_BLUE: Color = Color::srgb(0.0, 0.4, 0.8);
pub const OPTION_HOVER: Color = Color::srgb(0.39, 0.59, 1.0);
pub const GREEN: Color = Color::srgb(0.0, 0.6, 0.0);
pub const RED: Color = Color::srgb(0.8, 0.0, 0.0);
pub const RED_HOVER: Color = Color::srgb(1.0, 0.2, 0.2);
pub const TIMER_HURRY: Color = Color::srgb(1.0, 0.3, 0.3);

// Font sizes
pub const TITLE_FONT: f32 = 48.0;
pub const LARGE_FONT: f32 = 32.0;
pub const MEDIUM_FONT: f32 = 24.0;
pub const SMALL_FONT: f32 = 20.0;

/// Cursor position in world space, `None` when outside the window.
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct CursorWorld(pub Option<Vec2>);

#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct PointerSet;

pub struct PresentationPlugin;

impl Plugin for PresentationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CursorWorld>()
            .insert_resource(ClearColor(PURPLE))
            .add_systems(Startup, spawn_camera)
            .add_systems(
                Update,
                (
                    track_cursor.in_set(PointerSet),
                    paint_background.run_if(state_changed::<Screen>),
                ),
            )
            .add_plugins((
                button::ButtonPlugin,
                menu::MainMenuPlugin,
                game::GameScreenPlugin,
                results::ResultScreenPlugin,
            ));
    }
}

fn spawn_camera(mut cmd: Commands) {
    cmd.spawn(Camera2d);
}

fn paint_background(screen: Res<State<Screen>>, mut clear: ResMut<ClearColor>) {
    clear.0 = match screen.get() {
        Screen::MainMenu => PURPLE,
        Screen::Game | Screen::Results => DARK_BLUE,
    };
}

fn track_cursor(
    windows: Query<&Window, With<PrimaryWindow>>,
    cam: Query<(&Camera, &GlobalTransform)>,
    mut cursor: ResMut<CursorWorld>,
) {
    cursor.0 = None;

    let Ok(win) = windows.get_single() else {
        return;
    };
    let Ok((camera, cam_t)) = cam.get_single() else {
        return;
    };
    let Some(pos) = win.cursor_position() else {
        return;
    };
    cursor.0 = camera.viewport_to_world_2d(cam_t, pos).ok();
}

/// Converts a point given in window coordinates (origin top-left, y down)
/// into world coordinates for the centred 2D camera.
pub fn screen_point(x: f32, y: f32) -> Vec3 {
    Vec3::new(x - WINDOW_WIDTH / 2.0, WINDOW_HEIGHT / 2.0 - y, 0.0)
}

/// `Rs. 1,250,000`
pub fn format_prize(amount: u64) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("Rs. {grouped}")
}
