use bevy::{color::Alpha, prelude::*};

use super::{
    button::{spawn_button, ButtonSpec},
    screen_point, GOLD, MEDIUM_FONT, RED, RED_HOVER, SMALL_FONT, TITLE_FONT,
};
use crate::{
    config::GameConfig,
    screen::{MenuNotice, Screen, UiAction},
};

const LOGO_FILE: &str = "logo.png";
const LOGO_SIZE: f32 = 150.0;
const LOGO_START_SCALE: f32 = 0.1;
// Per second; the entrance settles after roughly a third of a second.
const LOGO_GROW_RATE: f32 = 3.0;
const LOGO_FADE_RATE: f32 = 2.4;

#[derive(Component)]
struct Logo {
    scale: f32,
    alpha: f32,
}

#[derive(Component)]
struct NoticeText;

pub struct MainMenuPlugin;

impl Plugin for MainMenuPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(Screen::MainMenu), setup_main_menu)
            .add_systems(
                Update,
                (animate_logo, show_notice).run_if(in_state(Screen::MainMenu)),
            );
    }
}

fn setup_main_menu(
    mut cmd: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut mats: ResMut<Assets<ColorMaterial>>,
    asset_server: Res<AssetServer>,
    config: Res<GameConfig>,
    notice: Res<MenuNotice>,
) {
    // The first menu is entered before any startup system runs, so the logo is looked up here.
    // Repeated loads of the same path share one handle.
    let art = config
        .optional_asset(LOGO_FILE)
        .map(|path| asset_server.load::<Image>(path));

    let logo_at = screen_point(400.0, 120.0).with_z(5.0);
    let logo = Logo {
        scale: LOGO_START_SCALE,
        alpha: 0.0,
    };
    let start = Transform::from_translation(logo_at).with_scale(Vec3::splat(LOGO_START_SCALE));

    match art {
        Some(image) => {
            cmd.spawn((
                Sprite {
                    image,
                    custom_size: Some(Vec2::splat(LOGO_SIZE)),
                    color: Color::srgba(1.0, 1.0, 1.0, 0.0),
                    ..default()
                },
                start,
                logo,
                StateScoped(Screen::MainMenu),
            ));
        }
        None => {
            debug!("No {} found, drawing the title text instead", LOGO_FILE);
            cmd.spawn((
                Text2d::new("KAUN BANEGA CROREPATI"),
                TextFont {
                    font_size: TITLE_FONT,
                    ..default()
                },
                TextColor(GOLD.with_alpha(0.0)),
                start,
                logo,
                StateScoped(Screen::MainMenu),
            ));
        }
    }

    cmd.spawn((
        Text2d::new("Test Your Knowledge!"),
        TextFont {
            font_size: MEDIUM_FONT,
            ..default()
        },
        TextColor(Color::WHITE),
        Transform::from_translation(screen_point(400.0, 200.0)),
        StateScoped(Screen::MainMenu),
    ));

    let size = Vec2::new(200.0, 60.0);
    spawn_button(
        &mut cmd,
        &mut meshes,
        &mut mats,
        ButtonSpec::new("Start Game", UiAction::Start, screen_point(400.0, 330.0), size),
        Screen::MainMenu,
    );
    spawn_button(
        &mut cmd,
        &mut meshes,
        &mut mats,
        ButtonSpec::new("Exit", UiAction::Exit, screen_point(400.0, 430.0), size)
            .colors(RED, RED_HOVER),
        Screen::MainMenu,
    );

    cmd.spawn((
        Text2d::new(notice.0.clone().unwrap_or_default()),
        TextFont {
            font_size: SMALL_FONT,
            ..default()
        },
        TextColor(RED_HOVER),
        Transform::from_translation(screen_point(400.0, 500.0)),
        NoticeText,
        StateScoped(Screen::MainMenu),
    ));

    cmd.spawn((
        Text2d::new("KBC Quiz Game"),
        TextFont {
            font_size: SMALL_FONT,
            ..default()
        },
        TextColor(Color::WHITE),
        Transform::from_translation(screen_point(400.0, 570.0)),
        StateScoped(Screen::MainMenu),
    ));
}

fn animate_logo(
    time: Res<Time>,
    mut logos: Query<(
        &mut Logo,
        &mut Transform,
        Option<&mut Sprite>,
        Option<&mut TextColor>,
    )>,
) {
    let dt = time.delta_secs();
    for (mut logo, mut t, sprite, text_color) in logos.iter_mut() {
        if logo.scale >= 1.0 && logo.alpha >= 1.0 {
            continue;
        }
        logo.scale = (logo.scale + LOGO_GROW_RATE * dt).min(1.0);
        logo.alpha = (logo.alpha + LOGO_FADE_RATE * dt).min(1.0);

        t.scale = Vec3::splat(logo.scale);
        if let Some(mut sprite) = sprite {
            sprite.color.set_alpha(logo.alpha);
        }
        if let Some(mut color) = text_color {
            color.0.set_alpha(logo.alpha);
        }
    }
}

fn show_notice(notice: Res<MenuNotice>, mut texts: Query<&mut Text2d, With<NoticeText>>) {
    if !notice.is_changed() {
        return;
    }
    for mut text in texts.iter_mut() {
        text.0 = notice.0.clone().unwrap_or_default();
    }
}
