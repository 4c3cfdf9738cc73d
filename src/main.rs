//! KAUN BANEGA CROREPATI
//! Fifteen questions, thirty seconds each.

use bevy::{prelude::*, window::WindowMode};
use crorepati::{
    ui::{WINDOW_HEIGHT, WINDOW_WIDTH},
    GameConfig, PresentationPlugin, QuestionBank, QuizCorePlugin, SoundPlugin,
    QUESTIONS_PER_GAME,
};

fn main() -> AppExit {
    // Load env vars
    let _ = dotenvy::dotenv();
    let config = GameConfig::from_env();

    let mut app = App::new();
    app.add_plugins(
        DefaultPlugins
            .set(WindowPlugin {
                primary_window: Some(Window {
                    title: "Kaun Banega Crorepati".into(),
                    resolution: (WINDOW_WIDTH, WINDOW_HEIGHT).into(),
                    resizable: false,
                    mode: if config.fullscreen {
                        WindowMode::BorderlessFullscreen(MonitorSelection::Primary)
                    } else {
                        WindowMode::Windowed
                    },
                    ..default()
                }),
                ..default()
            })
            .set(AssetPlugin {
                file_path: config.assets_dir.to_string_lossy().into_owned(),
                ..default()
            }),
    );

    // No window is opened until `run`, so a bad question file never shows a half-built game.
    let bank = match QuestionBank::load(&config.questions_path) {
        Ok(bank) => bank,
        Err(e) => {
            error!("Failed to load questions: {}", e);
            return AppExit::error();
        }
    };
    if bank.len() < QUESTIONS_PER_GAME {
        warn!(
            "Only {} questions in {}, a game needs {}",
            bank.len(),
            config.questions_path.display(),
            QUESTIONS_PER_GAME
        );
    } else {
        info!(
            "Loaded {} questions from {}",
            bank.len(),
            config.questions_path.display()
        );
    }

    app.insert_resource(bank)
        .insert_resource(config)
        .add_plugins((QuizCorePlugin, PresentationPlugin, SoundPlugin));

    #[cfg(feature = "scoreboard")]
    app.add_plugins(crorepati::scoreboard::ScoreboardPlugin);

    app.run()
}
