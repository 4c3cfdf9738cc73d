use bevy::{
    audio::{PlaybackMode, Volume},
    prelude::*,
};

use crate::{
    config::GameConfig,
    screen::{GameCue, Screen},
};

const MAIN_THEME: &str = "main_theme.mp3";
const TICK_TOCK: &str = "tick_tock.mp3";
const CORRECT_ANSWER: &str = "correct_answer.mp3";
const WRONG_ANSWER: &str = "wrong_answer.mp3";
const WIN_SOUND: &str = "win_sound.mp3";
const LOSE_SOUND: &str = "lose_sound.mp3";

/// Sounds found on disk at startup. A missing file stays `None` and is simply not played.
#[derive(Resource, Debug, Default)]
pub struct GameSounds {
    main_theme: Option<Handle<AudioSource>>,
    tick_tock: Option<Handle<AudioSource>>,
    correct: Option<Handle<AudioSource>>,
    wrong: Option<Handle<AudioSource>>,
    win: Option<Handle<AudioSource>>,
    lose: Option<Handle<AudioSource>>,
    pub degraded: bool,
}

#[derive(Component)]
struct BgMusic;

pub struct SoundPlugin;

impl Plugin for SoundPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<GameSounds>()
            .add_systems(PreStartup, setup_audio)
            .add_systems(Update, (keep_music_playing, handle_cues));
    }
}

fn setup_audio(mut cmd: Commands, asset_server: Res<AssetServer>, config: Res<GameConfig>) {
    let load = |name: &str| {
        config
            .optional_asset(name)
            .map(|path| asset_server.load::<AudioSource>(path))
    };

    let mut sounds = GameSounds {
        main_theme: load(MAIN_THEME),
        tick_tock: load(TICK_TOCK),
        correct: load(CORRECT_ANSWER),
        wrong: load(WRONG_ANSWER),
        win: load(WIN_SOUND),
        lose: load(LOSE_SOUND),
        degraded: false,
    };
    sounds.degraded = [
        &sounds.main_theme,
        &sounds.tick_tock,
        &sounds.correct,
        &sounds.wrong,
        &sounds.win,
        &sounds.lose,
    ]
    .iter()
    .any(|h| h.is_none());

    if sounds.degraded {
        info!(
            "Some sounds are missing from {}, continuing without them",
            config.assets_dir.display()
        );
    }
    cmd.insert_resource(sounds);
}

/// Keeps the current screen's loop playing. Music entities are scoped to their
/// screen, so a transition despawns the old loop and the next frame starts the new one.
fn keep_music_playing(
    mut cmd: Commands,
    screen: Res<State<Screen>>,
    playing: Query<(), With<BgMusic>>,
    sounds: Res<GameSounds>,
) {
    if !playing.is_empty() {
        return;
    }

    let track = match screen.get() {
        Screen::MainMenu => sounds.main_theme.as_ref(),
        Screen::Game => sounds.tick_tock.as_ref(),
        Screen::Results => None,
    };
    let Some(source) = track else { return };

    cmd.spawn((
        AudioPlayer::new(source.clone()),
        PlaybackSettings {
            mode: PlaybackMode::Loop,
            volume: Volume::new(0.8),
            ..default()
        },
        BgMusic,
        StateScoped(*screen.get()),
    ));
}

fn handle_cues(mut cmd: Commands, mut cues: EventReader<GameCue>, sounds: Res<GameSounds>) {
    for cue in cues.read() {
        let clips = match cue {
            GameCue::Correct => vec![&sounds.correct],
            GameCue::Wrong => vec![&sounds.wrong, &sounds.lose],
            GameCue::Won => vec![&sounds.win],
            GameCue::TimeUp => vec![&sounds.lose],
            GameCue::StartRejected => vec![&sounds.wrong],
        };

        for source in clips.into_iter().flatten() {
            cmd.spawn((
                AudioPlayer::new(source.clone()),
                PlaybackSettings {
                    mode: PlaybackMode::Despawn,
                    volume: Volume::new(1.0),
                    ..default()
                },
            ));
        }
    }
}
