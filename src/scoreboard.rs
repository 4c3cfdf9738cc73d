//! Optional MySQL persistence of finished sessions (`scoreboard` feature).
//!
//! Set `DATABASE_URL` to enable it. Nothing here can fail the game: every
//! database error is logged and dropped.

use std::sync::Arc;

use bevy::prelude::*;
use sqlx::{mysql::MySqlPoolOptions, MySqlPool};
use tokio::{runtime::Runtime, sync::Mutex};

use crate::{
    screen::Screen,
    session::{EndReason, GameSession, Outcome},
};

const DATABASE_VAR: &str = "DATABASE_URL";

const CREATE_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS kbc_results (
        id INT AUTO_INCREMENT PRIMARY KEY,
        session_id VARCHAR(36) NOT NULL,
        won BOOLEAN NOT NULL,
        won_amount BIGINT UNSIGNED NOT NULL,
        answered INT NOT NULL,
        end_reason VARCHAR(16) NOT NULL,
        played_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
    )
"#;

const INSERT_RESULT: &str = "INSERT INTO kbc_results \
    (session_id, won, won_amount, answered, end_reason) VALUES (?, ?, ?, ?, ?)";

#[derive(Resource, Default)]
struct DbPool(Arc<Mutex<Option<MySqlPool>>>);

#[derive(Resource)]
struct TokioRuntime(Runtime);

pub struct ScoreboardPlugin;

impl Plugin for ScoreboardPlugin {
    fn build(&self, app: &mut App) {
        let runtime = match Runtime::new() {
            Ok(runtime) => runtime,
            Err(e) => {
                warn!("Could not start the score runtime, scores won't be saved: {}", e);
                return;
            }
        };

        app.init_resource::<DbPool>()
            .insert_resource(TokioRuntime(runtime))
            .add_systems(Startup, setup_db)
            .add_systems(OnEnter(Screen::Results), record_result);
    }
}

fn reason_label(reason: EndReason) -> &'static str {
    match reason {
        EndReason::AllCorrect => "all_correct",
        EndReason::WrongAnswer => "wrong_answer",
        EndReason::TimeUp => "time_up",
    }
}

/// Opens the pool and makes sure the results table exists.
async fn connect(url: &str) -> Result<MySqlPool, sqlx::Error> {
    let pool = MySqlPoolOptions::new().max_connections(2).connect(url).await?;
    sqlx::query(CREATE_TABLE).execute(&pool).await?;
    Ok(pool)
}

async fn insert_result(
    pool: &MySqlPool,
    session_id: &str,
    outcome: Outcome,
) -> Result<(), sqlx::Error> {
    sqlx::query(INSERT_RESULT)
        .bind(session_id)
        .bind(outcome.won)
        .bind(outcome.won_amount)
        .bind(outcome.answered as i32)
        .bind(reason_label(outcome.reason))
        .execute(pool)
        .await?;
    Ok(())
}

fn setup_db(db_pool: Res<DbPool>, runtime: Res<TokioRuntime>) {
    let Ok(url) = std::env::var(DATABASE_VAR) else {
        info!("{} not set, results stay local", DATABASE_VAR);
        return;
    };
    let slot = db_pool.0.clone();

    runtime.0.spawn(async move {
        match connect(&url).await {
            Ok(pool) => {
                info!("Scoreboard ready");
                *slot.lock().await = Some(pool);
            }
            Err(e) => warn!("Scoreboard unavailable, results won't be saved: {}", e),
        }
    });
}

fn record_result(
    session: Option<Res<GameSession>>,
    db_pool: Res<DbPool>,
    runtime: Res<TokioRuntime>,
) {
    let Some(session) = session else {
        return;
    };
    let Some(outcome) = session.outcome() else {
        return;
    };

    let slot = db_pool.0.clone();
    let session_id = session.id().to_string();

    runtime.0.spawn(async move {
        let Some(pool) = slot.lock().await.clone() else {
            return;
        };
        if let Err(e) = insert_result(&pool, &session_id, outcome).await {
            warn!("Failed to save session {}: {}", session_id, e);
        }
    });
}
