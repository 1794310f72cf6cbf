// src/main.rs

use std::net::SocketAddr;
use std::sync::Arc;

use chrono::Utc;
use dotenvy::dotenv;
use lexmaturity::config::Config;
use lexmaturity::error::AppError;
use lexmaturity::models::quiz::{AnswerOption, Question, QuestionType, Quiz};
use lexmaturity::routes;
use lexmaturity::state::AppState;
use lexmaturity::store::{EntityStore, SqliteStore};
use lexmaturity::summary::OpenAiSummarizer;
use sqlx::sqlite::SqlitePoolOptions;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};
use uuid::Uuid;

#[tokio::main]
async fn main() {
    // Load .env file (if present)
    dotenv().ok();

    // Load configuration from environment
    let config = Config::from_env();

    let file_appender = tracing_appender::rolling::daily("logs", "app.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let env_filter = EnvFilter::new(&config.rust_log);
    let stdout_layer = fmt::layer().with_writer(std::io::stdout).with_target(false);
    let file_layer = fmt::layer().with_writer(non_blocking).with_ansi(false);

    // Initialize Tracing (Logging)
    tracing_subscriber::registry()
        .with(env_filter)
        .with(stdout_layer)
        .with(file_layer)
        .init();

    // Open the local database (the file is created on first run)
    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await
        .expect("Failed to open the assessment database");

    tracing::info!("Database connected...");

    // Run Migrations Automatically
    tracing::info!("Running migrations...");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Migrations applied successfully.");

    let store: Arc<dyn EntityStore> = Arc::new(SqliteStore::new(pool));

    // Seed the demonstration assessment on first run
    if let Err(e) = seed_demo_assessment(&store).await {
        tracing::error!("Failed to seed demo assessment: {:?}", e);
    }

    let summarizer = Arc::new(OpenAiSummarizer::from_config(&config));

    // Create AppState
    let state = AppState::new(store, summarizer);

    // Create the Axum application router
    let app = routes::create_router(state);

    // Bind to the listening address
    let addr = SocketAddr::from(([0, 0, 0, 0], 3000));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();

    // Start the server
    axum::serve(listener, app).await.unwrap();
}

/// Seeds one demonstration assessment when the store is empty, so a
/// fresh install has something to open in every view.
async fn seed_demo_assessment(store: &Arc<dyn EntityStore>) -> Result<(), AppError> {
    if !store.list_quizzes().await?.is_empty() {
        return Ok(());
    }

    tracing::info!("Seeding demonstration assessment...");

    let quiz = Quiz {
        id: Uuid::new_v4().to_string(),
        title: "AI Maturity Assessment".to_string(),
        description: "Evaluate your firm's readiness for artificial intelligence implementation."
            .to_string(),
        created_at: Utc::now(),
    };

    let questions = vec![
        demo_question(
            &quiz.id,
            1,
            "How does your firm currently manage case documents?",
            &[
                ("Paper only", 0),
                ("Local server files", 1),
                ("Cloud-based document management", 3),
                ("AI-assisted tagging and indexing", 5),
            ],
        ),
        demo_question(
            &quiz.id,
            2,
            "Do you use generative AI for legal research?",
            &[
                ("No, banned by policy", 0),
                ("Informally/Individuals only", 2),
                ("Yes, with standard tools", 4),
                ("Yes, with firm-approved secure models", 5),
            ],
        ),
    ];

    store.save_quiz(&quiz).await?;
    store.save_questions(&quiz.id, &questions).await?;
    tracing::info!("Demo assessment '{}' created.", quiz.title);
    Ok(())
}

fn demo_question(quiz_id: &str, position: i64, text: &str, options: &[(&str, i64)]) -> Question {
    Question {
        id: Uuid::new_v4().to_string(),
        quiz_id: quiz_id.to_string(),
        text: text.to_string(),
        question_type: QuestionType::Single,
        position,
        options: options
            .iter()
            .map(|(text, score)| AnswerOption {
                id: Uuid::new_v4().to_string(),
                text: (*text).to_string(),
                score: *score,
            })
            .collect(),
    }
}
