use actix::prelude::*;
use chrono::{Duration, Utc};
use polls_server::{
    db::{
        self,
        choice::{Choice, ChoicesForQuestion, CreateChoice},
        question::{CreateQuestion, Question, QuestionId},
        DbExecutor,
    },
    server,
    span::SpanMessage,
};
use sqlx::{sqlite::SqliteConnectOptions, SqlitePool};
use std::str::FromStr;
use tracing::debug;

/// A freshly migrated private database registered as the `DbExecutor` of
/// the current actix system. Every `sqlite::memory:` options value names its
/// own database, so tests never see each other's rows.
pub struct IntegrationTestDb {
    pool: SqlitePool,
}

impl IntegrationTestDb {
    pub async fn new() -> Self {
        let connect_options = SqliteConnectOptions::from_str("sqlite::memory:").unwrap();
        let pool = db::new_pool_with(connect_options).await.unwrap();
        debug!("Migrating test db");
        db::migrate(&pool).await.unwrap();
        server::register_db_actor(pool.clone());

        Self { pool }
    }

    pub fn pool(&self) -> SqlitePool {
        self.pool.clone()
    }

    /// Creates a question published `days` from now, negative for the past.
    pub async fn create_question(&self, question_text: &str, days: i64) -> Question {
        DbExecutor::from_registry()
            .send(SpanMessage::new(CreateQuestion {
                question_text: question_text.to_owned(),
                pub_date: Utc::now() + Duration::days(days),
            }))
            .await
            .unwrap()
            .unwrap()
    }

    pub async fn create_choice(&self, question: &Question, choice_text: &str) -> Choice {
        DbExecutor::from_registry()
            .send(SpanMessage::new(CreateChoice {
                question_id: question.id,
                choice_text: choice_text.to_owned(),
            }))
            .await
            .unwrap()
            .unwrap()
    }

    pub async fn choices(&self, question_id: QuestionId) -> Vec<Choice> {
        DbExecutor::from_registry()
            .send(SpanMessage::new(ChoicesForQuestion(question_id)))
            .await
            .unwrap()
            .unwrap()
    }
}
