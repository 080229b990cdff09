use super::DbExecutor;
use crate::async_message_handler_with_span;
use actix::prelude::*;
use chrono::{DateTime, Duration, Utc};
use color_eyre::eyre::Report;
use serde::{Deserialize, Serialize};
use sqlx::{types::Uuid, SqlitePool};
use std::fmt;
use tracing::{debug, instrument};

#[derive(Clone, Copy, Hash, PartialEq, Eq, Debug, Deserialize, Serialize, sqlx::Type)]
#[sqlx(transparent)]
pub struct QuestionId(pub Uuid);

impl QuestionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for QuestionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.hyphenated().fmt(f)
    }
}

#[derive(Clone, Debug, PartialEq, sqlx::FromRow)]
pub struct Question {
    pub id: QuestionId,
    pub question_text: String,
    pub pub_date: DateTime<Utc>,
}

impl Question {
    pub fn is_published_at(&self, now: DateTime<Utc>) -> bool {
        self.pub_date <= now
    }

    pub fn was_published_recently(&self) -> bool {
        self.was_published_recently_at(Utc::now())
    }

    /// Published within the day leading up to `now`, both ends inclusive.
    pub fn was_published_recently_at(&self, now: DateTime<Utc>) -> bool {
        now - Duration::days(1) <= self.pub_date && self.is_published_at(now)
    }
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.question_text)
    }
}

// Listing

#[derive(Message, Clone, Debug)]
#[rtype(result = "Result<Vec<Question>, Report>")]
pub struct LatestPublishedQuestions {
    pub now: DateTime<Utc>,
    pub limit: i64,
}

async_message_handler_with_span! {
    impl AsyncSpanHandler<LatestPublishedQuestions> for DbExecutor {
        type State = SqlitePool;

        fn state(&mut self) -> SqlitePool {
            self.pool()
        }

        #[instrument(skip(pool))]
        async fn handle(pool: SqlitePool, msg: LatestPublishedQuestions) -> Result<Vec<Question>, Report> {
            debug!("Retrieving latest published questions");
            let questions = sqlx::query_as::<_, Question>(
                r#"
                SELECT id, question_text, pub_date FROM questions
                WHERE pub_date <= ?
                ORDER BY pub_date DESC, rowid DESC
                LIMIT ?
                "#,
            )
            .bind(msg.now)
            .bind(msg.limit)
            .fetch_all(&pool)
            .await?;

            Ok(questions)
        }
    }
}

// Find question

#[derive(Message, Clone, Debug)]
#[rtype(result = "Result<Option<Question>, Report>")]
pub struct QuestionById(pub QuestionId);

async_message_handler_with_span! {
    impl AsyncSpanHandler<QuestionById> for DbExecutor {
        type State = SqlitePool;

        fn state(&mut self) -> SqlitePool {
            self.pool()
        }

        async fn handle(pool: SqlitePool, msg: QuestionById) -> Result<Option<Question>, Report> {
            let question_id = msg.0;
            debug!("Retrieving question by id {id}", id = question_id);
            let question = sqlx::query_as::<_, Question>(
                "SELECT id, question_text, pub_date FROM questions WHERE id = ?",
            )
            .bind(question_id)
            .fetch_optional(&pool)
            .await?;

            Ok(question)
        }
    }
}

#[derive(Message, Clone, Debug)]
#[rtype(result = "Result<Option<Question>, Report>")]
pub struct PublishedQuestionById {
    pub id: QuestionId,
    pub now: DateTime<Utc>,
}

async_message_handler_with_span! {
    impl AsyncSpanHandler<PublishedQuestionById> for DbExecutor {
        type State = SqlitePool;

        fn state(&mut self) -> SqlitePool {
            self.pool()
        }

        async fn handle(pool: SqlitePool, msg: PublishedQuestionById) -> Result<Option<Question>, Report> {
            debug!("Retrieving published question by id {id}", id = msg.id);
            let question = sqlx::query_as::<_, Question>(
                "SELECT id, question_text, pub_date FROM questions WHERE id = ? AND pub_date <= ?",
            )
            .bind(msg.id)
            .bind(msg.now)
            .fetch_optional(&pool)
            .await?;

            Ok(question)
        }
    }
}

// Create question

#[derive(Message, Clone, Debug)]
#[rtype(result = "Result<Question, Report>")]
pub struct CreateQuestion {
    pub question_text: String,
    pub pub_date: DateTime<Utc>,
}

async_message_handler_with_span! {
    impl AsyncSpanHandler<CreateQuestion> for DbExecutor {
        type State = SqlitePool;

        fn state(&mut self) -> SqlitePool {
            self.pool()
        }

        #[instrument(skip(pool))]
        async fn handle(pool: SqlitePool, msg: CreateQuestion) -> Result<Question, Report> {
            let question = Question {
                id: QuestionId::new(),
                question_text: msg.question_text,
                pub_date: msg.pub_date,
            };
            debug!("Creating question {id}", id = question.id);
            sqlx::query("INSERT INTO questions (id, question_text, pub_date) VALUES (?, ?, ?)")
                .bind(question.id)
                .bind(&question.question_text)
                .bind(question.pub_date)
                .execute(&pool)
                .await?;

            Ok(question)
        }
    }
}
