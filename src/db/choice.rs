use super::{question::QuestionId, DbExecutor};
use crate::async_message_handler_with_span;
use actix::prelude::*;
use color_eyre::eyre::Report;
use serde::{Deserialize, Serialize};
use sqlx::{types::Uuid, SqlitePool};
use std::{fmt, str::FromStr};
use tracing::{debug, info, instrument};

#[derive(Clone, Copy, Hash, PartialEq, Eq, Debug, Deserialize, Serialize, sqlx::Type)]
#[sqlx(transparent)]
pub struct ChoiceId(pub Uuid);

impl ChoiceId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ChoiceId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ChoiceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.hyphenated().fmt(f)
    }
}

impl FromStr for ChoiceId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s.trim()).map(Self)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, sqlx::FromRow)]
pub struct Choice {
    pub id: ChoiceId,
    pub question_id: QuestionId,
    pub choice_text: String,
    pub votes: i64,
}

impl fmt::Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.choice_text)
    }
}

#[derive(Message, Clone, Debug)]
#[rtype(result = "Result<Vec<Choice>, Report>")]
pub struct ChoicesForQuestion(pub QuestionId);

async_message_handler_with_span! {
    impl AsyncSpanHandler<ChoicesForQuestion> for DbExecutor {
        type State = SqlitePool;

        fn state(&mut self) -> SqlitePool {
            self.pool()
        }

        #[instrument(skip(pool))]
        async fn handle(pool: SqlitePool, msg: ChoicesForQuestion) -> Result<Vec<Choice>, Report> {
            let question_id = msg.0;
            debug!("Retrieving choices for question {id}", id = question_id);
            let choices = sqlx::query_as::<_, Choice>(
                r#"
                SELECT id, question_id, choice_text, votes FROM choices
                WHERE question_id = ?
                ORDER BY rowid
                "#,
            )
            .bind(question_id)
            .fetch_all(&pool)
            .await?;

            Ok(choices)
        }
    }
}

#[derive(Message, Clone, Debug)]
#[rtype(result = "Result<Choice, Report>")]
pub struct CreateChoice {
    pub question_id: QuestionId,
    pub choice_text: String,
}

async_message_handler_with_span! {
    impl AsyncSpanHandler<CreateChoice> for DbExecutor {
        type State = SqlitePool;

        fn state(&mut self) -> SqlitePool {
            self.pool()
        }

        async fn handle(pool: SqlitePool, msg: CreateChoice) -> Result<Choice, Report> {
            let choice = Choice {
                id: ChoiceId::new(),
                question_id: msg.question_id,
                choice_text: msg.choice_text,
                votes: 0,
            };
            debug!("Creating choice {id} for question {question}", id = choice.id, question = choice.question_id);
            sqlx::query("INSERT INTO choices (id, question_id, choice_text, votes) VALUES (?, ?, ?, ?)")
                .bind(choice.id)
                .bind(choice.question_id)
                .bind(&choice.choice_text)
                .bind(choice.votes)
                .execute(&pool)
                .await?;

            Ok(choice)
        }
    }
}

// Voting

/// Counts one vote for `choice_id`. Resolves to `None` when the choice does
/// not belong to `question_id`, in which case nothing is written.
#[derive(Message, Clone, Debug)]
#[rtype(result = "Result<Option<Choice>, Report>")]
pub struct AddVote {
    pub question_id: QuestionId,
    pub choice_id: ChoiceId,
}

async_message_handler_with_span! {
    impl AsyncSpanHandler<AddVote> for DbExecutor {
        type State = SqlitePool;

        fn state(&mut self) -> SqlitePool {
            self.pool()
        }

        #[instrument(skip(pool))]
        async fn handle(pool: SqlitePool, msg: AddVote) -> Result<Option<Choice>, Report> {
            let choice = sqlx::query_as::<_, Choice>(
                r#"
                UPDATE choices SET votes = votes + 1
                WHERE id = ? AND question_id = ?
                RETURNING id, question_id, choice_text, votes
                "#,
            )
            .bind(msg.choice_id)
            .bind(msg.question_id)
            .fetch_optional(&pool)
            .await?;

            match &choice {
                Some(choice) => info!("Vote recorded, choice now has {votes} votes", votes = choice.votes),
                None => debug!("Choice does not belong to question, no vote recorded"),
            }
            Ok(choice)
        }
    }
}
