use crate::{
    db::{
        choice::{AddVote, Choice, ChoiceId, ChoicesForQuestion},
        question::{LatestPublishedQuestions, PublishedQuestionById, Question, QuestionById, QuestionId},
        DbExecutor,
    },
    error::Error,
    span::SpanMessage,
    templates::{DetailPage, IndexPage, ResultsPage, NO_CHOICE_SELECTED},
    urls,
};
use actix::prelude::*;
use actix_web::{http::header, web, HttpResponse};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use sqlx::types::Uuid;
use std::fmt::Display;
use tracing::{debug, instrument};

/// How many questions the index page lists.
pub const LATEST_QUESTION_LIMIT: i64 = 5;

#[derive(Debug, Deserialize)]
pub struct VoteForm {
    pub choice: Option<String>,
}

fn html(page: impl Display) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(page.to_string())
}

/// The newest questions published at `now`, newest first.
pub async fn latest_questions(now: DateTime<Utc>) -> Result<Vec<Question>, Error> {
    let questions = DbExecutor::from_registry()
        .send(SpanMessage::new(LatestPublishedQuestions {
            now,
            limit: LATEST_QUESTION_LIMIT,
        }))
        .await??;
    Ok(questions)
}

async fn published_question(id: QuestionId, now: DateTime<Utc>) -> Result<Question, Error> {
    DbExecutor::from_registry()
        .send(SpanMessage::new(PublishedQuestionById { id, now }))
        .await??
        .ok_or(Error::NotFound)
}

async fn choices_for(question_id: QuestionId) -> Result<Vec<Choice>, Error> {
    let choices = DbExecutor::from_registry()
        .send(SpanMessage::new(ChoicesForQuestion(question_id)))
        .await??;
    Ok(choices)
}

#[instrument]
pub async fn index() -> Result<HttpResponse, Error> {
    let latest_question_list = latest_questions(Utc::now()).await?;
    Ok(html(IndexPage {
        latest_question_list: &latest_question_list,
    }))
}

#[instrument]
pub async fn detail(question_id: web::Path<Uuid>) -> Result<HttpResponse, Error> {
    let question = published_question(QuestionId(question_id.into_inner()), Utc::now()).await?;
    let choices = choices_for(question.id).await?;
    Ok(html(DetailPage {
        question: &question,
        choices: &choices,
        error_message: None,
    }))
}

#[instrument]
pub async fn results(question_id: web::Path<Uuid>) -> Result<HttpResponse, Error> {
    let question = DbExecutor::from_registry()
        .send(SpanMessage::new(QuestionById(QuestionId(question_id.into_inner()))))
        .await??
        .ok_or(Error::NotFound)?;
    let choices = choices_for(question.id).await?;
    Ok(html(ResultsPage {
        question: &question,
        choices: &choices,
    }))
}

#[instrument(skip(form))]
pub async fn vote(
    question_id: web::Path<Uuid>,
    form: Option<web::Form<VoteForm>>,
) -> Result<HttpResponse, Error> {
    let question = published_question(QuestionId(question_id.into_inner()), Utc::now()).await?;
    let choice_id = form
        .and_then(|form| form.into_inner().choice)
        .and_then(|choice| choice.parse::<ChoiceId>().ok());

    let voted = match choice_id {
        Some(choice_id) => {
            DbExecutor::from_registry()
                .send(SpanMessage::new(AddVote {
                    question_id: question.id,
                    choice_id,
                }))
                .await??
        }
        None => None,
    };

    match voted {
        Some(_) => Ok(HttpResponse::Found()
            .insert_header((header::LOCATION, urls::results(question.id)))
            .finish()),
        None => {
            debug!("No valid choice submitted, redisplaying the voting form");
            let choices = choices_for(question.id).await?;
            Ok(html(DetailPage {
                question: &question,
                choices: &choices,
                error_message: Some(NO_CHOICE_SELECTED),
            }))
        }
    }
}
