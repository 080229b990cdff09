//! Paths of the polls pages. Routing in `server` and links in `templates`
//! both go through here.

use crate::db::question::QuestionId;

pub const SCOPE: &str = "/polls";

pub fn index() -> String {
    format!("{}/", SCOPE)
}

pub fn detail(question_id: QuestionId) -> String {
    format!("{}/{}/", SCOPE, question_id)
}

pub fn results(question_id: QuestionId) -> String {
    format!("{}/{}/results/", SCOPE, question_id)
}

pub fn vote(question_id: QuestionId) -> String {
    format!("{}/{}/vote/", SCOPE, question_id)
}
