//! HTML pages. Each page is a plain struct holding what it shows and renders
//! itself through `Display`.

use crate::{
    db::{choice::Choice, question::Question},
    urls,
};
use actix_web::http::StatusCode;
use std::fmt::{self, Display, Formatter, Write};

pub const NO_POLLS_MESSAGE: &str = "No polls are available currently.";
pub const NO_CHOICE_SELECTED: &str = "You didn't select a Choice!";

/// HTML-escapes the wrapped text when displayed.
pub struct Escaped<'a>(pub &'a str);

impl Display for Escaped<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for c in self.0.chars() {
            match c {
                '<' => f.write_str("&lt;")?,
                '>' => f.write_str("&gt;")?,
                '&' => f.write_str("&amp;")?,
                '"' => f.write_str("&quot;")?,
                '\'' => f.write_str("&#x27;")?,
                c => f.write_char(c)?,
            }
        }
        Ok(())
    }
}

fn pluralize(count: i64) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}

fn header(f: &mut Formatter<'_>, title: &str) -> fmt::Result {
    writeln!(f, "<!DOCTYPE html>")?;
    writeln!(f, "<html>")?;
    writeln!(f, "<head>")?;
    writeln!(f, "<meta charset=\"utf-8\">")?;
    writeln!(f, "<title>{}</title>", Escaped(title))?;
    writeln!(f, "</head>")?;
    writeln!(f, "<body>")
}

fn footer(f: &mut Formatter<'_>) -> fmt::Result {
    writeln!(f, "</body>")?;
    writeln!(f, "</html>")
}

pub struct IndexPage<'a> {
    pub latest_question_list: &'a [Question],
}

impl Display for IndexPage<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        header(f, "Polls")?;
        if self.latest_question_list.is_empty() {
            writeln!(f, "<p>{}</p>", NO_POLLS_MESSAGE)?;
        } else {
            writeln!(f, "<ul>")?;
            for question in self.latest_question_list {
                writeln!(
                    f,
                    "<li><a href=\"{}\">{}</a></li>",
                    urls::detail(question.id),
                    Escaped(&question.question_text)
                )?;
            }
            writeln!(f, "</ul>")?;
        }
        footer(f)
    }
}

pub struct DetailPage<'a> {
    pub question: &'a Question,
    pub choices: &'a [Choice],
    pub error_message: Option<&'static str>,
}

impl Display for DetailPage<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let question = self.question;
        header(f, &question.question_text)?;
        writeln!(f, "<h1>{}</h1>", Escaped(&question.question_text))?;
        if let Some(error_message) = self.error_message {
            writeln!(f, "<p><strong>{}</strong></p>", error_message)?;
        }
        writeln!(
            f,
            "<form action=\"{}\" method=\"post\">",
            urls::vote(question.id)
        )?;
        for (counter, choice) in self.choices.iter().enumerate() {
            let input_id = format!("choice{}", counter + 1);
            writeln!(
                f,
                "<input type=\"radio\" name=\"choice\" id=\"{}\" value=\"{}\">",
                input_id, choice.id
            )?;
            writeln!(
                f,
                "<label for=\"{}\">{}</label><br>",
                input_id,
                Escaped(&choice.choice_text)
            )?;
        }
        writeln!(f, "<input type=\"submit\" value=\"Vote\">")?;
        writeln!(f, "</form>")?;
        footer(f)
    }
}

pub struct ResultsPage<'a> {
    pub question: &'a Question,
    pub choices: &'a [Choice],
}

impl Display for ResultsPage<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let question = self.question;
        header(f, &question.question_text)?;
        writeln!(f, "<h1>{}</h1>", Escaped(&question.question_text))?;
        writeln!(f, "<ul>")?;
        for choice in self.choices {
            writeln!(
                f,
                "<li>{} -- {} vote{}</li>",
                Escaped(&choice.choice_text),
                choice.votes,
                pluralize(choice.votes)
            )?;
        }
        writeln!(f, "</ul>")?;
        writeln!(
            f,
            "<a href=\"{}\">Vote again?</a>",
            urls::detail(question.id)
        )?;
        footer(f)
    }
}

pub struct ErrorPage {
    pub status: StatusCode,
}

impl Display for ErrorPage {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let reason = self.status.canonical_reason().unwrap_or("Error");
        let title = format!("{} {}", self.status.as_u16(), reason);
        header(f, &title)?;
        writeln!(f, "<h1>{}</h1>", Escaped(&title))?;
        footer(f)
    }
}
