//! Shape checks for API responses and status-to-text translation.

use serde_json::Value;
use std::fmt;

/// The full universe of review statuses and their display sentences.
const HOMEWORK_VERDICTS: [(&str, &str); 3] = [
    ("approved", "Работа проверена: ревьюеру всё понравилось. Ура!"),
    ("reviewing", "Работа взята на проверку ревьюером."),
    ("rejected", "Работа проверена: у ревьюера есть замечания."),
];

fn verdict_for(status: &str) -> Option<&'static str> {
    HOMEWORK_VERDICTS
        .iter()
        .find(|(code, _)| *code == status)
        .map(|(_, verdict)| *verdict)
}

#[derive(Debug)]
pub enum CheckError {
    /// The top-level response is not a JSON object.
    NotAnObject,
    /// The response object has no `homeworks` key.
    MissingHomeworks,
    /// The value under `homeworks` is not an array.
    HomeworksNotAList,
    /// The `homeworks` array is empty, nothing to inspect.
    NoHomeworks,
}

impl fmt::Display for CheckError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotAnObject => write!(f, "API response is not an object"),
            Self::MissingHomeworks => write!(f, "API response has no 'homeworks' key"),
            Self::HomeworksNotAList => write!(f, "'homeworks' is not a list"),
            Self::NoHomeworks => write!(f, "'homeworks' list is empty"),
        }
    }
}

impl std::error::Error for CheckError {}

#[derive(Debug)]
pub enum StatusError {
    /// A required field of the homework record is absent (or not a string).
    MissingField(&'static str),
    /// The record's status is not in the verdict table.
    UnknownStatus(String),
}

impl fmt::Display for StatusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingField(name) => write!(f, "homework record has no '{name}' field"),
            Self::UnknownStatus(status) => write!(f, "unrecognized homework status '{status}'"),
        }
    }
}

impl std::error::Error for StatusError {}

/// Check the response shape and pull out the most recent homework record.
pub fn check_response(response: &Value) -> Result<&Value, CheckError> {
    let Some(object) = response.as_object() else {
        return Err(CheckError::NotAnObject);
    };
    let Some(homeworks) = object.get("homeworks") else {
        return Err(CheckError::MissingHomeworks);
    };
    let Some(list) = homeworks.as_array() else {
        return Err(CheckError::HomeworksNotAList);
    };
    list.first().ok_or(CheckError::NoHomeworks)
}

/// Translate a homework record into the notification sentence.
pub fn parse_status(homework: &Value) -> Result<String, StatusError> {
    let record = homework
        .as_object()
        .ok_or(StatusError::MissingField("homework_name"))?;
    let name = record
        .get("homework_name")
        .and_then(Value::as_str)
        .ok_or(StatusError::MissingField("homework_name"))?;
    let status = record
        .get("status")
        .and_then(Value::as_str)
        .ok_or(StatusError::MissingField("status"))?;
    let verdict =
        verdict_for(status).ok_or_else(|| StatusError::UnknownStatus(status.to_string()))?;

    Ok(format!(
        "Изменился статус проверки работы \"{name}\". {verdict}"
    ))
}
