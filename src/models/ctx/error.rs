use crate::runtime::EnvError;
use derive_more::From;
use serde::ser::{SerializeStruct, Serializer};
use serde::Serialize;
use std::fmt;

#[derive(Clone, PartialEq, Eq, From, Serialize, Debug)]
#[serde(tag = "type")]
pub enum WidgetError {
    Env(EnvError),
    Other(OtherError),
}

impl WidgetError {
    pub fn message(&self) -> String {
        match self {
            WidgetError::Env(error) => error.message(),
            WidgetError::Other(error) => error.message(),
        }
    }
}

impl fmt::Display for WidgetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WidgetError::Env(error) => write!(f, "Env: {}", error.message()),
            WidgetError::Other(error) => write!(f, "Other: {}", error.message()),
        }
    }
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum OtherError {
    /// The submit-email endpoint answered `success: false`, with its `error` text if any.
    EmailSubmissionRejected(Option<String>),
    /// A view template was given props without a required field.
    MissingProp(&'static str),
}

impl OtherError {
    pub fn message(&self) -> String {
        match &self {
            OtherError::EmailSubmissionRejected(Some(error)) => {
                format!("Email submission rejected: {error}")
            }
            OtherError::EmailSubmissionRejected(None) => "Email submission rejected".to_owned(),
            OtherError::MissingProp(name) => format!("Missing required prop: {name}"),
        }
    }
    pub fn code(&self) -> u64 {
        match &self {
            OtherError::EmailSubmissionRejected(_) => 1,
            OtherError::MissingProp(_) => 2,
        }
    }
}

impl fmt::Display for OtherError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl Serialize for OtherError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("OtherError", 2)?;
        state.serialize_field("code", &self.code())?;
        state.serialize_field("message", &self.message())?;
        state.end()
    }
}
