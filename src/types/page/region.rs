use derivative::Derivative;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Market the page belongs to, sent to the API as an integer code.
#[derive(Derivative, Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[derivative(Default)]
pub enum Region {
    #[derivative(Default)]
    Taiwan,
    Japan,
    HongKong,
}

impl Region {
    /// Resolves the region from the leading path segment, Taiwan otherwise.
    pub fn from_path(path: &str) -> Self {
        let path = path.to_lowercase();
        if path.starts_with("/tw/") {
            Region::Taiwan
        } else if path.starts_with("/jp/") {
            Region::Japan
        } else if path.starts_with("/hk/") {
            Region::HongKong
        } else {
            Region::default()
        }
    }
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Region::Taiwan),
            2 => Some(Region::Japan),
            3 => Some(Region::HongKong),
            _ => None,
        }
    }
    pub fn code(&self) -> u8 {
        match self {
            Region::Taiwan => 1,
            Region::Japan => 2,
            Region::HongKong => 3,
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl Serialize for Region {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u8(self.code())
    }
}

impl<'de> Deserialize<'de> for Region {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let code = u8::deserialize(deserializer)?;
        Region::from_code(code)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown region code {code}")))
    }
}
