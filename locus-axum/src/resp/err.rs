use std::collections::HashMap;
use std::fmt;
use thiserror::Error;
use validator::ValidationErrors;

use super::code::Code;

#[derive(Error)]
pub enum E {
    #[error("{0}")]
    Code(i32),
    /// Code plus values for the `{name}` placeholders of its message.
    #[error("{0}")]
    Msg(i32, HashMap<&'static str, String>),
    #[error("{0}")]
    Sys(#[from] anyhow::Error),
    #[error("{0}")]
    Val(#[from] ValidationErrors),
}

impl E {
    pub fn with_arg(code: Code, name: &'static str, value: impl Into<String>) -> Self {
        E::Msg(code.as_i32(), HashMap::from([(name, value.into())]))
    }
}

impl From<Code> for E {
    fn from(code: Code) -> Self {
        E::Code(code.as_i32())
    }
}

impl fmt::Debug for E {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            E::Code(c) => write!(f, "E({c})"),
            E::Msg(c, p) => write!(f, "E({c}, {p:?})"),
            E::Sys(e) => write!(f, "{e:?}"),
            E::Val(e) => write!(f, "{e:?}"),
        }
    }
}
