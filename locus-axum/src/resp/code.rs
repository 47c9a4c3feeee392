/// Business codes carried in the `code` field of [`R`](super::r::R).
///
/// The numeric value is also the catalog key of the code's message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Code {
    Ok = 200,
    BadRequest = 400,
    NotFound = 404,
    InternalServerError = 500,
    MissingParam = 901,
    IllegalParam = 902,
    UnsupportedLocale = 903,
}

impl Code {
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}
