use std::fmt;

use thiserror::Error;

pub const MIN_NAME_LEN: usize = 2;
pub const MAX_NAME_LEN: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NameError {
    #[error("name must have at least 2 characters")]
    TooShort,

    #[error("name must have at most 50 characters")]
    TooLong,

    #[error("name may only contain letters, spaces and apostrophes (found {0:?})")]
    InvalidCharacter(char),
}

/// A validated, normalized guest name.
///
/// Guests identify themselves with free text. A name is accepted when its
/// trimmed length is within bounds and it contains only letters (ASCII or
/// Latin-1 accented), whitespace and apostrophes. The stored form is trimmed
/// with inner whitespace runs collapsed to a single space.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuestName(String);

impl GuestName {
    pub fn parse(raw: &str) -> Result<Self, NameError> {
        let trimmed = raw.trim();
        let len = trimmed.chars().count();
        if len < MIN_NAME_LEN {
            return Err(NameError::TooShort);
        }
        if len > MAX_NAME_LEN {
            return Err(NameError::TooLong);
        }
        if let Some(c) = trimmed.chars().find(|&c| !is_name_char(c)) {
            return Err(NameError::InvalidCharacter(c));
        }

        Ok(Self(trimmed.split_whitespace().collect::<Vec<_>>().join(" ")))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for GuestName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn is_name_char(c: char) -> bool {
    match c {
        'a'..='z' | 'A'..='Z' | '\'' => true,
        // Latin-1 letters, minus the multiplication and division signs
        '\u{C0}'..='\u{FF}' => c != '\u{D7}' && c != '\u{F7}',
        _ => c.is_whitespace(),
    }
}
