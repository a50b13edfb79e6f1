//! crates/logging/src/pattern.rs
//! Pattern strings that turn a [`Record`] into one line of text.
//!
//! `%` introduces a record flag and `#` a source-location flag:
//!
//! | Flag | Output |
//! |---|---|
//! | `%Y` `%m` `%d` | year, month, day |
//! | `%H` `%M` `%S` | hour, minute, second |
//! | `%e` | milliseconds |
//! | `%l` / `%L` | level name / level letter |
//! | `%n` | logger name |
//! | `%v` | message |
//! | `%P` | process id |
//! | `%%` | a literal `%` |
//! | `#f` `#l` `#F` | source file, line, function |
//!
//! Any other character after `%` or `#` is copied through unchanged together
//! with its introducer.

use std::fmt::Write as _;
use std::sync::OnceLock;

use time::{OffsetDateTime, UtcOffset};

use crate::record::Record;

#[derive(Clone, Debug, PartialEq, Eq)]
enum Token {
    Literal(String),
    Flag(Flag),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Flag {
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
    Millis,
    LevelName,
    LevelShort,
    LoggerName,
    Message,
    ProcessId,
    SourceFile,
    SourceLine,
    Function,
}

impl Flag {
    const fn from_percent(ch: char) -> Option<Self> {
        Some(match ch {
            'Y' => Self::Year,
            'm' => Self::Month,
            'd' => Self::Day,
            'H' => Self::Hour,
            'M' => Self::Minute,
            'S' => Self::Second,
            'e' => Self::Millis,
            'l' => Self::LevelName,
            'L' => Self::LevelShort,
            'n' => Self::LoggerName,
            'v' => Self::Message,
            'P' => Self::ProcessId,
            _ => return None,
        })
    }

    const fn from_hash(ch: char) -> Option<Self> {
        Some(match ch {
            'f' => Self::SourceFile,
            'l' => Self::SourceLine,
            'F' => Self::Function,
            _ => return None,
        })
    }

    const fn needs_time(self) -> bool {
        matches!(
            self,
            Self::Year
                | Self::Month
                | Self::Day
                | Self::Hour
                | Self::Minute
                | Self::Second
                | Self::Millis
        )
    }
}

/// A parsed pattern string.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pattern {
    source: String,
    tokens: Vec<Token>,
    uses_time: bool,
}

impl Pattern {
    /// Parses `pattern`. Parsing never fails; unknown flags become literals.
    pub fn new(pattern: &str) -> Self {
        let mut tokens = Vec::new();
        let mut literal = String::new();
        let mut chars = pattern.chars().peekable();

        while let Some(ch) = chars.next() {
            let flag = match ch {
                '%' => match chars.peek().copied() {
                    Some('%') => {
                        chars.next();
                        literal.push('%');
                        continue;
                    }
                    Some(next) => Flag::from_percent(next),
                    None => None,
                },
                '#' => chars.peek().copied().and_then(Flag::from_hash),
                _ => None,
            };

            match flag {
                Some(flag) => {
                    chars.next();
                    if !literal.is_empty() {
                        tokens.push(Token::Literal(std::mem::take(&mut literal)));
                    }
                    tokens.push(Token::Flag(flag));
                }
                None => literal.push(ch),
            }
        }
        if !literal.is_empty() {
            tokens.push(Token::Literal(literal));
        }

        let uses_time = tokens
            .iter()
            .any(|token| matches!(token, Token::Flag(flag) if flag.needs_time()));
        Self {
            source: pattern.to_owned(),
            tokens,
            uses_time,
        }
    }

    /// The pattern text this value was parsed from.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Renders `record` followed by a newline.
    pub fn format(&self, record: &Record) -> String {
        let mut out = String::with_capacity(self.source.len() + record.message.len() + 32);
        self.format_into(record, &mut out);
        out
    }

    /// Appends the rendering of `record`, newline included, to `out`.
    pub fn format_into(&self, record: &Record, out: &mut String) {
        let time = self
            .uses_time
            .then(|| OffsetDateTime::from(record.time).to_offset(local_offset()));

        for token in &self.tokens {
            match token {
                Token::Literal(text) => out.push_str(text),
                Token::Flag(flag) => render_flag(*flag, record, time, out),
            }
        }
        out.push('\n');
    }
}

impl Default for Pattern {
    fn default() -> Self {
        Self::new("%v")
    }
}

fn render_flag(flag: Flag, record: &Record, time: Option<OffsetDateTime>, out: &mut String) {
    // Writing into a String cannot fail.
    let _ = match (flag, time) {
        (Flag::Year, Some(t)) => write!(out, "{:04}", t.year()),
        (Flag::Month, Some(t)) => write!(out, "{:02}", u8::from(t.month())),
        (Flag::Day, Some(t)) => write!(out, "{:02}", t.day()),
        (Flag::Hour, Some(t)) => write!(out, "{:02}", t.hour()),
        (Flag::Minute, Some(t)) => write!(out, "{:02}", t.minute()),
        (Flag::Second, Some(t)) => write!(out, "{:02}", t.second()),
        (Flag::Millis, Some(t)) => write!(out, "{:03}", t.millisecond()),
        (Flag::LevelName, _) => {
            out.push_str(record.level.as_str());
            Ok(())
        }
        (Flag::LevelShort, _) => {
            out.push(record.level.short_name());
            Ok(())
        }
        (Flag::LoggerName, _) => {
            out.push_str(&record.logger);
            Ok(())
        }
        (Flag::Message, _) => {
            out.push_str(&record.message);
            Ok(())
        }
        (Flag::ProcessId, _) => write!(out, "{}", std::process::id()),
        (Flag::SourceFile, _) => {
            if let Some(location) = record.location {
                out.push_str(location.file);
            }
            Ok(())
        }
        (Flag::SourceLine, _) => match record.location {
            Some(location) => write!(out, "{}", location.line),
            None => Ok(()),
        },
        (Flag::Function, _) => {
            if let Some(function) = record.location.and_then(|location| location.function) {
                out.push_str(function);
            }
            Ok(())
        }
        (_, None) => Ok(()),
    };
}

static LOCAL_OFFSET: OnceLock<UtcOffset> = OnceLock::new();

/// Determines the local UTC offset once and caches it.
///
/// The offset can only be read reliably while the process is single
/// threaded; call this early in `main` to make timestamps local. When it
/// cannot be determined, UTC is used for the rest of the process.
pub fn init_local_offset() -> UtcOffset {
    *LOCAL_OFFSET.get_or_init(|| UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC))
}

fn local_offset() -> UtcOffset {
    init_local_offset()
}
