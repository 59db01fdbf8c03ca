//! Reader and writer configuration.
//!
//! Options can be built in code or picked up from the environment:
//! - `TRIA_READ_MODE`: `strict` or `lenient`
//! - `TRIA_FLOAT_PRECISION`: `shortest`, or a digit count for fixed notation

use std::env;
use std::str::FromStr;
use tria_core::{Error, Result};

pub const READ_MODE_ENV: &str = "TRIA_READ_MODE";
pub const FLOAT_PRECISION_ENV: &str = "TRIA_FLOAT_PRECISION";

/// Largest digit count accepted for `Fixed` / `Scientific` output.
pub const MAX_FLOAT_PRECISION: usize = 30;

/// How the reader treats a stream that ends before the declared counts are reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReadMode {
    /// Short sections and out-of-range face references are format errors.
    #[default]
    Strict,
    /// Return whatever was collected before the stream ended.
    Lenient,
}

impl FromStr for ReadMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "strict" => Ok(ReadMode::Strict),
            "lenient" => Ok(ReadMode::Lenient),
            other => Err(Error::InvalidInput(format!(
                "Unknown read mode '{}', expected 'strict' or 'lenient'",
                other
            ))),
        }
    }
}

/// Text representation used for vertex coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FloatFormat {
    /// Shortest text that parses back to the identical `f64`.
    #[default]
    Shortest,
    /// Fixed notation with the given number of fractional digits, at most
    /// [`MAX_FLOAT_PRECISION`].
    Fixed(usize),
    /// Scientific notation with the given number of fractional digits, at most
    /// [`MAX_FLOAT_PRECISION`].
    Scientific(usize),
}

impl FloatFormat {
    pub fn format(&self, value: f64) -> String {
        match *self {
            FloatFormat::Shortest => format!("{:?}", value),
            FloatFormat::Fixed(prec) => format!("{:.*}", prec.min(MAX_FLOAT_PRECISION), value),
            FloatFormat::Scientific(prec) => {
                format!("{:.*e}", prec.min(MAX_FLOAT_PRECISION), value)
            }
        }
    }
}

impl FromStr for FloatFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("shortest") {
            return Ok(FloatFormat::Shortest);
        }
        let prec = s.parse::<usize>().map_err(|_| {
            Error::InvalidInput(format!(
                "Invalid float precision '{}', expected 'shortest' or a digit count",
                s
            ))
        })?;
        if prec > MAX_FLOAT_PRECISION {
            return Err(Error::InvalidInput(format!(
                "Float precision {} exceeds the maximum of {}",
                prec, MAX_FLOAT_PRECISION
            )));
        }
        Ok(FloatFormat::Fixed(prec))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReadOptions {
    pub mode: ReadMode,
}

impl ReadOptions {
    pub fn strict() -> Self {
        Self {
            mode: ReadMode::Strict,
        }
    }

    pub fn lenient() -> Self {
        Self {
            mode: ReadMode::Lenient,
        }
    }

    pub fn with_mode(mut self, mode: ReadMode) -> Self {
        self.mode = mode;
        self
    }

    /// Defaults overridden by `TRIA_READ_MODE` when it is set.
    pub fn from_env() -> Result<Self> {
        let mut options = Self::default();
        if let Some(mode) = parse_env(READ_MODE_ENV)? {
            options.mode = mode;
        }
        Ok(options)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteOptions {
    pub float_format: FloatFormat,
}

impl WriteOptions {
    pub fn with_float_format(mut self, float_format: FloatFormat) -> Self {
        self.float_format = float_format;
        self
    }

    /// Defaults overridden by `TRIA_FLOAT_PRECISION` when it is set.
    pub fn from_env() -> Result<Self> {
        let mut options = Self::default();
        if let Some(float_format) = parse_env(FLOAT_PRECISION_ENV)? {
            options.float_format = float_format;
        }
        Ok(options)
    }
}

fn parse_env<T: FromStr<Err = Error>>(name: &str) -> Result<Option<T>> {
    read_env(name)?.map(|raw| raw.parse()).transpose()
}

fn read_env(name: &str) -> Result<Option<String>> {
    match env::var(name) {
        Ok(v) => Ok(Some(v)),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(e) => Err(Error::InvalidInput(format!("Failed to read {name}: {e}"))),
    }
}
