//! Collision sinks

use std::{fmt, io::Write, ops::ControlFlow, str::FromStr};

use crate::{
    error::{ConfigError, Result},
    tracker::Collision,
};

/// Receives collisions as the scan discovers them
pub trait Reporter {
    /// Handle one collision. `ControlFlow::Break` stops the scan.
    fn report(&mut self, collision: &Collision) -> Result<ControlFlow<()>>;

    /// Called once when the scan stops, whether or not it ran to completion
    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

impl<R: Reporter + ?Sized> Reporter for &mut R {
    fn report(&mut self, collision: &Collision) -> Result<ControlFlow<()>> {
        (**self).report(collision)
    }

    fn finish(&mut self) -> Result<()> {
        (**self).finish()
    }
}

impl Reporter for Vec<Collision> {
    fn report(&mut self, collision: &Collision) -> Result<ControlFlow<()>> {
        self.push(collision.clone());
        Ok(ControlFlow::Continue(()))
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AddressFormat {
    #[default]
    Decimal,
    Hex,
}

impl FromStr for AddressFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "dec" | "decimal" => Ok(AddressFormat::Decimal),
            "hex" => Ok(AddressFormat::Hex),
            other => Err(ConfigError::UnknownName {
                kind: "address format",
                name: other.to_string(),
            }),
        }
    }
}

/// Layout of one text record
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RecordStyle {
    /// `collision key0=af key1=bA address=424624`
    #[default]
    Line,
    /// Heading line, one field per line, blank line after
    Block,
}

impl FromStr for RecordStyle {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "line" => Ok(RecordStyle::Line),
            "block" => Ok(RecordStyle::Block),
            other => Err(ConfigError::UnknownName {
                kind: "record style",
                name: other.to_string(),
            }),
        }
    }
}

struct DisplayAddress<'a>(&'a Collision, AddressFormat);

impl fmt::Display for DisplayAddress<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.1 {
            AddressFormat::Decimal => write!(f, "{}", self.0.address),
            AddressFormat::Hex => write!(f, "{:#x}", self.0.address),
        }
    }
}

/// Streams collision records to a writer, flushing after each one
pub struct TextReporter<W: Write> {
    out: W,
    address_format: AddressFormat,
    style: RecordStyle,
    written: u64,
}

impl<W: Write> TextReporter<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            address_format: AddressFormat::default(),
            style: RecordStyle::default(),
            written: 0,
        }
    }

    pub fn with_address_format(mut self, address_format: AddressFormat) -> Self {
        self.address_format = address_format;
        self
    }

    pub fn with_style(mut self, style: RecordStyle) -> Self {
        self.style = style;
        self
    }

    /// Number of records written so far
    pub fn written(&self) -> u64 {
        self.written
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Reporter for TextReporter<W> {
    fn report(&mut self, collision: &Collision) -> Result<ControlFlow<()>> {
        let address = DisplayAddress(collision, self.address_format);
        match self.style {
            RecordStyle::Line => writeln!(
                self.out,
                "collision key0={} key1={} address={}",
                collision.existing_key, collision.new_key, address
            )?,
            RecordStyle::Block => write!(
                self.out,
                "Collision\nkey0: {}\nkey1: {}\naddress: {}\n\n",
                collision.existing_key, collision.new_key, address
            )?,
        }
        self.out.flush()?;
        self.written += 1;
        Ok(ControlFlow::Continue(()))
    }

    fn finish(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }
}
