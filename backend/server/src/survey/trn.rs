//! # Temporary Registration Number
//!
//! Human-readable serial handed to every accepted survey, e.g. `T-02805`.
//!
//! - Prefix `T-`, then the serial zero-padded to at least 5 digits
//! - The next TRN is the last issued serial plus one
//! - An empty store, or one where no stored TRN parses, starts at [`FALLBACK_TRN`]
//! - Serials do not wrap: the TRN after `u32::MAX` does not exist
use std::{fmt, str::FromStr, sync::OnceLock};

use regex::Regex;

pub const TRN_PREFIX: &str = "T-";
pub const FALLBACK_TRN: Trn = Trn(2805);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Trn(u32);

impl Trn {
    pub const fn new(serial: u32) -> Self {
        Self(serial)
    }

    pub fn serial(self) -> u32 {
        self.0
    }

    pub fn next(self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }

    /// TRN that follows `last`, the highest one issued so far.
    pub fn after(last: Option<Trn>) -> Option<Self> {
        match last {
            Some(last) => last.next(),
            None => Some(FALLBACK_TRN),
        }
    }
}

fn trn_regex() -> &'static Regex {
    static TRN_REGEX: OnceLock<Regex> = OnceLock::new();
    TRN_REGEX.get_or_init(|| Regex::new(r"^T-([0-9]{5,})$").unwrap())
}

#[derive(Debug, PartialEq, Eq)]
pub struct InvalidTrn;

impl FromStr for Trn {
    type Err = InvalidTrn;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = trn_regex()
            .captures(s)
            .and_then(|captures| captures.get(1))
            .ok_or(InvalidTrn)?;

        digits.as_str().parse().map(Trn).map_err(|_| InvalidTrn)
    }
}

impl fmt::Display for Trn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{TRN_PREFIX}{:05}", self.0)
    }
}
