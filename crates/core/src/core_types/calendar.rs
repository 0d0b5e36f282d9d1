//! Categorical calendar encodings for the burn-area model
//!
//! The regression model was trained with month and weekday encoded as small
//! integers. These tables are closed and fixed for the lifetime of the process:
//! - Months: `jan`..`dec` → 1..=12
//! - Weekdays: `mon`..`sun` → 1..=7
//!
//! Tokens are matched exactly (lower-case, three letters), the same way the
//! web form submits them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Calendar month of the observation
///
/// The discriminant is the integer code fed to the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Month {
    Jan = 1,
    Feb = 2,
    Mar = 3,
    Apr = 4,
    May = 5,
    Jun = 6,
    Jul = 7,
    Aug = 8,
    Sep = 9,
    Oct = 10,
    Nov = 11,
    Dec = 12,
}

impl Month {
    /// All months in code order
    pub const ALL: [Month; 12] = [
        Month::Jan,
        Month::Feb,
        Month::Mar,
        Month::Apr,
        Month::May,
        Month::Jun,
        Month::Jul,
        Month::Aug,
        Month::Sep,
        Month::Oct,
        Month::Nov,
        Month::Dec,
    ];

    /// Look up a month by its three-letter form token (e.g. `"aug"`)
    ///
    /// Returns `None` for anything outside the closed table, including
    /// different capitalisation.
    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.token() == token)
    }

    /// Three-letter token as submitted by the form
    #[must_use]
    pub const fn token(self) -> &'static str {
        match self {
            Self::Jan => "jan",
            Self::Feb => "feb",
            Self::Mar => "mar",
            Self::Apr => "apr",
            Self::May => "may",
            Self::Jun => "jun",
            Self::Jul => "jul",
            Self::Aug => "aug",
            Self::Sep => "sep",
            Self::Oct => "oct",
            Self::Nov => "nov",
            Self::Dec => "dec",
        }
    }

    /// Integer code used as the model feature (1-12)
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Day of the week of the observation
///
/// The discriminant is the integer code fed to the model, Monday first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Weekday {
    Mon = 1,
    Tue = 2,
    Wed = 3,
    Thu = 4,
    Fri = 5,
    Sat = 6,
    Sun = 7,
}

impl Weekday {
    /// All weekdays in code order
    pub const ALL: [Weekday; 7] = [
        Weekday::Mon,
        Weekday::Tue,
        Weekday::Wed,
        Weekday::Thu,
        Weekday::Fri,
        Weekday::Sat,
        Weekday::Sun,
    ];

    /// Look up a weekday by its three-letter form token (e.g. `"fri"`)
    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.token() == token)
    }

    /// Three-letter token as submitted by the form
    #[must_use]
    pub const fn token(self) -> &'static str {
        match self {
            Self::Mon => "mon",
            Self::Tue => "tue",
            Self::Wed => "wed",
            Self::Thu => "thu",
            Self::Fri => "fri",
            Self::Sat => "sat",
            Self::Sun => "sun",
        }
    }

    /// Integer code used as the model feature (1-7)
    #[must_use]
    pub const fn code(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_codes_match_table() {
        let expected = [
            ("jan", 1),
            ("feb", 2),
            ("mar", 3),
            ("apr", 4),
            ("may", 5),
            ("jun", 6),
            ("jul", 7),
            ("aug", 8),
            ("sep", 9),
            ("oct", 10),
            ("nov", 11),
            ("dec", 12),
        ];
        for (token, code) in expected {
            let month = Month::from_token(token).expect("known month token");
            assert_eq!(month.code(), code, "code for {token}");
            assert_eq!(month.token(), token);
        }
    }

    #[test]
    fn test_weekday_codes_match_table() {
        let expected = [
            ("mon", 1),
            ("tue", 2),
            ("wed", 3),
            ("thu", 4),
            ("fri", 5),
            ("sat", 6),
            ("sun", 7),
        ];
        for (token, code) in expected {
            let day = Weekday::from_token(token).expect("known weekday token");
            assert_eq!(day.code(), code, "code for {token}");
            assert_eq!(day.to_string(), token);
        }
    }

    #[test]
    fn test_unknown_tokens_rejected() {
        assert_eq!(Month::from_token("Aug"), None);
        assert_eq!(Month::from_token("august"), None);
        assert_eq!(Month::from_token(""), None);
        assert_eq!(Weekday::from_token("FRI"), None);
        assert_eq!(Weekday::from_token("fr"), None);
    }
}
