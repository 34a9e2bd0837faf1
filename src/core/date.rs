//! Birth date and sex block (positions 7-11).

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::error::CodeError;
use super::types::Sex;

/// Month letters for January..December. F, G, I, N, O and Q are never used.
pub static MONTH_LETTERS: [char; 12] = ['A', 'B', 'C', 'D', 'E', 'H', 'L', 'M', 'P', 'R', 'S', 'T'];

/// Offset added to the day of birth of female subjects.
pub const FEMALE_DAY_OFFSET: u32 = 40;

/// How a two-digit birth year is expanded to a full year.
///
/// The code only carries `yy`, so the century is a policy decision. Codes
/// issued under older rules may need [`CenturyPolicy::Twentieth`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CenturyPolicy {
    /// `yy < pivot` is 2000+yy, otherwise 1900+yy.
    Pivot(u8),
    /// Every `yy` is 1900+yy.
    Twentieth,
}

impl Default for CenturyPolicy {
    fn default() -> Self {
        Self::Pivot(30)
    }
}

impl CenturyPolicy {
    /// Expand a two-digit year (0..=99).
    ///
    /// ```
    /// use codice_fiscale::CenturyPolicy;
    ///
    /// let policy = CenturyPolicy::default();
    /// assert_eq!(policy.full_year(29), 2029);
    /// assert_eq!(policy.full_year(30), 1930);
    /// assert_eq!(CenturyPolicy::Twentieth.full_year(5), 1905);
    /// ```
    pub fn full_year(self, yy: u8) -> i32 {
        let yy = i32::from(yy % 100);
        match self {
            Self::Pivot(pivot) if yy < i32::from(pivot) => 2000 + yy,
            Self::Pivot(_) | Self::Twentieth => 1900 + yy,
        }
    }
}

/// Letter for a month number (1..=12).
pub fn month_letter(month: u32) -> Option<char> {
    let idx = usize::try_from(month.checked_sub(1)?).ok()?;
    MONTH_LETTERS.get(idx).copied()
}

/// Month number (1..=12) for a month letter.
pub fn month_from_letter(letter: char) -> Result<u32, CodeError> {
    MONTH_LETTERS
        .iter()
        .position(|&l| l == letter)
        .map(|idx| idx as u32 + 1)
        .ok_or(CodeError::InvalidMonthCode(letter))
}

/// Encode the 5-character date/sex block: `yy`, month letter, day (+40 if female).
pub fn encode_date(date: NaiveDate, sex: Sex) -> String {
    let yy = date.year().rem_euclid(100);
    // month0() is always 0..=11
    let month = MONTH_LETTERS[date.month0() as usize];
    let day = match sex {
        Sex::Male => date.day(),
        Sex::Female => date.day() + FEMALE_DAY_OFFSET,
    };
    format!("{yy:02}{month}{day:02}")
}

/// Decode the raw two-digit day value into (day of month, sex).
///
/// Valid raw values are 1..=31 (male) and 41..=71 (female).
pub fn decode_day(raw: u8) -> Result<(u32, Sex), CodeError> {
    match raw {
        1..=31 => Ok((u32::from(raw), Sex::Male)),
        41..=71 => Ok((u32::from(raw) - FEMALE_DAY_OFFSET, Sex::Female)),
        _ => Err(CodeError::InvalidDayCode(raw)),
    }
}

/// Decode year digits, month letter and raw day into a calendar date and sex.
///
/// A day that does not exist in the decoded month (30 February, 31 April)
/// is reported as [`CodeError::InvalidDayCode`].
pub fn decode_date(
    yy: u8,
    month_letter: char,
    raw_day: u8,
    policy: CenturyPolicy,
) -> Result<(NaiveDate, Sex), CodeError> {
    let month = month_from_letter(month_letter)?;
    let (day, sex) = decode_day(raw_day)?;
    let date = NaiveDate::from_ymd_opt(policy.full_year(yy), month, day)
        .ok_or(CodeError::InvalidDayCode(raw_day))?;
    Ok((date, sex))
}
