#![forbid(unsafe_code)]

use time::{Date, Month};

/// Where a February 29 birthday lands in a year without that day.
pub const LEAP_DAY_FALLBACK: (Month, u8) = (Month::February, 28);

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BirthdayError {
    OutOfRange { year: i32 },
}

impl BirthdayError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::OutOfRange { .. } => "DATE_OUT_OF_RANGE",
        }
    }
}

impl std::fmt::Display for BirthdayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OutOfRange { year } => {
                write!(f, "year {year} is outside the supported calendar range")
            }
        }
    }
}

impl std::error::Error for BirthdayError {}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Timing {
    Past,
    Today,
    Upcoming,
}

impl Timing {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Past => "past",
            Self::Today => "today",
            Self::Upcoming => "upcoming",
        }
    }
}

pub fn classify(date: Date, reference: Date) -> Timing {
    match date.cmp(&reference) {
        std::cmp::Ordering::Less => Timing::Past,
        std::cmp::Ordering::Equal => Timing::Today,
        std::cmp::Ordering::Greater => Timing::Upcoming,
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NextOccurrence {
    pub date: Date,
    /// Whole days from the reference date; 0 means today.
    pub days_until: i64,
}

/// The birthday's date within `year`, applying [`LEAP_DAY_FALLBACK`].
pub fn occurrence_in_year(birth_date: Date, year: i32) -> Result<Date, BirthdayError> {
    let (month, day) = match (birth_date.month(), birth_date.day()) {
        (Month::February, 29) if !time::util::is_leap_year(year) => LEAP_DAY_FALLBACK,
        other => other,
    };
    Date::from_calendar_date(year, month, day).map_err(|_| BirthdayError::OutOfRange { year })
}

/// The first occurrence on or after `reference`.
pub fn next_occurrence(
    birth_date: Date,
    reference: Date,
) -> Result<NextOccurrence, BirthdayError> {
    let mut date = occurrence_in_year(birth_date, reference.year())?;
    if date < reference {
        let next_year = reference.year() + 1;
        date = occurrence_in_year(birth_date, next_year)?;
    }
    Ok(NextOccurrence {
        date,
        days_until: (date - reference).whole_days(),
    })
}

/// Age reached on `occurrence`, when the birth year precedes it.
pub fn turning(birth_date: Date, occurrence: Date) -> Option<i32> {
    let age = occurrence.year() - birth_date.year();
    (age > 0).then_some(age)
}
