#![forbid(unsafe_code)]

use super::engine::{CalendarBirthday, in_month};
use super::occurrence::{BirthdayError, Timing, classify};
use crate::dates::days_in_month;
use crate::model::Person;
use time::{Date, Month};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DisplayMonth {
    year: i32,
    month: Month,
}

impl DisplayMonth {
    pub fn new(year: i32, month: Month) -> Self {
        Self { year, month }
    }

    pub fn containing(date: Date) -> Self {
        Self::new(date.year(), date.month())
    }

    pub fn year(self) -> i32 {
        self.year
    }

    pub fn month(self) -> Month {
        self.month
    }

    pub fn next(self) -> Self {
        match self.month {
            Month::December => Self::new(self.year + 1, Month::January),
            month => Self::new(self.year, month.next()),
        }
    }

    pub fn previous(self) -> Self {
        match self.month {
            Month::January => Self::new(self.year - 1, Month::December),
            month => Self::new(self.year, month.previous()),
        }
    }

    pub fn days(self) -> u8 {
        days_in_month(self.year, self.month)
    }

    pub fn date(self, day: u8) -> Result<Date, BirthdayError> {
        Date::from_calendar_date(self.year, self.month, day)
            .map_err(|_| BirthdayError::OutOfRange { year: self.year })
    }
}

/// One cell of a month view.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CalendarDay {
    pub date: Date,
    pub timing: Timing,
    pub birthdays: Vec<CalendarBirthday>,
}

/// Every day of `display` with the birthdays that land on it.
pub fn month_grid<'a>(
    people: impl IntoIterator<Item = &'a Person>,
    reference: Date,
    display: DisplayMonth,
) -> Result<Vec<CalendarDay>, BirthdayError> {
    let mut birthdays = in_month(people, reference, display)?.into_iter().peekable();
    let mut out = Vec::with_capacity(usize::from(display.days()));

    for day in 1..=display.days() {
        let date = display.date(day)?;
        let mut cell = CalendarDay {
            date,
            timing: classify(date, reference),
            birthdays: Vec::new(),
        };
        while let Some(birthday) = birthdays.next_if(|b| b.date == date) {
            cell.birthdays.push(birthday);
        }
        out.push(cell);
    }

    Ok(out)
}
