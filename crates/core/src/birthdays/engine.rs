#![forbid(unsafe_code)]

use super::calendar::DisplayMonth;
use super::occurrence::{
    BirthdayError, Timing, classify, next_occurrence, occurrence_in_year, turning,
};
use crate::model::Person;
use time::{Date, Month};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BirthdayOccurrence {
    pub person: Person,
    pub date: Date,
    pub days_until: i64,
    pub turning: Option<i32>,
}

impl BirthdayOccurrence {
    pub fn is_today(&self) -> bool {
        self.days_until == 0
    }
}

/// A birthday projected into a display year; may lie before the reference.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CalendarBirthday {
    pub person: Person,
    pub date: Date,
    pub timing: Timing,
    pub turning: Option<i32>,
}

/// Next occurrences sorted by `days_until`, then person id, capped at `limit`.
///
/// People without a birth date are skipped.
pub fn upcoming<'a>(
    people: impl IntoIterator<Item = &'a Person>,
    reference: Date,
    limit: usize,
) -> Result<Vec<BirthdayOccurrence>, BirthdayError> {
    let mut out = Vec::new();
    for person in people {
        let Some(birth_date) = person.birth_date else {
            continue;
        };
        let next = next_occurrence(birth_date, reference)?;
        out.push(BirthdayOccurrence {
            person: person.clone(),
            date: next.date,
            days_until: next.days_until,
            turning: turning(birth_date, next.date),
        });
    }

    out.sort_by(|a, b| {
        a.days_until
            .cmp(&b.days_until)
            .then_with(|| a.person.id.cmp(&b.person.id))
    });
    out.truncate(limit);
    Ok(out)
}

/// Year-agnostic month/day match against the raw birth date, sorted by id.
pub fn on_day<'a>(
    people: impl IntoIterator<Item = &'a Person>,
    month: Month,
    day: u8,
) -> Vec<&'a Person> {
    let mut out = people
        .into_iter()
        .filter(|person| {
            person
                .birth_date
                .is_some_and(|birth| birth.month() == month && birth.day() == day)
        })
        .collect::<Vec<_>>();
    out.sort_by(|a, b| a.id.cmp(&b.id));
    out
}

/// People whose birthday is celebrated on `date`, leap-day fallback included.
///
/// Agrees with `next_occurrence(..).days_until == 0`.
pub fn celebrating_on<'a>(
    people: impl IntoIterator<Item = &'a Person>,
    date: Date,
) -> Result<Vec<&'a Person>, BirthdayError> {
    let mut out = Vec::new();
    for person in people {
        let Some(birth_date) = person.birth_date else {
            continue;
        };
        if occurrence_in_year(birth_date, date.year())? == date {
            out.push(person);
        }
    }
    out.sort_by(|a, b| a.id.cmp(&b.id));
    Ok(out)
}

/// Birthdays falling in `display`, anchored to its year and sorted by day.
pub fn in_month<'a>(
    people: impl IntoIterator<Item = &'a Person>,
    reference: Date,
    display: DisplayMonth,
) -> Result<Vec<CalendarBirthday>, BirthdayError> {
    let mut out = Vec::new();
    for person in people {
        let Some(birth_date) = person.birth_date else {
            continue;
        };
        let date = occurrence_in_year(birth_date, display.year())?;
        if date.month() != display.month() {
            continue;
        }
        out.push(CalendarBirthday {
            person: person.clone(),
            date,
            timing: classify(date, reference),
            turning: turning(birth_date, date),
        });
    }

    out.sort_by(|a, b| {
        a.date
            .day()
            .cmp(&b.date.day())
            .then_with(|| a.person.id.cmp(&b.person.id))
    });
    Ok(out)
}
