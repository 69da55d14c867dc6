#![forbid(unsafe_code)]

use super::render::{
    calendar_birthday_json, calendar_day_json, month_ref_json, occurrence_json, person_json,
};
use crate::{Args, McpServer};
use bb_core::birthdays::{DisplayMonth, celebrating_on, in_month, month_grid, on_day, upcoming};
use bb_core::dates::{days_in_month, format_date, parse_month};
use bb_core::model::Person;
use serde_json::{Value, json};
use time::Month;

pub(super) const OPS: &[&str] = &["upcoming", "today", "on_day", "month"];

const MAX_UPCOMING_LIMIT: usize = 500;
// Any leap year; admits Feb 29 as a lookup day.
const LEAP_YEAR: i32 = 2000;

pub(super) fn handle(server: &mut McpServer, op: &str, args: &Args) -> Result<Value, Value> {
    match op {
        "upcoming" => upcoming_op(server, args),
        "today" => today_op(server, args),
        "on_day" => on_day_op(server, args),
        "month" => month_op(server, args),
        _ => Err(super::dispatch::unknown_op("birthdays", op, OPS)),
    }
}

/// Confirmed friends of the viewer, plus the viewer on request.
struct Population {
    viewer: Person,
    friends: Vec<Person>,
    include_self: bool,
}

impl Population {
    fn load(server: &McpServer, args: &Args) -> Result<Self, Value> {
        let viewer = crate::require_string(args, "viewer")?;
        let include_self = crate::optional_bool(args, "include_self")?.unwrap_or(false);

        let resolution = super::friends::resolve_viewer(server, &viewer)?;
        let ids = resolution
            .confirmed_ids()
            .into_iter()
            .map(str::to_string)
            .collect::<Vec<_>>();
        let known = server.store.list_people(&ids).map_err(crate::store_error)?;
        let friends = resolution
            .confirmed_people(&known)
            .into_iter()
            .cloned()
            .collect();
        let viewer = super::friends::require_person(server, &resolution.viewer_id)?;

        Ok(Self {
            viewer,
            friends,
            include_self,
        })
    }

    fn members(&self) -> impl Iterator<Item = &Person> {
        self.friends
            .iter()
            .chain(self.include_self.then_some(&self.viewer))
    }
}

fn upcoming_op(server: &mut McpServer, args: &Args) -> Result<Value, Value> {
    let reference = server.reference_date(args)?;
    let limit = crate::optional_usize(args, "limit")?
        .unwrap_or(server.default_upcoming_limit())
        .min(MAX_UPCOMING_LIMIT);
    let population = Population::load(server, args)?;

    let occurrences =
        upcoming(population.members(), reference, limit).map_err(crate::birthday_error)?;
    Ok(crate::ai_ok(
        "birthdays.upcoming",
        json!({
            "viewer": population.viewer.id,
            "today": format_date(reference),
            "limit": limit,
            "birthdays": occurrences.iter().map(occurrence_json).collect::<Vec<_>>(),
        }),
    ))
}

fn today_op(server: &mut McpServer, args: &Args) -> Result<Value, Value> {
    let reference = server.reference_date(args)?;
    let population = Population::load(server, args)?;

    let people = celebrating_on(population.members(), reference).map_err(crate::birthday_error)?;
    Ok(crate::ai_ok(
        "birthdays.today",
        json!({
            "viewer": population.viewer.id,
            "today": format_date(reference),
            "people": people.into_iter().map(person_json).collect::<Vec<_>>(),
        }),
    ))
}

fn require_month(args: &Args, key: &str) -> Result<Option<Month>, Value> {
    let Some(value) = crate::optional_u8_in(args, key, 1, 12)? else {
        return Ok(None);
    };
    parse_month(value)
        .map(Some)
        .map_err(|err| crate::ai_error("INVALID_INPUT", &format!("{key}: {}", err.message())))
}

fn on_day_op(server: &mut McpServer, args: &Args) -> Result<Value, Value> {
    let Some(month) = require_month(args, "month")? else {
        return Err(crate::ai_error("INVALID_INPUT", "month is required"));
    };
    let max_day = days_in_month(LEAP_YEAR, month);
    let Some(day) = crate::optional_u8_in(args, "day", 1, max_day)? else {
        return Err(crate::ai_error("INVALID_INPUT", "day is required"));
    };
    let population = Population::load(server, args)?;

    let people = on_day(population.members(), month, day);
    Ok(crate::ai_ok(
        "birthdays.on_day",
        json!({
            "viewer": population.viewer.id,
            "month": u8::from(month),
            "day": day,
            "people": people.into_iter().map(person_json).collect::<Vec<_>>(),
        }),
    ))
}

fn month_op(server: &mut McpServer, args: &Args) -> Result<Value, Value> {
    let reference = server.reference_date(args)?;
    let year = match crate::optional_i64(args, "year")? {
        None => reference.year(),
        Some(year) if (1..=9999).contains(&year) => year as i32,
        Some(_) => {
            return Err(crate::ai_error("INVALID_INPUT", "year must be within 1..=9999"));
        }
    };
    let month = require_month(args, "month")?.unwrap_or(reference.month());
    let include_grid = crate::optional_bool(args, "include_grid")?.unwrap_or(false);
    let display = DisplayMonth::new(year, month);
    let population = Population::load(server, args)?;

    let birthdays =
        in_month(population.members(), reference, display).map_err(crate::birthday_error)?;
    let mut result = json!({
        "viewer": population.viewer.id,
        "today": format_date(reference),
        "year": display.year(),
        "month": u8::from(display.month()),
        "days": display.days(),
        "previous": month_ref_json(display.previous()),
        "next": month_ref_json(display.next()),
        "birthdays": birthdays.iter().map(calendar_birthday_json).collect::<Vec<_>>(),
    });

    if include_grid {
        let grid = month_grid(population.members(), reference, display)
            .map_err(crate::birthday_error)?;
        result["grid"] = Value::Array(grid.iter().map(calendar_day_json).collect());
    }

    Ok(crate::ai_ok("birthdays.month", result))
}
