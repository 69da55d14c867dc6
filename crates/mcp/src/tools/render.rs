#![forbid(unsafe_code)]

use bb_core::birthdays::{BirthdayOccurrence, CalendarBirthday, CalendarDay, DisplayMonth};
use bb_core::dates::format_date;
use bb_core::friends::ResolvedConnection;
use bb_core::model::Person;
use bb_storage::{FriendshipRow, WishlistItem};
use serde_json::{Value, json};

pub(super) fn person_json(person: &Person) -> Value {
    json!({
        "id": person.id,
        "name": person.display_name,
        "label": person.label(),
        "birth_date": person.birth_date.map(format_date),
    })
}

pub(super) fn connection_json(conn: &ResolvedConnection, person: Option<&Person>) -> Value {
    json!({
        "edge_id": conn.edge_id,
        "person_id": conn.counterpart_id,
        "label": person.map(Person::label).unwrap_or(conn.counterpart_id.as_str()),
        "status": conn.status.as_str(),
        "direction": if conn.viewer_is_requester { "outgoing" } else { "incoming" },
    })
}

pub(super) fn friendship_json(row: &FriendshipRow) -> Value {
    json!({
        "edge_id": row.id,
        "requester": row.requester,
        "addressee": row.addressee,
        "status": row.status.as_str(),
        "created_at": crate::ts_ms_to_rfc3339(row.created_at_ms),
        "updated_at": crate::ts_ms_to_rfc3339(row.updated_at_ms),
    })
}

pub(super) fn occurrence_json(occurrence: &BirthdayOccurrence) -> Value {
    json!({
        "person": person_json(&occurrence.person),
        "date": format_date(occurrence.date),
        "days_until": occurrence.days_until,
        "is_today": occurrence.is_today(),
        "turning": occurrence.turning,
    })
}

pub(super) fn calendar_birthday_json(birthday: &CalendarBirthday) -> Value {
    json!({
        "person": person_json(&birthday.person),
        "date": format_date(birthday.date),
        "day": birthday.date.day(),
        "timing": birthday.timing.as_str(),
        "turning": birthday.turning,
    })
}

pub(super) fn calendar_day_json(day: &CalendarDay) -> Value {
    json!({
        "date": format_date(day.date),
        "timing": day.timing.as_str(),
        "birthdays": day.birthdays.iter().map(calendar_birthday_json).collect::<Vec<_>>(),
    })
}

pub(super) fn month_ref_json(month: DisplayMonth) -> Value {
    json!({ "year": month.year(), "month": u8::from(month.month()) })
}

pub(super) fn wishlist_item_json(item: &WishlistItem) -> Value {
    json!({
        "id": item.id,
        "owner": item.owner,
        "title": item.title,
        "url": item.url,
        "note": item.note,
        "created_at": crate::ts_ms_to_rfc3339(item.created_at_ms),
    })
}
