#![forbid(unsafe_code)]

pub mod birthdays;
pub mod friends;

pub mod ids {
    #[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
    pub struct PersonId(String);

    impl PersonId {
        pub fn as_str(&self) -> &str {
            &self.0
        }

        pub fn into_string(self) -> String {
            self.0
        }

        pub fn try_new(value: impl Into<String>) -> Result<Self, PersonIdError> {
            let value = value.into();
            let trimmed = value.trim();
            validate_person_id(trimmed)?;
            Ok(Self(trimmed.to_string()))
        }
    }

    #[derive(Clone, Debug, PartialEq, Eq)]
    pub enum PersonIdError {
        Empty,
        TooLong,
        ContainsControl,
    }

    impl PersonIdError {
        pub fn message(&self) -> &'static str {
            match self {
                Self::Empty => "person id must not be empty",
                Self::TooLong => "person id is too long",
                Self::ContainsControl => "person id contains control characters",
            }
        }
    }

    fn validate_person_id(value: &str) -> Result<(), PersonIdError> {
        if value.is_empty() {
            return Err(PersonIdError::Empty);
        }
        if value.len() > 128 {
            return Err(PersonIdError::TooLong);
        }
        if value.chars().any(|c| c.is_control()) {
            return Err(PersonIdError::ContainsControl);
        }
        Ok(())
    }

    /// Friendship edge id: `FR-` followed by 32 lowercase hex chars.
    #[derive(Clone, Debug, PartialEq, Eq, Hash)]
    pub struct FriendshipId(String);

    pub const FRIENDSHIP_ID_PREFIX: &str = "FR-";

    impl FriendshipId {
        pub fn as_str(&self) -> &str {
            &self.0
        }

        pub fn into_string(self) -> String {
            self.0
        }

        pub fn try_new(value: impl Into<String>) -> Result<Self, FriendshipIdError> {
            let value = value.into();
            let trimmed = value.trim();
            validate_friendship_id(trimmed)?;
            Ok(Self(trimmed.to_string()))
        }
    }

    #[derive(Clone, Debug, PartialEq, Eq)]
    pub enum FriendshipIdError {
        Empty,
        InvalidFormat,
    }

    impl FriendshipIdError {
        pub fn message(&self) -> &'static str {
            match self {
                Self::Empty => "friendship id must not be empty",
                Self::InvalidFormat => "friendship id must match FR-[0-9a-f]{32}",
            }
        }
    }

    fn validate_friendship_id(value: &str) -> Result<(), FriendshipIdError> {
        if value.is_empty() {
            return Err(FriendshipIdError::Empty);
        }
        let Some(hex) = value.strip_prefix(FRIENDSHIP_ID_PREFIX) else {
            return Err(FriendshipIdError::InvalidFormat);
        };
        if hex.len() != 32 {
            return Err(FriendshipIdError::InvalidFormat);
        }
        if !hex.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f')) {
            return Err(FriendshipIdError::InvalidFormat);
        }
        Ok(())
    }
}

pub mod model {
    use time::Date;

    #[derive(Clone, Debug, PartialEq, Eq)]
    pub struct Person {
        pub id: String,
        pub display_name: Option<String>,
        pub birth_date: Option<Date>,
    }

    impl Person {
        /// Display name when set, otherwise the id.
        pub fn label(&self) -> &str {
            match self.display_name.as_deref().map(str::trim) {
                Some(name) if !name.is_empty() => name,
                _ => &self.id,
            }
        }
    }

    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub enum FriendshipStatus {
        Pending,
        Accepted,
        Declined,
    }

    impl FriendshipStatus {
        pub fn as_str(self) -> &'static str {
            match self {
                Self::Pending => "pending",
                Self::Accepted => "accepted",
                Self::Declined => "declined",
            }
        }

        pub fn parse(value: &str) -> Option<Self> {
            match value.trim() {
                "pending" => Some(Self::Pending),
                "accepted" => Some(Self::Accepted),
                "declined" => Some(Self::Declined),
                _ => None,
            }
        }
    }

    #[derive(Clone, Debug, PartialEq, Eq)]
    pub struct FriendshipEdge {
        pub id: String,
        pub requester: String,
        pub addressee: String,
        pub status: FriendshipStatus,
    }

    impl FriendshipEdge {
        pub fn involves(&self, person_id: &str) -> bool {
            self.requester == person_id || self.addressee == person_id
        }
    }
}

pub mod dates {
    use time::{Date, Month};

    #[derive(Clone, Debug, PartialEq, Eq)]
    pub enum DateParseError {
        Empty,
        InvalidFormat,
        InvalidMonth,
        OutOfRange,
    }

    impl DateParseError {
        pub fn message(&self) -> &'static str {
            match self {
                Self::Empty => "date must not be empty",
                Self::InvalidFormat => "date must be formatted as YYYY-MM-DD",
                Self::InvalidMonth => "month must be within 1..=12",
                Self::OutOfRange => "date does not exist in the calendar",
            }
        }
    }

    /// Parses a `YYYY-MM-DD` calendar date.
    pub fn parse_date(value: &str) -> Result<Date, DateParseError> {
        let value = value.trim();
        if value.is_empty() {
            return Err(DateParseError::Empty);
        }

        let mut parts = value.split('-');
        let (Some(year), Some(month), Some(day), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(DateParseError::InvalidFormat);
        };
        if year.len() != 4 || month.len() != 2 || day.len() != 2 {
            return Err(DateParseError::InvalidFormat);
        }

        let year = year
            .parse::<i32>()
            .map_err(|_| DateParseError::InvalidFormat)?;
        let month = month
            .parse::<u8>()
            .map_err(|_| DateParseError::InvalidFormat)?;
        let day = day.parse::<u8>().map_err(|_| DateParseError::InvalidFormat)?;

        let month = parse_month(month)?;
        Date::from_calendar_date(year, month, day).map_err(|_| DateParseError::OutOfRange)
    }

    pub fn parse_month(value: u8) -> Result<Month, DateParseError> {
        Month::try_from(value).map_err(|_| DateParseError::InvalidMonth)
    }

    pub fn format_date(date: Date) -> String {
        format!(
            "{:04}-{:02}-{:02}",
            date.year(),
            u8::from(date.month()),
            date.day()
        )
    }

    pub fn days_in_month(year: i32, month: Month) -> u8 {
        match month {
            Month::January
            | Month::March
            | Month::May
            | Month::July
            | Month::August
            | Month::October
            | Month::December => 31,
            Month::April | Month::June | Month::September | Month::November => 30,
            Month::February => {
                if time::util::is_leap_year(year) {
                    29
                } else {
                    28
                }
            }
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn parse_date_accepts_iso_calendar_dates() {
            let date = parse_date(" 1990-02-14 ").unwrap();
            assert_eq!(date.year(), 1990);
            assert_eq!(date.month(), Month::February);
            assert_eq!(date.day(), 14);
            assert_eq!(format_date(date), "1990-02-14");
        }

        #[test]
        fn parse_date_rejects_bad_shapes() {
            assert_eq!(parse_date("").unwrap_err(), DateParseError::Empty);
            assert_eq!(
                parse_date("1990/02/14").unwrap_err(),
                DateParseError::InvalidFormat
            );
            assert_eq!(
                parse_date("1990-2-14").unwrap_err(),
                DateParseError::InvalidFormat
            );
            assert_eq!(
                parse_date("1990-13-01").unwrap_err(),
                DateParseError::InvalidMonth
            );
            assert_eq!(
                parse_date("2023-02-29").unwrap_err(),
                DateParseError::OutOfRange
            );
            assert!(parse_date("2024-02-29").is_ok());
        }

        #[test]
        fn days_in_month_tracks_leap_years() {
            assert_eq!(days_in_month(2024, Month::February), 29);
            assert_eq!(days_in_month(2023, Month::February), 28);
            assert_eq!(days_in_month(1900, Month::February), 28);
            assert_eq!(days_in_month(2000, Month::February), 29);
            assert_eq!(days_in_month(2023, Month::April), 30);
            assert_eq!(days_in_month(2023, Month::December), 31);
        }
    }
}
