use chrono::NaiveDateTime;

pub const DATE_FMT: &str = "%Y-%m-%dT%H:%M:%S%.f";
pub const DAY_FMT: &str = "%Y-%m-%d";

pub fn format_timestamp(time: NaiveDateTime) -> String {
    format!("{}", time.format(DATE_FMT))
}

pub fn format_day(time: NaiveDateTime) -> String {
    format!("{}", time.format(DAY_FMT))
}

// calendar days from `due` to `now`, ignoring time of day; never negative
pub fn calendar_days_overdue(now: NaiveDateTime, due: NaiveDateTime) -> i64 {
    (now.date() - due.date()).num_days().max(0)
}

// complete 24h periods from `due` to `now`; never negative
pub fn whole_days_overdue(now: NaiveDateTime, due: NaiveDateTime) -> i64 {
    (now - due).num_days().max(0)
}

pub mod serializer {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use serde::de::Error;
    use crate::utils::date::{format_timestamp, DATE_FMT};

    pub fn serialize<S: Serializer>(time: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        format_timestamp(*time).serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let str_time: String = Deserialize::deserialize(deserializer)?;
        let time = NaiveDateTime::parse_from_str(&str_time, DATE_FMT).map_err(D::Error::custom)?;
        Ok(time)
    }
}

pub mod opt_serializer {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use serde::de::Error;
    use crate::utils::date::{format_timestamp, DATE_FMT};

    pub fn serialize<S: Serializer>(time: &Option<NaiveDateTime>, serializer: S) -> Result<S::Ok, S::Error> {
        time.map(format_timestamp).serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error> {
        let str_time: Option<String> = Deserialize::deserialize(deserializer)?;
        match str_time {
            Some(str_time) if !str_time.is_empty() => {
                NaiveDateTime::parse_from_str(&str_time, DATE_FMT).map(Some).map_err(D::Error::custom)
            }
            _ => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, NaiveDate, NaiveDateTime};
    use serde::{Deserialize, Serialize};
    use crate::utils::date::{calendar_days_overdue, format_day, format_timestamp, whole_days_overdue};

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Stamped {
        #[serde(with = "crate::utils::date::serializer")]
        at: NaiveDateTime,
        #[serde(with = "crate::utils::date::opt_serializer")]
        until: Option<NaiveDateTime>,
    }

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d).and_then(|date| date.and_hms_opt(h, min, 0)).expect("valid date")
    }

    #[tokio::test]
    async fn test_should_serialize_dates() {
        let stamped = Stamped { at: at(2023, 4, 12, 12, 12), until: None };
        let json = serde_json::to_string(&stamped).expect("should serialize");
        assert_eq!(r#"{"at":"2023-04-12T12:12:00","until":null}"#, json);
        let loaded: Stamped = serde_json::from_str(json.as_str()).expect("should deserialize");
        assert_eq!(stamped, loaded);

        let stamped = Stamped { at: at(2023, 4, 12, 12, 12), until: Some(at(2023, 4, 26, 8, 0)) };
        let json = serde_json::to_string(&stamped).expect("should serialize");
        let loaded: Stamped = serde_json::from_str(json.as_str()).expect("should deserialize");
        assert_eq!(stamped, loaded);
    }

    #[tokio::test]
    async fn test_should_format_dates() {
        assert_eq!("2023-04-12", format_day(at(2023, 4, 12, 23, 59)));
        assert_eq!("2023-04-12T23:59:00", format_timestamp(at(2023, 4, 12, 23, 59)));
    }

    #[tokio::test]
    async fn test_should_count_calendar_days_ignoring_time_of_day() {
        // late in the evening vs. early next morning is one calendar day
        assert_eq!(1, calendar_days_overdue(at(2023, 4, 13, 0, 5), at(2023, 4, 12, 23, 55)));
        assert_eq!(0, whole_days_overdue(at(2023, 4, 13, 0, 5), at(2023, 4, 12, 23, 55)));
        assert_eq!(0, calendar_days_overdue(at(2023, 4, 12, 0, 5), at(2023, 4, 12, 23, 55)));
        assert_eq!(0, calendar_days_overdue(at(2023, 4, 1, 0, 0), at(2023, 4, 12, 0, 0)));
        let due = at(2023, 4, 1, 10, 0);
        assert_eq!(40, calendar_days_overdue(due + Duration::days(40), due));
        assert_eq!(40, whole_days_overdue(due + Duration::days(40), due));
    }
}
