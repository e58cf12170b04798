//! Conversion between raw wire objects and domain records.
//!
//! The upstream sends nearly everything as strings, including numbers
//! (`"WAITING_SECONDS": "-45"`, `"LATITUDE": "33.7489"`). The coercion helpers
//! here accept either a JSON string or a JSON number for such fields.

use std::borrow::Cow;

use serde_json::{Map, Value};

use crate::domain::time::{
    format_arrival_time, format_event_time, parse_arrival_time, parse_event_time,
};
use crate::domain::{
    ArrivalRecord, BusRecord, Direction, Line, RecordError, StationName, WaitingStatus,
};

use super::schema::{ARRIVAL_KEYS, validate_keys};

/// One raw feed record: a JSON object keyed by upper-case wire names.
pub type RawRecord = Map<String, Value>;

/// Validate and normalize one rail arrival object.
///
/// The key set must match [`ARRIVAL_KEYS`] exactly. The original object is
/// kept on the record so that [`ArrivalRecord::to_wire`] can return it
/// verbatim.
pub fn arrival_from_wire(raw: &RawRecord) -> Result<ArrivalRecord, RecordError> {
    validate_keys(raw, &ARRIVAL_KEYS)?;

    let station = StationName::new(required_text(raw, "STATION")?);
    let line = Line::from_wire(&required_text(raw, "LINE")?);
    let destination = required_text(raw, "DESTINATION")?.into_owned();
    let direction = Direction::parse(&required_text(raw, "DIRECTION")?)?;
    let next_arrival = parse_arrival_time("NEXT_ARR", &required_text(raw, "NEXT_ARR")?)?;
    let waiting_time = WaitingStatus::from_wire(&required_text(raw, "WAITING_TIME")?);
    let waiting_seconds = required_integer(raw, "WAITING_SECONDS")?;
    let event_time = parse_event_time("EVENT_TIME", &required_text(raw, "EVENT_TIME")?)?;
    let train_id = required_text(raw, "TRAIN_ID")?.into_owned();

    Ok(ArrivalRecord {
        station,
        line,
        destination,
        direction,
        next_arrival,
        waiting_time,
        waiting_seconds,
        event_time,
        train_id,
        payload: Some(raw.clone()),
    })
}

/// Compute the wire object for an arrival from its typed fields.
///
/// Timestamps are formatted with the same patterns used to parse them, so
/// the result always normalizes back to an equal record.
pub fn arrival_to_wire(record: &ArrivalRecord) -> RawRecord {
    let mut raw = RawRecord::new();
    raw.insert("DESTINATION".into(), record.destination.clone().into());
    raw.insert("DIRECTION".into(), record.direction.as_str().into());
    raw.insert(
        "EVENT_TIME".into(),
        format_event_time(record.event_time).into(),
    );
    raw.insert("LINE".into(), record.line.as_str().into());
    raw.insert(
        "NEXT_ARR".into(),
        format_arrival_time(record.next_arrival).into(),
    );
    raw.insert("STATION".into(), record.station.as_str().into());
    raw.insert("TRAIN_ID".into(), record.train_id.clone().into());
    raw.insert(
        "WAITING_SECONDS".into(),
        record.waiting_seconds.to_string().into(),
    );
    raw.insert(
        "WAITING_TIME".into(),
        record.waiting_time.as_wire().into_owned().into(),
    );
    raw
}

/// Normalize one bus position object.
///
/// Bus objects are not key-checked: absent text fields become empty strings,
/// absent numbers and timestamps become `None`, and unknown keys are ignored
/// (they survive in the stored payload).
pub fn bus_from_wire(raw: &RawRecord) -> Result<BusRecord, RecordError> {
    Ok(BusRecord {
        adherence: optional_integer(raw, "ADHERENCE")?,
        block_id: text_or_empty(raw, "BLOCKID")?,
        block_abbr: text_or_empty(raw, "BLOCK_ABBR")?,
        direction: text_or_empty(raw, "DIRECTION")?,
        latitude: optional_float(raw, "LATITUDE")?,
        longitude: optional_float(raw, "LONGITUDE")?,
        message_time: optional_event_time(raw, "MSGTIME")?,
        route: text_or_empty(raw, "ROUTE")?,
        stop_id: text_or_empty(raw, "STOPID")?,
        timepoint: text_or_empty(raw, "TIMEPOINT")?,
        trip_id: text_or_empty(raw, "TRIPID")?,
        vehicle: text_or_empty(raw, "VEHICLE")?,
        payload: Some(raw.clone()),
    })
}

/// Compute the wire object for a bus from its typed fields.
///
/// Absent values are written as empty strings, matching the feed.
pub fn bus_to_wire(record: &BusRecord) -> RawRecord {
    fn or_empty<T: ToString>(value: Option<T>) -> Value {
        value.map(|v| v.to_string()).unwrap_or_default().into()
    }

    let mut raw = RawRecord::new();
    raw.insert("ADHERENCE".into(), or_empty(record.adherence));
    raw.insert("BLOCKID".into(), record.block_id.clone().into());
    raw.insert("BLOCK_ABBR".into(), record.block_abbr.clone().into());
    raw.insert("DIRECTION".into(), record.direction.clone().into());
    raw.insert("LATITUDE".into(), or_empty(record.latitude));
    raw.insert("LONGITUDE".into(), or_empty(record.longitude));
    raw.insert(
        "MSGTIME".into(),
        or_empty(record.message_time.map(format_event_time)),
    );
    raw.insert("ROUTE".into(), record.route.clone().into());
    raw.insert("STOPID".into(), record.stop_id.clone().into());
    raw.insert("TIMEPOINT".into(), record.timepoint.clone().into());
    raw.insert("TRIPID".into(), record.trip_id.clone().into());
    raw.insert("VEHICLE".into(), record.vehicle.clone().into());
    raw
}

/// Text value of a required field. Numbers are rendered as text.
fn required_text<'a>(raw: &'a RawRecord, key: &'static str) -> Result<Cow<'a, str>, RecordError> {
    optional_text(raw, key)?.ok_or(RecordError::MissingField(key))
}

/// Text value of a field that may be absent or null.
fn optional_text<'a>(
    raw: &'a RawRecord,
    key: &'static str,
) -> Result<Option<Cow<'a, str>>, RecordError> {
    match raw.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(Cow::Borrowed(s))),
        Some(Value::Number(n)) => Ok(Some(Cow::Owned(n.to_string()))),
        Some(other) => Err(RecordError::InvalidField {
            field: key,
            value: other.to_string(),
        }),
    }
}

fn text_or_empty(raw: &RawRecord, key: &'static str) -> Result<String, RecordError> {
    Ok(optional_text(raw, key)?
        .map(Cow::into_owned)
        .unwrap_or_default())
}

/// Non-empty text of an optional field; empty strings count as absent.
fn non_empty_text<'a>(
    raw: &'a RawRecord,
    key: &'static str,
) -> Result<Option<Cow<'a, str>>, RecordError> {
    Ok(optional_text(raw, key)?.filter(|s| !s.trim().is_empty()))
}

fn required_integer(raw: &RawRecord, key: &'static str) -> Result<i64, RecordError> {
    optional_integer(raw, key)?.ok_or(RecordError::MissingField(key))
}

fn optional_integer(raw: &RawRecord, key: &'static str) -> Result<Option<i64>, RecordError> {
    let Some(text) = non_empty_text(raw, key)? else {
        return Ok(None);
    };
    text.trim()
        .parse()
        .map(Some)
        .map_err(|_| RecordError::InvalidField {
            field: key,
            value: text.into_owned(),
        })
}

fn optional_float(raw: &RawRecord, key: &'static str) -> Result<Option<f64>, RecordError> {
    let Some(text) = non_empty_text(raw, key)? else {
        return Ok(None);
    };
    match text.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(Some(v)),
        _ => Err(RecordError::InvalidField {
            field: key,
            value: text.into_owned(),
        }),
    }
}

fn optional_event_time(
    raw: &RawRecord,
    key: &'static str,
) -> Result<Option<chrono::NaiveDateTime>, RecordError> {
    non_empty_text(raw, key)?
        .map(|text| parse_event_time(key, &text))
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{arrival_raw, bus_raw};
    use chrono::{NaiveDate, NaiveTime};
    use serde_json::json;

    #[test]
    fn normalize_arrival() {
        let record = arrival_from_wire(&arrival_raw()).unwrap();

        assert_eq!(record.station().as_str(), "NORTH SPRINGS STATION");
        assert_eq!(record.line(), &Line::Blue);
        assert_eq!(record.destination(), "North Springs");
        assert_eq!(record.direction(), Direction::North);
        assert_eq!(
            record.next_arrival(),
            NaiveTime::from_hms_opt(16, 12, 10).unwrap()
        );
        assert_eq!(record.waiting_time(), &WaitingStatus::Boarding);
        assert_eq!(record.waiting_seconds(), -45);
        assert_eq!(
            record.event_time(),
            NaiveDate::from_ymd_opt(2017, 12, 31)
                .unwrap()
                .and_hms_opt(16, 9, 10)
                .unwrap()
        );
        assert_eq!(record.train_id(), "104026");
    }

    #[test]
    fn station_is_uppercased() {
        let mut raw = arrival_raw();
        raw.insert("STATION".into(), "Lenox Station".into());
        let record = arrival_from_wire(&raw).unwrap();
        assert_eq!(record.station().as_str(), "LENOX STATION");
    }

    #[test]
    fn direction_is_case_insensitive() {
        let mut raw = arrival_raw();
        raw.insert("DIRECTION".into(), "s".into());
        let record = arrival_from_wire(&raw).unwrap();
        assert_eq!(record.direction(), Direction::South);
    }

    #[test]
    fn invalid_direction_names_accepted_set() {
        let mut raw = arrival_raw();
        raw.insert("DIRECTION".into(), "X".into());

        let err = arrival_from_wire(&raw).unwrap_err();
        assert_eq!(
            err,
            RecordError::InvalidEnum {
                field: "DIRECTION",
                value: "X".into(),
                accepted: &["N", "E", "W", "S"],
            }
        );
    }

    #[test]
    fn invalid_next_arrival_carries_raw_string() {
        let mut raw = arrival_raw();
        raw.insert("NEXT_ARR".into(), "soon".into());

        let err = arrival_from_wire(&raw).unwrap_err();
        assert!(matches!(
            err,
            RecordError::InvalidTimestamp { field: "NEXT_ARR", ref value, .. } if value == "soon"
        ));
    }

    #[test]
    fn invalid_event_time_is_fatal() {
        let mut raw = arrival_raw();
        raw.insert("EVENT_TIME".into(), "2017-12-31 16:09:10".into());

        let err = arrival_from_wire(&raw).unwrap_err();
        assert!(matches!(
            err,
            RecordError::InvalidTimestamp {
                field: "EVENT_TIME",
                ..
            }
        ));
    }

    #[test]
    fn schema_mismatch_before_field_parsing() {
        let mut raw = arrival_raw();
        raw.insert("DIRECTION".into(), "X".into());
        raw.insert("EXTRA".into(), "1".into());

        let err = arrival_from_wire(&raw).unwrap_err();
        assert!(matches!(err, RecordError::SchemaMismatch { .. }));
    }

    #[test]
    fn null_required_field_is_missing() {
        let mut raw = arrival_raw();
        raw.insert("TRAIN_ID".into(), Value::Null);

        let err = arrival_from_wire(&raw).unwrap_err();
        assert_eq!(err, RecordError::MissingField("TRAIN_ID"));
    }

    #[test]
    fn numeric_wire_values_are_accepted() {
        let mut raw = arrival_raw();
        raw.insert("WAITING_SECONDS".into(), json!(120));
        raw.insert("TRAIN_ID".into(), json!(104026));

        let record = arrival_from_wire(&raw).unwrap();
        assert_eq!(record.waiting_seconds(), 120);
        assert_eq!(record.train_id(), "104026");
    }

    #[test]
    fn non_numeric_waiting_seconds_is_rejected() {
        let mut raw = arrival_raw();
        raw.insert("WAITING_SECONDS".into(), "soon".into());

        let err = arrival_from_wire(&raw).unwrap_err();
        assert_eq!(
            err,
            RecordError::InvalidField {
                field: "WAITING_SECONDS",
                value: "soon".into(),
            }
        );
    }

    #[test]
    fn array_valued_field_is_rejected() {
        let mut raw = arrival_raw();
        raw.insert("LINE".into(), json!(["BLUE"]));

        let err = arrival_from_wire(&raw).unwrap_err();
        assert!(matches!(err, RecordError::InvalidField { field: "LINE", .. }));
    }

    #[test]
    fn computed_arrival_wire_matches_padded_input() {
        let raw = arrival_raw();
        let record = arrival_from_wire(&raw).unwrap();
        assert_eq!(arrival_to_wire(&record), raw);
    }

    #[test]
    fn normalize_bus() {
        let bus = bus_from_wire(&bus_raw("2345", "Westbound")).unwrap();

        assert_eq!(bus.vehicle(), "2345");
        assert_eq!(bus.direction(), "Westbound");
        assert_eq!(bus.adherence(), Some(-2));
        assert_eq!(bus.latitude(), Some(33.7489));
        assert_eq!(bus.longitude(), Some(-84.3881));
        assert_eq!(bus.route(), "110");
        assert!(bus.message_time().is_some());
    }

    #[test]
    fn empty_bus_message_time_is_none() {
        let mut raw = bus_raw("2345", "Westbound");
        raw.insert("MSGTIME".into(), "".into());
        assert_eq!(bus_from_wire(&raw).unwrap().message_time(), None);

        raw.remove("MSGTIME");
        assert_eq!(bus_from_wire(&raw).unwrap().message_time(), None);
    }

    #[test]
    fn malformed_bus_message_time_is_an_error() {
        let mut raw = bus_raw("2345", "Westbound");
        raw.insert("MSGTIME".into(), "yesterday".into());

        let err = bus_from_wire(&raw).unwrap_err();
        assert!(matches!(
            err,
            RecordError::InvalidTimestamp { field: "MSGTIME", .. }
        ));
    }

    #[test]
    fn bus_tolerates_missing_and_extra_keys() {
        let raw = json!({
            "VEHICLE": "1501",
            "ROUTE": 2,
            "LATITUDE": 33.77,
            "SOMETHING_NEW": true
        });
        let bus = bus_from_wire(raw.as_object().unwrap()).unwrap();

        assert_eq!(bus.vehicle(), "1501");
        assert_eq!(bus.route(), "2");
        assert_eq!(bus.latitude(), Some(33.77));
        assert_eq!(bus.longitude(), None);
        assert_eq!(bus.direction(), "");
        assert_eq!(bus.adherence(), None);
    }

    #[test]
    fn bad_bus_coordinate_is_rejected() {
        let mut raw = bus_raw("2345", "Westbound");
        raw.insert("LATITUDE".into(), "north-ish".into());

        let err = bus_from_wire(&raw).unwrap_err();
        assert!(matches!(
            err,
            RecordError::InvalidField { field: "LATITUDE", .. }
        ));
    }

    #[test]
    fn computed_bus_wire_renormalizes_equal() {
        let bus = bus_from_wire(&bus_raw("2345", "Westbound")).unwrap();
        let computed = bus_to_wire(&bus);

        assert_eq!(computed.len(), 12);
        assert_eq!(bus_from_wire(&computed).unwrap(), bus);
    }
}
