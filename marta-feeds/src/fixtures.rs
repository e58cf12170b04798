//! Canned feed records for unit tests.

use serde_json::Value;

use crate::domain::ArrivalRecord;
use crate::wire::RawRecord;

/// A Blue line arrival at North Springs, as the feed sends it.
pub fn arrival_raw() -> RawRecord {
    let value = serde_json::json!({
        "DESTINATION": "North Springs",
        "DIRECTION": "N",
        "EVENT_TIME": "12/31/2017 04:09:10 PM",
        "LINE": "BLUE",
        "NEXT_ARR": "04:12:10 PM",
        "STATION": "NORTH SPRINGS STATION",
        "TRAIN_ID": "104026",
        "WAITING_SECONDS": "-45",
        "WAITING_TIME": "Boarding"
    });
    match value {
        Value::Object(raw) => raw,
        _ => unreachable!(),
    }
}

/// [`arrival_raw`] with some keys overridden.
pub fn arrival_raw_with(overrides: &[(&str, &str)]) -> RawRecord {
    let mut raw = arrival_raw();
    for (key, value) in overrides {
        raw.insert((*key).to_string(), (*value).into());
    }
    raw
}

/// Raw arrival for the given station, line, direction, arrival time and train.
pub fn arrival_value(
    station: &str,
    line: &str,
    direction: &str,
    next_arr: &str,
    train_id: &str,
) -> Value {
    Value::Object(arrival_raw_with(&[
        ("STATION", station),
        ("LINE", line),
        ("DIRECTION", direction),
        ("NEXT_ARR", next_arr),
        ("TRAIN_ID", train_id),
    ]))
}

/// Normalized arrival, see [`arrival_value`].
pub fn arrival(
    station: &str,
    line: &str,
    direction: &str,
    next_arr: &str,
    train_id: &str,
) -> ArrivalRecord {
    match arrival_value(station, line, direction, next_arr, train_id) {
        Value::Object(raw) => ArrivalRecord::from_wire(&raw).unwrap(),
        _ => unreachable!(),
    }
}

/// A route 110 bus, as the feed sends it.
pub fn bus_raw(vehicle: &str, direction: &str) -> RawRecord {
    let value = serde_json::json!({
        "ADHERENCE": "-2",
        "BLOCKID": "1010",
        "BLOCK_ABBR": "110-6",
        "DIRECTION": direction,
        "LATITUDE": "33.7489",
        "LONGITUDE": "-84.3881",
        "MSGTIME": "6/1/2018 9:15:42 AM",
        "ROUTE": "110",
        "STOPID": "907933",
        "TIMEPOINT": "Arts Center Station",
        "TRIPID": "6059425",
        "VEHICLE": vehicle
    });
    match value {
        Value::Object(raw) => raw,
        _ => unreachable!(),
    }
}

/// Raw bus for the given vehicle, direction and route.
pub fn bus_value(vehicle: &str, direction: &str, route: &str) -> Value {
    let mut raw = bus_raw(vehicle, direction);
    raw.insert("ROUTE".into(), route.into());
    Value::Object(raw)
}
