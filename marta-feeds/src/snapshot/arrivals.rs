//! Rail arrival snapshots.

use std::collections::{BTreeMap, BTreeSet};

use serde_json::Value;
use tracing::{debug, warn};

use crate::domain::{
    ArrivalField, ArrivalRecord, Direction, Line, RecordError, StationName, WaitingStatus,
};
use crate::stations::StationDirectory;

use super::{BatchPolicy, FieldValue, Notice, Snapshot};

/// The arrivals returned by one rail fetch, sorted by next arrival time.
pub type Arrivals = Snapshot<ArrivalRecord>;

impl Snapshot<ArrivalRecord> {
    /// Build a rail snapshot from the raw feed array.
    ///
    /// Records are sorted by next arrival time (ties keep feed order). Any
    /// station the directory has not seen before is registered, in name
    /// order, and reported as a [`Notice::NewStation`].
    ///
    /// This is the only way to build a rail snapshot from raw data; the
    /// generic constructor is not public.
    ///
    /// ```compile_fail
    /// use marta_feeds::{Arrivals, BatchPolicy};
    ///
    /// let _ = Arrivals::from_wire(&[], BatchPolicy::Strict);
    /// ```
    pub fn from_arrivals(
        values: &[Value],
        directory: &StationDirectory,
        policy: BatchPolicy,
    ) -> Result<Self, RecordError> {
        let mut snapshot = Self::from_wire(values, policy)?;
        snapshot.sort_in_place(ArrivalField::NextArrival);

        let seen: BTreeSet<&StationName> = snapshot.iter().map(ArrivalRecord::station).collect();
        let added: Vec<StationName> = seen
            .into_iter()
            .filter(|name| directory.register(name.as_str()))
            .cloned()
            .collect();

        for station in added {
            warn!(%station, "new station observed in feed");
            snapshot.push_notice(Notice::NewStation(station));
        }

        debug!(records = snapshot.len(), "built arrivals snapshot");
        Ok(snapshot)
    }

    pub fn by_line(&self, line: &Line) -> Self {
        self.filter_by(ArrivalField::Line, line.as_str())
    }

    pub fn red_line(&self) -> Self {
        self.by_line(&Line::Red)
    }

    pub fn green_line(&self) -> Self {
        self.by_line(&Line::Green)
    }

    pub fn blue_line(&self) -> Self {
        self.by_line(&Line::Blue)
    }

    pub fn gold_line(&self) -> Self {
        self.by_line(&Line::Gold)
    }

    pub fn by_direction(&self, direction: Direction) -> Self {
        self.filter_by(ArrivalField::Direction, direction.as_str())
    }

    pub fn northbound(&self) -> Self {
        self.by_direction(Direction::North)
    }

    pub fn southbound(&self) -> Self {
        self.by_direction(Direction::South)
    }

    pub fn eastbound(&self) -> Self {
        self.by_direction(Direction::East)
    }

    pub fn westbound(&self) -> Self {
        self.by_direction(Direction::West)
    }

    pub fn by_waiting_status(&self, status: &WaitingStatus) -> Self {
        self.filter_by(ArrivalField::WaitingTime, FieldValue::Text(status.as_wire()))
    }

    pub fn boarding(&self) -> Self {
        self.by_waiting_status(&WaitingStatus::Boarding)
    }

    pub fn arriving(&self) -> Self {
        self.by_waiting_status(&WaitingStatus::Arriving)
    }

    pub fn arrived(&self) -> Self {
        self.by_waiting_status(&WaitingStatus::Arrived)
    }

    /// Arrivals grouped by train id, each train's stops sorted by arrival.
    pub fn trains(&self) -> BTreeMap<String, Self> {
        self.group_by(ArrivalField::TrainId)
            .into_iter()
            .map(|(key, bucket)| (key.to_string(), bucket.sorted_by(ArrivalField::NextArrival)))
            .collect()
    }

    /// Arrivals grouped by station; buckets keep snapshot order.
    pub fn stations(&self) -> BTreeMap<StationName, Self> {
        self.group_by(ArrivalField::Station)
            .into_iter()
            .map(|(key, bucket)| (StationName::new(key.to_string()), bucket))
            .collect()
    }

    /// Arrivals at the first known station whose name contains `partial`.
    ///
    /// An unmatched name is not an error: the result is empty and carries a
    /// [`Notice::UnresolvedStation`].
    ///
    /// # Examples
    ///
    /// ```
    /// use marta_feeds::{Arrivals, StationDirectory};
    ///
    /// let directory = StationDirectory::new();
    /// let arrivals = Arrivals::default();
    ///
    /// let result = arrivals.by_station(&directory, "nowhere");
    /// assert!(result.is_empty());
    /// assert_eq!(result.notices().len(), 1);
    /// ```
    pub fn by_station(&self, directory: &StationDirectory, partial: &str) -> Self {
        match directory.resolve(partial) {
            Some(station) => self.filter_by(ArrivalField::Station, station.as_str()),
            None => {
                warn!(partial, "no station matches name");
                let mut empty = Self::default();
                empty.push_notice(Notice::UnresolvedStation(partial.to_string()));
                empty
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{arrival_raw_with, arrival_value};
    use crate::snapshot::Record;
    use crate::stations::DEFAULT_STATIONS;

    fn feed() -> Vec<Value> {
        vec![
            arrival_value("PEACHTREE CENTER STATION", "RED", "N", "05:04:00 PM", "301"),
            arrival_value("FIVE POINTS STATION", "BLUE", "E", "05:01:00 PM", "102"),
            arrival_value("PEACHTREE CENTER STATION", "GOLD", "S", "05:02:00 PM", "405"),
            arrival_value("FIVE POINTS STATION", "RED", "N", "05:02:00 PM", "301"),
            arrival_value("AIRPORT STATION", "GOLD", "N", "05:00:00 PM", "405"),
        ]
    }

    fn arrivals(values: &[Value]) -> Arrivals {
        Arrivals::from_arrivals(values, &StationDirectory::new(), BatchPolicy::Strict).unwrap()
    }

    fn ids(snapshot: &Arrivals) -> Vec<&str> {
        snapshot.iter().map(ArrivalRecord::train_id).collect()
    }

    #[test]
    fn construction_sorts_by_arrival() {
        let snapshot = arrivals(&feed());
        let times: Vec<String> = snapshot
            .iter()
            .map(|a| a.field(ArrivalField::NextArrival).to_string())
            .collect();
        assert_eq!(
            times,
            vec!["05:00:00 PM", "05:01:00 PM", "05:02:00 PM", "05:02:00 PM", "05:04:00 PM"]
        );
        // Tie at 05:02 keeps feed order
        assert_eq!(snapshot[2].station().as_str(), "PEACHTREE CENTER STATION");
        assert_eq!(snapshot[3].station().as_str(), "FIVE POINTS STATION");
    }

    #[test]
    fn known_stations_raise_no_notice() {
        let snapshot = arrivals(&feed());
        assert!(snapshot.notices().is_empty());
    }

    #[test]
    fn line_filters() {
        let snapshot = arrivals(&feed());
        assert_eq!(snapshot.red_line().len(), 2);
        assert_eq!(snapshot.gold_line().len(), 2);
        assert_eq!(snapshot.blue_line().len(), 1);
        assert!(snapshot.green_line().is_empty());
        assert!(snapshot.red_line().iter().all(|a| *a.line() == Line::Red));
    }

    #[test]
    fn direction_filters() {
        let snapshot = arrivals(&feed());
        assert_eq!(snapshot.northbound().len(), 3);
        assert_eq!(snapshot.southbound().len(), 1);
        assert_eq!(snapshot.eastbound().len(), 1);
        assert!(snapshot.westbound().is_empty());
    }

    #[test]
    fn waiting_status_filters() {
        let values = vec![
            Value::Object(arrival_raw_with(&[("WAITING_TIME", "Boarding")])),
            Value::Object(arrival_raw_with(&[("WAITING_TIME", "Arriving")])),
            Value::Object(arrival_raw_with(&[("WAITING_TIME", "Arrived")])),
            Value::Object(arrival_raw_with(&[("WAITING_TIME", "4 min")])),
        ];
        let snapshot = arrivals(&values);

        assert_eq!(snapshot.boarding().len(), 1);
        assert_eq!(snapshot.arriving().len(), 1);
        assert_eq!(snapshot.arrived().len(), 1);
        assert_eq!(snapshot.by_waiting_status(&WaitingStatus::Minutes(4)).len(), 1);
    }

    #[test]
    fn trains_sorted_by_id_and_arrival() {
        let snapshot = arrivals(&feed());
        let trains = snapshot.trains();

        let keys: Vec<&str> = trains.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["102", "301", "405"]);

        let stops: Vec<&str> = trains["405"].iter().map(|a| a.station().as_str()).collect();
        assert_eq!(stops, vec!["AIRPORT STATION", "PEACHTREE CENTER STATION"]);
    }

    #[test]
    fn stations_grouped_in_snapshot_order() {
        let snapshot = arrivals(&feed());
        let stations = snapshot.stations();

        let names: Vec<&str> = stations.keys().map(StationName::as_str).collect();
        assert_eq!(
            names,
            vec!["AIRPORT STATION", "FIVE POINTS STATION", "PEACHTREE CENTER STATION"]
        );
        assert_eq!(ids(&stations[&StationName::new("five points station")]), vec!["102", "301"]);
    }

    #[test]
    fn by_station_resolves_partial_name() {
        let directory = StationDirectory::new();
        let snapshot = arrivals(&feed());

        let result = snapshot.by_station(&directory, "peachtree");
        assert!(!result.is_empty());
        assert!(result.iter().all(|a| a.station().as_str().contains("PEACHTREE")));
        assert!(result.notices().is_empty());
    }

    #[test]
    fn by_station_unmatched_is_empty_with_notice() {
        let directory = StationDirectory::new();
        let snapshot = arrivals(&feed());

        let result = snapshot.by_station(&directory, "springfield");
        assert!(result.is_empty());
        assert_eq!(
            result.notices(),
            [Notice::UnresolvedStation("springfield".to_string())]
        );
    }

    #[test]
    fn by_station_first_match_wins() {
        // NORTH AVE precedes NORTH SPRINGS in the directory
        let directory = StationDirectory::new();
        let values = vec![
            arrival_value("NORTH SPRINGS STATION", "RED", "N", "05:00:00 PM", "1"),
            arrival_value("NORTH AVE STATION", "RED", "N", "05:01:00 PM", "2"),
        ];
        let snapshot = Arrivals::from_arrivals(&values, &directory, BatchPolicy::Strict).unwrap();

        assert_eq!(ids(&snapshot.by_station(&directory, "north")), vec!["2"]);
    }

    #[test]
    fn new_station_extends_directory() {
        let directory = StationDirectory::new();
        let before = directory.len();
        let values = vec![
            arrival_value("New Station", "RED", "N", "05:00:00 PM", "1"),
            arrival_value("NEW STATION", "RED", "S", "05:01:00 PM", "2"),
        ];

        let snapshot = Arrivals::from_arrivals(&values, &directory, BatchPolicy::Strict).unwrap();
        assert_eq!(directory.len(), before + 1);
        assert!(directory.contains("NEW STATION"));
        assert_eq!(
            snapshot.notices(),
            [Notice::NewStation(StationName::new("NEW STATION"))]
        );

        // Seen now, so a second fetch is quiet
        let again = Arrivals::from_arrivals(&values, &directory, BatchPolicy::Strict).unwrap();
        assert!(again.notices().is_empty());
        assert_eq!(directory.len(), before + 1);
    }

    #[test]
    fn unsorted_feed_at_new_station_is_sorted_and_registered() {
        let directory = StationDirectory::new();
        let before = directory.len();
        let values = vec![
            arrival_value("NEW STATION", "RED", "N", "05:10:00 PM", "late"),
            arrival_value("NEW STATION", "RED", "N", "05:00:00 PM", "early"),
        ];

        let snapshot = Arrivals::from_arrivals(&values, &directory, BatchPolicy::Strict).unwrap();
        assert_eq!(ids(&snapshot), vec!["early", "late"]);
        assert_eq!(directory.len(), before + 1);
        assert_eq!(
            snapshot.notices(),
            [Notice::NewStation(StationName::new("NEW STATION"))]
        );
    }

    #[test]
    fn thirty_seven_names_grow_to_thirty_eight() {
        let directory = StationDirectory::from_names(&DEFAULT_STATIONS[..37]);
        assert_eq!(directory.len(), 37);

        let values = vec![arrival_value(DEFAULT_STATIONS[37], "GOLD", "N", "05:00:00 PM", "1")];
        let snapshot = Arrivals::from_arrivals(&values, &directory, BatchPolicy::Strict).unwrap();

        assert_eq!(directory.len(), 38);
        assert_eq!(snapshot.notices().len(), 1);
    }

    #[test]
    fn strict_failure_leaves_directory_alone() {
        let directory = StationDirectory::new();
        let before = directory.len();
        let values = vec![
            arrival_value("BRAND NEW STATION", "RED", "N", "05:00:00 PM", "1"),
            Value::Object(arrival_raw_with(&[("NEXT_ARR", "25:00:00 PM")])),
        ];

        let err = Arrivals::from_arrivals(&values, &directory, BatchPolicy::Strict).unwrap_err();
        assert!(matches!(err, RecordError::InvalidTimestamp { field: "NEXT_ARR", .. }));
        assert_eq!(directory.len(), before);
    }

    #[test]
    fn skip_policy_keeps_both_kinds_of_notice() {
        let directory = StationDirectory::new();
        let values = vec![
            arrival_value("BRAND NEW STATION", "RED", "N", "05:00:00 PM", "1"),
            Value::Object(arrival_raw_with(&[("DIRECTION", "Q")])),
        ];

        let snapshot =
            Arrivals::from_arrivals(&values, &directory, BatchPolicy::SkipInvalid).unwrap();
        assert_eq!(snapshot.len(), 1);
        assert!(matches!(
            snapshot.notices(),
            [Notice::SkippedRecord { index: 1, .. }, Notice::NewStation(_)]
        ));
    }
}
