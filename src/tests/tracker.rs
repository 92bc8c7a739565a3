use rstest::*;

use crate::{
    error::Error,
    prelude::{
        Config, GeoLocation, NullGeocoder, StateVectorRecord, StoreState, Tracker, Vector3,
    },
    tests::{epoch_str, init_logger, record_at, reference_epoch, TestGeocoder, TestSource},
};

/// Northern hemisphere sample at [REFERENCE_EPOCH], 629 km high.
fn northern_record() -> StateVectorRecord {
    StateVectorRecord::new(
        epoch_str(0),
        Vector3::new(7000.0, 0.0, 0.0),
        Vector3::new(3.0, 4.0, 0.0),
    )
}

fn data_set() -> Vec<StateVectorRecord> {
    vec![northern_record(), record_at(240, 0.0), record_at(480, 0.0)]
}

#[fixture]
fn tracker() -> Tracker<TestSource, TestGeocoder> {
    init_logger();
    let cfg = Config::default().with_source_url("http://localhost/oem.xml");
    Tracker::start(cfg, TestSource::new(data_set()), TestGeocoder::default()).unwrap()
}

#[rstest]
fn tracker_startup(tracker: Tracker<TestSource, TestGeocoder>) {
    assert_eq!(tracker.state(), StoreState::Loaded);
    assert_eq!(tracker.source().fetched.get(), 1);
    assert_eq!(*tracker.source().last_url.borrow(), "http://localhost/oem.xml");

    let epochs = tracker.epochs(None, None).unwrap();
    assert_eq!(epochs, vec![epoch_str(0), epoch_str(240), epoch_str(480)]);

    let epochs = tracker.epochs(Some("1"), Some("1")).unwrap();
    assert_eq!(epochs, vec![epoch_str(240)]);
}

#[rstest]
fn tracker_state_vector_and_speed(tracker: Tracker<TestSource, TestGeocoder>) {
    let sv = tracker.state_vector(&epoch_str(0)).unwrap();
    assert_eq!(sv, northern_record());

    let speed = tracker.speed(&epoch_str(0)).unwrap();
    assert_eq!(speed.value, 5.0);
    assert_eq!(speed.units, "km/s");

    assert_eq!(
        tracker.speed("2023-048T13:00:00.000Z"),
        Err(Error::EpochNotFound("2023-048T13:00:00.000Z".to_string()))
    );
}

#[rstest]
fn tracker_location(tracker: Tracker<TestSource, TestGeocoder>) {
    let report = tracker.location(&epoch_str(0)).unwrap();

    assert_eq!(report.epoch, epoch_str(0));
    assert_eq!(report.location.latitude, 0.0);
    assert_eq!(report.location.longitude, 24.0);
    assert!((report.location.altitude.value - 629.0).abs() < 1.0E-9);
    assert_eq!(report.speed.value, 5.0);

    match &report.geo {
        GeoLocation::Address(fields) => {
            assert_eq!(fields.get("country").map(|s| s.as_str()), Some("Canada"));
        },
        other => panic!("expecting an address, got {}", other),
    }

    let opts = tracker.geocoder().last_opts.borrow().clone().unwrap();
    assert_eq!(opts, tracker.config().geocoding);

    let report = tracker.location(&epoch_str(240)).unwrap();
    assert!(report.location.latitude < 0.0);
    assert_eq!(report.geo, GeoLocation::OverWater);
}

#[rstest]
fn tracker_geocoder_failure(tracker: Tracker<TestSource, TestGeocoder>) {
    tracker.geocoder().failure.set(true);

    let report = tracker.location(&epoch_str(0)).unwrap();
    assert_eq!(report.geo, GeoLocation::Unresolved);
    assert_eq!(report.speed.value, 5.0);
}

#[rstest]
fn tracker_location_at(tracker: Tracker<TestSource, TestGeocoder>) {
    let t = reference_epoch() + hifitime::Unit::Second * 200.0;
    let report = tracker.location_at(t).unwrap();

    assert_eq!(report.closest_epoch, epoch_str(240));
    assert!((report.seconds_from_now - 40.0).abs() < 1.0E-6);
    assert_eq!(report.geo, GeoLocation::OverWater);

    // data set lies in the past
    let report = tracker.location_now().unwrap();
    assert_eq!(report.closest_epoch, epoch_str(480));
    assert!(report.seconds_from_now < 0.0);
}

#[rstest]
fn tracker_clear_reload(tracker: Tracker<TestSource, TestGeocoder>) {
    tracker.clear();
    assert_eq!(tracker.state(), StoreState::Empty);

    assert_eq!(tracker.epochs(None, None), Err(Error::EmptyStore));
    assert_eq!(tracker.epochs(Some("-1"), None), Err(Error::EmptyStore));
    assert_eq!(tracker.state_vector(&epoch_str(0)), Err(Error::EmptyStore));
    assert_eq!(tracker.speed(&epoch_str(0)), Err(Error::EmptyStore));
    assert_eq!(tracker.location(&epoch_str(0)), Err(Error::EmptyStore));
    assert_eq!(tracker.location_at(reference_epoch()), Err(Error::EmptyStore));

    assert_eq!(tracker.reload(), Ok(3));
    assert_eq!(tracker.state(), StoreState::Loaded);
    assert!(tracker.location(&epoch_str(0)).is_ok());
}

#[rstest]
fn tracker_reload_failure(tracker: Tracker<TestSource, TestGeocoder>) {
    tracker.source().failure.set(true);

    assert!(matches!(tracker.reload(), Err(Error::Source(_))));

    // untouched
    assert_eq!(tracker.state(), StoreState::Loaded);
    assert_eq!(tracker.epochs(None, None).unwrap().len(), 3);

    tracker.clear();
    assert!(matches!(tracker.reload(), Err(Error::Source(_))));
    assert_eq!(tracker.state(), StoreState::Empty);
    assert_eq!(tracker.source().fetched.get(), 3);
}

#[test]
fn tracker_startup_failure() {
    let source = TestSource::new(data_set());
    source.failure.set(true);

    let tracker = Tracker::start(Config::default(), source, NullGeocoder::default());
    assert!(matches!(tracker, Err(Error::Source(_))));
}

#[test]
fn tracker_malformed_record() {
    let source = TestSource::new(vec![StateVectorRecord::new(
        "2023-048T25:00:00.000Z",
        Vector3::new(7000.0, 0.0, 0.0),
        Vector3::new(3.0, 4.0, 0.0),
    )]);

    let tracker = Tracker::start(Config::default(), source, NullGeocoder::default()).unwrap();

    // exact lookup still works, transform does not
    assert!(tracker.state_vector("2023-048T25:00:00.000Z").is_ok());
    assert_eq!(tracker.speed("2023-048T25:00:00.000Z").unwrap().value, 5.0);
    assert!(matches!(
        tracker.location("2023-048T25:00:00.000Z"),
        Err(Error::MalformedRecord(_))
    ));
    assert!(matches!(
        tracker.location("2023-048T12:00:00.000Z"),
        Err(Error::EpochNotFound(_))
    ));
}

#[test]
fn tracker_default_limit() {
    let cfg = Config::default().with_default_limit(Some(2));
    let tracker = Tracker::start(cfg, TestSource::new(data_set()), NullGeocoder::default()).unwrap();

    assert_eq!(tracker.epochs(None, None).unwrap().len(), 2);
    assert_eq!(tracker.epochs(Some("3"), None).unwrap().len(), 3);

    let report = tracker.location(&epoch_str(0)).unwrap();
    assert_eq!(report.geo, GeoLocation::Unresolved);
}

#[rstest]
#[cfg(feature = "serde")]
fn tracker_report_serialization(tracker: Tracker<TestSource, TestGeocoder>) {
    let report = tracker.location(&epoch_str(0)).unwrap();
    let value = serde_json::to_value(&report).unwrap();

    assert_eq!(value["epoch"], epoch_str(0));
    assert_eq!(value["speed"]["units"], "km/s");
    assert_eq!(value["location"]["altitude"]["units"], "km");
    assert_eq!(value["geo"]["Address"]["state"], "Quebec");
}
