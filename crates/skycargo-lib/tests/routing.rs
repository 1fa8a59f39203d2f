mod common;

use std::sync::Arc;

use common::{provider_with, ScriptedSource};
use skycargo_lib::{
    distance_km, plan_route, Airport, AirportRegistry, Error, FetchOutcome, GeoPoint,
    ObservationSource, RouteAlgorithm, RouteRequest, WeatherConfig, WeatherProvider,
};

fn simulated_weather() -> WeatherProvider {
    WeatherProvider::new(WeatherConfig::default()).expect("client builds")
}

fn live(origin: &str, destination: &str) -> RouteRequest {
    RouteRequest {
        use_real_weather: true,
        ..RouteRequest::new(origin, destination)
    }
}

#[test]
fn hong_kong_to_new_york_with_dashboard_defaults() {
    let registry = AirportRegistry::builtin();
    let plan = plan_route(registry, &simulated_weather(), &RouteRequest::new("HKG", "JFK"))
        .expect("route exists");

    assert_eq!(plan.path, vec!["HKG", "JFK"]);
    assert_eq!(plan.algorithm, RouteAlgorithm::Dijkstra);
    assert_eq!(plan.hop_count(), 1);
    assert!((plan.total_distance_km - 12_968.8).abs() < 1.0);
    assert!((plan.total_weight - 18_675.1).abs() / 18_675.1 < 0.01);
    assert!((plan.total_fuel_kg - 15_562.6).abs() < 1.0);
    assert_eq!(plan.avg_weather_penalty, 20.0);
    assert_eq!(plan.origin_weather.source, ObservationSource::Simulated);

    assert_eq!(plan.arc.len(), 50);
    let hkg = registry.lookup("HKG").unwrap().position;
    let jfk = registry.lookup("JFK").unwrap().position;
    assert!(distance_km(plan.arc[0], hkg) < 1e-6);
    assert!(distance_km(plan.arc[49], jfk) < 1e-6);

    assert_eq!(plan.waypoints.len(), 2);
    assert_eq!(plan.waypoints[0].name, "Hong Kong");
    assert_eq!(plan.waypoints[1].altitude, "FL350");
}

#[test]
fn unknown_airport_is_rejected_before_weather_lookup() {
    let source = Arc::new(ScriptedSource::new());
    let weather = provider_with(Arc::clone(&source));

    let err = plan_route(AirportRegistry::builtin(), &weather, &live("HKG", "ZZZ"))
        .expect_err("ZZZ is not served");
    assert!(matches!(err, Error::UnknownAirport { ref code, .. } if code == "ZZZ"));
    assert_eq!(source.total_calls(), 0);
    assert!(weather.cache().is_empty());
}

#[test]
fn unknown_origin_offers_suggestions() {
    let err = plan_route(
        AirportRegistry::builtin(),
        &simulated_weather(),
        &RouteRequest::new("HKX", "JFK"),
    )
    .expect_err("HKX is not served");
    assert!(err.to_string().contains("HKG"));
}

#[test]
fn live_weather_feeds_the_average_penalty() {
    let source = Arc::new(
        ScriptedSource::new()
            .with_report("HKG", 5.0, 10.0)
            .with_report("JFK", 30.0, 10.0),
    );
    let weather = provider_with(Arc::clone(&source));

    let plan = plan_route(AirportRegistry::builtin(), &weather, &live("HKG", "JFK"))
        .expect("route exists");
    assert_eq!(plan.origin_weather.penalty, 0.0);
    assert!((plan.destination_weather.penalty - 20.0).abs() < 1e-9);
    assert!((plan.avg_weather_penalty - 10.0).abs() < 1e-9);
    assert_eq!(plan.destination_weather.source, ObservationSource::Live);
    assert_eq!(plan.destination_weather.description, "Wind: 30kt, Vis: 10SM");

    let expected_weight = plan.total_distance_km * 1.10 * 1.0 * 1.2;
    assert!((plan.total_weight - expected_weight).abs() < 1e-6);
}

#[test]
fn weather_failures_fall_back_without_failing_the_route() {
    let source = Arc::new(
        ScriptedSource::new()
            .with_outcome("SIN", FetchOutcome::Failed("Connection failed".to_string()))
            .with_outcome("FRA", FetchOutcome::NoData),
    );
    let weather = provider_with(Arc::clone(&source));

    let plan = plan_route(AirportRegistry::builtin(), &weather, &live("SIN", "FRA"))
        .expect("route exists");
    assert_eq!(plan.origin_weather.source, ObservationSource::Fallback);
    assert_eq!(plan.origin_weather.penalty, 20.0);
    assert_eq!(plan.origin_weather.description, "Connection failed");
    assert_eq!(plan.destination_weather.source, ObservationSource::Fallback);
    assert_eq!(plan.avg_weather_penalty, 20.0);
}

#[test]
fn repeated_requests_reuse_cached_weather() {
    let source = Arc::new(ScriptedSource::new().with_report("DXB", 40.0, 3.0));
    let weather = provider_with(Arc::clone(&source));
    let registry = AirportRegistry::builtin();

    for _ in 0..3 {
        plan_route(registry, &weather, &live("DXB", "NRT")).expect("route exists");
    }
    plan_route(registry, &weather, &live("NRT", "DXB")).expect("route exists");

    assert_eq!(source.calls_for("DXB"), 1);
    assert_eq!(source.calls_for("NRT"), 1);
}

#[test]
fn simulated_weather_never_touches_the_source() {
    let source = Arc::new(ScriptedSource::new());
    let weather = provider_with(Arc::clone(&source));

    let plan = plan_route(
        AirportRegistry::builtin(),
        &weather,
        &RouteRequest {
            base_weather_severity: 35.0,
            ..RouteRequest::new("PVG", "LAX")
        },
    )
    .expect("route exists");
    assert_eq!(plan.avg_weather_penalty, 35.0);
    assert_eq!(source.total_calls(), 0);
}

#[test]
fn origin_equal_to_destination_is_a_zero_length_route() {
    let plan = plan_route(
        AirportRegistry::builtin(),
        &simulated_weather(),
        &RouteRequest::new("SIN", "SIN"),
    )
    .expect("trivial route");
    assert_eq!(plan.path, vec!["SIN"]);
    assert_eq!(plan.total_distance_km, 0.0);
    assert_eq!(plan.total_weight, 0.0);
    assert_eq!(plan.total_fuel_kg, 0.0);
    assert!(plan.arc.is_empty());
    assert_eq!(plan.waypoints.len(), 1);
}

#[test]
fn codes_are_case_insensitive() {
    let plan = plan_route(
        AirportRegistry::builtin(),
        &simulated_weather(),
        &RouteRequest::new(" hkg", "jfk "),
    )
    .expect("route exists");
    assert_eq!(plan.path, vec!["HKG", "JFK"]);
}

#[test]
fn invalid_parameters_are_rejected() {
    let err = plan_route(
        AirportRegistry::builtin(),
        &simulated_weather(),
        &RouteRequest {
            cargo_load: 0.5,
            ..RouteRequest::new("HKG", "JFK")
        },
    )
    .expect_err("cargo load below 1");
    assert!(matches!(err, Error::InvalidRequest { .. }));
}

#[test]
fn every_pair_flies_the_direct_leg_for_any_weather_and_load() {
    let registry = AirportRegistry::builtin();
    let weather = simulated_weather();
    let codes = registry.codes();

    for severity in [0.0, 10.0, 20.0, 50.0] {
        for fuel in [0.5, 0.75, 1.0, 1.5, 2.0] {
            for cargo in [1.0, 1.25, 1.5, 1.75, 2.0] {
                let multiplier = (1.0 + severity / 100.0) * fuel * cargo;
                for origin in &codes {
                    for destination in &codes {
                        if origin == destination {
                            continue;
                        }
                        let direct = distance_km(
                            registry.lookup(origin).unwrap().position,
                            registry.lookup(destination).unwrap().position,
                        ) * multiplier;

                        let mut weights = Vec::new();
                        for algorithm in [RouteAlgorithm::Dijkstra, RouteAlgorithm::AStar] {
                            let request = RouteRequest {
                                base_weather_severity: severity,
                                fuel_efficiency: fuel,
                                cargo_load: cargo,
                                algorithm,
                                samples_per_segment: 2,
                                ..RouteRequest::new(*origin, *destination)
                            };
                            let plan =
                                plan_route(registry, &weather, &request).expect("route exists");
                            assert_eq!(
                                plan.path,
                                vec![origin.to_string(), destination.to_string()],
                                "{origin}->{destination} via {algorithm}"
                            );
                            assert!(plan.total_weight <= direct + 1e-6);
                            weights.push(plan.total_weight);
                        }
                        assert!((weights[0] - weights[1]).abs() < 1e-6);
                    }
                }
            }
        }
    }
}

#[test]
fn airports_on_one_great_circle_still_fly_direct() {
    let registry = AirportRegistry::new(
        [("AAA", 0.0), ("BBB", 10.0), ("CCC", 20.0), ("DDD", 30.0)]
            .into_iter()
            .map(|(code, lon)| Airport::new(code, code, GeoPoint::new(0.0, lon))),
    )
    .expect("valid registry");
    let weather = simulated_weather();

    for origin in registry.codes() {
        for destination in registry.codes() {
            if origin == destination {
                continue;
            }
            for algorithm in [RouteAlgorithm::Dijkstra, RouteAlgorithm::AStar] {
                let request = RouteRequest {
                    algorithm,
                    samples_per_segment: 2,
                    ..RouteRequest::new(origin, destination)
                };
                let plan = plan_route(&registry, &weather, &request).expect("route exists");
                assert_eq!(plan.path, vec![origin, destination], "via {algorithm}");
            }
        }
    }
}
