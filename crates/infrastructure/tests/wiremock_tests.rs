//! Integration tests for infrastructure adapters
//!
//! Tests cover:
//! - Weather and soil adapters against mock upstream servers
//! - Error mapping into the application taxonomy
//! - The prediction service wired to real adapters

use std::sync::Arc;

use application::{AgroPredictionService, ApplicationError, SoilDataPort, WeatherHistoryPort};
use chrono::NaiveDate;
use domain::value_objects::GeoLocation;
use infrastructure::{
    CacheConfig, CachedWeatherHistoryAdapter, LogNotificationAdapter, SoilDataAdapter,
    WeatherHistoryAdapter,
};
use integration_soil::SoilConfig;
use integration_weather::WeatherConfig;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn archive_body() -> serde_json::Value {
    serde_json::json!({
        "latitude": -17.8,
        "longitude": 31.0,
        "daily": {
            "time": ["2023-12-12", "2023-12-13", "2023-12-14"],
            "temperature_2m_mean": [22.1, 23.4, null],
            "temperature_2m_max": [28.0, 29.1, null],
            "temperature_2m_min": [16.0, 17.2, null],
            "precipitation_sum": [14.2, 3.1, null],
            "relative_humidity_2m_mean": [76, 69, null],
            "wind_speed_10m_max": [12.5, 10.1, null],
            "surface_pressure_mean": [851.0, 852.4, null]
        }
    })
}

fn current_body() -> serde_json::Value {
    serde_json::json!({
        "current": {
            "time": "2024-01-15T12:00",
            "temperature_2m": 25.0,
            "relative_humidity_2m": 65,
            "precipitation": 0.4,
            "wind_speed_10m": 8.0,
            "surface_pressure": 851.5,
            "weather_code": 2
        }
    })
}

fn soil_body() -> serde_json::Value {
    let layer = |name: &str, d_factor: u32, mean: u32| {
        serde_json::json!({
            "name": name,
            "unit_measure": {"d_factor": d_factor},
            "depths": [{"label": "0-5cm", "values": {"mean": mean}}]
        })
    };
    serde_json::json!({
        "type": "Feature",
        "properties": {
            "layers": [
                layer("phh2o", 10, 58),
                layer("soc", 10, 145),
                layer("nitrogen", 100, 120),
                layer("cec", 10, 90),
                layer("clay", 10, 280),
                layer("sand", 10, 600),
                layer("silt", 10, 120)
            ]
        }
    })
}

async fn weather_adapter(server: &MockServer) -> WeatherHistoryAdapter {
    WeatherHistoryAdapter::with_config(WeatherConfig {
        base_url: server.uri(),
        archive_url: server.uri(),
        timeout_secs: 5,
        ..Default::default()
    })
    .unwrap()
}

async fn soil_adapter(server: &MockServer) -> SoilDataAdapter {
    SoilDataAdapter::with_config(SoilConfig {
        base_url: server.uri(),
        timeout_secs: 5,
        ..Default::default()
    })
    .unwrap()
}

async fn mount(server: &MockServer, endpoint: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(endpoint))
        .respond_with(response)
        .mount(server)
        .await;
}

// ============================================================================
// Weather adapter
// ============================================================================

mod weather_adapter_tests {
    use super::*;

    #[tokio::test]
    async fn history_keeps_gaps_as_none() {
        let server = MockServer::start().await;
        mount(&server, "/archive", ResponseTemplate::new(200).set_body_json(archive_body())).await;

        let adapter = weather_adapter(&server).await;
        let history = adapter
            .get_daily_history(&GeoLocation::harare(), ymd(2023, 12, 12), ymd(2023, 12, 14))
            .await
            .unwrap();

        assert_eq!(history.len(), 3);
        assert_eq!(history[0].date(), ymd(2023, 12, 12));
        assert!(!history[0].has_gaps());
        assert!(history[2].has_gaps());
        assert_eq!(history[2].temperature, None);
    }

    #[tokio::test]
    async fn current_conditions_mapped() {
        let server = MockServer::start().await;
        mount(&server, "/forecast", ResponseTemplate::new(200).set_body_json(current_body())).await;

        let adapter = weather_adapter(&server).await;
        let obs = adapter.get_current_conditions(&GeoLocation::harare()).await.unwrap();

        assert_eq!(obs.temperature, Some(25.0));
        assert_eq!(obs.humidity, Some(65.0));
        assert!(adapter.is_available().await);
    }

    #[tokio::test]
    async fn server_error_is_data_unavailable() {
        let server = MockServer::start().await;
        mount(&server, "/archive", ResponseTemplate::new(503)).await;

        let adapter = weather_adapter(&server).await;
        let result = adapter
            .get_daily_history(&GeoLocation::harare(), ymd(2024, 1, 1), ymd(2024, 1, 31))
            .await;

        assert!(
            matches!(result, Err(ApplicationError::DataUnavailable(_))),
            "got: {result:?}"
        );
    }

    #[tokio::test]
    async fn bad_request_is_invalid_parameter() {
        let server = MockServer::start().await;
        mount(
            &server,
            "/archive",
            ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "error": true,
                "reason": "end_date out of range"
            })),
        )
        .await;

        let adapter = weather_adapter(&server).await;
        let result = adapter
            .get_daily_history(&GeoLocation::harare(), ymd(2024, 1, 1), ymd(2030, 1, 1))
            .await;

        assert!(
            matches!(result, Err(ApplicationError::InvalidParameter(ref r)) if r.contains("end_date")),
            "got: {result:?}"
        );
    }

    #[tokio::test]
    async fn cached_adapter_fetches_once() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/archive"))
            .respond_with(ResponseTemplate::new(200).set_body_json(archive_body()))
            .expect(1)
            .mount(&server)
            .await;

        let adapter =
            CachedWeatherHistoryAdapter::new(weather_adapter(&server).await, &CacheConfig::default());
        let harare = GeoLocation::harare();
        for _ in 0..3 {
            let history = adapter
                .get_daily_history(&harare, ymd(2023, 12, 12), ymd(2023, 12, 14))
                .await
                .unwrap();
            assert_eq!(history.len(), 3);
        }
    }
}

// ============================================================================
// Soil adapter
// ============================================================================

mod soil_adapter_tests {
    use super::*;

    #[tokio::test]
    async fn soil_profile_mapped() {
        let server = MockServer::start().await;
        mount(
            &server,
            "/properties/query",
            ResponseTemplate::new(200).set_body_json(soil_body()),
        )
        .await;

        let adapter = soil_adapter(&server).await;
        let soil = adapter.get_soil_data(&GeoLocation::harare()).await.unwrap();

        assert!((soil.ph - 5.8).abs() < 1e-9);
        assert!((soil.nitrogen - 1.2).abs() < 1e-9);
        assert_eq!(soil.texture, "sandy clay loam");
        assert!(soil.validate().is_ok());
    }

    #[tokio::test]
    async fn empty_cell_is_data_unavailable() {
        let server = MockServer::start().await;
        mount(
            &server,
            "/properties/query",
            ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "type": "Feature",
                "properties": {"layers": []}
            })),
        )
        .await;

        let adapter = soil_adapter(&server).await;
        let result = adapter.get_soil_data(&GeoLocation::harare()).await;

        assert!(matches!(result, Err(ApplicationError::DataUnavailable(_))));
    }
}

// ============================================================================
// Prediction service wired to adapters
// ============================================================================

mod wired_service_tests {
    use super::*;

    async fn service(weather: &MockServer, soil: &MockServer) -> AgroPredictionService {
        let weather = CachedWeatherHistoryAdapter::new(
            weather_adapter(weather).await,
            &CacheConfig::default(),
        );
        AgroPredictionService::new(Arc::new(weather), Arc::new(soil_adapter(soil).await))
            .with_notifier(Arc::new(LogNotificationAdapter::new()))
    }

    #[tokio::test]
    async fn long_term_prediction_end_to_end() {
        let weather = MockServer::start().await;
        let soil = MockServer::start().await;
        mount(&weather, "/archive", ResponseTemplate::new(200).set_body_json(archive_body())).await;
        mount(
            &soil,
            "/properties/query",
            ResponseTemplate::new(200).set_body_json(soil_body()),
        )
        .await;

        let service = service(&weather, &soil).await;
        let prediction = service
            .generate_long_term_prediction("harare", ymd(2024, 1, 15), 90)
            .await
            .unwrap();

        assert_eq!(prediction.location, "harare");
        assert_eq!(prediction.days_ahead, 90);
        assert!(prediction.soil_conditions.is_some());
    }

    #[tokio::test]
    async fn soil_outage_fails_long_term_prediction() {
        let weather = MockServer::start().await;
        let soil = MockServer::start().await;
        mount(&weather, "/archive", ResponseTemplate::new(200).set_body_json(archive_body())).await;
        mount(&soil, "/properties/query", ResponseTemplate::new(502)).await;

        let service = service(&weather, &soil).await;
        let result = service
            .generate_long_term_prediction("harare", ymd(2024, 1, 15), 30)
            .await;

        assert!(matches!(result, Err(ref e) if e.is_retryable()), "got: {result:?}");
    }

    #[tokio::test]
    async fn fetched_insights_use_live_conditions() {
        let weather = MockServer::start().await;
        let soil = MockServer::start().await;
        mount(&weather, "/forecast", ResponseTemplate::new(200).set_body_json(current_body())).await;
        mount(
            &soil,
            "/properties/query",
            ResponseTemplate::new(200).set_body_json(soil_body()),
        )
        .await;

        let service = service(&weather, &soil).await;
        let insights = service
            .fetch_ai_insights("harare", "maize", "vegetative")
            .await
            .unwrap();

        assert!(insights.crop.eq_ignore_ascii_case("maize"));
        assert!(insights.suitability_score.is_some());
    }
}
