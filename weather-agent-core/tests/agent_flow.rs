//! End-to-end turns through the HTTP clients, all services mocked.

use weather_agent_core::{Agent, Config, services_from_config};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn agent_for(server: &MockServer) -> Agent {
    let mut config = Config::default();
    config.endpoints.geocoding_url = server.uri();
    config.endpoints.forecast_url = server.uri();
    config.llm.api_base = server.uri();
    config.set_llm_api_key("test-key".to_string());

    let services = services_from_config(&config).unwrap();
    Agent::new(services, config.default_city)
}

async fn mount_geocode(server: &MockServer, name: &str) {
    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .and(query_param("name", name))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "results": [{"name": "Chennai", "latitude": 13.08, "longitude": 80.27, "country": "India"}]
        })))
        .expect(1)
        .mount(server)
        .await;
}

async fn mount_llm(server: &MockServer, calls: u64) {
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "choices": [{"message": {"content": "It is warm in Chennai."}}]
        })))
        .expect(calls)
        .mount(server)
        .await;
}

#[tokio::test]
async fn current_weather_turn() {
    let server = MockServer::start().await;
    mount_geocode(&server, "chennai").await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .and(query_param("current_weather", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "current_weather": {"temperature": 31.0, "windspeed": 8.0}
        })))
        .expect(1)
        .mount(&server)
        .await;

    mount_llm(&server, 1).await;

    let reply = agent_for(&server).handle("Is it hot in Madras?").await;
    assert_eq!(reply, "It is warm in Chennai.");
}

#[tokio::test]
async fn forecast_turn_asks_for_two_days_tomorrow() {
    let server = MockServer::start().await;
    mount_geocode(&server, "chennai").await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .and(query_param("forecast_days", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "daily": {
                "time": ["2026-10-17", "2026-10-18"],
                "temperature_2m_max": [32.0, 33.0],
                "temperature_2m_min": [25.0, 26.0],
                "precipitation_probability_max": [80, 60]
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    mount_llm(&server, 1).await;

    let reply = agent_for(&server).handle("will it rain in chennai tomorrow").await;
    assert_eq!(reply, "It is warm in Chennai.");
}

#[tokio::test]
async fn unknown_city_stops_after_geocoding() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    mount_llm(&server, 0).await;

    let reply = agent_for(&server).handle("weather in atlantis").await;
    assert_eq!(reply, "Could not find that city. Try: 'weather in Bangalore'.");
}

#[tokio::test]
async fn small_talk_never_leaves_the_process() {
    let server = MockServer::start().await;
    mount_llm(&server, 0).await;

    let reply = agent_for(&server).handle("good morning").await;
    assert_eq!(reply, "You said → good morning");
}
