use mcp_shopping_list::{Config, WeatherService};
use mockito::{Matcher, Server};
use serde_json::json;

const API_KEY: &str = "test-key-5f2a";
const WEATHER_PATH: &str = "/data/2.5/weather";

fn service_for(server: &Server) -> WeatherService {
    let config = Config::new(API_KEY).with_base_url(format!("{}{}", server.url(), WEATHER_PATH));
    WeatherService::new(&config).unwrap()
}

fn query(city: &str) -> Matcher {
    Matcher::AllOf(vec![
        Matcher::UrlEncoded("q".into(), city.into()),
        Matcher::UrlEncoded("appid".into(), API_KEY.into()),
        Matcher::UrlEncoded("units".into(), "metric".into()),
    ])
}

#[tokio::test]
async fn test_success_with_country() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", WEATHER_PATH)
        .match_query(query("London,GB"))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "cod": 200,
                "name": "London",
                "main": {"temp": 23.456},
                "weather": [{"description": "clear sky"}],
                "sys": {"country": "GB"}
            })
            .to_string(),
        )
        .create_async()
        .await;

    let output = service_for(&server).get_weather("London,GB").await;

    assert_eq!(
        output,
        "The current weather in London,GB is clear sky with a temperature of 23.5°C."
    );
    mock.assert_async().await;
}

#[tokio::test]
async fn test_alias_is_resolved_before_the_request_and_no_country_is_added() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", WEATHER_PATH)
        .match_query(query("Bengaluru"))
        .with_status(200)
        .with_body(
            json!({
                "cod": 200,
                "name": "Bengaluru",
                "main": {"temp": 27.04},
                "weather": [{"description": "scattered clouds"}]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let output = service_for(&server).get_weather("  bangalore ").await;

    assert_eq!(
        output,
        "The current weather in Bengaluru is scattered clouds with a temperature of 27.0°C."
    );
    mock.assert_async().await;
}

#[tokio::test]
async fn test_http_404_reports_city_not_found() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", WEATHER_PATH)
        .match_query(Matcher::Any)
        .with_status(404)
        .with_body(r#"{"cod":"404","message":"city not found"}"#)
        .create_async()
        .await;

    let output = service_for(&server).get_weather("Atlantis").await;

    assert_eq!(output, "City not found: Atlantis (city not found).");
}

#[tokio::test]
async fn test_http_401_never_leaks_the_key() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", WEATHER_PATH)
        .match_query(Matcher::Any)
        .with_status(401)
        .with_body(format!(r#"{{"cod":401,"message":"Invalid API key {API_KEY}"}}"#))
        .create_async()
        .await;

    let output = service_for(&server).get_weather("Paris").await;

    assert_eq!(output, "Invalid API key. Please check your OpenWeatherMap key.");
    assert!(!output.contains(API_KEY));
}

#[tokio::test]
async fn test_other_errors_echo_status_and_body_with_key_scrubbed() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", WEATHER_PATH)
        .match_query(Matcher::Any)
        .with_status(500)
        .with_body(format!("upstream exploded while handling appid={API_KEY}"))
        .create_async()
        .await;

    let output = service_for(&server).get_weather("Paris").await;

    assert!(output.starts_with("Weather API error (500): upstream exploded"), "{output}");
    assert!(!output.contains(API_KEY), "{output}");
}

#[tokio::test]
async fn test_cod_mismatch_inside_a_200() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", WEATHER_PATH)
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"cod":"404","message":"city not found"}"#)
        .create_async()
        .await;

    let output = service_for(&server).get_weather("Gondor").await;

    assert!(output.contains("city not found"), "{output}");
    assert!(output.contains("Gondor"), "{output}");
}

#[tokio::test]
async fn test_malformed_bodies_still_produce_a_sentence() {
    let bodies = [
        "",
        "{}",
        "null",
        "<html>oops</html>",
        r#"{"main": null, "weather": null}"#,
        r#"{"main": {"temp": "warm"}, "weather": [{"description": "fog"}]}"#,
        r#"{"main": {"temp": 4.2}, "weather": [null]}"#,
        "[]",
    ];

    for body in bodies {
        let mut server = Server::new_async().await;
        server
            .mock("GET", WEATHER_PATH)
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(body)
            .create_async()
            .await;

        let output = service_for(&server).get_weather("Reykjavik").await;
        assert!(!output.is_empty(), "empty output for body {body:?}");
        assert!(output.contains("Reykjavik"), "{output} for body {body:?}");
        assert!(!output.starts_with("The current weather"), "{output} for body {body:?}");
    }
}

#[tokio::test]
async fn test_identical_responses_give_identical_answers() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", WEATHER_PATH)
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(
            json!({
                "name": "Mysore",
                "main": {"temp": 30.04},
                "weather": [{"description": "haze"}],
                "sys": {"country": "IN"}
            })
            .to_string(),
        )
        .expect(2)
        .create_async()
        .await;

    let service = service_for(&server);
    let first = service.get_weather("Mysuru").await;
    let second = service.get_weather("Mysuru").await;

    assert_eq!(first, second);
    assert_eq!(
        first,
        "The current weather in Mysore,IN is haze with a temperature of 30.0°C."
    );
}

#[tokio::test]
async fn test_unreachable_service_reads_as_not_found() {
    let config = Config::new(API_KEY).with_base_url("http://127.0.0.1:1/data/2.5/weather");
    let service = WeatherService::new(&config).unwrap();

    let output = service.get_weather("Lisbon").await;

    assert!(output.starts_with("City not found: Lisbon ("), "{output}");
    assert!(!output.contains(API_KEY));
}
