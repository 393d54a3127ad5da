#[macro_use]
extern crate rocket;

mod air_quality;
mod chart;
mod config;
mod dashboard;
mod error;
mod feed;
mod page;
mod pollutants;

use rocket::fairing::AdHoc;
use rocket::response::content::RawHtml;
use rocket::serde::json::Json;
use rocket::{Build, Rocket, Route, State};

use config::DashboardConfig;
use dashboard::{Dashboard, Page};
use feed::WaqiClient;
use pollutants::PollutantDescriptions;

#[get("/?<city>")]
async fn index(dashboard: &State<Dashboard>, city: Option<String>) -> Option<RawHtml<String>> {
    let city = dashboard.resolve_city(city.as_deref())?;
    let page = dashboard.handle(city).await;
    Some(RawHtml(page::render(&page)))
}

#[get("/api/air-quality?<city>")]
async fn page_json(dashboard: &State<Dashboard>, city: Option<String>) -> Option<Json<Page>> {
    let city = dashboard.resolve_city(city.as_deref())?;
    Some(Json(dashboard.handle(city).await))
}

#[get("/api/cities")]
fn cities(dashboard: &State<Dashboard>) -> Json<Vec<String>> {
    Json(dashboard.cities().to_vec())
}

fn routes() -> Vec<Route> {
    routes![index, page_json, cities]
}

fn attach_feed(rocket: Rocket<Build>) -> Result<Rocket<Build>, Rocket<Build>> {
    let config: DashboardConfig = match rocket.figment().extract() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("invalid dashboard configuration (is ROCKET_WAQI_TOKEN set?): {}", e);
            return Err(rocket);
        }
    };

    match WaqiClient::new(&config) {
        Ok(client) => {
            tracing::info!(
                "serving {} cities from {}",
                config.cities.len(),
                config.feed_base_url
            );
            let dashboard = Dashboard::new(config, PollutantDescriptions::standard(), Box::new(client));
            Ok(rocket.manage(dashboard))
        }
        Err(e) => {
            tracing::error!("cannot reach the air quality feed: {}", e);
            Err(rocket)
        }
    }
}

#[launch]
fn rocket() -> _ {
    tracing_subscriber::fmt::init();

    rocket::build()
        .attach(AdHoc::try_on_ignite("Air quality feed", |rocket| async move {
            attach_feed(rocket)
        }))
        .mount("/", routes())
}

#[cfg(test)]
mod tests {
    use rocket::figment::Figment;
    use rocket::http::{ContentType, Status};
    use rocket::local::blocking::Client;
    use serde_json::Value;

    use super::*;
    use crate::dashboard::tests::{StubFeed, SCENARIO_ERROR, SCENARIO_OK};
    use crate::dashboard::FETCH_FAILURE_MESSAGE;

    fn client(feed: StubFeed) -> Client {
        let rocket = rocket::build()
            .mount("/", routes())
            .manage(Dashboard::new(
                DashboardConfig::with_token("test"),
                PollutantDescriptions::standard(),
                Box::new(feed),
            ));
        Client::tracked(rocket).expect("valid rocket instance")
    }

    #[test]
    fn index_defaults_to_first_city() {
        let feed = StubFeed::new(SCENARIO_OK);
        let client = client(feed.clone());
        let response = client.get("/").dispatch();

        assert_eq!(response.status(), Status::Ok);
        assert_eq!(response.content_type(), Some(ContentType::HTML));
        let body = response.into_string().expect("body");
        assert!(body.contains("<h1>Air Quality in Mumbai</h1>"));
        assert_eq!(feed.last_city().as_deref(), Some("Mumbai"));
    }

    #[test]
    fn index_renders_selected_city() {
        let feed = StubFeed::new(SCENARIO_OK);
        let client = client(feed.clone());
        let body = client
            .get("/?city=Visakhapatnam")
            .dispatch()
            .into_string()
            .expect("body");

        assert!(body.contains("<h1>Air Quality in Visakhapatnam</h1>"));
        assert!(body.contains("<div class=\"metric-value\">42</div>"));
        assert!(body.contains("<option value=\"Visakhapatnam\" selected>"));
        assert_eq!(feed.calls(), 1);
    }

    #[test]
    fn upstream_error_shows_one_message_and_sidebar() {
        let client = client(StubFeed::new(SCENARIO_ERROR));
        let response = client.get("/?city=Lucknow").dispatch();

        assert_eq!(response.status(), Status::Ok);
        let body = response.into_string().expect("body");
        assert_eq!(body.matches(FETCH_FAILURE_MESSAGE).count(), 1);
        assert!(body.contains("<h1>Air Quality Tracker</h1>"));
        assert!(body.contains("Learn more about AQI"));
        assert!(!body.contains("<table"));
        assert!(!body.contains("<svg"));
    }

    #[test]
    fn unknown_city_is_not_found() {
        let feed = StubFeed::new(SCENARIO_OK);
        let client = client(feed.clone());

        assert_eq!(client.get("/?city=Atlantis").dispatch().status(), Status::NotFound);
        assert_eq!(
            client.get("/api/air-quality?city=Atlantis").dispatch().status(),
            Status::NotFound
        );
        assert_eq!(feed.calls(), 0);
    }

    #[test]
    fn api_returns_view_state() {
        let client = client(StubFeed::new(SCENARIO_OK));
        let response = client.get("/api/air-quality?city=Delhi").dispatch();

        assert_eq!(response.status(), Status::Ok);
        let page: Value = response.into_json().expect("json body");
        assert_eq!(page["sidebar"]["selected"], "Delhi");
        assert_eq!(page["content"]["state"], "success");
        assert_eq!(page["content"]["metric"]["value"], 42);
        assert_eq!(page["content"]["table"][0]["label"], "PM2.5 (Fine Particulate Matter)");
        assert_eq!(page["content"]["table"][0]["concentration"], 10.0);
        assert_eq!(page["content"]["table"][1]["label"], "xx");
        assert_eq!(page["content"]["chart"]["bars"][1]["label"], "xx");
    }

    #[test]
    fn api_reports_failure_state() {
        let client = client(StubFeed::new(SCENARIO_ERROR));
        let page: Value = client
            .get("/api/air-quality?city=Agra")
            .dispatch()
            .into_json()
            .expect("json body");

        assert_eq!(page["content"]["state"], "failure");
        assert_eq!(page["content"]["message"], FETCH_FAILURE_MESSAGE);
        assert!(page["content"].get("table").is_none());
    }

    #[test]
    fn lists_cities() {
        let client = client(StubFeed::new(SCENARIO_OK));
        let cities: Vec<String> = client
            .get("/api/cities")
            .dispatch()
            .into_json()
            .expect("json body");

        assert_eq!(cities.len(), 20);
        assert_eq!(cities.first().map(String::as_str), Some("Mumbai"));
        assert_eq!(cities.last().map(String::as_str), Some("Meerut"));
    }

    #[test]
    fn feed_attaches_only_with_a_token() {
        let without = rocket::custom(Figment::from(rocket::Config::default()));
        assert!(attach_feed(without).is_err());

        let with = rocket::custom(
            Figment::from(rocket::Config::default()).merge(("waqi_token", "secret")),
        );
        match attach_feed(with) {
            Ok(built) => assert!(built.state::<Dashboard>().is_some()),
            Err(_) => panic!("feed should attach with a token"),
        }
    }
}
