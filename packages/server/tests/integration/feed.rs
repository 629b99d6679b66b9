use mockito::{Matcher, Server};
use sea_orm::{EntityTrait, PaginatorTrait};
use serde_json::json;
use server::config::FeedConfig;
use server::entity::football_match;
use server::feed::{API_KEY_HEADER, FeedError, FixtureFeedClient};

use tokio::net::TcpListener;

use crate::common::{TEST_API_KEY, TestApp, feed_body, feed_entry, mock_feed_config, routes};

/// Base URL of a provider that accepts connections and never answers.
async fn silent_provider() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let mut held = Vec::new();
        while let Ok((socket, _)) = listener.accept().await {
            held.push(socket);
        }
    });
    format!("http://{addr}")
}

fn silent_feed_config(base_url: &str) -> FeedConfig {
    FeedConfig {
        timeout_secs: 1,
        ..mock_feed_config(base_url)
    }
}

fn season_query() -> Matcher {
    Matcher::AllOf(vec![
        Matcher::UrlEncoded("league".into(), "39".into()),
        Matcher::UrlEncoded("season".into(), "2024".into()),
    ])
}

fn three_fixtures() -> String {
    feed_body(vec![
        feed_entry(
            "Manchester United",
            "Fulham",
            "2024-08-16T19:00:00+00:00",
            "Regular Season - 1",
            (Some(1), Some(0)),
        ),
        feed_entry(
            "Ipswich",
            "Liverpool",
            "yesterday evening",
            "Regular Season - 1",
            (Some(0), Some(2)),
        ),
        feed_entry(
            "Arsenal",
            "Wolves",
            "2024-08-17T14:00:00+00:00",
            "Regular Season - 1",
            (None, None),
        ),
    ])
}

mod client {
    use super::*;

    #[tokio::test]
    async fn requires_an_api_key() {
        let err = FixtureFeedClient::from_config(&FeedConfig::default())
            .expect_err("no key configured");
        assert!(matches!(err, FeedError::MissingApiKey));
    }

    #[tokio::test]
    async fn sends_key_and_season_and_parses_records() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/fixtures")
            .match_query(season_query())
            .match_header(API_KEY_HEADER, TEST_API_KEY)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(three_fixtures())
            .create_async()
            .await;

        let client = FixtureFeedClient::from_config(&mock_feed_config(&server.url())).unwrap();
        let records = client.fetch_fixtures().await.unwrap();

        mock.assert_async().await;
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].home_team, "Manchester United");
        assert_eq!(records[0].kickoff_key(), "2024-08-16T19:00:00Z");
        assert_eq!(records[0].result(), "1:0");
        assert_eq!(records[0].matchday(), 1);
        assert_eq!(records[1].result(), "0:0");
    }

    #[tokio::test]
    async fn non_success_status_is_an_error() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/fixtures")
            .match_query(Matcher::Any)
            .with_status(500)
            .create_async()
            .await;

        let client = FixtureFeedClient::from_config(&mock_feed_config(&server.url())).unwrap();
        let err = client.fetch_fixtures().await.expect_err("server error");

        assert!(matches!(err, FeedError::Status(status) if status.as_u16() == 500));
    }

    #[tokio::test]
    async fn unresponsive_provider_times_out() {
        let base_url = silent_provider().await;
        let client = FixtureFeedClient::from_config(&silent_feed_config(&base_url)).unwrap();

        let err = client.fetch_fixtures().await.expect_err("request should time out");

        assert!(matches!(err, FeedError::Http(ref e) if e.is_timeout()), "{err}");
    }

    #[tokio::test]
    async fn provider_errors_are_reported() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/fixtures")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(
                json!({"errors": {"requests": "You have reached the request limit"}, "response": []})
                    .to_string(),
            )
            .create_async()
            .await;

        let client = FixtureFeedClient::from_config(&mock_feed_config(&server.url())).unwrap();
        let err = client.fetch_fixtures().await.expect_err("provider error");

        assert!(matches!(err, FeedError::Provider(_)));
    }
}

mod lazy_ingestion {
    use super::*;

    #[tokio::test]
    async fn listing_pulls_the_feed_and_is_idempotent() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/fixtures")
            .match_query(season_query())
            .match_header(API_KEY_HEADER, TEST_API_KEY)
            .with_status(200)
            .with_body(three_fixtures())
            .expect(2)
            .create_async()
            .await;
        let app = TestApp::spawn_with_feed(mock_feed_config(&server.url())).await;

        let first = app.get_without_token(routes::MATCHES).await;
        let second = app.get_without_token(routes::MATCHES).await;

        mock.assert_async().await;
        assert_eq!(first.status, 200, "{}", first.text);
        assert_eq!(first.body["count"], 2);
        assert_eq!(second.body["count"], 2);

        let data = first.body["data"].as_array().unwrap();
        assert_eq!(data[0]["home_team"], "Manchester United");
        assert_eq!(data[0]["result"], "1:0");
        assert_eq!(data[0]["match_day"], 1);
        assert_eq!(data[0]["league"], "Premier League");
        assert_eq!(data[0]["season"], "2024");
        assert_eq!(data[1]["home_team"], "Arsenal");
        assert_eq!(data[1]["result"], "0:0");
    }

    #[tokio::test]
    async fn feed_failure_still_serves_stored_matches() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/fixtures")
            .match_query(Matcher::Any)
            .with_status(503)
            .create_async()
            .await;
        let app = TestApp::spawn_with_feed(mock_feed_config(&server.url())).await;
        let token = app.create_authenticated_user("admin", "securepass").await;
        app.create_match(&token, "Arsenal", "Chelsea", "2024-09-14T11:30:00Z", 4, "")
            .await;

        let res = app.get_without_token(routes::MATCHES).await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["count"], 1);
    }

    #[tokio::test]
    async fn feed_timeout_still_serves_stored_matches() {
        let base_url = silent_provider().await;
        let app = TestApp::spawn_with_feed(silent_feed_config(&base_url)).await;
        let token = app.create_authenticated_user("admin", "securepass").await;
        app.create_match(&token, "Arsenal", "Chelsea", "2024-09-14T11:30:00Z", 4, "")
            .await;

        let res = app.get_without_token(routes::MATCHES).await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["count"], 1);
        assert_eq!(res.body["data"][0]["home_team"], "Arsenal");
    }

    #[tokio::test]
    async fn refresh_on_read_can_be_turned_off() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/fixtures")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(three_fixtures())
            .expect(0)
            .create_async()
            .await;
        let app = TestApp::spawn_with_feed(FeedConfig {
            refresh_on_read: false,
            ..mock_feed_config(&server.url())
        })
        .await;

        let res = app.get_without_token(routes::MATCHES).await;

        mock.assert_async().await;
        assert_eq!(res.body["count"], 0);
    }
}

mod sync {
    use super::*;

    #[tokio::test]
    async fn reports_inserted_then_skipped() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/fixtures")
            .match_query(season_query())
            .with_status(200)
            .with_body(three_fixtures())
            .expect(2)
            .create_async()
            .await;
        let app = TestApp::spawn_with_feed(FeedConfig {
            refresh_on_read: false,
            ..mock_feed_config(&server.url())
        })
        .await;
        let token = app.create_authenticated_user("admin", "securepass").await;

        let first = app.post_with_token(routes::MATCHES_SYNC, &json!({}), &token).await;
        assert_eq!(first.status, 200, "{}", first.text);
        assert_eq!(first.body, json!({"inserted": 2, "skipped": 0, "failed": 0}));

        let second = app.post_with_token(routes::MATCHES_SYNC, &json!({}), &token).await;
        assert_eq!(second.body, json!({"inserted": 0, "skipped": 2, "failed": 0}));

        let stored = football_match::Entity::find().count(&app.db).await.unwrap();
        assert_eq!(stored, 2);
    }

    #[tokio::test]
    async fn feed_failure_is_a_bad_gateway() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/fixtures")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("<html>maintenance</html>")
            .create_async()
            .await;
        let app = TestApp::spawn_with_feed(mock_feed_config(&server.url())).await;
        let token = app.create_authenticated_user("admin", "securepass").await;

        let res = app.post_with_token(routes::MATCHES_SYNC, &json!({}), &token).await;

        assert_eq!(res.status, 502);
        assert_eq!(res.body["code"], "UPSTREAM_ERROR");
    }

    #[tokio::test]
    async fn ingested_results_score_predictions() {
        let mut server = Server::new_async().await;
        server
            .mock("GET", "/fixtures")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(three_fixtures())
            .create_async()
            .await;
        let app = TestApp::spawn_with_feed(FeedConfig {
            refresh_on_read: false,
            ..mock_feed_config(&server.url())
        })
        .await;
        let token = app.create_authenticated_user("alice", "securepass").await;
        let sync = app.post_with_token(routes::MATCHES_SYNC, &json!({}), &token).await;
        assert_eq!(sync.status, 200, "{}", sync.text);

        let matches = app.get_without_token(routes::MATCHES).await;
        let finished = matches.body["data"][0]["id"].as_i64().unwrap() as i32;

        let res = app
            .post_with_token(
                routes::PREDICTIONS,
                &json!({"match_id": finished, "predicted_score_home": 1, "predicted_score_away": 0}),
                &token,
            )
            .await;

        assert_eq!(res.status, 201, "{}", res.text);
        assert_eq!(res.body["points"], 20);
    }
}
