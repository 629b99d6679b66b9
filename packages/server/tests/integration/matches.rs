use sea_orm::{EntityTrait, PaginatorTrait};
use serde_json::json;
use server::entity::football_match;

use crate::common::{TestApp, routes};

#[tokio::test]
async fn listing_without_feed_returns_stored_matches_only() {
    let app = TestApp::spawn().await;

    let res = app.get_without_token(routes::MATCHES).await;

    assert_eq!(res.status, 200, "{}", res.text);
    assert_eq!(res.body["count"], 0);
    assert_eq!(res.body["data"], json!([]));
}

#[tokio::test]
async fn creating_matches_requires_a_token() {
    let app = TestApp::spawn().await;

    let res = app.post_without_token(routes::MATCHES, &json!([])).await;

    assert_eq!(res.status, 401);
    assert_eq!(res.body["code"], "TOKEN_MISSING");
}

#[tokio::test]
async fn created_matches_are_listed_by_kickoff() {
    let app = TestApp::spawn().await;
    let token = app.create_authenticated_user("admin", "securepass").await;

    app.create_match(&token, "Everton", "Fulham", "2024-09-21T14:00:00Z", 5, "").await;
    app.create_match(&token, "Arsenal", "Chelsea", "2024-09-14T11:30:00+00:00", 4, "2:1").await;

    let res = app.get_without_token(routes::MATCHES).await;

    assert_eq!(res.status, 200);
    assert_eq!(res.body["count"], 2);
    let data = res.body["data"].as_array().unwrap();
    assert_eq!(data[0]["home_team"], "Arsenal");
    assert_eq!(data[0]["date"], "2024-09-14T11:30:00Z");
    assert_eq!(data[0]["result"], "2:1");
    assert_eq!(data[1]["home_team"], "Everton");
}

#[tokio::test]
async fn natural_key_collision_rejects_the_whole_batch() {
    let app = TestApp::spawn().await;
    let token = app.create_authenticated_user("admin", "securepass").await;
    app.create_match(&token, "Arsenal", "Chelsea", "2024-09-14T11:30:00Z", 4, "").await;

    let res = app
        .post_with_token(
            routes::MATCHES,
            &json!([
                {
                    "home_team": "Everton", "away_team": "Fulham",
                    "date": "2024-09-21T14:00:00Z",
                    "league": "Premier League", "season": "2024", "match_day": 5
                },
                {
                    "home_team": "Arsenal", "away_team": "Chelsea",
                    "date": "2024-09-14T11:30:00+00:00",
                    "league": "Premier League", "season": "2024", "match_day": 4
                }
            ]),
            &token,
        )
        .await;

    assert_eq!(res.status, 409, "{}", res.text);
    assert_eq!(res.body["code"], "CONFLICT");
    let stored = football_match::Entity::find().count(&app.db).await.unwrap();
    assert_eq!(stored, 1);
}

#[tokio::test]
async fn invalid_match_is_rejected() {
    let app = TestApp::spawn().await;
    let token = app.create_authenticated_user("admin", "securepass").await;

    let res = app
        .post_with_token(
            routes::MATCHES,
            &json!([{
                "home_team": "Arsenal", "away_team": "Chelsea",
                "date": "next saturday",
                "league": "Premier League", "season": "2024"
            }]),
            &token,
        )
        .await;

    assert_eq!(res.status, 400);
    assert_eq!(res.body["code"], "VALIDATION_ERROR");
}

mod gameweek {
    use super::*;

    #[tokio::test]
    async fn filters_by_matchday() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("admin", "securepass").await;
        app.create_match(&token, "Arsenal", "Chelsea", "2024-09-14T11:30:00Z", 4, "").await;
        app.create_match(&token, "Everton", "Fulham", "2024-09-21T14:00:00Z", 5, "").await;

        let res = app.get_without_token(&routes::gameweek("4")).await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["gameweek"], 4);
        assert_eq!(res.body["count"], 1);
        assert_eq!(res.body["data"][0]["home_team"], "Arsenal");
    }

    #[tokio::test]
    async fn unknown_matchday_is_empty() {
        let app = TestApp::spawn().await;

        let res = app.get_without_token(&routes::gameweek("38")).await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["count"], 0);
    }

    #[tokio::test]
    async fn non_numeric_matchday_is_rejected() {
        let app = TestApp::spawn().await;

        let res = app.get_without_token(&routes::gameweek("abc")).await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }
}

mod details {
    use super::*;

    #[tokio::test]
    async fn includes_prediction_count() {
        let app = TestApp::spawn().await;
        let alice = app.create_authenticated_user("alice", "securepass").await;
        let bob = app.create_authenticated_user("bob", "securepass").await;
        let match_id = app
            .create_match(&alice, "Arsenal", "Chelsea", "2024-09-14T11:30:00Z", 4, "")
            .await;
        app.create_prediction(&alice, match_id, 1, 0).await;
        app.create_prediction(&bob, match_id, 2, 2).await;

        let res = app.get_without_token(&routes::match_details(match_id)).await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["match"]["id"], match_id);
        assert_eq!(res.body["match"]["away_team"], "Chelsea");
        assert_eq!(res.body["prediction_count"], 2);
    }

    #[tokio::test]
    async fn missing_match_is_not_found() {
        let app = TestApp::spawn().await;

        let res = app.get_without_token(&routes::match_details(999)).await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"], "NOT_FOUND");
    }
}

#[tokio::test]
async fn sync_without_feed_is_an_upstream_error() {
    let app = TestApp::spawn().await;
    let token = app.create_authenticated_user("admin", "securepass").await;

    let res = app.post_with_token(routes::MATCHES_SYNC, &json!({}), &token).await;

    assert_eq!(res.status, 502);
    assert_eq!(res.body["code"], "UPSTREAM_ERROR");
}
