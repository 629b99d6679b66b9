use serde_json::json;

use crate::common::{TestApp, routes};

#[tokio::test]
async fn empty_without_predictions() {
    let app = TestApp::spawn().await;
    app.create_authenticated_user("alice", "securepass").await;

    let res = app.get_without_token(routes::LEADERBOARD).await;

    assert_eq!(res.status, 200, "{}", res.text);
    assert_eq!(res.body["leaderboard"], json!([]));
    assert_eq!(res.body["count"], 0);
}

#[tokio::test]
async fn users_are_ranked_by_total_points() {
    let app = TestApp::spawn().await;
    let alice = app.create_authenticated_user("alice", "securepass").await;
    let bob = app.create_authenticated_user("bob", "securepass").await;
    let carol = app.create_authenticated_user("carol", "securepass").await;

    let m1 = app
        .create_match(&alice, "Arsenal", "Chelsea", "2024-09-14T11:30:00Z", 4, "2:1")
        .await;
    let m2 = app
        .create_match(&alice, "Everton", "Fulham", "2024-09-21T14:00:00Z", 5, "0:2")
        .await;

    // alice: 20 + 5 = 25
    app.create_prediction(&alice, m1, 2, 1).await;
    app.create_prediction(&alice, m2, 0, 1).await;
    // bob: 5
    app.create_prediction(&bob, m1, 3, 1).await;
    // carol: 0
    app.create_prediction(&carol, m1, 0, 0).await;

    let res = app.get_without_token(routes::LEADERBOARD).await;

    assert_eq!(res.status, 200, "{}", res.text);
    assert_eq!(res.body["count"], 3);
    let board = res.body["leaderboard"].as_array().unwrap();
    assert_eq!(board[0]["username"], "alice");
    assert_eq!(board[0]["total_points"], 25);
    assert_eq!(board[0]["prediction_count"], 2);
    assert_eq!(board[0]["rank"], 1);
    assert_eq!(board[1]["username"], "bob");
    assert_eq!(board[1]["total_points"], 5);
    assert_eq!(board[1]["rank"], 2);
    assert_eq!(board[2]["username"], "carol");
    assert_eq!(board[2]["total_points"], 0);
    assert_eq!(board[2]["rank"], 3);
}

#[tokio::test]
async fn ties_get_consecutive_ranks_by_username() {
    let app = TestApp::spawn().await;
    let zed = app.create_authenticated_user("zed", "securepass").await;
    let amy = app.create_authenticated_user("amy", "securepass").await;
    let m1 = app
        .create_match(&zed, "Arsenal", "Chelsea", "2024-09-14T11:30:00Z", 4, "1:1")
        .await;

    app.create_prediction(&zed, m1, 1, 1).await;
    app.create_prediction(&amy, m1, 1, 1).await;

    let res = app.get_without_token(routes::LEADERBOARD).await;

    let board = res.body["leaderboard"].as_array().unwrap();
    assert_eq!(board[0]["username"], "amy");
    assert_eq!(board[0]["rank"], 1);
    assert_eq!(board[1]["username"], "zed");
    assert_eq!(board[1]["rank"], 2);
    assert_eq!(board[0]["total_points"], board[1]["total_points"]);
}

#[tokio::test]
async fn profile_total_matches_leaderboard() {
    let app = TestApp::spawn().await;
    let alice = app.create_authenticated_user("alice", "securepass").await;
    let m1 = app
        .create_match(&alice, "Arsenal", "Chelsea", "2024-09-14T11:30:00Z", 4, "2:1")
        .await;
    app.create_prediction(&alice, m1, 3, 2).await;

    let me = app.get_with_token(routes::ME, &alice).await;
    let board = app.get_without_token(routes::LEADERBOARD).await;

    assert_eq!(me.body["total_points"], 7);
    assert_eq!(board.body["leaderboard"][0]["total_points"], 7);
}
