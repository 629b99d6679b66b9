mod feed;
mod leaderboard;
mod matches;
