use rocket::*;

mod config;
mod database;
mod score;

use config::AppConfig;
use database::Database;

async fn build_rocket(config: AppConfig) -> Rocket<Build> {
    ::log::info!("using database {}", config.database_url);

    let database = Database::connect(&config)
        .await
        .expect("failed to connect to the database");

    rocket::build()
        .mount(
            "/",
            routes![database::requests::index, database::requests::health],
        )
        .mount(
            "/api/v1",
            routes![
                database::requests::submit_game,
                database::requests::get_leaderboard,
                database::requests::clear_leaderboard,
                database::requests::get_player_stats,
            ],
        )
        .manage::<Database>(database)
}

#[launch]
async fn rocket() -> _ {
    build_rocket(AppConfig::from_env()).await
}
