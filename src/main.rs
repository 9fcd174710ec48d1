use chrono::{Local, NaiveDate};
use meteo_archive::{output_path, ArchiveError, HistoricalWeather};
use std::path::Path;

const LATITUDE: f64 = 37.656;
const LONGITUDE: f64 = 21.3174;
const START_DATE: &str = "2000-01-01";
const END_DATE: &str = "2024-07-01";
// Must exist; it is not created.
const OUTPUT_DIR: &str = "./data/";

#[tokio::main]
async fn main() -> Result<(), ArchiveError> {
    // Set RUST_LOG=info (or debug) to see cache and retry messages
    env_logger::init();

    let start_date: NaiveDate = START_DATE.parse()?;
    let end_date: NaiveDate = END_DATE.parse()?;

    let client = HistoricalWeather::new().await?;
    let mut hourly = client
        .fetch()
        .latitude(LATITUDE)
        .longitude(LONGITUDE)
        .start_date(start_date)
        .end_date(end_date)
        .call()
        .await?;

    let path = output_path(Path::new(OUTPUT_DIR), &Local::now());
    hourly.write_csv(&path)?;
    println!("data saved");

    Ok(())
}
