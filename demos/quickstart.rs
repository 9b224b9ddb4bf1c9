use alienclock::{AlienClock, EarthInstant};
use chrono::Utc;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let clock = AlienClock::default();

    if let Some(readout) = clock.reset() {
        println!("epoch: {} | {}", readout.alien, readout.earth);
    }
    if let Some(readout) = clock.query(EarthInstant::from_utc(Utc::now())) {
        println!("now:   {} | {}", readout.alien, readout.earth);
    }
    if let Some(readout) = clock.set_earth_date_time("2024", "3", "15", "12", "30", "45") {
        println!("set:   {} | {}", readout.alien, readout.earth);
    }
    if clock.set_earth_date_time("2024", "2", "30", "0", "0", "0").is_none() {
        println!("2024-02-30 rejected");
    }
}
