use clap::Args;
use orbit_core::world_clock::{self, WorldClock};
use orbit_core::Config;
use tracing::warn;

#[derive(Args)]
pub struct ClockArgs {
    /// Search the city catalog instead of showing readings
    #[arg(long)]
    pub search: Option<String>,
    /// Show these cities instead of the configured list
    #[arg(long, value_delimiter = ',')]
    pub cities: Vec<String>,
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(args: ClockArgs) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(query) = args.search {
        let found = world_clock::search(&query);
        if found.is_empty() {
            println!("No cities match '{query}'.");
        }
        for city in found {
            println!("{:<16} {:<16} {:<10} {}", city.city, city.region, city.area, city.timezone.name());
        }
        return Ok(());
    }

    let config = Config::load()?;
    let (clock, unknown) = if args.cities.is_empty() {
        config.world_clock()
    } else {
        WorldClock::from_names(args.cities.as_slice())
    };
    for name in unknown {
        warn!(city = %name, "city not in catalog; skipped");
    }

    let readings = clock.readings_now();
    if args.json {
        println!("{}", serde_json::to_string_pretty(&readings)?);
        return Ok(());
    }
    for r in readings {
        println!(
            "{:<16} {}  {:<5}  {}",
            r.city,
            r.local_time.format(&config.clock.time_format),
            if r.is_day { "day" } else { "night" },
            r.offset_label(),
        );
    }
    Ok(())
}
