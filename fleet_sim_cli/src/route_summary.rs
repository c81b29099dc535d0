use std::path::PathBuf;

use clap::Args;
use comfy_table::{Table, presets::UTF8_FULL};

use crate::fleet_file::{FleetDefinition, Preset, load_fleet};

#[derive(Args)]
pub struct RouteArgs {
    /// JSON fleet file, the built-in preset fleet when omitted
    #[arg(short, long)]
    fleet: Option<PathBuf>,

    /// Built-in fleet used when no fleet file is given
    #[arg(short, long, value_enum, default_value_t, conflicts_with = "fleet")]
    preset: Preset,
}

pub fn run(args: RouteArgs) -> Result<(), anyhow::Error> {
    let definition = load_fleet(args.fleet.as_deref(), args.preset, false)?;
    println!("{}", route_table(&definition));

    Ok(())
}

pub fn route_table(definition: &FleetDefinition) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec![
        "Route",
        "Waypoints",
        "Stops",
        "Distance",
        "Start",
        "End",
        "Vehicles",
    ]);

    for named in &definition.routes {
        let endpoint = |coordinate: Option<String>| coordinate.unwrap_or_else(|| String::from("-"));

        table.add_row(vec![
            named.name.clone(),
            named.route.len().to_string(),
            named.stops.len().to_string(),
            named.route.total_distance().to_string(),
            endpoint(named.route.first().map(|c| c.to_string())),
            endpoint(named.route.last().map(|c| c.to_string())),
            definition.vehicles_on(named).to_string(),
        ]);
    }

    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mae_chan_table() {
        let definition = load_fleet(None, Preset::MaeChan, false).unwrap();
        let rendered = route_table(&definition).to_string();

        assert!(rendered.contains("mae-chan"));
        assert!(rendered.contains("191"));
        assert!(rendered.contains("6.19 km"));
        assert!(rendered.contains("(20.058957, 99.899783)"));
    }

    #[test]
    fn test_bangkok_table() {
        let definition = load_fleet(None, Preset::Bangkok, false).unwrap();
        let rendered = route_table(&definition).to_string();

        for name in ["bangkok-city", "campus-shuttle", "express", "van"] {
            assert!(rendered.contains(name), "{name}");
        }
        assert!(rendered.contains("(13.756300, 100.501800)"));
    }
}
