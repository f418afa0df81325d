//! `gndctl` - CLI for the groundcontrol operations board
//!
//! Each invocation loads a fresh snapshot of the board, runs one
//! operator action against it, and (for mutating actions) writes the
//! touched tables back through the row store.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use clap::Parser;
use tracing::warn;

use groundcontrol::cli::{
    AssignCommand, Cli, Command, ConflictsCommand, ConfigCommand, HealthCommand, MatchCommand,
    OutputFormat, PilotsCommand, SetStatusCommand, UrgentCommand,
};
use groundcontrol::matching::{self, TagSet};
use groundcontrol::store::health;
use groundcontrol::{conflicts, Config, RowStore, Snapshot, Workbook};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration first; the log directory comes from it
    let config = Config::load_from(cli.config.clone())?;
    let _guard = groundcontrol::init_logging(cli.verbosity(), config.log_dir().as_deref());

    match cli.command {
        Command::Pilots(cmd) => handle_pilots(&config, &cmd),
        Command::Match(cmd) => handle_match(&config, &cmd),
        Command::Urgent(cmd) => handle_urgent(&config, &cmd),
        Command::Assign(cmd) => handle_assign(&config, &cmd),
        Command::SetStatus(cmd) => handle_set_status(&config, &cmd),
        Command::Conflicts(cmd) => handle_conflicts(&config, &cmd),
        Command::Health(cmd) => {
            handle_health(&config, &cmd);
            Ok(())
        }
        Command::Config(cmd) => handle_config(&config, cmd),
    }
}

/// Load the board for a read-only command, degrading to an empty board
/// with a warning when the store is unreachable.
fn load_or_empty(store: &Workbook) -> Snapshot {
    match store.load() {
        Ok(snapshot) => snapshot,
        Err(e) => {
            warn!("failed to load workbook ({e}); continuing with an empty board");
            Snapshot::empty()
        }
    }
}

fn handle_pilots(config: &Config, cmd: &PilotsCommand) -> anyhow::Result<()> {
    let store = Workbook::from_config(config);
    let snapshot = load_or_empty(&store);

    let skills = TagSet::parse(cmd.skills.as_deref().unwrap_or(""));
    let found = matching::available_pilots(
        &snapshot.pilots,
        &skills,
        cmd.location.as_deref(),
        config.matching.tag_match,
    );

    match cmd.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&found)?),
        OutputFormat::Table => {
            println!(
                "{:<10} {:<20} {:<30} {:<16} {:<14} {:>10}",
                "ID", "NAME", "SKILLS", "LOCATION", "STATUS", "RATE"
            );
            for p in &found {
                println!(
                    "{:<10} {:<20} {:<30} {:<16} {:<14} {:>10}",
                    p.id, p.name, p.skills, p.location, p.status, p.daily_rate
                );
            }
            println!();
            println!("{} pilot(s) available", found.len());
        }
    }
    Ok(())
}

fn handle_match(config: &Config, cmd: &MatchCommand) -> anyhow::Result<()> {
    let store = Workbook::from_config(config);
    let snapshot = load_or_empty(&store);
    let mission = snapshot
        .mission(&cmd.mission)
        .ok_or_else(|| groundcontrol::Error::UnknownMission {
            id: cmd.mission.clone(),
        })?;

    let pilots = matching::match_pilots(mission, &snapshot.pilots, config.matching.tag_match);
    let drones = matching::match_drones(mission, &snapshot.drones);

    match cmd.format {
        OutputFormat::Json => {
            let out = serde_json::json!({ "pilots": pilots, "drones": drones });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        OutputFormat::Table => {
            println!("Pilot matches for {}:", mission.id);
            println!(
                "  {:<10} {:<20} {:>12} {:<6}",
                "ID", "NAME", "EST. COST", "BUDGET"
            );
            for c in &pilots {
                println!(
                    "  {:<10} {:<20} {:>12} {:<6}",
                    c.pilot.id,
                    c.pilot.name,
                    c.estimated_cost,
                    if c.within_budget { "ok" } else { "over" }
                );
            }
            println!();
            println!("Drone matches for {}:", mission.id);
            println!(
                "  {:<10} {:<20} {:<10} {:<8} {:<12}",
                "ID", "MODEL", "CAPABILITY", "WEATHER", "MAINT. DUE"
            );
            for c in &drones {
                println!(
                    "  {:<10} {:<20} {:<10} {:<8} {:<12}",
                    c.drone.id,
                    c.drone.model,
                    if c.capability_match { "match" } else { "-" },
                    if c.weather_ok { "ok" } else { "risk" },
                    c.drone
                        .maintenance_due
                        .map(|d| d.to_string())
                        .unwrap_or_default()
                );
            }
        }
    }
    Ok(())
}

fn handle_urgent(config: &Config, cmd: &UrgentCommand) -> anyhow::Result<()> {
    let store = Workbook::from_config(config);
    let snapshot = load_or_empty(&store);
    let mission = snapshot
        .mission(&cmd.mission)
        .ok_or_else(|| groundcontrol::Error::UnknownMission {
            id: cmd.mission.clone(),
        })?;

    let limit = cmd.limit.unwrap_or(config.matching.urgent_candidates);
    let (pilots, drones) =
        matching::suggest_urgent(mission, &snapshot.pilots, &snapshot.drones, limit);

    match cmd.format {
        OutputFormat::Json => {
            let out = serde_json::json!({ "pilots": pilots, "drones": drones });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        OutputFormat::Table => {
            println!("Urgent pilot candidates for {}:", mission.id);
            println!(
                "  {:<10} {:<20} {:>7} {:>12} {:<6}",
                "ID", "NAME", "SCORE", "EST. COST", "BUDGET"
            );
            for c in &pilots {
                println!(
                    "  {:<10} {:<20} {:>7.1} {:>12} {:<6}",
                    c.pilot.id,
                    c.pilot.name,
                    c.score,
                    c.estimated_cost,
                    if c.within_budget { "ok" } else { "over" }
                );
            }
            println!();
            println!("Urgent drone candidates for {}:", mission.id);
            println!("  {:<10} {:<20} {:>7} {:<8}", "ID", "MODEL", "SCORE", "WEATHER");
            for c in &drones {
                println!(
                    "  {:<10} {:<20} {:>7} {:<8}",
                    c.drone.id,
                    c.drone.model,
                    c.score,
                    if c.weather_ok { "ok" } else { "risk" }
                );
            }
        }
    }
    Ok(())
}

fn handle_assign(config: &Config, cmd: &AssignCommand) -> anyhow::Result<()> {
    let store = Workbook::from_config(config);
    // Mutating commands need the real board; no degraded fallback here
    let mut snapshot = store.load()?;

    groundcontrol::assign::apply(
        &mut snapshot,
        &cmd.mission,
        cmd.pilot.as_deref(),
        cmd.drone.as_deref(),
    )?;

    // Tables are written one after another; a failure partway leaves the
    // earlier writes in place and surfaces as the command's error.
    store.save_pilots(&snapshot.pilots)?;
    store.save_drones(&snapshot.drones)?;
    store.save_missions(&snapshot.missions)?;

    if let Some(pilot) = &cmd.pilot {
        println!("Assigned pilot {pilot} to {}", cmd.mission);
    }
    if let Some(drone) = &cmd.drone {
        println!("Assigned drone {drone} to {}", cmd.mission);
    }
    Ok(())
}

fn handle_set_status(config: &Config, cmd: &SetStatusCommand) -> anyhow::Result<()> {
    let store = Workbook::from_config(config);
    let mut snapshot = store.load()?;

    let status = cmd.status.into();
    groundcontrol::assign::set_pilot_status(&mut snapshot, &cmd.pilot, status)?;
    store.save_pilots(&snapshot.pilots)?;

    println!("Updated {} -> {status}", cmd.pilot);
    Ok(())
}

fn handle_conflicts(config: &Config, cmd: &ConflictsCommand) -> anyhow::Result<()> {
    let store = Workbook::from_config(config);
    let snapshot = load_or_empty(&store);
    let found = conflicts::detect(&snapshot);

    match cmd.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&found)?),
        OutputFormat::Table => {
            if found.is_empty() {
                println!("No conflicts detected");
            } else {
                println!("{} issue(s) found:", found.len());
                for conflict in &found {
                    println!("  {conflict}");
                }
            }
        }
    }
    Ok(())
}

fn handle_health(config: &Config, cmd: &HealthCommand) {
    let report = health::check(config);

    if cmd.json {
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{json}"),
            Err(e) => eprintln!("failed to render health report: {e}"),
        }
        return;
    }

    println!("gndctl store health");
    println!("-------------------");
    println!("Credentials:   {}", if report.credentials_loaded { "loaded" } else { "not found" });
    if let Some(source) = &report.credentials_source {
        println!("Source:        {source}");
    }
    if let Some(email) = &report.client_email {
        println!("Account:       {email}");
    }
    println!("Workbook:      {}", if report.can_open { "opens" } else { "cannot open" });
    if !report.tabs.is_empty() {
        println!("Tabs:          {}", report.tabs.join(", "));
    }
    if let Some(error) = &report.error {
        println!("Error:         {error}");
    }
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Store]");
                println!("  Workbook dir:    {}", config.workbook_dir().display());
                println!("  Pilots tab:      {}", config.store.pilots_tab);
                println!("  Drones tab:      {}", config.store.drones_tab);
                println!("  Missions tab:    {}", config.store.missions_tab);
                println!("  Secrets path:    {}", config.secrets_path().display());
                println!();
                println!("[Matching]");
                println!("  Tag match:       {:?}", config.matching.tag_match);
                println!("  Urgent shortlist: {}", config.matching.urgent_candidates);
                println!();
                println!("[Logging]");
                println!("  File logging:    {}", config.logging.file_enabled);
                if let Some(dir) = config.log_dir() {
                    println!("  Log dir:         {}", dir.display());
                }
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => println!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}
