//! CSV workbook implementation of the row store.
//!
//! A workbook is a directory of tab files, one CSV per table, header row
//! first. Reading is lenient: cells are looked up by header name, unknown
//! columns are ignored, missing columns read as empty, and unparseable
//! dates or numbers degrade to their defaults instead of failing the load.
//! Writing rewrites the whole tab, canonical header included.

use std::path::{Path, PathBuf};

use csv::StringRecord;
use tracing::{debug, info};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::model::{parse_date, parse_ref, Drone, Mission, Pilot, Snapshot};

use super::RowStore;

/// Canonical pilot roster columns.
const PILOT_HEADER: [&str; 9] = [
    "pilot_id",
    "name",
    "skills",
    "certifications",
    "location",
    "status",
    "current_assignment",
    "available_from",
    "daily_rate",
];

/// Canonical drone fleet columns.
const DRONE_HEADER: [&str; 8] = [
    "drone_id",
    "model",
    "capabilities",
    "status",
    "location",
    "current_assignment",
    "maintenance_due",
    "weather_resistance",
];

/// Canonical mission columns.
const MISSION_HEADER: [&str; 12] = [
    "project_id",
    "client",
    "location",
    "required_skills",
    "required_certs",
    "start_date",
    "end_date",
    "priority",
    "mission_budget",
    "weather_forecast",
    "assigned_pilot",
    "assigned_drone",
];

/// A directory-of-CSVs workbook.
#[derive(Debug, Clone)]
pub struct Workbook {
    /// Workbook directory.
    dir: PathBuf,
    /// Tab name for the pilot roster.
    pilots_tab: String,
    /// Tab name for the drone fleet.
    drones_tab: String,
    /// Tab name for the missions list.
    missions_tab: String,
}

impl Workbook {
    /// Create a workbook over the given directory and tab names.
    #[must_use]
    pub fn new(
        dir: impl Into<PathBuf>,
        pilots_tab: impl Into<String>,
        drones_tab: impl Into<String>,
        missions_tab: impl Into<String>,
    ) -> Self {
        Self {
            dir: dir.into(),
            pilots_tab: pilots_tab.into(),
            drones_tab: drones_tab.into(),
            missions_tab: missions_tab.into(),
        }
    }

    /// Create a workbook from configuration.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.workbook_dir(),
            config.store.pilots_tab.clone(),
            config.store.drones_tab.clone(),
            config.store.missions_tab.clone(),
        )
    }

    /// The workbook directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn tab_path(&self, tab: &str) -> PathBuf {
        self.dir.join(format!("{tab}.csv"))
    }

    /// Read a tab into header + rows, failing with connectivity errors.
    fn read_tab(&self, tab: &str) -> Result<(StringRecord, Vec<StringRecord>)> {
        let path = self.tab_path(tab);
        if !path.is_file() {
            return Err(Error::table_missing(tab, path));
        }

        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_path(&path)
            .map_err(|source| Error::TableRead {
                table: tab.to_string(),
                source,
            })?;

        let headers = reader
            .headers()
            .map_err(|source| Error::TableRead {
                table: tab.to_string(),
                source,
            })?
            .clone();

        let mut rows = Vec::new();
        for record in reader.records() {
            rows.push(record.map_err(|source| Error::TableRead {
                table: tab.to_string(),
                source,
            })?);
        }
        debug!("read {} rows from tab '{tab}'", rows.len());
        Ok((headers, rows))
    }

    fn write_tab<I, const N: usize>(&self, tab: &str, header: [&str; N], rows: I) -> Result<()>
    where
        I: IntoIterator<Item = Vec<String>>,
    {
        std::fs::create_dir_all(&self.dir).map_err(|source| Error::SourceOpen {
            path: self.dir.clone(),
            source,
        })?;

        let path = self.tab_path(tab);
        let mut writer = csv::Writer::from_path(&path).map_err(|source| Error::TableWrite {
            table: tab.to_string(),
            source,
        })?;

        writer
            .write_record(header)
            .map_err(|source| Error::TableWrite {
                table: tab.to_string(),
                source,
            })?;
        let mut count = 0usize;
        for row in rows {
            writer.write_record(&row).map_err(|source| Error::TableWrite {
                table: tab.to_string(),
                source,
            })?;
            count += 1;
        }
        writer.flush()?;
        info!("wrote {count} rows to tab '{tab}'");
        Ok(())
    }
}

impl RowStore for Workbook {
    fn load(&self) -> Result<Snapshot> {
        std::fs::metadata(&self.dir).map_err(|source| Error::SourceOpen {
            path: self.dir.clone(),
            source,
        })?;

        let (headers, rows) = self.read_tab(&self.pilots_tab)?;
        let pilots = rows.iter().map(|r| row_to_pilot(&headers, r)).collect();

        let (headers, rows) = self.read_tab(&self.drones_tab)?;
        let drones = rows.iter().map(|r| row_to_drone(&headers, r)).collect();

        let (headers, rows) = self.read_tab(&self.missions_tab)?;
        let missions = rows.iter().map(|r| row_to_mission(&headers, r)).collect();

        Ok(Snapshot {
            pilots,
            drones,
            missions,
        })
    }

    fn save_pilots(&self, pilots: &[Pilot]) -> Result<()> {
        self.write_tab(&self.pilots_tab, PILOT_HEADER, pilots.iter().map(pilot_to_row))
    }

    fn save_drones(&self, drones: &[Drone]) -> Result<()> {
        self.write_tab(&self.drones_tab, DRONE_HEADER, drones.iter().map(drone_to_row))
    }

    fn save_missions(&self, missions: &[Mission]) -> Result<()> {
        self.write_tab(
            &self.missions_tab,
            MISSION_HEADER,
            missions.iter().map(mission_to_row),
        )
    }
}

/// Look a cell up by header name; absent columns read as empty.
fn cell<'r>(headers: &StringRecord, record: &'r StringRecord, name: &str) -> &'r str {
    headers
        .iter()
        .position(|h| h.trim() == name)
        .and_then(|i| record.get(i))
        .unwrap_or("")
        .trim()
}

fn parse_rate(cell: &str) -> f64 {
    cell.replace(',', "").parse().unwrap_or(0.0)
}

fn parse_budget(cell: &str) -> Option<f64> {
    cell.replace(',', "").parse().ok()
}

fn row_to_pilot(headers: &StringRecord, record: &StringRecord) -> Pilot {
    Pilot {
        id: cell(headers, record, "pilot_id").to_string(),
        name: cell(headers, record, "name").to_string(),
        skills: cell(headers, record, "skills").to_string(),
        certifications: cell(headers, record, "certifications").to_string(),
        location: cell(headers, record, "location").to_string(),
        status: cell(headers, record, "status").to_string(),
        current_assignment: parse_ref(cell(headers, record, "current_assignment")),
        available_from: parse_date(cell(headers, record, "available_from")),
        daily_rate: parse_rate(cell(headers, record, "daily_rate")),
    }
}

fn row_to_drone(headers: &StringRecord, record: &StringRecord) -> Drone {
    Drone {
        id: cell(headers, record, "drone_id").to_string(),
        model: cell(headers, record, "model").to_string(),
        capabilities: cell(headers, record, "capabilities").to_string(),
        status: cell(headers, record, "status").to_string(),
        location: cell(headers, record, "location").to_string(),
        current_assignment: parse_ref(cell(headers, record, "current_assignment")),
        maintenance_due: parse_date(cell(headers, record, "maintenance_due")),
        weather_resistance: cell(headers, record, "weather_resistance").to_string(),
    }
}

fn row_to_mission(headers: &StringRecord, record: &StringRecord) -> Mission {
    Mission {
        id: cell(headers, record, "project_id").to_string(),
        client: cell(headers, record, "client").to_string(),
        location: cell(headers, record, "location").to_string(),
        required_skills: cell(headers, record, "required_skills").to_string(),
        required_certs: cell(headers, record, "required_certs").to_string(),
        start_date: parse_date(cell(headers, record, "start_date")),
        end_date: parse_date(cell(headers, record, "end_date")),
        priority: cell(headers, record, "priority").to_string(),
        budget: parse_budget(cell(headers, record, "mission_budget")),
        weather_forecast: cell(headers, record, "weather_forecast").to_string(),
        assigned_pilot: parse_ref(cell(headers, record, "assigned_pilot")),
        assigned_drone: parse_ref(cell(headers, record, "assigned_drone")),
    }
}

fn fmt_date(date: Option<chrono::NaiveDate>) -> String {
    date.map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}

fn pilot_to_row(pilot: &Pilot) -> Vec<String> {
    vec![
        pilot.id.clone(),
        pilot.name.clone(),
        pilot.skills.clone(),
        pilot.certifications.clone(),
        pilot.location.clone(),
        pilot.status.clone(),
        pilot.current_assignment.clone().unwrap_or_default(),
        fmt_date(pilot.available_from),
        pilot.daily_rate.to_string(),
    ]
}

fn drone_to_row(drone: &Drone) -> Vec<String> {
    vec![
        drone.id.clone(),
        drone.model.clone(),
        drone.capabilities.clone(),
        drone.status.clone(),
        drone.location.clone(),
        drone.current_assignment.clone().unwrap_or_default(),
        fmt_date(drone.maintenance_due),
        drone.weather_resistance.clone(),
    ]
}

fn mission_to_row(mission: &Mission) -> Vec<String> {
    vec![
        mission.id.clone(),
        mission.client.clone(),
        mission.location.clone(),
        mission.required_skills.clone(),
        mission.required_certs.clone(),
        fmt_date(mission.start_date),
        fmt_date(mission.end_date),
        mission.priority.clone(),
        mission.budget.map(|b| b.to_string()).unwrap_or_default(),
        mission.weather_forecast.clone(),
        mission.assigned_pilot.clone().unwrap_or_default(),
        mission.assigned_drone.clone().unwrap_or_default(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn temp_workbook(case: &str) -> Workbook {
        let dir = std::env::temp_dir().join(format!("gndctl_wb_{}_{case}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        Workbook::new(dir, "pilot_roster", "drone_fleet", "missions")
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn sample_snapshot() -> Snapshot {
        Snapshot {
            pilots: vec![Pilot {
                id: "P1".to_string(),
                name: "Asha".to_string(),
                skills: "Thermal,GIS".to_string(),
                certifications: "RPAS".to_string(),
                location: "Bengaluru".to_string(),
                status: "Available".to_string(),
                current_assignment: None,
                available_from: Some(date("2024-02-01")),
                daily_rate: 5000.0,
            }],
            drones: vec![Drone {
                id: "D1".to_string(),
                model: "Heron X2".to_string(),
                capabilities: "Thermal".to_string(),
                status: "Available".to_string(),
                location: "Bengaluru".to_string(),
                current_assignment: None,
                maintenance_due: Some(date("2024-06-01")),
                weather_resistance: "IP54".to_string(),
            }],
            missions: vec![Mission {
                id: "PRJ-1".to_string(),
                client: "AgriCo".to_string(),
                location: "Bengaluru".to_string(),
                required_skills: "Thermal".to_string(),
                required_certs: "RPAS".to_string(),
                start_date: Some(date("2024-03-01")),
                end_date: Some(date("2024-03-03")),
                priority: "High".to_string(),
                budget: Some(20000.0),
                weather_forecast: "Clear".to_string(),
                assigned_pilot: Some("P1".to_string()),
                assigned_drone: None,
            }],
        }
    }

    fn save_all(workbook: &Workbook, snapshot: &Snapshot) {
        workbook.save_pilots(&snapshot.pilots).unwrap();
        workbook.save_drones(&snapshot.drones).unwrap();
        workbook.save_missions(&snapshot.missions).unwrap();
    }

    #[test]
    fn test_save_then_load_round_trip() {
        let workbook = temp_workbook("round_trip");
        let snapshot = sample_snapshot();
        save_all(&workbook, &snapshot);

        let loaded = workbook.load().unwrap();
        assert_eq!(loaded, snapshot);

        let _ = std::fs::remove_dir_all(workbook.dir());
    }

    #[test]
    fn test_missing_directory_is_source_open() {
        let workbook = temp_workbook("missing_dir");
        let err = workbook.load().unwrap_err();
        assert!(matches!(err, Error::SourceOpen { .. }));
        assert!(err.is_connectivity());
    }

    #[test]
    fn test_missing_tab_is_table_missing() {
        let workbook = temp_workbook("missing_tab");
        workbook.save_pilots(&[]).unwrap();
        // drones tab never written
        let err = workbook.load().unwrap_err();
        match err {
            Error::TableMissing { table, .. } => assert_eq!(table, "drone_fleet"),
            other => panic!("expected TableMissing, got {other}"),
        }
        let _ = std::fs::remove_dir_all(workbook.dir());
    }

    #[test]
    fn test_save_is_full_overwrite() {
        let workbook = temp_workbook("overwrite");
        let snapshot = sample_snapshot();
        save_all(&workbook, &snapshot);

        workbook.save_pilots(&[]).unwrap();
        let loaded = workbook.load().unwrap();
        assert!(loaded.pilots.is_empty());
        assert_eq!(loaded.missions.len(), 1);

        let _ = std::fs::remove_dir_all(workbook.dir());
    }

    #[test]
    fn test_lenient_cells_degrade() {
        let workbook = temp_workbook("lenient");
        std::fs::create_dir_all(workbook.dir()).unwrap();
        // Unknown column order, a garbage date, a garbage rate, and a
        // blank assignment cell
        std::fs::write(
            workbook.tab_path("pilot_roster"),
            "name,pilot_id,daily_rate,available_from,current_assignment\n\
             Asha,P1,not-a-number,someday,  \n",
        )
        .unwrap();
        std::fs::write(workbook.tab_path("drone_fleet"), "drone_id\n").unwrap();
        std::fs::write(
            workbook.tab_path("missions"),
            "project_id,start_date,mission_budget\nPRJ-1,2024-03-01,\n",
        )
        .unwrap();

        let loaded = workbook.load().unwrap();
        let pilot = &loaded.pilots[0];
        assert_eq!(pilot.id, "P1");
        assert_eq!(pilot.name, "Asha");
        assert!((pilot.daily_rate - 0.0).abs() < f64::EPSILON);
        assert!(pilot.available_from.is_none());
        assert!(pilot.current_assignment.is_none());
        // Columns absent from the file read as empty
        assert!(pilot.skills.is_empty());

        let mission = &loaded.missions[0];
        assert_eq!(mission.start_date, Some(date("2024-03-01")));
        assert!(mission.budget.is_none());

        let _ = std::fs::remove_dir_all(workbook.dir());
    }

    #[test]
    fn test_rate_with_thousands_separators() {
        assert!((parse_rate("5,000") - 5000.0).abs() < f64::EPSILON);
        assert_eq!(parse_budget("1,20,000"), Some(120_000.0));
        assert_eq!(parse_budget(""), None);
    }

    #[test]
    fn test_header_written_on_empty_table() {
        let workbook = temp_workbook("empty_header");
        workbook.save_missions(&[]).unwrap();
        let contents = std::fs::read_to_string(workbook.tab_path("missions")).unwrap();
        assert!(contents.starts_with("project_id,client,location"));
        let _ = std::fs::remove_dir_all(workbook.dir());
    }

    #[test]
    fn test_from_config_uses_tab_names() {
        let mut config = Config::default();
        config.store.workbook_dir = Some(PathBuf::from("/srv/board"));
        config.store.pilots_tab = "crew".to_string();
        let workbook = Workbook::from_config(&config);
        assert_eq!(workbook.dir(), Path::new("/srv/board"));
        assert_eq!(workbook.tab_path("crew"), PathBuf::from("/srv/board/crew.csv"));
    }
}
