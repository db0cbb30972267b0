//! CSV-based injection repository.

use csv::{ReaderBuilder, Writer};
use log::warn;
use std::fs::{File, OpenOptions};
use std::io::{BufReader, BufWriter};

use super::connection::{CsvConnection, INJECTION_HEADERS};
use crate::domain::models::injection::{Injection, InjectionSite};
use crate::storage::dates;
use crate::storage::traits::StoreError;

/// Reads and writes the injections CSV file.
#[derive(Clone)]
pub struct InjectionRepository {
    connection: CsvConnection,
}

impl InjectionRepository {
    pub fn new(connection: CsvConnection) -> Self {
        Self { connection }
    }

    /// Read every injection row. A missing file means no data yet, not an error.
    ///
    /// Rows are read best-effort: a field that cannot be parsed becomes None
    /// (or an empty string) while the rest of the row is kept. Columns are
    /// located by header name so older files without a `user` column still load.
    pub fn read_all(&self) -> Result<Vec<Injection>, StoreError> {
        let file_path = self.connection.injections_file_path();
        if !file_path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&file_path)?;
        let reader = BufReader::new(file);
        let mut csv_reader = ReaderBuilder::new().flexible(true).from_reader(reader);

        let headers = csv_reader.headers()?.clone();
        let column = |name: &str| {
            headers
                .iter()
                .position(|header| header.trim().eq_ignore_ascii_case(name))
        };
        let date_column = column("date");
        let time_column = column("time");
        let dosage_column = column("dosage");
        let weight_column = column("weight");
        let site_column = column("site");
        let notes_column = column("notes");
        let user_column = column("user");

        let mut injections = Vec::new();
        for result in csv_reader.records() {
            let record = result?;
            let field =
                |column: Option<usize>| column.and_then(|index| record.get(index)).unwrap_or("").trim();

            let user = field(user_column).to_string();
            injections.push(Injection {
                date: dates::parse_date_text(field(date_column)),
                time: dates::parse_time_text(field(time_column)),
                dosage_mg: parse_measurement(field(dosage_column)),
                weight_lbs: parse_measurement(field(weight_column)),
                site: InjectionSite::from_label(field(site_column)),
                notes: field(notes_column).to_string(),
                user: (!user.is_empty()).then_some(user),
            });
        }

        Ok(injections)
    }

    /// Append one injection: read the full file, add the row, rewrite atomically.
    pub fn append(&self, injection: &Injection) -> Result<(), StoreError> {
        self.connection.ensure_injections_file_exists()?;
        let mut injections = self.read_all()?;
        injections.push(injection.clone());
        self.write_all(&injections)
    }

    /// Write every row back out through a temp file and an atomic rename.
    fn write_all(&self, injections: &[Injection]) -> Result<(), StoreError> {
        let file_path = self.connection.injections_file_path();
        let temp_path = file_path.with_extension("tmp");

        {
            let file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&temp_path)?;
            let writer = BufWriter::new(file);
            let mut csv_writer = Writer::from_writer(writer);

            csv_writer.write_record(INJECTION_HEADERS)?;
            for injection in injections {
                csv_writer.write_record(&[
                    injection
                        .date
                        .map(|date| date.format("%Y-%m-%d").to_string())
                        .unwrap_or_default(),
                    injection
                        .time
                        .map(|time| time.format("%H:%M:%S").to_string())
                        .unwrap_or_default(),
                    injection.dosage_mg.map(|value| value.to_string()).unwrap_or_default(),
                    injection.weight_lbs.map(|value| value.to_string()).unwrap_or_default(),
                    injection.site.as_str().to_string(),
                    injection.notes.clone(),
                    injection.user.clone().unwrap_or_default(),
                ])?;
            }
            csv_writer.flush()?;
        }

        std::fs::rename(&temp_path, &file_path)?;
        Ok(())
    }
}

/// Parse a numeric measurement field. Unreadable or negative values are
/// dropped rather than failing the row.
fn parse_measurement(field: &str) -> Option<f64> {
    if field.is_empty() {
        return None;
    }
    match field.parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => Some(value),
        Ok(value) => {
            warn!("Discarding out-of-range measurement '{}'", value);
            None
        }
        Err(_) => {
            warn!("Discarding unreadable measurement '{}'", field);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};
    use tempfile::TempDir;

    fn setup() -> (InjectionRepository, CsvConnection, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let connection = CsvConnection::new(temp_dir.path()).unwrap();
        (InjectionRepository::new(connection.clone()), connection, temp_dir)
    }

    fn sample_injection() -> Injection {
        Injection {
            date: NaiveDate::from_ymd_opt(2024, 1, 15),
            time: NaiveTime::from_hms_opt(10, 30, 0),
            dosage_mg: Some(2.5),
            weight_lbs: Some(201.5),
            site: InjectionSite::Thigh,
            notes: "left side".to_string(),
            user: Some("James".to_string()),
        }
    }

    #[test]
    fn test_read_all_with_missing_file_is_empty() {
        let (repository, _connection, _temp_dir) = setup();
        assert_eq!(repository.read_all().unwrap(), Vec::new());
    }

    #[test]
    fn test_append_then_read_round_trips_every_field() {
        let (repository, _connection, _temp_dir) = setup();
        let injection = sample_injection();

        repository.append(&injection).unwrap();
        let loaded = repository.read_all().unwrap();

        assert_eq!(loaded, vec![injection]);
    }

    #[test]
    fn test_append_keeps_existing_rows() {
        let (repository, _connection, _temp_dir) = setup();
        let first = sample_injection();
        let mut second = sample_injection();
        second.date = NaiveDate::from_ymd_opt(2024, 1, 22);
        second.user = Some("Shannon".to_string());

        repository.append(&first).unwrap();
        repository.append(&second).unwrap();

        let loaded = repository.read_all().unwrap();
        assert_eq!(loaded, vec![first, second]);
    }

    #[test]
    fn test_legacy_file_without_user_column_still_loads() {
        let (repository, connection, _temp_dir) = setup();
        std::fs::write(
            connection.injections_file_path(),
            "date,time,dosage,weight,site,notes\n2023-11-02,09:00:00,1.25,210,Abdomen,first dose\n",
        )
        .unwrap();

        let loaded = repository.read_all().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].date, NaiveDate::from_ymd_opt(2023, 11, 2));
        assert_eq!(loaded[0].dosage_mg, Some(1.25));
        assert_eq!(loaded[0].site, InjectionSite::Abdomen);
        assert_eq!(loaded[0].user, None);
    }

    #[test]
    fn test_bad_fields_become_none_without_losing_the_row() {
        let (repository, connection, _temp_dir) = setup();
        std::fs::write(
            connection.injections_file_path(),
            "date,time,dosage,weight,site,notes,user\nnot-a-date,later,abc,-5,Knee,felt fine,James\n",
        )
        .unwrap();

        let loaded = repository.read_all().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].date, None);
        assert_eq!(loaded[0].time, None);
        assert_eq!(loaded[0].dosage_mg, None);
        assert_eq!(loaded[0].weight_lbs, None); // negative weights are dropped
        assert_eq!(loaded[0].site, InjectionSite::Other);
        assert_eq!(loaded[0].notes, "felt fine");
        assert_eq!(loaded[0].user, Some("James".to_string()));
    }

    #[test]
    fn test_serial_date_text_in_csv_is_normalized() {
        let (repository, connection, _temp_dir) = setup();
        std::fs::write(
            connection.injections_file_path(),
            "date,time,dosage,weight,site,notes,user\n45292,,2.5,,,,\n",
        )
        .unwrap();

        let loaded = repository.read_all().unwrap();
        assert_eq!(loaded[0].date, NaiveDate::from_ymd_opt(2024, 1, 1));
    }

    #[test]
    fn test_short_rows_load_with_missing_fields() {
        let (repository, connection, _temp_dir) = setup();
        std::fs::write(
            connection.injections_file_path(),
            "date,time,dosage,weight,site,notes,user\n2024-01-15,10:30:00,2.5\n",
        )
        .unwrap();

        let loaded = repository.read_all().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].dosage_mg, Some(2.5));
        assert_eq!(loaded[0].weight_lbs, None);
        assert_eq!(loaded[0].site, InjectionSite::Unspecified);
    }
}
