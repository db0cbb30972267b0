//! CSV-based side-effect repository.

use csv::{ReaderBuilder, Writer};
use std::fs::{File, OpenOptions};
use std::io::{BufReader, BufWriter};

use super::connection::{CsvConnection, SIDE_EFFECT_HEADERS};
use crate::domain::models::side_effect::SideEffect;
use crate::storage::dates;
use crate::storage::traits::StoreError;

/// Reads and writes the side-effects CSV file.
#[derive(Clone)]
pub struct SideEffectRepository {
    connection: CsvConnection,
}

impl SideEffectRepository {
    pub fn new(connection: CsvConnection) -> Self {
        Self { connection }
    }

    /// Read every side-effect row. A missing file means no data yet, not an error.
    pub fn read_all(&self) -> Result<Vec<SideEffect>, StoreError> {
        let file_path = self.connection.side_effects_file_path();
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
        let notes_column = column("notes");
        let user_column = column("user");

        let mut side_effects = Vec::new();
        for result in csv_reader.records() {
            let record = result?;
            let field =
                |column: Option<usize>| column.and_then(|index| record.get(index)).unwrap_or("").trim();

            let user = field(user_column).to_string();
            side_effects.push(SideEffect {
                date: dates::parse_date_text(field(date_column)),
                notes: field(notes_column).to_string(),
                user: (!user.is_empty()).then_some(user),
            });
        }

        Ok(side_effects)
    }

    /// Append one side effect: read the full file, add the row, rewrite atomically.
    pub fn append(&self, side_effect: &SideEffect) -> Result<(), StoreError> {
        self.connection.ensure_side_effects_file_exists()?;
        let mut side_effects = self.read_all()?;
        side_effects.push(side_effect.clone());
        self.write_all(&side_effects)
    }

    fn write_all(&self, side_effects: &[SideEffect]) -> Result<(), StoreError> {
        let file_path = self.connection.side_effects_file_path();
        let temp_path = file_path.with_extension("tmp");

        {
            let file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&temp_path)?;
            let writer = BufWriter::new(file);
            let mut csv_writer = Writer::from_writer(writer);

            csv_writer.write_record(SIDE_EFFECT_HEADERS)?;
            for side_effect in side_effects {
                csv_writer.write_record(&[
                    side_effect
                        .date
                        .map(|date| date.format("%Y-%m-%d").to_string())
                        .unwrap_or_default(),
                    side_effect.notes.clone(),
                    side_effect.user.clone().unwrap_or_default(),
                ])?;
            }
            csv_writer.flush()?;
        }

        std::fs::rename(&temp_path, &file_path)?;
        Ok(())
    }
}
