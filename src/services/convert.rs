//! Notary-directory format conversion between JSON and CSV.
//!
//! The directory schema is fixed: `name, title, company, city, state, phone,
//! email, image_url, badges`. JSON carries `badges` as an array; CSV flattens
//! it to a pipe-separated string. Empty CSV cells become nulls on the way
//! back (the name is required), so a round trip preserves every non-array
//! field.

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::services::{ServiceError, ServiceResult};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NotaryRecord {
    pub name: String,
    pub title: Option<String>,
    pub company: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub image_url: Option<String>,
    #[serde(default)]
    pub badges: Vec<String>,
}

/// CSV projection of [`NotaryRecord`]; field order here is the column order.
#[derive(Debug, Serialize, Deserialize)]
struct NotaryCsvRow {
    name: String,
    title: Option<String>,
    company: Option<String>,
    city: Option<String>,
    state: Option<String>,
    phone: Option<String>,
    email: Option<String>,
    image_url: Option<String>,
    badges: String,
}

impl From<&NotaryRecord> for NotaryCsvRow {
    fn from(record: &NotaryRecord) -> Self {
        Self {
            name: record.name.clone(),
            title: record.title.clone(),
            company: record.company.clone(),
            city: record.city.clone(),
            state: record.state.clone(),
            phone: record.phone.clone(),
            email: record.email.clone(),
            image_url: record.image_url.clone(),
            badges: record.badges.join("|"),
        }
    }
}

impl From<NotaryCsvRow> for NotaryRecord {
    fn from(row: NotaryCsvRow) -> Self {
        Self {
            name: row.name,
            title: row.title,
            company: row.company,
            city: row.city,
            state: row.state,
            phone: row.phone,
            email: row.email,
            image_url: row.image_url,
            badges: row
                .badges
                .split('|')
                .map(str::to_string)
                .filter(|badge| !badge.is_empty())
                .collect(),
        }
    }
}

/// Converts a JSON array of notary records to CSV; returns the record count.
pub fn json_to_csv(input: &Path, output: &Path) -> ServiceResult<usize> {
    let file = File::open(input)?;
    let records: Vec<NotaryRecord> = serde_json::from_reader(BufReader::new(file))?;

    if records.is_empty() {
        log::warn!("Input file {} contains no records", input.display());
    }

    let mut writer = csv::Writer::from_path(output)?;
    for record in &records {
        writer.serialize(NotaryCsvRow::from(record))?;
    }
    writer.flush()?;

    Ok(records.len())
}

/// Converts a notary CSV back to a JSON array; returns the record count.
pub fn csv_to_json(input: &Path, output: &Path) -> ServiceResult<usize> {
    let mut reader = csv::Reader::from_path(input)?;
    let mut records = Vec::new();
    for result in reader.deserialize::<NotaryCsvRow>() {
        let row = result?;
        if row.name.trim().is_empty() {
            return Err(ServiceError::InvalidInput(
                "notary record is missing the required 'name' column".to_string(),
            ));
        }
        records.push(NotaryRecord::from(row));
    }

    let file = File::create(output)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, &records)?;

    Ok(records.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> NotaryRecord {
        NotaryRecord {
            name: "Pat Quill".into(),
            title: Some("Notary Public".into()),
            company: Some("Quill & Co".into()),
            city: Some("Austin".into()),
            state: Some("TX".into()),
            phone: None,
            email: Some("pat@quill.co".into()),
            image_url: None,
            badges: vec!["certified".into(), "mobile".into()],
        }
    }

    #[test]
    fn csv_row_round_trips_badges() {
        let record = sample();
        let row = NotaryCsvRow::from(&record);
        assert_eq!(row.badges, "certified|mobile");
        let back = NotaryRecord::from(row);
        assert_eq!(back, record);
    }

    #[test]
    fn empty_badges_become_empty_vec() {
        let row = NotaryCsvRow {
            name: "Pat Quill".into(),
            title: None,
            company: None,
            city: None,
            state: None,
            phone: None,
            email: None,
            image_url: None,
            badges: String::new(),
        };
        assert_eq!(NotaryRecord::from(row).badges, Vec::<String>::new());
    }
}
