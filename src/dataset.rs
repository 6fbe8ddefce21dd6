//! Destination rate dataset loaded from CSV.
//!
//! Expected header (extra columns are ignored):
//! Destination,HotelCost,FoodCost,ActivitiesCost,TransportCost

use rust_decimal::Decimal;
use std::collections::HashMap;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use thiserror::Error;
use tracing::{info, warn};

use crate::models::DestinationRates;

const DESTINATION: &str = "Destination";
const HOTEL_COST: &str = "HotelCost";
const FOOD_COST: &str = "FoodCost";
const ACTIVITIES_COST: &str = "ActivitiesCost";
const TRANSPORT_COST: &str = "TransportCost";

#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("dataset not found: {0}")]
    NotFound(String),

    #[error("Failed to read dataset: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Missing required column: {0}")]
    MissingColumn(&'static str),

    #[error("Empty destination name in row {row}")]
    EmptyDestination { row: usize },

    #[error("Invalid amount in row {row}, column {column}: {value}")]
    InvalidAmount {
        row: usize,
        column: &'static str,
        value: String,
    },

    #[error("Dataset contains no destinations")]
    Empty,
}

/// Column positions resolved from the header row
struct Columns {
    destination: usize,
    hotel: usize,
    food: usize,
    activities: usize,
    transport: usize,
}

impl Columns {
    fn resolve(headers: &csv::StringRecord) -> Result<Self, DatasetError> {
        let find = |name: &'static str| {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or(DatasetError::MissingColumn(name))
        };

        Ok(Self {
            destination: find(DESTINATION)?,
            hotel: find(HOTEL_COST)?,
            food: find(FOOD_COST)?,
            activities: find(ACTIVITIES_COST)?,
            transport: find(TRANSPORT_COST)?,
        })
    }
}

/// Immutable lookup table of destination rates, in file order.
#[derive(Debug, Clone)]
pub struct RateTable {
    rows: Vec<DestinationRates>,
    index: HashMap<String, usize>,
}

impl RateTable {
    /// Load the dataset from a CSV file on disk
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, DatasetError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => DatasetError::NotFound(path.display().to_string()),
            _ => DatasetError::Io(e),
        })?;

        let table = Self::from_reader(file)?;
        info!(
            "Loaded {} destinations from {}",
            table.len(),
            path.display()
        );
        Ok(table)
    }

    /// Parse the dataset from any CSV source
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, DatasetError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let columns = Columns::resolve(reader.headers()?)?;

        let mut rows = Vec::new();
        let mut index = HashMap::new();
        for (row_idx, result) in reader.records().enumerate() {
            let record = result?;
            let row_num = row_idx + 2; // header is row 1

            let rates = parse_record(&record, &columns, row_num)?;
            if index.contains_key(&rates.destination) {
                warn!(
                    "Duplicate destination {} in row {}; keeping the first row",
                    rates.destination, row_num
                );
                continue;
            }
            index.insert(rates.destination.clone(), rows.len());
            rows.push(rates);
        }

        if rows.is_empty() {
            return Err(DatasetError::Empty);
        }

        Ok(Self { rows, index })
    }

    pub fn get(&self, destination: &str) -> Option<&DestinationRates> {
        self.index.get(destination).map(|&i| &self.rows[i])
    }

    /// Destination names in dataset order
    pub fn destinations(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(|r| r.destination.as_str())
    }

    pub fn rows(&self) -> &[DestinationRates] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn parse_record(
    record: &csv::StringRecord,
    columns: &Columns,
    row_num: usize,
) -> Result<DestinationRates, DatasetError> {
    let destination = record.get(columns.destination).unwrap_or("").to_string();
    if destination.is_empty() {
        return Err(DatasetError::EmptyDestination { row: row_num });
    }

    Ok(DestinationRates {
        destination,
        hotel_cost_per_room_per_night: parse_amount(record, columns.hotel, row_num, HOTEL_COST)?,
        food_cost_per_person_per_day: parse_amount(record, columns.food, row_num, FOOD_COST)?,
        activity_cost_per_person_per_day: parse_amount(
            record,
            columns.activities,
            row_num,
            ACTIVITIES_COST,
        )?,
        transport_cost_fixed: parse_amount(record, columns.transport, row_num, TRANSPORT_COST)?,
    })
}

fn parse_amount(
    record: &csv::StringRecord,
    position: usize,
    row_num: usize,
    column: &'static str,
) -> Result<Decimal, DatasetError> {
    let value = record.get(position).unwrap_or("");
    let invalid = || DatasetError::InvalidAmount {
        row: row_num,
        column,
        value: value.to_string(),
    };

    let amount: Decimal = value.parse().map_err(|_| invalid())?;
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(invalid());
    }
    Ok(amount)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::io::Write;

    const SAMPLE: &str = "\
Destination,State,HotelCost,FoodCost,ActivitiesCost,TransportCost
Goa,Goa,1000,300,200,1500
Jaipur,Rajasthan,1200.50,350,250,2000
";

    #[test]
    fn test_parses_rows_in_order() {
        let table = RateTable::from_reader(SAMPLE.as_bytes()).unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.destinations().collect::<Vec<_>>(), vec!["Goa", "Jaipur"]);

        let jaipur = table.get("Jaipur").unwrap();
        assert_eq!(jaipur.hotel_cost_per_room_per_night, dec!(1200.50));
        assert_eq!(jaipur.food_cost_per_person_per_day, dec!(350));
        assert_eq!(jaipur.activity_cost_per_person_per_day, dec!(250));
        assert_eq!(jaipur.transport_cost_fixed, dec!(2000));
    }

    #[test]
    fn test_unknown_destination_is_none() {
        let table = RateTable::from_reader(SAMPLE.as_bytes()).unwrap();
        assert!(table.get("Atlantis").is_none());
        assert!(table.get("goa").is_none());
    }

    #[test]
    fn test_duplicate_keeps_first_row() {
        let csv = "\
Destination,HotelCost,FoodCost,ActivitiesCost,TransportCost
Goa,1000,300,200,1500
Goa,9999,9999,9999,9999
";
        let table = RateTable::from_reader(csv.as_bytes()).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.get("Goa").unwrap().hotel_cost_per_room_per_night, dec!(1000));
    }

    #[test]
    fn test_missing_column() {
        let csv = "Destination,HotelCost,FoodCost,TransportCost\nGoa,1,2,3\n";
        let err = RateTable::from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, DatasetError::MissingColumn("ActivitiesCost")));
    }

    #[test]
    fn test_invalid_and_negative_amounts() {
        let csv = "Destination,HotelCost,FoodCost,ActivitiesCost,TransportCost\nGoa,abc,2,3,4\n";
        let err = RateTable::from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            DatasetError::InvalidAmount {
                row: 2,
                column: "HotelCost",
                ..
            }
        ));

        let csv = "Destination,HotelCost,FoodCost,ActivitiesCost,TransportCost\nGoa,1,2,-3,4\n";
        let err = RateTable::from_reader(csv.as_bytes()).unwrap_err();
        assert!(matches!(
            err,
            DatasetError::InvalidAmount {
                column: "ActivitiesCost",
                ..
            }
        ));
    }

    #[test]
    fn test_empty_destination_and_empty_dataset() {
        let csv = "Destination,HotelCost,FoodCost,ActivitiesCost,TransportCost\n,1,2,3,4\n";
        assert!(matches!(
            RateTable::from_reader(csv.as_bytes()).unwrap_err(),
            DatasetError::EmptyDestination { row: 2 }
        ));

        let csv = "Destination,HotelCost,FoodCost,ActivitiesCost,TransportCost\n";
        assert!(matches!(
            RateTable::from_reader(csv.as_bytes()).unwrap_err(),
            DatasetError::Empty
        ));
    }

    #[test]
    fn test_from_path_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let table = RateTable::from_path(file.path()).unwrap();
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_from_path_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("india_tour_data.csv");

        let err = RateTable::from_path(&path).unwrap_err();
        assert!(matches!(err, DatasetError::NotFound(_)));
        assert!(err.to_string().starts_with("dataset not found"));
    }
}
