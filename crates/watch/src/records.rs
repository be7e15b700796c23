//! Upstream record types for the TGVmax availability dataset.

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Top-level shape of an Opendatasoft v2 records response.
///
/// Only this envelope is parsed strictly; the per-train fields are decoded
/// record by record so one malformed entry cannot abort the batch.
#[derive(Debug, Deserialize)]
pub struct RecordsPage {
    pub records: Vec<RecordEnvelope>,
}

#[derive(Debug, Deserialize)]
pub struct RecordEnvelope {
    pub record: RecordInner,
}

#[derive(Debug, Deserialize)]
pub struct RecordInner {
    pub fields: serde_json::Value,
}

/// One train in a day's result set for an origin/destination query.
///
/// `train_no` is stable across polls for the same physical train and is the
/// only key used for alert deduplication.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainRecord {
    /// Travel date (`YYYY-MM-DD`).
    pub date: String,
    /// Train number.
    pub train_no: String,
    /// Canonical origin station name.
    #[serde(rename = "origine")]
    pub origin: String,
    /// Canonical destination station name.
    pub destination: String,
    /// Origin IATA code (display only).
    #[serde(rename = "origine_iata")]
    pub origin_code: Option<String>,
    /// Destination IATA code (display only).
    #[serde(rename = "destination_iata")]
    pub destination_code: Option<String>,
    /// Departure time (`HH:MM`).
    #[serde(rename = "heure_depart")]
    pub departure: String,
    /// Arrival time (`HH:MM`).
    #[serde(rename = "heure_arrivee")]
    pub arrival: String,
    /// Upstream "happy card" flag, `OUI` when bookable under the discount.
    #[serde(rename = "od_happy_card")]
    pub happy_card: String,
}

impl TrainRecord {
    /// Whether this train is bookable under the TGVmax discount.
    #[must_use]
    pub fn discount_eligible(&self) -> bool {
        self.happy_card == "OUI"
    }

    /// Integer departure hour, or `None` when the field is malformed.
    #[must_use]
    pub fn departure_hour(&self) -> Option<u32> {
        self.departure.split(':').next()?.parse().ok()
    }
}

impl From<&TrainRecord> for notify::TrainAlert {
    fn from(record: &TrainRecord) -> Self {
        Self {
            date: record.date.clone(),
            train_no: record.train_no.clone(),
            origin: record.origin.clone(),
            destination: record.destination.clone(),
            origin_code: record.origin_code.clone(),
            destination_code: record.destination_code.clone(),
            departure: record.departure.clone(),
            arrival: record.arrival.clone(),
        }
    }
}

/// Decode the per-record layer of a records page, skipping entries whose
/// fields do not match the expected schema.
#[must_use]
pub fn decode_records(page: RecordsPage) -> Vec<TrainRecord> {
    page.records
        .into_iter()
        .filter_map(|envelope| {
            match serde_json::from_value::<TrainRecord>(envelope.record.fields) {
                Ok(record) => Some(record),
                Err(err) => {
                    warn!(error = %err, "skipping record with unexpected fields");
                    None
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn page(fields: Vec<serde_json::Value>) -> RecordsPage {
        let records = fields
            .into_iter()
            .map(|f| json!({ "record": { "fields": f } }))
            .collect::<Vec<_>>();
        serde_json::from_value(json!({ "records": records })).unwrap()
    }

    fn fields(train_no: &str, happy_card: &str) -> serde_json::Value {
        json!({
            "date": "2026-09-18",
            "train_no": train_no,
            "origine": "PARIS (intramuros)",
            "destination": "LYON (intramuros)",
            "origine_iata": "FRPLY",
            "destination_iata": "FRLPD",
            "heure_depart": "11:58",
            "heure_arrivee": "13:56",
            "od_happy_card": happy_card,
        })
    }

    #[test]
    fn decodes_well_formed_records() {
        let records = decode_records(page(vec![fields("6613", "OUI"), fields("6617", "NON")]));
        assert_eq!(records.len(), 2);
        assert!(records[0].discount_eligible());
        assert!(!records[1].discount_eligible());
        assert_eq!(records[0].origin, "PARIS (intramuros)");
    }

    #[test]
    fn malformed_record_is_skipped_not_fatal() {
        let records = decode_records(page(vec![
            fields("6613", "OUI"),
            json!({ "date": "2026-09-18" }),
        ]));
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].train_no, "6613");
    }

    #[test]
    fn missing_iata_codes_are_allowed() {
        let mut f = fields("6613", "OUI");
        f.as_object_mut().unwrap().remove("origine_iata");
        f.as_object_mut().unwrap().remove("destination_iata");
        let records = decode_records(page(vec![f]));
        assert_eq!(records.len(), 1);
        assert!(records[0].origin_code.is_none());
    }

    #[test]
    fn departure_hour_parses_the_hour_field() {
        let records = decode_records(page(vec![fields("6613", "OUI")]));
        assert_eq!(records[0].departure_hour(), Some(11));
    }

    #[test]
    fn malformed_departure_time_yields_none() {
        let mut f = fields("6613", "OUI");
        f["heure_depart"] = json!("soon");
        let records = decode_records(page(vec![f]));
        assert_eq!(records[0].departure_hour(), None);
    }
}
