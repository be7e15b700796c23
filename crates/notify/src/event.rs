//! The alert event sent over notification channels.

use serde::{Deserialize, Serialize};

/// Base URL for the booking deep link.
const BOOKING_BASE_URL: &str = "https://www.oui.sncf/proposition/";

/// A matched train, carrying the display fields needed to render a message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainAlert {
    /// Travel date (`YYYY-MM-DD`).
    pub date: String,
    /// Train number.
    pub train_no: String,
    /// Canonical origin station name.
    pub origin: String,
    /// Canonical destination station name.
    pub destination: String,
    /// Origin IATA code, used for the booking link.
    pub origin_code: Option<String>,
    /// Destination IATA code, used for the booking link.
    pub destination_code: Option<String>,
    /// Departure time (`HH:MM`).
    pub departure: String,
    /// Arrival time (`HH:MM`).
    pub arrival: String,
}

impl TrainAlert {
    /// One-line subject for channels that have one (email).
    #[must_use]
    pub fn subject(&self) -> String {
        format!(
            "TGVmax seat open: {} -> {} on {}",
            self.origin, self.destination, self.date
        )
    }

    /// Human-readable message body shared by all channels.
    #[must_use]
    pub fn message(&self) -> String {
        let mut message = format!(
            "TGVmax seat available on {}!\n\
             From: {}\n\
             To: {}\n\
             Departs: {}\n\
             Arrives: {}\n",
            self.date, self.origin, self.destination, self.departure, self.arrival
        );
        if let Some(url) = self.booking_url() {
            message.push_str("Book: ");
            message.push_str(&url);
            message.push('\n');
        }
        message
    }

    /// Deep link to the ticket on oui.sncf, when both IATA codes are present.
    ///
    /// The departure stamp is `YYYYMMDD-HHMM`.
    #[must_use]
    pub fn booking_url(&self) -> Option<String> {
        let orig = self.origin_code.as_deref()?;
        let dest = self.destination_code.as_deref()?;
        let departure = format!(
            "{}-{:0>4}",
            self.date.replace('-', ""),
            self.departure.replace(':', "")
        );
        Some(format!(
            "{BOOKING_BASE_URL}?nbpax=1&share=1&highlight=Y&dest={dest}&orig={orig}&departure={departure}&trainNumber_0={}",
            self.train_no
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alert() -> TrainAlert {
        TrainAlert {
            date: "2026-09-18".to_string(),
            train_no: "6613".to_string(),
            origin: "PARIS (intramuros)".to_string(),
            destination: "LYON (intramuros)".to_string(),
            origin_code: Some("FRPLY".to_string()),
            destination_code: Some("FRLPD".to_string()),
            departure: "11:58".to_string(),
            arrival: "13:56".to_string(),
        }
    }

    #[test]
    fn booking_url_builds_departure_stamp() {
        let url = alert().booking_url().unwrap();
        assert!(url.contains("departure=20260918-1158"));
        assert!(url.contains("orig=FRPLY"));
        assert!(url.contains("dest=FRLPD"));
        assert!(url.contains("trainNumber_0=6613"));
    }

    #[test]
    fn booking_url_pads_short_departure_times() {
        let mut alert = alert();
        alert.departure = "9:05".to_string();
        let url = alert.booking_url().unwrap();
        assert!(url.contains("departure=20260918-0905"));
    }

    #[test]
    fn booking_url_requires_both_codes() {
        let mut alert = alert();
        alert.destination_code = None;
        assert!(alert.booking_url().is_none());
    }

    #[test]
    fn message_lists_itinerary_and_link() {
        let message = alert().message();
        assert!(message.contains("PARIS (intramuros)"));
        assert!(message.contains("Departs: 11:58"));
        assert!(message.contains("Book: https://www.oui.sncf/proposition/"));
    }

    #[test]
    fn message_without_codes_omits_link() {
        let mut alert = alert();
        alert.origin_code = None;
        assert!(!alert.message().contains("Book:"));
    }
}
