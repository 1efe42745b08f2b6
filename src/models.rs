use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

/// Radio value for an accepting guest, as it appears in the form markup.
pub const ATTENDING_VALUE: &str = "Yes, I'll be there!";
/// Radio value for a declining guest.
pub const NOT_ATTENDING_VALUE: &str = "Sorry, can't make it";

/// Markers substituted for optional fields left blank, so the spreadsheet
/// never receives empty cells.
pub const PHONE_DEFAULT: &str = "Not provided";
pub const DIETARY_DEFAULT: &str = "None";
pub const EVENTS_DEFAULT: &str = "None selected";
pub const MESSAGE_DEFAULT: &str = "No message";

/// One invitee as held by the remote spreadsheet. Read-only on this side;
/// lives for one page view.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Guest {
    pub name: String,
    pub email: String,
    #[serde(rename = "partySize")]
    pub party_size: u32,
}

/// Body of the lookup response: `{ found: bool, guest?: {...} }`.
#[derive(Debug, Deserialize)]
pub struct LookupResponse {
    pub found: bool,
    #[serde(default)]
    pub guest: Option<Guest>,
}

/// Parses a lookup body. `found: true` without a guest object counts as
/// not found.
pub fn parse_lookup(body: &str) -> Result<Option<Guest>, serde_json::Error> {
    let response: LookupResponse = serde_json::from_str(body)?;
    Ok(if response.found { response.guest } else { None })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attendance {
    Attending,
    NotAttending,
}

impl Attendance {
    /// Maps a radio value to a decision. Anything other than the explicit
    /// decline value counts as attending, matching the form's default.
    pub fn from_form_value(value: &str) -> Self {
        if value == NOT_ATTENDING_VALUE {
            Self::NotAttending
        } else {
            Self::Attending
        }
    }

    pub fn wire_value(self) -> &'static str {
        match self {
            Self::Attending => ATTENDING_VALUE,
            Self::NotAttending => NOT_ATTENDING_VALUE,
        }
    }

    pub fn is_attending(self) -> bool {
        matches!(self, Self::Attending)
    }
}

impl Serialize for Attendance {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.wire_value())
    }
}

/// Raw field values as read from the form, before defaults are applied.
/// Kept free of DOM types so assembly is testable off the page.
#[derive(Debug, Default, Clone)]
pub struct FormValues {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub attending: String,
    pub guests: String,
    pub dietary: String,
    pub events: Vec<String>,
    pub message: String,
}

/// The RSVP payload. Built once per submit, sent once, never retained.
#[derive(Debug, Clone, Serialize)]
pub struct Submission {
    pub action: &'static str,
    pub timestamp: String,
    pub email: String,
    pub name: String,
    pub phone: String,
    pub attending: Attendance,
    #[serde(rename = "attendingCount")]
    pub attending_count: Option<u32>,
    pub dietary: String,
    pub events: String,
    pub message: String,
}

impl Submission {
    /// Assembles the payload, substituting the fixed markers for blank
    /// optional fields. The head count only carries over for an accepting
    /// guest; it is meaningless otherwise.
    pub fn from_form(values: FormValues, timestamp: String) -> Self {
        let attending = Attendance::from_form_value(&values.attending);
        let attending_count = attending
            .is_attending()
            .then(|| values.guests.trim().parse().ok())
            .flatten();

        Self {
            action: "updateRSVP",
            timestamp,
            email: values.email,
            name: values.name,
            phone: non_blank_or(values.phone, PHONE_DEFAULT),
            attending,
            attending_count,
            dietary: non_blank_or(values.dietary, DIETARY_DEFAULT),
            events: if values.events.is_empty() {
                EVENTS_DEFAULT.to_owned()
            } else {
                values.events.join(", ")
            },
            message: non_blank_or(values.message, MESSAGE_DEFAULT),
        }
    }
}

fn non_blank_or(value: String, default: &str) -> String {
    if value.trim().is_empty() {
        default.to_owned()
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attending_values() -> FormValues {
        FormValues {
            name: "Ada".into(),
            email: "a@x.com".into(),
            attending: ATTENDING_VALUE.into(),
            guests: "3".into(),
            events: vec!["Ceremony".into(), "Reception".into()],
            ..FormValues::default()
        }
    }

    #[test]
    fn attendance_round_trips_from_radio_values() {
        assert_eq!(
            Attendance::from_form_value(ATTENDING_VALUE),
            Attendance::Attending
        );
        assert_eq!(
            Attendance::from_form_value(NOT_ATTENDING_VALUE),
            Attendance::NotAttending
        );
        // Unknown values fall back to the form default.
        assert_eq!(Attendance::from_form_value(""), Attendance::Attending);
    }

    #[test]
    fn blank_optional_fields_get_markers() {
        let submission = Submission::from_form(attending_values(), "t".into());
        assert_eq!(submission.phone, PHONE_DEFAULT);
        assert_eq!(submission.dietary, DIETARY_DEFAULT);
        assert_eq!(submission.message, MESSAGE_DEFAULT);
        assert_eq!(submission.events, "Ceremony, Reception");

        let no_events = FormValues {
            events: Vec::new(),
            ..attending_values()
        };
        let submission = Submission::from_form(no_events, "t".into());
        assert_eq!(submission.events, EVENTS_DEFAULT);
    }

    #[test]
    fn head_count_only_carries_for_attending() {
        let submission = Submission::from_form(attending_values(), "t".into());
        assert_eq!(submission.attending_count, Some(3));

        let declined = FormValues {
            attending: NOT_ATTENDING_VALUE.into(),
            ..attending_values()
        };
        let submission = Submission::from_form(declined, "t".into());
        assert_eq!(submission.attending_count, None);
    }

    #[test]
    fn submission_serializes_with_wire_field_names() {
        let submission =
            Submission::from_form(attending_values(), "2026-08-29T12:00:00.000Z".into());
        let json = serde_json::to_value(&submission).unwrap();
        assert_eq!(json["action"], "updateRSVP");
        assert_eq!(json["attending"], ATTENDING_VALUE);
        assert_eq!(json["attendingCount"], 3);
        assert_eq!(json["timestamp"], "2026-08-29T12:00:00.000Z");
        assert!(json.get("attending_count").is_none());
    }

    #[test]
    fn lookup_parse_covers_found_and_not_found() {
        let guest = parse_lookup(
            r#"{"found":true,"guest":{"name":"Ada","email":"a@x.com","partySize":3}}"#,
        )
        .unwrap()
        .expect("guest");
        assert_eq!(guest.name, "Ada");
        assert_eq!(guest.party_size, 3);

        assert_eq!(parse_lookup(r#"{"found":false}"#).unwrap(), None);
        // found without a guest object is still a miss
        assert_eq!(parse_lookup(r#"{"found":true}"#).unwrap(), None);
        assert!(parse_lookup("not json").is_err());
    }
}
