//! The RSVP workflow: URL-keyed guest lookup and form pre-fill on page load,
//! JSON submission to the spreadsheet endpoint on submit, plus the
//! attendance-dependent field emphasis.

use chrono::{SecondsFormat, Utc};
use gloo_timers::callback::Timeout;
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{
    Document, FormData, HtmlButtonElement, HtmlElement, HtmlFormElement, HtmlInputElement,
    Request, RequestInit, RequestMode, Response, ScrollBehavior, ScrollIntoViewOptions,
    ScrollLogicalPosition,
};

use crate::config;
use crate::dom;
use crate::error::PageError;
use crate::models::{Attendance, FormValues, Guest, Submission};

const NO_IDENTIFIER_SUBTITLE: &str = "Please use the personalized link from your invitation \
     email. <br>Or contact us if you need assistance.";
const LOADING_SUBTITLE: &str = "Loading your invitation...";
const NOT_FOUND_SUBTITLE: &str = "We couldn't find your invitation. Please check your email \
     link or contact us for assistance.";
const NOT_FOUND_FEEDBACK: &str =
    "Unable to load your invitation. Please use the link from your email or contact us.";

const SUBMIT_OK_ATTENDING: &str = "Thank you for your RSVP! We can't wait to celebrate with you!";
const SUBMIT_OK_DECLINED: &str =
    "Thank you for your RSVP! We'll miss you but thanks for letting us know.";
const SUBMIT_ERROR: &str = "Oops! There was an error submitting your RSVP. Please try again \
     or contact us directly.";
const DEMO_MODE_NOTICE: &str = "The RSVP endpoint is not configured, so your response was \
     logged locally but NOT sent. Please contact the site owner.";

const SUBMIT_LABEL_BUSY: &str = "Submitting...";
const READONLY_FIELD_TINT: &str = "rgba(0,0,0,0.05)";
const FEEDBACK_HIDE_MS: u32 = 10_000;

/// Where the page-load half of the workflow ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupState {
    NoIdentifier,
    AwaitingLookup,
    Prefilled(Guest),
    LookupFailed,
}

/// Collapses the lookup result: transport and parse failures land in the
/// same state as an honest not-found.
pub fn lookup_outcome(result: Result<Option<Guest>, PageError>) -> LookupState {
    match result {
        Ok(Some(guest)) => LookupState::Prefilled(guest),
        Ok(None) => LookupState::LookupFailed,
        Err(err) => {
            log::error!("guest lookup failed: {err}");
            LookupState::LookupFailed
        }
    }
}

/// How a submission attempt ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Delivered,
    /// Endpoint unconfigured; payload went to the console, not the wire.
    DemoLogged,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Success,
    Error,
}

impl MessageKind {
    fn css_class(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

pub fn welcome_message(name: &str, party_size: u32) -> String {
    let plural = if party_size == 1 { "" } else { "s" };
    format!("Welcome {name}! Please complete your RSVP for {party_size} guest{plural}.")
}

pub fn confirmation_message(attendance: Attendance) -> &'static str {
    if attendance.is_attending() {
        SUBMIT_OK_ATTENDING
    } else {
        SUBMIT_OK_DECLINED
    }
}

pub fn outcome_message(outcome: SubmitOutcome, attendance: Attendance) -> &'static str {
    match outcome {
        SubmitOutcome::Delivered => confirmation_message(attendance),
        SubmitOutcome::DemoLogged => DEMO_MODE_NOTICE,
        SubmitOutcome::Failed => SUBMIT_ERROR,
    }
}

pub fn outcome_kind(outcome: SubmitOutcome) -> MessageKind {
    match outcome {
        SubmitOutcome::Delivered => MessageKind::Success,
        // An unsent response must not read as a delivered one.
        SubmitOutcome::DemoLogged | SubmitOutcome::Failed => MessageKind::Error,
    }
}

/// Opacity and required-ness for the attendance-dependent fields.
pub fn field_emphasis(attendance: Attendance) -> (&'static str, bool) {
    if attendance.is_attending() {
        ("1", true)
    } else {
        ("0.5", false)
    }
}

/// The `email` query parameter, if present and non-empty.
pub fn identifier_from_query(search: &str) -> Option<String> {
    form_urlencoded::parse(search.trim_start_matches('?').as_bytes())
        .find(|(key, _)| key == "email")
        .map(|(_, value)| value.into_owned())
        .filter(|value| !value.is_empty())
}

pub fn lookup_url(endpoint: &str, identifier: &str) -> String {
    format!(
        "{endpoint}?email={}",
        utf8_percent_encode(identifier, NON_ALPHANUMERIC)
    )
}

/// Wires the whole workflow: visibility toggling, the submit handler, and
/// the page-load lookup.
pub fn install(document: &Document) -> Result<(), JsValue> {
    install_visibility_toggle(document)?;
    install_submit_handler(document)?;

    let document = document.clone();
    spawn_local(async move {
        prefill(&document).await;
    });
    Ok(())
}

// --- page-load lookup -----------------------------------------------------

async fn prefill(document: &Document) {
    let identifier = dom::window()
        .ok()
        .and_then(|w| w.location().search().ok())
        .and_then(|search| identifier_from_query(&search));

    // No personalized link, or nothing to look it up against.
    let (Some(identifier), Some(endpoint)) = (identifier, config::endpoint()) else {
        set_subtitle(document, NO_IDENTIFIER_SUBTITLE);
        return;
    };

    set_subtitle(document, LOADING_SUBTITLE);
    let state = lookup_outcome(fetch_guest(endpoint, &identifier).await);
    match state {
        LookupState::Prefilled(guest) => {
            if let Err(err) = apply_prefill(document, &guest) {
                log::error!("pre-fill failed: {err}");
            }
        }
        _ => {
            set_subtitle(document, NOT_FOUND_SUBTITLE);
            show_feedback(document, MessageKind::Error, NOT_FOUND_FEEDBACK);
        }
    }
}

async fn fetch_guest(endpoint: &str, identifier: &str) -> Result<Option<Guest>, PageError> {
    let url = lookup_url(endpoint, identifier);
    let window = dom::window()?;
    let response = JsFuture::from(window.fetch_with_str(&url))
        .await
        .map_err(PageError::transport)?;
    let response: Response = response
        .dyn_into()
        .map_err(|_| PageError::Transport("fetch did not yield a Response".to_owned()))?;
    let text = JsFuture::from(response.text().map_err(PageError::transport)?)
        .await
        .map_err(PageError::transport)?;
    let body = text
        .as_string()
        .ok_or_else(|| PageError::Transport("non-text response body".to_owned()))?;
    Ok(crate::models::parse_lookup(&body)?)
}

fn apply_prefill(document: &Document, guest: &Guest) -> Result<(), PageError> {
    for (id, value) in [("name", &guest.name), ("email", &guest.email)] {
        let field = dom::input_by_id(document, id)?;
        field.set_value(value);
        field.set_read_only(true);
        let _ = field
            .style()
            .set_property("background-color", READONLY_FIELD_TINT);
    }

    let party_size = guest.party_size.to_string();
    let guests = dom::input_by_id(document, "guests")?;
    guests.set_value(&party_size);
    guests.set_max(&party_size);

    set_subtitle(document, &welcome_message(&guest.name, guest.party_size));
    Ok(())
}

fn set_subtitle(document: &Document, html: &str) {
    if let Some(subtitle) = dom::query(document, ".rsvp-subtitle") {
        subtitle.set_inner_html(html);
    }
}

// --- submission -----------------------------------------------------------

fn install_submit_handler(document: &Document) -> Result<(), JsValue> {
    let Some(form) = document
        .get_element_by_id("rsvpForm")
        .and_then(|el| el.dyn_into::<HtmlFormElement>().ok())
    else {
        log::warn!("no #rsvpForm on this page, submissions disabled");
        return Ok(());
    };

    let document = document.clone();
    dom::listen(form.clone().as_ref(), "submit", move |event| {
        event.prevent_default();
        let document = document.clone();
        let form = form.clone();
        spawn_local(async move {
            if let Err(err) = submit(&document, &form).await {
                log::error!("submit handler failed: {err}");
            }
        });
    })
}

async fn submit(document: &Document, form: &HtmlFormElement) -> Result<(), PageError> {
    let values = collect_form_values(form)?;
    let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
    let submission = Submission::from_form(values, timestamp);
    let attendance = submission.attending;

    let button = form
        .query_selector(".submit-button")
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<HtmlButtonElement>().ok());
    let original_label = button.as_ref().and_then(|b| b.text_content());
    if let Some(button) = &button {
        button.set_disabled(true);
        button.set_text_content(Some(SUBMIT_LABEL_BUSY));
    }

    let outcome = dispatch(&submission).await;
    show_feedback(document, outcome_kind(outcome), outcome_message(outcome, attendance));

    // The button always comes back, whatever happened on the wire.
    if let Some(button) = &button {
        button.set_disabled(false);
        button.set_text_content(original_label.as_deref());
    }
    Ok(())
}

async fn dispatch(submission: &Submission) -> SubmitOutcome {
    let Some(endpoint) = config::endpoint() else {
        let payload = serde_json::to_string(submission)
            .unwrap_or_else(|_| format!("{submission:?}"));
        log::info!("demo mode, submission not sent: {payload}");
        return SubmitOutcome::DemoLogged;
    };

    match send_submission(endpoint, submission).await {
        Ok(()) => SubmitOutcome::Delivered,
        Err(err) => {
            log::error!("submission failed: {err}");
            SubmitOutcome::Failed
        }
    }
}

async fn send_submission(endpoint: &str, submission: &Submission) -> Result<(), PageError> {
    let body = serde_json::to_string(submission)?;

    let init = RequestInit::new();
    init.set_method("POST");
    // no-cors: the Apps Script endpoint answers opaquely. Completion, not
    // content, is the success signal.
    init.set_mode(RequestMode::NoCors);
    init.set_body(&JsValue::from_str(&body));

    let request =
        Request::new_with_str_and_init(endpoint, &init).map_err(PageError::transport)?;
    request
        .headers()
        .set("Content-Type", "application/json")
        .map_err(PageError::transport)?;

    let window = dom::window()?;
    JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(PageError::transport)?;
    Ok(())
}

fn collect_form_values(form: &HtmlFormElement) -> Result<FormValues, PageError> {
    let data = FormData::new_with_form(form).map_err(PageError::dom)?;
    let text = |key: &str| data.get(key).as_string().unwrap_or_default();

    Ok(FormValues {
        name: text("name"),
        email: text("email"),
        phone: text("phone"),
        attending: text("attending"),
        guests: text("guests"),
        dietary: text("dietary"),
        events: data
            .get_all("events")
            .iter()
            .filter_map(|v| v.as_string())
            .collect(),
        message: text("message"),
    })
}

// --- attendance-dependent emphasis ----------------------------------------

fn install_visibility_toggle(document: &Document) -> Result<(), JsValue> {
    let radios = document.query_selector_all(r#"input[name="attending"]"#)?;
    for index in 0..radios.length() {
        let Some(radio) = radios.item(index) else {
            continue;
        };
        let document = document.clone();
        dom::listen(radio.as_ref(), "change", move |event| {
            let Some(input) = event
                .target()
                .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
            else {
                return;
            };
            apply_field_emphasis(&document, Attendance::from_form_value(&input.value()));
        })?;
    }
    Ok(())
}

fn apply_field_emphasis(document: &Document, attendance: Attendance) {
    let (opacity, required) = field_emphasis(attendance);

    let containers = [
        document
            .get_element_by_id("guests")
            .and_then(|el| el.parent_element()),
        dom::query(document, ".checkbox-group").and_then(|el| el.parent_element()),
        document
            .get_element_by_id("dietary")
            .and_then(|el| el.parent_element()),
    ];
    for container in containers.into_iter().flatten() {
        dom::set_opacity(&container, opacity);
    }

    if let Ok(guests) = dom::input_by_id(document, "guests") {
        guests.set_required(required);
    }
}

// --- feedback area --------------------------------------------------------

fn show_feedback(document: &Document, kind: MessageKind, text: &str) {
    let Some(area) = document
        .get_element_by_id("formMessage")
        .and_then(|el| el.dyn_into::<HtmlElement>().ok())
    else {
        return;
    };

    area.set_text_content(Some(text));
    area.set_class_name(&format!("form-message {}", kind.css_class()));
    let _ = area.style().set_property("display", "block");

    let options = ScrollIntoViewOptions::new();
    options.set_behavior(ScrollBehavior::Smooth);
    options.set_block(ScrollLogicalPosition::Nearest);
    area.scroll_into_view_with_scroll_into_view_options(&options);

    Timeout::new(FEEDBACK_HIDE_MS, move || {
        let _ = area.style().set_property("display", "none");
    })
    .forget();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ATTENDING_VALUE, NOT_ATTENDING_VALUE};

    #[test]
    fn welcome_message_pluralizes() {
        assert_eq!(
            welcome_message("Ada", 1),
            "Welcome Ada! Please complete your RSVP for 1 guest."
        );
        assert_eq!(
            welcome_message("Ada", 3),
            "Welcome Ada! Please complete your RSVP for 3 guests."
        );
    }

    #[test]
    fn identifier_comes_from_email_parameter() {
        assert_eq!(
            identifier_from_query("?email=a%40x.com"),
            Some("a@x.com".to_owned())
        );
        assert_eq!(
            identifier_from_query("?utm=1&email=b%40y.org"),
            Some("b@y.org".to_owned())
        );
        assert_eq!(identifier_from_query("?email="), None);
        assert_eq!(identifier_from_query(""), None);
        assert_eq!(identifier_from_query("?other=x"), None);
    }

    #[test]
    fn lookup_url_percent_encodes_the_identifier() {
        assert_eq!(
            lookup_url("https://sheet.example/exec", "a@x.com"),
            "https://sheet.example/exec?email=a%40x%2Ecom"
        );
    }

    #[test]
    fn lookup_failures_collapse_into_one_state() {
        let guest = Guest {
            name: "Ada".into(),
            email: "a@x.com".into(),
            party_size: 3,
        };
        assert_eq!(
            lookup_outcome(Ok(Some(guest.clone()))),
            LookupState::Prefilled(guest)
        );
        assert_eq!(lookup_outcome(Ok(None)), LookupState::LookupFailed);
        assert_eq!(
            lookup_outcome(Err(PageError::Transport("offline".into()))),
            LookupState::LookupFailed
        );
    }

    #[test]
    fn confirmation_depends_on_attendance() {
        let attending = Attendance::from_form_value(ATTENDING_VALUE);
        let declined = Attendance::from_form_value(NOT_ATTENDING_VALUE);
        assert!(confirmation_message(attending).contains("celebrate"));
        assert!(confirmation_message(declined).contains("miss you"));
    }

    #[test]
    fn demo_mode_never_reads_as_delivered() {
        assert_eq!(outcome_kind(SubmitOutcome::Delivered), MessageKind::Success);
        assert_eq!(outcome_kind(SubmitOutcome::DemoLogged), MessageKind::Error);
        assert_eq!(outcome_kind(SubmitOutcome::Failed), MessageKind::Error);
        assert_eq!(
            outcome_message(SubmitOutcome::DemoLogged, Attendance::Attending),
            DEMO_MODE_NOTICE
        );
        assert_eq!(
            outcome_message(SubmitOutcome::Failed, Attendance::Attending),
            SUBMIT_ERROR
        );
    }

    #[test]
    fn declining_relaxes_the_party_size_field() {
        assert_eq!(field_emphasis(Attendance::Attending), ("1", true));
        assert_eq!(field_emphasis(Attendance::NotAttending), ("0.5", false));
    }
}
