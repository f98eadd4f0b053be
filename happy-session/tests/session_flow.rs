//! End-to-end form session behaviour against an in-memory API.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::{oneshot, Notify};
use tokio_test::{assert_pending, assert_ready_eq};

use happy_api::{ApiError, OrphanageApi};
use happy_core::{
    submission::{ERROR_MESSAGE, LISTING_ROUTE, SUCCESS_MESSAGE},
    Appearance, Field, ImageFile, MultipartPayload, Navigator, Notifier, Orphanage, Position,
    PreviewRegistry, SubmissionState, SubmitOutcome,
};
use happy_session::{FixedLocation, FormSession, GeolocationProvider, Unavailable};

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

#[derive(Clone, Default)]
struct MockApi {
    calls: Arc<Mutex<Vec<MultipartPayload>>>,
    reject_with: Arc<Mutex<Option<&'static str>>>,
    gate: Option<Arc<Notify>>,
}

impl MockApi {
    fn rejecting(body: &'static str) -> Self {
        let api = Self::default();
        *api.reject_with.lock().unwrap() = Some(body);
        api
    }

    fn gated(gate: Arc<Notify>) -> Self {
        Self {
            gate: Some(gate),
            ..Self::default()
        }
    }

    fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl OrphanageApi for MockApi {
    async fn create(&self, payload: MultipartPayload) -> Result<(), ApiError> {
        self.calls.lock().unwrap().push(payload);
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        let rejection = *self.reject_with.lock().unwrap();
        match rejection {
            Some(body) => Err(ApiError::rejected(400, body)),
            None => Ok(()),
        }
    }

    async fn list(&self) -> Result<Vec<Orphanage>, ApiError> {
        Ok(Vec::new())
    }

    async fn get(&self, _id: u64) -> Result<Orphanage, ApiError> {
        Err(ApiError::rejected(404, "{}"))
    }
}

#[derive(Default)]
struct Notes(Mutex<Vec<(String, Appearance)>>);

impl Notifier for Notes {
    fn notify(&self, message: &str, appearance: Appearance) {
        self.0.lock().unwrap().push((message.to_owned(), appearance));
    }
}

#[derive(Default)]
struct Routes(Mutex<Vec<String>>);

impl Navigator for Routes {
    fn push(&self, route: &str) {
        self.0.lock().unwrap().push(route.to_owned());
    }
}

type Session = FormSession<MockApi, Notes, Routes>;

fn session(api: MockApi) -> Session {
    FormSession::new(api, Notes::default(), Routes::default(), PreviewRegistry::new())
}

fn fill(session: &Session) {
    session.edit(|form| {
        form.set_name("Lar das meninas");
        form.set_about("Presta assistência a crianças de 06 a 15 anos");
        form.set_instructions("Venha como se sentir à vontade");
        form.set_opening_hours("Das 8h às 18h");
        form.set_position(-25.43, -49.27);
        form.select_images([ImageFile::from_bytes("a.jpg", vec![0xFF, 0xD8])]);
    });
}

fn notes(session: &Session) -> Vec<(String, Appearance)> {
    session.notifier().0.lock().unwrap().clone()
}

fn routes(session: &Session) -> Vec<String> {
    session.navigator().0.lock().unwrap().clone()
}

/// Resolves only when the paired sender fires.
struct Channel(Mutex<Option<oneshot::Receiver<Position>>>);

impl GeolocationProvider for Channel {
    async fn current_position(&self) -> Option<Position> {
        let rx = self.0.lock().unwrap().take()?;
        rx.await.ok()
    }
}

// ---------------------------------------------------------------------------
// 1. Submission outcomes
// ---------------------------------------------------------------------------

#[tokio::test]
async fn accepted_submission_notifies_and_navigates_once() {
    let api = MockApi::default();
    let session = session(api.clone());
    fill(&session);

    let outcome = session.submit().await;

    assert_eq!(outcome, SubmitOutcome::Succeeded);
    assert_eq!(session.submission_state(), SubmissionState::Succeeded);
    assert_eq!(
        notes(&session),
        vec![(SUCCESS_MESSAGE.to_owned(), Appearance::Success)]
    );
    assert_eq!(routes(&session), vec![LISTING_ROUTE.to_owned()]);
    assert!(!session.read(|form| form.has_error()));

    let calls = api.calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].file_count(), 1);
    assert_eq!(calls[0].text("name"), Some("Lar das meninas"));
}

#[tokio::test]
async fn rejected_submission_flags_error_without_navigation() {
    let session = session(MockApi::rejecting(r#"{"name": "is required"}"#));
    fill(&session);
    session.edit(|form| form.set_name(""));

    let outcome = session.submit().await;

    assert_eq!(
        outcome,
        SubmitOutcome::Rejected {
            messages: vec!["is required".to_owned()]
        }
    );
    assert!(session.read(|form| form.has_error()));
    assert_eq!(
        session.read(|form| form.highlighted_fields()),
        vec![Field::Name]
    );
    assert_eq!(
        notes(&session),
        vec![(ERROR_MESSAGE.to_owned(), Appearance::Error)]
    );
    assert!(routes(&session).is_empty());
}

#[tokio::test]
async fn resubmission_after_rejection_clears_error_on_success() {
    let api = MockApi::rejecting(r#"{"images": "at least one"}"#);
    let session = session(api.clone());
    fill(&session);

    assert!(matches!(session.submit().await, SubmitOutcome::Rejected { .. }));
    assert!(session.read(|form| form.has_error()));

    *api.reject_with.lock().unwrap() = None;
    assert_eq!(session.submit().await, SubmitOutcome::Succeeded);
    assert!(!session.read(|form| form.has_error()));
    assert_eq!(api.call_count(), 2);
    assert_eq!(routes(&session).len(), 1);
}

// ---------------------------------------------------------------------------
// 2. Submission lock and cancellation
// ---------------------------------------------------------------------------

#[tokio::test]
async fn second_submit_while_in_flight_is_ignored() {
    let gate = Arc::new(Notify::new());
    let api = MockApi::gated(gate.clone());
    let session = session(api.clone());
    fill(&session);

    let mut first = tokio_test::task::spawn(session.submit());
    assert_pending!(first.poll());
    assert_eq!(session.submission_state(), SubmissionState::Submitting);

    assert_eq!(session.submit().await, SubmitOutcome::Ignored);

    gate.notify_one();
    assert_ready_eq!(first.poll(), SubmitOutcome::Succeeded);
    assert_eq!(api.call_count(), 1);
    assert_eq!(routes(&session).len(), 1);
}

#[tokio::test]
async fn dropped_submission_returns_to_idle_silently() {
    let gate = Arc::new(Notify::new());
    let session = session(MockApi::gated(gate.clone()));
    fill(&session);

    let mut pending = tokio_test::task::spawn(session.submit());
    assert_pending!(pending.poll());
    drop(pending);

    assert_eq!(session.submission_state(), SubmissionState::Idle);
    assert!(notes(&session).is_empty());
    assert!(routes(&session).is_empty());
}

// ---------------------------------------------------------------------------
// 3. Geolocation
// ---------------------------------------------------------------------------

#[tokio::test]
async fn geolocation_seeds_centre_not_marker() {
    let mut session = session(MockApi::default());
    session.locate(FixedLocation(Position::new(-25.43, -49.27)));

    let centre = session.wait_for_location().await.expect("located");

    assert_eq!(centre, Some(Position::new(-25.43, -49.27)));
    assert_eq!(session.read(|form| form.position()), None);
}

#[tokio::test]
async fn unavailable_geolocation_leaves_centre_unset() {
    let mut session = session(MockApi::default());
    session.locate(Unavailable);

    assert_eq!(session.wait_for_location().await.expect("settled"), None);
}

#[tokio::test]
async fn unresolved_geolocation_is_aborted_with_session() {
    let (tx, rx) = oneshot::channel::<Position>();
    let mut session = session(MockApi::default());
    session.locate(Channel(Mutex::new(Some(rx))));

    tokio::task::yield_now().await;
    assert_eq!(session.read(|form| form.initial_position()), None);

    drop(session);
    let mut tx = tx;
    tokio::time::timeout(Duration::from_secs(5), tx.closed())
        .await
        .expect("geolocation task dropped with the session");
}

// ---------------------------------------------------------------------------
// 4. Preview lifetime
// ---------------------------------------------------------------------------

#[tokio::test]
async fn dropping_session_releases_previews() {
    let registry = PreviewRegistry::new();
    let session = FormSession::new(
        MockApi::default(),
        Notes::default(),
        Routes::default(),
        registry.clone(),
    );
    session.edit(|form| {
        form.select_images([
            ImageFile::from_bytes("a.jpg", vec![1]),
            ImageFile::from_bytes("b.jpg", vec![2]),
        ])
    });
    assert_eq!(registry.live_count(), 2);

    drop(session);
    assert_eq!(registry.live_count(), 0);
}
