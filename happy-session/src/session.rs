use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::task::JoinHandle;

use happy_api::{ApiError, OrphanageApi};
use happy_core::{
    FormState, MultipartPayload, Navigator, Notifier, Position, PreviewRegistry,
    SubmissionController, SubmissionState, SubmissionTicket, SubmitOutcome,
};

use crate::error::SessionError;
use crate::geolocation::GeolocationProvider;

struct Shared {
    form: FormState,
    controller: SubmissionController,
}

fn lock(shared: &Mutex<Shared>) -> MutexGuard<'_, Shared> {
    shared.lock().unwrap_or_else(PoisonError::into_inner)
}

/// A live registration form bound to an API, a notification sink and a
/// navigator.
pub struct FormSession<A, N, V> {
    api: A,
    notifier: N,
    navigator: V,
    shared: Arc<Mutex<Shared>>,
    geolocation: Option<JoinHandle<()>>,
}

impl<A, N, V> FormSession<A, N, V>
where
    A: OrphanageApi,
    N: Notifier,
    V: Navigator,
{
    pub fn new(api: A, notifier: N, navigator: V, previews: PreviewRegistry) -> Self {
        Self {
            api,
            notifier,
            navigator,
            shared: Arc::new(Mutex::new(Shared {
                form: FormState::new(previews),
                controller: SubmissionController::new(),
            })),
            geolocation: None,
        }
    }

    /// Seed the map centre from `provider` in the background.
    ///
    /// Must be called inside a tokio runtime. A reading that arrives after the
    /// session is gone is discarded. Calling again replaces (aborts) the
    /// previous request.
    pub fn locate<G>(&mut self, provider: G)
    where
        G: GeolocationProvider + 'static,
    {
        let shared = Arc::downgrade(&self.shared);
        let handle = tokio::spawn(async move {
            let Some(position) = provider.current_position().await else {
                tracing::debug!("geolocation unavailable; map centre stays unset");
                return;
            };
            match shared.upgrade() {
                Some(shared) => {
                    lock(&shared).form.seed_initial_position(position);
                    tracing::debug!(%position, "map centre seeded from geolocation");
                }
                None => tracing::debug!("form session closed; geolocation reading discarded"),
            }
        });
        if let Some(previous) = self.geolocation.replace(handle) {
            previous.abort();
        }
    }

    /// Wait for the pending geolocation request, if any, and return the map
    /// centre. Never returns if the provider never resolves.
    pub async fn wait_for_location(&mut self) -> Result<Option<Position>, SessionError> {
        if let Some(handle) = self.geolocation.take() {
            match handle.await {
                Ok(()) => {}
                Err(err) if err.is_cancelled() => {}
                Err(err) => return Err(err.into()),
            }
        }
        Ok(self.read(FormState::initial_position))
    }

    /// Mutate the form. Setters only; submission state is not reachable here.
    pub fn edit<R>(&self, f: impl FnOnce(&mut FormState) -> R) -> R {
        f(&mut lock(&self.shared).form)
    }

    pub fn read<R>(&self, f: impl FnOnce(&FormState) -> R) -> R {
        f(&lock(&self.shared).form)
    }

    /// Select every regular file in `paths`; other paths are skipped.
    pub fn select_image_paths<P: AsRef<std::path::Path>>(
        &self,
        paths: &[P],
    ) -> Result<usize, SessionError> {
        Ok(self.edit(|form| form.images_mut().select_image_paths(paths))?)
    }

    pub fn submission_state(&self) -> SubmissionState {
        lock(&self.shared).controller.state().clone()
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn navigator(&self) -> &V {
        &self.navigator
    }

    /// Submit the current draft.
    ///
    /// Returns [`SubmitOutcome::Ignored`] without calling the API while another
    /// submission is in flight. Dropping the returned future before it
    /// completes cancels the call and returns the controller to idle.
    pub async fn submit(&self) -> SubmitOutcome {
        let (ticket, payload) = {
            let mut shared = lock(&self.shared);
            let Some(ticket) = shared.controller.begin() else {
                tracing::debug!("submission already in flight; ignoring trigger");
                return SubmitOutcome::Ignored;
            };
            (ticket, MultipartPayload::from_draft(&shared.form.draft()))
        };

        let in_flight = InFlight {
            shared: &self.shared,
            ticket: Some(ticket),
        };
        tracing::info!(
            name = payload.text("name").unwrap_or_default(),
            images = payload.file_count(),
            "submitting orphanage",
        );
        let result = self.api.create(payload).await;
        let Some(ticket) = in_flight.finish() else {
            return SubmitOutcome::Ignored;
        };

        let result = result.map_err(|err| {
            log_failure(&err);
            err.messages()
        });

        let mut shared = lock(&self.shared);
        let Shared { form, controller } = &mut *shared;
        let outcome = controller.complete(ticket, result, form, &self.notifier, &self.navigator);
        tracing::info!(?outcome, "submission finished");
        outcome
    }
}

impl<A, N, V> Drop for FormSession<A, N, V> {
    fn drop(&mut self) {
        if let Some(handle) = self.geolocation.take() {
            handle.abort();
        }
    }
}

fn log_failure(err: &ApiError) {
    match err {
        ApiError::Rejected {
            status,
            messages,
            body,
        } => tracing::warn!(status, ?messages, %body, "orphanage submission rejected"),
        ApiError::Transport(source) => {
            tracing::warn!(error = %source, "orphanage submission failed")
        }
    }
}

/// Abandons the ticket if the submit future is dropped mid-call.
struct InFlight<'a> {
    shared: &'a Mutex<Shared>,
    ticket: Option<SubmissionTicket>,
}

impl InFlight<'_> {
    fn finish(mut self) -> Option<SubmissionTicket> {
        self.ticket.take()
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if let Some(ticket) = self.ticket.take() {
            lock(self.shared).controller.abandon(ticket);
            tracing::debug!("submission cancelled");
        }
    }
}
