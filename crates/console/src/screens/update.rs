//! Edit-form screen.

use stampdesk_core::{FieldError, FormDraft, Prefill};
use tracing::debug;

use super::{FormPhase, screen_error};
use crate::api::{ApiClient, Operation};
use crate::navigation::{Navigator, Route};

type Wrap<S, I> = Box<dyn Fn(S) -> I + Send + Sync>;

/// Fetch a record with `Q`, edit it as a `D`, save it with `M`.
///
/// The draft is filled from the fetched record exactly once; reloading
/// afterwards does not overwrite edits.
pub struct UpdateScreen<D, Q, M>
where
    D: FormDraft,
    Q: Operation,
    M: Operation,
{
    pub draft: D,
    source: Q::Input,
    phase: FormPhase,
    prefilled: bool,
    field_errors: Vec<FieldError>,
    wrap: Wrap<D::Submission, M::Input>,
    success: Route,
    invalidates: Vec<&'static str>,
}

impl<D, Q, M> UpdateScreen<D, Q, M>
where
    D: FormDraft + Prefill<Q::Output> + Default,
    Q: Operation,
    Q::Input: Clone,
    M: Operation,
{
    /// `wrap` turns a validated submission into the update operation's input,
    /// e.g. attaching the record id.
    pub fn new(
        source: Q::Input,
        success: Route,
        wrap: impl Fn(D::Submission) -> M::Input + Send + Sync + 'static,
    ) -> Self {
        Self {
            draft: D::default(),
            source,
            phase: FormPhase::Loading,
            prefilled: false,
            field_errors: Vec::new(),
            wrap: Box::new(wrap),
            success,
            invalidates: vec![Q::ENDPOINT.name],
        }
    }

    /// Drop cached results of `L` after a successful save.
    #[must_use]
    pub fn invalidating<L: Operation>(mut self) -> Self {
        self.invalidates.push(L::ENDPOINT.name);
        self
    }

    #[must_use]
    pub const fn phase(&self) -> &FormPhase {
        &self.phase
    }

    #[must_use]
    pub const fn is_prefilled(&self) -> bool {
        self.prefilled
    }

    #[must_use]
    pub fn field_errors(&self) -> &[FieldError] {
        &self.field_errors
    }

    /// Fetch the record and pre-fill the draft on first success.
    pub async fn load(&mut self, client: &ApiClient, nav: &mut Navigator) {
        self.phase = FormPhase::Loading;
        match client.refetch::<Q>(self.source.clone()).await {
            Ok(record) => {
                if !self.prefilled {
                    self.draft = D::prefill(&record);
                    self.prefilled = true;
                }
                self.phase = FormPhase::Editing;
            }
            Err(e) => self.phase = FormPhase::LoadFailed(screen_error(&e, nav)),
        }
    }

    /// Validate and save. Returns the updated record on success.
    ///
    /// Does nothing until [`load`](Self::load) has pre-filled the draft.
    pub async fn submit(&mut self, client: &ApiClient, nav: &mut Navigator) -> Option<M::Output> {
        if !self.prefilled {
            debug!(operation = M::ENDPOINT.name, "Submit before pre-fill ignored");
            return None;
        }
        let submission = match self.draft.submit() {
            Ok(submission) => submission,
            Err(errors) => {
                debug!(operation = M::ENDPOINT.name, errors = errors.errors().len(), "Draft rejected");
                self.phase = FormPhase::Failed(errors.to_string());
                self.field_errors = errors.errors().to_vec();
                return None;
            }
        };

        self.field_errors.clear();
        self.phase = FormPhase::Submitting;
        match client.mutate::<M>((self.wrap)(submission)).await {
            Ok(updated) => {
                for name in &self.invalidates {
                    client.invalidate_operation(*name).await;
                }
                self.phase = FormPhase::Succeeded;
                nav.navigate(self.success.clone());
                Some(updated)
            }
            Err(e) => {
                self.phase = FormPhase::Failed(screen_error(&e, nav));
                None
            }
        }
    }
}
