//! Create-form screen.

use std::marker::PhantomData;

use stampdesk_core::{FieldError, FormDraft};
use tracing::debug;

use super::{FormPhase, screen_error};
use crate::api::{ApiClient, Operation};
use crate::navigation::{Navigator, Route};

/// Draft plus submission state for one create operation.
///
/// Validation runs first; an invalid draft never reaches the network. On
/// success the listed caches are dropped and the navigator moves to the
/// success route.
pub struct CreateScreen<D, O> {
    pub draft: D,
    phase: FormPhase,
    field_errors: Vec<FieldError>,
    success: Route,
    invalidates: Vec<&'static str>,
    _operation: PhantomData<fn() -> O>,
}

impl<D, O> CreateScreen<D, O>
where
    D: FormDraft,
    O: Operation<Input = D::Submission>,
{
    #[must_use]
    pub fn new(draft: D, success: Route) -> Self {
        Self {
            draft,
            phase: FormPhase::Editing,
            field_errors: Vec::new(),
            success,
            invalidates: Vec::new(),
            _operation: PhantomData,
        }
    }

    /// Drop cached results of `L` after a successful submit.
    #[must_use]
    pub fn invalidating<L: Operation>(mut self) -> Self {
        self.invalidates.push(L::ENDPOINT.name);
        self
    }

    #[must_use]
    pub const fn phase(&self) -> &FormPhase {
        &self.phase
    }

    /// Per-field failures from the last validation.
    #[must_use]
    pub fn field_errors(&self) -> &[FieldError] {
        &self.field_errors
    }

    /// Validate and submit. Returns the created record on success.
    pub async fn submit(&mut self, client: &ApiClient, nav: &mut Navigator) -> Option<O::Output> {
        let submission = match self.draft.submit() {
            Ok(submission) => submission,
            Err(errors) => {
                debug!(operation = O::ENDPOINT.name, errors = errors.errors().len(), "Draft rejected");
                self.phase = FormPhase::Failed(errors.to_string());
                self.field_errors = errors.errors().to_vec();
                return None;
            }
        };

        self.field_errors.clear();
        self.phase = FormPhase::Submitting;
        match client.mutate::<O>(submission).await {
            Ok(created) => {
                for name in &self.invalidates {
                    client.invalidate_operation(*name).await;
                }
                self.phase = FormPhase::Succeeded;
                nav.navigate(self.success.clone());
                Some(created)
            }
            Err(e) => {
                self.phase = FormPhase::Failed(screen_error(&e, nav));
                None
            }
        }
    }
}
