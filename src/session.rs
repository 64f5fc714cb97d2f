//! Session state: the form, the loading flag and the current mosaic

use log::{debug, error, info};

use crate::error::Error;
use crate::request::{FormUpdate, MosaicForm, MosaicRequest, MosaicResponse};

/// Everything one interactive session holds
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState
{   pub form: MosaicForm
  , /// True from the start of a submission until it completes
    pub loading: bool
  , /// Last successful mosaic, `None` in the entry state
    pub result: Option<MosaicResponse>
  , /// Bumped on every reset; submissions started before it are stale
    generation: u64
}

/// A started submission: the body to send and the session generation
/// it belongs to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission
{   pub generation: u64
  , pub request: MosaicRequest
}

/// What a toggle-or-reset did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleOutcome
{   /// A held mosaic was cleared along with the album name
    Reset
  , /// The form was submitted and this mosaic is now held
    Loaded(MosaicResponse)
}

impl SessionState
{   pub fn new(form: MosaicForm) -> Self
    {   SessionState
        {   form
          , ..SessionState::default()
        }
    }

    pub fn has_result(&self) -> bool
    {   self.result.is_some()
    }

    pub fn update_form(&mut self, update: FormUpdate)
    {   debug!("Form update: {:?}", update);
        self.form.apply(update);
    }

    /// Mark a submission as started and capture the request to send
    ///
    /// Only one submission may be outstanding per session.
    pub fn begin_submit(&mut self) -> Result<Submission, Error>
    {   if self.loading
        {   error!("Rejected submission: one is already in flight");
            return Err(Error::SubmissionInFlight);
        }
        self.loading = true;
        Ok(Submission
        {   generation: self.generation
          , request: self.form.to_request()
        })
    }

    /// Record the outcome of the outstanding submission
    ///
    /// Failures leave the form and the held mosaic untouched. A mosaic
    /// for a submission started before the last reset is not held.
    pub fn finish_submit(
      &mut self
    , generation: u64
    , outcome: &Result<MosaicResponse, Error>
    )
    {   self.loading = false;
        match outcome
        {   Ok(mosaic) if generation != self.generation => {
              info!(
                "Dropping mosaic {} finished after a reset",
                mosaic.mosaic_url
              );
            }
          , Ok(mosaic) => {
              info!("Mosaic ready: {}", mosaic.mosaic_url);
              self.result = Some(mosaic.clone());
            }
          , Err(e) => {
              error!("Mosaic submission failed: {}", e);
            }
        }
    }

    /// Return to the entry state
    ///
    /// A submission still outstanding keeps the session loading until it
    /// completes, but its mosaic is dropped.
    pub fn reset(&mut self)
    {   debug!("Resetting session");
        self.result = None;
        self.form.album_name.clear();
        self.generation = self.generation.wrapping_add(1);
    }
}
