//! Event catalog use-cases.

use crate::model::event::{Event, EventId, EventListQuery, NewEvent};
use crate::repo::event_repo::EventRepository;
use crate::repo::RepoResult;
use log::{info, warn};

/// Use-case service for creating and browsing events.
pub struct EventService<R: EventRepository> {
    repo: R,
}

impl<R: EventRepository> EventService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates an event, applying `General` / `C-001` for omitted optionals.
    ///
    /// # Errors
    /// - `RepoError::Validation` when title, description or date is blank.
    pub fn create_event(
        &self,
        title: impl Into<String>,
        description: impl Into<String>,
        date: impl Into<String>,
        kind: Option<String>,
        college_id: Option<String>,
    ) -> RepoResult<Event> {
        let input = NewEvent::new(title, description, date, kind, college_id);
        self.create_from(&input)
    }

    /// Creates an event from an already-assembled input.
    pub fn create_from(&self, input: &NewEvent) -> RepoResult<Event> {
        match self.repo.create_event(input) {
            Ok(event) => {
                info!(
                    "event=event_create module=service status=ok event_id={}",
                    event.id
                );
                Ok(event)
            }
            Err(err) => {
                warn!("event=event_create module=service status=error error={err}");
                Err(err)
            }
        }
    }

    pub fn get_event(&self, id: EventId) -> RepoResult<Option<Event>> {
        self.repo.get_event(id)
    }

    /// Lists events ordered by date, then id.
    pub fn list_events(&self, query: &EventListQuery) -> RepoResult<Vec<Event>> {
        self.repo.list_events(query)
    }
}
