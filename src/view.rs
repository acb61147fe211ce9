//! Which screen is showing, what is selected, and which review result is
//! allowed to land.
//!
//! Every transition bumps a generation counter. A review request carries the
//! generation it was issued under; when it resolves, it is applied only if
//! nothing has moved since.

use crate::catalog::{AppId, AppRecord, Catalog};
use crate::filter::{self, FilterCriteria};
use crate::review::ReviewRecord;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    Home,
    Details(AppId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Home,
    Details,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum ReviewState {
    #[default]
    Idle,
    Loading,
    Ready(ReviewRecord),
}

/// Issued with each review request; presented back when it resolves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewTicket {
    pub generation: u64,
    pub app_id: AppId,
}

#[derive(Debug, Clone)]
pub struct ViewController {
    view: View,
    pub criteria: FilterCriteria,
    review: ReviewState,
    generation: u64,
}

impl Default for ViewController {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewController {
    pub fn new() -> Self {
        Self {
            view: View::Home,
            criteria: FilterCriteria::default(),
            review: ReviewState::Idle,
            generation: 0,
        }
    }

    pub fn view(&self) -> &View {
        &self.view
    }

    pub fn screen(&self) -> Screen {
        match self.view {
            View::Home => Screen::Home,
            View::Details(_) => Screen::Details,
        }
    }

    pub fn selection(&self) -> Option<&AppId> {
        match &self.view {
            View::Home => None,
            View::Details(id) => Some(id),
        }
    }

    pub fn selected<'c>(&self, catalog: &'c Catalog) -> Option<&'c AppRecord> {
        self.selection().and_then(|id| catalog.get(id))
    }

    pub fn review(&self) -> &ReviewState {
        &self.review
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// The home listing under the current criteria.
    pub fn visible<'c>(&self, catalog: &'c Catalog) -> Vec<&'c AppRecord> {
        filter::filter(catalog.apps(), &self.criteria)
    }

    /// Home or Details → Details(app). The returned ticket must accompany the
    /// review fetched for this selection.
    pub fn select_app(&mut self, app: &AppRecord) -> ReviewTicket {
        self.generation += 1;
        self.view = View::Details(app.id.clone());
        self.review = ReviewState::Loading;
        tracing::debug!("Selected {} (generation {})", app.id, self.generation);
        ReviewTicket {
            generation: self.generation,
            app_id: app.id.clone(),
        }
    }

    /// Details → Home. The search term is kept.
    pub fn back(&mut self) {
        self.leave_details();
    }

    /// Any → Home, clearing the search term.
    pub fn go_home(&mut self) {
        self.leave_details();
        self.criteria.search.clear();
    }

    fn leave_details(&mut self) {
        self.generation += 1;
        self.view = View::Home;
        self.review = ReviewState::Idle;
    }

    /// Apply a resolved review if its ticket still names the active subject.
    /// Returns false when the result was stale and dropped.
    pub fn apply_review(&mut self, ticket: &ReviewTicket, review: ReviewRecord) -> bool {
        let current = ticket.generation == self.generation
            && self.selection() == Some(&ticket.app_id);
        if !current {
            tracing::debug!(
                "Dropping stale review for {} (generation {}, now {})",
                ticket.app_id,
                ticket.generation,
                self.generation
            );
            return false;
        }
        self.review = ReviewState::Ready(review);
        true
    }
}
