use crate::engine::catalog::catalog_view;
use crate::engine::recommender::{ensure_min_selection, Recommender, MIN_SELECTION};
use crate::error::AppError;
use crate::models::{Interest, Page, PageView, SelectionSet};

pub const WELCOME_TITLE: &str = "Smart Career Recommender";
pub const WELCOME_MESSAGE: &str =
    "Find the perfect course and career based on your interests and hobbies.";

/// Page and selection state of one user's flow.
///
/// Transitions:
/// - Welcome --start--> SelectInterests
/// - SelectInterests --submit (at least two interests)--> Results
/// - Results --restart--> Welcome, selection cleared
///
/// Anything else is rejected with [`AppError::InvalidTransition`] and leaves
/// the session untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    page: Page,
    selection: SelectionSet,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(&self) -> Page {
        self.page
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn start(&mut self) -> Result<(), AppError> {
        self.expect_page(Page::Welcome, "start")?;
        self.page = Page::SelectInterests;
        Ok(())
    }

    /// Check (`checked == true`) or uncheck one interest
    pub fn toggle(&mut self, interest: Interest, checked: bool) -> Result<(), AppError> {
        self.expect_page(Page::SelectInterests, "toggle")?;
        if checked {
            self.selection.insert(interest);
        } else {
            self.selection.remove(&interest);
        }
        Ok(())
    }

    /// Move to results if enough interests are checked
    pub fn submit(&mut self) -> Result<(), AppError> {
        self.expect_page(Page::SelectInterests, "submit")?;
        ensure_min_selection(&self.selection)?;
        self.page = Page::Results;
        Ok(())
    }

    pub fn restart(&mut self) -> Result<(), AppError> {
        self.expect_page(Page::Results, "restart")?;
        self.page = Page::Welcome;
        self.selection.clear();
        Ok(())
    }

    /// Content of the current page
    pub fn render(&self, recommender: &Recommender) -> Result<PageView, AppError> {
        let view = match self.page {
            Page::Welcome => PageView::Welcome {
                title: WELCOME_TITLE.to_string(),
                message: WELCOME_MESSAGE.to_string(),
            },
            Page::SelectInterests => PageView::SelectInterests {
                categories: catalog_view(&self.selection),
                selected_count: self.selection.len(),
                min_required: MIN_SELECTION,
            },
            Page::Results => PageView::Results {
                recommendation: recommender.recommend(&self.selection)?,
            },
        };
        Ok(view)
    }

    fn expect_page(&self, page: Page, action: &'static str) -> Result<(), AppError> {
        if self.page != page {
            return Err(AppError::InvalidTransition {
                page: self.page,
                action,
            });
        }
        Ok(())
    }
}
