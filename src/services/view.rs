use serde::Serialize;

use crate::{
    models::Movie,
    services::{
        display::{CardView, DetailView, RecommendationGrid, ScrollStatus},
        selection::SelectionState,
    },
};

pub const EMPTY_MESSAGE: &str = "No recommendations found for this movie.";

/// Main body of the recommendations section
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum PageBody {
    Loading,
    Error { message: String },
    Grid,
    Empty { message: String },
}

/// Recommendations section; absent until a movie has been selected
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DiscoveryView {
    pub selected_movie: Movie,
    pub heading: String,
    pub body: PageBody,
}

impl DiscoveryView {
    pub fn from_state(state: &SelectionState) -> Option<Self> {
        let selected_movie = state.selected_movie.clone()?;

        let heading = if !state.recommendations.is_empty() {
            format!("Because you like \"{}\"", selected_movie.title)
        } else if state.is_loading {
            "Finding recommendations...".to_string()
        } else {
            "Select a movie to get recommendations".to_string()
        };

        let body = if state.is_loading {
            PageBody::Loading
        } else if let Some(message) = &state.error {
            PageBody::Error {
                message: message.clone(),
            }
        } else if state.recommendations.is_empty() {
            PageBody::Empty {
                message: EMPTY_MESSAGE.to_string(),
            }
        } else {
            PageBody::Grid
        };

        Some(Self {
            selected_movie,
            heading,
            body,
        })
    }

    pub fn shows_grid(&self) -> bool {
        self.body == PageBody::Grid
    }
}

/// Everything the page needs for one render
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PageView {
    pub section: Option<DiscoveryView>,
    pub cards: Vec<CardView>,
    pub visible_count: usize,
    pub total: usize,
    pub can_load_more: bool,
    pub detail: Option<DetailView>,
    pub scroll: ScrollStatus,
}

impl PageView {
    pub fn build(state: &SelectionState, grid: &RecommendationGrid, scroll: ScrollStatus) -> Self {
        let section = DiscoveryView::from_state(state);
        let show_grid = section.as_ref().is_some_and(DiscoveryView::shows_grid);

        if !show_grid {
            return Self {
                section,
                cards: Vec::new(),
                visible_count: 0,
                total: 0,
                can_load_more: false,
                detail: None,
                scroll,
            };
        }

        Self {
            section,
            cards: grid.cards(),
            visible_count: grid.visible_count(),
            total: grid.len(),
            can_load_more: grid.can_load_more(),
            detail: grid.detail().map(|d| d.view()),
            scroll,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Recommendation;
    use crate::services::display::{PageScroll, DEFAULT_PAGE_SIZE};

    fn selected() -> SelectionState {
        SelectionState {
            selected_movie: Some(Movie::new(603, "The Matrix")),
            ..Default::default()
        }
    }

    fn recs(n: u64) -> Vec<Recommendation> {
        (1..=n)
            .map(|id| Recommendation::new(Movie::new(id, format!("Movie {}", id))))
            .collect()
    }

    #[test]
    fn test_no_selection_hides_section() {
        assert_eq!(DiscoveryView::from_state(&SelectionState::default()), None);
    }

    #[test]
    fn test_loading_heading() {
        let state = SelectionState {
            is_loading: true,
            ..selected()
        };
        let view = DiscoveryView::from_state(&state).unwrap();
        assert_eq!(view.heading, "Finding recommendations...");
        assert_eq!(view.body, PageBody::Loading);
    }

    #[test]
    fn test_grid_heading() {
        let state = SelectionState {
            recommendations: recs(2),
            ..selected()
        };
        let view = DiscoveryView::from_state(&state).unwrap();
        assert_eq!(view.heading, "Because you like \"The Matrix\"");
        assert!(view.shows_grid());
    }

    #[test]
    fn test_error_body() {
        let state = SelectionState {
            error: Some("boom".to_string()),
            ..selected()
        };
        let view = DiscoveryView::from_state(&state).unwrap();
        assert_eq!(view.heading, "Select a movie to get recommendations");
        assert_eq!(
            view.body,
            PageBody::Error {
                message: "boom".to_string()
            }
        );
    }

    #[test]
    fn test_empty_body() {
        let view = DiscoveryView::from_state(&selected()).unwrap();
        assert_eq!(
            view.body,
            PageBody::Empty {
                message: EMPTY_MESSAGE.to_string()
            }
        );
    }

    #[test]
    fn test_page_view_pages_grid() {
        let state = SelectionState {
            recommendations: recs(10),
            ..selected()
        };
        let scroll = PageScroll::new();
        let grid = RecommendationGrid::new(state.recommendations.clone(), DEFAULT_PAGE_SIZE);

        let page = PageView::build(&state, &grid, scroll.status());
        assert_eq!(page.cards.len(), 8);
        assert_eq!(page.total, 10);
        assert!(page.can_load_more);
        assert_eq!(page.detail, None);
    }

    #[test]
    fn test_page_view_hides_cards_under_error() {
        let state = SelectionState {
            recommendations: recs(3),
            error: Some("boom".to_string()),
            ..selected()
        };
        let grid = RecommendationGrid::new(state.recommendations.clone(), DEFAULT_PAGE_SIZE);

        let page = PageView::build(&state, &grid, PageScroll::new().status());
        assert!(page.cards.is_empty());
        assert!(!page.can_load_more);
    }
}
