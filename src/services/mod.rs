pub mod catalog;
pub mod display;
pub mod providers;
pub mod search;
pub mod selection;
pub mod view;

pub use catalog::MovieClient;
pub use display::{OverlayEvent, PageScroll, RecommendationGrid};
pub use search::{SearchState, SearchWorkflow};
pub use selection::{SelectionState, SelectionStore};
pub use view::{DiscoveryView, PageView};
