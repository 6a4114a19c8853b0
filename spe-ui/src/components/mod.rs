//! Reusable Dioxus RSX components for the pricing dashboard.

mod data_source_banner;
mod day_controls;
mod error_display;
mod loading_spinner;
mod metric_cards;
mod product_selector;
mod recommendation_panel;
mod section_header;
mod state_map;
mod tab_bar;
mod upload_form;

pub use data_source_banner::{CustomDataBanner, DataErrorBanner, SourceBadges};
pub use day_controls::DayControls;
pub use error_display::ErrorDisplay;
pub use loading_spinner::LoadingSpinner;
pub use metric_cards::MetricCards;
pub use product_selector::ProductSelector;
pub use recommendation_panel::RecommendationPanel;
pub use section_header::SectionHeader;
pub use state_map::StateMap;
pub use tab_bar::TabBar;
pub use upload_form::UploadForm;
