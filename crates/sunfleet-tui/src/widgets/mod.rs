pub mod panel;
pub mod status_indicator;
pub mod sub_tabs;
