pub mod code_block;
pub mod dashboard;
pub mod editor_pane;
pub mod feedback_panel;
pub mod sidebar;
