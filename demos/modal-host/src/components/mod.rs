pub mod dialog_body;
pub mod help_bar;
pub mod page;

// Re-export core Component trait
pub use tui_modal::Component;

pub use dialog_body::{DialogBody, CLOSE_LABEL};
pub use help_bar::{HelpBar, HelpBarProps};
pub use page::{page_lines, PageProps, PageView, TRIGGER_LABEL};
