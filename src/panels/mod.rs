mod central_panel;
mod side_panel;
mod tools_panel;

pub use central_panel::central_panel;
pub use side_panel::side_panel;
pub use tools_panel::{PREDEFINED_DESIGNS, tools_panel};
