/// Presentation layer: sidebar/top-bar widgets, chart panels, and tables.
/// All business logic lives in `crate::data`; these functions only render.

pub mod charts;
pub mod panels;
pub mod table;
