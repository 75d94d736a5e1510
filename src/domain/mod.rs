pub mod enums;
pub mod item;
pub mod views;

pub use enums::{ModalKind, Stage, TaskStatus, UiMode};
pub use item::Task;
pub use views::{
    count_with_status, expand_glyph, row_target, status_glyph, tree_connector, visible_rows,
    FlatRow, RowTarget,
};
