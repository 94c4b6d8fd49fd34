//! Normalize, group and compose: the transformation between import and export

pub mod composer;
pub mod grouping;
pub mod normalize;

pub use composer::{compose_sheet, info_row, label_row, project_row};
pub use grouping::group_by_account;
pub use normalize::{normalize_row, normalize_value, Journal};
