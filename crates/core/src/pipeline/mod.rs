pub mod groups;
pub mod normalize_style_use_case;
pub mod process_staging_use_case;
pub mod report;
pub mod select_avatar_use_case;
