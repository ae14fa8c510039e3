pub mod expression_smoother;
pub mod frame_matcher;
pub mod track_table;
