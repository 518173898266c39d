pub mod motion_vector;
pub mod view;
