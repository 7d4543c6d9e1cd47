pub mod draw_list;
pub mod sink;
