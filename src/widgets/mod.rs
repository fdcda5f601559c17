pub mod post_list;
