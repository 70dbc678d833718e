pub mod common;

pub mod a001_menu_item;
pub mod a002_chef;
pub mod a003_chef_dish_mapping;
pub mod a004_pos_connection;
pub mod a005_expense;
pub mod a006_sale_record;
pub mod a007_data_source_selection;
