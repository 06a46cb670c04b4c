pub mod badges;
pub mod chat_panel;
pub mod form;
pub mod gauge;
pub mod history_table;
pub mod menu;
