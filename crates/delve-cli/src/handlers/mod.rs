pub mod config;
pub mod entry_add;
pub mod export;
pub mod session_delete;
pub mod session_list;
pub mod session_load;
pub mod session_new;
pub mod session_show;
pub mod shell;
