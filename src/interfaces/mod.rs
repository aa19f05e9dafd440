pub mod file_lock;
