pub mod clone_repo;
pub mod list_files;
pub mod read_file;
