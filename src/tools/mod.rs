mod command_runner;
mod disk_space;
mod ffprobe_info;
mod file_hasher;
mod file_tools;
mod image_info;
mod image_scanner;
mod label_font;
mod path_validator;

pub use command_runner::{
    describe_command, is_program_available, run_captured, run_inherited, run_streaming,
};
pub use disk_space::{available_space, has_room_for};
pub use ffprobe_info::{StreamSummary, probe_streams};
pub use file_hasher::{calculate_file_hash, files_identical};
pub use file_tools::{
    directory_size, file_name_string, list_files, list_subdirectories, move_file,
    unique_destination,
};
pub use image_info::ImageInfo;
pub use image_scanner::scan_image_files;
pub use label_font::LabelFont;
pub use path_validator::{
    ensure_directory_exists, is_same_location, is_within, validate_directory_exists,
    validate_file_exists,
};
