pub mod music_storage {
    pub mod catalog;
    pub mod collection;
    pub mod db_file;
    pub mod playlist;
    pub mod song;
    pub mod utils;
}

pub mod music_controller {
    pub mod controller;
}

pub mod config;
pub mod error;
