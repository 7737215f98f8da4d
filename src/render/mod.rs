pub mod backend;
pub mod compose;
pub mod composite;
pub mod cpu;
pub mod scene;
pub mod text;
