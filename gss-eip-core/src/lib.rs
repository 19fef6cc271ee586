pub mod eip;
pub mod helpers;
pub mod kubernetes;
pub mod network;
pub mod options;
pub mod plugin;
pub mod resources;
