pub mod draw_service;
pub mod inventory_service;

pub use draw_service::*;
pub use inventory_service::*;
