//! Laminate building blocks

mod laminate;
mod ply;

pub use laminate::{Laminate, LayupEntry};
pub use ply::{Ply, PlyProperties};
