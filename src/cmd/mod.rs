pub mod inspect;
pub mod practice;
pub mod render;
