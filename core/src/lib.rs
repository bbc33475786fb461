#![no_std]

pub mod bmp;
pub mod display;
pub mod framebuffer;
pub mod fs;

extern crate alloc;
