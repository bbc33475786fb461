use log::info;
use monobmp_core::framebuffer::{Framebuffer, HEIGHT, WIDTH};

const DISPLAY_BUFFER_SIZE: usize = WIDTH * HEIGHT;
const BACKGROUND: u32 = 0xFF000000;

pub struct MinifbDisplay {
    display_buffer: Box<[u32]>,
    window: minifb::Window,
    foreground: u32,
}

impl MinifbDisplay {
    pub fn new(foreground: u32, scale: minifb::Scale) -> Self {
        Self {
            display_buffer: vec![BACKGROUND; DISPLAY_BUFFER_SIZE].into_boxed_slice(),
            window: Self::create_window(scale),
            foreground: foreground | 0xFF000000,
        }
    }

    fn create_window(scale: minifb::Scale) -> minifb::Window {
        let options = minifb::WindowOptions {
            borderless: false,
            title: true,
            resize: true,
            scale,
            ..minifb::WindowOptions::default()
        };
        let mut window = minifb::Window::new("bmpview", WIDTH, HEIGHT, options)
            .unwrap_or_else(|e| {
                panic!("Unable to open window: {}", e);
            });

        window.set_target_fps(30);
        window
    }

    pub fn is_open(&self) -> bool {
        self.window.is_open() && !self.window.is_key_down(minifb::Key::Escape)
    }

    /// Copies the framebuffer into the window, one `u32` per set or cleared bit.
    pub fn blit(&mut self, framebuffer: &Framebuffer) {
        info!("Blitting {} bytes", framebuffer.as_bytes().len());
        for (i, &byte) in framebuffer.as_bytes().iter().enumerate() {
            for bit in 0..8 {
                self.display_buffer[i * 8 + bit] = if (byte & (1 << (7 - bit))) != 0 {
                    self.foreground
                } else {
                    BACKGROUND
                };
            }
        }
    }

    pub fn update(&mut self) {
        if let Err(err) = self
            .window
            .update_with_buffer(&self.display_buffer, WIDTH, HEIGHT)
        {
            log::error!("Failed to update window: {}", err);
        }
    }
}
