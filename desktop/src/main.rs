use std::process::ExitCode;

use argh::FromArgs;
use embedded_graphics::{pixelcolor::BinaryColor, prelude::Point};
use monobmp_core::{
    bmp::{self, Image},
    framebuffer::Framebuffer,
};

use crate::minifb_display::MinifbDisplay;
use crate::std_fs::StdFilesystem;

mod minifb_display;
mod std_fs;

#[derive(FromArgs)]
/// Draw a monochrome BMP onto a 1280x720 screen
struct Args {
    /// input BMP path
    #[argh(option, short = 'i')]
    input_path: String,

    /// screen column of the image's left edge
    #[argh(option, short = 'x', default = "0")]
    x: i32,

    /// screen row of the image's top edge
    #[argh(option, short = 'y', default = "0")]
    y: i32,

    /// foreground colour as RRGGBB hex
    #[argh(option, short = 'c', default = "String::from(\"ffffff\")")]
    color: String,

    /// print the drawn pixels to stdout instead of opening a window
    #[argh(switch, short = 'a')]
    ascii: bool,

    /// window scale, 1, 2 or 4
    #[argh(option, short = 's', default = "1")]
    scale: u8,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Args = argh::from_env();

    let fs = StdFilesystem::new_with_base_path(".".into());
    let mut image = match Image::load(&fs, &args.input_path) {
        Ok(image) => image,
        Err(err) => {
            log::error!("Failed to load {}: {}", args.input_path, err);
            return ExitCode::FAILURE;
        }
    };
    log::info!(
        "Loaded {} ({}x{}, {} bytes of pixel data)",
        args.input_path,
        image.header.width,
        image.header.height,
        image.header.image_size
    );

    if args.ascii {
        print!("{}", ascii(&image, args.x, args.y));
    } else {
        let Ok(color) = u32::from_str_radix(args.color.trim_start_matches('#'), 16) else {
            log::error!("Invalid colour: {}", args.color);
            return ExitCode::FAILURE;
        };
        let scale = match args.scale {
            1 => minifb::Scale::X1,
            4 => minifb::Scale::X4,
            _ => minifb::Scale::X2,
        };
        show(&image, Point::new(args.x, args.y), color, scale);
    }

    image.release();
    ExitCode::SUCCESS
}

fn show(image: &Image, top_left: Point, color: u32, scale: minifb::Scale) {
    let mut framebuffer = Framebuffer::default();
    image.draw(top_left, BinaryColor::On, &mut framebuffer).ok();
    log::info!("Drew {} pixels", framebuffer.written());

    let mut display = MinifbDisplay::new(color, scale);
    display.blit(&framebuffer);
    while display.is_open() {
        display.update();
    }
}

/// Renders the drawn area as text, `#` for foreground.
fn ascii(image: &Image, x: i32, y: i32) -> String {
    let mut pixels = Vec::new();
    bmp::render(x, y, '#', image, |x, y, c| pixels.push((x, y, c)));

    let Some(right) = pixels.iter().map(|p| p.0).max() else {
        return String::new();
    };
    let bottom = pixels.iter().map(|p| p.1).max().unwrap_or(0);
    let width = (right + 1) as usize;
    let mut grid = vec![vec!['.'; width]; (bottom + 1) as usize];
    for (x, y, c) in pixels {
        grid[y as usize][x as usize] = c;
    }

    let mut out = String::with_capacity(grid.len() * (width + 1));
    for row in grid {
        out.extend(row);
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use monobmp_core::fs::MemFile;

    use super::*;

    #[test]
    fn test_ascii() {
        let mut file: Vec<u8> = Vec::new();
        bmp::write(&mut file, 3, 2, |x, y| x == y).unwrap();
        let image = Image::read(&mut MemFile::new(&file)).unwrap();

        assert_eq!(ascii(&image, 1, 0), ".#.\n..#\n");
        assert_eq!(ascii(&Image::default(), 0, 0), "");
    }
}
