use std::process::ExitCode;

use argh::FromArgs;
use image::GrayImage;
use monobmp_core::{
    bmp,
    display::{XRES, YRES},
    fs::{Filesystem, Mode},
};

use crate::std_fs::StdFilesystem;

mod std_fs;

#[derive(FromArgs)]
/// Conversion options
struct Args {
    /// input image path
    #[argh(option, short = 'i')]
    input_path: String,

    /// output BMP file path
    #[argh(option, short = 'o')]
    output_path: String,

    /// luma below this becomes foreground
    #[argh(option, short = 't', default = "128")]
    threshold: u8,

    /// treat light pixels as foreground instead
    #[argh(switch, short = 'n')]
    invert: bool,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Args = argh::from_env();

    let image = match image::open(&args.input_path) {
        Ok(image) => image.into_luma8(),
        Err(err) => {
            log::error!("Failed to open input image {}: {}", args.input_path, err);
            return ExitCode::FAILURE;
        }
    };
    if image.width() > XRES as u32 || image.height() > YRES as u32 {
        log::warn!(
            "Input image is larger than the screen ({}x{}), it will be clipped when drawn",
            XRES,
            YRES
        );
    }

    let fs = StdFilesystem::new_with_base_path(".".into());
    let mut out = match fs.open_file(&args.output_path, Mode::Write) {
        Ok(out) => out,
        Err(err) => {
            log::error!("Failed to create {}: {:?}", args.output_path, err);
            return ExitCode::FAILURE;
        }
    };

    match encode(&image, &mut out, args.threshold, args.invert) {
        Ok(header) => {
            log::info!(
                "Wrote {} ({}x{}, {} bytes)",
                args.output_path,
                header.width,
                header.height,
                header.file_size
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            log::error!("Failed to write {}: {}", args.output_path, err);
            ExitCode::FAILURE
        }
    }
}

fn encode<W: embedded_io::Write>(
    image: &GrayImage,
    out: &mut W,
    threshold: u8,
    invert: bool,
) -> bmp::Result<bmp::BitmapHeader> {
    bmp::write(out, image.width(), image.height(), |x, y| {
        let luma = image.get_pixel(x, y)[0];
        (luma < threshold) != invert
    })
}

#[cfg(test)]
mod tests {
    use image::Luma;
    use monobmp_core::{bmp::Image, fs::MemFile};

    use super::*;

    #[test]
    fn test_threshold() {
        let image = GrayImage::from_fn(4, 1, |x, _| Luma([(x * 80) as u8]));

        let mut dark: Vec<u8> = Vec::new();
        encode(&image, &mut dark, 128, false).unwrap();
        let dark = Image::read(&mut MemFile::new(&dark)).unwrap();
        let mut xs = Vec::new();
        bmp::render(0, 0, (), &dark, |x, _, _| xs.push(x));
        assert_eq!(xs, [0, 1]);

        let mut light: Vec<u8> = Vec::new();
        encode(&image, &mut light, 128, true).unwrap();
        let light = Image::read(&mut MemFile::new(&light)).unwrap();
        xs.clear();
        bmp::render(0, 0, (), &light, |x, _, _| xs.push(x));
        assert_eq!(xs, [2, 3]);
    }
}
