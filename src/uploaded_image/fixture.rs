use image::{DynamicImage, ImageBuffer, ImageOutputFormat, Rgb, Rgba};
use std::io::Cursor;

pub fn encode_png(width: u32, height: u32, color: [u8; 3]) -> Vec<u8> {
    let mut img = ImageBuffer::new(width, height);
    for pixel in img.pixels_mut() {
        *pixel = Rgb(color);
    }
    encode(DynamicImage::ImageRgb8(img), ImageOutputFormat::Png)
}

pub fn encode_png_rgba(width: u32, height: u32) -> Vec<u8> {
    let mut img = ImageBuffer::new(width, height);
    for pixel in img.pixels_mut() {
        *pixel = Rgba([120, 180, 60, 128]);
    }
    encode(DynamicImage::ImageRgba8(img), ImageOutputFormat::Png)
}

pub fn encode_jpeg(width: u32, height: u32) -> Vec<u8> {
    let mut img = ImageBuffer::new(width, height);
    for (x, y, pixel) in img.enumerate_pixels_mut() {
        *pixel = Rgb([(x % 256) as u8, (y % 256) as u8, 90]);
    }
    encode(DynamicImage::ImageRgb8(img), ImageOutputFormat::Jpeg(90))
}

fn encode(image: DynamicImage, format: ImageOutputFormat) -> Vec<u8> {
    let mut buffer = Cursor::new(Vec::new());
    image.write_to(&mut buffer, format).unwrap();
    buffer.into_inner()
}
