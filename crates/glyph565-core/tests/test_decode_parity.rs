//! The native decoder and the RGB565 BMP reader must agree on the same image.

use image::{Rgb, RgbImage};
use pretty_assertions::assert_eq;

use glyph565_core::bmp::write_bmp565;
use glyph565_core::{tile, BitmapDecoder, BmpDecoder, GridSpec, NativeDecoder};

fn gradient(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x * 17) as u8, (y * 11) as u8, ((x + y) * 5) as u8])
    })
}

#[test]
fn test_png_and_bmp_paths_agree() {
    let dir = tempfile::tempdir().unwrap();
    let png_path = dir.path().join("sheet.png");
    let bmp_path = dir.path().join("sheet.bmp");

    gradient(12, 8).save(&png_path).unwrap();
    let native = NativeDecoder.decode(&png_path).unwrap();

    let file = std::fs::File::create(&bmp_path).unwrap();
    write_bmp565(&native, std::io::BufWriter::new(file)).unwrap();
    let from_bmp = BmpDecoder::default().decode(&bmp_path).unwrap();

    assert_eq!(native, from_bmp);
    assert_eq!(BmpDecoder::default().dimensions(&bmp_path).unwrap(), (12, 8));

    let grid = GridSpec::new(3, 4, 4, 2);
    assert_eq!(
        tile(&native, &grid).unwrap().as_bytes(),
        tile(&from_bmp, &grid).unwrap().as_bytes()
    );
}

#[test]
fn test_native_decode_truncates_like_external_tool() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("one.png");
    RgbImage::from_pixel(2, 1, Rgb([0x87, 0x43, 0xc7])).save(&path).unwrap();

    let bitmap = NativeDecoder.decode(&path).unwrap();
    let expected = ((0x87u16 >> 3) << 11) | ((0x43u16 >> 2) << 5) | (0xc7u16 >> 3);
    assert_eq!(&bitmap.data[..2], &expected.to_le_bytes()[..]);
}
