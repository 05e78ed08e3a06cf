use image::{DynamicImage, ImageBuffer, Rgb};
use pixel_invert::{
    default_config, invert, invert_dynamic, inverted_output_name, transform_rows, Config,
    RasterImage,
};

#[test]
fn inverts_a_2x2_rgb_raster() {
    let pixels = vec![10, 20, 30, 200, 210, 220, 0, 0, 0, 255, 255, 255];
    let mut raster = RasterImage::from_raw(2, 2, 3, pixels).expect("raster construction failed");
    transform_rows(Some(&mut raster), 2, invert);
    assert_eq!(raster.as_bytes(), &[245, 235, 225, 55, 45, 35, 255, 255, 255, 0, 0, 0]);
}

#[test]
fn inverting_twice_restores_every_byte_value() {
    let original: Vec<u8> = (0..=255).collect();
    let mut raster =
        RasterImage::from_raw(16, 16, 1, original.clone()).expect("raster construction failed");
    transform_rows(Some(&mut raster), 4, invert);
    assert_ne!(raster.as_bytes(), original.as_slice());
    transform_rows(Some(&mut raster), 4, invert);
    assert_eq!(raster.as_bytes(), original.as_slice());
}

#[test]
fn worker_count_does_not_change_the_output() {
    let buf: ImageBuffer<Rgb<u8>, Vec<u8>> = ImageBuffer::from_fn(64, 33, |x, y| {
        Rgb([((x * 7 + y * 13) % 251) as u8, ((x * 3) % 251) as u8, ((y * 5) % 251) as u8])
    });
    let dyn_img = DynamicImage::ImageRgb8(buf);

    let serial = invert_dynamic(&dyn_img, &Config { num_threads: 1 })
        .expect("single-worker invert failed");
    let parallel = invert_dynamic(&dyn_img, &Config { num_threads: 8 })
        .expect("multi-worker invert failed");
    assert_eq!(serial.as_bytes(), parallel.as_bytes());
}

#[test]
fn rgba_images_keep_their_layout_and_invert_alpha_too() {
    let buf = ImageBuffer::from_fn(3, 2, |x, y| image::Rgba([x as u8, y as u8, 100, 40]));
    let dyn_img = DynamicImage::ImageRgba8(buf);
    let out = invert_dynamic(&dyn_img, &default_config()).expect("rgba invert failed");
    let rgba = out.as_rgba8().expect("output should still be RGBA");
    assert_eq!(rgba.get_pixel(0, 0).0, [255, 255, 155, 215]);
    assert_eq!(rgba.get_pixel(2, 1).0, [253, 254, 155, 215]);
}

#[test]
fn grayscale_images_stay_single_channel() {
    let buf = ImageBuffer::from_fn(4, 4, |x, y| image::Luma([(x + y) as u8]));
    let raster = RasterImage::from_dynamic(DynamicImage::ImageLuma8(buf));
    assert_eq!(raster.channels(), 1);
    assert_eq!(raster.rows(), 4);
}

#[test]
fn rejects_a_buffer_that_does_not_match_its_dimensions() {
    assert!(RasterImage::from_raw(2, 2, 3, vec![0u8; 11]).is_err());
    assert!(RasterImage::from_raw(0, 2, 3, vec![]).is_err());
}

#[test]
fn output_name_replaces_the_extension_with_the_inverted_suffix() {
    assert_eq!(inverted_output_name("photo.png"), "photo_inverted.png");
    assert_eq!(inverted_output_name("shots/img.jpeg"), "shots/img_inverted.png");
    assert_eq!(inverted_output_name("scan"), "scan_inverted.png");
}
