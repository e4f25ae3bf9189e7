use space_invaders::raster::*;

#[test]
fn fill_rect_covers_pixel_centres() {
    let mut fb = Framebuffer::new(10, 10);
    fb.fill_rect(2.0, 3.0, 4.0, 2.0, Color::rgb(255, 0, 0));
    assert_eq!(fb.pixel(2, 3), Some(Pixel { r: 255, g: 0, b: 0 }));
    assert_eq!(fb.pixel(5, 4), Some(Pixel { r: 255, g: 0, b: 0 }));
    assert_eq!(fb.pixel(6, 4), Some(Pixel::default()));
    assert_eq!(fb.pixel(2, 5), Some(Pixel::default()));
}

#[test]
fn half_alpha_blends_towards_source() {
    let mut fb = Framebuffer::new(1, 1);
    fb.clear(Color::rgb(0, 0, 0));
    fb.blend(0, 0, Color::rgba(200, 100, 0, 0.5));
    assert_eq!(fb.pixel(0, 0), Some(Pixel { r: 100, g: 50, b: 0 }));
}

#[test]
fn primitives_clip_at_edges() {
    let mut fb = Framebuffer::new(4, 4);
    fb.fill_circle(0.0, 0.0, 10.0, Color::rgb(1, 2, 3));
    fb.fill_rect(-5.0, -5.0, 100.0, 100.0, Color::rgb(9, 9, 9));
    assert_eq!(fb.pixel(3, 3), Some(Pixel { r: 9, g: 9, b: 9 }));
    assert_eq!(fb.pixel(4, 0), None);
}

#[test]
fn triangle_fill_is_inside_only() {
    let mut fb = Framebuffer::new(10, 10);
    fb.fill_polygon(&[(0.0, 10.0), (5.0, 0.0), (10.0, 10.0)], Color::rgb(0, 255, 0));
    assert_eq!(fb.pixel(5, 8), Some(Pixel { r: 0, g: 255, b: 0 }));
    assert_eq!(fb.pixel(0, 1), Some(Pixel::default()));
    assert_eq!(fb.pixel(9, 1), Some(Pixel::default()));
}

#[test]
fn average_of_uniform_block() {
    let mut fb = Framebuffer::new(4, 4);
    fb.clear(Color::rgb(10, 20, 30));
    assert_eq!(fb.average(0, 0, 4, 4), Pixel { r: 10, g: 20, b: 30 });
    assert_eq!(fb.average(3, 3, 3, 3), Pixel::default());
}
