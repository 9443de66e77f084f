use std::io::Cursor;

use super::*;

fn solid(width: u32, height: u32, rgba: [u8; 4]) -> FrameRGBA {
    FrameRGBA {
        width,
        height,
        data: rgba.repeat((width * height) as usize),
    }
}

struct Decoded {
    width: u16,
    height: u16,
    frames: Vec<(u16, Vec<u8>)>,
}

fn decode(bytes: &[u8]) -> Decoded {
    let mut opts = gif::DecodeOptions::new();
    opts.set_color_output(gif::ColorOutput::Indexed);
    let mut decoder = opts.read_info(Cursor::new(bytes)).unwrap();
    let (width, height) = (decoder.width(), decoder.height());
    let mut frames = Vec::new();
    while let Some(frame) = decoder.read_next_frame().unwrap() {
        frames.push((frame.delay, frame.buffer.to_vec()));
    }
    Decoded {
        width,
        height,
        frames,
    }
}

#[test]
fn palette_colors_quantize_without_dither_noise() {
    let p = Plan9Palette::new();
    let q = quantize_frame(&solid(8, 4, [0, 0, 255, 255]), &p, Rgb8::WHITE).unwrap();
    let blue = p.nearest([0, 0, 255]);
    assert_eq!(q.indices.len(), 32);
    assert!(q.indices.iter().all(|&i| i == blue));
}

#[test]
fn off_palette_colors_are_dithered() {
    let p = Plan9Palette::new();
    let q = quantize_frame(&solid(16, 16, [100, 150, 200, 255]), &p, Rgb8::WHITE).unwrap();
    let distinct: std::collections::HashSet<u8> = q.indices.iter().copied().collect();
    assert!(distinct.len() > 1, "error diffusion should mix palette entries");
}

#[test]
fn transparent_pixels_flatten_over_matte() {
    let p = Plan9Palette::new();
    let q = quantize_frame(&solid(2, 2, [0, 0, 0, 0]), &p, Rgb8::WHITE).unwrap();
    let white = p.nearest([255, 255, 255]);
    assert!(q.indices.iter().all(|&i| i == white));
}

#[test]
fn encodes_frames_in_order_with_fixed_delay() {
    let canvas = Canvas {
        width: 6,
        height: 3,
    };
    let mut enc = GifAnimationEncoder::new(canvas, 100, Rgb8::WHITE).unwrap();
    enc.push_frame(&solid(6, 3, [255, 255, 255, 255])).unwrap();
    enc.push_frame(&solid(6, 3, [0, 0, 255, 255])).unwrap();
    enc.push_frame(&solid(6, 3, [0, 0, 0, 255])).unwrap();
    assert_eq!(enc.frames_written(), 3);
    let bytes = enc.finish().unwrap();
    assert_eq!(&bytes[..6], b"GIF89a");

    let p = Plan9Palette::new();
    let d = decode(&bytes);
    assert_eq!((d.width, d.height), (6, 3));
    let expected = [
        p.nearest([255, 255, 255]),
        p.nearest([0, 0, 255]),
        p.nearest([0, 0, 0]),
    ];
    assert_eq!(d.frames.len(), 3);
    for ((delay, buf), idx) in d.frames.iter().zip(expected) {
        assert_eq!(*delay, 100);
        assert!(buf.iter().all(|&i| i == idx));
    }
}

#[test]
fn size_mismatch_is_rejected() {
    let canvas = Canvas {
        width: 4,
        height: 4,
    };
    let mut enc = GifAnimationEncoder::new(canvas, 100, Rgb8::WHITE).unwrap();
    let err = enc.push_frame(&solid(5, 4, [0, 0, 0, 255])).unwrap_err();
    assert!(matches!(err, CountdownError::Validation(_)), "{err}");
}

#[test]
fn truncated_frame_data_is_rejected() {
    let p = Plan9Palette::new();
    let mut f = solid(4, 4, [0, 0, 0, 255]);
    f.data.pop();
    assert!(quantize_frame(&f, &p, Rgb8::WHITE).is_err());
}

#[test]
fn empty_animation_cannot_finish() {
    let canvas = Canvas {
        width: 4,
        height: 4,
    };
    let enc = GifAnimationEncoder::new(canvas, 100, Rgb8::WHITE).unwrap();
    assert!(enc.finish().is_err());
}

#[test]
fn encode_animation_keeps_slice_order() {
    let canvas = Canvas {
        width: 4,
        height: 2,
    };
    let colors = [[255, 0, 0, 255], [0, 255, 0, 255], [0, 0, 255, 255], [0, 0, 0, 255]];
    let frames: Vec<FrameRGBA> = colors.iter().map(|c| solid(4, 2, *c)).collect();
    let pool = rayon::ThreadPoolBuilder::new().num_threads(4).build().unwrap();
    let bytes = encode_animation(&frames, canvas, 100, Rgb8::WHITE, &pool).unwrap();

    let p = Plan9Palette::new();
    let d = decode(&bytes);
    assert_eq!(d.frames.len(), 4);
    for ((_, buf), c) in d.frames.iter().zip(colors) {
        let idx = p.nearest([c[0], c[1], c[2]]);
        assert!(buf.iter().all(|&i| i == idx));
    }
}

#[test]
fn flatten_premul_over_white() {
    // Premultiplied blue at ~50% alpha over white.
    let src = [0u8, 0, 128, 128];
    let mut dst = [0u8; 3];
    flatten_premul_to_rgb8(&mut dst, &src, Rgb8::WHITE).unwrap();
    assert_eq!(dst, [127, 127, 255]);
}
