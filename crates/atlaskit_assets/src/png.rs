use anyhow::Result;
use atlaskit_textures::TextureSource;
use rgb::ComponentBytes;

/// Decodes a PNG into tightly packed RGBA8 pixels and its size.
pub fn decode_png(png: &[u8]) -> Result<(Vec<u8>, (u32, u32))> {
    let image = lodepng::decode32(png)?;
    let size = (image.width as u32, image.height as u32);
    let image = image.buffer.as_bytes().to_owned();

    Ok((image, size))
}

/// A texture source holding the decoded pixels of a PNG.
pub fn png_source(png: &[u8]) -> Result<TextureSource> {
    let (pixels, (width, height)) = decode_png(png)?;
    log::debug!("Decoded {width}x{height} png");

    Ok(TextureSource::with_pixels(pixels, width, height))
}
