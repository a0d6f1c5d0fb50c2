//! PNG texture decoding.

use std::{fs::File, io::BufReader, path::Path};

use png::{BitDepth, ColorType, Decoder, Transformations};
use rgb::RGBA8;

use crate::error::{Error, Result};

/// Decode a PNG file into RGBA pixels.
///
/// # Returns
///
/// - `(width, height, pixels)` where `pixels` is an array of RGBA pixels.
///
/// # Errors
///
/// - When the file can't be opened.
/// - When the PNG is corrupt or can't be converted to 8 bit RGBA.
pub fn decode(path: &Path) -> Result<(u32, u32, Vec<RGBA8>)> {
    let file = File::open(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut decoder = Decoder::new(BufReader::new(file));

    // Discard text chunks
    decoder.set_ignore_text_chunk(true);

    // Convert indexed and grayscale images to RGBA
    decoder.set_transformations(Transformations::normalize_to_color8() | Transformations::ALPHA);

    let decode_error = |source| Error::PngDecode {
        path: path.to_path_buf(),
        source,
    };

    // Start parsing the PNG
    let mut reader = decoder.read_info().map_err(decode_error)?;

    // Must be 8 bit RGBA after the transformations
    let (color_type, bits) = reader.output_color_type();
    if color_type != ColorType::Rgba || bits != BitDepth::Eight {
        return Err(Error::UnsupportedPng {
            path: path.to_path_buf(),
        });
    }

    // Read the PNG
    let mut pixels = vec![RGBA8::default(); reader.output_buffer_size() / 4];
    let info = reader
        .next_frame(bytemuck::cast_slice_mut(&mut pixels))
        .map_err(decode_error)?;

    // Only keep the pixels of the first frame
    pixels.truncate((info.width * info.height) as usize);

    Ok((info.width, info.height, pixels))
}
