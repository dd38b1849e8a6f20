use flate2::Compression;
use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use std::fmt;
use std::io::{self, Read, Write};

/// A lossless compress/decompress pair.
pub trait Compressor {
    fn compress(&self, bytes: &[u8]) -> io::Result<Vec<u8>>;
    fn decompress(&self, bytes: &[u8]) -> io::Result<Vec<u8>>;
}

/// zlib-wrapped DEFLATE, the format browser-side `pako.deflate` emits.
#[derive(Debug, Clone, Copy, Default)]
pub struct Zlib;

impl Compressor for Zlib {
    fn compress(&self, bytes: &[u8]) -> io::Result<Vec<u8>> {
        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(bytes)?;
        encoder.finish()
    }

    fn decompress(&self, bytes: &[u8]) -> io::Result<Vec<u8>> {
        let mut decoder = ZlibDecoder::new(bytes);
        let mut out = Vec::new();
        decoder.read_to_end(&mut out)?;
        if decoder.total_in() != bytes.len() as u64 {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "trailing data after zlib stream",
            ));
        }
        Ok(out)
    }
}

/// Adapts any pair of functions into a [`Compressor`].
#[derive(Clone, Copy)]
pub struct FnCompressor<E, D> {
    compress: E,
    decompress: D,
}

impl<E, D> FnCompressor<E, D>
where
    E: Fn(&[u8]) -> io::Result<Vec<u8>>,
    D: Fn(&[u8]) -> io::Result<Vec<u8>>,
{
    pub fn new(compress: E, decompress: D) -> Self {
        Self {
            compress,
            decompress,
        }
    }
}

impl<E, D> Compressor for FnCompressor<E, D>
where
    E: Fn(&[u8]) -> io::Result<Vec<u8>>,
    D: Fn(&[u8]) -> io::Result<Vec<u8>>,
{
    fn compress(&self, bytes: &[u8]) -> io::Result<Vec<u8>> {
        (self.compress)(bytes)
    }

    fn decompress(&self, bytes: &[u8]) -> io::Result<Vec<u8>> {
        (self.decompress)(bytes)
    }
}

impl<E, D> fmt::Debug for FnCompressor<E, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnCompressor").finish_non_exhaustive()
    }
}
