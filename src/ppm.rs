//! Plain-text PPM (P3) output.

use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};

use thiserror::Error;

use crate::FrameBuffer;

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("cannot open output destination {}: {source}", path.display())]
    Create { path: PathBuf, source: io::Error },
    #[error("failed writing image to {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },
}

pub fn write_ppm<W: Write>(frame: &FrameBuffer, out: &mut W) -> io::Result<()> {
    writeln!(out, "P3")?;
    writeln!(out, "{} {}", frame.width(), frame.height())?;
    writeln!(out, "255")?;
    for y in 0..frame.height() {
        for [r, g, b] in frame.row(y) {
            writeln!(out, "{} {} {}", r, g, b)?;
        }
    }
    out.flush()
}

pub fn save_ppm(frame: &FrameBuffer, path: impl AsRef<Path>) -> Result<(), OutputError> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|source| OutputError::Create {
        path: path.to_path_buf(),
        source,
    })?;
    write_ppm(frame, &mut BufWriter::new(file)).map_err(|source| OutputError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    log::info!("wrote {}x{} image to {}", frame.width(), frame.height(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_by_two() -> FrameBuffer {
        let mut frame = FrameBuffer::new(2, 2).unwrap();
        frame.set_pixel(0, 0, [255u8, 0, 0]);
        frame.set_pixel(1, 0, [0u8, 255, 0]);
        frame.set_pixel(0, 1, [0u8, 0, 255]);
        frame.set_pixel(1, 1, [1u8, 2, 3]);
        frame
    }

    #[test]
    fn writes_header_then_raster_order() {
        let mut out = Vec::new();
        write_ppm(&two_by_two(), &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "P3\n2 2\n255\n255 0 0\n0 255 0\n0 0 255\n1 2 3\n");
    }

    #[test]
    fn saves_to_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("image.ppm");

        save_ppm(&two_by_two(), &path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("P3\n2 2\n255\n"));
        assert_eq!(text.lines().count(), 7);
    }

    #[test]
    fn missing_directory_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("image.ppm");

        let err = save_ppm(&two_by_two(), &path).unwrap_err();
        assert!(matches!(err, OutputError::Create { .. }));
        assert!(err.to_string().contains("cannot open output destination"));
    }
}
