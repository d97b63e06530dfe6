//! QR code generation.
//!
//! Encodes a payload at error-correction level L, renders it as a two-colour
//! PNG and writes it to `<output_dir>/<filename>`. All failures collapse into a
//! single non-zero status at the [`run`] boundary.

mod color;

pub use color::parse_color;

use std::fs;
use std::path::PathBuf;

use image::{ImageFormat, Rgb, RgbImage};
use qrcode::{Color, EcLevel, QrCode};
use tracing::{debug, error, info};

use crate::constants;

/// Exit status reported on success.
pub const EXIT_SUCCESS: u8 = 0;
/// Exit status reported on any failure.
pub const EXIT_FAILURE: u8 = 1;

/// Everything needed to produce one QR image.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QrSettings {
    /// Payload encoded into the symbol.
    pub data: String,
    /// Directory the image is written to; created if missing.
    pub output_dir: PathBuf,
    /// File name of the image inside `output_dir`.
    pub filename: String,
    /// Colour of dark modules.
    pub fill_color: String,
    /// Colour of light modules and the quiet zone.
    pub back_color: String,
}

impl Default for QrSettings {
    fn default() -> Self {
        Self {
            data: constants::DEFAULT_QR_DATA_URL.to_string(),
            output_dir: PathBuf::from(constants::DEFAULT_QR_CODE_DIR),
            filename: constants::DEFAULT_QR_CODE_FILENAME.to_string(),
            fill_color: constants::DEFAULT_FILL_COLOR.to_string(),
            back_color: constants::DEFAULT_BACK_COLOR.to_string(),
        }
    }
}

impl QrSettings {
    /// Full path of the image this configuration produces.
    #[must_use]
    pub fn image_path(&self) -> PathBuf {
        self.output_dir.join(&self.filename)
    }
}

/// Failures while generating a QR image.
#[derive(Debug, thiserror::Error)]
pub enum QrError {
    #[error("failed to create directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to encode data: {0}")]
    Encode(#[from] qrcode::types::QrError),
    #[error("invalid color: {0}")]
    InvalidColor(String),
    #[error("failed to write image {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// Render the configured payload into an RGB image.
///
/// Each module is [`constants::QR_BOX_SIZE`] pixels wide and the symbol is
/// surrounded by a [`constants::QR_BORDER`]-module quiet zone.
///
/// # Errors
///
/// Returns [`QrError::InvalidColor`] for an unrecognised colour and
/// [`QrError::Encode`] if the payload does not fit any QR version.
pub fn render(settings: &QrSettings) -> Result<RgbImage, QrError> {
    let fill = parse_color(&settings.fill_color)
        .ok_or_else(|| QrError::InvalidColor(settings.fill_color.clone()))?;
    let back = parse_color(&settings.back_color)
        .ok_or_else(|| QrError::InvalidColor(settings.back_color.clone()))?;

    let code = QrCode::with_error_correction_level(settings.data.as_bytes(), EcLevel::L)?;
    debug!(version = ?code.version(), width = code.width(), "Encoded QR payload");

    Ok(paint(&code, fill, back))
}

fn paint(code: &QrCode, fill: Rgb<u8>, back: Rgb<u8>) -> RgbImage {
    let box_size = constants::QR_BOX_SIZE;
    let border = constants::QR_BORDER;
    // QR symbols are at most 177 modules wide.
    let modules = u32::try_from(code.width()).unwrap_or_default();
    let side = (modules + 2 * border) * box_size;

    let mut img = RgbImage::from_pixel(side, side, back);

    for y in 0..modules {
        for x in 0..modules {
            if code[(x as usize, y as usize)] != Color::Dark {
                continue;
            }
            let x0 = (x + border) * box_size;
            let y0 = (y + border) * box_size;
            for dy in 0..box_size {
                for dx in 0..box_size {
                    img.put_pixel(x0 + dx, y0 + dy, fill);
                }
            }
        }
    }

    img
}

/// Generate the QR image described by `settings` and write it to disk.
///
/// # Errors
///
/// Fails if the output directory cannot be created, the payload cannot be
/// encoded, a colour is invalid, or the image cannot be written.
pub fn generate(settings: &QrSettings) -> Result<PathBuf, QrError> {
    // create_dir_all treats "" as already existing.
    let created = if settings.output_dir.as_os_str().is_empty() {
        Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "output directory is empty",
        ))
    } else {
        fs::create_dir_all(&settings.output_dir)
    };
    created.map_err(|source| QrError::CreateDir {
        path: settings.output_dir.clone(),
        source,
    })?;

    let img = render(settings)?;
    let path = settings.image_path();

    img.save_with_format(&path, ImageFormat::Png)
        .map_err(|source| QrError::Write {
            path: path.clone(),
            source,
        })?;

    info!("{}{}", constants::MSG_QR_SUCCESS, path.display());
    Ok(path)
}

/// Generate the image and translate the outcome into a process exit status.
///
/// Errors are logged with their full cause chain; nothing is retried and
/// partially created directories are left in place.
pub fn run(settings: &QrSettings) -> u8 {
    match generate(settings) {
        Ok(_) => EXIT_SUCCESS,
        Err(err) => report_failure(err),
    }
}

/// Log a QR failure with its cause chain and return [`EXIT_FAILURE`].
///
/// Used for settings that could not be resolved as well as for [`generate`]
/// errors, so every failure produces the same log line.
pub fn report_failure<E>(err: E) -> u8
where
    E: std::error::Error + Send + Sync + 'static,
{
    let message = err.to_string();
    let report = color_eyre::Report::new(err);
    error!(error = ?report, "{}{message}", constants::MSG_QR_ERROR);
    EXIT_FAILURE
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::{Arc, Mutex};
    use tempfile::tempdir;

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl CapturedLogs {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).to_string()
        }
    }

    fn run_captured(settings: &QrSettings) -> (u8, String) {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        let code = tracing::subscriber::with_default(subscriber, || run(settings));
        (code, logs.contents())
    }

    fn settings_in(dir: &std::path::Path) -> QrSettings {
        QrSettings {
            output_dir: dir.join(constants::DEFAULT_QR_CODE_DIR),
            ..QrSettings::default()
        }
    }

    #[test]
    fn test_default_settings() {
        let settings = QrSettings::default();
        assert_eq!(settings.data, "https://github.com/kaw393939");
        assert_eq!(settings.image_path(), PathBuf::from("qr_codes/github_qr.png"));
        assert_eq!(settings.fill_color, "black");
        assert_eq!(settings.back_color, "white");
    }

    #[test]
    fn test_default_generation_writes_one_file() {
        let tmp = tempdir().unwrap();
        let settings = settings_in(tmp.path());

        let (code, logs) = run_captured(&settings);

        assert_eq!(code, EXIT_SUCCESS);
        let files: Vec<_> = fs::read_dir(&settings.output_dir)
            .unwrap()
            .flatten()
            .collect();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].file_name(), "github_qr.png");
        assert!(logs.contains("QR code generated successfully at"));
        assert!(logs.contains("github_qr.png"));
    }

    #[test]
    fn test_custom_settings() {
        let tmp = tempdir().unwrap();
        let settings = QrSettings {
            data: "https://google.com".to_string(),
            output_dir: tmp.path().join("custom_dir"),
            filename: "custom.png".to_string(),
            fill_color: "blue".to_string(),
            back_color: "white".to_string(),
        };

        assert_eq!(run(&settings), EXIT_SUCCESS);
        assert!(tmp.path().join("custom_dir/custom.png").is_file());
    }

    #[test]
    fn test_css_color_names() {
        let tmp = tempdir().unwrap();
        for name in ["darkblue", "lightgray", "darkgreen", "crimson", "gold"] {
            let settings = QrSettings {
                fill_color: name.to_string(),
                filename: format!("{name}.png"),
                ..settings_in(tmp.path())
            };
            assert_eq!(run(&settings), EXIT_SUCCESS, "fill color {name}");
        }
    }

    #[test]
    fn test_empty_output_dir_fails() {
        let settings = QrSettings {
            output_dir: PathBuf::new(),
            ..QrSettings::default()
        };

        let (code, logs) = run_captured(&settings);

        assert_eq!(code, EXIT_FAILURE);
        assert!(logs.contains("Error generating QR code: failed to create directory"));
    }

    #[test]
    fn test_image_geometry_and_colors() {
        let settings = QrSettings {
            fill_color: "blue".to_string(),
            ..QrSettings::default()
        };
        let img = render(&settings).unwrap();
        let code = QrCode::with_error_correction_level(settings.data.as_bytes(), EcLevel::L)
            .unwrap();
        let expected = (u32::try_from(code.width()).unwrap() + 8) * 10;

        assert_eq!(img.width(), expected);
        assert_eq!(img.height(), expected);
        // Quiet zone is background, finder pattern corner is foreground.
        assert_eq!(*img.get_pixel(0, 0), Rgb([255, 255, 255]));
        assert_eq!(*img.get_pixel(40, 40), Rgb([0, 0, 255]));
    }

    #[test]
    fn test_written_file_is_png() {
        let tmp = tempdir().unwrap();
        let settings = settings_in(tmp.path());
        let path = generate(&settings).unwrap();

        let bytes = fs::read(path).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn test_directory_creation_failure() {
        let tmp = tempdir().unwrap();
        let blocker = tmp.path().join("not_a_dir");
        fs::write(&blocker, "file").unwrap();
        let settings = QrSettings {
            output_dir: blocker.join("nested"),
            ..QrSettings::default()
        };

        let (code, logs) = run_captured(&settings);

        assert_eq!(code, EXIT_FAILURE);
        assert!(logs.contains("Error generating QR code: failed to create directory"));
    }

    #[test]
    fn test_render_failure() {
        let tmp = tempdir().unwrap();
        let settings = QrSettings {
            fill_color: "notacolor".to_string(),
            ..settings_in(tmp.path())
        };

        let (code, logs) = run_captured(&settings);

        assert_eq!(code, EXIT_FAILURE);
        assert!(logs.contains("Error generating QR code: invalid color: notacolor"));
        assert!(!settings.image_path().exists());
    }

    #[test]
    fn test_payload_too_large() {
        let settings = QrSettings {
            data: "x".repeat(4000),
            ..QrSettings::default()
        };
        assert!(matches!(render(&settings), Err(QrError::Encode(_))));
    }
}
