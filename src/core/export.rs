use crate::core::Storage;
use crate::domain::model::{FinancingScenario, Presentation};
use crate::render::markdown::{render_document, ImageRef};
use crate::utils::error::{PresenterError, Result};
use base64::engine::general_purpose::STANDARD as BASE64_STANDARD;
use base64::Engine;
use std::io::Write;
use zip::write::{SimpleFileOptions, ZipWriter};

pub const MARKDOWN_FILE: &str = "presentation.md";
pub const JSON_FILE: &str = "presentation.json";
pub const FINANCING_CSV_FILE: &str = "financing.csv";
pub const IMAGE_FILE_STEM: &str = "lifestyle";
pub const BUNDLE_FILE: &str = "presentation.zip";

/// Decoded `data:<mime>;base64,<payload>` URL.
#[derive(Debug, Clone, PartialEq)]
pub struct DataUrl {
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl DataUrl {
    pub fn file_extension(&self) -> &'static str {
        match self.mime_type.as_str() {
            "image/png" => "png",
            "image/webp" => "webp",
            _ => "jpg",
        }
    }
}

/// Returns `Ok(None)` for anything that is not a base64 data URL.
pub fn decode_data_url(url: &str) -> Result<Option<DataUrl>> {
    let Some(rest) = url.strip_prefix("data:") else {
        return Ok(None);
    };
    let Some((header, payload)) = rest.split_once(',') else {
        return Err(PresenterError::ProcessingError {
            message: "Data URL has no payload separator".to_string(),
        });
    };
    let Some(mime_type) = header.strip_suffix(";base64") else {
        return Ok(None);
    };

    Ok(Some(DataUrl {
        mime_type: mime_type.to_string(),
        bytes: BASE64_STANDARD.decode(payload)?,
    }))
}

pub fn financing_csv(scenarios: &[FinancingScenario]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["option", "pros", "cons", "best_for"])?;
    for scenario in scenarios {
        writer.write_record([
            scenario.option.as_str(),
            scenario.pros.join("; ").as_str(),
            scenario.cons.join("; ").as_str(),
            scenario.best_for.as_str(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| PresenterError::ProcessingError {
            message: format!("Failed to flush CSV writer: {}", e),
        })?;
    String::from_utf8(bytes).map_err(|e| PresenterError::ProcessingError {
        message: format!("CSV output is not UTF-8: {}", e),
    })
}

/// Writes a generated presentation through a `Storage` backend, either as
/// loose files or bundled into a single zip archive.
pub struct PresentationExporter<S: Storage> {
    storage: S,
    compress: bool,
}

impl<S: Storage> PresentationExporter<S> {
    pub fn new(storage: S, compress: bool) -> Self {
        Self { storage, compress }
    }

    /// Returns the location of the zip bundle, or of the Markdown file when
    /// exporting loose files.
    pub async fn export(&self, presentation: &Presentation) -> Result<String> {
        let files = self.build_files(presentation)?;
        tracing::debug!("Exporting {} presentation files", files.len());

        if self.compress {
            let bundle = Self::zip_files(&files)?;
            tracing::debug!("Writing zip bundle ({} bytes)", bundle.len());
            self.storage.write_file(BUNDLE_FILE, &bundle).await?;
            return Ok(self.storage.locate(BUNDLE_FILE));
        }

        for (name, data) in &files {
            self.storage.write_file(name, data).await?;
        }
        Ok(self.storage.locate(MARKDOWN_FILE))
    }

    fn build_files(&self, presentation: &Presentation) -> Result<Vec<(String, Vec<u8>)>> {
        let mut files = Vec::new();

        let image = decode_data_url(&presentation.image_url)?;
        let image_ref = match &image {
            Some(data_url) => {
                let name = format!("{}.{}", IMAGE_FILE_STEM, data_url.file_extension());
                files.push((name.clone(), data_url.bytes.clone()));
                ImageRef::File(name)
            }
            None if presentation.image_url.is_empty() => ImageRef::None,
            None => ImageRef::Url(presentation.image_url.clone()),
        };

        files.push((
            MARKDOWN_FILE.to_string(),
            render_document(presentation, &image_ref).into_bytes(),
        ));

        // 圖片以檔案輸出，JSON 內不重複保存 base64 內容
        let mut json_view = presentation.clone();
        if let ImageRef::File(name) = &image_ref {
            json_view.image_url = name.clone();
        }
        files.push((
            JSON_FILE.to_string(),
            serde_json::to_string_pretty(&json_view)?.into_bytes(),
        ));

        if !presentation.financing_scenarios.is_empty() {
            files.push((
                FINANCING_CSV_FILE.to_string(),
                financing_csv(&presentation.financing_scenarios)?.into_bytes(),
            ));
        }

        Ok(files)
    }

    fn zip_files(files: &[(String, Vec<u8>)]) -> Result<Vec<u8>> {
        let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));
        for (name, data) in files {
            zip.start_file(name.as_str(), SimpleFileOptions::default())?;
            zip.write_all(data)?;
        }
        let cursor = zip.finish()?;
        Ok(cursor.into_inner())
    }
}
