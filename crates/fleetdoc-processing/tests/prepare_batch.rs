//! Batch preparation behavior: per-file failure isolation and strict
//! sequential crop-dialog ordering.

use async_trait::async_trait;
use image::{ImageFormat, Rgba, RgbaImage};
use std::io::Cursor;

use fleetdoc_processing::{
    BatchOutcome, CropChoice, CropPreview, CropPrompt, CropRegion, DisplayedSize,
    ImageProcessingError, PreparerConfig, SourceImage, UploadPreparer,
};

fn png_source(name: &str, width: u32, height: u32) -> SourceImage {
    let img = RgbaImage::from_pixel(width, height, Rgba([90, 90, 30, 255]));
    let mut buffer = Vec::new();
    img.write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
        .unwrap();
    SourceImage {
        data: buffer,
        file_name: name.to_string(),
        content_type: "image/png".to_string(),
    }
}

fn corrupted_source(name: &str) -> SourceImage {
    SourceImage {
        data: b"\x89PNG but actually garbage".to_vec(),
        file_name: name.to_string(),
        content_type: "image/png".to_string(),
    }
}

/// Scripted crop dialog that records every open/resolve cycle.
struct ScriptedPrompt {
    choices: Vec<CropChoice>,
    seen: Vec<CropPreview>,
    open: bool,
}

impl ScriptedPrompt {
    fn new(choices: Vec<CropChoice>) -> Self {
        Self {
            choices,
            seen: Vec::new(),
            open: false,
        }
    }
}

#[async_trait]
impl CropPrompt for ScriptedPrompt {
    async fn resolve(&mut self, preview: &CropPreview) -> CropChoice {
        // The dialog is a single shared surface: a second open before the
        // first resolve would be a sequencing bug in the preparer.
        assert!(!self.open, "crop dialog opened while another was pending");
        self.open = true;
        self.seen.push(preview.clone());
        // Yield so an incorrectly concurrent preparer would interleave here.
        tokio::task::yield_now().await;
        let choice = self.choices.remove(0);
        self.open = false;
        choice
    }
}

async fn run(files: Vec<SourceImage>, prompt: &mut ScriptedPrompt) -> BatchOutcome {
    UploadPreparer::new(PreparerConfig::default())
        .prepare_batch(files, prompt)
        .await
}

#[tokio::test]
async fn corrupted_file_does_not_abort_siblings() {
    let files = vec![
        png_source("one.png", 300, 200),
        corrupted_source("two.png"),
        png_source("three.png", 300, 200),
    ];
    let mut prompt = ScriptedPrompt::new(vec![CropChoice::Skip, CropChoice::Skip]);

    let outcome = run(files, &mut prompt).await;

    assert_eq!(outcome.prepared.len(), 2);
    assert_eq!(outcome.prepared[0].file_name, "one.png");
    assert_eq!(outcome.prepared[1].file_name, "three.png");

    assert_eq!(outcome.failures.len(), 1);
    assert_eq!(outcome.failures[0].file_name, "two.png");
    assert_eq!(outcome.failures[0].index, 1);
    assert!(matches!(
        outcome.failures[0].error,
        ImageProcessingError::Decode(_)
    ));
    assert!(!outcome.is_fully_successful());

    // The undecodable file never got a dialog.
    let seen: Vec<&str> = prompt.seen.iter().map(|p| p.file_name.as_str()).collect();
    assert_eq!(seen, vec!["one.png", "three.png"]);
}

#[tokio::test]
async fn dialogs_open_strictly_in_selection_order() {
    let files = vec![
        png_source("a.png", 500, 400),
        png_source("b.png", 500, 400),
        png_source("c.png", 500, 400),
    ];
    let mut prompt = ScriptedPrompt::new(vec![
        CropChoice::Skip,
        CropChoice::Apply {
            region: CropRegion {
                x: 0.0,
                y: 0.0,
                width: 100.0,
                height: 100.0,
            },
            displayed: DisplayedSize {
                width: 250.0,
                height: 200.0,
            },
        },
        CropChoice::Skip,
    ]);

    let outcome = run(files, &mut prompt).await;

    assert!(outcome.is_fully_successful());
    assert_eq!(outcome.prepared.len(), 3);

    let indexes: Vec<usize> = prompt.seen.iter().map(|p| p.index).collect();
    assert_eq!(indexes, vec![0, 1, 2]);
    assert!(prompt.seen.iter().all(|p| p.total == 3));
    assert_eq!(prompt.seen[0].native_width, 500);
    assert_eq!(prompt.seen[0].native_height, 400);
}

#[tokio::test]
async fn skip_still_bounds_output_size() {
    let files = vec![png_source("wide.png", 3840, 2160)];
    let mut prompt = ScriptedPrompt::new(vec![CropChoice::Skip]);

    let outcome = run(files, &mut prompt).await;
    assert!(outcome.is_fully_successful());

    let prepared = &outcome.prepared[0];
    let img = image::ImageReader::new(Cursor::new(prepared.data.as_ref()))
        .with_guessed_format()
        .unwrap()
        .decode()
        .unwrap();
    assert!(img.width() <= 1920 && img.height() <= 1080);
    // Skip preserves the source format.
    assert_eq!(prepared.content_type, "image/png");
}

#[tokio::test]
async fn applied_crop_maps_preview_coordinates() {
    let files = vec![png_source("crop-me.png", 1000, 800)];
    let mut prompt = ScriptedPrompt::new(vec![CropChoice::Apply {
        region: CropRegion {
            x: 50.0,
            y: 40.0,
            width: 100.0,
            height: 80.0,
        },
        // Preview is a 5x downscale of the native image.
        displayed: DisplayedSize {
            width: 200.0,
            height: 160.0,
        },
    }]);

    let outcome = run(files, &mut prompt).await;
    assert!(outcome.is_fully_successful());

    let prepared = &outcome.prepared[0];
    assert_eq!(prepared.content_type, "image/jpeg");
    let img = image::ImageReader::new(Cursor::new(prepared.data.as_ref()))
        .with_guessed_format()
        .unwrap()
        .decode()
        .unwrap();
    assert_eq!((img.width(), img.height()), (500, 400));
}
