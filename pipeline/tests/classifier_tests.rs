//! Integration tests for the classification pipeline.
//!
//! Inference is provided by stub engines; everything else (artifact loading,
//! preprocessing, memoization, label resolution) is the real code path.

use async_trait::async_trait;
use bytes::Bytes;
use common::CraftId;
use image::{DynamicImage, ImageOutputFormat, Rgb, RgbImage};
use lens_model_cache::{ModelArtifacts, ModelBundle};
use lens_pipeline::{
    ClassificationResult, Classifier, ImageModel, ImageTensor, InferenceEngine, ModelSource,
    PipelineError, Prediction, Result, TeachableModelSource,
};
use std::io::Cursor;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

// === Fixtures ===

const LABELS: [&str; 6] = [
    "Channapatna Toys",
    "Jaipur Blue Pottery",
    "Warli Art",
    "Kolam Art",
    "Madhubani Art",
    "Background",
];

fn write_export(root: &Path) {
    let dir = root.join("model");
    std::fs::create_dir_all(&dir).unwrap();
    let metadata = serde_json::json!({ "labels": LABELS, "imageSize": 32 });
    std::fs::write(dir.join("metadata.json"), metadata.to_string()).unwrap();
    std::fs::write(
        dir.join("model.json"),
        r#"{"modelTopology": {}, "weightsManifest": [{"paths": ["weights.bin"],
            "weights": [{"name": "head/bias", "shape": [6], "dtype": "float32"}]}]}"#,
    )
    .unwrap();
    std::fs::write(dir.join("weights.bin"), vec![0u8; 24]).unwrap();
}

fn photo() -> Bytes {
    let mut out = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(RgbImage::from_pixel(40, 30, Rgb([120, 80, 200])))
        .write_to(&mut out, ImageOutputFormat::Png)
        .unwrap();
    Bytes::from(out.into_inner())
}

struct FixedEngine(Vec<f32>);

#[async_trait]
impl InferenceEngine for FixedEngine {
    async fn infer(&self, input: &ImageTensor) -> Result<Vec<f32>> {
        assert_eq!(input.shape(), [1, 32, 32, 3]);
        Ok(self.0.clone())
    }
}

fn classifier_with_scores(root: &Path, scores: Vec<f32>) -> Classifier {
    let factory = move |_bundle: &ModelBundle| -> Result<Arc<dyn InferenceEngine>> {
        Ok(Arc::new(FixedEngine(scores.clone())))
    };
    let source = TeachableModelSource::new(ModelArtifacts::new(root), Arc::new(factory));
    Classifier::new(Arc::new(source))
}

/// Source that counts loads and can be made slow.
struct CountingSource {
    loads: Arc<AtomicUsize>,
    delay: Duration,
    predictions: Vec<Prediction>,
}

struct StaticModel {
    labels: Vec<String>,
    predictions: Vec<Prediction>,
}

#[async_trait]
impl ImageModel for StaticModel {
    fn labels(&self) -> &[String] {
        &self.labels
    }

    async fn predict(&self, _image: Bytes) -> Result<ClassificationResult> {
        Ok(ClassificationResult::new(self.predictions.clone()))
    }
}

#[async_trait]
impl ModelSource for CountingSource {
    async fn load(&self) -> Result<Arc<dyn ImageModel>> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(self.delay).await;
        Ok(Arc::new(StaticModel {
            labels: self.predictions.iter().map(|p| p.label.clone()).collect(),
            predictions: self.predictions.clone(),
        }))
    }
}

// === Tests ===

#[tokio::test]
async fn test_classify_from_exported_model() {
    let temp = TempDir::new().unwrap();
    write_export(temp.path());
    let classifier = classifier_with_scores(temp.path(), vec![0.05, 0.05, 0.8, 0.05, 0.03, 0.02]);

    let craft = classifier.classify(photo()).await.expect("classification should succeed");
    assert_eq!(craft, Some(CraftId::Warli));
}

#[tokio::test]
async fn test_background_is_no_match() {
    let temp = TempDir::new().unwrap();
    write_export(temp.path());
    let classifier = classifier_with_scores(temp.path(), vec![0.0, 0.0, 0.0, 0.0, 0.01, 0.99]);

    assert_eq!(classifier.classify(photo()).await.unwrap(), None);
}

#[tokio::test]
async fn test_missing_model_is_soft() {
    let temp = TempDir::new().unwrap();
    let classifier = classifier_with_scores(temp.path(), vec![1.0; 6]);

    assert!(classifier.load().await.is_none());
    assert_eq!(classifier.classify(photo()).await.unwrap(), None);
    assert_eq!(classifier.predict(photo()).await.unwrap(), None);

    // nothing was cached, so every call retried
    assert_eq!(classifier.load_attempts(), 3);

    // once the files appear the next call succeeds and is cached
    write_export(temp.path());
    assert!(classifier.load().await.is_some());
    assert!(classifier.load().await.is_some());
    assert_eq!(classifier.load_attempts(), 4);
}

#[tokio::test]
async fn test_engine_output_must_match_labels() {
    let temp = TempDir::new().unwrap();
    write_export(temp.path());
    let classifier = classifier_with_scores(temp.path(), vec![0.5, 0.5]);

    let err = classifier.classify(photo()).await.unwrap_err();
    assert!(matches!(err, PipelineError::OutputMismatch { expected: 6, actual: 2 }));
}

#[tokio::test]
async fn test_undecodable_image_is_an_error() {
    let temp = TempDir::new().unwrap();
    write_export(temp.path());
    let classifier = classifier_with_scores(temp.path(), vec![1.0; 6]);

    let err = classifier.classify(Bytes::from_static(b"GIF89a?")).await.unwrap_err();
    assert!(matches!(err, PipelineError::Decode(_)));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_concurrent_classify_loads_once() {
    let loads = Arc::new(AtomicUsize::new(0));
    let source = CountingSource {
        loads: loads.clone(),
        delay: Duration::from_millis(50),
        predictions: vec![Prediction::new("Kolam Art", 0.9), Prediction::new("Background", 0.1)],
    };
    let classifier = Arc::new(Classifier::new(Arc::new(source)));

    let a = tokio::spawn({
        let classifier = classifier.clone();
        async move { classifier.classify(photo()).await }
    });
    let b = tokio::spawn({
        let classifier = classifier.clone();
        async move { classifier.classify(photo()).await }
    });

    assert_eq!(a.await.unwrap().unwrap(), Some(CraftId::Kolam));
    assert_eq!(b.await.unwrap().unwrap(), Some(CraftId::Kolam));
    assert_eq!(loads.load(Ordering::SeqCst), 1);
    assert_eq!(classifier.load_attempts(), 1);
}
