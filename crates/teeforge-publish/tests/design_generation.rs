//! Generation flow: prompt composition, the model call, and the
//! best-effort background removal pass.

use std::sync::Mutex;

use async_trait::async_trait;
use teeforge_publish::contracts::GeneratedImage;
use teeforge_publish::pipeline::generate_design;
use teeforge_publish::{BackgroundRemover, GenerationOptions, ImageGenerator, PublishError};

#[derive(Default)]
struct FakeGenerator {
    prompts: Mutex<Vec<String>>,
}

#[async_trait]
impl ImageGenerator for FakeGenerator {
    async fn generate(&self, prompt: &str) -> teeforge_publish::Result<GeneratedImage> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        Ok(GeneratedImage {
            url: "https://cdn.example/raw.png".into(),
        })
    }
}

#[derive(Default)]
struct FakeRemover {
    requests: Mutex<Vec<(String, String)>>,
    fail: bool,
}

#[async_trait]
impl BackgroundRemover for FakeRemover {
    async fn remove_background(
        &self,
        image: &str,
        description: &str,
    ) -> teeforge_publish::Result<GeneratedImage> {
        self.requests
            .lock()
            .unwrap()
            .push((image.to_string(), description.to_string()));
        if self.fail {
            return Err(PublishError::Api {
                status: 500,
                body: "Sprite extraction failed".into(),
            });
        }
        Ok(GeneratedImage {
            url: "https://cdn.example/cutout.png".into(),
        })
    }
}

#[tokio::test]
async fn generation_without_removal_returns_the_raw_image() {
    let generator = FakeGenerator::default();
    let image = generate_design(&generator, None, "a roaring tiger", &GenerationOptions::default())
        .await
        .unwrap();

    assert_eq!(image.url, "https://cdn.example/raw.png");
    let prompts = generator.prompts.lock().unwrap();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].starts_with("a roaring tiger"));
}

#[tokio::test]
async fn removal_swaps_in_the_cutout() {
    let generator = FakeGenerator::default();
    let remover = FakeRemover::default();
    let options = GenerationOptions {
        remove_background: true,
        ..GenerationOptions::default()
    };

    let image = generate_design(&generator, Some(&remover), "a roaring tiger", &options)
        .await
        .unwrap();

    assert_eq!(image.url, "https://cdn.example/cutout.png");
    let requests = remover.requests.lock().unwrap();
    assert_eq!(
        requests.as_slice(),
        [(
            "https://cdn.example/raw.png".to_string(),
            "main object".to_string()
        )]
    );
}

#[tokio::test]
async fn failed_removal_keeps_the_raw_image() {
    let generator = FakeGenerator::default();
    let remover = FakeRemover {
        fail: true,
        ..FakeRemover::default()
    };
    let options = GenerationOptions {
        remove_background: true,
        ..GenerationOptions::default()
    };

    let image = generate_design(&generator, Some(&remover), "a roaring tiger", &options)
        .await
        .unwrap();

    assert_eq!(image.url, "https://cdn.example/raw.png");
    assert_eq!(remover.requests.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn removal_requested_but_no_remover_available() {
    let generator = FakeGenerator::default();
    let options = GenerationOptions {
        remove_background: true,
        ..GenerationOptions::default()
    };

    let image = generate_design(&generator, None, "", &options).await.unwrap();
    assert_eq!(image.url, "https://cdn.example/raw.png");
    assert!(generator.prompts.lock().unwrap()[0].starts_with("A t-shirt design"));
}
