use std::io::Cursor;

use anyhow::Context;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::{ImageFormat, Rgb, RgbImage};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    pipeline::run_prose, GenerationError, LanguageModel, Operation, Prompt,
};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EducationalImageRequest {
    pub prompt: String,
    pub aspect_ratio: String,
    pub style: String,
    pub subject: String,
    pub grade: String,
    pub language: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EducationalImageResponse {
    pub image_base64: String,
    pub prompt: String,
    pub metadata: ImageMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ImageMetadata {
    pub style: String,
    pub aspect_ratio: String,
    pub subject: String,
    pub grade: String,
    pub description: String,
}

pub fn dimensions(aspect_ratio: &str) -> (u32, u32) {
    match aspect_ratio.trim() {
        "16:9" => (768, 432),
        "4:3" => (640, 480),
        "3:4" => (480, 640),
        "9:16" => (432, 768),
        _ => (512, 512),
    }
}

fn palette(style: &str) -> (Rgb<u8>, Rgb<u8>) {
    match style.trim().to_lowercase().as_str() {
        "cartoon" => (Rgb([255, 214, 102]), Rgb([239, 71, 111])),
        "realistic" => (Rgb([204, 227, 222]), Rgb([46, 82, 102])),
        "diagram" => (Rgb([250, 250, 250]), Rgb([33, 97, 140])),
        "sketch" => (Rgb([245, 240, 230]), Rgb([60, 60, 60])),
        "watercolor" => (Rgb([214, 234, 248]), Rgb([125, 60, 152])),
        _ => (Rgb([232, 245, 233]), Rgb([56, 142, 60])),
    }
}

/// Renders a framed placeholder card: vertical gradient, border, and a
/// band per line of `description` so different prompts look different.
pub fn render_placeholder(
    aspect_ratio: &str,
    style: &str,
    description: &str,
) -> anyhow::Result<Vec<u8>> {
    let (width, height) = dimensions(aspect_ratio);
    let (background, accent) = palette(style);
    let border = (width.min(height) / 32).max(2);
    let bands = description.lines().filter(|l| !l.trim().is_empty()).count();
    let bands = bands.clamp(1, 6) as u32;
    let band_height = height / (bands * 2 + 2);

    let image = RgbImage::from_fn(width, height, |x, y| {
        let on_border = x < border
            || y < border
            || x >= width - border
            || y >= height - border;
        if on_border {
            return accent;
        }

        let band = y / band_height.max(1);
        if band % 2 == 1 && band <= bands * 2 && x > width / 8 && x < width * 7 / 8 {
            return blend(background, accent, 0.35);
        }

        blend(background, accent, y as f32 / height as f32 * 0.15)
    });

    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .context("failed to encode placeholder image")?;

    Ok(bytes)
}

fn blend(from: Rgb<u8>, to: Rgb<u8>, amount: f32) -> Rgb<u8> {
    let mix = |a: u8, b: u8| {
        (a as f32 + (b as f32 - a as f32) * amount).round() as u8
    };
    Rgb([
        mix(from[0], to[0]),
        mix(from[1], to[1]),
        mix(from[2], to[2]),
    ])
}

pub fn placeholder_base64(
    aspect_ratio: &str,
    style: &str,
    description: &str,
) -> anyhow::Result<String> {
    Ok(STANDARD.encode(render_placeholder(aspect_ratio, style, description)?))
}

pub fn image_description_prompt(request: &EducationalImageRequest) -> Prompt {
    format!(
        r#"You are helping a teacher prepare a classroom illustration.
Describe, in {language}, the educational image below so it could be drawn by hand.
Image request: {prompt}
Subject: {subject}
Grade: {grade}
Style: {style}
Aspect ratio: {aspect_ratio}

Write 3 to 5 short lines: the main scene, the labelled parts, and the key learning point.
Respond with the description only."#,
        language = request.language,
        prompt = request.prompt,
        subject = request.subject,
        grade = request.grade,
        style = request.style,
        aspect_ratio = request.aspect_ratio,
    )
    .into()
}

/// The picture itself is a locally rendered placeholder; only its
/// description comes from the model.
pub async fn generate_educational_image<M: LanguageModel>(
    model: &M,
    request: &EducationalImageRequest,
) -> Result<EducationalImageResponse, GenerationError> {
    let operation = Operation::GenerateEducationalImage;
    let description =
        run_prose(model, operation, image_description_prompt(request)).await?;

    let image_base64 =
        placeholder_base64(&request.aspect_ratio, &request.style, &description)
            .map_err(|e| GenerationError::new(operation, e))?;

    Ok(EducationalImageResponse {
        image_base64,
        prompt: request.prompt.clone(),
        metadata: ImageMetadata {
            style: request.style.clone(),
            aspect_ratio: request.aspect_ratio.clone(),
            subject: request.subject.clone(),
            grade: request.grade.clone(),
            description,
        },
    })
}
