use anyhow::Context;
use gemini::models::{
    text_generation::{GenerateContentRequest, Part, TextGeneration},
    Models,
};
use util::{load_secrets, secret, workspace_dir};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let secrets = load_secrets(workspace_dir()?.join("Secrets.dev.toml"))?;
    let api_key = secret(&secrets, "GEMINI_API_KEY")
        .context("GEMINI_API_KEY was not found")?;

    let models = Models::new(
        "https://generativelanguage.googleapis.com/v1beta",
        "gemini-1.5-flash",
        Some(&api_key),
    )?;

    let result = models
        .generate_content(GenerateContentRequest::user(vec![Part::Text {
            text: "Write a two sentence story about a monsoon for grade 3."
                .to_string(),
        }]))
        .await?;

    println!("{:?}", result.text());

    Ok(())
}
