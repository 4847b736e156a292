//! Image generation command: one-shot or one image per typed line.

use std::io::Write;
use std::path::{Path, PathBuf};

use curtis_ai::{AiError, GeneratedImage, ImageClient, ImageSession, RequestKind};
use curtis_common::CurtisError;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

use crate::cli::ImageArgs;

/// Where to save the `index`-th image of this run.
pub fn output_path(output: Option<&Path>, image: &GeneratedImage, index: usize) -> PathBuf {
    match output {
        Some(path) => path.to_path_buf(),
        None => PathBuf::from(format!("curtis-image-{index}.{}", image.extension())),
    }
}

fn save(path: &Path, image: &GeneratedImage) -> Result<(), CurtisError> {
    std::fs::write(path, &image.bytes)?;
    info!(path = %path.display(), size = image.bytes.len(), "image saved");
    println!("{} -> {}", image.caption, path.display());
    Ok(())
}

fn report(client: &ImageClient, err: &AiError) -> String {
    warn!("image generation failed: {err}");
    err.user_message(RequestKind::Image, client.address())
}

pub async fn run(
    client: ImageClient,
    seed: u32,
    args: &ImageArgs,
) -> Result<(), CurtisError> {
    let mut session = ImageSession::new(seed);

    if !args.prompt.is_empty() {
        let prompt = args.prompt.join(" ");
        return match session.generate(&client, &prompt).await {
            Ok(Some(image)) => save(&output_path(args.output.as_deref(), &image, 1), &image),
            Ok(None) => Err(CurtisError::Other("empty prompt".into())),
            Err(e) => Err(CurtisError::Ai(report(&client, &e))),
        };
    }

    println!("Real-Time Image Generator (one prompt per line, Ctrl-D to quit)");
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut count = 0;
    loop {
        print!("prompt> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            println!();
            break;
        };

        match session.generate(&client, &line).await {
            Ok(Some(image)) => {
                count += 1;
                save(&output_path(args.output.as_deref(), &image, count), &image)?;
            }
            Ok(None) => {}
            Err(e) => eprintln!("Error: {}", report(&client, &e)),
        }
    }
    Ok(())
}
