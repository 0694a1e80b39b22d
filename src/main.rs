use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use gemini_image_studio::ai::GeminiClient;
use gemini_image_studio::image::data_url::suggested_file_name;
use gemini_image_studio::image::{DataUrl, ImageInput};
use gemini_image_studio::models::{
    Config, ModelSet, DEFAULT_ANALYZE_MODEL, DEFAULT_IMAGEN_MODEL, DEFAULT_IMAGE_MODEL,
};
use gemini_image_studio::{ImageService, Studio};
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "gemini-image-studio")]
#[command(about = "Analyze, edit, and generate images with Gemini")]
struct CliArgs {
    #[command(subcommand)]
    command: Command,

    /// Model used to answer questions about an image.
    #[arg(long, global = true, default_value = DEFAULT_ANALYZE_MODEL)]
    analyze_model: String,

    /// Model used for edits and reference-image generation.
    #[arg(long, global = true, default_value = DEFAULT_IMAGE_MODEL)]
    image_model: String,

    /// Model used for text-to-image generation.
    #[arg(long, global = true, default_value = DEFAULT_IMAGEN_MODEL)]
    imagen_model: String,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Ask a question about an image and print the answer.
    Analyze {
        #[arg(short, long, value_name = "PATH")]
        image: PathBuf,
        prompt: String,
    },
    /// Edit an image according to a prompt.
    Edit {
        #[arg(short, long, value_name = "PATH")]
        image: PathBuf,
        prompt: String,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Generate an image from a prompt, optionally guided by a reference image.
    Generate {
        #[arg(short, long, value_name = "PATH")]
        image: Option<PathBuf>,
        prompt: String,
        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(Debug, Args)]
struct OutputArgs {
    /// Where to save the image (defaults to a name derived from the prompt).
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Print the data URL instead of saving the image.
    #[arg(long)]
    print_data_url: bool,
}

impl CliArgs {
    fn models(&self) -> ModelSet {
        ModelSet {
            analyze: self.analyze_model.clone(),
            image: self.image_model.clone(),
            imagen: self.imagen_model.clone(),
        }
    }
}

async fn emit_image(url: DataUrl, prompt: &str, output: OutputArgs) -> Result<()> {
    if output.print_data_url {
        println!("{}", url);
        return Ok(());
    }

    let path = output
        .output
        .unwrap_or_else(|| PathBuf::from(suggested_file_name(prompt)));
    url.write_to(&path).await?;
    info!("Saved {} image to {}", url.mime_type, path.display());
    println!("{}", path.display());
    Ok(())
}

async fn run(args: CliArgs) -> Result<()> {
    let config = Config::from_env()?;
    let studio = Studio::with_models(Box::new(GeminiClient::from_config(&config)), args.models());

    match args.command {
        Command::Analyze { image, prompt } => {
            let image = ImageInput::from_path(&image).await?;
            let answer = studio.analyze(&prompt, Some(&image)).await?;
            println!("{}", answer);
        }
        Command::Edit {
            image,
            prompt,
            output,
        } => {
            let image = ImageInput::from_path(&image).await?;
            let url = studio.edit(&prompt, Some(&image)).await?;
            emit_image(url, &prompt, output).await?;
        }
        Command::Generate {
            image,
            prompt,
            output,
        } => {
            let image = match image {
                Some(path) => Some(ImageInput::from_path(&path).await?),
                None => None,
            };
            let url = studio.generate(&prompt, image.as_ref()).await?;
            emit_image(url, &prompt, output).await?;
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gemini_image_studio=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = CliArgs::parse();

    match run(args).await {
        Ok(()) => Ok(()),
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    }
}
