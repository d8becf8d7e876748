use clap::{Parser, ValueEnum};
use explainer::common::{PipelineOutput, ProcessingMode};
use explainer::extract::ExtractConfig;
use explainer::image2text::{OcrConfig, TesseractEngine};
use explainer::image_utils::PreprocessConfig;
use explainer::logger::init_logger_exe;
use explainer::pipeline::{Pipeline, PipelineConfig};
use explainer::process::{ProcessorConfig, DEFAULT_CHUNK_SIZE};
use explainer::text2text::{create_generator, ModelBackend, ModelConfig};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    Explain,
    Summarize,
}

impl From<ModeArg> for ProcessingMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Explain => ProcessingMode::Explain,
            ModeArg::Summarize => ProcessingMode::Summarize,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum BackendArg {
    HuggingFace,
    ChatCompletions,
}

impl From<BackendArg> for ModelBackend {
    fn from(backend: BackendArg) -> Self {
        match backend {
            BackendArg::HuggingFace => ModelBackend::HuggingFace,
            BackendArg::ChatCompletions => ModelBackend::ChatCompletions,
        }
    }
}

#[derive(Parser)]
#[command(version, about = "Extract the text of an image and explain or summarize it", long_about = None)]
struct Cli {
    #[arg(long, help = "input image (jpg, jpeg, png, bmp, tiff)")]
    image: Option<PathBuf>,
    #[arg(long, value_enum, help = "what to do with the extracted text", default_value_t = ModeArg::Explain)]
    mode: ModeArg,
    #[arg(long, help = "maximum characters sent to the model per call", default_value_t = DEFAULT_CHUNK_SIZE)]
    chunk_size: usize,
    #[arg(long, value_enum, help = "model serving API", default_value_t = BackendArg::HuggingFace)]
    backend: BackendArg,
    #[arg(long, help = "model name (defaults depend on the mode)")]
    model: Option<String>,
    #[arg(long, help = "base URL of the model serving API")]
    model_url: Option<String>,
    #[arg(long, help = "API key (defaults to HF_API_TOKEN or OPENAI_API_KEY)")]
    api_key: Option<String>,
    #[arg(long, help = "tesseract language", default_value = "eng")]
    lang: String,
    #[arg(long, help = "tesseract dots per inch")]
    dpi: Option<u32>,
    #[arg(long, help = "tesseract page segmentation mode")]
    psm: Option<u32>,
    #[arg(long, help = "tesseract OCR engine mode")]
    oem: Option<u32>,
    #[arg(long, help = "skip grayscale and inversion before OCR", default_value_t = false)]
    no_preprocess: bool,
    #[arg(long, help = "print the result as JSON", default_value_t = false)]
    json: bool,
}

impl Cli {
    fn pipeline_config(&self) -> PipelineConfig {
        let mode = ProcessingMode::from(self.mode);
        let ocr_config = OcrConfig::new(Some(self.lang.clone()), self.dpi, self.psm, self.oem);
        let preprocess = if self.no_preprocess {
            PreprocessConfig::default()
        } else {
            PreprocessConfig::for_mode(mode)
        };

        PipelineConfig::new(
            ExtractConfig::new(ocr_config, preprocess),
            ProcessorConfig::for_mode(mode).with_chunk_size(self.chunk_size),
            true,
        )
    }

    fn model_config(&self) -> ModelConfig {
        ModelConfig::new(
            self.backend.into(),
            self.model_url.clone(),
            self.api_key.clone(),
            self.model.clone(),
        )
        .with_env_api_key()
    }
}

fn print_panes(output: &PipelineOutput) {
    println!("Extracted Text:");
    println!("{}", output.extracted_text.trim_end());
    println!();
    println!("{}:", output.mode.output_label());
    println!("{}", output.output);
}

#[tokio::main]
async fn main() -> ExitCode {
    init_logger_exe();
    let cli = Cli::parse();

    let config = cli.pipeline_config();
    let generator = match create_generator(&cli.model_config(), config.mode()) {
        Ok(generator) => generator,
        Err(e) => {
            log::error!("Failed to set up the model: {:?}", e);
            eprintln!("Error: could not set up the language model: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let pipeline = Pipeline::new(config, Arc::new(TesseractEngine::new()), generator);

    match pipeline.run_selected(cli.image.as_deref()).await {
        Ok(output) => {
            if cli.json {
                match serde_json::to_string_pretty(&output) {
                    Ok(json) => println!("{}", json),
                    Err(e) => {
                        log::error!("Failed to serialize result: {}", e);
                        return ExitCode::FAILURE;
                    }
                }
            } else {
                print_panes(&output);
            }
            ExitCode::SUCCESS
        }
        Err(e) if e.is_warning() => {
            eprintln!("Warning: {}", e.user_message());
            ExitCode::from(2)
        }
        Err(e) => {
            log::error!("Pipeline failed ({}): {}", e.reason(), e);
            eprintln!("Error: {}", e.user_message());
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::try_parse_from(["image-explainer-cli", "--image", "scan.png"]).unwrap();
        let config = cli.pipeline_config();
        assert_eq!(config.mode(), ProcessingMode::Explain);
        assert_eq!(config.processor.chunk_size, 1000);
        assert!(config.extract.preprocess.grayscale && config.extract.preprocess.invert);
        assert_eq!(config.extract.ocr_config.lang, "eng");
    }

    #[test]
    fn test_cli_summarize_without_preprocess() {
        let cli = Cli::try_parse_from([
            "image-explainer-cli",
            "--mode",
            "summarize",
            "--chunk-size",
            "500",
            "--backend",
            "chat-completions",
            "--api-key",
            "k",
            "--no-preprocess",
        ])
        .unwrap();
        assert!(cli.image.is_none());

        let config = cli.pipeline_config();
        assert_eq!(config.mode(), ProcessingMode::Summarize);
        assert_eq!(config.processor.chunk_size, 500);
        assert_eq!(config.extract.preprocess, PreprocessConfig::default());

        let model = cli.model_config();
        assert_eq!(model.backend, ModelBackend::ChatCompletions);
        assert_eq!(model.api_key.as_deref(), Some("k"));
    }
}
