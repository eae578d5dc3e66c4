use gptsovits_client::domain::tts::{TtsService, TtsServiceApi};
use gptsovits_client::error::{AppError, AppResult};
use gptsovits_client::infrastructure::audio::AudioSink;
use gptsovits_client::infrastructure::config::{Config, LogFormat};
use gptsovits_client::infrastructure::repositories::GptSovitsTtsRepository;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        tracing::error!(error = %e, "gptsovits-say failed");
        eprintln!("error: {}", e);
        std::process::exit(e.exit_code());
    }
}

async fn run() -> AppResult<()> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    init_logging(&config);

    let text = std::env::args().skip(1).collect::<Vec<_>>().join(" ");
    if text.trim().is_empty() {
        return Err(AppError::BadRequest(
            "usage: gptsovits-say <text to speak>".to_string(),
        ));
    }

    tracing::info!(
        server = %config.tts.server_location,
        work_dir = %config.tts.work_dir.display(),
        "Starting gptsovits-say"
    );

    // === DEPENDENCY INJECTION SETUP ===
    let tts_repo = Arc::new(GptSovitsTtsRepository::new(config.tts.clone())?);
    let sink = audio_sink();
    let tts_service = TtsService::new(tts_repo, sink);

    let path = tts_service.synthesize_and_play(&text).await?;
    println!("{}", path.display());

    Ok(())
}

#[cfg(feature = "playback")]
fn audio_sink() -> Arc<dyn AudioSink> {
    Arc::new(gptsovits_client::infrastructure::audio::RodioSink)
}

#[cfg(not(feature = "playback"))]
fn audio_sink() -> Arc<dyn AudioSink> {
    Arc::new(gptsovits_client::infrastructure::audio::NullSink)
}

fn init_logging(config: &Config) {
    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "gptsovits_client=debug,gptsovits_say=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "gptsovits_client=debug,gptsovits_say=debug".into()),
            )
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}
