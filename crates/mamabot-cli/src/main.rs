use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing_subscriber::EnvFilter;

use mamabot_core::config::AppConfig;
use mamabot_core::gateway::{ChatGateway, ImageInput, VisionGateway};
use mamabot_core::prompt;
use mamabot_core::provider::{SpeechSynthesizer, VoiceSettings};
use mamabot_core::session::SessionStore;
use mamabot_core::topic::{Category, ChatLanguage, Topic};
use mamabot_infrastructure::{ElevenLabsSpeech, InMemorySessionRepository, OpenAiChat, OpenAiVision};

mod audio;

#[derive(Parser)]
#[command(name = "mamabot")]
#[command(about = "Mamabot - your digital Sylheti uncle", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive chat with the uncle
    Chat {
        /// User identifier for the session
        #[arg(long, default_value = "default")]
        user: String,
        /// Starting category (culture, government, diaspora, language, homework, news)
        #[arg(long, default_value = "culture")]
        category: String,
        /// Reply language (english, bangla)
        #[arg(long)]
        language: Option<String>,
        /// Speak replies through ElevenLabs
        #[arg(long)]
        speak: bool,
    },
    /// Print the system prompt for a (category, language) pair
    Prompt {
        #[arg(long, default_value = "culture")]
        category: String,
        #[arg(long)]
        language: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Chat {
            user,
            category,
            language,
            speak,
        } => chat(&user, &category, language.as_deref(), speak).await,
        Commands::Prompt { category, language } => {
            let topic = Topic::from_labels(&category, language.as_deref());
            println!("{}", prompt::catalog::system_prompt_for(topic));
            Ok(())
        }
    }
}

async fn chat(user: &str, category: &str, language: Option<&str>, speak: bool) -> Result<()> {
    let config = AppConfig::from_env().context("invalid configuration")?;

    let store = Arc::new(SessionStore::new(
        Arc::new(InMemorySessionRepository::new()),
        config.session_capacity,
        config.session_idle_ttl,
    ));
    let chat_gateway = ChatGateway::new(
        store.clone(),
        Arc::new(OpenAiChat::general(&config)),
        Arc::new(OpenAiChat::search(&config)),
    );
    let vision_gateway = VisionGateway::new(store.clone(), Arc::new(OpenAiVision::new(&config)));
    let speech = ElevenLabsSpeech::from_config(&config);
    let mut player = audio::AudioPlayer::new();

    let mut topic = Topic::from_labels(category, language);

    println!(
        "{}",
        "Assalamu Alaikum! I'm your digital mama. Type /help for commands.".green()
    );
    println!(
        "category: {}, language: {}\n",
        topic.category.to_string().cyan(),
        topic.language.to_string().cyan()
    );

    let mut editor = DefaultEditor::new()?;
    loop {
        let line = match editor.readline("you> ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(err) => return Err(err.into()),
        };
        let line = line.trim().to_string();
        if line.is_empty() {
            continue;
        }
        editor.add_history_entry(&line)?;

        if let Some(rest) = line.strip_prefix('/') {
            let mut words = rest.split_whitespace();
            match words.next() {
                Some("quit") | Some("exit") => break,
                Some("help") => {
                    println!(
                        "/category <name>  /language <name>  /image <path> [question]\n/history  /reset  /quit"
                    );
                    continue;
                }
                Some("category") => {
                    if let Some(label) = words.next() {
                        topic.category = Category::parse_or_default(label);
                    }
                    println!("category: {}", topic.category.to_string().cyan());
                    continue;
                }
                Some("language") => {
                    topic.language = ChatLanguage::parse_or_default(words.next());
                    println!("language: {}", topic.language.to_string().cyan());
                    continue;
                }
                Some("history") => {
                    let entry = store.get_or_create(user).await?;
                    let session = entry.lock().await;
                    for message in &session.messages {
                        println!("[{:?}] {}", message.role, message.content.as_text());
                    }
                    continue;
                }
                Some("reset") => {
                    store.remove(user).await?;
                    println!("{}", "history cleared".yellow());
                    continue;
                }
                Some("image") => {
                    let Some(path) = words.next() else {
                        println!("{}", "usage: /image <path> [question]".yellow());
                        continue;
                    };
                    let question = words.collect::<Vec<_>>().join(" ");
                    let question = (!question.is_empty()).then_some(question);

                    let bytes = match std::fs::read(path) {
                        Ok(bytes) => bytes,
                        Err(err) => {
                            println!("{}", format!("cannot read {path}: {err}").red());
                            continue;
                        }
                    };
                    let media_type = mime_guess::from_path(path)
                        .first_or_octet_stream()
                        .to_string();
                    let image = ImageInput { bytes, media_type };

                    match vision_gateway
                        .send_with_images(user, vec![image], topic.category, question.as_deref())
                        .await
                    {
                        Ok(reply) => speak_and_print(&reply, speak, &speech, &config, &mut player).await,
                        Err(err) => println!("{}", format!("[Error]: {err}").red()),
                    }
                    continue;
                }
                _ => {
                    println!("{}", "unknown command, try /help".yellow());
                    continue;
                }
            }
        }

        match chat_gateway
            .send(user, &line, topic.category, topic.language)
            .await
        {
            Ok(reply) => speak_and_print(&reply, speak, &speech, &config, &mut player).await,
            Err(err) => println!("{}", format!("[Error]: {err}").red()),
        }
    }

    println!("{}", "Allah Hafez!".green());
    Ok(())
}

async fn speak_and_print(
    reply: &str,
    speak: bool,
    speech: &ElevenLabsSpeech,
    config: &AppConfig,
    player: &mut audio::AudioPlayer,
) {
    println!("{} {}", "mama>".green().bold(), reply);

    if !speak {
        return;
    }
    match speech
        .synthesize(reply, &config.voice_id, VoiceSettings::default())
        .await
    {
        Ok(audio_bytes) => {
            if let Err(err) = player.play(&audio_bytes) {
                tracing::warn!(error = %err, "audio playback failed");
            }
        }
        Err(err) => {
            tracing::warn!(error = %err, "speech synthesis failed");
        }
    }
}
