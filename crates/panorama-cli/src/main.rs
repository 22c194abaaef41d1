//! `panorama` — submit a lead to the Panorama intake API from the terminal.
//!
//! # Usage
//!
//! ```
//! panorama submit --file lead.toml
//! panorama submit --file lead.toml --url http://intake.internal:8080
//! ```
//!
//! The lead file is TOML whose keys mirror the wire payload:
//!
//! ```toml
//! tipo_pessoa = "Física"
//! nome_completo = "Maria Silva"
//! email = "maria@example.com"
//! telefone = "(11) 98765-4321"
//! cpf = "529.982.247-25"
//! area_juridica = "Direito Civil"
//! descricao_necessidade = "Preciso de orientação sobre contrato de locação."
//! nivel_urgencia = "Alta"
//! preferencia_contato = "Email"
//! horario_preferencial = "Tarde (12h-18h)"
//! aceite_termos = true
//! captcha = "token"
//! ```

mod client;
mod sanitize;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use panorama_core::{submission::SubmitPayload, validate::validate};

use client::{ApiClient, ApiConfig};

/// The choices the landing-page form offers for `area_juridica`. The server
/// accepts any non-empty value; the client keeps submissions on the menu.
const AREAS_JURIDICAS: &[&str] = &[
  "Direito Civil",
  "Direito Trabalhista",
  "Direito Empresarial",
  "Direito Tributário",
  "Direito Penal",
  "Direito de Família",
  "Direito Imobiliário",
  "Outro",
];

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "panorama", about = "Client for the Panorama intake API")]
struct Args {
  /// Base URL of the intake server.
  #[arg(long, env = "PANORAMA_URL", default_value = "http://localhost:8080")]
  url: String,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
  /// Validate and submit a lead described in a TOML file.
  Submit {
    /// Path to the lead file; keys mirror the wire payload.
    #[arg(short, long, value_name = "FILE")]
    file: PathBuf,
  },
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
    .init();

  let args = Args::parse();
  match args.command {
    Command::Submit { file } => submit(&args.url, &file).await,
  }
}

async fn submit(url: &str, file: &Path) -> Result<()> {
  let raw = std::fs::read_to_string(file)
    .with_context(|| format!("reading lead file {}", file.display()))?;
  let mut payload: SubmitPayload =
    toml::from_str(&raw).context("parsing lead file")?;

  sanitize::apply(&mut payload);

  // Advisory pre-flight with the same rules the server enforces. The server
  // re-validates regardless.
  if let Err(errors) = validate(&payload) {
    for e in &errors {
      eprintln!("{}: {}", e.field, e.message);
    }
    bail!("lead file failed validation ({} error(s))", errors.len());
  }

  if !AREAS_JURIDICAS.contains(&payload.area_juridica.as_str()) {
    bail!(
      "area_juridica: Por favor, selecione a área jurídica de interesse \
       (opções: {})",
      AREAS_JURIDICAS.join(", ")
    );
  }

  let client = ApiClient::new(ApiConfig { base_url: url.to_string() })?;
  let data = client.submit(&payload).await?;

  println!("{}", data.message);
  println!("Protocolo: {}", data.protocol);
  println!("Confirmação: {}", data.redirect_url);
  Ok(())
}
