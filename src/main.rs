use anyhow::Context;
use clap::Parser;
use serde_json::json;
use utilkit::core::archive::{self, ZipOptions};
use utilkit::core::duration::{format_elapsed, Stopwatch};
use utilkit::core::file::{self, format_file_size};
use utilkit::core::{crypto, digest, gzip, CopyProgress, EntryProgress};
use utilkit::utils::error::ErrorSeverity;
use utilkit::utils::{logger, validation::Validate};
use utilkit::{CliConfig, Command, KitConfig, KitError};

fn main() {
    let cli = CliConfig::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(2);
        }
    };

    let level = config.logging.level.as_deref();
    if config.logging.json {
        logger::init_json_logger(cli.verbose, level);
    } else {
        logger::init_cli_logger(cli.verbose, level);
    }
    tracing::debug!("CLI config: {:?}", cli);

    let mut watch = Stopwatch::start();
    match run(&cli, &config) {
        Ok(()) => {
            watch.lap("run");
            tracing::info!("Finished in {}", format_elapsed(watch.elapsed()));
        }
        Err(e) => {
            let kit_error = e.downcast_ref::<KitError>();
            let severity = kit_error.map_or(ErrorSeverity::High, KitError::severity);
            tracing::error!("❌ {:#} (Severity: {:?})", e, severity);
            match kit_error {
                Some(kit_error) => eprintln!("❌ {}", kit_error.user_friendly_message()),
                None => eprintln!("❌ {:#}", e),
            }

            let exit_code = match severity {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };
            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }
}

fn load_config(cli: &CliConfig) -> utilkit::Result<KitConfig> {
    let config = match &cli.config {
        Some(path) => KitConfig::from_file(path)?,
        None => KitConfig::default(),
    };
    config.validate()?;
    Ok(config)
}

fn log_entry(progress: &EntryProgress) {
    tracing::info!(
        "[{}/{}] {} ({})",
        progress.index + 1,
        progress.total,
        progress.name,
        format_file_size(progress.bytes)
    );
}

fn log_copy(progress: CopyProgress) {
    if let Some(fraction) = progress.fraction() {
        tracing::debug!("copied {:.0}%", fraction * 100.0);
    }
}

fn emit(json_output: bool, value: serde_json::Value, text: impl FnOnce() -> String) {
    if json_output {
        println!("{}", value);
    } else {
        println!("{}", text());
    }
}

fn run(cli: &CliConfig, config: &KitConfig) -> anyhow::Result<()> {
    match &cli.command {
        Command::Digest { file, algorithm } => {
            let algorithm = match algorithm {
                Some(name) => name.parse()?,
                None => config.digest_algorithm()?,
            };
            let hex = digest::digest_file(algorithm, file)
                .with_context(|| format!("hashing {}", file.display()))?;
            emit(
                cli.json,
                json!({ "path": file, "algorithm": algorithm.name(), "digest": hex }),
                || format!("{}  {}", hex, file.display()),
            );
        }
        Command::Zip {
            source,
            dest,
            include_root,
        } => {
            let options = ZipOptions::new().with_level(config.archive.compression_level as i64)?;
            let mut listener = log_entry;
            let zipped = if source.is_dir() {
                let include_root = *include_root || config.archive.include_root;
                archive::zip_dir(source, dest, include_root, &options, &mut listener)
            } else {
                archive::zip_files(&[source], dest, &options, &mut listener)
            };
            zipped.with_context(|| format!("zipping {}", source.display()))?;
            let size = file::total_size(dest)?;
            emit(cli.json, json!({ "archive": dest, "bytes": size }), || {
                format!("📦 {} ({})", dest.display(), format_file_size(size))
            });
        }
        Command::Unzip { archive: src, dest } => {
            let extracted = archive::unzip(src, dest, &ZipOptions::new(), &mut log_entry)
                .with_context(|| format!("extracting {}", src.display()))?;
            emit(cli.json, json!({ "extracted": extracted }), || {
                format!("📁 {} entries extracted to {}", extracted.len(), dest.display())
            });
        }
        Command::LsZip { archive: src } => {
            let names = archive::list_entries(src)?;
            emit(cli.json, json!(names), || names.join("\n"));
        }
        Command::Gzip { file, output } => {
            let dest = output.clone().unwrap_or_else(|| gzip::gz_path_for(file));
            let written = gzip::gzip_file(file, &dest, config.archive.compression_level)?;
            emit(cli.json, json!({ "output": dest, "bytes": written }), || {
                format!("{} ({})", dest.display(), format_file_size(written))
            });
        }
        Command::Gunzip { file, output } => {
            let dest = match output {
                Some(path) => path.clone(),
                None => gzip::ungz_path_for(file)?,
            };
            let written = gzip::gunzip_file(file, &dest)?;
            emit(cli.json, json!({ "output": dest, "bytes": written }), || {
                format!("{} ({})", dest.display(), format_file_size(written))
            });
        }
        Command::Copy { src, dest } => {
            let copied = file::copy_file(src, dest, config.archive.buffer_size, log_copy)
                .with_context(|| format!("copying {} to {}", src.display(), dest.display()))?;
            emit(cli.json, json!({ "output": dest, "bytes": copied }), || {
                format!("{} ({})", dest.display(), format_file_size(copied))
            });
        }
        Command::Size { path } => {
            let bytes = file::total_size(path)?;
            emit(cli.json, json!({ "path": path, "bytes": bytes }), || {
                format!("{}\t{}", format_file_size(bytes), path.display())
            });
        }
        Command::Ls { dir, recursive } => {
            let files = file::list_files(dir, *recursive)?;
            emit(cli.json, json!(files), || {
                files
                    .iter()
                    .map(|f| f.display().to_string())
                    .collect::<Vec<_>>()
                    .join("\n")
            });
        }
        Command::Keygen { out_dir, bits } => {
            let pair = crypto::RsaKeyPair::generate(*bits)?;
            let private_path = out_dir.join("private.pem");
            let public_path = out_dir.join("public.pem");
            file::write_text(&private_path, &crypto::private_key_pem(pair.private_key())?)?;
            file::write_text(&public_path, &crypto::public_key_pem(pair.public_key())?)?;
            emit(
                cli.json,
                json!({ "private": private_path, "public": public_path, "bits": pair.bits() }),
                || format!("🔑 {} / {}", private_path.display(), public_path.display()),
            );
        }
    }
    Ok(())
}
