mod args;

use {
    anyhow::Result,
    args::Command,
    base::{log::info, log_fatal},
    phoneme::{ProfileRecord, ProfileRegistry, RegistryError, Segment, builtin, install, loader},
    std::{io::Write, path::PathBuf},
};

// register() already warns about every shared artifact
fn build_registry(files: &[PathBuf]) -> ProfileRegistry {
    let mut registry = match builtin::registry() {
        Ok(registry) => registry,
        Err(error) => log_fatal!("built-in profiles are broken: {}", error),
    };
    for path in files {
        let loaded = loader::load_file(path).and_then(|profiles| registry.register_all(profiles));
        if let Err(error) = loaded {
            log_fatal!("cannot register profiles from {}: {}", path.display(), error);
        }
    }
    registry
}

fn run(registry: &ProfileRegistry, command: Command, out: &mut impl Write) -> Result<()> {
    match command {
        Command::List => {
            for profile in registry.list() {
                let model = profile
                    .model_file()
                    .map(|path| path.display().to_string())
                    .unwrap_or_else(|| "-".to_string());
                writeln!(
                    out,
                    "{:<20} {:<24} {:<8} {:>4} symbols  {}",
                    profile.id(),
                    profile.display_name(),
                    profile.mode().tag(),
                    profile.phoneme_set().len(),
                    model
                )?;
            }
        }
        Command::Show(id) => {
            let record = ProfileRecord::from(registry.get(&id)?);
            writeln!(out, "{}", serde_json::to_string_pretty(&record)?)?;
        }
        Command::Check(id, symbols) => {
            let result = registry.validator(&id)?.classify(&symbols);
            writeln!(out, "valid:   {}", result.valid.join(" "))?;
            writeln!(out, "invalid: {}", result.invalid.join(" "))?;
        }
        Command::Segment(id, text) => {
            let pieces: Vec<String> = registry
                .validator(&id)?
                .segment(&text)
                .into_iter()
                .map(|segment| match segment {
                    Segment::Known(symbol) => symbol.to_string(),
                    Segment::Unknown(c) => format!("[{}]", c),
                })
                .collect();
            writeln!(out, "{}", pieces.join(" "))?;
        }
        Command::Find(symbol) => {
            let ids: Vec<&str> = registry.find_by_phoneme(&symbol).into_iter().collect();
            writeln!(out, "{}", ids.join(" "))?;
        }
        Command::Compat(a, b) => {
            let other = registry.get(&b)?.phoneme_set().iter();
            let score = registry.validator(&a)?.compatibility_score(other);
            writeln!(out, "{} ~ {}: {}", a, b, score)?;
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let argv: Vec<String> = std::env::args().skip(1).collect();
    let args = match args::parse(&argv) {
        Ok(args) => args,
        Err(error) => {
            eprintln!("{}\n\n{}", error, args::USAGE);
            std::process::exit(2);
        }
    };

    // stdout carries command output only
    match &args.log_dir {
        Some(dir) => base::init_file_logger(dir)?,
        None => base::init_stderr_logger(),
    }

    let registry = install(build_registry(&args.files))?;
    info!("{} profiles available", registry.len());

    let result = run(registry, args.command, &mut std::io::stdout().lock());
    if let Err(error) = &result {
        if let Some(RegistryError::NotFound(id)) = error.downcast_ref::<RegistryError>() {
            eprintln!("profile not found: {}", id);
            std::process::exit(1);
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn output(command: Command) -> Result<String> {
        base::init_stderr_logger();
        let registry = builtin::registry()?;
        let mut out = Vec::new();
        run(&registry, command, &mut out)?;
        Ok(String::from_utf8(out)?)
    }

    #[test]
    fn test_show_prints_only_json() {
        let text = output(Command::Show("english_ipa".to_string())).unwrap();
        let json: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(json["id"], "english_ipa");
        assert_eq!(json["phoneme_set"].as_array().map(Vec::len), Some(45));
    }

    #[test]
    fn test_list_prints_one_line_per_profile() {
        let text = output(Command::List).unwrap();
        assert_eq!(text.lines().count(), builtin::profiles().unwrap().len());
        assert!(text.lines().all(|line| !line.contains("registered profile")));
    }

    #[test]
    fn test_missing_profile_keeps_registry_error() {
        let error = output(Command::Show("nope".to_string())).unwrap_err();
        assert_eq!(
            error.downcast_ref::<RegistryError>(),
            Some(&RegistryError::NotFound("nope".to_string()))
        );
    }
}
