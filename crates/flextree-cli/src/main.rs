use clap::{Parser, Subcommand};
use flextree_core::{Editor, EditorCommand, EngineSettings, PageConfig, Viewport, export_to_dir};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "flextree", version, about = "Headless FlexTree page editor")]
struct Cli {
    /// Directory the configuration is exported to.
    #[arg(long, global = true, default_value = ".")]
    out: PathBuf,
    /// JSON file with engine settings (snapThreshold, nearbyRadius, resizeFloor).
    #[arg(long, global = true, env = "FLEXTREE_SETTINGS")]
    settings: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Export the initial page configuration.
    Export,
    /// Replay a JSON array of editor commands, then export the result.
    Replay {
        script: PathBuf,
        /// Viewport the session starts in.
        #[arg(long, default_value = "mobile")]
        view: Viewport,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();
    let path = run(cli)?;
    println!("{}", path.display());
    Ok(())
}

fn run(cli: Cli) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let settings = match &cli.settings {
        Some(path) => EngineSettings::load(path)?,
        None => EngineSettings::default(),
    };

    let document = match cli.command {
        Commands::Export => PageConfig::default(),
        Commands::Replay { script, view } => replay(&script, view, settings)?,
    };

    Ok(export_to_dir(&document, &cli.out)?)
}

fn replay(
    script: &Path,
    view: Viewport,
    settings: EngineSettings,
) -> Result<PageConfig, Box<dyn std::error::Error>> {
    let json = std::fs::read_to_string(script)?;
    let commands = EditorCommand::parse_script(&json)?;
    log::info!("Replaying {} command(s) from {}", commands.len(), script.display());

    let mut editor = Editor::new().with_settings(settings)?;
    editor.set_view_mode(view);
    for (index, command) in commands.into_iter().enumerate() {
        if !editor.apply(command) {
            log::warn!("Command #{index} had no effect");
        }
    }
    // A script may end mid-gesture.
    editor.cancel_interaction();
    Ok(editor.document().clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_writes_default_document() {
        let dir = tempfile::tempdir().unwrap();
        let cli = Cli::parse_from(["flextree", "export", "--out", dir.path().to_str().unwrap()]);
        let path = run(cli).unwrap();
        let json = std::fs::read_to_string(path).unwrap();
        assert_eq!(PageConfig::from_json(&json).unwrap(), PageConfig::default());
    }

    #[test]
    fn test_replay_script() {
        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("script.json");
        std::fs::write(
            &script,
            r#"[
                {"command": "addLink"},
                {"command": "setLinkTitle", "id": 3, "value": "Newsletter"},
                {"command": "removeLink", "id": 1}
            ]"#,
        )
        .unwrap();

        let cli = Cli::parse_from([
            "flextree",
            "--out",
            dir.path().to_str().unwrap(),
            "replay",
            script.to_str().unwrap(),
            "--view",
            "desktop",
        ]);
        let path = run(cli).unwrap();
        let document = PageConfig::from_json(&std::fs::read_to_string(path).unwrap()).unwrap();
        let titles: Vec<&str> = document
            .desktop
            .links_ordered()
            .into_iter()
            .map(|l| l.title.as_str())
            .collect();
        assert_eq!(titles, vec!["Twitter / X", "Newsletter"]);
        assert_eq!(document.mobile, PageConfig::default().mobile);
    }

    #[test]
    fn test_invalid_settings_file() {
        let dir = tempfile::tempdir().unwrap();
        let settings = dir.path().join("settings.json");
        std::fs::write(&settings, r#"{"snapThreshold": -1}"#).unwrap();
        let cli = Cli::parse_from([
            "flextree",
            "export",
            "--settings",
            settings.to_str().unwrap(),
            "--out",
            dir.path().to_str().unwrap(),
        ]);
        assert!(run(cli).is_err());
    }
}
