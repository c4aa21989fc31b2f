// CLI module for argument parsing and configuration

use crate::config::UserConfig;
use crate::domain::{CollisionPolicy, MediaKind, PurgeMode, ScanOptions, QUARANTINE_DIR_NAME};
use clap::{ArgAction, Parser, ValueEnum};
use std::path::PathBuf;

/// Mswp - triage a folder of photos and videos from the keyboard
///
/// Keep what you want, send the rest to a `_deleted` folder, undo any slip.
#[derive(Parser, Debug, Clone)]
#[command(name = "mswp")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Folder to review
    ///
    /// If not specified, defaults to the current directory.
    #[arg(default_value = ".")]
    pub directory: PathBuf,

    /// Only review this kind of media
    ///
    /// Can be specified multiple times. Reviews images and videos by default.
    #[arg(short = 'k', long = "kind", value_enum)]
    pub kinds: Vec<MediaKindFilter>,

    /// Include hidden files (files starting with .)
    #[arg(long = "hidden", action = ArgAction::SetTrue)]
    pub show_hidden: bool,

    /// What to do when a file of the same name is already in `_deleted`
    #[arg(long = "on-collision", value_enum)]
    pub on_collision: Option<CollisionChoice>,

    /// Send `_deleted` to the system trash instead of deleting it on exit
    #[arg(
        long = "purge-to-trash",
        action = ArgAction::SetTrue,
        overrides_with = "no_purge_to_trash"
    )]
    pub purge_to_trash: bool,

    /// Delete `_deleted` permanently on exit, even if the config says trash
    #[arg(
        long = "no-purge-to-trash",
        action = ArgAction::SetTrue,
        overrides_with = "purge_to_trash"
    )]
    pub no_purge_to_trash: bool,

    /// Show the welcome screen again
    #[arg(long = "welcome", action = ArgAction::SetTrue)]
    pub welcome: bool,

    /// Write the log to this file instead of the default location
    #[arg(long = "log-file")]
    pub log_file: Option<PathBuf>,
}

/// Media kind filter options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MediaKindFilter {
    /// Still images (png, jpg, gif, heic, ...)
    Image,
    /// Videos (mp4, mov, mkv, ...)
    Video,
}

impl From<MediaKindFilter> for MediaKind {
    fn from(filter: MediaKindFilter) -> Self {
        match filter {
            MediaKindFilter::Image => MediaKind::Image,
            MediaKindFilter::Video => MediaKind::Video,
        }
    }
}

/// Collision handling options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CollisionChoice {
    /// Refuse to delete and report the clash
    Abort,
    /// Quarantine as `name (1).ext`, `name (2).ext`, ...
    Rename,
}

impl From<CollisionChoice> for CollisionPolicy {
    fn from(choice: CollisionChoice) -> Self {
        match choice {
            CollisionChoice::Abort => CollisionPolicy::Abort,
            CollisionChoice::Rename => CollisionPolicy::Rename,
        }
    }
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Args::parse()
    }

    /// Get the kind filters as domain MediaKind values
    pub fn get_kind_filters(&self) -> Option<Vec<MediaKind>> {
        if self.kinds.is_empty() {
            None
        } else {
            Some(self.kinds.iter().map(|&k| k.into()).collect())
        }
    }

    /// Trash preference from the flags, if either was given (the last one wins)
    pub fn purge_to_trash_flag(&self) -> Option<bool> {
        if self.purge_to_trash {
            Some(true)
        } else if self.no_purge_to_trash {
            Some(false)
        } else {
            None
        }
    }

    /// Validate the arguments and return any errors
    pub fn validate(&self) -> Result<(), String> {
        if !self.directory.exists() {
            return Err(format!(
                "Directory does not exist: {}",
                self.directory.display()
            ));
        }

        if !self.directory.is_dir() {
            return Err(format!(
                "Path is not a directory: {}",
                self.directory.display()
            ));
        }

        let is_quarantine = self
            .directory
            .canonicalize()
            .ok()
            .and_then(|p| p.file_name().map(|n| n == QUARANTINE_DIR_NAME))
            .unwrap_or(false);
        if is_quarantine {
            return Err(format!(
                "Refusing to review a quarantine folder: {}",
                self.directory.display()
            ));
        }

        Ok(())
    }
}

/// Configuration derived from CLI arguments and saved preferences
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub directory: PathBuf,
    pub kinds: Option<Vec<MediaKind>>,
    pub show_hidden: bool,
    pub on_collision: CollisionPolicy,
    pub purge_mode: PurgeMode,
    pub show_welcome: bool,
    pub log_file: Option<PathBuf>,
}

impl AppConfig {
    /// Merges CLI flags over saved preferences; flags always win
    pub fn resolve(args: Args, user_config: &UserConfig) -> Self {
        let purge_to_trash = args
            .purge_to_trash_flag()
            .unwrap_or(user_config.purge_to_trash);

        AppConfig {
            kinds: args.get_kind_filters(),
            directory: args.directory,
            show_hidden: args.show_hidden,
            on_collision: args
                .on_collision
                .map(CollisionPolicy::from)
                .or(user_config.on_collision)
                .unwrap_or_default(),
            purge_mode: if purge_to_trash {
                PurgeMode::SystemTrash
            } else {
                PurgeMode::Delete
            },
            show_welcome: args.welcome || !user_config.welcome_shown,
            log_file: args.log_file,
        }
    }

    pub fn scan_options(&self) -> ScanOptions {
        ScanOptions {
            kinds: self.kinds.clone(),
            show_hidden: self.show_hidden,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            directory: PathBuf::from("."),
            kinds: None,
            show_hidden: false,
            on_collision: CollisionPolicy::Abort,
            purge_mode: PurgeMode::Delete,
            show_welcome: true,
            log_file: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn parse(argv: &[&str]) -> Args {
        let mut full = vec!["mswp"];
        full.extend_from_slice(argv);
        Args::try_parse_from(full).unwrap()
    }

    mod args_tests {
        use super::*;

        #[test]
        fn test_args_default_values() {
            let args = parse(&[]);

            assert_eq!(args.directory, PathBuf::from("."));
            assert!(args.kinds.is_empty());
            assert!(!args.show_hidden);
            assert!(args.on_collision.is_none());
            assert!(!args.purge_to_trash);
            assert!(!args.welcome);
            assert!(args.get_kind_filters().is_none());
        }

        #[test]
        fn test_args_kind_filters_multiple() {
            let args = parse(&["photos", "-k", "image", "--kind", "video"]);

            assert_eq!(args.directory, PathBuf::from("photos"));
            let filters = args.get_kind_filters().unwrap();
            assert_eq!(filters, vec![MediaKind::Image, MediaKind::Video]);
        }

        #[test]
        fn test_args_collision_choice() {
            let args = parse(&["--on-collision", "rename"]);
            assert_eq!(args.on_collision, Some(CollisionChoice::Rename));
            assert_eq!(
                CollisionPolicy::from(CollisionChoice::Abort),
                CollisionPolicy::Abort
            );
        }

        #[test]
        fn test_args_rejects_unknown_kind() {
            assert!(Args::try_parse_from(["mswp", "--kind", "audio"]).is_err());
        }

        #[test]
        fn test_args_validate_nonexistent_directory() {
            let args = parse(&["/nonexistent/path/12345"]);

            let result = args.validate();
            assert!(result.is_err());
            assert!(result.unwrap_err().contains("does not exist"));
        }

        #[test]
        fn test_args_validate_file_path() {
            let temp_dir = TempDir::new().unwrap();
            let file = temp_dir.path().join("a.jpg");
            fs::write(&file, b"a").unwrap();

            let args = parse(&[file.to_str().unwrap()]);
            assert!(args.validate().unwrap_err().contains("not a directory"));
        }

        #[test]
        fn test_args_validate_quarantine_folder() {
            let temp_dir = TempDir::new().unwrap();
            let quarantine = temp_dir.path().join(QUARANTINE_DIR_NAME);
            fs::create_dir(&quarantine).unwrap();

            let args = parse(&[quarantine.to_str().unwrap()]);
            assert!(args.validate().unwrap_err().contains("quarantine"));
        }

        #[test]
        fn test_args_validate_success() {
            let temp_dir = TempDir::new().unwrap();
            let args = parse(&[temp_dir.path().to_str().unwrap()]);
            assert!(args.validate().is_ok());
        }
    }

    mod config_tests {
        use super::*;

        #[test]
        fn test_app_config_from_args() {
            let args = parse(&[
                "/test/path",
                "--kind",
                "video",
                "--hidden",
                "--on-collision",
                "rename",
                "--purge-to-trash",
                "--log-file",
                "/tmp/mswp.log",
            ]);

            let config = AppConfig::resolve(args, &UserConfig::default());

            assert_eq!(config.directory, PathBuf::from("/test/path"));
            assert_eq!(config.kinds, Some(vec![MediaKind::Video]));
            assert!(config.show_hidden);
            assert_eq!(config.on_collision, CollisionPolicy::Rename);
            assert_eq!(config.purge_mode, PurgeMode::SystemTrash);
            assert!(config.show_welcome);
            assert_eq!(config.log_file, Some(PathBuf::from("/tmp/mswp.log")));
        }

        #[test]
        fn test_saved_preferences_apply_without_flags() {
            let user_config = UserConfig {
                welcome_shown: true,
                on_collision: Some(CollisionPolicy::Rename),
                purge_to_trash: true,
            };

            let config = AppConfig::resolve(parse(&[]), &user_config);

            assert_eq!(config.on_collision, CollisionPolicy::Rename);
            assert_eq!(config.purge_mode, PurgeMode::SystemTrash);
            assert!(!config.show_welcome);
        }

        #[test]
        fn test_flags_override_saved_preferences() {
            let user_config = UserConfig {
                welcome_shown: true,
                on_collision: Some(CollisionPolicy::Rename),
                purge_to_trash: false,
            };

            let config = AppConfig::resolve(
                parse(&["--on-collision", "abort", "--welcome"]),
                &user_config,
            );

            assert_eq!(config.on_collision, CollisionPolicy::Abort);
            assert!(config.show_welcome);
        }

        #[test]
        fn test_flag_turns_saved_trash_preference_off() {
            let user_config = UserConfig {
                purge_to_trash: true,
                ..Default::default()
            };

            let config = AppConfig::resolve(parse(&["--no-purge-to-trash"]), &user_config);
            assert_eq!(config.purge_mode, PurgeMode::Delete);

            let config = AppConfig::resolve(parse(&[]), &user_config);
            assert_eq!(config.purge_mode, PurgeMode::SystemTrash);
        }

        #[test]
        fn test_last_trash_flag_wins() {
            let args = parse(&["--purge-to-trash", "--no-purge-to-trash"]);
            assert_eq!(args.purge_to_trash_flag(), Some(false));

            let args = parse(&["--no-purge-to-trash", "--purge-to-trash"]);
            assert_eq!(args.purge_to_trash_flag(), Some(true));

            assert_eq!(parse(&[]).purge_to_trash_flag(), None);
        }

        #[test]
        fn test_app_config_default() {
            let config = AppConfig::default();

            assert_eq!(config.directory, PathBuf::from("."));
            assert!(config.kinds.is_none());
            assert!(!config.show_hidden);
            assert_eq!(config.on_collision, CollisionPolicy::Abort);
            assert_eq!(config.purge_mode, PurgeMode::Delete);
            assert!(config.log_file.is_none());
        }

        #[test]
        fn test_scan_options() {
            let config = AppConfig {
                kinds: Some(vec![MediaKind::Image]),
                show_hidden: true,
                ..Default::default()
            };

            let options = config.scan_options();
            assert_eq!(options.kinds, Some(vec![MediaKind::Image]));
            assert!(options.show_hidden);
        }
    }
}
