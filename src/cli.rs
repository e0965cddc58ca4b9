use clap::{Parser, Subcommand};
use desk_detox_common::Filter;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "desk-detox")]
#[command(about = "Photograph a messy desk, get an action plan for every document on it", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbose logging (same as RUST_LOG=debug)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyse a desk photo and show the dashboard
    Analyze {
        /// Image file (JPEG, PNG, WebP, GIF, HEIC)
        #[arg(required = true)]
        image: PathBuf,

        /// Save the result (after review) as JSON
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Reuse a previous result for the same image
        #[arg(long)]
        use_cache: bool,

        /// Cache folder (default: the user cache directory)
        #[arg(long)]
        cache_dir: Option<PathBuf>,

        /// Category shown in the document list (all/action/archive/trash)
        #[arg(short, long, default_value = "all", value_parser = parse_filter)]
        filter: Filter,

        /// Show senders and amounts
        #[arg(long)]
        no_privacy: bool,

        /// Review the documents interactively
        #[arg(short, long)]
        review: bool,

        /// Gemini model (overrides the config)
        #[arg(long)]
        model: Option<String>,
    },

    /// Show a saved result
    Show {
        /// Result JSON written by `analyze --output`
        #[arg(required = true)]
        input: PathBuf,

        /// Category shown in the document list (all/action/archive/trash)
        #[arg(short, long, default_value = "all", value_parser = parse_filter)]
        filter: Filter,

        /// Show senders and amounts
        #[arg(long)]
        no_privacy: bool,

        /// Review the documents interactively
        #[arg(short, long)]
        review: bool,

        /// Where to save the reviewed result (default: overwrite the input)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show or edit the configuration
    Config {
        /// Store the Gemini API key
        #[arg(long)]
        set_api_key: Option<String>,

        /// Store the default model
        #[arg(long)]
        set_model: Option<String>,

        /// Print the configuration
        #[arg(long)]
        show: bool,
    },

    /// Manage the result cache
    Cache {
        /// Delete the cache
        #[arg(long)]
        clear: bool,

        /// Cache folder (default: the user cache directory)
        #[arg(long)]
        cache_dir: Option<PathBuf>,

        /// Print cache information
        #[arg(long)]
        info: bool,
    },
}

fn parse_filter(s: &str) -> Result<Filter, String> {
    s.parse()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use desk_detox_common::Category;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_analyze() {
        let cli = Cli::parse_from(["desk-detox", "analyze", "desk.jpg", "--filter", "action", "--no-privacy"]);
        match cli.command {
            Commands::Analyze { image, filter, no_privacy, review, use_cache, .. } => {
                assert_eq!(image, PathBuf::from("desk.jpg"));
                assert_eq!(filter, Filter::Category(Category::Action));
                assert!(no_privacy);
                assert!(!review);
                assert!(!use_cache);
            }
            _ => panic!("expected analyze"),
        }
    }

    #[test]
    fn test_parse_bad_filter() {
        let result = Cli::try_parse_from(["desk-detox", "show", "r.json", "--filter", "paid"]);
        assert!(result.is_err());
    }
}
