//! Generate command

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use clap::Args;
use serde::Serialize;
use tracing::{debug, info};

use relnote_changelog::{write_release_notes, FormatterRegistry, LogExtractor, RenderConfig};
use relnote_core::config::{load_config_or_default, validate_config, Config};
use relnote_git::GitRepo;

use crate::cli::{output, Cli, OutputFormat};

/// Generate release notes for a commit range
#[derive(Debug, Args)]
pub struct GenerateCommand {
    /// Release label shown in the header (e.g. 1.2.0)
    #[arg(short, long)]
    pub release: String,

    /// Revision the range starts after (tag, branch or commit)
    #[arg(short, long)]
    pub from: String,

    /// Revision the range ends at (defaults to HEAD)
    #[arg(short, long)]
    pub to: Option<String>,

    /// Line of the output file after which the notes are inserted
    #[arg(short = 'b', long = "break", value_name = "MARKER")]
    pub break_marker: Option<String>,

    /// Release date as YYYY-MM-DD (defaults to today)
    #[arg(long)]
    pub date: Option<NaiveDate>,

    /// Output file (defaults to the configured file)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Release notes format (md, json)
    #[arg(long, value_name = "NAME")]
    pub formatter: Option<String>,

    /// Keep each issue in at most one entry
    #[arg(long)]
    pub unique_issues: bool,

    /// Issue tracker link pattern, `\1` is replaced with the issue number
    #[arg(long, value_name = "PATTERN")]
    pub issue_pattern: Option<String>,

    /// Print the notes instead of writing them
    #[arg(long)]
    pub dry_run: bool,
}

/// Summary of a generate run
#[derive(Debug, Serialize)]
pub struct GenerateReport {
    pub release: String,
    pub format: String,
    pub commits: usize,
    pub groups: usize,
    pub entries: usize,
    pub file: PathBuf,
    pub written: bool,
}

impl GenerateCommand {
    /// Apply command-line overrides on top of the loaded configuration
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(formatter) = &self.formatter {
            config.format = formatter.clone();
        }
        if let Some(pattern) = &self.issue_pattern {
            config.issue_tracker_pattern = Some(pattern.clone());
        }
        if self.unique_issues {
            config.unique_issues = true;
        }
        if let Some(output) = &self.output {
            config.output.file = Some(output.clone());
        }
        if let Some(marker) = &self.break_marker {
            config.output.break_marker = Some(marker.clone());
        }
    }

    /// Run the pipeline against the repository containing `dir`
    ///
    /// Returns the rendered lines together with a report. Nothing is written.
    pub fn render_notes(
        &self,
        dir: &Path,
        config: &Config,
    ) -> anyhow::Result<(Vec<String>, GenerateReport)> {
        let repo = GitRepo::discover(dir)?;
        let commits = repo.commits_between(&self.from, self.to.as_deref())?;
        let log = LogExtractor::from_config(config).extract(&commits);

        let date = self
            .date
            .unwrap_or_else(|| chrono::Local::now().date_naive());
        let render = RenderConfig::from_config(config, &self.release, date);

        let mut formatter = FormatterRegistry::new().create(&config.format, render)?;
        formatter.set_log(log);
        let decorated = formatter.decorate();
        let (groups, entries) = (decorated.len(), decorated.entry_count());
        let lines = formatter.generate();

        let report = GenerateReport {
            release: self.release.clone(),
            format: formatter.name().to_string(),
            commits: commits.len(),
            groups,
            entries,
            file: dir.join(formatter.file_name()),
            written: false,
        };
        Ok((lines, report))
    }

    /// Execute the generate command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(
            release = %self.release,
            from = %self.from,
            to = ?self.to,
            dry_run = self.dry_run,
            "executing generate command"
        );
        let cwd = std::env::current_dir()?;
        let (mut config, config_path) = load_config_or_default(&cwd)?;
        debug!(config_path = ?config_path, "configuration resolved");

        self.apply_overrides(&mut config);
        validate_config(&config)?;

        let (lines, mut report) = self.render_notes(&cwd, &config)?;

        if lines.is_empty() {
            if !cli.quiet && cli.format == OutputFormat::Text {
                output::warning("No matching commits found in range, nothing to write.");
            }
        } else if self.dry_run {
            println!("{}", lines.join("\n"));
            return Ok(());
        } else {
            write_release_notes(&report.file, &lines, config.output.break_marker.as_deref())?;
            report.written = true;
        }

        if cli.quiet {
            return Ok(());
        }

        match cli.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
            OutputFormat::Text if report.written => {
                output::success(&format!(
                    "Release notes for {} written to {}",
                    self.release,
                    output::path_style().apply_to(report.file.display())
                ));
                println!("{}", output::key_value("commits", &report.commits.to_string()));
                println!("{}", output::key_value("groups", &report.groups.to_string()));
                println!("{}", output::key_value("entries", &report.entries.to_string()));
            }
            OutputFormat::Text => {}
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    use crate::cli::Commands;

    fn parse(args: &[&str]) -> GenerateCommand {
        let mut argv = vec!["relnote", "generate"];
        argv.extend_from_slice(args);
        match Cli::try_parse_from(argv).unwrap().command {
            Commands::Generate(cmd) => cmd,
            _ => panic!("expected generate command"),
        }
    }

    #[test]
    fn test_parse_all_flags() {
        let cmd = parse(&[
            "-r", "2.0.0", "-f", "v1.0.0", "-t", "main", "-b", "<!-- notes -->",
            "--date", "2014-12-21", "--formatter", "json", "--unique-issues",
            "--issue-pattern", "http://t/\\1", "--dry-run",
        ]);

        assert_eq!(cmd.to.as_deref(), Some("main"));
        assert_eq!(cmd.break_marker.as_deref(), Some("<!-- notes -->"));
        assert_eq!(cmd.date, NaiveDate::from_ymd_opt(2014, 12, 21));
        assert!(cmd.unique_issues);
        assert!(cmd.dry_run);
    }

    #[test]
    fn test_invalid_date_rejected() {
        let argv = ["relnote", "generate", "-r", "1", "-f", "v0", "--date", "21.12.2014"];
        assert!(Cli::try_parse_from(argv).is_err());
    }

    #[test]
    fn test_overrides_win_over_config() {
        let cmd = parse(&[
            "-r", "2.0.0", "-f", "v1.0.0", "-o", "CHANGES.md", "--formatter", "json",
            "--unique-issues", "--issue-pattern", "http://t/\\1", "-b", "MARK",
        ]);
        let mut config = Config::default();
        cmd.apply_overrides(&mut config);

        assert_eq!(config.format, "json");
        assert!(config.unique_issues);
        assert_eq!(config.link_pattern(), "http://t/\\1");
        assert_eq!(config.output.file, Some(PathBuf::from("CHANGES.md")));
        assert_eq!(config.output.break_marker.as_deref(), Some("MARK"));
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_invalid_override_fails_validation() {
        let cmd = parse(&["-r", "2.0.0", "-f", "v1.0.0", "--issue-pattern", "http://t/"]);
        let mut config = Config::default();
        cmd.apply_overrides(&mut config);

        assert!(validate_config(&config).is_err());
    }

    fn commit(repo: &git2::Repository, message: &str) -> git2::Oid {
        let sig = git2::Signature::now("Test", "test@example.com").unwrap();
        let tree_id = repo.index().unwrap().write_tree().unwrap();
        let tree = repo.find_tree(tree_id).unwrap();
        let parents: Vec<git2::Commit> = repo
            .head()
            .ok()
            .and_then(|h| h.peel_to_commit().ok())
            .into_iter()
            .collect();
        let parents: Vec<&git2::Commit> = parents.iter().collect();
        repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
            .unwrap()
    }

    #[test]
    fn test_render_notes_from_repository() {
        let temp = tempfile::TempDir::new().unwrap();
        let repo = git2::Repository::init(temp.path()).unwrap();
        let base = commit(&repo, "initial import");
        repo.tag_lightweight("v1.0.0", &repo.find_object(base, None).unwrap(), false)
            .unwrap();
        commit(&repo, "fix(parser): handle empty input #12");
        commit(&repo, "chore: bump deps");
        commit(&repo, "feat(cli): add dry run\n\nCloses #40");

        let cmd = parse(&[
            "-r", "1.1.0", "-f", "v1.0.0", "--date", "2014-12-21",
            "--issue-pattern", "https://t/\\1",
        ]);
        let mut config = Config::default();
        cmd.apply_overrides(&mut config);

        let (lines, report) = cmd.render_notes(temp.path(), &config).unwrap();

        assert_eq!(report.commits, 3);
        assert_eq!(report.groups, 2);
        assert_eq!(report.entries, 2);
        assert_eq!(report.file, temp.path().join("README.md"));
        assert!(!report.written);
        assert_eq!(lines[0], "## 1.1.0");
        assert_eq!(lines[1], "*(2014-12-21)*");
        let text = lines.join("\n");
        assert!(text.contains("[#40](https://t/40)"));
        assert!(text.contains("[#12](https://t/12)"));
        assert!(text.find("#### Features").unwrap() < text.find("#### Bugfixes").unwrap());
    }

    #[test]
    fn test_json_format_defaults_to_json_file() {
        let temp = tempfile::TempDir::new().unwrap();
        let repo = git2::Repository::init(temp.path()).unwrap();
        let base = commit(&repo, "initial import");
        commit(&repo, "feat: export as json #3");

        let from = base.to_string();
        let from = from.as_str();
        let cmd = parse(&["-r", "1.1.0", "-f", from, "--formatter", "json"]);
        let mut config = Config::default();
        cmd.apply_overrides(&mut config);

        let (lines, report) = cmd.render_notes(temp.path(), &config).unwrap();

        assert_eq!(report.format, "json");
        assert_eq!(report.file, temp.path().join("README.json"));
        assert_eq!(lines.len(), 1);
        let value: serde_json::Value = serde_json::from_str(&lines[0]).unwrap();
        assert_eq!(value["groups"][0]["entries"][0]["issues"][0]["id"], "3");

        let cmd = parse(&["-r", "1.1.0", "-f", from, "--formatter", "json", "-o", "notes.md"]);
        let mut config = Config::default();
        cmd.apply_overrides(&mut config);
        let (_, report) = cmd.render_notes(temp.path(), &config).unwrap();
        assert_eq!(report.file, temp.path().join("notes.md"));
    }

    #[test]
    fn test_render_notes_unknown_revision() {
        let temp = tempfile::TempDir::new().unwrap();
        let repo = git2::Repository::init(temp.path()).unwrap();
        commit(&repo, "feat: first");

        let cmd = parse(&["-r", "1.0.0", "-f", "v9.9.9"]);
        let err = cmd.render_notes(temp.path(), &Config::default()).unwrap_err();

        assert_eq!(crate::exit_codes::for_error(&err), crate::exit_codes::GIT_ERROR);
    }
}
