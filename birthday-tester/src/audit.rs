//! Resolve every asset the game can ask for against a media directory on
//! disk, reporting which ones hit their first candidate, which fall back,
//! and which would render as a placeholder.

use anyhow::{Context, Result, ensure};
use birthday_game::{AssetCandidate, AssetCatalog, EncounterSpec, Screen, narration_path};
use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetStatus {
    /// The first candidate exists.
    Exact,
    /// A later candidate (image, capitalised or corrected name) exists.
    Fallback,
    /// Nothing exists; the game shows a placeholder or stays silent.
    Missing,
}

impl AssetStatus {
    const fn icon(self) -> &'static str {
        match self {
            Self::Exact => "✅",
            Self::Fallback => "↪️",
            Self::Missing => "❌",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetFinding {
    /// `dir/base` as the game requests it.
    pub request: String,
    pub status: AssetStatus,
    pub resolved: Option<String>,
    pub probes: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditReport {
    pub root: PathBuf,
    pub findings: Vec<AssetFinding>,
}

impl AuditReport {
    #[must_use]
    pub fn count(&self, status: AssetStatus) -> usize {
        self.findings.iter().filter(|f| f.status == status).count()
    }

    /// Missing media only fails the audit in strict mode.
    #[must_use]
    pub fn passed(&self, strict: bool) -> bool {
        !strict || self.count(AssetStatus::Missing) == 0
    }

    fn flagged(&self) -> impl Iterator<Item = &AssetFinding> {
        self.findings
            .iter()
            .filter(|f| f.status != AssetStatus::Exact)
    }

    /// # Errors
    ///
    /// Fails when `out` cannot be written.
    pub fn write_console<W: Write + ?Sized>(&self, out: &mut W, verbose: bool) -> Result<()> {
        writeln!(out)?;
        writeln!(out, "{}", "🗂️  Asset Audit".bright_cyan().bold())?;
        writeln!(out, "{}", "===============".cyan())?;
        writeln!(out, "Root: {}", self.root.display())?;
        writeln!(out, "Checked: {}", self.findings.len())?;
        writeln!(
            out,
            "Exact: {}",
            self.count(AssetStatus::Exact).to_string().green()
        )?;
        writeln!(
            out,
            "Fallback: {}",
            self.count(AssetStatus::Fallback).to_string().yellow()
        )?;
        writeln!(
            out,
            "Missing: {}",
            self.count(AssetStatus::Missing).to_string().red()
        )?;
        writeln!(out)?;

        for finding in &self.findings {
            match finding.status {
                AssetStatus::Exact if verbose => {
                    writeln!(out, "{} {}", finding.status.icon(), finding.request)?;
                }
                AssetStatus::Exact => {}
                AssetStatus::Fallback => writeln!(
                    out,
                    "{} {} -> {}",
                    finding.status.icon(),
                    finding.request.yellow(),
                    finding.resolved.as_deref().unwrap_or("-")
                )?,
                AssetStatus::Missing => {
                    writeln!(out, "{} {}", finding.status.icon(), finding.request.red())?;
                }
            }
        }
        Ok(())
    }

    /// # Errors
    ///
    /// Fails when `out` cannot be written.
    pub fn write_markdown<W: Write + ?Sized>(&self, out: &mut W) -> Result<()> {
        writeln!(out, "## Asset Audit\n")?;
        writeln!(out, "- **Root**: `{}`", self.root.display())?;
        writeln!(out, "- **Checked**: {}", self.findings.len())?;
        writeln!(out, "- **Exact**: {}", self.count(AssetStatus::Exact))?;
        writeln!(out, "- **Fallback**: {}", self.count(AssetStatus::Fallback))?;
        writeln!(out, "- **Missing**: {}\n", self.count(AssetStatus::Missing))?;

        if self.flagged().next().is_none() {
            writeln!(out, "_Every asset matched its first candidate._")?;
            return Ok(());
        }
        writeln!(out, "| Status | Request | Resolved | Probes |")?;
        writeln!(out, "| --- | --- | --- | --- |")?;
        for finding in self.flagged() {
            writeln!(
                out,
                "| {} | `{}` | {} | {} |",
                finding.status.icon(),
                finding.request,
                finding
                    .resolved
                    .as_deref()
                    .map_or_else(|| "-".to_string(), |p| format!("`{p}`")),
                finding.probes
            )?;
        }
        writeln!(out)?;
        Ok(())
    }
}

/// Every narration track a screen or an unlocked encounter can play.
fn narration_tracks() -> BTreeSet<u8> {
    Screen::ALL
        .iter()
        .filter_map(|screen| screen.narration_track())
        .chain(EncounterSpec::ALL.iter().map(|spec| spec.unlock_track))
        .collect()
}

/// Audit the full asset catalog and every narration track under `root`.
///
/// # Errors
///
/// Fails when `root` is not a readable directory.
pub fn audit_assets(root: &Path) -> Result<AuditReport> {
    let metadata = std::fs::metadata(root)
        .with_context(|| format!("asset root {} is not readable", root.display()))?;
    ensure!(
        metadata.is_dir(),
        "asset root {} is not a directory",
        root.display()
    );

    let probe = |candidate: &AssetCandidate| root.join(&candidate.path).is_file();
    let catalog = AssetCatalog::full();
    let mut findings: Vec<AssetFinding> = catalog
        .requests()
        .iter()
        .map(|request| {
            let resolution = request.resolve(&probe);
            let status = if resolution.is_exact() {
                AssetStatus::Exact
            } else if resolution.asset.is_placeholder() {
                AssetStatus::Missing
            } else {
                AssetStatus::Fallback
            };
            AssetFinding {
                request: request.path_stem(),
                status,
                resolved: resolution.asset.path().map(str::to_string),
                probes: resolution.probes,
            }
        })
        .collect();

    findings.extend(narration_tracks().into_iter().map(|track| {
        let path = narration_path(track);
        let found = root.join(&path).is_file();
        AssetFinding {
            request: path.clone(),
            status: if found {
                AssetStatus::Exact
            } else {
                AssetStatus::Missing
            },
            resolved: found.then_some(path),
            probes: 1,
        }
    }));

    log::info!(
        "audited {} assets under {}",
        findings.len(),
        root.display()
    );
    Ok(AuditReport {
        root: root.to_path_buf(),
        findings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(root: &Path, relative: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, b"media").unwrap();
    }

    fn finding<'a>(report: &'a AuditReport, request: &str) -> &'a AssetFinding {
        report
            .findings
            .iter()
            .find(|f| f.request == request)
            .unwrap_or_else(|| panic!("{request} was not audited"))
    }

    #[test]
    fn classifies_exact_fallback_and_missing() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "characters/yuval_flash.mp4");
        touch(dir.path(), "enemies/Dragon.png");
        touch(dir.path(), "audio/1.m4a");

        let report = audit_assets(dir.path()).unwrap();
        let flash = finding(&report, "characters/yuval_flash");
        assert_eq!(flash.status, AssetStatus::Exact);
        assert_eq!(flash.probes, 1);

        let dragon = finding(&report, "enemies/Dragon");
        assert_eq!(dragon.status, AssetStatus::Fallback);
        assert_eq!(dragon.resolved.as_deref(), Some("enemies/Dragon.png"));
        assert_eq!(dragon.probes, 2);

        assert_eq!(finding(&report, "audio/1.m4a").status, AssetStatus::Exact);
        assert_eq!(finding(&report, "audio/13.m4a").status, AssetStatus::Missing);
        assert_eq!(finding(&report, "restaurant/pizza").status, AssetStatus::Missing);

        assert!(report.passed(false));
        assert!(!report.passed(true));
    }

    #[test]
    fn narration_covers_screens_and_unlock_prompts() {
        let tracks = narration_tracks();
        assert!(tracks.contains(&1));
        assert!(tracks.contains(&10));
        assert!(tracks.contains(&13));
    }

    #[test]
    fn missing_root_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = audit_assets(&dir.path().join("nope")).unwrap_err();
        assert!(err.to_string().contains("not readable"));
    }

    #[test]
    fn reports_render_flagged_assets() {
        let dir = tempfile::tempdir().unwrap();
        touch(dir.path(), "enemies/Dragon.png");
        let report = audit_assets(dir.path()).unwrap();

        let mut console = Vec::new();
        report.write_console(&mut console, false).unwrap();
        let console = String::from_utf8(console).unwrap();
        assert!(console.contains("Asset Audit"));
        assert!(console.contains("enemies/Dragon.png"));

        let mut markdown = Vec::new();
        report.write_markdown(&mut markdown).unwrap();
        let markdown = String::from_utf8(markdown).unwrap();
        assert!(markdown.contains("## Asset Audit"));
        assert!(markdown.contains("| ↪️ | `enemies/Dragon` | `enemies/Dragon.png` | 2 |"));
    }
}
