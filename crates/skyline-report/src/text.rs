use colored::Colorize;

use skyline_core::{Snapshot, ThreatLevel};

/// Format a short terminal summary of an analysis run.
pub fn format_summary(snapshot: &Snapshot) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "\n{} {}\n",
        "Skyline - UML Snapshot".bold(),
        format!("v{}", snapshot.version).dimmed()
    ));
    out.push_str(&format!("{}\n\n", "=".repeat(40)));

    out.push_str(&format!(
        "{}: {} ({})\n",
        "Project".bold(),
        snapshot.project.name,
        snapshot.project.language
    ));

    let real: Vec<_> = snapshot.classes.iter().filter(|c| !c.is_external).collect();
    let external_count = snapshot.classes.len() - real.len();

    out.push_str(&format!(
        "{}: {} classes in {} packages, {} external stubs\n",
        "Summary".bold(),
        real.len(),
        snapshot
            .packages
            .iter()
            .filter(|p| p.path != "external")
            .count(),
        external_count,
    ));

    let count_band = |band: ThreatLevel| real.iter().filter(|c| c.metrics.threat_level == band).count();
    let critical = count_band(ThreatLevel::Critical);
    let high = count_band(ThreatLevel::High);
    let moderate = count_band(ThreatLevel::Moderate);
    let low = count_band(ThreatLevel::Low);

    out.push_str(&format!("\n{}\n{}\n", "Complexity".bold(), "-".repeat(40)));
    out.push_str(&format!("  {}: {critical}\n", "CRITICAL".red().bold()));
    out.push_str(&format!("  {}: {high}\n", "HIGH".yellow().bold()));
    out.push_str(&format!("  {}: {moderate}\n", "MODERATE".yellow()));
    out.push_str(&format!("  {}: {low}\n", "LOW".green()));

    let tracked = real.iter().filter(|c| c.git.is_git_tracked).count();
    let tested = real.iter().filter(|c| c.metrics.test_exists).count();
    out.push_str(&format!(
        "\n{}: {tracked}/{} git-tracked, {tested}/{} with sibling tests\n",
        "Coverage".bold(),
        real.len(),
        real.len(),
    ));

    out
}
