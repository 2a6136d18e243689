// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! CLI output reporter with colored formatting

use crate::mesh::{HealingReport, Mesh};
use colored::*;
use std::time::Duration;

/// CLI reporter for formatted output
pub struct Reporter;

impl Reporter {
    /// Report the changes made by the healing pipeline
    pub fn report_healing(file: &str, before: (usize, usize), mesh: &Mesh, report: &HealingReport, duration: Duration) {
        println!("\n{}", "━".repeat(80).bright_black());
        println!("{} {}", "Healed:".bold(), file.cyan());
        println!("{}", "━".repeat(80).bright_black());

        if report.is_noop() {
            println!("{} {}", "✅".green(), "Mesh was already healthy".green().bold());
        } else {
            Self::print_count("Unused vertices", report.unused_vertices);
            Self::print_count("Degenerate faces", report.degenerate_faces);
            Self::print_count("Merged vertices", report.merged_vertices);
            Self::print_count("Healed triangles", report.healed_triangles);
            Self::print_count("Flipped normals", report.flipped_normals);
        }

        println!(
            "  {} {} → {}",
            "Vertices:".bright_black(),
            before.0,
            mesh.nb_vertices().to_string().cyan()
        );
        println!(
            "  {} {} → {}",
            "Faces:".bright_black(),
            before.1,
            mesh.nb_faces().to_string().cyan()
        );
        println!(
            "  {} {}",
            "Time:".bright_black(),
            Self::format_duration(duration).yellow()
        );
        println!("{}", "━".repeat(80).bright_black());
    }

    /// Report the wetted part of a mesh
    pub fn report_immersion(file: &str, free_surface: f64, immersed: Option<&Mesh>, duration: Duration) {
        println!("\n{}", "━".repeat(80).bright_black());
        println!("{} {} at z = {}", "Immersed:".bold(), file.cyan(), free_surface);
        println!("{}", "━".repeat(80).bright_black());

        match immersed {
            Some(mesh) => {
                println!(
                    "  {} {}",
                    "Faces:".bright_black(),
                    mesh.nb_faces().to_string().cyan()
                );
                println!(
                    "  {} {:.6}",
                    "Wetted area:".bright_black(),
                    mesh.surface_area()
                );
                if let Ok(nb_boundaries) = mesh.nb_boundaries() {
                    println!(
                        "  {} {}",
                        "Waterlines:".bright_black(),
                        nb_boundaries.to_string().cyan()
                    );
                }
            }
            None => println!("  {}", "No face below the free surface".yellow()),
        }

        println!(
            "  {} {}",
            "Time:".bright_black(),
            Self::format_duration(duration).yellow()
        );
        println!("{}", "━".repeat(80).bright_black());
    }

    /// Report error
    pub fn report_error(message: &str) {
        eprintln!("\n{} {}", "❌ Error:".red().bold(), message);
    }

    /// Report warning
    pub fn report_warning(message: &str) {
        println!("\n{} {}", "⚠️  Warning:".yellow().bold(), message);
    }

    /// Report info
    pub fn report_info(message: &str) {
        println!("{} {}", "ℹ️".bright_blue(), message);
    }

    /// Print success message
    pub fn success(message: &str) {
        println!("{} {}", "✅".green(), message.green());
    }

    fn print_count(name: &str, count: usize) {
        let value = if count == 0 {
            count.to_string().green()
        } else {
            count.to_string().yellow()
        };
        println!("  {} {}", format!("{}:", name).bright_black(), value);
    }

    /// Format duration for display
    fn format_duration(duration: Duration) -> String {
        let micros = duration.as_micros();

        if micros < 1_000 {
            format!("{}µs", micros)
        } else if micros < 1_000_000 {
            format!("{:.2}ms", micros as f64 / 1_000.0)
        } else {
            format!("{:.2}s", micros as f64 / 1_000_000.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(
            Reporter::format_duration(Duration::from_micros(500)),
            "500µs"
        );
        assert_eq!(
            Reporter::format_duration(Duration::from_millis(5)),
            "5.00ms"
        );
        assert_eq!(Reporter::format_duration(Duration::from_secs(2)), "2.00s");
    }
}
