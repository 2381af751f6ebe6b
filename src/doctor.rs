//! `vend doctor`: report which external tools can be started.

use colored::*;

use crate::config::WorkspaceConfig;
use crate::process;
use crate::vcs::Vcs;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCheck {
    pub program: String,
    pub purpose: &'static str,
    pub found: bool,
}

/// Check the fetch and build programs plus every supported VCS client.
pub fn check_tools(config: &WorkspaceConfig, probe: impl Fn(&str) -> bool) -> Vec<ToolCheck> {
    let mut wanted: Vec<(String, &'static str)> = Vec::new();
    if let Some(p) = config.fetch.first() {
        wanted.push((p.clone(), "fetch"));
    }
    if let Some(p) = config.build.first() {
        wanted.push((p.clone(), "build"));
    }
    for vcs in Vcs::ALL {
        wanted.push((vcs.program().to_string(), "pin"));
    }

    let mut checks: Vec<ToolCheck> = Vec::new();
    for (program, purpose) in wanted {
        if checks.iter().any(|c| c.program == program) {
            continue;
        }
        let found = probe(&program);
        checks.push(ToolCheck {
            program,
            purpose,
            found,
        });
    }
    checks
}

/// Print the tool report. Returns false if the fetch or build program is missing.
pub fn run_doctor(config: &WorkspaceConfig) -> bool {
    println!("{} Checking tools...", "🚑".red());
    println!("-------------------------------");
    println!(
        "OS: {} ({})",
        std::env::consts::OS.green(),
        std::env::consts::ARCH.cyan()
    );

    let mut ok = true;
    for check in check_tools(config, process::is_available) {
        print!("Checking {} ({})... ", check.program, check.purpose);
        if check.found {
            println!("{}", "Found".green());
        } else if check.purpose == "pin" {
            println!("{}", "Not Found (Optional)".yellow());
        } else {
            println!("{}", "Not Found".red());
            ok = false;
        }
    }
    ok
}
