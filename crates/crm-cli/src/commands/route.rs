//! Route decision and navigation commands.

use crm_session::{Access, RenderDecision, ShellView};
use serde::Serialize;
use tabled::Tabled;

use crate::config::OutputFormat;
use crate::output::{info, output, output_json, success, warning};
use crate::CliResult;

use super::Shell;

#[derive(Serialize)]
struct OpenOutput<'a> {
    path: &'a str,
    access: Access,
    #[serde(flatten)]
    decision: RenderDecision,
}

/// Navigation row for display.
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct NavDisplay {
    /// Link text.
    pub label: String,
    /// Target path.
    pub href: String,
    /// Active marker.
    #[tabled(rename = "")]
    pub active: String,
}

const fn access_label(access: Access) -> &'static str {
    match access {
        Access::Open => "open",
        Access::PublicOnly => "public",
        Access::Protected => "protected",
        Access::NotFound => "not found",
    }
}

/// Decides whether `path` may be shown for the stored session.
pub async fn run_open(shell: &Shell, path: &str, format: OutputFormat) -> CliResult<()> {
    let controller = shell.controller();
    let outcome = controller.initialize(path).await;

    let access = controller.routes().access(path);
    let decision = match outcome.redirect {
        Some(redirect) => RenderDecision::Redirect(redirect),
        None => controller.routes().decide(&controller.state(), path),
    };

    match format {
        OutputFormat::Table => match &decision {
            RenderDecision::Render => {
                success(&format!("{} ({}) may be shown", path, access_label(access)));
            }
            RenderDecision::Redirect(redirect) => info(&format!(
                "{} ({}) redirects to {}{}",
                path,
                access_label(access),
                redirect.to,
                if redirect.replace { " (replace)" } else { "" }
            )),
            RenderDecision::Wait => warning("Session is still loading"),
        },
        OutputFormat::Json => output_json(&OpenOutput {
            path,
            access,
            decision,
        })?,
        OutputFormat::Quiet => match &decision {
            RenderDecision::Render => println!("render"),
            RenderDecision::Redirect(redirect) => println!("{}", redirect.to),
            RenderDecision::Wait => println!("wait"),
        },
    }
    Ok(())
}

/// Shows the navigation for `path`.
pub async fn run_nav(shell: &Shell, path: &str, format: OutputFormat) -> CliResult<()> {
    let controller = shell.controller();
    controller.initialize(path).await;
    let view = ShellView::render(&controller.state(), path);

    match format {
        OutputFormat::Table => {
            println!("CRM System -> {}", view.brand_href);
            let rows: Vec<NavDisplay> = view
                .nav
                .iter()
                .map(|item| NavDisplay {
                    label: item.label.to_string(),
                    href: item.href.to_string(),
                    active: if item.active { "●".to_string() } else { String::new() },
                })
                .collect();
            output(&rows, format)?;

            if let Some(username) = &view.username {
                info(&format!("Signed in as {}", username));
            }
            if let Some(notice) = view.admin_notice {
                println!();
                info(notice);
                for affordance in &view.admin_affordances {
                    println!("  - {}", affordance);
                }
            }
        }
        OutputFormat::Json => output_json(&view)?,
        OutputFormat::Quiet => {
            if let Some(active) = view.active() {
                println!("{}", active.href);
            }
        }
    }
    Ok(())
}
